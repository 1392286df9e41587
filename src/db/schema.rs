use anyhow::Result;
use scylla::client::session::Session;

// ============================================================================
// Schema - Tables Read and Written by the Updater
// ============================================================================

const TABLES: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS club_events (
        group_key text,
        sequence text,
        event_type text,
        payload text,
        PRIMARY KEY (group_key, sequence)
    )",
    "CREATE TABLE IF NOT EXISTS players (
        id uuid PRIMARY KEY,
        name text,
        current_club_id uuid,
        active boolean,
        source_name text
    )",
    "CREATE TABLE IF NOT EXISTS raw_stats (
        round int,
        player_id uuid,
        club_id uuid,
        goals int,
        behinds int,
        disposals int,
        marks int,
        hitouts int,
        tackles int,
        kicks int,
        handballs int,
        goal_assists int,
        inside50s int,
        frees_for int,
        frees_against int,
        PRIMARY KEY (round, player_id)
    )",
    "CREATE TABLE IF NOT EXISTS club_seasons (
        year int,
        club_id text,
        id uuid,
        coach_name text,
        club_name text,
        email text,
        contracts text,
        version bigint,
        updated_at timestamp,
        PRIMARY KEY (year, club_id)
    )",
];

/// Create the keyspace and tables if missing, then switch the session to it
pub async fn ensure_schema(session: &Session, keyspace: &str) -> Result<()> {
    session
        .query_unpaged(
            format!(
                "CREATE KEYSPACE IF NOT EXISTS {keyspace} WITH REPLICATION = \
                 {{'class': 'SimpleStrategy', 'replication_factor': 1}}"
            ),
            (),
        )
        .await?;

    session.use_keyspace(keyspace, false).await?;

    for ddl in TABLES {
        session.query_unpaged(ddl, ()).await?;
    }

    tracing::info!(keyspace = %keyspace, tables = TABLES.len(), "Schema ready");
    Ok(())
}
