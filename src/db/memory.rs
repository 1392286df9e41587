//! In-memory collaborators for exercising the updater without ScyllaDB.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::club::value_objects::year_of;
use crate::domain::club::{ClubSeasonProjection, Player, RawStat};
use crate::event_sourcing::{EventStore, StoredEvent};

use super::{PlayerStore, ProjectionStore, StatStore};

/// Event streams keyed by group key; an unavailable store fails every load
#[derive(Default)]
pub struct InMemoryEventStore {
    streams: HashMap<String, Vec<StoredEvent>>,
    unavailable: bool,
}

impl InMemoryEventStore {
    pub fn with_events(events: Vec<StoredEvent>) -> Self {
        let mut streams: HashMap<String, Vec<StoredEvent>> = HashMap::new();
        for event in events {
            streams.entry(event.group_key.clone()).or_default().push(event);
        }
        Self {
            streams,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            streams: HashMap::new(),
            unavailable: true,
        }
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn load_events(&self, group_key: &str) -> Result<Vec<StoredEvent>> {
        if self.unavailable {
            bail!("event store unavailable");
        }
        Ok(self.streams.get(group_key).cloned().unwrap_or_default())
    }
}

/// Players keyed by id; lookups for `failing_ids` error out
#[derive(Default)]
pub struct InMemoryPlayerStore {
    players: HashMap<Uuid, Player>,
    failing_ids: HashSet<Uuid>,
}

impl InMemoryPlayerStore {
    pub fn with_players(players: Vec<Player>) -> Self {
        Self {
            players: players.into_iter().map(|p| (p.id, p)).collect(),
            failing_ids: HashSet::new(),
        }
    }

    pub fn failing_on(mut self, ids: &[Uuid]) -> Self {
        self.failing_ids = ids.iter().copied().collect();
        self
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    async fn find_player(&self, id: Uuid) -> Result<Option<Player>> {
        if self.failing_ids.contains(&id) {
            bail!("player lookup failed for {id}");
        }
        Ok(self.players.get(&id).cloned())
    }
}

/// Stats keyed by round; records every round that was requested and fails
/// rounds belonging to `failing_years`
#[derive(Default)]
pub struct InMemoryStatStore {
    rounds: HashMap<i32, Vec<RawStat>>,
    requested: Mutex<Vec<i32>>,
    failing_years: HashSet<i32>,
}

impl InMemoryStatStore {
    pub fn with_stats(stats: Vec<RawStat>) -> Self {
        let mut rounds: HashMap<i32, Vec<RawStat>> = HashMap::new();
        for stat in stats {
            rounds.entry(stat.round).or_default().push(stat);
        }
        Self {
            rounds,
            requested: Mutex::new(Vec::new()),
            failing_years: HashSet::new(),
        }
    }

    pub fn failing_on(mut self, years: &[i32]) -> Self {
        self.failing_years = years.iter().copied().collect();
        self
    }

    pub fn requested_rounds(&self) -> Vec<i32> {
        let mut rounds = self.requested.lock().unwrap().clone();
        rounds.sort_unstable();
        rounds
    }
}

#[async_trait]
impl StatStore for InMemoryStatStore {
    async fn load_round(&self, round: i32) -> Result<Vec<RawStat>> {
        self.requested.lock().unwrap().push(round);
        if self.failing_years.contains(&year_of(round)) {
            bail!("stats unavailable for round {round}");
        }
        Ok(self.rounds.get(&round).cloned().unwrap_or_default())
    }
}

/// Projection rows keyed by (year, club id); writes for `failing_years` error out
#[derive(Default)]
pub struct InMemoryProjectionStore {
    rows: Mutex<BTreeMap<(i32, String), ClubSeasonProjection>>,
    failing_years: HashSet<i32>,
}

impl InMemoryProjectionStore {
    pub fn failing_on(years: &[i32]) -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            failing_years: years.iter().copied().collect(),
        }
    }

    pub fn rows(&self) -> BTreeMap<(i32, String), ClubSeasonProjection> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProjectionStore for InMemoryProjectionStore {
    async fn replace(&self, projection: &ClubSeasonProjection) -> Result<()> {
        if self.failing_years.contains(&projection.year) {
            bail!("write rejected for {}", projection.year);
        }
        self.rows
            .lock()
            .unwrap()
            .insert(projection.key(), projection.clone());
        Ok(())
    }
}
