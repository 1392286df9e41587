use anyhow::Result;
use rdkafka::{
    config::ClientConfig,
    consumer::{CommitMode, Consumer, StreamConsumer},
    Message,
};
use uuid::Uuid;

use crate::domain::club::ClubReadUpdater;

// ============================================================================
// Trigger Consumer - Club Ids From Redpanda
// ============================================================================
//
// Every message carries one club id. The consumer runs the updater for it and
// commits the offset afterwards whatever the outcome: a failed club is
// retried by publishing its id again, not by redelivery.
//
// ============================================================================

pub struct TriggerConsumer {
    consumer: StreamConsumer,
    topic: String,
}

impl TriggerConsumer {
    pub fn new(brokers: &str, group_id: &str, topic: &str) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .create()?;

        consumer.subscribe(&[topic])?;

        tracing::info!(topic = %topic, group_id = %group_id, "Subscribed to trigger topic");

        Ok(Self {
            consumer,
            topic: topic.to_string(),
        })
    }

    /// Consume triggers until the stream errors out
    pub async fn run(&self, updater: &ClubReadUpdater) -> Result<()> {
        loop {
            let message = self.consumer.recv().await?;

            match message.payload_view::<str>() {
                Some(Ok(payload)) => match parse_trigger(payload) {
                    Ok(club_id) => {
                        tracing::info!(
                            club_id = %club_id,
                            partition = message.partition(),
                            offset = message.offset(),
                            "Received club update trigger"
                        );
                        // Failures are already logged and counted by the updater
                        let _ = updater.run(club_id).await;
                    }
                    Err(e) => {
                        tracing::warn!(
                            topic = %self.topic,
                            payload = %payload,
                            error = %e,
                            "Skipping trigger with invalid club id"
                        );
                    }
                },
                Some(Err(e)) => {
                    tracing::warn!(topic = %self.topic, error = %e, "Skipping non UTF-8 trigger");
                }
                None => {
                    tracing::warn!(topic = %self.topic, "Skipping empty trigger");
                }
            }

            self.consumer.commit_message(&message, CommitMode::Async)?;
        }
    }
}

/// A trigger payload is a club id as UUID text, optionally quoted
pub fn parse_trigger(payload: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(payload.trim().trim_matches('"'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trigger_plain_and_padded() {
        let club_id = Uuid::new_v4();

        assert_eq!(parse_trigger(&club_id.to_string()).unwrap(), club_id);
        assert_eq!(parse_trigger(&format!("  {club_id}\n")).unwrap(), club_id);
        assert_eq!(parse_trigger(&format!("\"{club_id}\"")).unwrap(), club_id);
    }

    #[test]
    fn test_parse_trigger_rejects_garbage() {
        assert!(parse_trigger("").is_err());
        assert!(parse_trigger("club-42").is_err());
    }
}
