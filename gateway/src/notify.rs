//! NATS lock confirmations
//!
//! Publishes one message per confirmed lock to
//! `territory.lock.confirmed.{territory_id}`. Requests only enqueue; a
//! background task does the publishing. Without a NATS connection the
//! confirmations are logged and dropped.

use anyhow::anyhow;
use async_nats::Client;
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use territory_lock::{LockNotifier, Territory};
use tokio::sync::mpsc;

const SUBJECT_PREFIX: &str = "territory.lock.confirmed";
const QUEUE_CAPACITY: usize = 1000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LockConfirmation<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    territory: &'a Territory,
    timestamp: i64,
}

pub fn subject_for(territory_id: &str) -> String {
    format!("{}.{}", SUBJECT_PREFIX, territory_id)
}

pub struct NatsNotifier {
    tx: mpsc::Sender<Territory>,
}

impl NatsNotifier {
    /// Connects when a URL is given and starts the publisher task.
    pub async fn start(nats_url: Option<&str>) -> Self {
        let client = match nats_url {
            Some(url) => match async_nats::connect(url).await {
                Ok(client) => {
                    tracing::info!("📡 Connected to NATS at {}", url);
                    Some(client)
                }
                Err(e) => {
                    tracing::warn!("⚠️  NATS not available: {} (confirmations will be logged only)", e);
                    None
                }
            },
            None => {
                tracing::info!("📴 NATS_URL not set, lock confirmations will be logged only");
                None
            }
        };

        let (notifier, rx) = Self::channel(QUEUE_CAPACITY);
        tokio::spawn(run(client, rx));
        notifier
    }

    fn channel(capacity: usize) -> (Self, mpsc::Receiver<Territory>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl LockNotifier for NatsNotifier {
    async fn lock_confirmed(&self, territory: &Territory) -> anyhow::Result<()> {
        self.tx
            .try_send(territory.clone())
            .map_err(|e| anyhow!("confirmation queue rejected {}: {}", territory.id, e))
    }
}

async fn run(client: Option<Client>, mut rx: mpsc::Receiver<Territory>) {
    while let Some(territory) = rx.recv().await {
        let Some(client) = &client else {
            tracing::info!(
                territory_id = %territory.id,
                practice = %territory.owner.practice,
                "Lock confirmation (offline)"
            );
            continue;
        };

        let subject = subject_for(&territory.id);
        let event = LockConfirmation {
            kind: "LockConfirmed",
            territory: &territory,
            timestamp: Utc::now().timestamp_millis(),
        };
        let payload = match serde_json::to_vec(&event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to encode confirmation for {}: {}", territory.id, e);
                continue;
            }
        };

        match client.publish(subject.clone(), payload.into()).await {
            Ok(()) => tracing::debug!(subject = %subject, "Lock confirmation published"),
            Err(e) => tracing::error!("Failed to publish to {}: {}", subject, e),
        }
    }
    tracing::warn!("Confirmation channel closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use territory_lock::geofence::GeoPoint;
    use territory_lock::{ClaimStatus, OwnerMeta};

    fn territory(id: &str) -> Territory {
        Territory {
            id: id.to_string(),
            center: GeoPoint::new(33.8488, -84.3877).unwrap(),
            radius: 10.0,
            owner: OwnerMeta {
                practice: "Smile Atlanta".into(),
                practice_address: None,
                rep: "Jordan".into(),
                rep_email: None,
            },
            created_at: Utc::now(),
            status: ClaimStatus::Active,
        }
    }

    #[test]
    fn test_subject() {
        assert_eq!(
            subject_for("territory_abc"),
            "territory.lock.confirmed.territory_abc"
        );
    }

    #[tokio::test]
    async fn test_confirmations_are_queued() {
        let (notifier, mut rx) = NatsNotifier::channel(4);
        notifier.lock_confirmed(&territory("territory_1")).await.unwrap();

        let queued = rx.recv().await.unwrap();
        assert_eq!(queued.id, "territory_1");
    }

    #[tokio::test]
    async fn test_full_queue_fails_without_blocking() {
        let (notifier, _rx) = NatsNotifier::channel(1);
        notifier.lock_confirmed(&territory("territory_1")).await.unwrap();
        assert!(notifier.lock_confirmed(&territory("territory_2")).await.is_err());
    }

    #[tokio::test]
    async fn test_offline_start_accepts_confirmations() {
        let notifier = NatsNotifier::start(None).await;
        assert!(notifier.lock_confirmed(&territory("territory_1")).await.is_ok());
    }

    #[test]
    fn test_payload_shape() {
        let t = territory("territory_1");
        let event = LockConfirmation {
            kind: "LockConfirmed",
            territory: &t,
            timestamp: 0,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "LockConfirmed");
        assert_eq!(json["territory"]["practice"], "Smile Atlanta");
        assert_eq!(json["territory"]["status"], "ACTIVE");
    }
}
