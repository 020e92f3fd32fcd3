use async_trait::async_trait;

use crate::model::Territory;

/// Outbound confirmation sink for new locks. Delivery is best effort: the
/// manager never waits on it and only logs failures.
#[async_trait]
pub trait LockNotifier: Send + Sync {
    async fn lock_confirmed(&self, territory: &Territory) -> anyhow::Result<()>;
}

/// Writes confirmations to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl LockNotifier for LogNotifier {
    async fn lock_confirmed(&self, territory: &Territory) -> anyhow::Result<()> {
        tracing::info!(
            territory_id = %territory.id,
            practice = %territory.owner.practice,
            rep = %territory.owner.rep,
            "Lock confirmation sent"
        );
        Ok(())
    }
}
