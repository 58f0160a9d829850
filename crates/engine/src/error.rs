use pensum_domain::ID;
use thiserror::Error;

/// Everything that can go wrong inside the notification engine. All of
/// these are recoverable at tick granularity; none of them may take the
/// poller loop down.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The reminder range query failed. The current tick is abandoned
    /// and the next tick retries.
    #[error("Reminder store query failed: {0}")]
    StoreQuery(anyhow::Error),
    /// A reminder points at an entity that no longer resolves. Only that
    /// row is skipped.
    #[error("Linked entity for reminder {0} could not be resolved")]
    MissingLink(ID),
    /// Deleting an acknowledged reminder failed. The row stays live in
    /// the store; the session dedup set keeps it quiet until the next
    /// session.
    #[error("Failed to delete reminder {reminder_id}: {source}")]
    Deletion { reminder_id: ID, source: anyhow::Error },
}
