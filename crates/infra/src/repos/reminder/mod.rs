mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

use bellman_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// A storage failure is distinct from an absent reminder: the executor
    /// treats the former as retryable and the latter as canceled.
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// Compare-and-set of the idempotency marker. Succeeds only when no
    /// job reference has been recorded yet, so at most one caller ever
    /// observes `true` for a given reminder.
    async fn mark_scheduled(&self, reminder_id: &ID, job_id: &ID, updated: i64)
        -> anyhow::Result<bool>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
}
