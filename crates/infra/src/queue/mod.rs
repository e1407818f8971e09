mod inmemory;
mod postgres;

pub use inmemory::InMemoryDelayQueue;
pub use postgres::PostgresDelayQueue;

use bellman_domain::{ScheduledJob, ID};

/// One-shot delayed task execution facility. The queue delivers at least
/// once: an entry may be handed out again after a crashed run, so the
/// executor behind it has to tolerate duplicates.
#[async_trait::async_trait]
pub trait IDelayQueue: Send + Sync {
    /// Accepts a job for `reminder_id` to be run at `run_at` and returns
    /// the job reference
    async fn enqueue(&self, reminder_id: &ID, run_at: i64) -> anyhow::Result<ID>;
    /// Removes an entry that has not been claimed yet. Returns whether an
    /// entry was removed.
    async fn cancel(&self, job_id: &ID) -> anyhow::Result<bool>;
    async fn find(&self, job_id: &ID) -> Option<ScheduledJob>;
    /// Claims every entry due at or before `before` by removing it from
    /// the queue
    async fn delete_all_before(&self, before: i64) -> Vec<ScheduledJob>;
}
