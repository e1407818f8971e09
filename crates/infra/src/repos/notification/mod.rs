mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;

use bellman_domain::{Notification, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    /// Stores the `Notification` together with its provenance link to
    /// `reminder_id` as one atomic unit. Either both records exist
    /// afterwards or neither does, and a reminder that already has a link
    /// makes the whole insert fail without side effects.
    async fn insert_for_reminder(
        &self,
        notification: &Notification,
        reminder_id: &ID,
    ) -> anyhow::Result<()>;
    async fn find(&self, notification_id: &ID) -> Option<Notification>;
    async fn find_by_recipient(&self, recipient_id: &ID) -> anyhow::Result<Vec<Notification>>;
}
