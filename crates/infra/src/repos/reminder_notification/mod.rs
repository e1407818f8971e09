mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderNotificationRepo;
pub use postgres::PostgresReminderNotificationRepo;

use bellman_domain::{ReminderNotification, ID};

/// Read access to the reminder -> notification provenance links. Links are
/// only ever written through `INotificationRepo::insert_for_reminder`.
#[async_trait::async_trait]
pub trait IReminderNotificationRepo: Send + Sync {
    async fn find_by_reminder(&self, reminder_id: &ID) -> Option<ReminderNotification>;
}
