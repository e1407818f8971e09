mod notification;
mod reminder;
mod reminder_notification;
pub(crate) mod shared;

pub use notification::{INotificationRepo, InMemoryNotificationRepo, PostgresNotificationRepo};
pub use reminder::{IReminderRepo, InMemoryReminderRepo, PostgresReminderRepo};
pub use reminder_notification::{
    IReminderNotificationRepo, InMemoryReminderNotificationRepo, PostgresReminderNotificationRepo,
};

use sqlx::PgPool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
    pub reminder_notifications: Arc<dyn IReminderNotificationRepo>,
}

impl Repos {
    pub fn create_postgres(pool: PgPool) -> Self {
        Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool.clone())),
            reminder_notifications: Arc::new(PostgresReminderNotificationRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        // The notification repo writes provenance links and the link repo
        // reads them, so the two share the same backing collection
        let links = Arc::new(Mutex::new(Vec::new()));
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new(links.clone())),
            reminder_notifications: Arc::new(InMemoryReminderNotificationRepo::new(links)),
        }
    }
}
