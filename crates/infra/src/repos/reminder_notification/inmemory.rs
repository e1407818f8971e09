use super::IReminderNotificationRepo;
use bellman_domain::{ReminderNotification, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryReminderNotificationRepo {
    links: Arc<Mutex<Vec<ReminderNotification>>>,
}

impl InMemoryReminderNotificationRepo {
    pub fn new(links: Arc<Mutex<Vec<ReminderNotification>>>) -> Self {
        Self { links }
    }
}

#[async_trait::async_trait]
impl IReminderNotificationRepo for InMemoryReminderNotificationRepo {
    async fn find_by_reminder(&self, reminder_id: &ID) -> Option<ReminderNotification> {
        let links = self.links.lock().unwrap();
        links
            .iter()
            .find(|link| link.reminder_id == *reminder_id)
            .cloned()
    }
}
