use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use bellman_domain::{Notification, ReminderNotification, ID};
use std::sync::{Arc, Mutex};

pub struct InMemoryNotificationRepo {
    notifications: Mutex<Vec<Notification>>,
    /// Shared with `InMemoryReminderNotificationRepo` so that the link
    /// written here is the one the executor guard reads
    links: Arc<Mutex<Vec<ReminderNotification>>>,
}

impl InMemoryNotificationRepo {
    pub fn new(links: Arc<Mutex<Vec<ReminderNotification>>>) -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            links,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert_for_reminder(
        &self,
        notification: &Notification,
        reminder_id: &ID,
    ) -> anyhow::Result<()> {
        // Locking the links for the whole insert stands in for the unique
        // constraint and transaction of the postgres repo
        let mut links = self.links.lock().unwrap();
        if links.iter().any(|link| link.reminder_id == *reminder_id) {
            anyhow::bail!(
                "Reminder: {} already has a notification linked to it",
                reminder_id
            );
        }
        insert(notification, &self.notifications);
        links.push(ReminderNotification {
            reminder_id: reminder_id.clone(),
            notification_id: notification.id.clone(),
        });
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        find(notification_id, &self.notifications)
    }

    async fn find_by_recipient(&self, recipient_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let res = find_by(&self.notifications, |notification| {
            notification.recipient_id == *recipient_id
        });
        Ok(res)
    }
}
