use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use bellman_domain::{Reminder, ID};
use std::sync::Mutex;

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn mark_scheduled(
        &self,
        reminder_id: &ID,
        job_id: &ID,
        updated: i64,
    ) -> anyhow::Result<bool> {
        // Single guard over read and write, matching the database CAS
        let mut reminders = self.reminders.lock().unwrap();
        for reminder in reminders.iter_mut() {
            if reminder.id == *reminder_id {
                if reminder.job_id.is_some() {
                    return Ok(false);
                }
                reminder.job_id = Some(job_id.clone());
                reminder.updated = updated;
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        delete(reminder_id, &self.reminders)
    }
}
