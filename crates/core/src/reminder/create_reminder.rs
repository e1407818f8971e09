use super::subscribers::ScheduleJobOnReminderCreated;
use crate::shared::usecase::{Subscriber, UseCase};
use bellman_domain::{Reminder, ResourceRef, ID};
use bellman_infra::Context;

/// Creates a `Reminder` for an actor about a resource. The delay queue job
/// is scheduled as a subscriber side effect, so callers get their reminder
/// back without waiting for anything beyond the insert.
#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub creator_id: ID,
    pub remindable: ResourceRef,
    pub remind_at: i64,
    pub note: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidReminder(String),
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder {
            id: Default::default(),
            creator_id: self.creator_id.clone(),
            remindable: self.remindable.clone(),
            remind_at: self.remind_at,
            note: self.note.clone(),
            job_id: None,
            created: now,
            updated: now,
        };
        reminder
            .validate()
            .map_err(|e| UseCaseError::InvalidReminder(e.to_string()))?;

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleJobOnReminderCreated)]
    }
}
