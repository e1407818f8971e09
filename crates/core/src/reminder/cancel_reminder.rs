use crate::shared::usecase::UseCase;
use bellman_domain::{Reminder, ID};
use bellman_infra::Context;

/// Removes a `Reminder` and drops its pending queue entry when it has one.
/// A job that already slipped past the cancellation is harmless: the
/// executor treats a missing reminder as already satisfied.
#[derive(Debug)]
pub struct CancelReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

#[async_trait::async_trait]
impl UseCase for CancelReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CancelReminder";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        let reminder = ctx
            .repos
            .reminders
            .delete(&self.reminder_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.reminder_id.clone()))?;

        if let Some(job_id) = &reminder.job_id {
            let _ = ctx.queue.cancel(job_id).await;
        }

        Ok(reminder)
    }
}
