use super::create_reminder::CreateReminderUseCase;
use super::schedule_reminder::ScheduleReminderUseCase;
use crate::shared::usecase::{execute, Subscriber};
use bellman_domain::Reminder;
use bellman_infra::Context;

pub struct ScheduleJobOnReminderCreated;

#[async_trait::async_trait]
impl Subscriber<CreateReminderUseCase> for ScheduleJobOnReminderCreated {
    async fn notify(&self, e: &Reminder, ctx: &Context) {
        let schedule_reminder = ScheduleReminderUseCase {
            reminder: e.clone(),
        };

        // Sideeffect, ignore result
        let _ = execute(schedule_reminder, ctx).await;
    }
}
