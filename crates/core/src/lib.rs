mod job_schedulers;
mod reminder;
mod shared;

pub use job_schedulers::{dispatch_due_reminders, start_reminder_dispatch_job};
pub use reminder::cancel_reminder::CancelReminderUseCase;
pub use reminder::create_reminder::CreateReminderUseCase;
pub use reminder::fire_reminder::{FireOutcome, FireReminderUseCase};
pub use reminder::schedule_reminder::{ScheduleOutcome, ScheduleReminderUseCase};
pub use shared::usecase::{execute, Subscriber, UseCase};
