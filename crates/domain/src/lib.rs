mod notification;
mod reminder;
mod scheduled_job;
mod shared;

pub use notification::{Notification, NotificationReason, ReminderNotification};
pub use reminder::{InvalidReminderError, Reminder};
pub use scheduled_job::ScheduledJob;
pub use shared::entity::{Entity, ID};
pub use shared::resource::{ResourceKind, ResourceRef};
