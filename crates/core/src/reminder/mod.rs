pub mod cancel_reminder;
pub mod create_reminder;
pub mod fire_reminder;
pub mod schedule_reminder;
pub mod subscribers;
