use crate::shared::entity::{Entity, ID};
use crate::shared::resource::ResourceRef;
use thiserror::Error;

/// A `Reminder` is a request to notify its creator about an entity at the
/// `remind_at` timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The actor that asked to be reminded. Becomes both the actor and the
    /// recipient of the `Notification` created when this fires.
    pub creator_id: ID,
    /// The entity this `Reminder` concerns
    pub remindable: ResourceRef,
    /// The timestamp in millis at which the creator should be notified.
    /// May be in the past, in which case the reminder fires as soon as
    /// possible.
    pub remind_at: i64,
    /// Optional free text carried over to the `Notification` subject
    pub note: Option<String>,
    /// Set once a delay queue job has been accepted for this `Reminder`.
    /// A non-null value means it must not be enqueued again.
    pub job_id: Option<ID>,
    pub created: i64,
    pub updated: i64,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderError {
    #[error("remind_at: {0} is not a valid timestamp")]
    InvalidRemindAt(i64),
    #[error("Reminder is missing a creator")]
    MissingCreator,
    #[error("Reminder is missing a remindable resource")]
    MissingResource,
}

impl Reminder {
    pub fn is_scheduled(&self) -> bool {
        self.job_id.is_some()
    }

    /// A `Reminder` read back from storage can be missing required fields,
    /// e.g. after a partial import. Such a record must never be turned into
    /// a `Notification`.
    pub fn validate(&self) -> Result<(), InvalidReminderError> {
        if self.remind_at <= 0 {
            return Err(InvalidReminderError::InvalidRemindAt(self.remind_at));
        }
        if self.creator_id.is_nil() {
            return Err(InvalidReminderError::MissingCreator);
        }
        if self.remindable.id.is_nil() {
            return Err(InvalidReminderError::MissingResource);
        }
        Ok(())
    }
}

impl Entity<ID> for Reminder {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::resource::ResourceKind;
    use uuid::Uuid;

    fn reminder_factory() -> Reminder {
        Reminder {
            id: Default::default(),
            creator_id: Default::default(),
            remindable: ResourceRef::new(ResourceKind::WorkItem, Default::default()),
            remind_at: 1609459200000,
            note: None,
            job_id: None,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn it_accepts_a_well_formed_reminder() {
        assert!(reminder_factory().validate().is_ok());
    }

    #[test]
    fn it_rejects_invalid_remind_at() {
        let mut reminder = reminder_factory();
        reminder.remind_at = 0;
        assert_eq!(
            reminder.validate(),
            Err(InvalidReminderError::InvalidRemindAt(0))
        );
    }

    #[test]
    fn it_rejects_missing_creator() {
        let mut reminder = reminder_factory();
        reminder.creator_id = Uuid::nil().into();
        assert_eq!(reminder.validate(), Err(InvalidReminderError::MissingCreator));
    }

    #[test]
    fn it_rejects_missing_resource() {
        let mut reminder = reminder_factory();
        reminder.remindable.id = Uuid::nil().into();
        assert_eq!(
            reminder.validate(),
            Err(InvalidReminderError::MissingResource)
        );
    }

    #[test]
    fn scheduled_state_follows_job_id() {
        let mut reminder = reminder_factory();
        assert!(!reminder.is_scheduled());
        reminder.job_id = Some(Default::default());
        assert!(reminder.is_scheduled());
    }
}
