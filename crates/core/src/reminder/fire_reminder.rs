use crate::shared::usecase::UseCase;
use bellman_domain::{Notification, NotificationReason, ID};
use bellman_infra::Context;

/// Executes a due reminder job: turns the `Reminder` into exactly one
/// `Notification` plus the provenance link that proves where it came from.
/// The delay queue delivers at least once, so this must be safe to invoke
/// any number of times for the same reminder.
#[derive(Debug)]
pub struct FireReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum FireOutcome {
    Fired(Notification),
    /// The reminder was already fired, or was canceled since it was
    /// scheduled. Expected with an at-least-once queue, not an error.
    AlreadySatisfied,
}

impl FireOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            Self::Fired(notification) => Some(notification),
            Self::AlreadySatisfied => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    /// The reminder exists but cannot be turned into a notification.
    /// Retrying will not help, the record needs operator attention.
    InvalidReminder(ID),
    /// Reading the reminder failed, eligible for another attempt
    StorageError,
    /// Creating the notification/link pair failed. The reminder stays
    /// scheduled-but-unfired, eligible for another attempt.
    NotificationCreationFailed,
}

#[async_trait::async_trait]
impl UseCase for FireReminderUseCase {
    type Response = FireOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "FireReminder";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        // Re-read current state, the queue payload may be arbitrarily stale
        let reminder = match ctx
            .repos
            .reminders
            .find(&self.reminder_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
        {
            Some(reminder) => reminder,
            // Canceled or deleted since it was scheduled
            None => return Ok(FireOutcome::AlreadySatisfied),
        };

        if ctx
            .repos
            .reminder_notifications
            .find_by_reminder(&reminder.id)
            .await
            .is_some()
        {
            return Ok(FireOutcome::AlreadySatisfied);
        }

        if reminder.validate().is_err() {
            return Err(UseCaseError::InvalidReminder(reminder.id.clone()));
        }

        let notification = Notification {
            id: Default::default(),
            actor_id: reminder.creator_id.clone(),
            recipient_id: reminder.creator_id.clone(),
            resource: reminder.remindable.clone(),
            reason: NotificationReason::Reminder,
            subject: reminder.note.clone(),
            created: ctx.sys.get_timestamp_millis(),
        };

        if ctx
            .repos
            .notifications
            .insert_for_reminder(&notification, &reminder.id)
            .await
            .is_err()
        {
            // A concurrent execution may have gotten there first, in which
            // case the unique provenance link made our insert fail and
            // there is nothing left to do
            if ctx
                .repos
                .reminder_notifications
                .find_by_reminder(&reminder.id)
                .await
                .is_some()
            {
                return Ok(FireOutcome::AlreadySatisfied);
            }
            return Err(UseCaseError::NotificationCreationFailed);
        }

        Ok(FireOutcome::Fired(notification))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use bellman_domain::{Reminder, ResourceKind, ResourceRef};
    use bellman_infra::{setup_context_inmemory, Context, INotificationRepo};
    use std::sync::Arc;
    use uuid::Uuid;

    struct FailingNotificationRepo;

    #[async_trait::async_trait]
    impl INotificationRepo for FailingNotificationRepo {
        async fn insert_for_reminder(
            &self,
            _notification: &Notification,
            _reminder_id: &ID,
        ) -> anyhow::Result<()> {
            anyhow::bail!("Notification storage is unavailable")
        }

        async fn find(&self, _notification_id: &ID) -> Option<Notification> {
            None
        }

        async fn find_by_recipient(&self, _recipient_id: &ID) -> anyhow::Result<Vec<Notification>> {
            Ok(Vec::new())
        }
    }

    async fn scheduled_reminder_factory(ctx: &Context, note: Option<String>) -> Reminder {
        let reminder = Reminder {
            id: Default::default(),
            creator_id: Default::default(),
            remindable: ResourceRef::new(ResourceKind::WorkItem, Default::default()),
            remind_at: 1609459200000,
            note,
            job_id: Some(Default::default()),
            created: 0,
            updated: 0,
        };
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    #[tokio::test]
    async fn it_creates_a_notification_from_the_reminder() {
        let ctx = setup_context_inmemory();
        let reminder = scheduled_reminder_factory(&ctx, Some("Review the budget".into())).await;

        let usecase = FireReminderUseCase {
            reminder_id: reminder.id.clone(),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();
        let notification = outcome.notification().expect("Notification to be created");

        assert_eq!(notification.actor_id, reminder.creator_id);
        assert_eq!(notification.recipient_id, reminder.creator_id);
        assert_eq!(notification.resource, reminder.remindable);
        assert_eq!(notification.reason.to_string(), "reminder");
        assert_eq!(notification.subject.as_deref(), Some("Review the budget"));

        let link = ctx
            .repos
            .reminder_notifications
            .find_by_reminder(&reminder.id)
            .await
            .expect("Provenance link to be created");
        assert_eq!(link.notification_id, notification.id);
    }

    #[tokio::test]
    async fn it_does_not_fire_twice() {
        let ctx = setup_context_inmemory();
        let reminder = scheduled_reminder_factory(&ctx, None).await;

        let usecase = FireReminderUseCase {
            reminder_id: reminder.id.clone(),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();
        assert!(matches!(outcome, FireOutcome::Fired(_)));

        // Queue redelivery of the same job
        let usecase = FireReminderUseCase {
            reminder_id: reminder.id.clone(),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();
        assert!(matches!(outcome, FireOutcome::AlreadySatisfied));

        let notifications = ctx
            .repos
            .notifications
            .find_by_recipient(&reminder.creator_id)
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
    }

    #[tokio::test]
    async fn it_treats_a_missing_reminder_as_satisfied() {
        let ctx = setup_context_inmemory();

        let usecase = FireReminderUseCase {
            reminder_id: Default::default(),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();
        assert!(matches!(outcome, FireOutcome::AlreadySatisfied));
    }

    #[tokio::test]
    async fn it_surfaces_a_malformed_reminder() {
        let ctx = setup_context_inmemory();
        let mut reminder = scheduled_reminder_factory(&ctx, None).await;
        reminder.creator_id = Uuid::nil().into();
        // Overwrite with the corrupt record
        ctx.repos.reminders.delete(&reminder.id).await.unwrap();
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = FireReminderUseCase {
            reminder_id: reminder.id.clone(),
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(
            res.unwrap_err(),
            UseCaseError::InvalidReminder(reminder.id.clone())
        );
        assert!(ctx
            .repos
            .reminder_notifications
            .find_by_reminder(&reminder.id)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn failed_creation_leaves_the_reminder_unfired() {
        let mut ctx = setup_context_inmemory();
        let reminder = scheduled_reminder_factory(&ctx, None).await;

        ctx.repos.notifications = Arc::new(FailingNotificationRepo);
        let usecase = FireReminderUseCase {
            reminder_id: reminder.id.clone(),
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotificationCreationFailed);

        // No orphaned link, and the reminder is still scheduled-but-unfired
        // so a redelivery can pick it up
        assert!(ctx
            .repos
            .reminder_notifications
            .find_by_reminder(&reminder.id)
            .await
            .is_none());
        let stored = ctx
            .repos
            .reminders
            .find(&reminder.id)
            .await
            .unwrap()
            .expect("Reminder to still exist");
        assert!(stored.is_scheduled());
    }
}
