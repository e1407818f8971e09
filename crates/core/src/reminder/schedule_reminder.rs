use crate::shared::usecase::UseCase;
use bellman_domain::Reminder;
use bellman_infra::Context;

/// Ensures a delay queue job exists for the `Reminder`. Calling this any
/// number of times, also concurrently, records at most one job on the
/// reminder.
#[derive(Debug)]
pub struct ScheduleReminderUseCase {
    pub reminder: Reminder,
}

#[derive(Debug)]
pub enum ScheduleOutcome {
    /// A job was accepted by the queue and recorded on the reminder
    Scheduled(Reminder),
    /// The reminder already holds a job reference, nothing was enqueued
    AlreadyScheduled(Reminder),
}

impl ScheduleOutcome {
    pub fn reminder(&self) -> &Reminder {
        match self {
            Self::Scheduled(reminder) | Self::AlreadyScheduled(reminder) => reminder,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    /// The queue did not accept the job. No job reference was recorded,
    /// so retrying `schedule` later is safe.
    SchedulingFailed,
    StorageError,
}

#[async_trait::async_trait]
impl UseCase for ScheduleReminderUseCase {
    type Response = ScheduleOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "ScheduleReminder";

    async fn execute(&mut self, ctx: &Context) -> Result<Self::Response, Self::Error> {
        if self.reminder.is_scheduled() {
            return Ok(ScheduleOutcome::AlreadyScheduled(self.reminder.clone()));
        }

        let job_id = ctx
            .queue
            .enqueue(&self.reminder.id, self.reminder.remind_at)
            .await
            .map_err(|_| UseCaseError::SchedulingFailed)?;

        let updated = ctx.sys.get_timestamp_millis();
        let marked = match ctx
            .repos
            .reminders
            .mark_scheduled(&self.reminder.id, &job_id, updated)
            .await
        {
            Ok(marked) => marked,
            Err(_) => {
                // Without the recorded job reference this enqueue never
                // happened as far as callers are concerned
                let _ = ctx.queue.cancel(&job_id).await;
                return Err(UseCaseError::StorageError);
            }
        };

        if !marked {
            // A concurrent schedule won the compare-and-set, or the
            // reminder was deleted underneath us. Drop our queue entry; a
            // leftover duplicate would be absorbed by the executor anyway.
            let _ = ctx.queue.cancel(&job_id).await;
            let stored = ctx
                .repos
                .reminders
                .find(&self.reminder.id)
                .await
                .ok()
                .flatten()
                .unwrap_or_else(|| self.reminder.clone());
            return Ok(ScheduleOutcome::AlreadyScheduled(stored));
        }

        let mut reminder = self.reminder.clone();
        reminder.job_id = Some(job_id);
        reminder.updated = updated;
        Ok(ScheduleOutcome::Scheduled(reminder))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::usecase::execute;
    use bellman_domain::{ResourceKind, ResourceRef, ScheduledJob, ID};
    use bellman_infra::{setup_context_inmemory, IDelayQueue, InMemoryDelayQueue};
    use std::sync::Arc;

    struct RejectingDelayQueue;

    #[async_trait::async_trait]
    impl IDelayQueue for RejectingDelayQueue {
        async fn enqueue(&self, _reminder_id: &ID, _run_at: i64) -> anyhow::Result<ID> {
            anyhow::bail!("Queue is unavailable")
        }

        async fn cancel(&self, _job_id: &ID) -> anyhow::Result<bool> {
            Ok(false)
        }

        async fn find(&self, _job_id: &ID) -> Option<ScheduledJob> {
            None
        }

        async fn delete_all_before(&self, _before: i64) -> Vec<ScheduledJob> {
            Vec::new()
        }
    }

    async fn reminder_factory(ctx: &bellman_infra::Context, remind_at: i64) -> Reminder {
        let reminder = Reminder {
            id: Default::default(),
            creator_id: Default::default(),
            remindable: ResourceRef::new(ResourceKind::WorkItem, Default::default()),
            remind_at,
            note: None,
            job_id: None,
            created: 0,
            updated: 0,
        };
        ctx.repos.reminders.insert(&reminder).await.unwrap();
        reminder
    }

    #[tokio::test]
    async fn it_enqueues_at_the_requested_time() {
        let ctx = setup_context_inmemory();
        let reminder = reminder_factory(&ctx, 1609459200000).await;

        let usecase = ScheduleReminderUseCase { reminder };
        let outcome = execute(usecase, &ctx).await.unwrap();

        let scheduled = outcome.reminder();
        let job_id = scheduled.job_id.clone().expect("Job reference to be set");
        let job = ctx.queue.find(&job_id).await.expect("Job to be enqueued");
        assert_eq!(job.run_at, 1609459200000);
        assert_eq!(job.reminder_id, scheduled.id);
    }

    #[tokio::test]
    async fn it_is_idempotent() {
        let ctx = setup_context_inmemory();
        let reminder = reminder_factory(&ctx, 100).await;

        let usecase = ScheduleReminderUseCase { reminder };
        let outcome = execute(usecase, &ctx).await.unwrap();
        let first = outcome.reminder().clone();
        assert!(matches!(outcome, ScheduleOutcome::Scheduled(_)));

        let usecase = ScheduleReminderUseCase {
            reminder: first.clone(),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();
        assert!(matches!(outcome, ScheduleOutcome::AlreadyScheduled(_)));
        assert_eq!(outcome.reminder().job_id, first.job_id);

        // Exactly one queue entry was ever created
        assert_eq!(ctx.queue.delete_all_before(i64::MAX).await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_schedules_record_a_single_job() {
        let ctx = setup_context_inmemory();
        let reminder = reminder_factory(&ctx, 100).await;

        // Two callers each holding a stale unscheduled snapshot
        let usecase = ScheduleReminderUseCase {
            reminder: reminder.clone(),
        };
        let first = execute(usecase, &ctx).await.unwrap();
        let usecase = ScheduleReminderUseCase { reminder };
        let second = execute(usecase, &ctx).await.unwrap();

        assert!(matches!(first, ScheduleOutcome::Scheduled(_)));
        assert!(matches!(second, ScheduleOutcome::AlreadyScheduled(_)));
        // The loser observes the winner's job reference
        assert_eq!(second.reminder().job_id, first.reminder().job_id);
        assert_eq!(ctx.queue.delete_all_before(i64::MAX).await.len(), 1);
    }

    #[tokio::test]
    async fn rejected_enqueue_leaves_the_reminder_unscheduled() {
        let mut ctx = setup_context_inmemory();
        let reminder = reminder_factory(&ctx, 100).await;

        ctx.queue = Arc::new(RejectingDelayQueue);
        let usecase = ScheduleReminderUseCase {
            reminder: reminder.clone(),
        };
        let res = execute(usecase, &ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::SchedulingFailed);

        let stored = ctx
            .repos
            .reminders
            .find(&reminder.id)
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_scheduled());

        // The queue came back, retrying succeeds
        ctx.queue = Arc::new(InMemoryDelayQueue::new());
        let usecase = ScheduleReminderUseCase { reminder: stored };
        let outcome = execute(usecase, &ctx).await.unwrap();
        assert!(matches!(outcome, ScheduleOutcome::Scheduled(_)));
    }
}
