use bellman_core::{
    dispatch_due_reminders, execute, CancelReminderUseCase, CreateReminderUseCase,
};
use bellman_domain::{ResourceKind, ResourceRef, ID};
use bellman_infra::{setup_context_inmemory, Context, ISys};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

struct StaticTimeSys {
    ts: i64,
}
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.ts
    }
}

fn set_time(ctx: &mut Context, ts: i64) {
    ctx.sys = Arc::new(StaticTimeSys { ts });
}

#[tokio::test]
async fn reminder_becomes_exactly_one_notification() {
    let mut ctx = setup_context_inmemory();

    let created_at = Utc.ymd(2024, 12, 31).and_hms(12, 0, 0).timestamp_millis();
    let remind_at = Utc.ymd(2025, 1, 1).and_hms(9, 0, 0).timestamp_millis();
    set_time(&mut ctx, created_at);

    let creator_id: ID = Default::default();
    let work_item = ResourceRef::new(ResourceKind::WorkItem, Default::default());
    let usecase = CreateReminderUseCase {
        creator_id: creator_id.clone(),
        remindable: work_item.clone(),
        remind_at,
        note: Some("Budget review due".into()),
    };
    let reminder = execute(usecase, &ctx).await.expect("To create reminder");

    // Scheduling happened on create: one queue entry, at the requested time
    let stored = ctx
        .repos
        .reminders
        .find(&reminder.id)
        .await
        .unwrap()
        .unwrap();
    let job_id = stored.job_id.clone().expect("Job reference to be recorded");
    let job = ctx.queue.find(&job_id).await.expect("Job to be enqueued");
    assert_eq!(job.run_at, remind_at);

    // Nothing fires before the scheduled time
    dispatch_due_reminders(&ctx).await;
    assert!(ctx
        .repos
        .notifications
        .find_by_recipient(&creator_id)
        .await
        .unwrap()
        .is_empty());

    // Time passes, the dispatch tick turns the reminder into a notification
    set_time(&mut ctx, remind_at);
    dispatch_due_reminders(&ctx).await;
    let notifications = ctx
        .repos
        .notifications
        .find_by_recipient(&creator_id)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
    let notification = &notifications[0];
    assert_eq!(notification.actor_id, creator_id);
    assert_eq!(notification.recipient_id, creator_id);
    assert_eq!(notification.resource, work_item);
    assert_eq!(notification.reason.to_string(), "reminder");

    let link = ctx
        .repos
        .reminder_notifications
        .find_by_reminder(&reminder.id)
        .await
        .expect("Provenance link to exist");
    assert_eq!(link.notification_id, notification.id);

    // The queue redelivers the job; the executor absorbs the duplicate
    ctx.queue
        .enqueue(&reminder.id, remind_at)
        .await
        .expect("To enqueue duplicate");
    dispatch_due_reminders(&ctx).await;
    let notifications = ctx
        .repos
        .notifications
        .find_by_recipient(&creator_id)
        .await
        .unwrap();
    assert_eq!(notifications.len(), 1);
}

#[tokio::test]
async fn canceled_reminder_never_fires() {
    let mut ctx = setup_context_inmemory();

    let remind_at = Utc.ymd(2025, 3, 10).and_hms(8, 30, 0).timestamp_millis();
    set_time(&mut ctx, remind_at - 1000 * 60 * 60);

    let creator_id: ID = Default::default();
    let usecase = CreateReminderUseCase {
        creator_id: creator_id.clone(),
        remindable: ResourceRef::new(ResourceKind::Meeting, Default::default()),
        remind_at,
        note: None,
    };
    let reminder = execute(usecase, &ctx).await.expect("To create reminder");

    let usecase = CancelReminderUseCase {
        reminder_id: reminder.id.clone(),
    };
    execute(usecase, &ctx).await.expect("To cancel reminder");

    set_time(&mut ctx, remind_at);
    dispatch_due_reminders(&ctx).await;
    assert!(ctx
        .repos
        .notifications
        .find_by_recipient(&creator_id)
        .await
        .unwrap()
        .is_empty());
}
