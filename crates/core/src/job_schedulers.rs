use crate::reminder::fire_reminder::{FireReminderUseCase, UseCaseError as FireReminderError};
use crate::shared::usecase::execute;
use bellman_infra::Context;
use std::time::Duration;
use tracing::error;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Starts the dispatch loop that claims due delay queue entries and runs
/// the reminder executor for them. Ticks every
/// `Config::dispatch_interval_secs`, aligned to the start of a minute.
pub fn start_reminder_dispatch_job(ctx: Context) {
    tokio::spawn(async move {
        let now = ctx.sys.get_timestamp_millis();
        let secs_to_next_run = get_start_delay(now as usize, 0);
        tokio::time::sleep(Duration::from_secs(secs_to_next_run as u64)).await;

        let mut interval =
            tokio::time::interval(Duration::from_secs(ctx.config.dispatch_interval_secs));
        loop {
            interval.tick().await;
            let context = ctx.clone();
            tokio::spawn(async move {
                dispatch_due_reminders(&context).await;
            });
        }
    });
}

/// One dispatch tick: claim every entry due by now and execute it. The
/// queue itself does not retry, so recoverable executor failures put the
/// entry back for the next tick.
pub async fn dispatch_due_reminders(ctx: &Context) {
    let now = ctx.sys.get_timestamp_millis();
    let due_jobs = ctx.queue.delete_all_before(now).await;

    for job in due_jobs {
        let usecase = FireReminderUseCase {
            reminder_id: job.reminder_id.clone(),
        };
        match execute(usecase, ctx).await {
            Ok(_) => {}
            Err(FireReminderError::InvalidReminder(reminder_id)) => {
                error!(
                    "Reminder: {} cannot be fired and needs operator attention",
                    reminder_id
                );
            }
            Err(_) => {
                if ctx
                    .queue
                    .enqueue(&job.reminder_id, job.run_at)
                    .await
                    .is_err()
                {
                    error!(
                        "Unable to put job: {} for reminder: {} back on the queue",
                        job.id, job.reminder_id
                    );
                }
            }
        }
    }
}
