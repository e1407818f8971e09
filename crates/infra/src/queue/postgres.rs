use super::IDelayQueue;

use bellman_domain::{ScheduledJob, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresDelayQueue {
    pool: PgPool,
}

impl PostgresDelayQueue {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct JobRaw {
    job_uid: Uuid,
    reminder_uid: Uuid,
    run_at: i64,
}

impl From<JobRaw> for ScheduledJob {
    fn from(raw: JobRaw) -> Self {
        Self {
            id: raw.job_uid.into(),
            reminder_id: raw.reminder_uid.into(),
            run_at: raw.run_at,
        }
    }
}

#[async_trait::async_trait]
impl IDelayQueue for PostgresDelayQueue {
    async fn enqueue(&self, reminder_id: &ID, run_at: i64) -> anyhow::Result<ID> {
        let job_id = ID::new();
        sqlx::query(
            r#"
            INSERT INTO scheduled_jobs
            (job_uid, reminder_uid, run_at)
            VALUES($1, $2, $3)
            "#,
        )
        .bind(job_id.inner_ref())
        .bind(reminder_id.inner_ref())
        .bind(run_at)
        .execute(&self.pool)
        .await?;
        Ok(job_id)
    }

    async fn cancel(&self, job_id: &ID) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM scheduled_jobs AS j
            WHERE j.job_uid = $1
            "#,
        )
        .bind(job_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn find(&self, job_id: &ID) -> Option<ScheduledJob> {
        sqlx::query_as::<_, JobRaw>(
            r#"
            SELECT * FROM scheduled_jobs AS j
            WHERE j.job_uid = $1
            "#,
        )
        .bind(job_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }

    async fn delete_all_before(&self, before: i64) -> Vec<ScheduledJob> {
        // DELETE .. RETURNING claims the due entries, a failed claim leaves
        // them in place for the next tick
        sqlx::query_as::<_, JobRaw>(
            r#"
            DELETE FROM scheduled_jobs AS j
            WHERE j.run_at <= $1
            RETURNING *
            "#,
        )
        .bind(before)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|raw| raw.into())
        .collect()
    }
}
