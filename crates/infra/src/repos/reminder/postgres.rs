use super::IReminderRepo;

use bellman_domain::{Reminder, ResourceKind, ResourceRef, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    creator_uid: Uuid,
    resource_kind: String,
    resource_uid: Uuid,
    remind_at: i64,
    note: Option<String>,
    job_uid: Option<Uuid>,
    created: i64,
    updated: i64,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> Result<Self, Self::Error> {
        let kind = raw
            .resource_kind
            .parse::<ResourceKind>()
            .map_err(anyhow::Error::new)?;
        Ok(Reminder {
            id: raw.reminder_uid.into(),
            creator_id: raw.creator_uid.into(),
            remindable: ResourceRef::new(kind, raw.resource_uid.into()),
            remind_at: raw.remind_at,
            note: raw.note,
            job_id: raw.job_uid.map(|uid| uid.into()),
            created: raw.created,
            updated: raw.updated,
        })
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, creator_uid, resource_kind, resource_uid, remind_at, note, job_uid, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.creator_id.inner_ref())
        .bind(reminder.remindable.kind.as_str())
        .bind(reminder.remindable.id.inner_ref())
        .bind(reminder.remind_at)
        .bind(reminder.note.as_deref())
        .bind(reminder.job_id.as_ref().map(|job_id| job_id.inner_ref()))
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let raw = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        raw.map(Reminder::try_from).transpose()
    }

    async fn mark_scheduled(
        &self,
        reminder_id: &ID,
        job_id: &ID,
        updated: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE reminders AS r
            SET job_uid = $2, updated = $3
            WHERE r.reminder_uid = $1 AND r.job_uid IS NULL
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(job_id.inner_ref())
        .bind(updated)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        let raw = sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()?;

        match Reminder::try_from(raw) {
            Ok(reminder) => Some(reminder),
            Err(e) => {
                error!("Deleted reminder row could not be read back: {:?}", e);
                None
            }
        }
    }
}
