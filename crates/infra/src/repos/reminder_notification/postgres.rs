use super::IReminderNotificationRepo;

use bellman_domain::{ReminderNotification, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderNotificationRepo {
    pool: PgPool,
}

impl PostgresReminderNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderNotificationRaw {
    reminder_uid: Uuid,
    notification_uid: Uuid,
}

impl From<ReminderNotificationRaw> for ReminderNotification {
    fn from(raw: ReminderNotificationRaw) -> Self {
        Self {
            reminder_id: raw.reminder_uid.into(),
            notification_id: raw.notification_uid.into(),
        }
    }
}

#[async_trait::async_trait]
impl IReminderNotificationRepo for PostgresReminderNotificationRepo {
    async fn find_by_reminder(&self, reminder_id: &ID) -> Option<ReminderNotification> {
        sqlx::query_as::<_, ReminderNotificationRaw>(
            r#"
            SELECT * FROM reminder_notifications AS rn
            WHERE rn.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|raw| raw.into())
    }
}
