use super::INotificationRepo;

use bellman_domain::{Notification, NotificationReason, ResourceKind, ResourceRef, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    actor_uid: Uuid,
    recipient_uid: Uuid,
    resource_kind: String,
    resource_uid: Uuid,
    reason: String,
    subject: Option<String>,
    created: i64,
}

impl TryFrom<NotificationRaw> for Notification {
    type Error = anyhow::Error;

    fn try_from(raw: NotificationRaw) -> Result<Self, Self::Error> {
        let kind = raw
            .resource_kind
            .parse::<ResourceKind>()
            .map_err(anyhow::Error::new)?;
        let reason = raw
            .reason
            .parse::<NotificationReason>()
            .map_err(anyhow::Error::new)?;
        Ok(Notification {
            id: raw.notification_uid.into(),
            actor_id: raw.actor_uid.into(),
            recipient_id: raw.recipient_uid.into(),
            resource: ResourceRef::new(kind, raw.resource_uid.into()),
            reason,
            subject: raw.subject,
            created: raw.created,
        })
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert_for_reminder(
        &self,
        notification: &Notification,
        reminder_id: &ID,
    ) -> anyhow::Result<()> {
        // The unique constraint on reminder_notifications.reminder_uid
        // aborts the whole transaction when a concurrent executor got here
        // first, so no orphaned notification row can remain.
        let mut tx = self.pool.begin().await?;
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, actor_uid, recipient_uid, resource_kind, resource_uid, reason, subject, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.actor_id.inner_ref())
        .bind(notification.recipient_id.inner_ref())
        .bind(notification.resource.kind.as_str())
        .bind(notification.resource.id.inner_ref())
        .bind(notification.reason.as_str())
        .bind(notification.subject.as_deref())
        .bind(notification.created)
        .execute(&mut tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO reminder_notifications
            (reminder_uid, notification_uid)
            VALUES($1, $2)
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(notification.id.inner_ref())
        .execute(&mut tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        let raw = sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()?;

        Notification::try_from(raw).ok()
    }

    async fn find_by_recipient(&self, recipient_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let raw = sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.recipient_uid = $1
            "#,
        )
        .bind(recipient_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        raw.into_iter()
            .map(Notification::try_from)
            .collect::<Result<Vec<_>, _>>()
    }
}
