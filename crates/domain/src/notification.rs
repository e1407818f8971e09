use crate::shared::entity::{Entity, ID};
use crate::shared::resource::ResourceRef;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Why a `Notification` was created for its recipient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationReason {
    Reminder,
    Mentioned,
    Assigned,
}

impl NotificationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reminder => "reminder",
            Self::Mentioned => "mentioned",
            Self::Assigned => "assigned",
        }
    }
}

impl Display for NotificationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidNotificationReasonError {
    #[error("Notification reason: {0} is not known")]
    Unknown(String),
}

impl FromStr for NotificationReason {
    type Err = InvalidNotificationReasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reminder" => Ok(Self::Reminder),
            "mentioned" => Ok(Self::Mentioned),
            "assigned" => Ok(Self::Assigned),
            _ => Err(InvalidNotificationReasonError::Unknown(s.to_string())),
        }
    }
}

/// A record that `recipient_id` should be told about something that
/// happened to `resource`. Delivery channels (web, mail) consume these
/// records, this crate only creates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub actor_id: ID,
    pub recipient_id: ID,
    pub resource: ResourceRef,
    pub reason: NotificationReason,
    pub subject: Option<String>,
    pub created: i64,
}

impl Entity<ID> for Notification {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

/// Provenance link between a `Reminder` and the `Notification` it produced.
/// At most one exists per reminder, which is what makes duplicate deliveries
/// of the same delay queue job safe.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderNotification {
    pub reminder_id: ID,
    pub notification_id: ID,
}

impl Entity<ID> for ReminderNotification {
    fn id(&self) -> ID {
        self.reminder_id.clone()
    }
}
