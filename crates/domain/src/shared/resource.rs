use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// The kinds of entities a `Reminder` can point at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    WorkItem,
    Project,
    Meeting,
    Document,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkItem => "work_item",
            Self::Project => "project",
            Self::Meeting => "meeting",
            Self::Document => "document",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum InvalidResourceKindError {
    #[error("Resource kind: {0} is not known")]
    Unknown(String),
}

impl FromStr for ResourceKind {
    type Err = InvalidResourceKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work_item" => Ok(Self::WorkItem),
            "project" => Ok(Self::Project),
            "meeting" => Ok(Self::Meeting),
            "document" => Ok(Self::Document),
            _ => Err(InvalidResourceKindError::Unknown(s.to_string())),
        }
    }
}

/// Reference to the entity a `Reminder` concerns. Reminders can be set on
/// any entity kind, so this is a (kind, id) pair rather than a direct link
/// to one entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: ID,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, id: ID) -> Self {
        Self { kind, id }
    }
}
