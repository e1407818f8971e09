use crate::shared::entity::{Entity, ID};

/// An accepted delay queue entry: invoke the reminder executor for
/// `reminder_id` at or after `run_at`. The queue delivers at least once,
/// never reliably exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledJob {
    pub id: ID,
    pub reminder_id: ID,
    pub run_at: i64,
}

impl Entity<ID> for ScheduledJob {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
