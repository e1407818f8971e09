use super::IDelayQueue;
use crate::repos::shared::inmemory_repo::*;
use bellman_domain::{ScheduledJob, ID};
use std::sync::Mutex;

pub struct InMemoryDelayQueue {
    jobs: Mutex<Vec<ScheduledJob>>,
}

impl InMemoryDelayQueue {
    pub fn new() -> Self {
        Self {
            jobs: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryDelayQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IDelayQueue for InMemoryDelayQueue {
    async fn enqueue(&self, reminder_id: &ID, run_at: i64) -> anyhow::Result<ID> {
        let job = ScheduledJob {
            id: ID::new(),
            reminder_id: reminder_id.clone(),
            run_at,
        };
        let job_id = job.id.clone();
        insert(&job, &self.jobs);
        Ok(job_id)
    }

    async fn cancel(&self, job_id: &ID) -> anyhow::Result<bool> {
        Ok(delete(job_id, &self.jobs).is_some())
    }

    async fn find(&self, job_id: &ID) -> Option<ScheduledJob> {
        find(job_id, &self.jobs)
    }

    async fn delete_all_before(&self, before: i64) -> Vec<ScheduledJob> {
        find_and_delete_by(&self.jobs, |job| job.run_at <= before)
    }
}
