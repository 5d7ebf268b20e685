//! Owner-surface roster of today's jobs.
//!
//! The roster is seeded from one REST fetch and then reduced over push
//! events: new jobs are inserted most-recent-first (deduplicated by id),
//! status events mutate jobs in place. Jobs are never removed in-memory —
//! deletion is a status change, consistent with the server's soft-delete
//! model.

use printdesk_core::types::{JobId, JobStatus, PrintJob};
use printdesk_push::PushEvent;

/// Dashboard status-category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every non-deleted job.
    #[default]
    All,
    Pending,
    Completed,
    Expired,
}

impl StatusFilter {
    fn matches(&self, status: JobStatus) -> bool {
        match self {
            Self::All => status != JobStatus::Deleted,
            Self::Pending => status == JobStatus::Pending,
            Self::Completed => status == JobStatus::Completed,
            Self::Expired => status == JobStatus::Expired,
        }
    }
}

/// In-memory roster reducer.
#[derive(Debug, Default)]
pub struct JobRoster {
    jobs: Vec<PrintJob>,
}

impl JobRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the roster from a REST fetch, ordered most-recent-first.
    pub fn set_jobs(&mut self, mut jobs: Vec<PrintJob>) {
        jobs.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        self.jobs = jobs;
    }

    /// Every job currently held, in display order.
    pub fn jobs(&self) -> &[PrintJob] {
        &self.jobs
    }

    pub fn get(&self, id: &JobId) -> Option<&PrintJob> {
        self.jobs.iter().find(|j| j.id == *id)
    }

    /// Apply one push event.
    pub fn apply(&mut self, event: &PushEvent) {
        match event {
            PushEvent::JobAdded(job) => {
                if self.jobs.iter().any(|j| j.id == job.id) {
                    tracing::debug!(job_id = %job.id, "Duplicate new-job event ignored");
                    return;
                }
                self.jobs.insert(0, job.clone());
            }
            PushEvent::JobStatusChanged {
                job_id,
                token,
                status,
            } => {
                if let Some(id) = job_id {
                    if let Some(job) = self.jobs.iter_mut().find(|j| j.id == *id) {
                        job.status = *status;
                    }
                } else if let Some(token) = token {
                    // Without a row id the token is the only key we have.
                    for job in self.jobs.iter_mut().filter(|j| j.token == *token) {
                        job.status = *status;
                    }
                }
            }
            PushEvent::BatchStatusChanged { token, status } => {
                for job in self.jobs.iter_mut().filter(|j| j.token == *token) {
                    job.status = *status;
                }
            }
            // Shop and channel state live on the surface, not the roster.
            PushEvent::ShopAccepting { .. }
            | PushEvent::Connected
            | PushEvent::Disconnected => {}
        }
    }

    /// Filter by status category and case-insensitive token substring.
    pub fn filtered(&self, filter: StatusFilter, search: &str) -> Vec<&PrintJob> {
        let needle = search.to_lowercase();
        self.jobs
            .iter()
            .filter(|j| filter.matches(j.status))
            .filter(|j| needle.is_empty() || j.token.as_str().to_lowercase().contains(&needle))
            .collect()
    }
}
