//! The shop-owner dashboard flow.
//!
//! Seeds shop metadata and today's jobs over REST, reduces push events into
//! the roster, and round-trips owner actions through the backend. Job
//! mutations are deliberately not applied optimistically: the visible
//! change arrives only via the push echo, so every connected dashboard
//! (including the actor's own) converges on the same roster. The
//! accepting-uploads toggle is the one exception — it flips local state
//! from the REST response.

use std::sync::Arc;

use printdesk_api::download::DownloadedFile;
use printdesk_api::{ApiError, ShopBackend};
use printdesk_core::types::{JobId, JobStatus, PrintJob, Shop, ShopId, Token};
use printdesk_push::PushEvent;

use crate::notice::{Notice, NoticeSink};
use crate::roster::{JobRoster, StatusFilter};

/// Errors from the dashboard flow.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Deletion was requested without the confirmation step.
    #[error("deleting a job requires confirmation")]
    ConfirmationRequired,

    /// A REST call failed; local state is unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Owner surface state for one shop.
pub struct Dashboard {
    backend: Arc<dyn ShopBackend>,
    notices: Arc<dyn NoticeSink>,
    shop: Shop,
    roster: JobRoster,
}

impl Dashboard {
    /// Fetch shop metadata and today's jobs, producing a mounted dashboard.
    pub async fn mount(
        backend: Arc<dyn ShopBackend>,
        notices: Arc<dyn NoticeSink>,
        shop_id: ShopId,
    ) -> Result<Self, DashboardError> {
        let shop = backend.shop_details(&shop_id).await?;
        let jobs = backend.todays_jobs(&shop_id).await?;
        tracing::info!(shop_id = %shop_id, jobs = jobs.len(), "Dashboard mounted");

        let mut roster = JobRoster::new();
        roster.set_jobs(jobs);

        Ok(Self {
            backend,
            notices,
            shop,
            roster,
        })
    }

    pub fn shop(&self) -> &Shop {
        &self.shop
    }

    pub fn roster(&self) -> &JobRoster {
        &self.roster
    }

    /// Filtered, searchable view of the roster.
    pub fn filtered(&self, filter: StatusFilter, search: &str) -> Vec<&PrintJob> {
        self.roster.filtered(filter, search)
    }

    /// Apply one push event to the dashboard state.
    pub fn apply(&mut self, event: &PushEvent) {
        if let PushEvent::ShopAccepting { accepting } = event {
            self.shop.accepting_uploads = *accepting;
        }
        self.roster.apply(event);
    }

    /// Mark a job completed.
    ///
    /// The roster is not touched here — the status change arrives via the
    /// push echo.
    pub async fn mark_completed(&self, job_id: &JobId) -> Result<(), DashboardError> {
        match self
            .backend
            .set_job_status(job_id, JobStatus::Completed)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => {
                self.notices
                    .notify(Notice::error(format!("Could not update job: {e}")));
                Err(e.into())
            }
        }
    }

    /// Soft-delete a job, gated by an explicit confirmation step.
    ///
    /// As with [`mark_completed`](Self::mark_completed), the roster changes
    /// only when the push echo lands.
    pub async fn delete_job(&self, job_id: &JobId, confirmed: bool) -> Result<(), DashboardError> {
        if !confirmed {
            return Err(DashboardError::ConfirmationRequired);
        }

        match self.backend.delete_job(job_id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.notices
                    .notify(Notice::error(format!("Could not delete job: {e}")));
                Err(e.into())
            }
        }
    }

    /// Flip the shop-wide accepting-uploads flag.
    ///
    /// The local flag follows the REST response: it flips if and only if
    /// the call succeeds, taking the server's settled value.
    pub async fn toggle_uploads(&mut self) -> Result<bool, DashboardError> {
        let desired = !self.shop.accepting_uploads;
        match self.backend.toggle_uploads(&self.shop.id, desired).await {
            Ok(settled) => {
                self.shop.accepting_uploads = settled;
                let text = if settled {
                    "Shop is now accepting uploads"
                } else {
                    "Shop is no longer accepting uploads"
                };
                self.notices.notify(Notice::success(text));
                Ok(settled)
            }
            Err(e) => {
                self.notices
                    .notify(Notice::error(format!("Could not update shop: {e}")));
                Err(e.into())
            }
        }
    }

    /// Download one stored file by its server path.
    pub async fn download_file(&self, path: &str) -> Result<DownloadedFile, DashboardError> {
        match self.backend.download_file(path).await {
            Ok(file) => Ok(file),
            Err(e) => {
                self.notices
                    .notify(Notice::error(format!("Download failed: {e}")));
                Err(e.into())
            }
        }
    }

    /// Download a batch archive by token.
    pub async fn download_batch(&self, token: &Token) -> Result<DownloadedFile, DashboardError> {
        match self.backend.download_batch(token).await {
            Ok(file) => Ok(file),
            Err(e) => {
                self.notices
                    .notify(Notice::error(format!("Download failed: {e}")));
                Err(e.into())
            }
        }
    }
}
