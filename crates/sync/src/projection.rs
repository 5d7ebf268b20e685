//! Customer-surface projection of the current batch status.
//!
//! The projection merges one REST-fetched snapshot (from submission or
//! recovery) with subsequent push events into a single source of truth.
//! Semantics are last-write-wins per token: events are applied in delivery
//! order, and no version guard rejects a regression — the server's word is
//! final.

use printdesk_core::types::{JobId, JobStatus, PrintMode, PrintSide, Token, UploadSelection};
use printdesk_core::wire::StatusRecord;
use printdesk_push::PushEvent;

/// The minimal view of a submitted batch shown to the customer.
#[derive(Debug, Clone)]
pub struct SubmissionView {
    /// Row id, when the server exposes one; used to match push updates
    /// keyed by job id.
    pub job_id: Option<JobId>,
    pub token: Token,
    pub file_names: Vec<String>,
    pub mode: PrintMode,
    pub side: PrintSide,
    pub copies: u32,
    pub status: JobStatus,
}

impl SubmissionView {
    /// Build the view for a batch that was just submitted.
    ///
    /// Status starts at `Pending`; the server has not echoed anything yet.
    pub fn from_submission(token: Token, selection: &UploadSelection) -> Self {
        Self {
            job_id: None,
            token,
            file_names: selection.files.iter().map(|f| f.name.clone()).collect(),
            mode: selection.mode,
            side: selection.side,
            copies: selection.copies,
            status: JobStatus::Pending,
        }
    }

    /// Rebuild the view from the token status endpoint (session recovery).
    pub fn from_status(record: StatusRecord) -> Self {
        Self {
            job_id: record.id.map(JobId),
            token: Token(record.token),
            file_names: record.files.into_iter().map(|f| f.name).collect(),
            mode: record.mode,
            side: record.side,
            copies: record.copies,
            status: record.status,
        }
    }
}

/// Reducer holding the customer surface's view state.
#[derive(Debug, Default)]
pub struct StatusProjection {
    /// Whether the shop currently accepts uploads.
    pub shop_accepting: bool,
    /// Whether the push channel is currently connected. The surface stays
    /// usable on REST alone when this is false.
    pub channel_connected: bool,
    view: Option<SubmissionView>,
}

impl StatusProjection {
    pub fn new(shop_accepting: bool) -> Self {
        Self {
            shop_accepting,
            channel_connected: false,
            view: None,
        }
    }

    /// The tracked batch view, if a submission is active.
    pub fn view(&self) -> Option<&SubmissionView> {
        self.view.as_ref()
    }

    /// Install the view from a fresh submission or a recovered session.
    pub fn set_view(&mut self, view: SubmissionView) {
        self.view = Some(view);
    }

    /// Drop the tracked batch (explicit reset).
    pub fn clear_view(&mut self) {
        self.view = None;
    }

    /// Apply one push event.
    ///
    /// Status events are applied only when they match the tracked token (or
    /// job id); everything else leaves the view unchanged. New-job
    /// announcements are a dashboard concern and are ignored here.
    pub fn apply(&mut self, event: &PushEvent) {
        match event {
            PushEvent::Connected => self.channel_connected = true,
            PushEvent::Disconnected => self.channel_connected = false,
            PushEvent::ShopAccepting { accepting } => self.shop_accepting = *accepting,
            PushEvent::JobStatusChanged {
                job_id,
                token,
                status,
            } => {
                if let Some(view) = &mut self.view {
                    let token_match = token.as_ref().is_some_and(|t| *t == view.token);
                    let id_match = match (&view.job_id, job_id) {
                        (Some(mine), Some(theirs)) => mine == theirs,
                        _ => false,
                    };
                    if token_match || id_match {
                        view.status = *status;
                    }
                }
            }
            PushEvent::BatchStatusChanged { token, status } => {
                if let Some(view) = &mut self.view {
                    if view.token == *token {
                        view.status = *status;
                    }
                }
            }
            PushEvent::JobAdded(_) => {}
        }
    }
}
