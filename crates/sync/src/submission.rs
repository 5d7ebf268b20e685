//! The customer upload flow.
//!
//! Validates the selection locally, submits one multipart upload, and
//! persists the returned token through the injected [`SessionStore`]. On
//! any failure the prior state is left untouched so the user can retry with
//! the same selection; nothing retries automatically.

use std::sync::Arc;

use printdesk_api::{ApiError, ShopBackend};
use printdesk_core::config::UploadRules;
use printdesk_core::error::CoreError;
use printdesk_core::types::{ShopId, UploadSelection};
use printdesk_core::validation::{clamp_copies, validate_selection};

use crate::notice::{Notice, NoticeSink};
use crate::projection::SubmissionView;
use crate::recovery;
use crate::session::SessionStore;

/// Errors from the submission flow.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// A submission is already in flight; the submit action is disabled
    /// until it settles.
    #[error("a submission is already in flight")]
    Busy,

    /// The selection was rejected before any network call.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The upload request failed; the selection is untouched.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Upload flow for one shop.
pub struct SubmissionFlow {
    backend: Arc<dyn ShopBackend>,
    store: Arc<dyn SessionStore>,
    notices: Arc<dyn NoticeSink>,
    rules: UploadRules,
    shop_id: ShopId,
    /// Advisory busy flag — mirrors the disabled submit button. There is no
    /// request cancellation and no idempotency key behind it.
    in_flight: bool,
}

impl SubmissionFlow {
    pub fn new(
        backend: Arc<dyn ShopBackend>,
        store: Arc<dyn SessionStore>,
        notices: Arc<dyn NoticeSink>,
        rules: UploadRules,
        shop_id: ShopId,
    ) -> Self {
        Self {
            backend,
            store,
            notices,
            rules,
            shop_id,
            in_flight: false,
        }
    }

    /// Whether a submission is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Validate and submit a selection.
    ///
    /// Copy count is clamped into the configured range before the payload
    /// is built. Exactly one upload request is issued per call; on success
    /// the returned token is persisted under the shop-scoped key and the
    /// completed view is returned for the projection to install. The
    /// caller's selection is only borrowed — on failure it is still there
    /// to retry with.
    pub async fn submit(
        &mut self,
        selection: &UploadSelection,
    ) -> Result<SubmissionView, SubmissionError> {
        if self.in_flight {
            return Err(SubmissionError::Busy);
        }

        let mut selection = selection.clone();
        selection.copies = clamp_copies(selection.copies, &self.rules);
        if let Err(e) = validate_selection(&selection, &self.rules) {
            self.notices.notify(Notice::error(e.to_string()));
            return Err(e.into());
        }

        self.in_flight = true;
        let result = self.backend.submit_batch(&self.shop_id, &selection).await;
        self.in_flight = false;

        match result {
            Ok(token) => {
                if let Err(e) = self.store.save(&self.shop_id, &token) {
                    // The upload went through; losing the stored session
                    // only costs recovery on the next cold start.
                    tracing::warn!(shop_id = %self.shop_id, error = %e, "Failed to persist token");
                }
                tracing::info!(shop_id = %self.shop_id, token = %token, "Batch submitted");
                self.notices
                    .notify(Notice::success(format!("Files uploaded — token {token}")));
                Ok(SubmissionView::from_submission(token, &selection))
            }
            Err(e) => {
                self.notices
                    .notify(Notice::error(format!("Upload failed: {e}")));
                Err(e.into())
            }
        }
    }

    /// Resolve a previously stored session on cold start.
    ///
    /// Returns the rebuilt view when a stored token is still valid; see
    /// [`recovery::recover`] for the self-healing failure path.
    pub async fn resume(&self) -> Option<SubmissionView> {
        recovery::recover(self.backend.as_ref(), self.store.as_ref(), &self.shop_id).await
    }

    /// Explicit reset: forget the active submission token.
    pub fn reset(&self) {
        self.store.clear(&self.shop_id);
    }
}
