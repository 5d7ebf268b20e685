//! Cold-start recovery of a persisted submission session.

use printdesk_api::ShopBackend;
use printdesk_core::types::ShopId;

use crate::projection::SubmissionView;
use crate::session::SessionStore;

/// Resolve a previously stored token into a current batch view.
///
/// Issues one status fetch for the stored token and rebuilds the view the
/// customer last saw, without re-uploading anything. Any failure — network,
/// non-2xx, token unknown — clears the stored token and yields `None`: the
/// stale session is silently discarded, never surfaced as a user error.
pub async fn recover(
    backend: &dyn ShopBackend,
    store: &dyn SessionStore,
    shop_id: &ShopId,
) -> Option<SubmissionView> {
    let token = store.load(shop_id)?;

    match backend.batch_status(&token).await {
        Ok(record) => {
            tracing::info!(shop_id = %shop_id, token = %token, "Recovered stored session");
            Some(SubmissionView::from_status(record))
        }
        Err(e) => {
            tracing::debug!(
                shop_id = %shop_id,
                token = %token,
                error = %e,
                "Stored session is no longer valid, clearing",
            );
            store.clear(shop_id);
            None
        }
    }
}
