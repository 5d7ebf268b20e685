//! Backend seam between the sync flows and the REST client.
//!
//! The flows in `printdesk-sync` only ever talk to this trait, so tests can
//! drive them against stub implementations without a server.

use async_trait::async_trait;

use printdesk_core::types::{JobId, JobStatus, PrintJob, Shop, ShopId, Token, UploadSelection};
use printdesk_core::wire::StatusRecord;

use crate::client::{ApiError, PrintShopApi};
use crate::download::DownloadedFile;

/// The REST surface consumed by the submission, recovery, and dashboard
/// flows.
#[async_trait]
pub trait ShopBackend: Send + Sync {
    /// Shop metadata for the customer surface.
    async fn shop_details(&self, shop_id: &ShopId) -> Result<Shop, ApiError>;

    /// Upload a batch; returns the server-assigned token.
    async fn submit_batch(
        &self,
        shop_id: &ShopId,
        selection: &UploadSelection,
    ) -> Result<Token, ApiError>;

    /// Current status of a batch by token.
    async fn batch_status(&self, token: &Token) -> Result<StatusRecord, ApiError>;

    /// Today's jobs for the dashboard.
    async fn todays_jobs(&self, shop_id: &ShopId) -> Result<Vec<PrintJob>, ApiError>;

    /// Owner action: update one job's status.
    async fn set_job_status(&self, job_id: &JobId, status: JobStatus) -> Result<(), ApiError>;

    /// Owner action: soft-delete one job.
    async fn delete_job(&self, job_id: &JobId) -> Result<(), ApiError>;

    /// Owner action: flip the accepting-uploads flag. Returns the value the
    /// server settled on.
    async fn toggle_uploads(&self, shop_id: &ShopId, accepting: bool) -> Result<bool, ApiError>;

    /// Owner action: download one stored file by server path.
    async fn download_file(&self, path: &str) -> Result<DownloadedFile, ApiError>;

    /// Owner action: download a batch archive by token.
    async fn download_batch(&self, token: &Token) -> Result<DownloadedFile, ApiError>;
}

#[async_trait]
impl ShopBackend for PrintShopApi {
    async fn shop_details(&self, shop_id: &ShopId) -> Result<Shop, ApiError> {
        PrintShopApi::shop_details(self, shop_id).await
    }

    async fn submit_batch(
        &self,
        shop_id: &ShopId,
        selection: &UploadSelection,
    ) -> Result<Token, ApiError> {
        PrintShopApi::submit_batch(self, shop_id, selection).await
    }

    async fn batch_status(&self, token: &Token) -> Result<StatusRecord, ApiError> {
        PrintShopApi::batch_status(self, token).await
    }

    async fn todays_jobs(&self, shop_id: &ShopId) -> Result<Vec<PrintJob>, ApiError> {
        PrintShopApi::todays_jobs(self, shop_id).await
    }

    async fn set_job_status(&self, job_id: &JobId, status: JobStatus) -> Result<(), ApiError> {
        PrintShopApi::set_job_status(self, job_id, status).await
    }

    async fn delete_job(&self, job_id: &JobId) -> Result<(), ApiError> {
        PrintShopApi::delete_job(self, job_id).await
    }

    async fn toggle_uploads(&self, shop_id: &ShopId, accepting: bool) -> Result<bool, ApiError> {
        PrintShopApi::toggle_uploads(self, shop_id, accepting).await
    }

    async fn download_file(&self, path: &str) -> Result<DownloadedFile, ApiError> {
        PrintShopApi::download_file(self, path).await
    }

    async fn download_batch(&self, token: &Token) -> Result<DownloadedFile, ApiError> {
        PrintShopApi::download_batch(self, token).await
    }
}
