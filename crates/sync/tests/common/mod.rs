//! Shared test doubles for the flow tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use printdesk_api::download::DownloadedFile;
use printdesk_api::{ApiError, ShopBackend};
use printdesk_core::types::{
    JobId, JobStatus, PrintJob, PrintMode, PrintSide, Shop, ShopId, Token, UploadSelection,
};
use printdesk_core::wire::StatusRecord;

/// Scriptable [`ShopBackend`] that records every call it receives.
pub struct StubBackend {
    pub shop: Shop,
    pub jobs: Vec<PrintJob>,
    /// Token returned by `submit_batch`; `None` scripts a server failure.
    pub submit_token: Option<Token>,
    /// Record returned by `batch_status`; `None` scripts a 404.
    pub status_record: Option<StatusRecord>,
    /// When set, every owner mutation fails with a 500.
    pub fail_mutations: bool,
    pub calls: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn new(shop: Shop) -> Self {
        Self {
            shop,
            jobs: vec![],
            submit_token: None,
            status_record: None,
            fail_mutations: false,
            calls: Mutex::new(vec![]),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn server_error() -> ApiError {
    ApiError::Api {
        status: 500,
        body: "boom".into(),
    }
}

fn not_found() -> ApiError {
    ApiError::Api {
        status: 404,
        body: "no such token".into(),
    }
}

#[async_trait]
impl ShopBackend for StubBackend {
    async fn shop_details(&self, shop_id: &ShopId) -> Result<Shop, ApiError> {
        self.record(format!("shop_details {shop_id}"));
        Ok(self.shop.clone())
    }

    async fn submit_batch(
        &self,
        shop_id: &ShopId,
        selection: &UploadSelection,
    ) -> Result<Token, ApiError> {
        self.record(format!(
            "submit {shop_id} files={} copies={}",
            selection.files.len(),
            selection.copies
        ));
        self.submit_token.clone().ok_or_else(server_error)
    }

    async fn batch_status(&self, token: &Token) -> Result<StatusRecord, ApiError> {
        self.record(format!("batch_status {token}"));
        self.status_record.clone().ok_or_else(not_found)
    }

    async fn todays_jobs(&self, shop_id: &ShopId) -> Result<Vec<PrintJob>, ApiError> {
        self.record(format!("todays_jobs {shop_id}"));
        Ok(self.jobs.clone())
    }

    async fn set_job_status(&self, job_id: &JobId, status: JobStatus) -> Result<(), ApiError> {
        self.record(format!("set_status {job_id} {status:?}"));
        if self.fail_mutations {
            Err(server_error())
        } else {
            Ok(())
        }
    }

    async fn delete_job(&self, job_id: &JobId) -> Result<(), ApiError> {
        self.record(format!("delete {job_id}"));
        if self.fail_mutations {
            Err(server_error())
        } else {
            Ok(())
        }
    }

    async fn toggle_uploads(&self, shop_id: &ShopId, accepting: bool) -> Result<bool, ApiError> {
        self.record(format!("toggle {shop_id} {accepting}"));
        if self.fail_mutations {
            Err(server_error())
        } else {
            Ok(accepting)
        }
    }

    async fn download_file(&self, path: &str) -> Result<DownloadedFile, ApiError> {
        self.record(format!("download_file {path}"));
        Ok(DownloadedFile {
            filename: "file.pdf".into(),
            bytes: vec![1, 2, 3],
        })
    }

    async fn download_batch(&self, token: &Token) -> Result<DownloadedFile, ApiError> {
        self.record(format!("download_batch {token}"));
        Ok(DownloadedFile {
            filename: format!("prints_{token}.zip"),
            bytes: vec![4, 5, 6],
        })
    }
}

/// A shop open for uploads.
pub fn shop(id: &str) -> Shop {
    Shop {
        id: id.into(),
        name: "Campus Prints".into(),
        mono_cost: 2,
        color_cost: 10,
        accepting_uploads: true,
    }
}

/// A valid one-file selection.
pub fn selection(copies: u32) -> UploadSelection {
    UploadSelection {
        files: vec![printdesk_core::types::LocalFile {
            name: "essay.pdf".into(),
            path: "/tmp/essay.pdf".into(),
            size: 4096,
        }],
        mode: PrintMode::Monochrome,
        side: PrintSide::Single,
        copies,
    }
}

/// A roster job.
pub fn job(id: &str, token: &str, status: JobStatus) -> PrintJob {
    PrintJob {
        id: id.into(),
        token: token.into(),
        mode: PrintMode::Monochrome,
        side: PrintSide::Single,
        copies: 1,
        status,
        uploaded_at: chrono::Utc::now(),
        files: vec![],
    }
}
