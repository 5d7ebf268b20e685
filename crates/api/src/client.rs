//! HTTP client for the print-shop REST endpoints.

use serde::Deserialize;

use printdesk_core::types::{JobId, JobStatus, PrintJob, Shop, ShopId, Token, UploadSelection};
use printdesk_core::wire::{JobRecord, ShopRecord, StatusRecord};

use crate::download::{fallback_batch_filename, filename_from_content_disposition, DownloadedFile};

/// HTTP client for one print-shop server.
///
/// Owner-surface calls carry a bearer credential; the customer surface
/// constructs the client without one.
pub struct PrintShopApi {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

/// Response returned by the upload endpoint after a successful submission.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    /// Server-assigned token identifying the submitted batch.
    #[serde(alias = "tokenNumber")]
    pub token_number: Token,
}

/// Response body of the toggle-uploads endpoint.
#[derive(Debug, Deserialize)]
struct ToggleResponse {
    #[serde(default, alias = "isAcceptingUploads", alias = "is_accepting_uploads")]
    accepting_uploads: Option<bool>,
}

/// Errors from the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("print shop API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A local file could not be read for upload.
    #[error("failed to read {name}: {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl PrintShopApi {
    /// Create a new API client.
    ///
    /// * `base_url` - REST base, e.g. `http://localhost:4000/api`.
    /// * `auth_token` - bearer credential for owner-surface calls.
    pub fn new(base_url: String, auth_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            auth_token,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across surfaces).
    pub fn with_client(
        client: reqwest::Client,
        base_url: String,
        auth_token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url,
            auth_token,
        }
    }

    /// Fetch shop metadata.
    ///
    /// Sends `GET /shops/{shop_id}`.
    pub async fn shop_details(&self, shop_id: &ShopId) -> Result<Shop, ApiError> {
        let response = self
            .authorized(self.client.get(format!("{}/shops/{shop_id}", self.base_url)))
            .send()
            .await?;

        let record: ShopRecord = Self::parse_response(response).await?;
        Ok(record.into())
    }

    /// Submit a batch of files with print options.
    ///
    /// Sends a multipart `POST /upload/{shop_id}` with one `files` part per
    /// selected file plus `print_type`, `print_side`, and `copies` fields.
    /// Returns the server-assigned token.
    pub async fn submit_batch(
        &self,
        shop_id: &ShopId,
        selection: &UploadSelection,
    ) -> Result<Token, ApiError> {
        let mut form = reqwest::multipart::Form::new()
            .text("print_type", selection.mode.as_str())
            .text("print_side", selection.side.as_str())
            .text("copies", selection.copies.to_string());

        for file in &selection.files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|e| ApiError::FileRead {
                    name: file.name.clone(),
                    source: e,
                })?;
            let part = reqwest::multipart::Part::bytes(bytes).file_name(file.name.clone());
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(format!("{}/upload/{shop_id}", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let submit: SubmitResponse = Self::parse_response(response).await?;
        Ok(submit.token_number)
    }

    /// Fetch the current status of a submitted batch by token.
    ///
    /// Sends `GET /status/{token}`.
    pub async fn batch_status(&self, token: &Token) -> Result<StatusRecord, ApiError> {
        let response = self
            .client
            .get(format!("{}/status/{token}", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch today's jobs for a shop (authenticated).
    ///
    /// Sends `GET /jobs/prints/{shop_id}` and normalizes each row into a
    /// [`PrintJob`].
    pub async fn todays_jobs(&self, shop_id: &ShopId) -> Result<Vec<PrintJob>, ApiError> {
        let response = self
            .authorized(
                self.client
                    .get(format!("{}/jobs/prints/{shop_id}", self.base_url)),
            )
            .send()
            .await?;

        let records: Vec<JobRecord> = Self::parse_response(response).await?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Update a job's status (authenticated).
    ///
    /// Sends `PUT /jobs/{job_id}` with a `{"status": ...}` body. The caller
    /// must not update local state from the response — the visible change
    /// arrives via the push echo.
    pub async fn set_job_status(
        &self,
        job_id: &JobId,
        status: JobStatus,
    ) -> Result<(), ApiError> {
        let response = self
            .authorized(self.client.put(format!("{}/jobs/{job_id}", self.base_url)))
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Soft-delete a job (authenticated).
    ///
    /// Sends `DELETE /jobs/{job_id}`. As with status updates, the roster
    /// change arrives via the push echo.
    pub async fn delete_job(&self, job_id: &JobId) -> Result<(), ApiError> {
        let response = self
            .authorized(
                self.client
                    .delete(format!("{}/jobs/{job_id}", self.base_url)),
            )
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Flip the shop-wide accepting-uploads flag (authenticated).
    ///
    /// Sends `PUT /shops/{shop_id}/toggle-uploads` with the desired value
    /// and returns the flag the server settled on.
    pub async fn toggle_uploads(
        &self,
        shop_id: &ShopId,
        accepting: bool,
    ) -> Result<bool, ApiError> {
        let response = self
            .authorized(
                self.client
                    .put(format!("{}/shops/{shop_id}/toggle-uploads", self.base_url)),
            )
            .json(&serde_json::json!({ "isAcceptingUploads": accepting }))
            .send()
            .await?;

        let toggled: ToggleResponse = Self::parse_response(response).await?;
        Ok(toggled.accepting_uploads.unwrap_or(accepting))
    }

    /// Download a single stored file by its server path (authenticated).
    ///
    /// Sends `GET /download?path=...`. The filename is the final path
    /// segment.
    pub async fn download_file(&self, path: &str) -> Result<DownloadedFile, ApiError> {
        let response = self
            .authorized(self.client.get(format!("{}/download", self.base_url)))
            .query(&[("path", path)])
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let filename = path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(path)
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedFile { filename, bytes })
    }

    /// Download every file of a batch as one archive (authenticated).
    ///
    /// Sends `GET /download/batch/{token}`. The filename comes from the
    /// `Content-Disposition` header when present, else a generated default
    /// containing the token.
    pub async fn download_batch(&self, token: &Token) -> Result<DownloadedFile, ApiError> {
        let response = self
            .authorized(
                self.client
                    .get(format!("{}/download/batch/{token}", self.base_url)),
            )
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| fallback_batch_filename(token));
        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedFile { filename, bytes })
    }

    // ---- private helpers ----

    /// Attach the bearer credential, when one is configured.
    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
