//! Client configuration.
//!
//! Upload constraints and endpoint locations are injected, not owned, by
//! this client — they arrive from the environment with local-development
//! defaults.

use std::path::PathBuf;

use crate::validation::{DEFAULT_MAX_COPIES, DEFAULT_MAX_FILE_BYTES, DEFAULT_MIN_COPIES};

/// Constraints applied to an upload selection before submission.
#[derive(Debug, Clone)]
pub struct UploadRules {
    /// Lower-cased file extensions the shop accepts.
    pub accepted_extensions: Vec<String>,
    /// Per-file size ceiling in bytes.
    pub max_file_bytes: u64,
    /// Inclusive copy-count bounds; out-of-range input is clamped.
    pub min_copies: u32,
    pub max_copies: u32,
    /// Copy count pre-filled in the form.
    pub default_copies: u32,
}

impl Default for UploadRules {
    fn default() -> Self {
        Self {
            accepted_extensions: ["pdf", "jpg", "jpeg", "png", "doc", "docx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            min_copies: DEFAULT_MIN_COPIES,
            max_copies: DEFAULT_MAX_COPIES,
            default_copies: 1,
        }
    }
}

/// Endpoint and credential configuration for one client process.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, e.g. `http://localhost:4000/api`.
    pub api_base: String,
    /// WebSocket URL of the push channel, e.g. `ws://localhost:4000`.
    pub push_url: String,
    /// Bearer credential for the owner surface; `None` on the customer
    /// surface.
    pub auth_token: Option<String>,
    /// Directory holding persisted client state (the per-shop tokens).
    pub data_dir: PathBuf,
    pub rules: UploadRules,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                      |
    /// |--------------------------|------------------------------|
    /// | `PRINTDESK_API_BASE`     | `http://localhost:4000/api`  |
    /// | `PRINTDESK_PUSH_URL`     | `ws://localhost:4000`        |
    /// | `PRINTDESK_AUTH_TOKEN`   | unset                        |
    /// | `PRINTDESK_DATA_DIR`     | `.printdesk`                 |
    /// | `PRINTDESK_MAX_FILE_MB`  | `25`                         |
    /// | `PRINTDESK_MAX_COPIES`   | `100`                        |
    pub fn from_env() -> Self {
        let api_base = std::env::var("PRINTDESK_API_BASE")
            .unwrap_or_else(|_| "http://localhost:4000/api".into());

        let push_url =
            std::env::var("PRINTDESK_PUSH_URL").unwrap_or_else(|_| "ws://localhost:4000".into());

        let auth_token = std::env::var("PRINTDESK_AUTH_TOKEN").ok();

        let data_dir = PathBuf::from(
            std::env::var("PRINTDESK_DATA_DIR").unwrap_or_else(|_| ".printdesk".into()),
        );

        let max_file_mb: u64 = std::env::var("PRINTDESK_MAX_FILE_MB")
            .unwrap_or_else(|_| "25".into())
            .parse()
            .expect("PRINTDESK_MAX_FILE_MB must be a valid u64");

        let max_copies: u32 = std::env::var("PRINTDESK_MAX_COPIES")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("PRINTDESK_MAX_COPIES must be a valid u32");

        let rules = UploadRules {
            max_file_bytes: max_file_mb * 1024 * 1024,
            max_copies,
            ..UploadRules::default()
        };

        Self {
            api_base,
            push_url,
            auth_token,
            data_dir,
            rules,
        }
    }
}
