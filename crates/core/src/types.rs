//! Core domain types for the printdesk client.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of a print shop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopId(pub String);

impl ShopId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ShopId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque identifier of a single print job row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque token returned at submission time.
///
/// The customer uses it to claim prints at the counter; the client uses it
/// to correlate REST-fetched state with push updates for the same batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(pub String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Lifecycle states of a submitted job.
///
/// The client performs no transition validation — whatever status the server
/// or push channel reports is applied as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Submitted, waiting at the shop.
    Pending,
    /// Printed and handed over (owner action).
    Completed,
    /// Aged out server-side without being printed.
    Expired,
    /// Soft-deleted by the owner.
    Deleted,
}

/// Print colour mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    /// Black and white. Older servers send `bw`.
    #[serde(alias = "bw")]
    Monochrome,
    Color,
}

impl PrintMode {
    /// Wire keyword used in form fields and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monochrome => "monochrome",
            Self::Color => "color",
        }
    }
}

/// Simplex/duplex selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintSide {
    Single,
    Double,
}

impl PrintSide {
    /// Wire keyword used in form fields and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
        }
    }
}

/// A file held by the server, as listed on a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    /// Storage path on the server, used for single-file downloads.
    pub path: String,
    pub size: u64,
}

/// A print job as held by the dashboard roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintJob {
    pub id: JobId,
    pub token: Token,
    pub mode: PrintMode,
    pub side: PrintSide,
    pub copies: u32,
    pub status: JobStatus,
    pub uploaded_at: DateTime<Utc>,
    pub files: Vec<FileDescriptor>,
}

/// Shop metadata as shown on the customer surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    /// Per-page cost in minor currency units, monochrome.
    pub mono_cost: u32,
    /// Per-page cost in minor currency units, colour.
    pub color_cost: u32,
    pub accepting_uploads: bool,
}

impl Shop {
    /// Per-page cost for the given print mode.
    pub fn cost_per_page(&self, mode: PrintMode) -> u32 {
        match mode {
            PrintMode::Monochrome => self.mono_cost,
            PrintMode::Color => self.color_cost,
        }
    }
}

/// A file picked locally, before upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
}

impl LocalFile {
    /// Lower-cased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
    }
}

/// The transient state of the upload form: files plus print options.
///
/// Consumed by the submission flow; discarded after a successful submit or
/// an explicit reset.
#[derive(Debug, Clone)]
pub struct UploadSelection {
    pub files: Vec<LocalFile>,
    pub mode: PrintMode,
    pub side: PrintSide,
    pub copies: u32,
}
