//! Server payload records shared by the REST and push decoders.
//!
//! The server has been through one field-naming migration, so every record
//! tolerates both the current snake_case names and the legacy camelCase
//! names via serde aliases. Conversions into the domain types in
//! [`crate::types`] live here so both transports normalize identically.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{
    FileDescriptor, JobId, JobStatus, PrintJob, PrintMode, PrintSide, Shop, ShopId, Token,
};

fn default_copies() -> u32 {
    1
}

/// A file entry on a job payload.
#[derive(Debug, Clone, Deserialize)]
pub struct FileRecord {
    #[serde(alias = "fileName", alias = "originalname")]
    pub name: String,
    #[serde(alias = "filePath", alias = "storagePath")]
    pub path: String,
    #[serde(default, alias = "fileSize")]
    pub size: u64,
}

impl From<FileRecord> for FileDescriptor {
    fn from(r: FileRecord) -> Self {
        Self {
            name: r.name,
            path: r.path,
            size: r.size,
        }
    }
}

/// A full job row, as returned by the jobs listing and pushed with
/// `newBatchPrintJob`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "tokenNumber", alias = "token_number")]
    pub token: String,
    #[serde(alias = "printType", alias = "print_type")]
    pub mode: PrintMode,
    #[serde(alias = "printSide", alias = "print_side")]
    pub side: PrintSide,
    #[serde(default = "default_copies")]
    pub copies: u32,
    pub status: JobStatus,
    #[serde(alias = "uploadedAt", alias = "createdAt", alias = "created_at")]
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

impl From<JobRecord> for PrintJob {
    fn from(r: JobRecord) -> Self {
        Self {
            id: JobId(r.id),
            token: Token(r.token),
            mode: r.mode,
            side: r.side,
            copies: r.copies,
            status: r.status,
            uploaded_at: r.uploaded_at,
            files: r.files.into_iter().map(Into::into).collect(),
        }
    }
}

/// The minimal batch view returned by the token status endpoint.
///
/// Unlike [`JobRecord`] the job id may be absent — the status endpoint is
/// keyed by token and older servers omit the row id entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(alias = "tokenNumber", alias = "token_number")]
    pub token: String,
    #[serde(alias = "printType", alias = "print_type")]
    pub mode: PrintMode,
    #[serde(alias = "printSide", alias = "print_side")]
    pub side: PrintSide,
    #[serde(default = "default_copies")]
    pub copies: u32,
    pub status: JobStatus,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// Shop metadata payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "shopName", alias = "shop_name")]
    pub name: String,
    #[serde(alias = "costBw", alias = "cost_bw", alias = "monoCost")]
    pub mono_cost: u32,
    #[serde(alias = "costColor", alias = "cost_color", alias = "colorCost")]
    pub color_cost: u32,
    #[serde(default = "default_accepting", alias = "isAcceptingUploads")]
    pub accepting_uploads: bool,
}

fn default_accepting() -> bool {
    true
}

impl From<ShopRecord> for Shop {
    fn from(r: ShopRecord) -> Self {
        Self {
            id: ShopId(r.id),
            name: r.name,
            mono_cost: r.mono_cost,
            color_cost: r.color_cost,
            accepting_uploads: r.accepting_uploads,
        }
    }
}
