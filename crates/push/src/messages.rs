//! Push-channel message types and parser.
//!
//! The server sends JSON messages over WebSocket with the shape
//! `{"type": "<kind>", "data": {...}}`. This module deserializes them into
//! a strongly-typed [`PushMessage`] enum, and serializes the outbound
//! [`ClientMessage`]s the client emits after connecting.

use serde::{Deserialize, Serialize};

use printdesk_core::types::JobStatus;
use printdesk_core::wire::JobRecord;

/// All known inbound push message types.
///
/// Deserialized via the internally-tagged `"type"` field with associated
/// `"data"` content.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PushMessage {
    /// The shop flipped its accepting-uploads flag.
    #[serde(rename = "shopStatusUpdate")]
    ShopStatus(ShopStatusData),

    /// A single job changed status, keyed by job id or token.
    #[serde(rename = "jobStatusUpdate")]
    JobStatus(JobStatusData),

    /// Every job sharing a token changed status.
    #[serde(rename = "batchStatusUpdate")]
    BatchStatus(BatchStatusData),

    /// A new job was submitted to the shop (dashboard only).
    #[serde(rename = "newBatchPrintJob")]
    NewJob(JobRecord),
}

/// Payload for `shopStatusUpdate` messages.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopStatusData {
    #[serde(alias = "isAcceptingUploads")]
    pub accepting_uploads: bool,
}

/// Payload for `jobStatusUpdate` messages.
///
/// Carries at least one of `job_id` and `token`; clients apply the update
/// only when one of them matches locally tracked state.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusData {
    #[serde(default, alias = "jobId", alias = "_id")]
    pub job_id: Option<String>,
    #[serde(default, alias = "tokenNumber", alias = "token_number")]
    pub token: Option<String>,
    pub status: JobStatus,
}

/// Payload for `batchStatusUpdate` messages.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchStatusData {
    #[serde(alias = "tokenNumber", alias = "token_number")]
    pub token: String,
    pub status: JobStatus,
}

/// Outbound messages emitted by the client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    /// Announce membership in a shop-scoped room. Sent after every
    /// successful (re)connect; the owner surface attaches its bearer
    /// credential.
    #[serde(rename = "joinShopRoom")]
    JoinShopRoom {
        #[serde(rename = "shopId")]
        shop_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        auth: Option<String>,
    },
}

/// Parse an inbound WebSocket text message into a typed enum.
///
/// Returns `Err` for malformed JSON or unknown `type` values. Callers
/// should log unknown types and continue.
pub fn parse_message(text: &str) -> Result<PushMessage, serde_json::Error> {
    serde_json::from_str(text)
}
