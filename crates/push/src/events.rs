//! Typed events delivered to surface subscribers.
//!
//! [`PushEvent`] is what the projection and roster reducers consume. It is
//! deliberately independent of the wire format in [`crate::messages`] so the
//! reducers never see the transport.

use printdesk_core::types::{JobId, JobStatus, PrintJob, Token};

use crate::messages::PushMessage;

/// A channel-level or shop-level event, in delivery order.
#[derive(Debug, Clone)]
pub enum PushEvent {
    /// The channel (re)connected and announced room membership.
    Connected,

    /// The channel dropped; a reconnect attempt follows.
    Disconnected,

    /// The shop flipped its accepting-uploads flag.
    ShopAccepting { accepting: bool },

    /// One job changed status, keyed by job id and/or token.
    JobStatusChanged {
        job_id: Option<JobId>,
        token: Option<Token>,
        status: JobStatus,
    },

    /// All jobs sharing a token changed status.
    BatchStatusChanged { token: Token, status: JobStatus },

    /// A new job arrived at the shop.
    JobAdded(PrintJob),
}

impl PushEvent {
    /// Map a parsed wire message into the event the reducers consume.
    pub fn from_message(msg: PushMessage) -> Self {
        match msg {
            PushMessage::ShopStatus(data) => Self::ShopAccepting {
                accepting: data.accepting_uploads,
            },
            PushMessage::JobStatus(data) => Self::JobStatusChanged {
                job_id: data.job_id.map(JobId),
                token: data.token.map(Token),
                status: data.status,
            },
            PushMessage::BatchStatus(data) => Self::BatchStatusChanged {
                token: Token(data.token),
                status: data.status,
            },
            PushMessage::NewJob(record) => Self::JobAdded(record.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::parse_message;
    use assert_matches::assert_matches;

    #[test]
    fn batch_message_maps_to_batch_event() {
        let msg =
            parse_message(r#"{"type":"batchStatusUpdate","data":{"token":"T-1","status":"completed"}}"#)
                .unwrap();
        let event = PushEvent::from_message(msg);
        assert_matches!(
            event,
            PushEvent::BatchStatusChanged { token, status: JobStatus::Completed }
                if token.as_str() == "T-1"
        );
    }

    #[test]
    fn job_message_keeps_both_keys() {
        let msg = parse_message(
            r#"{"type":"jobStatusUpdate","data":{"jobId":"j-1","token":"T-1","status":"pending"}}"#,
        )
        .unwrap();
        let event = PushEvent::from_message(msg);
        assert_matches!(
            event,
            PushEvent::JobStatusChanged { job_id: Some(id), token: Some(t), .. }
                if id.as_str() == "j-1" && t.as_str() == "T-1"
        );
    }
}
