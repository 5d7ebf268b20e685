//! Synchronization core: merges REST-fetched state with push events.
//!
//! The two surfaces are reduced over the same typed [`printdesk_push::PushEvent`]
//! stream: [`projection::StatusProjection`] for the customer view and
//! [`dashboard::Dashboard`] (holding a [`roster::JobRoster`]) for the owner
//! view. Session persistence goes through the [`session::SessionStore`]
//! interface, injected into both the submission and recovery flows.

pub mod dashboard;
pub mod notice;
pub mod projection;
pub mod recovery;
pub mod roster;
pub mod session;
pub mod submission;

pub use dashboard::{Dashboard, DashboardError};
pub use notice::{Notice, NoticeLevel, NoticeSink};
pub use projection::{StatusProjection, SubmissionView};
pub use roster::{JobRoster, StatusFilter};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
pub use submission::{SubmissionError, SubmissionFlow};
