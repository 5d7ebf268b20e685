//! Transient user notifications.
//!
//! Flows report outcomes through a [`NoticeSink`] rather than rendering
//! anything themselves; the embedding surface decides how a notice is
//! shown. No notice is ever fatal — every failure degrades to "try again".

use std::sync::Mutex;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A one-shot message surfaced to the user.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Where flows deliver their notices.
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default sink: notices become structured log lines.
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => tracing::info!(text = %notice.text, "notice"),
            NoticeLevel::Error => tracing::warn!(text = %notice.text, "notice"),
        }
    }
}

/// Collecting sink for tests and embedders that render notices themselves.
#[derive(Default)]
pub struct MemoryNoticeSink {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNoticeSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything notified so far.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut self.notices.lock().expect("notice sink poisoned"))
    }
}

impl NoticeSink for MemoryNoticeSink {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notice sink poisoned").push(notice);
    }
}
