//! Transient user notifications
//!
//! Every completed operation surfaces as one success or error notice; the
//! queue drops entries after a few seconds.

use std::time::{Duration, Instant};

const NOTICE_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    created: Instant,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
            created: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
            created: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.created.elapsed() > NOTICE_TTL
    }
}

/// Notices as plain data, so reducer output stays comparable in tests;
/// the runtime turns them into timestamped `Notice`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Success(String),
    Error(String),
}

impl NoticeKind {
    pub fn into_notice(self) -> Notice {
        match self {
            NoticeKind::Success(text) => Notice::success(text),
            NoticeKind::Error(text) => Notice::error(text),
        }
    }
}

/// FIFO notice queue with time-based expiry.
#[derive(Debug, Default)]
pub struct Notices {
    items: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        tracing::debug!(level = ?notice.level, text = %notice.text, "notice");
        self.items.push(notice);
    }

    /// Drops expired notices; called from the UI tick.
    pub fn prune(&mut self) {
        self.items.retain(|n| !n.expired());
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_wins() {
        let mut notices = Notices::default();
        notices.push(Notice::success("created"));
        notices.push(Notice::error("failed"));
        assert_eq!(notices.latest().unwrap().level, NoticeLevel::Error);
        assert_eq!(notices.latest().unwrap().text, "failed");
    }

    #[test]
    fn prune_keeps_fresh_notices() {
        let mut notices = Notices::default();
        notices.push(Notice::success("fresh"));
        notices.prune();
        assert!(!notices.is_empty());
    }
}
