use std::fmt;

use tubewatch_core::{PlaylistItem, Timestamp};

/// One page of a playlist listing, newest item first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemPage {
    pub items: Vec<PlaylistItem>,
    pub next_page_token: Option<String>,
}

/// Result of a scan. `items` is valid even when `error` is set: it then
/// holds whatever was accumulated before the failing request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanOutcome {
    /// New items, oldest first.
    pub items: Vec<PlaylistItem>,
    pub pages_fetched: usize,
    pub error: Option<ApiError>,
}

impl ScanOutcome {
    pub fn newest(&self) -> Option<Timestamp> {
        self.items.last().map(|item| item.published_at)
    }
}

/// Result of dispatching rules over scanned items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Publish time of the last item whose actions all completed.
    pub watermark: Option<Timestamp>,
    pub matches: usize,
    pub actions_executed: usize,
    pub error: Option<ApiError>,
}

/// What happened to a single channel during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
    pub playlist_id: String,
    pub previous_watermark: Timestamp,
    pub watermark: Timestamp,
    pub scanned: usize,
    pub matches: usize,
    pub actions_executed: usize,
    pub skipped: bool,
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub channels: Vec<ChannelReport>,
    pub save_error: Option<String>,
}

impl RunSummary {
    pub fn failed_channels(&self) -> usize {
        self.channels.iter().filter(|c| c.error.is_some()).count()
    }

    pub fn actions_executed(&self) -> usize {
        self.channels.iter().map(|c| c.actions_executed).sum()
    }

    pub fn is_success(&self) -> bool {
        self.failed_channels() == 0 && self.save_error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Unauthorized(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Unauthorized(code) => write!(f, "unauthorized (http status {code})"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
