use crate::Timestamp;

/// How a channel's watermark moves after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatermarkPolicy {
    /// Publish time of the last matched item in dispatch order. Items that
    /// match no rule never move the watermark.
    #[default]
    LastMatched,
    /// Newest scanned item, matched or not, once scan and dispatch both
    /// finished cleanly. Falls back to `LastMatched` otherwise, which after
    /// a partial scan still moves past items on pages never fetched.
    NewestSeen,
}

impl WatermarkPolicy {
    /// Computes the watermark to persist. Never lower than `current`.
    pub fn advance(
        self,
        current: Timestamp,
        last_matched: Option<Timestamp>,
        newest_seen: Option<Timestamp>,
        clean: bool,
    ) -> Timestamp {
        let candidate = match self {
            WatermarkPolicy::NewestSeen if clean => newest_seen.or(last_matched),
            WatermarkPolicy::NewestSeen | WatermarkPolicy::LastMatched => last_matched,
        };
        candidate.map_or(current, |c| c.max(current))
    }
}
