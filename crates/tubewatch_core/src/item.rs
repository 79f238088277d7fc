/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// One video entry of a playlist, as seen by a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistItem {
    pub video_id: String,
    pub title: String,
    pub published_at: Timestamp,
}

impl PlaylistItem {
    pub fn new(
        video_id: impl Into<String>,
        title: impl Into<String>,
        published_at: Timestamp,
    ) -> Self {
        Self {
            video_id: video_id.into(),
            title: title.into(),
            published_at,
        }
    }
}
