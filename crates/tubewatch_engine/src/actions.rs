use tubewatch_core::Action;
use tubewatch_logging::{watch_debug, watch_info, LogSink};

use crate::{ApiError, PlatformApi};

/// Performs rule actions against the platform.
///
/// In dry-run mode every action is logged and reported as successful
/// without touching the platform.
pub struct ActionExecutor<'a> {
    api: &'a dyn PlatformApi,
    log: &'a dyn LogSink,
    dry_run: bool,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(api: &'a dyn PlatformApi, log: &'a dyn LogSink) -> Self {
        Self {
            api,
            log,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn execute(&self, action: &Action, video_id: &str) -> Result<(), ApiError> {
        match action {
            Action::AddToPlaylist { target_playlist_id } => {
                self.add_to_playlist(target_playlist_id, video_id).await
            }
            Action::PostBulletin { message } => self.post_bulletin(message, video_id).await,
        }
    }

    pub async fn add_to_playlist(
        &self,
        target_playlist_id: &str,
        video_id: &str,
    ) -> Result<(), ApiError> {
        if self.dry_run {
            watch_info!(
                self.log,
                "[dry run] Would add {} to playlist {}",
                video_id,
                target_playlist_id
            );
            return Ok(());
        }
        watch_debug!(self.log, "Adding {} to playlist {}", video_id, target_playlist_id);
        self.api.insert_playlist_item(target_playlist_id, video_id).await
    }

    pub async fn post_bulletin(&self, message: &str, video_id: &str) -> Result<(), ApiError> {
        if self.dry_run {
            watch_info!(
                self.log,
                "[dry run] Would post bulletin for {}: {}",
                video_id,
                message
            );
            return Ok(());
        }
        watch_debug!(self.log, "Posting bulletin for {}: {}", video_id, message);
        self.api.insert_bulletin(message, video_id).await
    }
}
