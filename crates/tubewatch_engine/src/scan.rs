use tubewatch_core::{NewItems, PageVerdict, Timestamp};
use tubewatch_logging::{watch_debug, watch_error, LogSink};

use crate::{PlatformApi, ScanOutcome};

/// Walks a playlist newest-first and collects everything past a watermark.
pub struct PlaylistScanner<'a> {
    api: &'a dyn PlatformApi,
    log: &'a dyn LogSink,
}

impl<'a> PlaylistScanner<'a> {
    pub fn new(api: &'a dyn PlatformApi, log: &'a dyn LogSink) -> Self {
        Self { api, log }
    }

    /// Returns the items published strictly after `watermark`, oldest first.
    ///
    /// Pagination stops at the first item at or below the watermark. A failed
    /// request ends the scan early; the items gathered up to that point are
    /// still returned alongside the error.
    pub async fn scan(&self, playlist_id: &str, watermark: Timestamp) -> ScanOutcome {
        let mut acc = NewItems::new(watermark);
        let mut page_token: Option<String> = None;
        let mut pages_fetched = 0;
        let mut error = None;

        loop {
            let page = match self
                .api
                .list_playlist_items(playlist_id, page_token.as_deref())
                .await
            {
                Ok(page) => page,
                Err(err) => {
                    watch_error!(
                        self.log,
                        "Listing playlist {} failed after {} page(s): {}",
                        playlist_id,
                        pages_fetched,
                        err
                    );
                    error = Some(err);
                    break;
                }
            };
            pages_fetched += 1;
            watch_debug!(
                self.log,
                "Playlist {} page {}: {} item(s)",
                playlist_id,
                pages_fetched,
                page.items.len()
            );

            if acc.absorb_page(page.items) == PageVerdict::Stop {
                break;
            }
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        watch_debug!(
            self.log,
            "Playlist {}: {} new item(s) after {} (watermark reached: {})",
            playlist_id,
            acc.len(),
            watermark,
            acc.reached_watermark()
        );

        ScanOutcome {
            items: acc.into_chronological(),
            pages_fetched,
            error,
        }
    }
}
