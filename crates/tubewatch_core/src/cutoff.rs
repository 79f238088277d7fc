use crate::{PlaylistItem, Timestamp};

/// Whether another page should be requested after absorbing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVerdict {
    Continue,
    Stop,
}

/// Accumulates newest-first pages until the watermark is reached.
///
/// The feed is assumed to be sorted newest first, so the first item at or
/// below the watermark marks the end of everything new.
#[derive(Debug, Clone)]
pub struct NewItems {
    watermark: Timestamp,
    newest_first: Vec<PlaylistItem>,
    reached_watermark: bool,
}

impl NewItems {
    pub fn new(watermark: Timestamp) -> Self {
        Self {
            watermark,
            newest_first: Vec::new(),
            reached_watermark: false,
        }
    }

    pub fn absorb_page(&mut self, page: impl IntoIterator<Item = PlaylistItem>) -> PageVerdict {
        if self.reached_watermark {
            return PageVerdict::Stop;
        }
        for item in page {
            if item.published_at <= self.watermark {
                self.reached_watermark = true;
                return PageVerdict::Stop;
            }
            self.newest_first.push(item);
        }
        PageVerdict::Continue
    }

    pub fn reached_watermark(&self) -> bool {
        self.reached_watermark
    }

    pub fn len(&self) -> usize {
        self.newest_first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.newest_first.is_empty()
    }

    /// Publish time of the newest accumulated item.
    pub fn newest(&self) -> Option<Timestamp> {
        self.newest_first.first().map(|item| item.published_at)
    }

    /// Consumes the accumulator, oldest new item first.
    pub fn into_chronological(self) -> Vec<PlaylistItem> {
        let mut items = self.newest_first;
        items.reverse();
        items
    }
}
