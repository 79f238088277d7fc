#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use tubewatch_core::PlaylistItem;
use tubewatch_engine::{ApiError, FailureKind, ItemPage, PlatformApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List {
        playlist_id: String,
        page_token: Option<String>,
    },
    Insert {
        playlist_id: String,
        video_id: String,
    },
    Bulletin {
        message: String,
        video_id: String,
    },
}

/// In-memory platform: playlists are served as fixed newest-first pages
/// linked by `page-N` tokens, and every call is recorded.
#[derive(Default)]
pub struct FakeApi {
    playlists: HashMap<String, Vec<Vec<PlaylistItem>>>,
    fail_list_page: Option<(String, usize)>,
    fail_write_call: Option<usize>,
    calls: Mutex<Vec<Call>>,
    writes: Mutex<usize>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_playlist(mut self, playlist_id: &str, pages: Vec<Vec<PlaylistItem>>) -> Self {
        self.playlists.insert(playlist_id.to_string(), pages);
        self
    }

    /// Makes the listing of page `index` (0-based) of `playlist_id` fail.
    pub fn failing_list_page(mut self, playlist_id: &str, index: usize) -> Self {
        self.fail_list_page = Some((playlist_id.to_string(), index));
        self
    }

    /// Makes the `index`-th (0-based) insert or bulletin call fail.
    pub fn failing_write(mut self, index: usize) -> Self {
        self.fail_write_call = Some(index);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::List { .. }))
            .count()
    }

    pub fn write_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::List { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_write(&self) -> Result<(), ApiError> {
        let mut writes = self.writes.lock().unwrap();
        let index = *writes;
        *writes += 1;
        if self.fail_write_call == Some(index) {
            return Err(ApiError::new(FailureKind::HttpStatus(500), "backend error"));
        }
        Ok(())
    }
}

fn page_index(token: Option<&str>) -> usize {
    token
        .and_then(|t| t.strip_prefix("page-"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

#[async_trait::async_trait]
impl PlatformApi for FakeApi {
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<ItemPage, ApiError> {
        self.record(Call::List {
            playlist_id: playlist_id.to_string(),
            page_token: page_token.map(str::to_string),
        });
        let index = page_index(page_token);
        if let Some((failing, at)) = &self.fail_list_page {
            if failing == playlist_id && *at == index {
                return Err(ApiError::new(FailureKind::Network, "connection reset"));
            }
        }
        let pages = self
            .playlists
            .get(playlist_id)
            .ok_or_else(|| ApiError::new(FailureKind::HttpStatus(404), "playlistNotFound"))?;
        let items = pages.get(index).cloned().unwrap_or_default();
        let next_page_token = (index + 1 < pages.len()).then(|| format!("page-{}", index + 1));
        Ok(ItemPage {
            items,
            next_page_token,
        })
    }

    async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<(), ApiError> {
        self.record(Call::Insert {
            playlist_id: playlist_id.to_string(),
            video_id: video_id.to_string(),
        });
        self.next_write()
    }

    async fn insert_bulletin(&self, message: &str, video_id: &str) -> Result<(), ApiError> {
        self.record(Call::Bulletin {
            message: message.to_string(),
            video_id: video_id.to_string(),
        });
        self.next_write()
    }
}

pub fn item(published_at: i64, title: &str) -> PlaylistItem {
    PlaylistItem::new(format!("v{published_at}"), title, published_at)
}

pub fn insert(playlist_id: &str, video_id: &str) -> Call {
    Call::Insert {
        playlist_id: playlist_id.to_string(),
        video_id: video_id.to_string(),
    }
}

pub fn bulletin(message: &str, video_id: &str) -> Call {
    Call::Bulletin {
        message: message.to_string(),
        video_id: video_id.to_string(),
    }
}
