use std::time::Duration;

use chrono::DateTime;
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tubewatch_core::PlaylistItem;
use url::Url;

use crate::{ApiError, FailureKind, ItemPage};

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
/// Largest `maxResults` the listing endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub access_token: String,
    pub page_size: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl ApiSettings {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            access_token: access_token.into(),
            page_size: MAX_PAGE_SIZE,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The three platform calls a run needs. Implemented over HTTP by
/// [`ReqwestPlatformApi`] and by in-memory fakes in tests.
#[async_trait::async_trait]
pub trait PlatformApi: Send + Sync {
    /// Fetches one page of a playlist, newest item first.
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<ItemPage, ApiError>;

    /// Inserts `video_id` at position 0 of `playlist_id`.
    async fn insert_playlist_item(&self, playlist_id: &str, video_id: &str)
        -> Result<(), ApiError>;

    /// Posts a channel bulletin referencing `video_id`.
    async fn insert_bulletin(&self, message: &str, video_id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPlatformApi {
    settings: ApiSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestPlatformApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, resource: &str, query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`, so the segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(resource);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        url
    }

    async fn post_json(&self, url: Url, body: serde_json::Value) -> Result<(), ApiError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.settings.access_token)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl PlatformApi for ReqwestPlatformApi {
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<ItemPage, ApiError> {
        let page_size = self.settings.page_size.clamp(1, MAX_PAGE_SIZE).to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", page_size.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }
        let url = self.endpoint("playlistItems", &query);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.settings.access_token)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = check_status(response).await?;
        let listing: ListingResponse = response.json().await.map_err(map_reqwest_error)?;
        listing.into_page()
    }

    async fn insert_playlist_item(
        &self,
        playlist_id: &str,
        video_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint("playlistItems", &[("part", "snippet")]);
        let body = json!({
            "snippet": {
                "playlistId": playlist_id,
                "position": 0,
                "resourceId": { "kind": "youtube#video", "videoId": video_id }
            }
        });
        self.post_json(url, body).await
    }

    async fn insert_bulletin(&self, message: &str, video_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint("activities", &[("part", "snippet,contentDetails")]);
        let body = json!({
            "snippet": { "description": message },
            "contentDetails": {
                "bulletin": {
                    "resourceId": { "kind": "youtube#video", "videoId": video_id }
                }
            }
        });
        self.post_json(url, body).await
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingResponse {
    #[serde(default)]
    items: Vec<ItemResource>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemResource {
    snippet: ItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemSnippet {
    #[serde(default)]
    title: String,
    published_at: String,
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: String,
}

impl ListingResponse {
    fn into_page(self) -> Result<ItemPage, ApiError> {
        let items = self
            .items
            .into_iter()
            .map(|resource| -> Result<PlaylistItem, ApiError> {
                let snippet = resource.snippet;
                let published_at = DateTime::parse_from_rfc3339(&snippet.published_at)
                    .map_err(|err| {
                        ApiError::new(
                            FailureKind::Decode,
                            format!("publishedAt {:?}: {err}", snippet.published_at),
                        )
                    })?
                    .timestamp();
                Ok(PlaylistItem {
                    video_id: snippet.resource_id.video_id,
                    title: snippet.title,
                    published_at,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        // An empty token is the same as no token.
        let next_page_token = self.next_page_token.filter(|token| !token.is_empty());
        Ok(ItemPage {
            items,
            next_page_token,
        })
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{status}: {}", body.trim())
    };
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            FailureKind::Unauthorized(status.as_u16())
        }
        _ => FailureKind::HttpStatus(status.as_u16()),
    };
    Err(ApiError::new(kind, message))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
