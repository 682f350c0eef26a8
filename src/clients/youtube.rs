use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::YoutubeConfig;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("YouTube API key not configured (set [youtube] api_key or the YOUTUBE_API_KEY environment variable)")]
    MissingApiKey,

    #[error("failed to query video search: {0}")]
    Http(#[from] reqwest::Error),

    #[error("video search returned HTTP {0}")]
    Status(u16),
}

/// One search result, in API order.
#[derive(Debug, Clone)]
pub struct VideoCandidate {
    pub video_id: String,
    pub title: String,
}

/// Bounded video search abstraction; mocked in tests.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<VideoCandidate>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
}

#[derive(Clone)]
pub struct YoutubeClient {
    client: Client,
    base_url: String,
    api_key: String,
    max_results: u32,
}

impl YoutubeClient {
    /// Fails fast when no API key is available: enrichment-requiring
    /// operations must not start without one.
    pub fn from_config(config: &YoutubeConfig) -> Result<Self, SearchError> {
        let api_key = config.resolved_api_key().ok_or(SearchError::MissingApiKey)?;

        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            api_key,
            max_results: config.max_results,
        })
    }

    #[must_use]
    pub fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }
}

#[async_trait]
impl VideoSearch for YoutubeClient {
    async fn search(&self, query: &str) -> Result<Vec<VideoCandidate>, SearchError> {
        let url = format!(
            "{}/search?part=snippet&type=video&videoDuration=short&maxResults={}&q={}&key={}",
            self.base_url,
            self.max_results,
            urlencoding::encode(query),
            self.api_key
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(SearchError::Status(response.status().as_u16()));
        }

        let response: SearchResponse = response.json().await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                item.id.video_id.map(|video_id| VideoCandidate {
                    video_id,
                    title: item.snippet.title,
                })
            })
            .collect())
    }
}
