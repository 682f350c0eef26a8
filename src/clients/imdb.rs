use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::FeedConfig;

/// Errors that can occur while talking to the episode feed. All are
/// recoverable at the show level; the client performs no retries.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("feed returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to decode feed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRating {
    pub aggregate_rating: Option<f32>,
}

/// One feed entry as returned upstream. Everything is optional; the
/// release filter decides what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEpisode {
    pub release_date: Option<ReleaseDate>,
    pub episode_number: Option<i32>,
    pub title: Option<String>,
    pub plot: Option<String>,
    pub rating: Option<AggregateRating>,
}

/// One page of the upstream episode listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodePage {
    #[serde(default)]
    pub episodes: Vec<RawEpisode>,
    /// Opaque continuation token for the next page. Absent on the last page.
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TitleInfo {
    #[serde(rename = "type")]
    pub title_type: String,
}

impl TitleInfo {
    #[must_use]
    pub fn is_series(&self) -> bool {
        matches!(self.title_type.as_str(), "tvSeries" | "tvMiniSeries")
    }
}

/// Paginated episode feed abstraction, so the sync engine can be driven
/// by a scripted feed in tests.
#[async_trait]
pub trait EpisodeFeed: Send + Sync {
    /// Fetch one page. With a token, continues a prior walk instead of
    /// starting at page one.
    async fn fetch_page(
        &self,
        external_id: &str,
        page_token: Option<&str>,
    ) -> Result<EpisodePage, FeedError>;
}

#[derive(Clone)]
pub struct ImdbClient {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl ImdbClient {
    #[must_use]
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            page_size: config.page_size,
        }
    }

    pub async fn get_title(&self, external_id: &str) -> Result<TitleInfo, FeedError> {
        let url = format!("{}/titles/{}", self.base_url, external_id);
        get_json(&self.client, &url).await
    }
}

#[async_trait]
impl EpisodeFeed for ImdbClient {
    async fn fetch_page(
        &self,
        external_id: &str,
        page_token: Option<&str>,
    ) -> Result<EpisodePage, FeedError> {
        let mut url = format!(
            "{}/titles/{}/episodes?pageSize={}",
            self.base_url, external_id, self.page_size
        );

        if let Some(token) = page_token {
            url.push_str("&pageToken=");
            url.push_str(&urlencoding::encode(token));
        }

        get_json(&self.client, &url).await
    }
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    url: &str,
) -> Result<T, FeedError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FeedError::Fetch {
            url: url.to_string(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(FeedError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    response.json::<T>().await.map_err(|source| FeedError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Extract the upstream title id from a user-supplied IMDb URL.
/// Accepts only `www.imdb.com/title/tt<digits>` with at least 7 digits.
#[must_use]
pub fn parse_title_id(link: &str) -> Option<String> {
    let parsed = url::Url::parse(link).ok()?;

    if parsed.host_str() != Some("www.imdb.com") {
        return None;
    }

    let mut segments = parsed.path_segments()?;
    if segments.next() != Some("title") {
        return None;
    }

    let id = segments.next()?;
    let digits = id.strip_prefix("tt")?;
    if digits.len() >= 7 && digits.chars().all(|c| c.is_ascii_digit()) {
        Some(id.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_title_link() {
        assert_eq!(
            parse_title_id("https://www.imdb.com/title/tt0903747/"),
            Some("tt0903747".to_string())
        );
    }

    #[test]
    fn parses_link_with_referral_query() {
        assert_eq!(
            parse_title_id("https://www.imdb.com/title/tt0141842/?ref_=chttvtp_t_8"),
            Some("tt0141842".to_string())
        );
    }

    #[test]
    fn rejects_wrong_host() {
        assert_eq!(parse_title_id("https://imdb.example.com/title/tt0903747/"), None);
    }

    #[test]
    fn rejects_non_title_path() {
        assert_eq!(parse_title_id("https://www.imdb.com/name/nm0000199/"), None);
    }

    #[test]
    fn rejects_short_or_malformed_ids() {
        assert_eq!(parse_title_id("https://www.imdb.com/title/tt123/"), None);
        assert_eq!(parse_title_id("https://www.imdb.com/title/xx0903747/"), None);
        assert_eq!(parse_title_id("https://www.imdb.com/title/tt09037ab/"), None);
    }

    #[test]
    fn title_type_classification() {
        let series = TitleInfo {
            title_type: "tvSeries".to_string(),
        };
        let mini = TitleInfo {
            title_type: "tvMiniSeries".to_string(),
        };
        let movie = TitleInfo {
            title_type: "movie".to_string(),
        };

        assert!(series.is_series());
        assert!(mini.is_series());
        assert!(!movie.is_series());
    }

    #[test]
    fn episode_page_deserializes_sparse_entries() {
        let json = r#"{
            "episodes": [
                {"title": "Pilot", "episodeNumber": 1,
                 "releaseDate": {"year": 2008, "month": 1, "day": 20},
                 "rating": {"aggregateRating": 8.9}},
                {"releaseDate": {"year": 2008}},
                {}
            ],
            "nextPageToken": "abc123"
        }"#;

        let page: EpisodePage = serde_json::from_str(json).unwrap();
        assert_eq!(page.episodes.len(), 3);
        assert_eq!(page.next_page_token.as_deref(), Some("abc123"));
        assert_eq!(page.episodes[0].episode_number, Some(1));
        assert_eq!(page.episodes[1].release_date.as_ref().unwrap().month, None);
        assert!(page.episodes[2].release_date.is_none());
    }
}
