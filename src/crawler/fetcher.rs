//! HTTP fetcher for the VK `wall.get` endpoint
//!
//! This module issues single page requests and classifies what came back:
//! - a page of posts (`response.items`)
//! - a rate-limit signal (HTTP 429)
//! - an API error payload (`error.error_code` / `error.error_msg`)
//! - anything else, reported as an unrecognized response
//!
//! Pagination and backoff live in [`crate::crawler::wall`].

use crate::config::Config;
use crate::models::RawPost;
use crate::utils::error::FetchError;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Path of the wall endpoint relative to the API host
const WALL_GET_PATH: &str = "method/wall.get";

/// Longest body excerpt kept when reporting an unrecognized response
const BODY_EXCERPT_CHARS: usize = 200;

/// Top-level `wall.get` response body
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope {
    Success { response: WallPage },
    Failure { error: ApiErrorBody },
}

#[derive(Debug, Deserialize)]
struct WallPage {
    /// Total number of posts on the wall
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    error_msg: Option<String>,
}

/// Outcome of a single page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
    /// Success payload
    Page {
        /// Posts that could be decoded
        posts: Vec<RawPost>,
        /// Number of entries the API returned, decodable or not
        returned: usize,
        /// Total wall size reported by the API, if present
        total: Option<u64>,
    },

    /// HTTP 429
    RateLimited,

    /// Explicit error payload
    ApiError { code: i64, message: String },

    /// Body with no recognizable shape
    Unrecognized(String),
}

/// VK wall fetcher
///
/// Holds the HTTP client, the credential, and the pacing delays used by the
/// pagination loop.
pub struct WallFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Fully resolved `wall.get` URL
    endpoint: Url,

    /// Pre-validated access token
    access_token: String,

    /// API version sent as `v`
    api_version: String,

    /// Pause between page requests
    pub(crate) pause: Duration,

    /// Delay before retrying a rate-limited request
    pub(crate) rate_limit_backoff: Duration,
}

impl WallFetcher {
    /// Create a fetcher from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidUrl` if the configured base URL cannot be
    /// parsed, or `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_base_url(&config.api.base_url, config)
    }

    /// Create a fetcher that talks to `base_url` instead of the configured host
    ///
    /// # Errors
    ///
    /// Same as [`WallFetcher::new`]
    pub fn with_base_url(base_url: &str, config: &Config) -> Result<Self, FetchError> {
        let endpoint = Self::resolve_endpoint(base_url)?;

        let client = Client::builder()
            .timeout(config.request_timeout())
            .gzip(true)
            .user_agent(format!("vkwall/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            access_token: config.api.access_token.clone(),
            api_version: config.api.version.clone(),
            pause: config.pause(),
            rate_limit_backoff: config.rate_limit_backoff(),
        })
    }

    /// Override the pacing delays
    #[must_use]
    pub fn with_delays(mut self, pause: Duration, rate_limit_backoff: Duration) -> Self {
        self.pause = pause;
        self.rate_limit_backoff = rate_limit_backoff;
        self
    }

    /// The resolved `wall.get` URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn resolve_endpoint(base_url: &str) -> Result<Url, FetchError> {
        let mut base =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join(WALL_GET_PATH)
            .map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))
    }

    /// Request one page of a community wall
    ///
    /// # Arguments
    ///
    /// * `community_id` - Community id; sent negated as `owner_id`
    /// * `count` - Page size (at most 100)
    /// * `offset` - Number of posts to skip
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Timeout` or `FetchError::Http` on transport
    /// failures. API-level failures are reported through [`PageResponse`].
    pub async fn fetch_page(
        &self,
        community_id: u64,
        count: usize,
        offset: usize,
    ) -> Result<PageResponse, FetchError> {
        let owner_id = format!("-{community_id}");
        let count = count.to_string();
        let offset = offset.to_string();

        tracing::debug!(
            community_id,
            count = %count,
            offset = %offset,
            "Requesting wall page"
        );

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("access_token", self.access_token.as_str()),
                ("v", self.api_version.as_str()),
                ("owner_id", owner_id.as_str()),
                ("count", count.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Ok(PageResponse::RateLimited);
        }

        let body = response.text().await.map_err(FetchError::from_transport)?;

        Ok(Self::parse_body(&body))
    }

    /// Classify a response body
    pub fn parse_body(body: &str) -> PageResponse {
        match serde_json::from_str::<Envelope>(body) {
            Ok(Envelope::Success { response }) => {
                let returned = response.items.len();
                let posts = response
                    .items
                    .into_iter()
                    .filter_map(RawPost::from_value)
                    .collect();

                PageResponse::Page {
                    posts,
                    returned,
                    total: response.count,
                }
            }
            Ok(Envelope::Failure { error }) => PageResponse::ApiError {
                code: error.error_code,
                message: error
                    .error_msg
                    .unwrap_or_else(|| String::from("unknown error")),
            },
            Err(_) => PageResponse::Unrecognized(excerpt(body)),
        }
    }
}

fn excerpt(body: &str) -> String {
    crate::utils::truncate_chars(body.trim(), BODY_EXCERPT_CHARS).to_string()
}
