//! Paginated wall collection
//!
//! Walks a community wall page by page until the quota is met or the wall is
//! exhausted. A 429 response sleeps for the backoff and retries the same
//! offset; API errors and unrecognized responses end the walk early and keep
//! whatever was already collected.

use tracing::{debug, error, warn};

use crate::crawler::fetcher::{PageResponse, WallFetcher};
use crate::models::RawPost;
use crate::utils::error::FetchError;

/// Largest page `wall.get` accepts
pub const PAGE_MAX: usize = 100;

/// Cursor and accumulator for one community
#[derive(Debug)]
struct FetchState {
    offset: usize,
    posts: Vec<RawPost>,
    target: usize,
}

impl FetchState {
    fn new(target: usize) -> Self {
        Self {
            offset: 0,
            posts: Vec::new(),
            target,
        }
    }

    fn is_complete(&self) -> bool {
        self.posts.len() >= self.target
    }

    fn next_page_size(&self) -> usize {
        PAGE_MAX.min(self.target.saturating_sub(self.posts.len()))
    }

    fn into_posts(mut self) -> Vec<RawPost> {
        self.posts.truncate(self.target);
        self.posts
    }
}

impl WallFetcher {
    /// Collect up to `total_posts` posts from a community wall, newest first
    ///
    /// # Errors
    ///
    /// Only transport failures are returned as errors. API error payloads and
    /// unrecognized responses are logged and end the walk with a partial
    /// (possibly empty) result.
    pub async fn fetch_posts(
        &self,
        community_id: u64,
        total_posts: usize,
    ) -> Result<Vec<RawPost>, FetchError> {
        let mut state = FetchState::new(total_posts);

        while !state.is_complete() {
            let requested = state.next_page_size();

            match self
                .fetch_page(community_id, requested, state.offset)
                .await?
            {
                PageResponse::RateLimited => {
                    warn!(
                        community_id,
                        offset = state.offset,
                        backoff_secs = self.rate_limit_backoff.as_secs_f64(),
                        "Rate limit exceeded, backing off"
                    );
                    tokio::time::sleep(self.rate_limit_backoff).await;
                    continue;
                }
                PageResponse::Page {
                    posts,
                    returned,
                    total,
                } => {
                    if posts.len() < returned {
                        warn!(
                            community_id,
                            skipped = returned - posts.len(),
                            "Skipped malformed wall items"
                        );
                    }

                    state.offset += returned;
                    state.posts.extend(posts);

                    debug!(
                        community_id,
                        returned,
                        collected = state.posts.len(),
                        wall_total = ?total,
                        "Received wall page"
                    );

                    if returned < requested {
                        break;
                    }
                }
                PageResponse::ApiError { code, message } => {
                    error!(community_id, code, message = %message, "API returned an error");
                    break;
                }
                PageResponse::Unrecognized(body) => {
                    error!(community_id, body = %body, "Unrecognized API response");
                    break;
                }
            }

            if !state.is_complete() {
                tokio::time::sleep(self.pause).await;
            }
        }

        Ok(state.into_posts())
    }
}
