//! Field derivation for wall posts
//!
//! Turns a [`RawPost`] into a [`NormalizedRecord`]. The transform is pure and
//! total: missing data degrades to defaults, nothing here can fail.

use chrono::{DateTime, Timelike, Utc};
use regex::Regex;
use std::sync::OnceLock;

use crate::models::{NormalizedRecord, RawPost, TimeOfDay};
use crate::parser::content::determine_content_type;
use crate::utils::truncate_chars;

/// Maximum number of characters kept in the output text field
pub const MAX_TEXT_CHARS: usize = 500;

/// Hashtag column value when a post has none
pub const NO_HASHTAGS: &str = "none";

/// Public wall post link prefix; community id and post id are appended
pub const POST_LINK_PREFIX: &str = "https://vk.com/wall-";

/// Build the canonical link of a community wall post
pub fn post_link(community_id: u64, post_id: &str) -> String {
    format!("{POST_LINK_PREFIX}{community_id}_{post_id}")
}

/// All `#word` hashtags in order of appearance, duplicates kept
pub fn extract_hashtags(text: &str) -> Vec<&str> {
    static HASHTAG_RE: OnceLock<Regex> = OnceLock::new();

    let re = HASHTAG_RE.get_or_init(|| Regex::new(r"#\w+").expect("Invalid regex pattern"));

    re.find_iter(text).map(|m| m.as_str()).collect()
}

/// Convert UNIX seconds to a UTC datetime, falling back to the epoch when out of range
pub fn utc_datetime(timestamp: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).unwrap_or_default()
}

/// Derive the normalized record for one post of `community_id`
pub fn extract_post_data(post: &RawPost, community_id: u64) -> NormalizedRecord {
    let post_id = post.id.map(|id| id.to_string()).unwrap_or_default();

    let hashtags = extract_hashtags(&post.text);
    let hashtags = if hashtags.is_empty() {
        NO_HASHTAGS.to_string()
    } else {
        hashtags.join(", ")
    };

    let published = utc_datetime(post.date);

    NormalizedRecord {
        post_link: post_link(community_id, &post_id),
        post_id,
        text: truncate_chars(&post.text, MAX_TEXT_CHARS).to_string(),
        date_time: published.format("%Y-%m-%dT%H:%M:%S").to_string(),
        author_id: community_id,
        likes: post.likes.count,
        comments: post.comments.count,
        reposts: post.reposts.count,
        hashtags,
        content_type: determine_content_type(&post.text, &post.attachments),
        text_length: post.text.chars().count(),
        time_of_day: TimeOfDay::from_hour(published.hour()),
    }
}
