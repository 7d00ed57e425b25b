//! Post classification and field extraction
//!
//! This module turns raw wall posts into flattened records ready for
//! analysis: content-type tagging, hashtag extraction, time bucketing.

pub mod content;
pub mod extract;

pub use content::determine_content_type;
pub use extract::{extract_post_data, MAX_TEXT_CHARS, NO_HASHTAGS};
