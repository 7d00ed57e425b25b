//! Content-type classification
//!
//! Summarizes a post's composition as a single tag built from its
//! attachment types and the presence of text and links:
//!
//! - `attachments:<type1>[,<type2>,...]_text[_with_link]`
//! - `attachments:<type1>[,<type2>,...]_no_text`
//! - `text_only` / `text_with_link`
//! - `empty`

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use crate::models::Attachment;

/// Returns true when the text contains an `http://` or `https://` URL
pub fn has_link(text: &str) -> bool {
    static URL_RE: OnceLock<Regex> = OnceLock::new();

    let re = URL_RE.get_or_init(|| Regex::new(r"(?i)https?://\S+").expect("Invalid regex pattern"));

    re.is_match(text)
}

/// Distinct attachment tags in lexical order
pub fn attachment_kinds(attachments: &[Attachment]) -> Vec<&str> {
    attachments
        .iter()
        .map(|a| a.kind.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Classify a post by its text and attachments
pub fn determine_content_type(text: &str, attachments: &[Attachment]) -> String {
    let text = text.trim();
    let has_text = !text.is_empty();
    let with_link = has_text && has_link(text);
    let kinds = attachment_kinds(attachments);

    if kinds.is_empty() {
        let tag = match (has_text, with_link) {
            (false, _) => "empty",
            (true, true) => "text_with_link",
            (true, false) => "text_only",
        };
        return tag.to_string();
    }

    let suffix = match (has_text, with_link) {
        (false, _) => "no_text",
        (true, true) => "text_with_link",
        (true, false) => "text",
    };
    format!("attachments:{}_{suffix}", kinds.join(","))
}
