// Core data structures for the vkwall collector

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Attachment tag used when an attachment object carries no usable `type`
pub const UNKNOWN_ATTACHMENT: &str = "unknown";

/// Wall post as returned by `wall.get`
///
/// Every field tolerates absence and type mismatches: a missing or malformed
/// value resolves to its default instead of failing the whole post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawPost {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub text: String,
    #[serde(deserialize_with = "lenient")]
    pub date: i64, // UNIX seconds
    #[serde(deserialize_with = "lenient")]
    pub likes: Counter,
    #[serde(deserialize_with = "lenient")]
    pub comments: Counter,
    #[serde(deserialize_with = "lenient")]
    pub reposts: Counter,
    #[serde(deserialize_with = "lenient_attachments")]
    pub attachments: Vec<Attachment>,
}

impl RawPost {
    /// Build a post from one `items` entry; non-object entries yield `None`
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }
}

/// Nested `{ "count": n }` engagement counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Counter {
    #[serde(deserialize_with = "lenient")]
    pub count: u64,
}

impl Counter {
    pub fn new(count: u64) -> Self {
        Self { count }
    }
}

/// Media or link object embedded in a post
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attachment {
    /// Type tag (photo, video, link, ...)
    pub kind: String,
}

impl Attachment {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_attachments<'de, D>(deserializer: D) -> Result<Vec<Attachment>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(entries) = value else {
        return Ok(Vec::new());
    };

    Ok(entries
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| {
            let kind = obj
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or(UNKNOWN_ATTACHMENT);
            Attachment::new(kind)
        })
        .collect())
}

/// Time-of-day bucket derived from the UTC publication hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Map an hour (0-23) to its bucket: [5,12) morning, [12,18) afternoon,
    /// [18,23) evening, anything else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=17 => Self::Afternoon,
            18..=22 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flattened, analysis-ready form of a post; one CSV row
///
/// Field order matches the output header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub post_id: String,
    pub post_link: String,
    pub text: String, // truncated
    pub date_time: String,
    pub author_id: u64,
    pub likes: u64,
    pub comments: u64,
    pub reposts: u64,
    pub hashtags: String,
    pub content_type: String,
    pub text_length: usize, // untruncated, in characters
    pub time_of_day: TimeOfDay,
}
