//! Common test utilities

use serde_json::{json, Value};
use std::path::Path;
use vkwall::config::Config;

/// 2024-01-15T06:30:00Z
pub const MORNING_TS: i64 = 1_705_300_200;

/// Configuration pointed at a mock server, with pacing delays disabled
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.access_token = "test-token".to_string();
    config.api.version = "5.199".to_string();
    config.api.base_url = base_url.to_string();
    config.collector.pause_secs = 0.0;
    config.collector.rate_limit_backoff_secs = 0;
    config
}

/// Configuration writing to `output`
#[allow(dead_code)]
pub fn test_config_with_output(base_url: &str, output: &Path) -> Config {
    let mut config = test_config(base_url);
    config.output.path = output.to_path_buf();
    config
}

/// A single wall post item
pub fn post_item(id: i64) -> Value {
    json!({
        "id": id,
        "from_id": -1,
        "owner_id": -1,
        "date": MORNING_TS,
        "text": format!("Post number {id} #news"),
        "likes": {"count": 3, "user_likes": 0},
        "comments": {"count": 1},
        "reposts": {"count": 0},
        "attachments": [{"type": "photo", "photo": {"id": id}}]
    })
}

/// A successful `wall.get` body with `n` posts, ids counting down from `first_id`
pub fn wall_page(first_id: i64, n: usize) -> Value {
    let items: Vec<Value> = (0..n as i64).map(|i| post_item(first_id - i)).collect();
    json!({"response": {"count": 10_000, "items": items}})
}

/// An error `wall.get` body
#[allow(dead_code)]
pub fn api_error(code: i64, message: &str) -> Value {
    json!({"error": {"error_code": code, "error_msg": message, "request_params": []}})
}
