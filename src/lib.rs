//! vkwall - VK community wall collector
//!
//! Retrieves public wall posts for a list of communities, classifies each
//! post's content composition, and writes one flattened record per post to a
//! CSV file.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Paginated `wall.get` fetching with rate-limit backoff
//! - [`logging`] - Tracing subscriber with a size-rotated log file
//! - [`parser`] - Content-type classification and field derivation
//! - [`models`] - Core data structures and types
//! - [`storage`] - CSV output sink
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use vkwall::config::Config;
//! use vkwall::crawler::Collector;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let collector = Collector::new(config)?;
//!     let report = collector.run().await?;
//!     println!("{} posts written", report.total_posts());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod logging;
pub mod models;
pub mod parser;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::crawler::{CollectionReport, Collector, GroupOutcome, WallFetcher};
    pub use crate::error::{Error, ErrorCategory, Result, VkwallErrorTrait};
    pub use crate::models::{NormalizedRecord, RawPost, TimeOfDay};
    pub use crate::parser::{determine_content_type, extract_post_data};
    pub use crate::storage::CsvSink;
}

// Direct re-exports for convenience
pub use models::{NormalizedRecord, RawPost, TimeOfDay};
