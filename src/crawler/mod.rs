//! Wall collection with pagination and rate-limit handling
//!
//! This module implements the fetch side of the collector: single page
//! requests against `wall.get`, the pagination loop around them, and the
//! per-community orchestration that feeds the output sink.

pub mod collector;
pub mod fetcher;
pub mod wall;

pub use collector::{CollectionReport, Collector, GroupOutcome};
pub use fetcher::{PageResponse, WallFetcher};
pub use wall::PAGE_MAX;
