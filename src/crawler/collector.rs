//! Per-community collection loop
//!
//! Communities are processed one at a time in configured order: fetch the
//! wall, derive a record per post, append the records to the shared sink.
//! A failing community is logged and reported, never fatal to the run.

use std::fs::File;
use std::path::PathBuf;
use tracing::{error, info};

use crate::config::Config;
use crate::crawler::fetcher::WallFetcher;
use crate::error::{Result, VkwallErrorTrait};
use crate::parser::extract_post_data;
use crate::storage::CsvSink;
use crate::utils::error::StorageError;

/// Result of processing one community
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    /// Posts were fetched and written
    Collected { group_id: u64, posts: usize },

    /// The wall yielded no posts
    Empty { group_id: u64 },

    /// Processing failed; nothing more was written for this community
    Failed { group_id: u64, reason: String },
}

impl GroupOutcome {
    pub fn group_id(&self) -> u64 {
        match self {
            Self::Collected { group_id, .. }
            | Self::Empty { group_id }
            | Self::Failed { group_id, .. } => *group_id,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Summary of a whole run
#[derive(Debug, Clone)]
pub struct CollectionReport {
    /// Outcomes in processing order
    pub outcomes: Vec<GroupOutcome>,

    /// CSV file the records went to
    pub output: PathBuf,
}

impl CollectionReport {
    /// Total number of records written
    pub fn total_posts(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                GroupOutcome::Collected { posts, .. } => *posts,
                _ => 0,
            })
            .sum()
    }

    pub fn collected(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, GroupOutcome::Collected { .. }))
    }

    pub fn empty(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, GroupOutcome::Empty { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &GroupOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }
}

/// Sequential collector driving fetch, extraction, and output
pub struct Collector {
    config: Config,
    fetcher: WallFetcher,
}

impl Collector {
    /// Create a collector from a validated configuration
    pub fn new(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        let fetcher = WallFetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// Create a collector around a prepared fetcher
    pub fn with_fetcher(config: Config, fetcher: WallFetcher) -> Self {
        Self { config, fetcher }
    }

    /// Run the collection over every configured community
    ///
    /// # Errors
    ///
    /// Only failing to create the output file aborts the run; per-community
    /// failures are recorded in the report.
    pub async fn run(&self) -> std::result::Result<CollectionReport, StorageError> {
        let output = self.config.output.path.clone();
        let mut sink = CsvSink::create(&output)?;

        let mut outcomes = Vec::with_capacity(self.config.collector.group_ids.len());

        for &group_id in &self.config.collector.group_ids {
            info!(group_id, "Collecting posts");

            let outcome = match self.collect_group(group_id, &mut sink).await {
                Ok(0) => {
                    info!(group_id, "No posts found");
                    GroupOutcome::Empty { group_id }
                }
                Ok(posts) => {
                    info!(group_id, posts, "Community collection finished");
                    GroupOutcome::Collected { group_id, posts }
                }
                Err(e) => {
                    error!(
                        group_id,
                        category = %e.category(),
                        error = %e,
                        "Failed to process community"
                    );
                    GroupOutcome::Failed {
                        group_id,
                        reason: e.to_string(),
                    }
                }
            };

            outcomes.push(outcome);
        }

        let report = CollectionReport { outcomes, output };

        info!(
            communities = report.outcomes.len(),
            posts = report.total_posts(),
            failed = report.failed().count(),
            output = %report.output.display(),
            "Collection finished"
        );

        Ok(report)
    }

    async fn collect_group(&self, group_id: u64, sink: &mut CsvSink<File>) -> Result<usize> {
        let posts = self
            .fetcher
            .fetch_posts(group_id, self.config.collector.posts_per_group)
            .await?;

        let records: Vec<_> = posts
            .iter()
            .map(|post| extract_post_data(post, group_id))
            .collect();

        let written = sink.write_all(&records)?;
        sink.flush()?;

        Ok(written)
    }
}
