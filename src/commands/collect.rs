use anyhow::{Context, Result};

use vkwall::config::Config;
use vkwall::crawler::{Collector, GroupOutcome};

pub async fn collect(config: Config) -> Result<()> {
    if config.collector.group_ids.is_empty() {
        println!("No communities configured. Pass --group <id> or set VKWALL_GROUP_IDS.");
        return Ok(());
    }

    println!("Starting VK wall collection");
    println!("===========================");
    println!("Communities: {}", config.collector.group_ids.len());
    println!("Posts per community: {}", config.collector.posts_per_group);

    let collector = Collector::new(config).context("Invalid configuration")?;
    let report = collector
        .run()
        .await
        .context("Failed to open output file")?;

    println!("\nCollection Summary");
    println!("==================");
    for outcome in &report.outcomes {
        match outcome {
            GroupOutcome::Collected { group_id, posts } => {
                println!("  {group_id}: {posts} posts");
            }
            GroupOutcome::Empty { group_id } => {
                println!("  {group_id}: no posts found");
            }
            GroupOutcome::Failed { group_id, reason } => {
                println!("  {group_id}: failed ({reason})");
            }
        }
    }
    println!();
    println!("Collected: {}", report.collected().count());
    println!("Empty: {}", report.empty().count());
    println!("Failed: {}", report.failed().count());
    println!("Total posts: {}", report.total_posts());
    println!("Results saved to '{}'", report.output.display());

    Ok(())
}
