mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use vkwall::config::Config;

#[derive(Parser)]
#[command(
    name = "vkwall",
    version,
    about = "Collect VK community wall posts into an analysis-ready CSV",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file (environment variables are used otherwise)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect wall posts from the configured communities
    Collect {
        /// Community id to collect (repeatable, replaces configured ids)
        #[arg(short, long = "group")]
        groups: Vec<u64>,

        /// Post quota per community
        #[arg(short, long)]
        posts: Option<usize>,

        /// Pause between page requests in seconds
        #[arg(long)]
        pause: Option<f64>,

        /// Output CSV path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the content-type tag for an ad-hoc post
    Classify {
        /// Post text
        #[arg(short, long, default_value = "")]
        text: String,

        /// Attachment type (repeatable)
        #[arg(short, long = "attachment")]
        attachments: Vec<String>,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::from_env(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    let _guard = vkwall::logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Collect {
            groups,
            posts,
            pause,
            output,
        } => {
            if !groups.is_empty() {
                config.collector.group_ids = groups;
            }
            if let Some(posts) = posts {
                config.collector.posts_per_group = posts;
            }
            if let Some(pause) = pause {
                config.collector.pause_secs = pause;
            }
            if let Some(output) = output {
                config.output.path = output;
            }

            tracing::info!(
                groups = ?config.collector.group_ids,
                posts_per_group = config.collector.posts_per_group,
                pause_secs = config.collector.pause_secs,
                output = %config.output.path.display(),
                "Starting collect command"
            );
            commands::collect(config).await?;
        }

        Commands::Classify { text, attachments } => {
            commands::classify(&text, &attachments);
        }
    }

    Ok(())
}
