use std::path::PathBuf;

use clap::Parser;
use tubewatch_engine::{DEFAULT_API_BASE, MAX_PAGE_SIZE};

/// Watches playlists for new uploads and runs the configured rule actions.
#[derive(Parser, Debug)]
#[command(name = "tubewatch", version, about)]
pub struct Cli {
    /// Path to the channel config file. Rewritten in place after the run.
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Log at debug level.
    #[arg(long)]
    pub debug: bool,

    /// OAuth access token for the platform API.
    #[arg(long, env = "TUBEWATCH_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Base URL of the platform API.
    #[arg(long, env = "TUBEWATCH_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Items requested per listing page.
    #[arg(
        long,
        default_value_t = MAX_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=MAX_PAGE_SIZE as i64)
    )]
    pub page_size: u32,

    /// Log the actions that would run without calling the platform.
    #[arg(long)]
    pub dry_run: bool,

    /// Advance each watermark to the newest scanned item, matched or not.
    #[arg(long)]
    pub advance_to_newest: bool,

    /// Also write the log to this file.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
