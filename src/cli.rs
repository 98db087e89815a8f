use crate::config::{default_config_path, Config};
use crate::contributions::history::DEFAULT_WINDOW;
use crate::fetch::{FetchOptions, Fetcher};
use crate::model::KeyGranularity;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ghbar")]
#[command(about = "GitHub contributions, pull requests and releases for menu-bar shells")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Path to the KEY=VALUE config file (default: .env next to the executable)")]
    pub config: Option<PathBuf>,

    #[arg(long, value_parser = humantime::parse_duration, help = "Per-request timeout, e.g. 10s (default: none)")]
    pub timeout: Option<Duration>,
}

impl CommonArgs {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    pub fn load_config(&self) -> Result<Config> {
        let path = self.config_path();
        let config = Config::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        if config.username.is_empty() {
            log::warn!("Missing User-Agent");
        }
        Ok(config)
    }

    pub fn fetcher(&self, config: &Config) -> Result<Fetcher> {
        Fetcher::new(FetchOptions::from_config(config, self.timeout))
            .context("Failed to build HTTP client")
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Contribution totals per user, with recent day-over-day changes
    Contributions {
        #[arg(help = "Comma-separated usernames (overrides CONTRIBUTION_USERS)")]
        users: Option<String>,

        #[arg(help = "`false` or `0` leaves the history file untouched")]
        write: Option<String>,

        #[arg(long, help = "Key snapshots by day instead of by minute")]
        daily: bool,

        #[arg(long, default_value_t = DEFAULT_WINDOW, help = "Number of snapshots used for trend lines")]
        window: usize,
    },
    /// Open pull requests of the configured repositories
    Pulls,
    /// Latest tag of the configured repositories
    Releases,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Contributions { users, write, daily, window } => {
                let granularity = if daily {
                    KeyGranularity::Daily
                } else {
                    KeyGranularity::Minute
                };
                crate::contributions::exec(self.common, users, write, granularity, window)
            }
            Commands::Pulls => crate::pulls::exec(self.common),
            Commands::Releases => crate::releases::exec(self.common),
        }
    }
}
