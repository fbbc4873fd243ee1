//! Command-line interface definition.

use clap::Parser;
use easyslip_node::config::{default_config_path, AppConfig};
use std::path::PathBuf;

/// Verify bank and TrueMoney wallet slips with EasySlip and route the results.
#[derive(Parser, Debug)]
#[command(name = "easyslip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON file holding an array of items to verify.
    #[arg(long, short)]
    pub input: PathBuf,

    /// Write the routed outputs to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// EasySlip API access token.
    #[arg(long, env = "EASYSLIP_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: String,

    /// API base URL.
    #[arg(long, env = "EASYSLIP_BASE_URL")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "EASYSLIP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Record failing items as errors in the matched output and keep going.
    #[arg(long, env = "EASYSLIP_CONTINUE_ON_FAIL")]
    pub continue_on_fail: bool,

    /// Log level; overrides the config file.
    #[arg(long, env = "RUST_LOG")]
    pub log_level: Option<String>,

    /// Path to configuration file.
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Build the effective configuration: file values overridden by flags.
    ///
    /// Without `--config`, the platform default path is used when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be loaded.
    pub fn to_config(&self) -> color_eyre::Result<AppConfig> {
        let path = self
            .config
            .clone()
            .or_else(|| default_config_path().filter(|path| path.exists()));

        let mut config = match path {
            Some(path) => AppConfig::from_file(&path)?,
            None => AppConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.api.base_url.clone_from(base_url);
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.api.timeout_secs = timeout_secs;
        }
        config.continue_on_fail |= self.continue_on_fail;
        if let Some(log_level) = &self.log_level {
            config.log_level.clone_from(log_level);
        }

        Ok(config)
    }
}
