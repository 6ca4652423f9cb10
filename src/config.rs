//! Startup configuration.
//!
//! Settings are resolved once, from command-line flags falling back to
//! environment variables and then to defaults, and never change afterwards.

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Path of the prediction endpoint relative to the API base address.
pub const PREDICT_PATH: &str = "/predict";

/// Command-line interface.
#[derive(Debug, Parser)]
#[command(name = "heartwatch", version, about = "Heart-disease prediction client")]
pub struct Cli {
    /// Base address of the prediction API (e.g. http://127.0.0.1:8000)
    #[arg(long, env = "HEARTWATCH_API_URL")]
    pub api_url: Option<String>,

    /// Reject a new submission while another request is still pending
    ///
    /// From the environment, any value except 0, false, no, off or empty enables it.
    #[arg(
        long,
        env = "HEARTWATCH_SINGLE_FLIGHT",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub single_flight: bool,

    /// Where log output goes
    #[arg(long, env = "HEARTWATCH_LOG_MODE", value_enum, default_value_t = LogMode::Auto)]
    pub log_mode: LogMode,

    /// Log file used when logging to a file
    #[arg(long, env = "HEARTWATCH_LOG_FILE", default_value = "heartwatch.log")]
    pub log_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a single prediction and print the log entry as JSON
    Predict {
        /// Field assignment, e.g. --set Age=55 --set ST_Slope=Up
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },
}

/// Log sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogMode {
    /// File when attached to a terminal, stderr otherwise
    Auto,
    File,
    Stderr,
}

/// Resolved, immutable settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// API base address without trailing slash (may be empty)
    pub api_base: String,
    pub single_flight: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            single_flight: false,
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("heartwatch.log"),
        }
    }
}

impl Settings {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            api_base: normalize_base(cli.api_url.as_deref().unwrap_or_default()),
            single_flight: cli.single_flight,
            log_mode: cli.log_mode,
            log_file: cli.log_file.clone(),
        }
    }

    /// Settings pointing at the given base address, everything else default.
    #[must_use]
    pub fn with_api_base(base: &str) -> Self {
        Self {
            api_base: normalize_base(base),
            ..Self::default()
        }
    }

    /// Full address of the prediction endpoint.
    #[must_use]
    pub fn predict_url(&self) -> String {
        format!("{}{}", self.api_base, PREDICT_PATH)
    }
}

/// Strip surrounding whitespace and trailing slashes from a base address.
#[must_use]
pub fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got {raw:?}"))
}
