//! CLI command definitions

use clap::{Parser, ValueEnum};
use roundtable_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for `--show` and `--list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliOutputFormat {
    /// Human-readable transcript
    Text,
    /// JSON document
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(format: CliOutputFormat) -> Self {
        match format {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Moderate a meeting of AI participants")]
#[command(long_about = r#"
Roundtable runs a meeting between you (the moderator) and a roster of AI
participants. Each message you send opens a round:

1. Relevance: every participant says whether it has something to add
2. Turns: those who do speak one after another, by priority
3. Notes: the round is summarized and saved

Press Ctrl-C during a round to interrupt it; turns already given are kept.

Configuration files are loaded from (in priority order):
1. ROUNDTABLE_* environment variables
2. --config <path>          Explicit config file
3. ./roundtable.toml        Project-level config
4. ~/.config/roundtable/config.toml   Global config

Example:
  roundtable --title "Q3 planning"
  roundtable --list
  roundtable --resume meeting_20250307_140509
  roundtable --show meeting_20250307_140509 --output json
"#)]
pub struct Cli {
    /// Title of the new meeting (overrides [meeting] title)
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Maximum turns per round (overrides [meeting] max_turns_per_round)
    #[arg(long, value_name = "N")]
    pub max_turns: Option<u64>,

    /// Continue a saved meeting
    #[arg(long, value_name = "ID", conflicts_with_all = ["list", "show", "delete"])]
    pub resume: Option<String>,

    /// List saved meetings and exit
    #[arg(long, conflicts_with_all = ["show", "delete"])]
    pub list: bool,

    /// Print a saved meeting's transcript and exit
    #[arg(long, value_name = "ID", conflicts_with = "delete")]
    pub show: Option<String>,

    /// Delete a saved meeting and exit
    #[arg(long, value_name = "ID")]
    pub delete: Option<String>,

    /// Output format for --show and --list
    #[arg(short, long, value_enum)]
    pub output: Option<CliOutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}
