use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone, PartialEq, Eq)]
#[command(name = "college-assistant")]
#[command(
    about = "Terminal chat assistant for college timetables, labs and rosters",
    long_about = "Terminal chat assistant for college timetables, labs and rosters\n\nConfig file loading:\n  - --config <path> (explicit file, overrides default path discovery)\n  - Default probe path when --config is not provided:\n    1. $XDG_CONFIG_HOME/college-assistant/config.toml\n    2. ~/.config/college-assistant/config.toml"
)]
pub struct CliArgs {
    /// Load config from this file path instead of the default discovery path.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Read and save the dataset at this path.
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Start with spoken replies turned off.
    #[arg(long)]
    pub no_speech: bool,
}
