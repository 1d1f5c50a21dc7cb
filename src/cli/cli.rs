use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Simulates a directory tree driven by CREATE, MOVE, DELETE and LIST commands.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// File with one command per line
    pub commands_file: PathBuf,
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// YAML file with listing and message settings
    #[clap(long, short)]
    pub settings: Option<PathBuf>,

    /// Never color failure reports
    #[clap(long)]
    pub no_color: bool,
}
