use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub commands_file: PathBuf,
    pub settings_file: Option<PathBuf>,
    /// Whether colored output is allowed at all; the terminal still has to
    /// support it.
    pub color: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            commands_file: cli.commands_file,
            settings_file: cli.settings,
            color: !cli.no_color,
        }
    }
}
