use std::path::{Path, PathBuf};

use compio::fs;
use snafu::prelude::*;
use tracing::debug;

use crate::ext::BestEffortPathExt;

/// Raw lines of a command file.
#[derive(Debug, Clone, Default)]
pub struct CommandSource {
    lines: Vec<String>,
}

impl CommandSource {
    pub async fn read(path: &Path) -> Result<Self, CommandSourceError> {
        debug!("Reading commands from {}", path.best_effort_path_display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.to_path_buf(),
        })?;
        debug!("Read {} bytes of commands", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.to_path_buf(),
        })?;

        Ok(contents.as_str().into())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl From<&str> for CommandSource {
    fn from(contents: &str) -> Self {
        let contents = contents.trim();
        if contents.is_empty() {
            return Self::default();
        }
        Self {
            lines: contents.lines().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum CommandSourceError {
    #[snafu(display("Failed to read the command file: {}", file_path.best_effort_path_display()))]
    Read {
        file_path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Command file {} is not valid UTF-8", file_path.best_effort_path_display()))]
    Encoding {
        file_path: PathBuf,
        source: std::string::FromUtf8Error,
    },
}
