use std::io::{self, Write};

use snafu::Snafu;
use snafu::prelude::*;
use supports_color::Stream;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::commands::{CommandSource, CommandSourceError};
use crate::config::{Settings, SettingsError};
use crate::manager::DirectoryManager;

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();

        let settings = match &app_config.settings_file {
            Some(path) => Settings::read(path).await.context(SettingsSnafu)?,
            None => Settings::default(),
        };
        debug!("Using settings: {:?}", settings);

        let source = CommandSource::read(&app_config.commands_file)
            .await
            .context(CommandSourceSnafu)?;
        info!("Loaded {} command lines", source.lines().len());

        let transcript = DirectoryManager::new(source.into_lines(), settings).run();

        let color = app_config.color && supports_color::on(Stream::Stdout).is_some();
        colored::control::set_override(color);

        let mut stdout = io::stdout().lock();
        transcript
            .write_to(&mut stdout, color)
            .and_then(|()| stdout.flush())
            .context(OutputSnafu)?;

        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading settings"))]
    SettingsError { source: SettingsError },
    #[snafu(display("Critical failure encountered while loading commands"))]
    CommandSourceError { source: CommandSourceError },
    #[snafu(display("Failed to write the transcript"))]
    OutputError { source: io::Error },
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::NamedTempFile;

    use super::*;

    fn config(commands_file: PathBuf, settings_file: Option<PathBuf>) -> RuntimeConfig {
        RuntimeConfig {
            commands_file,
            settings_file,
            color: false,
        }
    }

    #[compio::test]
    async fn runs_a_command_file() {
        let mut commands = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(commands, "CREATE src\nCREATE src/app\nLIST").expect("Failed to write commands");

        let result = Application::run(config(commands.path().to_path_buf(), None)).await;

        assert!(result.is_ok());
    }

    #[compio::test]
    async fn missing_command_file_is_fatal() {
        let result = Application::run(config(PathBuf::from("no/such/commands.txt"), None)).await;

        assert!(matches!(
            result,
            Err(ApplicationError::CommandSourceError { .. })
        ));
    }

    #[compio::test]
    async fn broken_settings_file_is_fatal() {
        let commands = NamedTempFile::new().expect("Failed to create temp file");
        let mut settings = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(settings, "- not\n- a map").expect("Failed to write settings");

        let result = Application::run(config(
            commands.path().to_path_buf(),
            Some(settings.path().to_path_buf()),
        ))
        .await;

        assert!(matches!(result, Err(ApplicationError::SettingsError { .. })));
    }
}
