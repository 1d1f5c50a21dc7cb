use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::ext::BestEffortPathExt;

pub const DEFAULT_INDENT: usize = 2;
pub const MAX_INDENT: usize = 16;
pub const DEFAULT_NO_COMMANDS_MESSAGE: &str = "No commands to run, bye...";

/// Presentation settings, optionally loaded from a YAML file:
///
/// ```yaml
/// listing:
///   indent: 2
/// no_commands_message: "No commands to run, bye..."
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Spaces added per nesting level in a listing.
    pub indent: usize,
    /// Transcript printed when there is nothing to run.
    pub no_commands_message: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            no_commands_message: DEFAULT_NO_COMMANDS_MESSAGE.to_string(),
        }
    }
}

fn key(name: &'static str) -> Yaml<'static> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

impl Settings {
    pub async fn read(path: &Path) -> Result<Self, SettingsError> {
        debug!("Reading settings from {}", path.best_effort_path_display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.to_path_buf(),
        })?;
        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.to_path_buf(),
        })?;

        contents.as_str().try_into()
    }

    fn parse_listing(&mut self, top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<(), SettingsError> {
        let Some(listing) = top_level.get(&key("listing")) else {
            return Ok(());
        };
        let listing = listing.as_mapping().context(ListingNotMapSnafu)?;

        if let Some(indent) = listing.get(&key("indent")) {
            self.indent = match indent {
                Yaml::Value(Scalar::Integer(n)) => usize::try_from(*n)
                    .ok()
                    .filter(|indent| *indent <= MAX_INDENT)
                    .context(InvalidIndentSnafu)?,
                _ => return InvalidIndentSnafu.fail(),
            };
        }

        Ok(())
    }

    fn parse_no_commands_message(
        &mut self,
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<(), SettingsError> {
        if let Some(message) = top_level.get(&key("no_commands_message")) {
            self.no_commands_message = message
                .as_str()
                .context(InvalidMessageSnafu)?
                .to_string();
        }

        Ok(())
    }
}

impl TryFrom<&str> for Settings {
    type Error = SettingsError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedSettingsSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let mut settings = Settings::default();
        settings.parse_listing(top_level)?;
        settings.parse_no_commands_message(top_level)?;
        debug!("Parsed settings: {:?}", settings);

        Ok(settings)
    }
}

#[derive(Debug, Snafu)]
pub enum SettingsError {
    #[snafu(display("Failed to read the settings file: {}", file_path.best_effort_path_display()))]
    Read {
        file_path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Settings file {} is not valid UTF-8", file_path.best_effort_path_display()))]
    Encoding {
        file_path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the settings file"))]
    Parse { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted settings file"))]
    MalformedSettings,
    #[snafu(display("Top level of settings should be a map"))]
    TopLevelNotMap,
    #[snafu(display("The listing section should be a map"))]
    ListingNotMap,
    #[snafu(display("listing.indent should be an integer between 0 and {}", MAX_INDENT))]
    InvalidIndent,
    #[snafu(display("no_commands_message should be a string"))]
    InvalidMessage,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    fn parse(contents: &str) -> Result<Settings, SettingsError> {
        contents.try_into()
    }

    #[test]
    fn reads_every_setting() {
        let settings = parse("listing:\n  indent: 4\nno_commands_message: nothing to do\n").unwrap();
        assert_eq!(
            settings,
            Settings {
                indent: 4,
                no_commands_message: "nothing to do".into(),
            }
        );
    }

    #[test]
    fn accepts_indent_bounds() {
        assert_eq!(parse("listing:\n  indent: 0").unwrap().indent, 0);
        assert_eq!(parse("listing:\n  indent: 16").unwrap().indent, MAX_INDENT);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        assert_eq!(parse("other: value").unwrap(), Settings::default());
        assert_eq!(parse("listing: {}").unwrap(), Settings::default());
    }

    #[test]
    fn empty_document_is_malformed() {
        assert!(matches!(parse(""), Err(SettingsError::MalformedSettings)));
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        assert!(matches!(
            parse("listing: [unclosed"),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[rstest]
    #[case("- item1\n- item2")]
    #[case("just a string")]
    fn top_level_must_be_a_map(#[case] contents: &str) {
        assert!(matches!(parse(contents), Err(SettingsError::TopLevelNotMap)));
    }

    #[test]
    fn listing_must_be_a_map() {
        assert!(matches!(
            parse("listing: 4"),
            Err(SettingsError::ListingNotMap)
        ));
    }

    #[rstest]
    #[case("listing:\n  indent: -1")]
    #[case("listing:\n  indent: wide")]
    #[case("listing:\n  indent: 1.5")]
    #[case("listing:\n  indent: 17")]
    #[case("listing:\n  indent: 9223372036854775807")]
    fn indent_must_be_a_small_non_negative_integer(#[case] contents: &str) {
        assert!(matches!(parse(contents), Err(SettingsError::InvalidIndent)));
    }

    #[test]
    fn message_must_be_a_string() {
        assert!(matches!(
            parse("no_commands_message: [a, b]"),
            Err(SettingsError::InvalidMessage)
        ));
    }

    #[compio::test]
    async fn reads_settings_from_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "listing:\n  indent: 3").expect("Failed to write settings");

        let settings = Settings::read(file.path())
            .await
            .expect("Failed to read settings");

        assert_eq!(settings.indent, 3);
    }

    #[compio::test]
    async fn missing_file_is_a_read_error() {
        let result = Settings::read(Path::new("nonexistent.yaml")).await;
        assert!(matches!(result, Err(SettingsError::Read { .. })));
    }
}
