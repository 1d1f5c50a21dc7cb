use std::fmt;

use snafu::Snafu;

const SEPARATOR: char = '/';

/// A `/`-separated path relative to the root, e.g. `foods/fruits/apples`.
///
/// Keeps the text it was parsed from so command echoes reproduce user input
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPath {
    raw: String,
    segments: Vec<String>,
}

impl DirectoryPath {
    pub fn parse(raw: &str) -> Result<Self, DirectoryPathError> {
        if raw.is_empty() {
            return Err(DirectoryPathError::Empty);
        }

        let segments = raw
            .split(SEPARATOR)
            .map(|segment| {
                if segment.is_empty() {
                    Err(DirectoryPathError::EmptySegment {
                        path: raw.to_string(),
                    })
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum DirectoryPathError {
    #[snafu(display("path is empty"))]
    Empty,
    #[snafu(display("path '{}' contains an empty segment", path))]
    EmptySegment { path: String },
}
