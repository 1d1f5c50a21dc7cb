use std::{fmt, io};

use colored::Colorize;

/// What a single command produced besides its echo line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Rendered tree, trailing whitespace already trimmed.
    Listing(String),
    /// A reported, non-fatal failure.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub echo: String,
    pub outcome: Outcome,
}

impl TranscriptEntry {
    pub fn done(echo: impl Into<String>) -> Self {
        Self {
            echo: echo.into(),
            outcome: Outcome::Done,
        }
    }

    pub fn listing(echo: impl Into<String>, listing: impl Into<String>) -> Self {
        Self {
            echo: echo.into(),
            outcome: Outcome::Listing(listing.into()),
        }
    }

    pub fn failed(echo: impl Into<String>, report: impl Into<String>) -> Self {
        Self {
            echo: echo.into(),
            outcome: Outcome::Failed(report.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }

    fn write_colored(&self, out: &mut impl io::Write, color: bool) -> io::Result<()> {
        match &self.outcome {
            Outcome::Failed(report) if color => {
                write!(out, "{}\n{}", self.echo, report.red())
            }
            _ => write!(out, "{self}"),
        }
    }
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.echo)?;
        match &self.outcome {
            Outcome::Done => Ok(()),
            Outcome::Listing(listing) if listing.is_empty() => Ok(()),
            Outcome::Listing(text) | Outcome::Failed(text) => write!(f, "\n{text}"),
        }
    }
}

/// Output of a whole run, in command order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    empty_message: String,
}

impl Transcript {
    pub fn new(entries: Vec<TranscriptEntry>, empty_message: impl Into<String>) -> Self {
        Self {
            entries,
            empty_message: empty_message.into(),
        }
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn failures(&self) -> usize {
        self.entries.iter().filter(|e| e.is_failure()).count()
    }

    /// Writes the transcript followed by a newline, highlighting failure
    /// reports when `color` is set.
    pub fn write_to(&self, out: &mut impl io::Write, color: bool) -> io::Result<()> {
        if self.entries.is_empty() {
            return writeln!(out, "{}", self.empty_message);
        }
        for entry in &self.entries {
            entry.write_colored(out, color)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str(&self.empty_message);
        }
        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
