use derive_more::Display;
use snafu::prelude::*;
use tracing::warn;

use crate::directory::{DirectoryPath, DirectoryPathError};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    #[display("CREATE")]
    Create,
    #[display("MOVE")]
    Move,
    #[display("DELETE")]
    Delete,
    #[display("LIST")]
    List,
}

impl Verb {
    /// Exact, case-sensitive match on the command keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "CREATE" => Some(Verb::Create),
            "MOVE" => Some(Verb::Move),
            "DELETE" => Some(Verb::Delete),
            "LIST" => Some(Verb::List),
            _ => None,
        }
    }

    fn arity(&self) -> usize {
        match self {
            Verb::Create | Verb::Delete => 1,
            Verb::Move => 2,
            Verb::List => 0,
        }
    }
}

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { path: DirectoryPath },
    Move { source: DirectoryPath, dest: DirectoryPath },
    Delete { path: DirectoryPath },
    List,
}

impl Command {
    /// Parses `VERB [arg1] [arg2]`.
    ///
    /// A keyword that is not a known verb is treated as `LIST`.
    pub fn parse(line: &str) -> Result<Self, CommandParseError> {
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().context(EmptyLineSnafu)?;
        let args = tokens.collect::<Vec<_>>();

        let Some(verb) = Verb::from_keyword(keyword) else {
            warn!("Unrecognized command '{}', falling back to LIST", keyword);
            return Ok(Command::List);
        };

        ensure!(
            args.len() == verb.arity(),
            ArgumentCountSnafu {
                verb,
                expected: verb.arity(),
                found: args.len(),
            }
        );

        let path = |index: usize| {
            DirectoryPath::parse(args[index]).context(InvalidPathSnafu {
                verb,
                argument: args[index],
            })
        };

        let command = match verb {
            Verb::Create => Command::Create { path: path(0)? },
            Verb::Move => Command::Move {
                source: path(0)?,
                dest: path(1)?,
            },
            Verb::Delete => Command::Delete { path: path(0)? },
            Verb::List => Command::List,
        };

        Ok(command)
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum CommandParseError {
    #[snafu(display("line is empty"))]
    EmptyLine,
    #[snafu(display("{} expects {} argument(s), got {}", verb, expected, found))]
    ArgumentCount {
        verb: Verb,
        expected: usize,
        found: usize,
    },
    #[snafu(display("{} argument '{}' is not a valid path: {}", verb, argument, source))]
    InvalidPath {
        verb: Verb,
        argument: String,
        source: DirectoryPathError,
    },
}
