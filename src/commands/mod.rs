//! Everything between the command file on disk and a parsed [`Command`].

mod command;
mod filter;
mod source;

pub use command::{Command, Verb};
pub use filter::CommandFilter;
pub use source::{CommandSource, CommandSourceError};
