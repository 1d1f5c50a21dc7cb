use snafu::Snafu;
use tracing::{debug, info, warn};

use crate::commands::{Command, CommandFilter, Verb};
use crate::config::Settings;
use crate::directory::{DirectoryPath, DirectoryTree, Lookup, NodeId, TreeError};
use crate::manager::{Transcript, TranscriptEntry};

/// Owns the tree and runs commands against it, one at a time.
pub struct DirectoryManager {
    commands: Vec<String>,
    tree: DirectoryTree,
    settings: Settings,
}

impl DirectoryManager {
    /// Keeps only the runnable lines of `commands`.
    pub fn new<I, S>(commands: I, settings: Settings) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let commands = CommandFilter::accepted(commands);
        debug!("Accepted {} commands", commands.len());

        Self {
            commands,
            tree: DirectoryTree::new(),
            settings,
        }
    }

    #[cfg(test)]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    #[cfg(test)]
    pub fn tree(&self) -> &DirectoryTree {
        &self.tree
    }

    /// Executes every accepted command in order.
    pub fn run(&mut self) -> Transcript {
        let commands = self.commands.clone();
        let entries = commands
            .iter()
            .map(|line| self.execute(line))
            .collect::<Vec<_>>();

        let transcript = Transcript::new(entries, self.settings.no_commands_message.as_str());
        info!(
            "Ran {} commands, {} reported failures, {} directories left",
            transcript.entries().len(),
            transcript.failures(),
            self.tree.len() - 1
        );
        transcript
    }

    /// Executes one command line. Failures are reported in the returned entry
    /// and leave the tree untouched.
    pub fn execute(&mut self, line: &str) -> TranscriptEntry {
        debug!("Executing '{}'", line);
        match Command::parse(line) {
            Ok(Command::Create { path }) => self.create(&path),
            Ok(Command::Move { source, dest }) => self.move_directory(&source, &dest),
            Ok(Command::Delete { path }) => self.delete(&path),
            Ok(Command::List) => self.list(),
            Err(e) => {
                warn!("Invalid command '{}': {}", line, e);
                TranscriptEntry::failed(line, format!("Invalid command {line} - {e}"))
            }
        }
    }

    fn create(&mut self, path: &DirectoryPath) -> TranscriptEntry {
        let echo = format!("{} {}", Verb::Create, path);

        let mut current = self.tree.root();
        for segment in path.segments() {
            current = match self.tree.add(segment, current) {
                Ok(node) => node,
                Err(e) => {
                    warn!("Failed to create '{}': {}", path, e);
                    return TranscriptEntry::failed(echo, format!("Cannot create {path} - {e}"));
                }
            };
        }

        TranscriptEntry::done(echo)
    }

    fn move_directory(&mut self, source: &DirectoryPath, dest: &DirectoryPath) -> TranscriptEntry {
        let echo = format!("{} {} {}", Verb::Move, source, dest);
        let fail = |reason: String| {
            warn!("Failed to move '{}' to '{}': {}", source, dest, reason);
            TranscriptEntry::failed(echo.clone(), format!("Cannot move {source} {dest} - {reason}"))
        };

        let resolved = self
            .resolve(source)
            .and_then(|source_node| Ok((source_node, self.resolve(dest)?)));
        let (source_node, dest_node) = match resolved {
            Ok(nodes) => nodes,
            Err(e) => return fail(e.to_string()),
        };

        match self.tree.move_node(source_node, dest_node) {
            Ok(()) => TranscriptEntry::done(echo.clone()),
            Err(TreeError::Cycle { .. }) => fail(format!("{dest} is inside {source}")),
            Err(TreeError::NameTaken { name }) => fail(format!("{dest} already contains {name}")),
            Err(e) => fail(e.to_string()),
        }
    }

    fn delete(&mut self, path: &DirectoryPath) -> TranscriptEntry {
        let echo = format!("{} {}", Verb::Delete, path);

        let deleted = self
            .resolve(path)
            .map_err(|e| e.to_string())
            .and_then(|node| self.tree.delete(node).map_err(|e| e.to_string()));

        match deleted {
            Ok(()) => TranscriptEntry::done(echo),
            Err(reason) => {
                warn!("Failed to delete '{}': {}", path, reason);
                TranscriptEntry::failed(echo, format!("Cannot delete {path} - {reason}"))
            }
        }
    }

    fn list(&self) -> TranscriptEntry {
        let rendered = self
            .tree
            .render(self.tree.root(), 0, self.settings.indent);
        TranscriptEntry::listing(Verb::List.to_string(), rendered.trim_end())
    }

    /// Walks `path` from the root one segment at a time.
    pub fn resolve(&self, path: &DirectoryPath) -> Result<NodeId, ResolveError> {
        path.segments()
            .try_fold(self.tree.root(), |current, segment| {
                match self.tree.lookup(segment, current) {
                    Some(Lookup { node, parent }) => {
                        debug!("Found '{}' as {} under {}", segment, node, parent);
                        Ok(node)
                    }
                    None => {
                        debug!("'{}' does not exist under {}", segment, current);
                        Err(ResolveError {
                            segment: segment.to_string(),
                        })
                    }
                }
            })
    }
}

/// A path segment that does not exist at its position in the tree.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(display("{} does not exist", segment))]
pub struct ResolveError {
    pub segment: String,
}
