use tracing::debug;

use super::Verb;

const COMMENT_PREFIX: char = '#';

/// Drops every line that is not a recognized command.
pub struct CommandFilter;

impl CommandFilter {
    pub fn accepted<I, S>(lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| {
                let line = line.as_ref().trim();
                if Self::is_runnable(line) {
                    Some(line.to_string())
                } else {
                    if !line.is_empty() {
                        debug!("Skipping line: {:?}", line);
                    }
                    None
                }
            })
            .collect()
    }

    fn is_runnable(line: &str) -> bool {
        match line.split_whitespace().next() {
            Some(keyword) => {
                !keyword.starts_with(COMMENT_PREFIX) && Verb::from_keyword(keyword).is_some()
            }
            None => false,
        }
    }
}
