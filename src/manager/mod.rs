//! Turns accepted command lines into tree mutations and a transcript.

mod manager;
mod transcript;

pub use manager::DirectoryManager;
pub use transcript::{Transcript, TranscriptEntry};
