// ABOUTME: Error type for turning raw bytes into a Feed.
// ABOUTME: Both variants are fatal for an import run; item-level problems never surface here.

use feed_rs::parser::ParseFeedError;
use thiserror::Error;

/// Errors that can occur during feed parsing.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Nothing but whitespace was supplied.
    #[error("feed document is empty")]
    EmptyDocument,

    /// feed-rs could not read the document as RSS, Atom or JSON Feed.
    #[error("not a readable RSS/Atom feed: {0}")]
    Parse(String),
}

impl From<ParseFeedError> for FeedError {
    fn from(err: ParseFeedError) -> Self {
        FeedError::Parse(err.to_string())
    }
}
