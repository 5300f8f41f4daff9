// ABOUTME: Feed parsing library for the IndieCaster importer.
// ABOUTME: Reads RSS/Atom podcast feeds into raw models and parses loosely formatted dates.

pub mod error;
pub mod models;
pub mod parser;
pub mod podcast_ext;
pub mod time_parse;

pub use error::FeedError;
pub use models::{Enclosure, Feed, FeedItem, FeedKind, ItemPodcastExt};
pub use parser::parse_feed_bytes;
pub use time_parse::parse_flexible_time;
