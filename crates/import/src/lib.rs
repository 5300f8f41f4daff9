// ABOUTME: Turns a podcast RSS feed into markdown episode files for an IndieCaster site.
// ABOUTME: Also reconciles the placeholder host on imported episodes once real hosts exist.

pub mod config;
pub mod content_file;
pub mod duration;
pub mod episode;
pub mod error;
pub mod frontmatter;
pub mod hosts;
pub mod importer;
pub mod sanitize;
pub mod slug;
pub mod source;

pub use config::{
    ImportConfig, ImportConfigBuilder, ImportOptions, DEFAULT_ARTWORK_DIR, DEFAULT_CONTENT_DIR,
    PLACEHOLDER_HOST,
};
pub use content_file::{render_episode, write_episode, RenderContext, WriteOutcome};
pub use duration::normalize_duration;
pub use episode::{extract_episode, EpisodeRecord, ExtractOptions};
pub use error::{ImportError, Result};
pub use frontmatter::EpisodeDocument;
pub use hosts::{reassign_hosts, HostReport};
pub use importer::{ImportReport, Importer, ItemFailure};
pub use sanitize::sanitize_description;
pub use slug::slugify;
pub use source::FeedSource;
