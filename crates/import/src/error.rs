// ABOUTME: Error types for importing feeds and rewriting episode files.
// ABOUTME: Fetch/Read/Feed abort a run; EmptySlug/Write are per-item and only counted.

use std::io;
use std::path::PathBuf;

use indiecaster_feed::FeedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    /// The feed URL could not be fetched (network failure or non-2xx status).
    #[error("could not fetch feed from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A local feed file could not be read.
    #[error("could not read feed file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Feed(#[from] FeedError),

    /// The episode title has no characters a slug can be built from.
    #[error("title {title:?} does not produce a usable file name")]
    EmptySlug { title: String },

    #[error("could not write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An episode file has no `---` fenced frontmatter block.
    #[error("{} has no frontmatter block", path.display())]
    Frontmatter { path: PathBuf },

    #[error("invalid frontmatter in {}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ImportError {
    /// True for errors that end the whole run rather than a single item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ImportError::Fetch { .. } | ImportError::Read { .. } | ImportError::Feed(_)
        )
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ImportError::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ImportError> = std::result::Result<T, E>;
