// ABOUTME: Site-level import configuration and per-run options.
// ABOUTME: ImportConfigBuilder gives a fluent way to point the importer at a site checkout.

use std::path::{Path, PathBuf};

/// Where episode markdown lives in a site checkout.
pub const DEFAULT_CONTENT_DIR: &str = "src/content/episodes";

/// Where operators drop local episode artwork.
pub const DEFAULT_ARTWORK_DIR: &str = "public/episode-artwork";

/// Host reference written into every imported episode until hosts are set up.
pub const PLACEHOLDER_HOST: &str = "main-host";

/// Settings that describe the site being imported into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub content_dir: PathBuf,
    /// Public artwork directory, used in the generated import notes.
    pub artwork_dir: String,
    /// Host slugs assigned to imported episodes.
    pub hosts: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            artwork_dir: DEFAULT_ARTWORK_DIR.to_string(),
            hosts: vec![PLACEHOLDER_HOST.to_string()],
        }
    }
}

impl ImportConfig {
    pub fn builder() -> ImportConfigBuilder {
        ImportConfigBuilder::new()
    }
}

/// Flags for a single import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Report what would happen without writing anything.
    pub dry_run: bool,
    /// Emit per-item diagnostics.
    pub verbose: bool,
    /// Mark imported episodes as drafts.
    pub draft: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            verbose: false,
            draft: true,
        }
    }
}

/// Builder for ImportConfig.
#[derive(Debug, Clone, Default)]
pub struct ImportConfigBuilder {
    config: ImportConfig,
}

impl ImportConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory the episode files are written to.
    pub fn content_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.content_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn artwork_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.artwork_dir = dir.into();
        self
    }

    /// Replaces the placeholder host list.
    pub fn hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> ImportConfig {
        self.config
    }
}
