// ABOUTME: Import orchestrator: loads and parses a feed, then extracts and writes episodes oldest first.
// ABOUTME: Feed-level failures abort the run; per-item failures are logged and counted as skipped.

use std::error::Error as StdError;
use std::fs;

use chrono::{DateTime, Utc};
use indiecaster_feed::{parse_feed_bytes, Feed, FeedKind};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ImportConfig, ImportOptions};
use crate::content_file::{write_episode, RenderContext, WriteOutcome};
use crate::episode::{extract_episode, EpisodeRecord, ExtractOptions};
use crate::error::{ImportError, Result};
use crate::source::FeedSource;

/// An item that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    /// 1-based position in processing (oldest-first) order.
    pub position: usize,
    pub title: String,
    pub reason: String,
}

/// Outcome of one import run. `created + skipped == total` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub feed_title: String,
    pub feed_kind: FeedKind,
    pub dry_run: bool,
    /// Episodes written (or that would be written, in a dry run).
    pub created: usize,
    /// Episodes that already existed plus failed items.
    pub skipped: usize,
    pub total: usize,
    pub failures: Vec<ItemFailure>,
}

/// Drives one import.
#[derive(Debug, Clone)]
pub struct Importer {
    config: ImportConfig,
    options: ImportOptions,
    now: Option<DateTime<Utc>>,
}

impl Importer {
    pub fn new(config: ImportConfig, options: ImportOptions) -> Self {
        Self {
            config,
            options,
            now: None,
        }
    }

    /// Pins the clock used for missing publish dates and the import stamp.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Loads, parses and imports a feed.
    ///
    /// The feed is read and parsed completely before any file is written, so
    /// a fetch or parse error leaves the content directory untouched.
    pub fn run(&self, source: &FeedSource) -> Result<ImportReport> {
        info!(source = %source, "fetching RSS feed");
        let bytes = source.load()?;
        let feed = parse_feed_bytes(&bytes, &source.feed_url())?;
        self.import_feed(&feed)
    }

    /// Imports an already parsed feed.
    pub fn import_feed(&self, feed: &Feed) -> Result<ImportReport> {
        let now = self.now.unwrap_or_else(Utc::now);
        let dry_run = self.options.dry_run;

        info!(
            podcast = %feed.title,
            description = %feed.description,
            episodes = feed.items.len(),
            "parsed feed"
        );
        if self.options.verbose {
            info!(
                feed_url = %feed.feed_url,
                website = %feed.home_url,
                artwork = feed.image_url.as_deref().unwrap_or("not specified"),
                author = feed.author.as_deref().unwrap_or("not specified"),
                language = feed.language.as_deref().unwrap_or("not specified"),
                explicit = feed.explicit.as_deref().unwrap_or("not specified"),
                "feed details"
            );
        }
        if feed.kind == FeedKind::Article {
            warn!("feed has no podcast markers (itunes namespace or audio enclosures)");
        }

        if !dry_run {
            fs::create_dir_all(&self.config.content_dir)
                .map_err(|err| ImportError::write(&self.config.content_dir, err))?;
        }

        let extract_opts = ExtractOptions {
            draft: self.options.draft,
            hosts: &self.config.hosts,
        };
        let ctx = RenderContext {
            artwork_dir: &self.config.artwork_dir,
            imported_on: now.date_naive(),
        };

        let mut report = ImportReport {
            feed_title: feed.title.clone(),
            feed_kind: feed.kind,
            dry_run,
            total: feed.items.len(),
            ..Default::default()
        };

        info!(dry_run, "starting episode import");

        // feeds list newest first; import oldest first so numbering stays ascending
        for (idx, item) in feed.items.iter().rev().enumerate() {
            let position = idx + 1;
            let record = extract_episode(item, idx, feed, &extract_opts, now);
            if self.options.verbose {
                log_record(position, &record);
            }

            match write_episode(&record, &self.config.content_dir, &ctx, dry_run) {
                Ok(outcome) => {
                    if outcome.is_new() {
                        report.created += 1;
                    } else {
                        report.skipped += 1;
                    }
                    log_outcome(&outcome, record.slug(), position, report.total);
                }
                Err(err) => {
                    report.skipped += 1;
                    let reason = if self.options.verbose {
                        error_chain(&err)
                    } else {
                        err.to_string()
                    };
                    warn!(position, title = %record.title, error = %reason, "error processing episode");
                    debug!(?item, "failed feed item");
                    report.failures.push(ItemFailure {
                        position,
                        title: record.title.clone(),
                        reason,
                    });
                }
            }
        }

        info!(
            created = report.created,
            skipped = report.skipped,
            total = report.total,
            "import completed"
        );
        Ok(report)
    }
}

fn log_record(position: usize, record: &EpisodeRecord) {
    info!(
        position,
        title = %record.title,
        date = %record.pub_date.format("%Y-%m-%d"),
        duration = %record.duration,
        audio = if record.audio_url.is_empty() { "not specified" } else { record.audio_url.as_str() },
        artwork = if record.artwork_url.is_empty() { "not specified" } else { record.artwork_url.as_str() },
        hosts = %record.hosts.join(", "),
        "processing episode"
    );
}

fn log_outcome(outcome: &WriteOutcome, slug: &str, position: usize, total: usize) {
    match outcome {
        WriteOutcome::Created(_) => info!("created episode: {slug} ({position}/{total})"),
        WriteOutcome::WouldCreate(_) => info!("would create episode: {slug} ({position}/{total})"),
        WriteOutcome::Exists(_) => info!("episode already exists: {slug} - skipping"),
    }
}

/// Renders an error with all of its sources, outermost first.
fn error_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use indiecaster_feed::{FeedItem, ItemPodcastExt};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn item(title: &str, episode: Option<&str>) -> FeedItem {
        FeedItem {
            title: title.into(),
            podcast: ItemPodcastExt {
                episode: episode.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn importer(dir: &TempDir, options: ImportOptions) -> Importer {
        let config = ImportConfig::builder().content_dir(dir.path()).build();
        Importer::new(config, options).at(Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap())
    }

    #[test]
    fn test_oldest_first_and_fallback_titles() {
        let dir = TempDir::new().unwrap();
        let feed = Feed {
            title: "Show".into(),
            items: vec![item("Newest", Some("2")), item("", None)],
            ..Default::default()
        };

        let report = importer(&dir, ImportOptions::default())
            .import_feed(&feed)
            .unwrap();

        assert_eq!(report.created, 2);
        assert_eq!(report.total, 2);
        // the untitled item is processed first, so it is "Episode 1"
        assert!(dir.path().join("episode-1.md").exists());
        assert!(dir.path().join("newest.md").exists());
    }

    #[test]
    fn test_failed_item_counts_as_skipped() {
        let dir = TempDir::new().unwrap();
        let feed = Feed {
            items: vec![item("Good one", None), item("!!!", None)],
            ..Default::default()
        };

        let report = importer(&dir, ImportOptions::default())
            .import_feed(&feed)
            .unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].position, 1);
        assert_eq!(report.failures[0].title, "!!!");
        assert!(dir.path().join("good-one.md").exists());
    }

    #[test]
    fn test_dry_run_counts_without_writing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("episodes");
        let config = ImportConfig::builder().content_dir(&target).build();
        let options = ImportOptions {
            dry_run: true,
            ..Default::default()
        };
        let feed = Feed {
            items: vec![item("One", None), item("Two", None), item("Three", None)],
            ..Default::default()
        };

        let report = Importer::new(config, options).import_feed(&feed).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.created + report.skipped, 3);
        assert_eq!(report.created, 3);
        assert!(!target.exists());
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let err = ImportError::write(
            "/x/y.md",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(error_chain(&err), "could not write /x/y.md: denied");
    }
}
