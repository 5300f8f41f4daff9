// ABOUTME: Shared pieces of the import-rss and setup-hosts binaries.
// ABOUTME: Logging setup plus the human-readable usage, summary and troubleshooting text.

use anyhow::{bail, Result};
use indiecaster_import::{slugify, HostReport, ImportConfig, ImportReport};
use tracing_subscriber::EnvFilter;

pub const IMPORT_USAGE: &str = "\
Usage: import-rss <FEED> [options]

FEED is an http(s) URL, a file:// URL or a local path.

Options:
  --dry-run            Preview import without creating files
  --verbose            Show detailed output
  --published          Import episodes as published (default: draft)
  --content-dir <DIR>  Episode directory (default: src/content/episodes)
  --host <SLUG>        Host slug for imported episodes (repeatable, default: main-host)
  --json               Print the import report as JSON";

pub const TROUBLESHOOTING: &[&str] = &[
    "Verify the RSS feed URL is correct and accessible",
    "Check if the feed contains valid XML",
    "Try using --verbose for more detailed error information",
    "Ensure you have write permissions to the content directories",
];

/// Installs the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,indiecaster_feed={level},indiecaster_import={level},indiecaster_cli={level},\
             import_rss={level},setup_hosts={level}"
        ))
    });

    // a second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Turns host names or slugs from the command line into host slugs.
/// A name with nothing slug-worthy in it is an error.
pub fn host_slugs<'a, I>(names: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut hosts = Vec::new();
    for name in names {
        let slug = slugify(name);
        if slug.is_empty() {
            bail!("host {name:?} does not produce a usable slug");
        }
        hosts.push(slug);
    }
    Ok(hosts)
}

/// End-of-run summary printed to stdout.
pub fn render_summary(report: &ImportReport, config: &ImportConfig) -> String {
    let mut out = String::new();
    out.push_str(&format!("Import completed for \"{}\"\n", report.feed_title));
    out.push_str("Summary:\n");
    out.push_str(&format!("  - Episodes created: {}\n", report.created));
    out.push_str(&format!("  - Episodes skipped: {}\n", report.skipped));
    out.push_str(&format!("  - Total episodes: {}\n", report.total));

    if !report.failures.is_empty() {
        out.push_str("\nFailed episodes:\n");
        for failure in &report.failures {
            out.push_str(&format!(
                "  - #{} \"{}\": {}\n",
                failure.position, failure.title, failure.reason
            ));
        }
    }

    if report.dry_run {
        out.push_str("\nThis was a dry run. No files were created.\n");
        out.push_str("Run without --dry-run to actually import the episodes.\n");
        return out;
    }

    out.push_str("\nNext steps:\n");
    out.push_str("  1. Run 'setup-hosts --host <slug>' to configure your podcast hosts\n");
    out.push_str(&format!(
        "  2. Review and edit the imported episodes in {}/\n",
        config.content_dir.display()
    ));
    out.push_str(&format!(
        "  3. Add local artwork files to {}/\n",
        config.artwork_dir.trim_end_matches('/')
    ));
    out.push_str("  4. Set draft: false on episodes when ready to publish\n");
    out
}

/// Message for a run that could not complete, with hints.
pub fn render_failure(err: &anyhow::Error) -> String {
    let mut out = format!("error: {err:#}\n\nTroubleshooting tips:\n");
    for tip in TROUBLESHOOTING {
        out.push_str(&format!("  - {tip}\n"));
    }
    out
}

pub fn render_host_summary(report: &HostReport, hosts: &[String]) -> String {
    format!(
        "Updated {} of {} episode file(s) to reference {}\n",
        report.updated,
        report.scanned,
        hosts.join(", ")
    )
}
