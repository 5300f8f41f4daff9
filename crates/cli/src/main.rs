// ABOUTME: import-rss binary: imports podcast episodes from an RSS feed into markdown content files.
// ABOUTME: Exit code 1 on a missing feed argument or any fatal import error.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use indiecaster_cli::{host_slugs, init_logging, render_failure, render_summary, IMPORT_USAGE};
use indiecaster_import::{
    FeedSource, ImportConfig, ImportOptions, ImportReport, Importer, DEFAULT_CONTENT_DIR,
};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "import-rss")]
#[command(about = "Import podcast episodes from an RSS feed", long_about = None)]
struct Args {
    /// Feed URL (http/https), file:// URL or local path
    feed: Option<String>,

    /// Preview import without creating files
    #[arg(long)]
    dry_run: bool,

    /// Show detailed output
    #[arg(long)]
    verbose: bool,

    /// Import episodes as published instead of drafts
    #[arg(long)]
    published: bool,

    /// Directory episode files are written to
    #[arg(long, default_value = DEFAULT_CONTENT_DIR)]
    content_dir: PathBuf,

    /// Host name or slug for imported episodes (repeatable)
    #[arg(long = "host")]
    hosts: Vec<String>,

    /// Print the import report as JSON
    #[arg(long = "json")]
    json_output: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(feed) = args.feed.as_deref().filter(|f| !f.trim().is_empty()) else {
        eprintln!("error: please provide an RSS feed URL\n");
        eprintln!("{IMPORT_USAGE}");
        return ExitCode::from(1);
    };

    init_logging(args.verbose);

    let mut config = ImportConfig::builder().content_dir(&args.content_dir);
    if !args.hosts.is_empty() {
        match host_slugs(&args.hosts) {
            Ok(hosts) => config = config.hosts(hosts),
            Err(err) => {
                eprintln!("error: {err:#}");
                return ExitCode::from(1);
            }
        }
    }
    let options = ImportOptions {
        dry_run: args.dry_run,
        verbose: args.verbose,
        draft: !args.published,
    };
    let importer = Importer::new(config.build(), options);
    debug!(
        feed,
        content_dir = %importer.config().content_dir.display(),
        hosts = %importer.config().hosts.join(", "),
        options = ?importer.options(),
        "import configuration"
    );

    let output = run(&importer, feed).and_then(|report| {
        if args.json_output {
            Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
        } else {
            Ok(render_summary(&report, importer.config()))
        }
    });

    match output {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{}", render_failure(&err));
            ExitCode::from(1)
        }
    }
}

fn run(importer: &Importer, feed: &str) -> Result<ImportReport> {
    let source = FeedSource::parse(feed);
    importer
        .run(&source)
        .with_context(|| format!("error importing RSS feed from {source}"))
}
