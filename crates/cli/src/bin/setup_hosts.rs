// ABOUTME: setup-hosts binary: points imported episodes at real host slugs.
// ABOUTME: Replaces the placeholder host list in every episode file's frontmatter.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use indiecaster_cli::{host_slugs, init_logging, render_host_summary};
use indiecaster_import::{reassign_hosts, HostReport, DEFAULT_CONTENT_DIR, PLACEHOLDER_HOST};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "setup-hosts")]
#[command(about = "Replace the placeholder host on imported episodes", long_about = None)]
struct Args {
    /// Primary host name or slug
    #[arg(long)]
    host: String,

    /// Co-host name or slug
    #[arg(long = "co-host")]
    co_host: Option<String>,

    /// Host slug to replace
    #[arg(long, default_value = PLACEHOLDER_HOST)]
    placeholder: String,

    /// Directory holding the episode files
    #[arg(long, default_value = DEFAULT_CONTENT_DIR)]
    content_dir: PathBuf,

    /// Show detailed output
    #[arg(long)]
    verbose: bool,

    /// Print the report as JSON
    #[arg(long = "json")]
    json_output: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let names = std::iter::once(&args.host).chain(args.co_host.as_ref());
    let result = host_slugs(names).and_then(|hosts| {
        let report = run(&args, &hosts)?;
        if args.json_output {
            Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
        } else {
            Ok(render_host_summary(&report, &hosts))
        }
    });

    match result {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args, hosts: &[String]) -> Result<HostReport> {
    info!(
        placeholder = %args.placeholder,
        hosts = %hosts.join(", "),
        dir = %args.content_dir.display(),
        "reassigning placeholder host"
    );
    reassign_hosts(&args.content_dir, &args.placeholder, hosts).with_context(|| {
        format!(
            "error updating episode files in {}",
            args.content_dir.display()
        )
    })
}
