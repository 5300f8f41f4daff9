// ABOUTME: Replaces the placeholder host on imported episodes with the real host slugs.
// ABOUTME: Every file is parsed and planned before the first write; writes go through temp file + rename.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{ImportError, Result};
use crate::frontmatter::EpisodeDocument;

/// Counts from one host reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostReport {
    pub scanned: usize,
    pub updated: usize,
    pub unchanged: usize,
}

/// Rewrites `hosts: [placeholder]` to `hosts` in every `*.md` file in `dir`.
///
/// Only files whose host list is exactly `[placeholder]` change; all others
/// stay byte-identical. A missing directory is not an error. If any file
/// cannot be read or parsed nothing is written.
pub fn reassign_hosts(dir: &Path, placeholder: &str, hosts: &[String]) -> Result<HostReport> {
    let mut report = HostReport::default();
    if !dir.is_dir() {
        info!(dir = %dir.display(), "no episodes directory; nothing to update");
        return Ok(report);
    }

    let mut plan = Vec::new();
    for path in episode_files(dir)? {
        report.scanned += 1;
        let text = fs::read_to_string(&path).map_err(|source| ImportError::Read {
            path: path.clone(),
            source,
        })?;
        let mut doc = EpisodeDocument::parse(&path, &text)?;

        if doc.hosts().as_deref() == Some(&[placeholder][..]) {
            doc.set_hosts(hosts);
            plan.push((path.clone(), doc.render(&path)?));
        } else {
            debug!(path = %path.display(), "hosts already set");
            report.unchanged += 1;
        }
    }

    for (path, contents) in &plan {
        replace_file(dir, path, contents)?;
        debug!(path = %path.display(), "updated hosts");
        report.updated += 1;
    }

    info!(
        scanned = report.scanned,
        updated = report.updated,
        "host reconciliation finished"
    );
    Ok(report)
}

fn episode_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| ImportError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| ImportError::Read {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn replace_file(dir: &Path, path: &Path, contents: &str) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(dir).map_err(|err| ImportError::write(path, err))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|err| ImportError::write(path, err))?;
    tmp.persist(path)
        .map_err(|err| ImportError::write(path, err.error))?;
    Ok(())
}
