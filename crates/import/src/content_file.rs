// ABOUTME: Renders episode records into markdown content files and writes them without overwriting.
// ABOUTME: The frontmatter schema matches what the site's episode collection reads.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::episode::EpisodeRecord;
use crate::error::{ImportError, Result};
use crate::sanitize::{escape_double_quoted, single_line, truncate_escaped};

/// Character budget for the frontmatter `description`.
pub const DESCRIPTION_LIMIT: usize = 160;

/// Character budget for `showNotes` before `...` is appended.
pub const SHOW_NOTES_LIMIT: usize = 250;

/// Values the rendered file needs that are not part of the record.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Public artwork directory mentioned in the import notes.
    pub artwork_dir: &'a str,
    /// Date stamped into the "imported on" note.
    pub imported_on: NaiveDate,
}

/// What happened to one episode file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Created(PathBuf),
    /// Dry run: the file does not exist and would have been written.
    WouldCreate(PathBuf),
    /// A file with this slug already exists and was left alone.
    Exists(PathBuf),
}

impl WriteOutcome {
    /// True when the episode counts as created (or would be, in a dry run).
    pub fn is_new(&self) -> bool {
        !matches!(self, WriteOutcome::Exists(_))
    }

    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Created(p) | WriteOutcome::WouldCreate(p) | WriteOutcome::Exists(p) => p,
        }
    }
}

/// Local artwork file stem suggested when the feed has no artwork URL.
pub fn artwork_stem(record: &EpisodeRecord) -> String {
    match record.episode_number {
        Some(n) => format!("episode-{}-{}", n, record.slug()),
        None => record.slug().to_string(),
    }
}

/// Renders the full markdown document for an episode.
pub fn render_episode(record: &EpisodeRecord, ctx: &RenderContext<'_>) -> String {
    let title = single_line(&escape_double_quoted(&record.title));
    // the body keeps the description's line breaks; frontmatter values stay on one line
    let description = record.description.as_str();
    let inline = single_line(description);
    let short_description = truncate_escaped(&inline, DESCRIPTION_LIMIT);
    let show_notes = if inline.chars().count() > SHOW_NOTES_LIMIT {
        format!("{}...", truncate_escaped(&inline, SHOW_NOTES_LIMIT).trim())
    } else {
        inline.clone()
    };
    let stem = artwork_stem(record);
    let artwork_src = if record.artwork_url.is_empty() {
        stem.clone()
    } else {
        escape_double_quoted(&record.artwork_url)
    };
    let hosts = record
        .hosts
        .iter()
        .map(|h| format!("\"{}\"", escape_double_quoted(h)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut doc = String::with_capacity(2048 + description.len());

    doc.push_str("---\n");
    doc.push_str(&format!("title: \"{}\"\n", title));
    doc.push_str(&format!("description: \"{}\"\n", short_description));
    doc.push_str(&format!("pubDate: {}\n", record.pub_date.format("%Y-%m-%d")));
    doc.push_str(&format!("duration: \"{}\"\n", record.duration));
    doc.push_str(&format!("audioFile: \"{}\"\n", escape_double_quoted(&record.audio_url)));
    doc.push_str("artwork:\n");
    doc.push_str(&format!("  src: \"{}\"\n", artwork_src));
    doc.push_str(&format!("  alt: \"Episode artwork for {}\"\n", title));
    doc.push_str(&format!("showNotes: \"{}\"\n", show_notes));
    doc.push_str(&format!("draft: {}\n", record.draft));
    doc.push_str(&format!("hosts: [{}]\n", hosts));
    if let Some(n) = record.episode_number {
        doc.push_str(&format!("episodeNumber: {}\n", n));
    }
    if let Some(n) = record.season {
        doc.push_str(&format!("season: {}\n", n));
    }
    if record.explicit {
        doc.push_str("explicit: true\n");
    }
    doc.push_str("---\n\n");

    doc.push_str(&format!("# {}\n\n", title));
    doc.push_str(
        "*This episode was imported from an RSS feed. Please review and update the content below.*\n\n",
    );
    doc.push_str("## Episode Description\n\n");
    doc.push_str(description);
    doc.push_str("\n\n## Show Notes\n\n");
    doc.push_str(
        "*Please add detailed show notes, timestamps, and resources mentioned in this episode.*\n\n",
    );
    doc.push_str("### Key Topics Covered\n\n- [Add main topics covered in this episode]\n\n");
    doc.push_str("### Resources Mentioned\n\n- [Add links to resources mentioned in the episode]\n\n");
    doc.push_str("## About This Episode\n\n");
    doc.push_str(&format!(
        "*This episode was automatically imported on {}. The audio file is currently hotlinked \
         to the original source. Consider uploading a local copy to improve reliability.*\n\n",
        ctx.imported_on.format("%B %-d, %Y")
    ));
    if !record.audio_url.is_empty() {
        doc.push_str(&format!("**Original Audio URL**: {}\n", record.audio_url));
    }
    if !record.artwork_url.is_empty() {
        doc.push_str(&format!("**Original Artwork URL**: {}\n", record.artwork_url));
    }
    doc.push_str("\n---\n\n## Import Notes\n\n");
    doc.push_str("- **Audio**: Currently hotlinked to external source\n");
    if record.artwork_url.is_empty() {
        doc.push_str(&format!(
            "- **Artwork**: Please add episode artwork to `{}/{}.png`\n",
            ctx.artwork_dir.trim_end_matches('/'),
            stem
        ));
    } else {
        doc.push_str("- **Artwork**: Currently hotlinked to external source\n");
    }
    doc.push_str("- **Content**: Review and enhance the episode description and show notes\n");
    doc.push_str(&format!(
        "- **Draft Status**: Set to {} - change `draft: false` to publish\n",
        if record.draft { "draft" } else { "published" }
    ));

    doc
}

/// Writes `{slug}.md` into `dir` unless it already exists.
///
/// Existence check and creation are a single `create_new` open, so a file that
/// appears between runs (or was hand-edited) is never overwritten. With
/// `dry_run` nothing is written and only existence is reported.
pub fn write_episode(
    record: &EpisodeRecord,
    dir: &Path,
    ctx: &RenderContext<'_>,
    dry_run: bool,
) -> Result<WriteOutcome> {
    if record.slug().is_empty() {
        return Err(ImportError::EmptySlug {
            title: record.title.clone(),
        });
    }

    let path = dir.join(format!("{}.md", record.slug()));

    if dry_run {
        return Ok(if path.exists() {
            WriteOutcome::Exists(path)
        } else {
            WriteOutcome::WouldCreate(path)
        });
    }

    let rendered = render_episode(record, ctx);

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            return Ok(WriteOutcome::Exists(path));
        }
        Err(err) => return Err(ImportError::write(path, err)),
    };

    if let Err(err) = file.write_all(rendered.as_bytes()) {
        // a half-written file would be skipped forever by later runs
        drop(file);
        let _ = fs::remove_file(&path);
        return Err(ImportError::write(path, err));
    }

    Ok(WriteOutcome::Created(path))
}
