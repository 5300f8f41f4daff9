// ABOUTME: Feed parsing implementation using feed-rs.
// ABOUTME: Maps feed-rs types to the raw Feed/FeedItem models, merged with the podcast extension scan.

use crate::error::FeedError;
use crate::models::{Enclosure, Feed, FeedItem, FeedKind};
use crate::podcast_ext::{parse_podcast_extensions, ParsedPodcastExtensions, ScannedItem};
use feed_rs::model::{Entry, Feed as FeedRsFeed, Link};
use std::collections::HashSet;

/// Mime types preferred for the primary enclosure, best first.
const AUDIO_PRIORITY: &[&str] = &["audio/mpeg", "audio/mp3", "audio/mp4", "audio/x-m4a", "audio/aac"];

/// Parses feed bytes into a Feed.
///
/// # Arguments
/// * `data` - Raw feed bytes (RSS or Atom, podcast extensions optional)
/// * `feed_url` - Where the bytes came from; stored as-is
///
/// Items keep feed-native order. Nothing here normalizes podcast fields:
/// durations, numbers and flags are passed through as text.
pub fn parse_feed_bytes(data: &[u8], feed_url: &str) -> Result<Feed, FeedError> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Err(FeedError::EmptyDocument);
    }

    let parsed = feed_rs::parser::parse(data)?;

    // feed-rs drops most itunes fields and raw date text, so scan the XML ourselves
    let ext = parse_podcast_extensions(data);

    let items: Vec<FeedItem> = parsed
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let scanned = ext.item(&entry.id, idx).cloned().unwrap_or_default();
            map_entry(entry, scanned)
        })
        .collect();

    Ok(Feed {
        title: parsed
            .title
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_default(),
        description: parsed
            .description
            .as_ref()
            .map(|d| d.content.clone())
            .unwrap_or_default(),
        home_url: extract_home_url(&parsed.links),
        feed_url: feed_url.to_string(),
        image_url: extract_feed_image(&parsed, &ext),
        language: parsed.language.clone(),
        author: ext.feed.author.clone(),
        explicit: ext.feed.explicit.clone(),
        kind: detect_feed_kind(&parsed, &ext),
        items,
    })
}

/// Decides whether the feed is a podcast.
///
/// An itunes namespace on the root (or an itunes rating) settles it. Otherwise
/// the first five entries vote: audio/video enclosures or itunes item data
/// count as podcast indicators, and a strict majority wins.
fn detect_feed_kind(feed: &FeedRsFeed, ext: &ParsedPodcastExtensions) -> FeedKind {
    if ext.feed.has_itunes_namespace {
        return FeedKind::Podcast;
    }
    if feed.rating.as_ref().is_some_and(|r| r.urn == "itunes") {
        return FeedKind::Podcast;
    }

    let sampled = feed.entries.len().min(5);
    if sampled == 0 {
        return FeedKind::Article;
    }

    let votes = feed
        .entries
        .iter()
        .take(sampled)
        .enumerate()
        .filter(|(idx, entry)| has_podcast_indicators(entry, ext.item(&entry.id, *idx)))
        .count();

    if votes * 2 > sampled {
        FeedKind::Podcast
    } else {
        FeedKind::Article
    }
}

fn has_podcast_indicators(entry: &Entry, scanned: Option<&ScannedItem>) -> bool {
    if let Some(scanned) = scanned {
        let podcast = &scanned.podcast;
        if podcast.duration.is_some()
            || podcast.episode.is_some()
            || podcast.explicit.is_some()
            || podcast.image_href.is_some()
        {
            return true;
        }
    }

    let is_av = |mime: &str| mime.starts_with("audio/") || mime.starts_with("video/");

    let av_link = entry.links.iter().any(|link| {
        is_enclosure_link(link) && link.media_type.as_deref().is_some_and(is_av)
    });
    let av_media = entry.media.iter().flat_map(|m| &m.content).any(|content| {
        content
            .content_type
            .as_ref()
            .is_some_and(|mime| is_av(&mime.to_string()))
    });

    av_link || av_media
}

fn is_enclosure_link(link: &Link) -> bool {
    link.rel.as_deref() == Some("enclosure")
}

/// Extracts the website URL: rel="alternate" first, else the first link.
fn extract_home_url(links: &[Link]) -> String {
    links
        .iter()
        .find(|link| link.rel.as_deref() == Some("alternate"))
        .or_else(|| links.first())
        .map(|link| link.href.clone())
        .unwrap_or_default()
}

/// Extracts the show artwork.
/// itunes:image has priority, then the RSS `<image>` (feed-rs logo), then the icon.
fn extract_feed_image(feed: &FeedRsFeed, ext: &ParsedPodcastExtensions) -> Option<String> {
    ext.feed
        .image_href
        .clone()
        .or_else(|| feed.logo.as_ref().map(|logo| logo.uri.clone()))
        .or_else(|| feed.icon.as_ref().map(|icon| icon.uri.clone()))
        .filter(|url| !url.trim().is_empty())
}

/// Maps a feed-rs Entry plus its scanned extensions to a FeedItem.
fn map_entry(entry: &Entry, scanned: ScannedItem) -> FeedItem {
    let enclosures = extract_enclosures(entry);
    let enclosure_url = select_primary_media(&enclosures);

    let podcast = scanned.podcast;
    let content_snippet = podcast
        .summary
        .clone()
        .or_else(|| podcast.subtitle.clone())
        .unwrap_or_default();

    FeedItem {
        title: entry
            .title
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_default(),
        guid: entry.id.clone(),
        url: extract_item_url(entry),
        description: entry
            .summary
            .as_ref()
            .map(|t| t.content.clone())
            .unwrap_or_default(),
        content: entry
            .content
            .as_ref()
            .and_then(|c| c.body.clone())
            .unwrap_or_default(),
        content_snippet,
        pub_date: scanned.pub_date,
        published: entry.published,
        enclosures,
        enclosure_url,
        podcast,
    }
}

/// Item page URL: rel="alternate", else the first non-enclosure link.
fn extract_item_url(entry: &Entry) -> String {
    entry
        .links
        .iter()
        .find(|link| link.rel.as_deref() == Some("alternate"))
        .or_else(|| entry.links.iter().find(|link| !is_enclosure_link(link)))
        .map(|link| link.href.clone())
        .unwrap_or_default()
}

/// Collects enclosure links and media:content entries, dropping exact duplicates.
fn extract_enclosures(entry: &Entry) -> Vec<Enclosure> {
    let mut enclosures = Vec::new();
    let mut seen: HashSet<(String, Option<String>)> = HashSet::new();

    for link in entry.links.iter().filter(|link| is_enclosure_link(link)) {
        let mime_type = link.media_type.clone();
        if seen.insert((link.href.clone(), mime_type.clone())) {
            enclosures.push(Enclosure {
                url: link.href.clone(),
                mime_type,
                length: link.length.unwrap_or(0),
            });
        }
    }

    for content in entry.media.iter().flat_map(|m| &m.content) {
        if let Some(ref url) = content.url {
            let mime_type = content.content_type.as_ref().map(|m| m.to_string());
            if seen.insert((url.to_string(), mime_type.clone())) {
                enclosures.push(Enclosure {
                    url: url.to_string(),
                    mime_type,
                    length: content.size.unwrap_or(0),
                });
            }
        }
    }

    enclosures
}

/// Picks the episode audio: the best-ranked audio type, else the first enclosure.
fn select_primary_media(enclosures: &[Enclosure]) -> Option<String> {
    AUDIO_PRIORITY
        .iter()
        .find_map(|wanted| {
            enclosures
                .iter()
                .find(|enc| enc.mime_type.as_deref() == Some(*wanted))
        })
        .or_else(|| enclosures.first())
        .map(|enc| enc.url.clone())
        .filter(|url| !url.is_empty())
}
