// ABOUTME: Raw feed models produced by the parser and consumed by the importer.
// ABOUTME: Podcast extension fields are kept as the feed supplied them; normalization happens downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a media enclosure (audio, video, or image attachment).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    pub url: String,
    pub mime_type: Option<String>,
    pub length: u64,
}

/// Whether a feed looks like a podcast or a plain article feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Podcast,
    #[default]
    Article,
}

/// Item-level podcast extension values, verbatim from the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPodcastExt {
    /// itunes:duration text (seconds, MM:SS or HH:MM:SS in the wild).
    pub duration: Option<String>,
    pub episode: Option<String>,
    pub season: Option<String>,
    pub explicit: Option<String>,
    /// itunes:image `href` attribute.
    pub image_href: Option<String>,
    /// itunes:image text content, for feeds that put the URL in the body.
    pub image: Option<String>,
    pub summary: Option<String>,
    pub subtitle: Option<String>,
}

/// Represents a single item/entry within a feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub guid: String,
    pub url: String,
    /// Raw description/summary, HTML allowed.
    pub description: String,
    /// Raw content:encoded or Atom content, HTML allowed.
    pub content: String,
    /// Plain-text podcast summary (itunes:summary, else itunes:subtitle).
    pub content_snippet: String,
    /// Publish date text exactly as it appeared in the feed.
    pub pub_date: Option<String>,
    /// Publish date as understood by feed-rs, when it could parse it.
    pub published: Option<DateTime<Utc>>,
    pub enclosures: Vec<Enclosure>,
    /// Primary media enclosure (audio preferred).
    pub enclosure_url: Option<String>,
    pub podcast: ItemPodcastExt,
}

/// Represents a parsed feed with metadata and items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    pub title: String,
    pub description: String,
    pub home_url: String,
    pub feed_url: String,
    pub image_url: Option<String>,
    pub language: Option<String>,
    /// Channel-level itunes:author.
    pub author: Option<String>,
    /// Channel-level itunes:explicit, verbatim.
    pub explicit: Option<String>,
    pub kind: FeedKind,
    pub items: Vec<FeedItem>,
}
