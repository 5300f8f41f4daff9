// ABOUTME: Normalized episode record and the extractor that builds one from a raw feed item.
// ABOUTME: Extraction never fails: missing or malformed feed data degrades to defaults.

use chrono::{DateTime, Utc};
use indiecaster_feed::{parse_flexible_time, Feed, FeedItem};

use crate::duration::normalize_duration;
use crate::sanitize::sanitize_description;
use crate::slug::slugify;

/// One episode, ready to be rendered into a content file.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeRecord {
    slug: String,
    pub title: String,
    /// Sanitized, quote-escaped plain text.
    pub description: String,
    pub pub_date: DateTime<Utc>,
    /// `M:SS`-style duration, see [`normalize_duration`].
    pub duration: String,
    pub audio_url: String,
    pub artwork_url: String,
    pub episode_number: Option<u32>,
    pub season: Option<u32>,
    pub explicit: bool,
    pub hosts: Vec<String>,
    pub draft: bool,
}

impl EpisodeRecord {
    /// Creates a record with default metadata; the slug is fixed from `title` here.
    pub fn new(title: impl Into<String>, pub_date: DateTime<Utc>) -> Self {
        let title = title.into();
        Self {
            slug: slugify(&title),
            title,
            description: String::new(),
            pub_date,
            duration: normalize_duration(None),
            audio_url: String::new(),
            artwork_url: String::new(),
            episode_number: None,
            season: None,
            explicit: false,
            hosts: Vec::new(),
            draft: true,
        }
    }

    /// File stem for this episode; empty when the title has no usable characters.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

/// Per-run inputs to extraction that do not come from the feed.
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions<'a> {
    pub draft: bool,
    /// Host slugs every imported episode starts with.
    pub hosts: &'a [String],
}

/// Maps one feed item to an episode record.
///
/// `index` is the item's position in processing order and only feeds the
/// `Episode {n}` fallback title. `now` stands in for missing or unreadable
/// publish dates.
pub fn extract_episode(
    item: &FeedItem,
    index: usize,
    feed: &Feed,
    opts: &ExtractOptions<'_>,
    now: DateTime<Utc>,
) -> EpisodeRecord {
    let title = non_blank(&item.title)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Episode {}", index + 1));

    let description = [&item.description, &item.content, &item.content_snippet]
        .into_iter()
        .find_map(|text| non_blank(text));

    let pub_date = item
        .published
        .or_else(|| item.pub_date.as_deref().and_then(parse_flexible_time))
        .unwrap_or(now);

    let podcast = &item.podcast;
    let artwork_url = [
        podcast.image_href.as_deref(),
        podcast.image.as_deref(),
        feed.image_url.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(non_blank)
    .unwrap_or_default()
    .to_string();

    let mut record = EpisodeRecord::new(title, pub_date);
    record.description = sanitize_description(description);
    record.duration = normalize_duration(podcast.duration.as_deref());
    record.audio_url = item.enclosure_url.clone().unwrap_or_default();
    record.artwork_url = artwork_url;
    record.episode_number = parse_positive(podcast.episode.as_deref());
    record.season = parse_positive(podcast.season.as_deref());
    record.explicit = is_explicit(podcast.explicit.as_deref());
    record.hosts = opts.hosts.to_vec();
    record.draft = opts.draft;
    record
}

/// Only the exact spellings `true` and `yes` count; `Yes`, `explicit` and
/// friends are treated as clean.
pub fn is_explicit(value: Option<&str>) -> bool {
    matches!(value, Some("true") | Some("yes"))
}

fn parse_positive(value: Option<&str>) -> Option<u32> {
    value?.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

fn non_blank(s: &str) -> Option<&str> {
    (!s.trim().is_empty()).then_some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use indiecaster_feed::ItemPodcastExt;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn hosts() -> Vec<String> {
        vec!["main-host".to_string()]
    }

    fn extract(item: &FeedItem, feed: &Feed) -> EpisodeRecord {
        let hosts = hosts();
        let opts = ExtractOptions {
            draft: true,
            hosts: &hosts,
        };
        extract_episode(item, 0, feed, &opts, now())
    }

    #[test]
    fn test_hello_world_item() {
        let item = FeedItem {
            title: "Hello World!".into(),
            pub_date: Some("2024-01-01".into()),
            podcast: ItemPodcastExt {
                duration: Some("90".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let record = extract(&item, &Feed::default());

        assert_eq!(record.slug(), "hello-world");
        assert_eq!(record.duration, "1:30");
        assert_eq!(
            record.pub_date,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
        assert!(record.draft);
        assert_eq!(record.hosts, hosts());
        assert!(!record.explicit);
        assert_eq!(record.audio_url, "");
    }

    #[test]
    fn test_defaults_for_empty_item() {
        let item = FeedItem::default();
        let hosts = hosts();
        let opts = ExtractOptions {
            draft: false,
            hosts: &hosts,
        };

        let record = extract_episode(&item, 6, &Feed::default(), &opts, now());

        assert_eq!(record.title, "Episode 7");
        assert_eq!(record.slug(), "episode-7");
        assert_eq!(record.pub_date, now());
        assert_eq!(record.duration, "00:00");
        assert_eq!(record.description, "");
        assert_eq!(record.artwork_url, "");
        assert_eq!(record.episode_number, None);
        assert!(!record.draft);
    }

    #[test]
    fn test_description_fallback_chain() {
        let mut item = FeedItem {
            content: "<p>From content</p>".into(),
            content_snippet: "From snippet".into(),
            ..Default::default()
        };
        assert_eq!(extract(&item, &Feed::default()).description, "From content");

        item.content = "  ".into();
        assert_eq!(extract(&item, &Feed::default()).description, "From snippet");

        item.description = "From <i>description</i>".into();
        assert_eq!(
            extract(&item, &Feed::default()).description,
            "From description"
        );
    }

    #[test]
    fn test_unparseable_date_falls_back_to_now() {
        let item = FeedItem {
            pub_date: Some("the other day".into()),
            ..Default::default()
        };
        assert_eq!(extract(&item, &Feed::default()).pub_date, now());
    }

    #[test]
    fn test_artwork_cascade() {
        let feed = Feed {
            image_url: Some("https://cdn/show.jpg".into()),
            ..Default::default()
        };
        let mut item = FeedItem {
            podcast: ItemPodcastExt {
                image_href: Some("https://cdn/href.jpg".into()),
                image: Some("https://cdn/text.jpg".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(extract(&item, &feed).artwork_url, "https://cdn/href.jpg");

        item.podcast.image_href = None;
        assert_eq!(extract(&item, &feed).artwork_url, "https://cdn/text.jpg");

        item.podcast.image = None;
        assert_eq!(extract(&item, &feed).artwork_url, "https://cdn/show.jpg");

        assert_eq!(extract(&item, &Feed::default()).artwork_url, "");
    }

    #[test]
    fn test_episode_and_season_numbers() {
        let mut item = FeedItem {
            podcast: ItemPodcastExt {
                episode: Some("3".into()),
                season: Some(" 1 ".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let record = extract(&item, &Feed::default());
        assert_eq!(record.episode_number, Some(3));
        assert_eq!(record.season, Some(1));

        item.podcast.episode = Some("three".into());
        item.podcast.season = Some("0".into());
        let record = extract(&item, &Feed::default());
        assert_eq!(record.episode_number, None);
        assert_eq!(record.season, None);
    }

    #[test]
    fn test_explicit_is_exact_match() {
        assert!(is_explicit(Some("true")));
        assert!(is_explicit(Some("yes")));
        assert!(!is_explicit(Some("Yes")));
        assert!(!is_explicit(Some("TRUE")));
        assert!(!is_explicit(Some("explicit")));
        assert!(!is_explicit(Some("no")));
        assert!(!is_explicit(None));
    }

    #[test]
    fn test_audio_from_enclosure() {
        let item = FeedItem {
            title: "With audio".into(),
            enclosure_url: Some("https://cdn/ep.mp3".into()),
            ..Default::default()
        };
        assert_eq!(extract(&item, &Feed::default()).audio_url, "https://cdn/ep.mp3");
    }
}
