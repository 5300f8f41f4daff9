// ABOUTME: Raw XML scan for podcast (itunes namespace) extensions not exposed by feed-rs.
// ABOUTME: Captures duration, episode/season numbers, explicit, image, summary and the raw pubDate text.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::HashMap;

use crate::models::ItemPodcastExt;

/// Podcast metadata extracted from raw XML at the feed (channel) level.
#[derive(Debug, Default, Clone)]
pub struct FeedPodcastExt {
    /// True if the root element declares the itunes namespace.
    pub has_itunes_namespace: bool,
    /// Channel-level itunes:image href attribute.
    pub image_href: Option<String>,
    pub author: Option<String>,
    pub explicit: Option<String>,
}

/// Everything the scan found for one item.
#[derive(Debug, Default, Clone)]
pub struct ScannedItem {
    pub podcast: ItemPodcastExt,
    /// pubDate / published / dc:date text, untouched.
    pub pub_date: Option<String>,
}

/// Scan results for a complete feed.
#[derive(Debug, Default, Clone)]
pub struct ParsedPodcastExtensions {
    pub feed: FeedPodcastExt,
    /// Items keyed by guid (or `__index_{n}` when the item has none).
    pub items: HashMap<String, ScannedItem>,
    /// Items in document order for fallback lookup.
    pub items_by_index: Vec<ScannedItem>,
}

impl ParsedPodcastExtensions {
    /// Finds the scan for an entry, by guid first and position second.
    pub fn item(&self, guid: &str, index: usize) -> Option<&ScannedItem> {
        self.items
            .get(guid)
            .or_else(|| self.items_by_index.get(index))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Guid,
    PubDate,
    Duration,
    Episode,
    Season,
    Explicit,
    Author,
    Image,
    Summary,
    Subtitle,
}

/// Maps an element name to the field it feeds, if any.
fn field_for(name: &str, in_item: bool) -> Option<Field> {
    if let Some(itunes_name) = name.strip_prefix("itunes:") {
        return match itunes_name {
            "duration" if in_item => Some(Field::Duration),
            "episode" if in_item => Some(Field::Episode),
            "season" if in_item => Some(Field::Season),
            "summary" if in_item => Some(Field::Summary),
            "subtitle" if in_item => Some(Field::Subtitle),
            "explicit" => Some(Field::Explicit),
            "author" if !in_item => Some(Field::Author),
            "image" => Some(Field::Image),
            _ => None,
        };
    }
    if !in_item {
        return None;
    }
    match name {
        "guid" | "id" => Some(Field::Guid),
        "pubDate" | "published" | "dc:date" => Some(Field::PubDate),
        _ => None,
    }
}

/// Scans raw RSS/Atom bytes for podcast extension values.
/// Malformed XML ends the scan early; whatever was collected so far is returned.
pub fn parse_podcast_extensions(data: &[u8]) -> ParsedPodcastExtensions {
    let mut reader = Reader::from_reader(data);
    let mut scanner = Scanner::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => scanner.open(e, false),
            Ok(Event::Empty(ref e)) => scanner.open(e, true),
            Ok(Event::Text(ref e)) => {
                if let Ok(decoded) = e.decode() {
                    scanner.text(&decoded);
                }
            }
            Ok(Event::CData(ref e)) => scanner.text(&String::from_utf8_lossy(e)),
            Ok(Event::GeneralRef(ref e)) => {
                if let Some(resolved) = resolve_entity(&String::from_utf8_lossy(e)) {
                    scanner.text(&resolved);
                }
            }
            Ok(Event::End(ref e)) => {
                scanner.close(&String::from_utf8_lossy(e.name().as_ref()));
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }

    scanner.result
}

/// Streaming state for one scan.
#[derive(Default)]
struct Scanner {
    result: ParsedPodcastExtensions,
    in_channel: bool,
    in_item: bool,
    item_guid: Option<String>,
    item: ScannedItem,
    item_index: usize,
    /// Field being captured and the element name that opened it.
    current: Option<(Field, String)>,
    text: String,
}

impl Scanner {
    fn open(&mut self, e: &BytesStart, is_empty: bool) {
        let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let local_name = name.split(':').next_back().unwrap_or(&name);

        if name == "rss" || name == "feed" {
            self.result.feed.has_itunes_namespace = has_itunes_namespace(e);
        }

        match local_name {
            "channel" => self.in_channel = true,
            "item" | "entry" => {
                self.in_item = true;
                self.item_guid = None;
                self.item = ScannedItem::default();
            }
            _ => {}
        }

        // itunes:image carries its URL in `href`, usually on a self-closing tag
        if name == "itunes:image" {
            if let Some(href) = get_attribute(e, "href") {
                if self.in_item {
                    self.item.podcast.image_href.get_or_insert(href);
                } else if self.in_channel {
                    self.result.feed.image_href.get_or_insert(href);
                }
            }
        }

        if is_empty || self.current.is_some() {
            return;
        }
        if let Some(field) = field_for(&name, self.in_item) {
            self.current = Some((field, name));
            self.text.clear();
        }
    }

    fn text(&mut self, s: &str) {
        if self.current.is_some() {
            self.text.push_str(s);
        }
    }

    fn close(&mut self, name: &str) {
        let local_name = name.split(':').next_back().unwrap_or(name);

        if let Some((field, open_name)) = self.current.take() {
            if open_name == name {
                let value = self.text.trim().to_string();
                if !value.is_empty() {
                    self.store(field, value);
                }
            } else {
                self.current = Some((field, open_name));
            }
        }

        match local_name {
            "channel" => self.in_channel = false,
            "item" | "entry" if self.in_item => {
                let key = self
                    .item_guid
                    .take()
                    .unwrap_or_else(|| format!("__index_{}", self.item_index));
                let item = std::mem::take(&mut self.item);
                self.result.items.insert(key, item.clone());
                self.result.items_by_index.push(item);
                self.in_item = false;
                self.item_index += 1;
            }
            _ => {}
        }
    }

    /// First value wins, matching how feed readers treat duplicated tags.
    fn store(&mut self, field: Field, value: String) {
        if self.in_item {
            let podcast = &mut self.item.podcast;
            let slot = match field {
                Field::Guid => &mut self.item_guid,
                Field::PubDate => &mut self.item.pub_date,
                Field::Duration => &mut podcast.duration,
                Field::Episode => &mut podcast.episode,
                Field::Season => &mut podcast.season,
                Field::Explicit => &mut podcast.explicit,
                Field::Author => return,
                Field::Image => &mut podcast.image,
                Field::Summary => &mut podcast.summary,
                Field::Subtitle => &mut podcast.subtitle,
            };
            slot.get_or_insert(value);
        } else if self.in_channel {
            match field {
                Field::Author => {
                    self.result.feed.author.get_or_insert(value);
                }
                Field::Explicit => {
                    self.result.feed.explicit.get_or_insert(value);
                }
                _ => {}
            }
        }
    }
}

/// Resolves the five predefined XML entities and numeric character references.
fn resolve_entity(name: &str) -> Option<String> {
    let resolved = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let code = if let Some(hex) = name
                .strip_prefix("#x")
                .or_else(|| name.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                name.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(resolved.to_string())
}

/// Checks if an RSS/feed element has the iTunes namespace declared.
fn has_itunes_namespace(e: &BytesStart) -> bool {
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref());
        let value = String::from_utf8_lossy(&attr.value);
        if key.starts_with("xmlns") && value.contains("itunes.com") {
            return true;
        }
    }
    false
}

/// Gets an attribute value from an XML element.
fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref());
        if key == name {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}
