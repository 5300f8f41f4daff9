// ABOUTME: Integration tests for feed parsing.
// ABOUTME: Covers podcast extension capture, raw date handling, Atom input and fatal parse errors.

use indiecaster_feed::{parse_feed_bytes, FeedError, FeedKind};
use pretty_assertions::assert_eq;

const PODCAST_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd"
     xmlns:content="http://purl.org/rss/1.0/modules/content/">
    <channel>
        <title>Tech Podcast</title>
        <link>https://podcast.example.com</link>
        <description>A podcast about technology</description>
        <language>en-us</language>
        <itunes:author>Jane Host</itunes:author>
        <itunes:explicit>no</itunes:explicit>
        <itunes:image href="https://podcast.example.com/show.jpg"/>
        <item>
            <title>Episode 2: Follow Up</title>
            <guid>episode-2</guid>
            <pubDate>Tue, 16 Jan 2024 10:00:00 +0000</pubDate>
            <description>Second &lt;b&gt;episode&lt;/b&gt;</description>
            <enclosure url="https://cdn.example.com/ep2.mp3" type="audio/mpeg" length="2000"/>
            <itunes:duration>3600</itunes:duration>
            <itunes:episode>2</itunes:episode>
            <itunes:season>1</itunes:season>
        </item>
        <item>
            <title>Episode 1: Hello</title>
            <guid>episode-1</guid>
            <pubDate>2024-01-01</pubDate>
            <content:encoded><![CDATA[<p>Welcome to the show!</p>]]></content:encoded>
            <enclosure url="https://cdn.example.com/ep1.mp3" type="audio/mpeg" length="1000"/>
            <itunes:duration>01:02:03</itunes:duration>
            <itunes:explicit>yes</itunes:explicit>
            <itunes:image href="https://cdn.example.com/ep1.jpg"/>
        </item>
    </channel>
</rss>"#;

#[test]
fn test_podcast_feed_basic() {
    let feed = parse_feed_bytes(PODCAST_RSS.as_bytes(), "https://podcast.example.com/feed.xml")
        .unwrap();

    assert_eq!(feed.kind, FeedKind::Podcast);
    assert_eq!(feed.title, "Tech Podcast");
    assert_eq!(feed.description, "A podcast about technology");
    assert_eq!(feed.feed_url, "https://podcast.example.com/feed.xml");
    assert_eq!(
        feed.image_url.as_deref(),
        Some("https://podcast.example.com/show.jpg")
    );
    assert_eq!(feed.language.as_deref(), Some("en-us"));
    assert_eq!(feed.author.as_deref(), Some("Jane Host"));
    assert_eq!(feed.explicit.as_deref(), Some("no"));
    assert_eq!(feed.items.len(), 2);

    // feed-native order is preserved: newest first
    let newest = &feed.items[0];
    assert_eq!(newest.title, "Episode 2: Follow Up");
    assert_eq!(
        newest.enclosure_url.as_deref(),
        Some("https://cdn.example.com/ep2.mp3")
    );
    assert_eq!(newest.podcast.duration.as_deref(), Some("3600"));
    assert_eq!(newest.podcast.episode.as_deref(), Some("2"));
    assert_eq!(newest.podcast.season.as_deref(), Some("1"));
    assert!(newest.published.is_some());
    assert!(newest.description.contains("episode"));

    let oldest = &feed.items[1];
    assert_eq!(oldest.podcast.duration.as_deref(), Some("01:02:03"));
    assert_eq!(oldest.podcast.explicit.as_deref(), Some("yes"));
    assert_eq!(
        oldest.podcast.image_href.as_deref(),
        Some("https://cdn.example.com/ep1.jpg")
    );
    assert!(oldest.content.contains("Welcome to the show!"));
    assert_eq!(oldest.pub_date.as_deref(), Some("2024-01-01"));
}

#[test]
fn test_article_feed_has_no_podcast_fields() {
    let rss = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
    <channel>
        <title>Tech Blog</title>
        <link>https://example.com</link>
        <description>A tech blog</description>
        <item>
            <title>First Article</title>
            <link>https://example.com/post1</link>
            <guid>article-1</guid>
            <description>Summary of the first article.</description>
        </item>
    </channel>
</rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes(), "https://example.com/feed.xml").unwrap();

    assert_eq!(feed.kind, FeedKind::Article);
    let item = &feed.items[0];
    assert_eq!(item.url, "https://example.com/post1");
    assert_eq!(item.enclosure_url, None);
    assert_eq!(item.podcast.duration, None);
    assert_eq!(item.content_snippet, "");
}

#[test]
fn test_atom_feed() {
    let atom = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
    <title>Atom Cast</title>
    <id>urn:uuid:60a76c80-d399-11d9-b93C-0003939e0af6</id>
    <updated>2024-02-01T00:00:00Z</updated>
    <entry>
        <title>Atom Episode</title>
        <id>urn:uuid:1225c695-cfb8-4ebb-aaaa-80da344efa6a</id>
        <published>2024-02-01T09:30:00Z</published>
        <updated>2024-02-01T09:30:00Z</updated>
        <summary>Atom summary</summary>
        <link rel="enclosure" type="audio/mpeg" href="https://cdn.example.com/atom.mp3" length="10"/>
    </entry>
</feed>"#;

    let feed = parse_feed_bytes(atom.as_bytes(), "file:///tmp/atom.xml").unwrap();

    assert_eq!(feed.title, "Atom Cast");
    let item = &feed.items[0];
    assert_eq!(item.title, "Atom Episode");
    assert_eq!(item.description, "Atom summary");
    assert_eq!(
        item.enclosure_url.as_deref(),
        Some("https://cdn.example.com/atom.mp3")
    );
    assert_eq!(item.pub_date.as_deref(), Some("2024-02-01T09:30:00Z"));
}

#[test]
fn test_itunes_summary_becomes_snippet() {
    let rss = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd">
    <channel>
        <title>Snippets</title>
        <item>
            <title>Only a summary</title>
            <itunes:subtitle>Short subtitle</itunes:subtitle>
            <itunes:summary>The long summary</itunes:summary>
        </item>
        <item>
            <title>Only a subtitle</title>
            <itunes:subtitle>Just the subtitle</itunes:subtitle>
        </item>
    </channel>
</rss>"#;

    let feed = parse_feed_bytes(rss.as_bytes(), "").unwrap();
    assert_eq!(feed.items[0].content_snippet, "The long summary");
    assert_eq!(feed.items[1].content_snippet, "Just the subtitle");
}

#[test]
fn test_garbage_is_a_parse_error() {
    let err = parse_feed_bytes(b"<html><body>not a feed</body></html>", "x").unwrap_err();
    assert!(matches!(err, FeedError::Parse(_)), "got {err:?}");

    let err = parse_feed_bytes(b"", "x").unwrap_err();
    assert!(matches!(err, FeedError::EmptyDocument));
}
