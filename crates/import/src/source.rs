// ABOUTME: Where a feed comes from: an http(s) URL or a local file (`file://` or plain path).
// ABOUTME: Loading is blocking and happens once, before any episode file is touched.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::error::{ImportError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    File(PathBuf),
}

impl FeedSource {
    /// Classifies a command-line feed argument.
    pub fn parse(target: &str) -> Self {
        let target = target.trim();
        if target.starts_with("http://") || target.starts_with("https://") {
            return FeedSource::Url(target.to_string());
        }
        if let Some(rest) = target.strip_prefix("file://") {
            let path = Url::parse(target)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .unwrap_or_else(|| PathBuf::from(rest));
            return FeedSource::File(path);
        }
        FeedSource::File(PathBuf::from(target))
    }

    /// Value recorded as the feed's URL.
    pub fn feed_url(&self) -> String {
        match self {
            FeedSource::Url(url) => url.clone(),
            FeedSource::File(path) => format!("file://{}", path.display()),
        }
    }

    /// Reads the whole feed document.
    pub fn load(&self) -> Result<Vec<u8>> {
        match self {
            FeedSource::Url(url) => {
                debug!(%url, "fetching feed");
                fetch(url).map_err(|source| ImportError::Fetch {
                    url: url.clone(),
                    source,
                })
            }
            FeedSource::File(path) => {
                debug!(path = %path.display(), "reading feed file");
                fs::read(path).map_err(|source| ImportError::Read {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
}

fn fetch(url: &str) -> reqwest::Result<Vec<u8>> {
    let resp = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => write!(f, "{}", url),
            FeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_classifies_targets() {
        assert_eq!(
            FeedSource::parse("https://example.com/feed.xml"),
            FeedSource::Url("https://example.com/feed.xml".into())
        );
        assert_eq!(
            FeedSource::parse("file:///tmp/feed.xml"),
            FeedSource::File(PathBuf::from("/tmp/feed.xml"))
        );
        assert_eq!(
            FeedSource::parse("fixtures/feed.xml"),
            FeedSource::File(PathBuf::from("fixtures/feed.xml"))
        );
    }

    #[test]
    fn test_loads_local_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feed.xml");
        fs::write(&path, "<rss/>").unwrap();

        let source = FeedSource::parse(&format!("file://{}", path.display()));
        assert_eq!(source.load().unwrap(), b"<rss/>".to_vec());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = FeedSource::File(PathBuf::from("/definitely/not/here.xml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ImportError::Read { .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_fetches_over_http() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/feed.xml");
            then.status(200)
                .header("content-type", "application/rss+xml")
                .body("<rss version=\"2.0\"/>");
        });

        let body = FeedSource::parse(&server.url("/feed.xml")).load().unwrap();

        mock.assert();
        assert_eq!(body, b"<rss version=\"2.0\"/>".to_vec());
    }

    #[test]
    fn test_http_error_status_is_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone.xml");
            then.status(404);
        });

        let err = FeedSource::parse(&server.url("/gone.xml")).load().unwrap_err();
        assert!(matches!(err, ImportError::Fetch { .. }));
    }
}
