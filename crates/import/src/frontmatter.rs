// ABOUTME: Splits an episode markdown file into its YAML frontmatter and body, and puts it back together.
// ABOUTME: Frontmatter is held as a serde_yaml mapping so edits never go through text patching.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{ImportError, Result};

const FENCE: &str = "---";

/// An episode file: frontmatter mapping plus the untouched markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeDocument {
    pub frontmatter: Mapping,
    pub body: String,
}

impl EpisodeDocument {
    /// Parses `input`; `path` is only used for error reporting.
    pub fn parse(path: &Path, input: &str) -> Result<Self> {
        let (yaml, body) = split_frontmatter(input).ok_or_else(|| ImportError::Frontmatter {
            path: path.to_path_buf(),
        })?;

        let value: Value = serde_yaml::from_str(yaml).map_err(|source| ImportError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        let frontmatter = match value {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            _ => {
                return Err(ImportError::Frontmatter {
                    path: path.to_path_buf(),
                })
            }
        };

        Ok(Self {
            frontmatter,
            body: body.to_string(),
        })
    }

    /// Host slugs listed in the frontmatter, if `hosts` is a list of strings.
    pub fn hosts(&self) -> Option<Vec<&str>> {
        self.frontmatter
            .get("hosts")?
            .as_sequence()?
            .iter()
            .map(Value::as_str)
            .collect()
    }

    /// Replaces the `hosts` list, keeping its position among the keys.
    pub fn set_hosts(&mut self, hosts: &[String]) {
        let list = hosts.iter().cloned().map(Value::String).collect();
        self.frontmatter
            .insert(Value::String("hosts".into()), Value::Sequence(list));
    }

    /// Renders the document back to markdown with fenced frontmatter.
    pub fn render(&self, path: &Path) -> Result<String> {
        let yaml = if self.frontmatter.is_empty() {
            String::new()
        } else {
            serde_yaml::to_string(&self.frontmatter).map_err(|source| ImportError::Yaml {
                path: path.to_path_buf(),
                source,
            })?
        };
        Ok(format!("{FENCE}\n{yaml}{FENCE}\n{}", self.body))
    }
}

/// Returns `(yaml, body)`. The opening fence must be the first line and the
/// closing fence a line of its own.
fn split_frontmatter(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix(FENCE)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOC: &str = "---\ntitle: \"A --- B\"\nhosts: [\"main-host\"]\ndraft: true\n---\n\n# Body\n\n---\nrule above\n";

    #[test]
    fn test_split_stops_at_fence_line() {
        let (yaml, body) = split_frontmatter(DOC).unwrap();
        assert_eq!(yaml, "title: \"A --- B\"\nhosts: [\"main-host\"]\ndraft: true\n");
        assert_eq!(body, "\n# Body\n\n---\nrule above\n");
    }

    #[test]
    fn test_split_requires_leading_fence() {
        assert_eq!(split_frontmatter("# no frontmatter\n"), None);
        assert_eq!(split_frontmatter("---\ntitle: x\n"), None);
        assert_eq!(split_frontmatter("---\n---\nbody"), Some(("", "body")));
    }

    #[test]
    fn test_hosts_roundtrip_keeps_body() {
        let path = Path::new("ep.md");
        let mut doc = EpisodeDocument::parse(path, DOC).unwrap();
        assert_eq!(doc.hosts(), Some(vec!["main-host"]));

        doc.set_hosts(&["alice".to_string(), "bob".to_string()]);
        let rendered = doc.render(path).unwrap();

        assert!(rendered.starts_with("---\n"));
        assert!(rendered.contains("hosts:\n- alice\n- bob\ndraft: true\n---\n"));
        assert!(rendered.ends_with("\n# Body\n\n---\nrule above\n"));

        let reparsed = EpisodeDocument::parse(path, &rendered).unwrap();
        assert_eq!(reparsed.hosts(), Some(vec!["alice", "bob"]));
        assert_eq!(
            reparsed.frontmatter.get("title").and_then(Value::as_str),
            Some("A --- B")
        );
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let err = EpisodeDocument::parse(Path::new("bad.md"), "---\ntitle: [unclosed\n---\n")
            .unwrap_err();
        assert!(matches!(err, ImportError::Yaml { .. }));

        let err = EpisodeDocument::parse(Path::new("plain.md"), "no fences").unwrap_err();
        assert!(matches!(err, ImportError::Frontmatter { .. }));
    }
}
