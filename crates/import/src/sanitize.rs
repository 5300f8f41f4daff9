// ABOUTME: Best-effort cleanup of feed-supplied text before it goes into frontmatter.
// ABOUTME: Strips tags, decodes a handful of entities and escapes text for double-quoted YAML scalars.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*[\r\n]+\s*").expect("valid line break regex"));

/// Decoded in this order; `&amp;lt;` therefore ends up as `<`.
const ENTITIES: &[(&str, &str)] = &[
    ("&quot;", "\""),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", " "),
];

/// Turns a feed description into an escaped string for a double-quoted scalar.
///
/// Not a real HTML parser: anything that looks like `<...>` is removed,
/// only the five entities above are decoded, and other entities pass through.
/// Running it twice escapes quotes twice, so call it once per value.
pub fn sanitize_description(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };

    let mut text = TAG_RE.replace_all(raw, "").into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    escape_double_quoted(text.trim())
}

/// Escapes `\` and `"` so the value can sit inside a double-quoted YAML scalar.
pub fn escape_double_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Folds line breaks (and the indentation around them) into single spaces.
///
/// A frontmatter line that reads `---` would otherwise close the block early.
pub fn single_line(s: &str) -> String {
    LINE_BREAK_RE.replace_all(s, " ").into_owned()
}

/// Cuts an escaped string to at most `max` characters without splitting a
/// `\\` or `\"` pair.
pub fn truncate_escaped(s: &str, max: usize) -> &str {
    let mut width = 0;
    let mut chars = s.char_indices();
    while let Some((idx, ch)) = chars.next() {
        let step = if ch == '\\' { 2 } else { 1 };
        if width + step > max {
            return &s[..idx];
        }
        if ch == '\\' {
            chars.next();
        }
        width += step;
    }
    s
}
