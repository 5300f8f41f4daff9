// ABOUTME: Slug normalization for episode titles and host/guest names.
// ABOUTME: Produces lowercase `[a-z0-9]+(-[a-z0-9]+)*` identifiers used as file names and URL segments.

/// Converts free text into a file- and URL-safe slug.
///
/// Lower-cases, drops every character outside `[a-z0-9]`, whitespace and `-`,
/// turns whitespace runs into single hyphens, collapses repeated hyphens and
/// trims hyphens from both ends. Returns an empty string when the input has no
/// ASCII alphanumerics.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else if ch == '-' || ch.is_whitespace() {
            pending_dash = true;
        }
    }

    slug
}
