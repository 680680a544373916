//! Shared utility functions for markdown rendering.

use pulldown_cmark::HeadingLevel;

/// Build the public URL of a page from its site path.
///
/// `prefix` is the site path prefix (`""` or `/docs`), `path` the page path
/// without leading or trailing slash (`""` for the home page). Pages are
/// written as `<path>/index.html`, so URLs end with a slash.
///
/// # Examples
///
/// ```
/// use folio_renderer::page_url;
///
/// assert_eq!(page_url("", ""), "/");
/// assert_eq!(page_url("", "guide/setup"), "/guide/setup/");
/// assert_eq!(page_url("/docs", "api"), "/docs/api/");
/// ```
#[must_use]
pub fn page_url(prefix: &str, path: &str) -> String {
    let path = path.trim_matches('/');
    if path.is_empty() {
        format!("{prefix}/")
    } else {
        format!("{prefix}/{path}/")
    }
}

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_root() {
        assert_eq!(page_url("", ""), "/");
        assert_eq!(page_url("/docs", ""), "/docs/");
    }

    #[test]
    fn test_page_url_strips_slashes() {
        assert_eq!(page_url("", "/guide/"), "/guide/");
    }

    #[test]
    fn test_page_url_nested_with_prefix() {
        assert_eq!(page_url("/v2", "api/reference"), "/v2/api/reference/");
    }
}
