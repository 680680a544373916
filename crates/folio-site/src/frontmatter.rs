//! Page frontmatter.
//!
//! Every page starts with a YAML block delimited by `---` lines declaring its
//! title and where it sits in the menu:
//!
//! ```yaml
//! ---
//! section: Guide
//! chapter: Setup
//! title: Installing
//! description: Getting the tools onto your machine
//! keywords: [install, setup]
//! hidden: false
//! ---
//! ```

use serde::Deserialize;

use crate::navigation::PageLocation;

/// Metadata declared at the top of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Frontmatter {
    /// Title of the menu section the page belongs to.
    #[serde(default)]
    pub section: String,
    /// Title of the menu chapter the page is.
    #[serde(default)]
    pub chapter: String,
    /// Page title.
    pub title: String,
    /// One-line summary used in the header and search metadata.
    #[serde(default)]
    pub description: String,
    /// Search keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Exclude the page from search engine indexing.
    #[serde(default)]
    pub hidden: bool,
}

/// Error parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// Document does not start with a `---` delimited block.
    #[error("Missing frontmatter block")]
    Missing,
    /// Block is not valid YAML or has the wrong shape.
    #[error("Invalid frontmatter: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

impl Frontmatter {
    /// Parse a frontmatter block (without delimiters).
    pub fn from_yaml(yaml: &str) -> Result<Self, FrontmatterError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Split and parse frontmatter from a full document.
    ///
    /// Returns the frontmatter and the markdown body following it.
    pub fn parse(document: &str) -> Result<(Self, &str), FrontmatterError> {
        let (yaml, body) = split_frontmatter(document);
        let yaml = yaml.ok_or(FrontmatterError::Missing)?;
        Ok((Self::from_yaml(yaml)?, body))
    }

    /// Menu location this page declares.
    pub fn location(&self) -> PageLocation {
        PageLocation::new(self.section.as_str(), self.chapter.as_str())
    }
}

/// Split a document into its frontmatter block and body.
///
/// The block must open on the first line with `---` and close with a line
/// that is exactly `---` or `...`. Returns `(None, document)` when there is
/// no complete block.
pub fn split_frontmatter(document: &str) -> (Option<&str>, &str) {
    let content = document.strip_prefix('\u{feff}').unwrap_or(document);
    let Some(rest) = content.strip_prefix("---").and_then(strip_line_break) else {
        return (None, document);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed == "---" || trimmed == "..." {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, document)
}

fn strip_line_break(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}
