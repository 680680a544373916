//! Search-engine metadata for a page.

use serde::Serialize;

use crate::frontmatter::Frontmatter;

/// A `<meta name=… content=…>` tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

impl MetaTag {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// `robots: noindex,nofollow`, emitted for hidden pages.
    pub fn noindex() -> Self {
        Self::new("robots", "noindex,nofollow")
    }
}

/// Metadata handed to the document head.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeoMetadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// Extra meta tags.
    pub meta: Vec<MetaTag>,
}

impl SeoMetadata {
    /// Build metadata from page frontmatter.
    ///
    /// Hidden pages get exactly one extra tag, [`MetaTag::noindex`]; visible
    /// pages get none.
    pub fn from_frontmatter(frontmatter: &Frontmatter) -> Self {
        let meta = if frontmatter.hidden {
            vec![MetaTag::noindex()]
        } else {
            Vec::new()
        };

        Self {
            title: frontmatter.title.clone(),
            description: frontmatter.description.clone(),
            keywords: frontmatter.keywords.clone(),
            meta,
        }
    }

    /// True if crawlers are told not to index this page.
    pub fn is_noindex(&self) -> bool {
        self.meta.iter().any(|m| m.name == "robots")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn frontmatter(hidden: bool) -> Frontmatter {
        Frontmatter {
            section: "Guide".to_owned(),
            chapter: "Setup".to_owned(),
            title: "Installing".to_owned(),
            description: "How to install".to_owned(),
            keywords: vec!["install".to_owned()],
            hidden,
        }
    }

    #[test]
    fn test_hidden_page_gets_noindex() {
        let seo = SeoMetadata::from_frontmatter(&frontmatter(true));

        assert_eq!(
            seo.meta,
            vec![MetaTag {
                name: "robots".to_owned(),
                content: "noindex,nofollow".to_owned(),
            }]
        );
        assert!(seo.is_noindex());
    }

    #[test]
    fn test_visible_page_has_no_meta() {
        let seo = SeoMetadata::from_frontmatter(&frontmatter(false));

        assert!(seo.meta.is_empty());
        assert!(!seo.is_noindex());
        assert_eq!(seo.title, "Installing");
        assert_eq!(seo.description, "How to install");
        assert_eq!(seo.keywords, ["install"]);
    }

    #[test]
    fn test_keywords_default_empty() {
        let frontmatter = Frontmatter {
            keywords: Vec::new(),
            ..frontmatter(false)
        };
        assert!(SeoMetadata::from_frontmatter(&frontmatter).keywords.is_empty());
    }

    #[test]
    fn test_serializes_for_head() {
        let seo = SeoMetadata::from_frontmatter(&frontmatter(true));
        let json = serde_json::to_value(&seo).unwrap();

        assert_eq!(json["meta"][0]["name"], "robots");
        assert_eq!(json["keywords"][0], "install");
    }
}
