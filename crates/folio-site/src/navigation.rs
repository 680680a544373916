//! Menu tree and current-page navigation resolution.
//!
//! The menu is an ordered list of sections, each owning an ordered list of
//! chapters. A page declares the section and chapter it belongs to by title;
//! [`MenuTree::resolve`] maps that declaration onto the tree.
//!
//! # Resolution rules
//!
//! - Section: first section whose title equals the declared title exactly.
//!   When none matches, the first section of the menu is used.
//! - Chapter: first chapter of the *resolved* section whose title equals the
//!   declared title. When none matches there is no current chapter.
//!
//! Lookups are case-sensitive and later duplicates are ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A leaf entry of the menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Display title, also the key pages use to declare their chapter.
    pub title: String,
    /// Site path of the chapter page (without leading slash).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Short summary shown next to the link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A top-level menu entry grouping chapters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Display title, also the key pages use to declare their section.
    pub title: String,
    /// Site path of the section overview page, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Chapters in display order.
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Section {
    /// Path a link to this section should point at.
    ///
    /// The section's own page when it has one, otherwise its first chapter
    /// that has a page.
    pub fn link_path(&self) -> Option<&str> {
        self.path
            .as_deref()
            .or_else(|| self.chapters.iter().find_map(|c| c.path.as_deref()))
    }
}

/// A linkable menu entry, used for previous/next navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Link text.
    pub title: String,
    /// Site path (without leading slash).
    pub path: String,
}

/// Where a page declares itself to be in the menu.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLocation {
    /// Declared section title.
    pub section_title: String,
    /// Declared chapter title.
    pub chapter_title: String,
}

impl PageLocation {
    pub fn new(section_title: impl Into<String>, chapter_title: impl Into<String>) -> Self {
        Self {
            section_title: section_title.into(),
            chapter_title: chapter_title.into(),
        }
    }
}

/// Outcome of resolving a [`PageLocation`] against the menu.
///
/// Borrows from the menu: the section is always a member of the tree and
/// the chapter, when present, always belongs to that section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedNavigation<'a> {
    /// Section the page is rendered under.
    pub current_section: &'a Section,
    /// Chapter the page is, if the declared chapter exists in the section.
    pub current_chapter: Option<&'a Chapter>,
    /// False when the declared section was unknown and the first section was used.
    pub section_matched: bool,
}

/// How to treat a page whose declared section is not in the menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationPolicy {
    /// Fall back to the first section.
    #[default]
    Lenient,
    /// Reject the page with [`NavigationError::UnknownSection`].
    Strict,
}

/// Error returned when navigation cannot be resolved.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The menu has no sections to fall back to.
    #[error("Menu has no sections")]
    EmptyMenu,
    /// Strict policy and the declared section does not exist.
    #[error("Section {0:?} is not in the menu")]
    UnknownSection(String),
}

/// Error returned when a menu file cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// I/O error reading the menu file.
    #[error("Failed to read menu {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    /// The menu file is not valid YAML/JSON or has the wrong shape.
    #[error("Invalid menu: {0}")]
    Parse(String),
}

/// Resolve a page location against a slice of sections.
///
/// This is the unchecked entry point for menus that did not go through
/// [`MenuTree`] validation.
///
/// # Errors
///
/// Returns [`NavigationError::EmptyMenu`] if `menu` is empty.
pub fn resolve_navigation<'a>(
    menu: &'a [Section],
    location: &PageLocation,
) -> Result<ResolvedNavigation<'a>, NavigationError> {
    let first = menu.first().ok_or(NavigationError::EmptyMenu)?;
    Ok(resolve_from(first, menu, location))
}

fn resolve_from<'a>(
    fallback: &'a Section,
    menu: &'a [Section],
    location: &PageLocation,
) -> ResolvedNavigation<'a> {
    let matched = menu.iter().find(|s| s.title == location.section_title);
    let current_section = matched.unwrap_or(fallback);
    let current_chapter = current_section
        .chapters
        .iter()
        .find(|c| c.title == location.chapter_title);

    ResolvedNavigation {
        current_section,
        current_chapter,
        section_matched: matched.is_some(),
    }
}

/// Validated, non-empty menu of sections.
///
/// Built once per site build and shared read-only between page renders.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Section>")]
pub struct MenuTree {
    sections: Vec<Section>,
}

impl TryFrom<Vec<Section>> for MenuTree {
    type Error = NavigationError;

    fn try_from(sections: Vec<Section>) -> Result<Self, Self::Error> {
        Self::new(sections)
    }
}

impl MenuTree {
    /// Create a menu from sections.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::EmptyMenu`] if `sections` is empty.
    pub fn new(sections: Vec<Section>) -> Result<Self, NavigationError> {
        if sections.is_empty() {
            return Err(NavigationError::EmptyMenu);
        }
        Ok(Self { sections })
    }

    /// Parse a menu from YAML (a list of sections).
    pub fn from_yaml(content: &str) -> Result<Self, MenuError> {
        serde_yaml::from_str(content).map_err(|e| MenuError::Parse(e.to_string()))
    }

    /// Parse a menu from JSON (an array of sections).
    pub fn from_json(content: &str) -> Result<Self, MenuError> {
        serde_json::from_str(content).map_err(|e| MenuError::Parse(e.to_string()))
    }

    /// Load a menu file, choosing the format from its extension.
    ///
    /// `.json` files are parsed as JSON, everything else as YAML.
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        let content = std::fs::read_to_string(path).map_err(|source| MenuError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if path.extension().is_some_and(|e| e == "json") {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Sections in declared order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Section used when a page's declared section is unknown.
    pub fn first_section(&self) -> &Section {
        &self.sections[0]
    }

    /// Resolve a page location, falling back to the first section.
    pub fn resolve(&self, location: &PageLocation) -> ResolvedNavigation<'_> {
        resolve_from(self.first_section(), &self.sections, location)
    }

    /// Resolve a page location under the given policy.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::UnknownSection`] under
    /// [`NavigationPolicy::Strict`] when the declared section is missing.
    pub fn resolve_with(
        &self,
        location: &PageLocation,
        policy: NavigationPolicy,
    ) -> Result<ResolvedNavigation<'_>, NavigationError> {
        let resolved = self.resolve(location);
        if policy == NavigationPolicy::Strict && !resolved.section_matched {
            return Err(NavigationError::UnknownSection(
                location.section_title.clone(),
            ));
        }
        Ok(resolved)
    }

    /// All linkable entries in reading order.
    ///
    /// Each section's own page comes before its chapters; entries without a
    /// path are skipped.
    pub fn links(&self) -> Vec<NavLink> {
        let mut links = Vec::new();
        for section in &self.sections {
            if let Some(path) = &section.path {
                links.push(NavLink {
                    title: section.title.clone(),
                    path: normalize_path(path).to_owned(),
                });
            }
            for chapter in &section.chapters {
                if let Some(path) = &chapter.path {
                    links.push(NavLink {
                        title: chapter.title.clone(),
                        path: normalize_path(path).to_owned(),
                    });
                }
            }
        }
        links
    }
}

/// Strip leading and trailing slashes from a site path.
pub(crate) fn normalize_path(path: &str) -> &str {
    path.trim_matches('/')
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::MenuTree: Send, Sync);

    use pretty_assertions::assert_eq;

    use super::*;

    fn chapter(title: &str) -> Chapter {
        Chapter {
            title: title.to_owned(),
            path: None,
            description: None,
        }
    }

    fn section(title: &str, chapters: &[&str]) -> Section {
        Section {
            title: title.to_owned(),
            path: None,
            chapters: chapters.iter().map(|t| chapter(t)).collect(),
        }
    }

    /// Guide: Intro, Setup / API: Ref
    fn sample_menu() -> MenuTree {
        MenuTree::new(vec![
            section("Guide", &["Intro", "Setup"]),
            section("API", &["Ref"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_matching_section_and_chapter() {
        let menu = sample_menu();
        let resolved = menu.resolve(&PageLocation::new("API", "Ref"));

        assert_eq!(resolved.current_section.title, "API");
        assert_eq!(resolved.current_chapter.map(|c| c.title.as_str()), Some("Ref"));
        assert!(resolved.section_matched);
    }

    #[test]
    fn test_resolve_unknown_section_falls_back_to_first() {
        let menu = sample_menu();
        let resolved = menu.resolve(&PageLocation::new("Unknown", "Ref"));

        assert_eq!(resolved.current_section.title, "Guide");
        assert!(std::ptr::eq(resolved.current_section, &menu.sections()[0]));
        // "Ref" lives in API, never in the fallback section
        assert!(resolved.current_chapter.is_none());
        assert!(!resolved.section_matched);
    }

    #[test]
    fn test_resolve_missing_chapter_is_absent() {
        let menu = sample_menu();
        let resolved = menu.resolve(&PageLocation::new("Guide", "Missing"));

        assert_eq!(resolved.current_section.title, "Guide");
        assert!(resolved.current_chapter.is_none());
        assert!(resolved.section_matched);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let menu = sample_menu();
        let resolved = menu.resolve(&PageLocation::new("api", "ref"));

        assert_eq!(resolved.current_section.title, "Guide");
        assert!(resolved.current_chapter.is_none());
    }

    #[test]
    fn test_resolve_first_duplicate_section_wins() {
        let mut first = section("Guide", &["Intro"]);
        first.path = Some("first".to_owned());
        let mut second = section("Guide", &["Intro"]);
        second.path = Some("second".to_owned());
        let menu = MenuTree::new(vec![section("Home", &[]), first, second]).unwrap();

        let resolved = menu.resolve(&PageLocation::new("Guide", "Intro"));

        assert_eq!(resolved.current_section.path.as_deref(), Some("first"));
        assert!(std::ptr::eq(
            resolved.current_chapter.unwrap(),
            &menu.sections()[1].chapters[0]
        ));
    }

    #[test]
    fn test_resolve_first_duplicate_chapter_wins() {
        let mut guide = section("Guide", &[]);
        guide.chapters = vec![
            Chapter {
                path: Some("a".to_owned()),
                ..chapter("Intro")
            },
            Chapter {
                path: Some("b".to_owned()),
                ..chapter("Intro")
            },
        ];
        let menu = MenuTree::new(vec![guide]).unwrap();

        let resolved = menu.resolve(&PageLocation::new("Guide", "Intro"));

        assert_eq!(
            resolved.current_chapter.and_then(|c| c.path.as_deref()),
            Some("a")
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let menu = sample_menu();
        let location = PageLocation::new("Guide", "Setup");

        assert_eq!(menu.resolve(&location), menu.resolve(&location));
    }

    #[test]
    fn test_resolve_chapter_never_from_other_section() {
        let menu = sample_menu();
        for section in menu.sections() {
            for location in [
                PageLocation::new(section.title.clone(), "Intro"),
                PageLocation::new(section.title.clone(), "Ref"),
            ] {
                let resolved = menu.resolve(&location);
                if let Some(chapter) = resolved.current_chapter {
                    assert!(
                        resolved
                            .current_section
                            .chapters
                            .iter()
                            .any(|c| std::ptr::eq(c, chapter)),
                        "chapter must belong to the resolved section"
                    );
                }
            }
        }
    }

    #[test]
    fn test_resolve_navigation_empty_menu_errors() {
        let result = resolve_navigation(&[], &PageLocation::new("Guide", "Intro"));
        assert!(matches!(result, Err(NavigationError::EmptyMenu)));
    }

    #[test]
    fn test_resolve_navigation_slice_matches_tree() {
        let menu = sample_menu();
        let location = PageLocation::new("Nope", "Intro");

        let from_slice = resolve_navigation(menu.sections(), &location).unwrap();

        assert_eq!(from_slice, menu.resolve(&location));
        assert_eq!(from_slice.current_chapter.unwrap().title, "Intro");
    }

    #[test]
    fn test_strict_policy_rejects_unknown_section() {
        let menu = sample_menu();
        let result = menu.resolve_with(&PageLocation::new("Unknown", ""), NavigationPolicy::Strict);

        let err = result.unwrap_err();
        assert!(matches!(err, NavigationError::UnknownSection(ref t) if t == "Unknown"));
    }

    #[test]
    fn test_strict_policy_allows_missing_chapter() {
        let menu = sample_menu();
        let resolved = menu
            .resolve_with(&PageLocation::new("API", "Missing"), NavigationPolicy::Strict)
            .unwrap();

        assert_eq!(resolved.current_section.title, "API");
        assert!(resolved.current_chapter.is_none());
    }

    #[test]
    fn test_lenient_policy_is_default() {
        assert_eq!(NavigationPolicy::default(), NavigationPolicy::Lenient);
        let menu = sample_menu();
        let resolved = menu
            .resolve_with(&PageLocation::new("Unknown", ""), NavigationPolicy::default())
            .unwrap();
        assert_eq!(resolved.current_section.title, "Guide");
    }

    #[test]
    fn test_new_rejects_empty_menu() {
        assert!(matches!(
            MenuTree::new(Vec::new()),
            Err(NavigationError::EmptyMenu)
        ));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r"
- title: Guide
  path: guide
  chapters:
    - title: Intro
      path: guide/intro
      description: Start here
- title: API
";
        let menu = MenuTree::from_yaml(yaml).unwrap();

        assert_eq!(menu.sections().len(), 2);
        assert_eq!(menu.sections()[0].chapters[0].path.as_deref(), Some("guide/intro"));
        assert_eq!(
            menu.sections()[0].chapters[0].description.as_deref(),
            Some("Start here")
        );
        assert!(menu.sections()[1].chapters.is_empty());
    }

    #[test]
    fn test_from_yaml_empty_list_rejected() {
        let err = MenuTree::from_yaml("[]").unwrap_err();
        assert!(matches!(err, MenuError::Parse(_)));
        assert!(err.to_string().contains("Menu has no sections"));
    }

    #[test]
    fn test_from_yaml_missing_title_rejected() {
        let err = MenuTree::from_yaml("- path: guide").unwrap_err();
        assert!(matches!(err, MenuError::Parse(_)));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{"title": "Guide", "chapters": [{"title": "Intro"}]}]"#;
        let menu = MenuTree::from_json(json).unwrap();
        assert_eq!(menu.first_section().chapters[0].title, "Intro");
    }

    #[test]
    fn test_load_by_extension() {
        let temp_dir = tempfile::tempdir().unwrap();
        let json_path = temp_dir.path().join("menu.json");
        std::fs::write(&json_path, r#"[{"title": "Json"}]"#).unwrap();
        let yaml_path = temp_dir.path().join("menu.yml");
        std::fs::write(&yaml_path, "- title: Yaml\n").unwrap();

        assert_eq!(MenuTree::load(&json_path).unwrap().first_section().title, "Json");
        assert_eq!(MenuTree::load(&yaml_path).unwrap().first_section().title, "Yaml");
    }

    #[test]
    fn test_load_missing_file() {
        let err = MenuTree::load(Path::new("/nonexistent/menu.yaml")).unwrap_err();
        assert!(matches!(err, MenuError::Io { .. }));
    }

    #[test]
    fn test_links_reading_order() {
        let yaml = r"
- title: Guide
  path: /guide/
  chapters:
    - title: Intro
      path: guide/intro
    - title: Draft
    - title: Setup
      path: guide/setup
- title: API
  chapters:
    - title: Ref
      path: api/ref
";
        let menu = MenuTree::from_yaml(yaml).unwrap();
        let paths: Vec<_> = menu.links().into_iter().map(|l| l.path).collect();

        assert_eq!(paths, ["guide", "guide/intro", "guide/setup", "api/ref"]);
    }

    #[test]
    fn test_section_link_path() {
        let mut api = section("API", &["Ref"]);
        assert_eq!(api.link_path(), None);

        api.chapters[0].path = Some("api/ref".to_owned());
        assert_eq!(api.link_path(), Some("api/ref"));

        api.path = Some("api".to_owned());
        assert_eq!(api.link_path(), Some("api"));
    }
}
