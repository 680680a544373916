//! Page composition.
//!
//! [`PageComposer`] resolves where a page sits in the menu, derives its
//! search metadata and lays out the regions of the documentation layout in
//! their fixed order. It performs no I/O; [`crate::template`] turns the
//! result into HTML.

use folio_renderer::TocEntry;

use crate::context::PageContext;
use crate::frontmatter::Frontmatter;
use crate::navigation::{
    Chapter, MenuTree, NavLink, NavigationError, NavigationPolicy, ResolvedNavigation, Section,
};
use crate::seo::SeoMetadata;

/// Element id shared by the sidebar and its sticky scroll container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutAnchor(String);

impl LayoutAnchor {
    /// Anchor used for the sidebar wrapper.
    pub fn sidebar() -> Self {
        Self("sidebar-wrapper".to_owned())
    }

    /// Element id.
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Table of contents for the page, if it has one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TocSlot<'a> {
    WithToc(&'a [TocEntry]),
    WithoutToc,
}

impl<'a> TocSlot<'a> {
    /// `WithToc` for non-empty items, `WithoutToc` otherwise.
    pub fn from_items(items: &'a [TocEntry]) -> Self {
        if items.is_empty() {
            Self::WithoutToc
        } else {
            Self::WithToc(items)
        }
    }
}

/// One region of the documentation layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region<'a> {
    Header {
        menu: &'a MenuTree,
        current_section: &'a Section,
    },
    Sidebar {
        menu: &'a MenuTree,
        current_section: &'a Section,
        anchor: &'a LayoutAnchor,
    },
    TableOfContents {
        items: &'a [TocEntry],
    },
    ArticleHeader {
        section: &'a Section,
        chapter: Option<&'a Chapter>,
        title: &'a str,
        description: &'a str,
    },
    Content {
        html: &'a str,
    },
    ArticleNavigation {
        next: Option<&'a NavLink>,
        previous: Option<&'a NavLink>,
    },
    Footer,
}

/// Error composing a page.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// A page ready for layout.
///
/// Borrows the menu, the frontmatter and the rendered content for the
/// duration of one render.
#[derive(Debug)]
pub struct ComposedPage<'a> {
    /// Site path of the page.
    pub path: &'a str,
    pub metadata: SeoMetadata,
    pub navigation: ResolvedNavigation<'a>,
    pub menu: &'a MenuTree,
    pub anchor: LayoutAnchor,
    pub toc: TocSlot<'a>,
    pub title: &'a str,
    pub description: &'a str,
    pub content: &'a str,
    pub next: Option<&'a NavLink>,
    pub previous: Option<&'a NavLink>,
}

impl ComposedPage<'_> {
    /// Layout regions in render order.
    ///
    /// The table of contents is present only for [`TocSlot::WithToc`].
    pub fn regions(&self) -> Vec<Region<'_>> {
        let current_section = self.navigation.current_section;
        let mut regions = Vec::with_capacity(7);

        regions.push(Region::Header {
            menu: self.menu,
            current_section,
        });
        regions.push(Region::Sidebar {
            menu: self.menu,
            current_section,
            anchor: &self.anchor,
        });
        if let TocSlot::WithToc(items) = self.toc {
            regions.push(Region::TableOfContents { items });
        }
        regions.push(Region::ArticleHeader {
            section: current_section,
            chapter: self.navigation.current_chapter,
            title: self.title,
            description: self.description,
        });
        regions.push(Region::Content { html: self.content });
        regions.push(Region::ArticleNavigation {
            next: self.next,
            previous: self.previous,
        });
        regions.push(Region::Footer);

        regions
    }
}

/// Composes documentation pages.
#[derive(Clone, Copy, Debug, Default)]
pub struct PageComposer {
    policy: NavigationPolicy,
}

impl PageComposer {
    /// Composer with lenient navigation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how unknown sections are treated.
    #[must_use]
    pub fn with_policy(mut self, policy: NavigationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> NavigationPolicy {
        self.policy
    }

    /// Compose one page.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Navigation`] when the page's section is not
    /// in the menu and the policy is [`NavigationPolicy::Strict`].
    pub fn compose<'a>(
        &self,
        content: &'a str,
        frontmatter: &'a Frontmatter,
        context: &'a PageContext,
        toc_items: &'a [TocEntry],
    ) -> Result<ComposedPage<'a>, ComposeError> {
        let menu = context.menu.as_ref();
        let navigation = menu.resolve_with(&frontmatter.location(), self.policy)?;

        if !navigation.section_matched {
            tracing::warn!(
                page = %context.path,
                section = %frontmatter.section,
                fallback = %navigation.current_section.title,
                "Unknown section, using first menu section"
            );
        }

        Ok(ComposedPage {
            path: &context.path,
            metadata: SeoMetadata::from_frontmatter(frontmatter),
            navigation,
            menu,
            anchor: LayoutAnchor::sidebar(),
            toc: TocSlot::from_items(toc_items),
            title: &frontmatter.title,
            description: &frontmatter.description,
            content,
            next: context.next.as_ref(),
            previous: context.previous.as_ref(),
        })
    }
}
