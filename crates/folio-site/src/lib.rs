//! Documentation page composition and static site building.
//!
//! A site is a tree of markdown pages plus a menu of sections and chapters.
//! Each page declares, in its frontmatter, the section and chapter it belongs
//! to. Rendering a page:
//!
//! 1. [`Frontmatter::parse`] splits the YAML header from the markdown body.
//! 2. The body is rendered to HTML with a table of contents.
//! 3. [`PageComposer::compose`] resolves the declared location against the
//!    menu ([`MenuTree::resolve`]), derives [`SeoMetadata`] and lays out the
//!    page [`Region`]s in order.
//! 4. [`render_page`] writes the full HTML document.
//!
//! [`SiteBuilder`] runs this for every page in a source directory.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use folio_site::{Frontmatter, LayoutOptions, MenuTree, PageComposer, PageContext, render_page};
//!
//! let menu = Arc::new(MenuTree::from_yaml("- title: Guide\n  chapters:\n    - title: Intro\n").unwrap());
//! let (frontmatter, _body) =
//!     Frontmatter::parse("---\nsection: Guide\nchapter: Intro\ntitle: Hello\n---\n").unwrap();
//! let context = PageContext::for_path(menu, "guide/intro");
//!
//! let page = PageComposer::new()
//!     .compose("<p>Hi</p>", &frontmatter, &context, &[])
//!     .unwrap();
//! assert_eq!(page.navigation.current_chapter.unwrap().title, "Intro");
//!
//! let html = render_page(&page, &LayoutOptions::default());
//! assert!(html.contains("<title>Hello | Documentation</title>"));
//! ```

mod builder;
mod composer;
mod context;
mod frontmatter;
mod navigation;
mod scanner;
mod seo;
mod template;

pub use builder::{BuildConfig, BuildError, BuildReport, PageError, SectionFallback, SiteBuilder};
pub use composer::{ComposeError, ComposedPage, LayoutAnchor, PageComposer, Region, TocSlot};
pub use context::PageContext;
pub use frontmatter::{Frontmatter, FrontmatterError, split_frontmatter};
pub use navigation::{
    Chapter, MenuError, MenuTree, NavLink, NavigationError, NavigationPolicy, PageLocation,
    ResolvedNavigation, Section, resolve_navigation,
};
pub use seo::{MetaTag, SeoMetadata};
pub use template::{LayoutOptions, render_page};
