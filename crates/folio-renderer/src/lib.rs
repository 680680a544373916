//! Trait-based markdown renderer for documentation pages.
//!
//! This crate provides a generic [`MarkdownRenderer`] that produces the
//! article body of a page together with its table of contents, using the
//! [`RenderBackend`] trait for markup decisions.
//!
//! # Architecture
//!
//! - [`HtmlBackend`]: semantic HTML5 with heading anchors and clean-URL
//!   rewriting of relative `.md` links
//!
//! Shared functionality (tables, lists, inline formatting, heading ids and
//! TOC collection) is handled by the generic renderer.
//!
//! # Example
//!
//! ```
//! use folio_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new()
//!     .with_base_path("guide")
//!     .render_markdown("## Install\n\nSee [setup](./setup.md).");
//!
//! assert_eq!(result.toc[0].id, "install");
//! assert!(result.html.contains(r#"href="/guide/setup/""#));
//! ```

mod backend;
mod html;
mod renderer;
mod state;
mod util;

pub use backend::{AlertKind, RenderBackend};
pub use html::HtmlBackend;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{DEFAULT_TOC_DEPTH, TocEntry, escape_html, slugify};
pub use util::page_url;
