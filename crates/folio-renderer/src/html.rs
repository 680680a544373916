//! HTML backend for markdown rendering.
//!
//! Produces semantic HTML5 output suitable for web display.

use std::borrow::Cow;
use std::fmt::Write;

use crate::backend::{AlertKind, RenderBackend};
use crate::state::escape_html;
use crate::util::page_url;

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<pre><code>` for code blocks
/// - self-linking anchors inside headings
/// - `<div class="alert">` blocks for GFM alerts
/// - clean-URL rewriting of relative `.md` links
/// - relative asset references rebased to the page's directory
#[derive(Debug)]
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
        }
    }

    fn heading_start(level: u8, id: &str, out: &mut String) {
        write!(
            out,
            r##"<h{level} id="{id}"><a class="anchor" href="#{id}" aria-hidden="true">#</a>"##
        )
        .unwrap();
    }

    fn heading_end(level: u8, out: &mut String) {
        write!(out, "</h{level}>").unwrap();
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn alert_start(kind: AlertKind, out: &mut String) {
        let (class, label) = kind.class_and_label();
        write!(
            out,
            r#"<div class="alert alert-{class}"><p class="alert-title">{label}</p>"#
        )
        .unwrap();
    }

    fn alert_end(_kind: AlertKind, out: &mut String) {
        out.push_str("</div>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}" loading="lazy">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }

    fn transform_link<'a>(url: &'a str, base_path: Option<&str>, prefix: &str) -> Cow<'a, str> {
        match base_path {
            Some(base) => resolve_link(url, base, prefix),
            None => Cow::Borrowed(url),
        }
    }
}

/// Resolve a link or image URL relative to the directory of the current page.
///
/// Pages are written one directory deeper than their source file, so every
/// relative reference is rebased to an absolute site URL:
/// - `./sibling.md` → `/base/sibling/`
/// - `../parent.md#usage` → `/parent/#usage`
/// - `setup/index.md` → `/base/setup/`
/// - `img/flow.png` → `/base/img/flow.png`
///
/// URLs with a scheme, protocol-relative, fragment-only and absolute
/// non-markdown URLs are returned unchanged.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
fn resolve_link<'a>(url: &'a str, base_dir: &str, prefix: &str) -> Cow<'a, str> {
    if url.is_empty() || url.starts_with("//") || url.starts_with('#') || has_scheme(url) {
        return Cow::Borrowed(url);
    }

    let (path_part, fragment) = match url.find(['?', '#']) {
        Some(pos) => (&url[..pos], &url[pos..]),
        None => (url, ""),
    };

    if !path_part.ends_with(".md") {
        if path_part.starts_with('/') {
            return Cow::Borrowed(url);
        }
        let resolved = resolve_relative_path(path_part, base_dir);
        return Cow::Owned(format!("{prefix}/{resolved}{fragment}"));
    }

    let resolved = if let Some(absolute) = path_part.strip_prefix('/') {
        absolute.to_owned()
    } else {
        resolve_relative_path(path_part, base_dir)
    };

    let clean = resolved.strip_suffix(".md").unwrap_or(&resolved);
    let clean = if clean == "index" {
        ""
    } else {
        clean.strip_suffix("/index").unwrap_or(clean)
    };

    Cow::Owned(format!("{}{fragment}", page_url(prefix, clean)))
}

/// `mailto:`, `https:`, `data:` and the like.
fn has_scheme(url: &str) -> bool {
    url.split_once(':').is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Resolve a relative path against a base directory.
///
/// `..` above the root is clamped at the root.
fn resolve_relative_path(relative: &str, base: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}
