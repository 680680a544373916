//! HTML page template for static site generation.
//!
//! Walks the regions of a [`ComposedPage`] in order and wraps them in the
//! responsive layout: full-width header, a sticky sidebar hidden below `lg`,
//! a sticky table of contents shown from `xl`, the article column and a
//! full-width footer. Class names are Tailwind utilities.

use std::fmt::Write;

use folio_renderer::{TocEntry, escape_html, page_url};

use crate::composer::{ComposedPage, LayoutAnchor, Region};
use crate::navigation::{Chapter, MenuTree, NavLink, Section};
use crate::seo::SeoMetadata;

/// Site-wide settings for the page layout.
#[derive(Clone, Debug)]
pub struct LayoutOptions {
    /// Site name shown in the header and appended to page titles.
    pub site_title: String,
    /// Description used by pages that declare none.
    pub site_description: Option<String>,
    /// Footer text; defaults to the site title.
    pub footer: Option<String>,
    /// URL prefix the site is served under (`""` or `/docs`).
    pub path_prefix: String,
    /// `lang` attribute of the document.
    pub language: String,
    /// Stylesheet URL.
    pub stylesheet: Option<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            site_title: "Documentation".to_owned(),
            site_description: None,
            footer: None,
            path_prefix: String::new(),
            language: "en".to_owned(),
            stylesheet: None,
        }
    }
}

impl LayoutOptions {
    fn url(&self, path: &str) -> String {
        escape_html(&page_url(&self.path_prefix, path))
    }
}

/// Markup of each layout slot, filled region by region.
#[derive(Default)]
struct Slots {
    header: String,
    sidebar: String,
    toc: String,
    article: String,
    navigation: String,
    footer: String,
}

/// Render a complete HTML document for a composed page.
///
/// Every region renders balanced markup into its slot; the layout wrappers
/// are emitted once all slots are filled.
pub fn render_page(page: &ComposedPage<'_>, options: &LayoutOptions) -> String {
    let mut slots = Slots::default();

    for region in page.regions() {
        match region {
            Region::Header {
                menu,
                current_section,
            } => render_header(&mut slots.header, menu, current_section, options),
            Region::Sidebar {
                menu,
                current_section,
                anchor,
            } => render_sidebar(
                &mut slots.sidebar,
                menu,
                current_section,
                anchor,
                page.path,
                options,
            ),
            Region::TableOfContents { items } => render_toc(&mut slots.toc, items),
            Region::ArticleHeader {
                section,
                chapter,
                title,
                description,
            } => render_article_header(&mut slots.article, section, chapter, title, description),
            Region::Content { html: content } => {
                slots.article.push_str("<div class=\"markdown\">\n");
                slots.article.push_str(content);
                slots.article.push_str("\n</div>\n");
            }
            Region::ArticleNavigation { next, previous } => {
                render_article_navigation(&mut slots.navigation, previous, next, options);
            }
            Region::Footer => render_footer(&mut slots.footer, options),
        }
    }

    let mut html = String::with_capacity(8192 + page.content.len());
    render_head(&mut html, &page.metadata, options);
    html.push_str(&slots.header);
    html.push_str("<div class=\"w-full max-w-screen-xl mx-auto px-6\">\n");
    html.push_str("<div class=\"lg:flex -mx-6\">\n");
    html.push_str(&slots.sidebar);
    html.push_str("<div class=\"w-full lg:flex lg:w-3/4 xl:w-4/5\">\n");
    // Column stays in place without a TOC so the article keeps its width
    html.push_str("<div class=\"hidden xl:block xl:w-1/4 xl:px-6 order-last\">\n");
    html.push_str(&slots.toc);
    html.push_str("</div>\n");
    html.push_str(
        "<div class=\"px-6 pt-26 pb-12 w-full max-w-3xl mx-auto xl:px-12 \
         lg:ml-0 lg:mr-auto xl:mx-0 xl:w-3/4\">\n",
    );
    html.push_str("<article class=\"content\" id=\"page-content\">\n");
    html.push_str(&slots.article);
    html.push_str("</article>\n");
    html.push_str(&slots.navigation);
    html.push_str("</div>\n</div>\n</div>\n</div>\n");
    html.push_str(&slots.footer);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_head(html: &mut String, metadata: &SeoMetadata, options: &LayoutOptions) {
    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>",
        escape_html(&options.language)
    );
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");

    let title = if metadata.title.is_empty() || metadata.title == options.site_title {
        escape_html(&options.site_title)
    } else {
        format!(
            "{} | {}",
            escape_html(&metadata.title),
            escape_html(&options.site_title)
        )
    };
    let _ = writeln!(html, "<title>{title}</title>");

    let description = if metadata.description.is_empty() {
        options.site_description.as_deref().unwrap_or_default()
    } else {
        metadata.description.as_str()
    };
    if !description.is_empty() {
        write_meta(html, "description", description);
    }
    if !metadata.keywords.is_empty() {
        write_meta(html, "keywords", &metadata.keywords.join(", "));
    }
    for tag in &metadata.meta {
        write_meta(html, &tag.name, &tag.content);
    }

    let _ = writeln!(
        html,
        "<meta property=\"og:title\" content=\"{}\">",
        escape_html(&metadata.title)
    );
    if !description.is_empty() {
        let _ = writeln!(
            html,
            "<meta property=\"og:description\" content=\"{}\">",
            escape_html(description)
        );
    }
    html.push_str("<meta property=\"og:type\" content=\"website\">\n");

    if let Some(stylesheet) = &options.stylesheet {
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{}\">",
            escape_html(stylesheet)
        );
    }
    html.push_str("</head>\n<body class=\"antialiased text-gray-900 bg-white\">\n");
}

fn write_meta(html: &mut String, name: &str, content: &str) {
    let _ = writeln!(
        html,
        "<meta name=\"{}\" content=\"{}\">",
        escape_html(name),
        escape_html(content)
    );
}

/// Site title and one link per section.
fn render_header(
    html: &mut String,
    menu: &MenuTree,
    current_section: &Section,
    options: &LayoutOptions,
) {
    html.push_str("<header class=\"w-full border-b border-gray-200 bg-white\">\n");
    html.push_str("<div class=\"w-full max-w-screen-xl mx-auto px-6 flex items-center h-16\">\n");
    let _ = writeln!(
        html,
        "<a href=\"{}\" class=\"mr-8 text-lg font-semibold text-gray-900\">{}</a>",
        options.url(""),
        escape_html(&options.site_title)
    );
    html.push_str("<nav class=\"hidden lg:flex space-x-6\">\n");
    for section in menu.sections() {
        let is_current = std::ptr::eq(section, current_section);
        let (classes, current) = if is_current {
            ("text-blue-700", " aria-current=\"true\"")
        } else {
            ("text-gray-600 hover:text-gray-900", "")
        };
        match section.link_path() {
            Some(path) => {
                let _ = writeln!(
                    html,
                    "<a href=\"{}\" class=\"text-sm font-medium {classes}\"{current}>{}</a>",
                    options.url(path),
                    escape_html(&section.title)
                );
            }
            None => {
                let _ = writeln!(
                    html,
                    "<span class=\"text-sm font-medium {classes}\"{current}>{}</span>",
                    escape_html(&section.title)
                );
            }
        }
    }
    html.push_str("</nav>\n</div>\n</header>\n");
}

/// All sections, with the current one expanded to its chapters.
fn render_sidebar(
    html: &mut String,
    menu: &MenuTree,
    current_section: &Section,
    anchor: &LayoutAnchor,
    page_path: &str,
    options: &LayoutOptions,
) {
    html.push_str("<div class=\"hidden w-1/4 lg:block xl:w-1/5\">\n");
    let _ = writeln!(
        html,
        "<div id=\"{}\" class=\"pl-6 pr-8 pt-10 pb-6 sticky top-0 left-0 max-h-screen \
         overflow-y-auto border-t border-t-transparent\" style=\"border-top-width: 4rem\">",
        escape_html(anchor.id())
    );
    html.push_str("<nav>\n");

    for section in menu.sections() {
        html.push_str("<div class=\"mb-6\">\n");
        let title = escape_html(&section.title);
        match section.link_path() {
            Some(path) => {
                let _ = writeln!(
                    html,
                    "<a href=\"{}\" class=\"block mb-2 text-xs font-semibold uppercase \
                     tracking-wider text-gray-600 hover:text-gray-900\">{title}</a>",
                    options.url(path)
                );
            }
            None => {
                let _ = writeln!(
                    html,
                    "<p class=\"mb-2 text-xs font-semibold uppercase tracking-wider \
                     text-gray-600\">{title}</p>"
                );
            }
        }

        if std::ptr::eq(section, current_section) && !section.chapters.is_empty() {
            html.push_str("<ul class=\"space-y-1\">\n");
            for chapter in &section.chapters {
                render_sidebar_chapter(html, chapter, page_path, options);
            }
            html.push_str("</ul>\n");
        }
        html.push_str("</div>\n");
    }

    html.push_str("</nav>\n");
    let _ = writeln!(
        html,
        "<script>(function(){{var w=document.getElementById(\"{}\");\
         var a=w&&w.querySelector(\"[aria-current=page]\");\
         if(a){{w.scrollTop=a.offsetTop-w.clientHeight/2;}}}})();</script>",
        escape_html(anchor.id())
    );
    html.push_str("</div>\n</div>\n");
}

fn render_sidebar_chapter(
    html: &mut String,
    chapter: &Chapter,
    page_path: &str,
    options: &LayoutOptions,
) {
    let title = escape_html(&chapter.title);
    let Some(path) = chapter.path.as_deref() else {
        let _ = writeln!(
            html,
            "<li><span class=\"block py-1 text-sm text-gray-400\">{title}</span></li>"
        );
        return;
    };

    let (classes, current) = if path.trim_matches('/') == page_path {
        ("text-blue-700 font-medium", " aria-current=\"page\"")
    } else {
        ("text-gray-700 hover:text-gray-900", "")
    };
    let _ = writeln!(
        html,
        "<li><a href=\"{}\" class=\"block py-1 text-sm {classes}\"{current}>{title}</a></li>",
        options.url(path)
    );
}

fn render_toc(html: &mut String, items: &[TocEntry]) {
    html.push_str(
        "<div class=\"pt-10 pb-8 sticky top-0 left-0 max-h-screen overflow-y-auto \
         border-t-transparent\" style=\"border-top-width: 4rem\">\n",
    );
    html.push_str(
        "<h3 class=\"text-xs font-semibold text-gray-600 uppercase \
         tracking-wider mb-3\">On this page</h3>\n",
    );
    html.push_str("<ul class=\"space-y-1.5\">\n");
    for entry in items {
        let indent = match entry.level {
            0..=2 => "",
            3 => " class=\"ml-3\"",
            _ => " class=\"ml-6\"",
        };
        let _ = writeln!(
            html,
            "<li{indent}><a href=\"#{}\" class=\"block text-sm leading-snug \
             text-gray-600 hover:text-gray-900\">{}</a></li>",
            escape_html(&entry.id),
            escape_html(&entry.title),
        );
    }
    html.push_str("</ul>\n</div>\n");
}

fn render_article_header(
    html: &mut String,
    section: &Section,
    chapter: Option<&Chapter>,
    title: &str,
    description: &str,
) {
    html.push_str("<header class=\"mb-8\">\n");
    let _ = write!(
        html,
        "<p class=\"text-sm font-medium text-blue-700\">{}",
        escape_html(&section.title)
    );
    if let Some(chapter) = chapter {
        let _ = write!(
            html,
            "<span class=\"text-gray-400\"> / </span>{}",
            escape_html(&chapter.title)
        );
    }
    html.push_str("</p>\n");
    let _ = writeln!(
        html,
        "<h1 class=\"mt-2 text-3xl font-bold text-gray-900\">{}</h1>",
        escape_html(title)
    );
    if !description.is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"mt-2 text-lg text-gray-600\">{}</p>",
            escape_html(description)
        );
    }
    html.push_str("</header>\n");
}

fn render_article_navigation(
    html: &mut String,
    previous: Option<&NavLink>,
    next: Option<&NavLink>,
    options: &LayoutOptions,
) {
    if previous.is_none() && next.is_none() {
        return;
    }
    html.push_str(
        "<nav class=\"mt-12 pt-6 border-t border-gray-200 flex justify-between\" \
         aria-label=\"Pagination\">\n",
    );
    for (link, rel, label, align) in [
        (previous, "prev", "Previous", ""),
        (next, "next", "Next", " text-right ml-auto"),
    ] {
        if let Some(link) = link {
            let _ = writeln!(
                html,
                "<a href=\"{}\" rel=\"{rel}\" class=\"block{align}\">\
                 <span class=\"block text-xs text-gray-500\">{label}</span>\
                 <span class=\"text-base font-medium text-blue-700\">{}</span></a>",
                options.url(&link.path),
                escape_html(&link.title)
            );
        }
    }
    html.push_str("</nav>\n");
}

fn render_footer(html: &mut String, options: &LayoutOptions) {
    let text = options.footer.as_deref().unwrap_or(&options.site_title);
    let _ = writeln!(
        html,
        "<div class=\"pt-12\">\n<footer class=\"border-t border-gray-200 py-8 text-center \
         text-sm text-gray-500\">{}</footer>\n</div>",
        escape_html(text)
    );
}
