//! Static site builder.
//!
//! Loads the menu, discovers pages under the source directory and renders
//! each one to `<output>/<path>/index.html`. Pages are independent, so they
//! are rendered on the rayon thread pool against one shared menu.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use folio_renderer::{DEFAULT_TOC_DEPTH, HtmlBackend, MarkdownRenderer};
use rayon::prelude::*;

use crate::composer::{ComposeError, PageComposer};
use crate::context::PageContext;
use crate::frontmatter::{Frontmatter, FrontmatterError};
use crate::navigation::{MenuError, MenuTree, NavigationPolicy};
use crate::scanner::{self, Asset, SourcePage};
use crate::template::{LayoutOptions, render_page};

/// Configuration for a site build.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Directory containing markdown sources and assets.
    pub source_dir: PathBuf,
    /// Directory the site is written to.
    pub output_dir: PathBuf,
    /// Menu definition (YAML or JSON).
    pub menu_path: PathBuf,
    /// Treatment of pages whose section is not in the menu.
    pub policy: NavigationPolicy,
    /// Deepest heading level listed in the table of contents.
    pub toc_depth: u8,
    /// Site-wide layout settings.
    pub layout: LayoutOptions,
    /// Extra paths under the source directory that are never published
    /// (e.g. the config file). The output directory and menu are always
    /// skipped.
    pub exclude: Vec<PathBuf>,
}

impl BuildConfig {
    /// Configuration with lenient navigation and default layout.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        menu_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            menu_path: menu_path.into(),
            policy: NavigationPolicy::default(),
            toc_depth: DEFAULT_TOC_DEPTH,
            layout: LayoutOptions::default(),
            exclude: Vec::new(),
        }
    }
}

/// A page rendered under the first menu section because its declared
/// section does not exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionFallback {
    /// Source file of the page.
    pub source: PathBuf,
    /// Section title the page declared.
    pub declared: String,
    /// Section title used instead.
    pub used: String,
}

/// Summary of a build or check run.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Pages rendered.
    pub pages: usize,
    /// Assets copied (always 0 for a check).
    pub assets: usize,
    /// Pages that fell back to the first section, sorted by source path.
    pub fallbacks: Vec<SectionFallback>,
}

/// Error for a single page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error(transparent)]
    Menu(#[from] MenuError),
    #[error("{}: {source}", path.display())]
    Page { path: PathBuf, source: PageError },
    #[error("{} and {} both map to /{url}", first.display(), second.display())]
    DuplicateUrl {
        url: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Builds a static documentation site.
pub struct SiteBuilder {
    config: BuildConfig,
    composer: PageComposer,
}

impl SiteBuilder {
    pub fn new(config: BuildConfig) -> Self {
        let composer = PageComposer::new().with_policy(config.policy);
        Self { config, composer }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Render every page and write the site to the output directory.
    ///
    /// # Errors
    ///
    /// Aborts on the first failing page, naming its source file.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        self.run(true)
    }

    /// Render every page without writing anything.
    ///
    /// # Errors
    ///
    /// Same as [`SiteBuilder::build`].
    pub fn check(&self) -> Result<BuildReport, BuildError> {
        self.run(false)
    }

    fn run(&self, write: bool) -> Result<BuildReport, BuildError> {
        let start = Instant::now();

        if !self.config.source_dir.is_dir() {
            return Err(BuildError::SourceNotFound(self.config.source_dir.clone()));
        }
        let menu = Arc::new(MenuTree::load(&self.config.menu_path)?);
        let scan = scanner::scan(&self.config.source_dir, &self.excluded_paths());
        check_duplicate_urls(&scan.pages)?;

        tracing::debug!(
            pages = scan.pages.len(),
            assets = scan.assets.len(),
            sections = menu.sections().len(),
            "Sources scanned"
        );

        let outcomes: Vec<Option<SectionFallback>> = scan
            .pages
            .par_iter()
            .map(|page| self.process_page(&menu, page, write))
            .collect::<Result<_, _>>()?;

        let assets = if write {
            scan.assets
                .par_iter()
                .try_for_each(|asset| self.copy_asset(asset))?;
            scan.assets.len()
        } else {
            0
        };

        let mut fallbacks: Vec<_> = outcomes.into_iter().flatten().collect();
        fallbacks.sort_by(|a, b| a.source.cmp(&b.source));

        let report = BuildReport {
            pages: scan.pages.len(),
            assets,
            fallbacks,
        };
        tracing::info!(
            pages = report.pages,
            assets = report.assets,
            fallbacks = report.fallbacks.len(),
            elapsed = ?start.elapsed(),
            write,
            "Site processed"
        );
        Ok(report)
    }

    fn excluded_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![
            self.config.output_dir.clone(),
            self.config.menu_path.clone(),
        ];
        paths.extend(self.config.exclude.iter().cloned());
        paths
    }

    fn process_page(
        &self,
        menu: &Arc<MenuTree>,
        page: &SourcePage,
        write: bool,
    ) -> Result<Option<SectionFallback>, BuildError> {
        let (html, fallback) = self
            .render_source(menu, page)
            .map_err(|source| BuildError::Page {
                path: page.source_path.clone(),
                source,
            })?;

        if write {
            let path = output_file(&self.config.output_dir, &page.url_path);
            write_file(&path, html.as_bytes())?;
            tracing::debug!(path = %path.display(), "Page written");
        }

        Ok(fallback)
    }

    fn render_source(
        &self,
        menu: &Arc<MenuTree>,
        page: &SourcePage,
    ) -> Result<(String, Option<SectionFallback>), PageError> {
        let document = fs::read_to_string(&page.source_path)?;
        let (mut frontmatter, body) = Frontmatter::parse(&document)?;

        let rendered = MarkdownRenderer::<HtmlBackend>::new()
            .with_title_extraction()
            .with_toc_depth(self.config.toc_depth)
            .with_base_path(page.dir.as_str())
            .with_path_prefix(self.config.layout.path_prefix.as_str())
            .render_markdown(body);

        if frontmatter.title.trim().is_empty()
            && let Some(title) = rendered.title.clone()
        {
            frontmatter.title = title;
        }

        let context = PageContext::for_path(Arc::clone(menu), &page.url_path);
        let composed = self
            .composer
            .compose(&rendered.html, &frontmatter, &context, &rendered.toc)?;

        let fallback = (!composed.navigation.section_matched).then(|| SectionFallback {
            source: page.source_path.clone(),
            declared: frontmatter.section.clone(),
            used: composed.navigation.current_section.title.clone(),
        });

        Ok((render_page(&composed, &self.config.layout), fallback))
    }

    fn copy_asset(&self, asset: &Asset) -> Result<(), BuildError> {
        let target = self.config.output_dir.join(&asset.relative);
        let write_error = |source| BuildError::Write {
            path: target.clone(),
            source,
        };
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::copy(&asset.source_path, &target).map_err(write_error)?;
        Ok(())
    }
}

/// `<output>/<url>/index.html`, or `<output>/index.html` for the home page.
fn output_file(output_dir: &Path, url_path: &str) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    path.extend(url_path.split('/').filter(|s| !s.is_empty()));
    path.push("index.html");
    path
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), BuildError> {
    let write_error = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, content).map_err(write_error)
}

/// Reject two sources mapping to the same URL (`guide.md` and `guide/index.md`).
///
/// Expects pages sorted by URL path.
fn check_duplicate_urls(pages: &[SourcePage]) -> Result<(), BuildError> {
    for pair in pages.windows(2) {
        if pair[0].url_path == pair[1].url_path {
            return Err(BuildError::DuplicateUrl {
                url: pair[0].url_path.clone(),
                first: pair[0].source_path.clone(),
                second: pair[1].source_path.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::navigation::NavigationError;

    const MENU: &str = r"
- title: Guide
  chapters:
    - title: Intro
      path: guide/intro
    - title: Setup
      path: guide/setup
- title: API
  chapters:
    - title: Ref
      path: api/ref
";

    struct Fixture {
        _temp_dir: tempfile::TempDir,
        config: BuildConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let root = temp_dir.path();
            fs::write(root.join("menu.yaml"), MENU).unwrap();
            fs::create_dir_all(root.join("docs")).unwrap();
            let config = BuildConfig::new(
                root.join("docs"),
                root.join("public"),
                root.join("menu.yaml"),
            );
            Self {
                _temp_dir: temp_dir,
                config,
            }
        }

        fn page(&self, relative: &str, frontmatter: &str, body: &str) -> &Self {
            let path = self.config.source_dir.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, format!("---\n{frontmatter}---\n{body}")).unwrap();
            self
        }

        fn output(&self, relative: &str) -> String {
            fs::read_to_string(self.config.output_dir.join(relative)).unwrap()
        }
    }

    #[test]
    fn test_build_writes_pages() {
        let fixture = Fixture::new();
        fixture
            .page(
                "guide/intro.md",
                "section: Guide\nchapter: Intro\ntitle: Introduction\n",
                "## Overview\n\nSee [setup](./setup.md).\n",
            )
            .page(
                "guide/setup.md",
                "section: Guide\nchapter: Setup\ntitle: Setup\n",
                "Install it.\n",
            )
            .page("index.md", "section: Guide\ntitle: Home\n", "Welcome\n");

        let report = SiteBuilder::new(fixture.config.clone()).build().unwrap();

        assert_eq!(report.pages, 3);
        assert!(report.fallbacks.is_empty());

        let intro = fixture.output("guide/intro/index.html");
        assert!(intro.contains("<title>Introduction | Documentation</title>"));
        assert!(intro.contains("<a href=\"/guide/setup/\">setup</a>"));
        assert!(intro.contains("On this page"));
        assert!(intro.contains("<a href=\"/guide/setup/\" rel=\"next\""));

        let home = fixture.output("index.html");
        assert!(home.contains("<p>Welcome</p>"));
        assert!(!home.contains("On this page"));
    }

    #[test]
    fn test_build_reports_section_fallback() {
        let fixture = Fixture::new();
        fixture.page(
            "api/ref.md",
            "section: Reference\nchapter: Ref\ntitle: Ref\n",
            "Body\n",
        );

        let report = SiteBuilder::new(fixture.config.clone()).build().unwrap();

        assert_eq!(
            report.fallbacks,
            vec![SectionFallback {
                source: fixture.config.source_dir.join("api/ref.md"),
                declared: "Reference".to_owned(),
                used: "Guide".to_owned(),
            }]
        );
        let html = fixture.output("api/ref/index.html");
        assert!(html.contains("<h1 class=\"mt-2 text-3xl font-bold text-gray-900\">Ref</h1>"));
    }

    #[test]
    fn test_build_strict_rejects_unknown_section() {
        let fixture = Fixture::new();
        fixture.page("api/ref.md", "section: Reference\ntitle: Ref\n", "");
        let config = BuildConfig {
            policy: NavigationPolicy::Strict,
            ..fixture.config.clone()
        };

        let err = SiteBuilder::new(config).build().unwrap_err();

        let BuildError::Page { path, source } = err else {
            panic!("expected page error");
        };
        assert!(path.ends_with("api/ref.md"));
        assert!(matches!(
            source,
            PageError::Compose(ComposeError::Navigation(NavigationError::UnknownSection(_)))
        ));
    }

    #[test]
    fn test_build_missing_frontmatter_names_file() {
        let fixture = Fixture::new();
        let path = fixture.config.source_dir.join("bare.md");
        fs::write(&path, "# No frontmatter\n").unwrap();

        let err = SiteBuilder::new(fixture.config.clone()).build().unwrap_err();

        assert!(matches!(
            &err,
            BuildError::Page {
                source: PageError::Frontmatter(FrontmatterError::Missing),
                ..
            }
        ));
        assert!(err.to_string().contains("bare.md"));
    }

    #[test]
    fn test_build_copies_assets() {
        let fixture = Fixture::new();
        fixture.page("guide/intro.md", "section: Guide\ntitle: Intro\n", "");
        let image = fixture.config.source_dir.join("guide/flow.png");
        fs::write(&image, b"png").unwrap();

        let report = SiteBuilder::new(fixture.config.clone()).build().unwrap();

        assert_eq!(report.assets, 1);
        assert_eq!(fixture.output("guide/flow.png"), "png");
    }

    #[test]
    fn test_build_relative_image_matches_copied_asset() {
        let fixture = Fixture::new();
        fixture.page(
            "guide/setup.md",
            "section: Guide\nchapter: Setup\ntitle: Setup\n",
            "![flow](flow.png)\n",
        );
        fs::write(fixture.config.source_dir.join("guide/flow.png"), b"png").unwrap();
        let config = BuildConfig {
            layout: LayoutOptions {
                path_prefix: "/docs".to_owned(),
                ..LayoutOptions::default()
            },
            ..fixture.config.clone()
        };

        SiteBuilder::new(config).build().unwrap();

        let html = fixture.output("guide/setup/index.html");
        assert!(html.contains(r#"<img src="/docs/guide/flow.png""#));
        assert_eq!(fixture.output("guide/flow.png"), "png");
    }

    #[test]
    fn test_build_output_inside_source_not_republished() {
        let fixture = Fixture::new();
        let root = fixture.config.source_dir.parent().unwrap().to_path_buf();
        fs::write(root.join("folio.toml"), "").unwrap();
        fs::write(root.join("logo.png"), b"png").unwrap();
        fs::write(
            root.join("page.md"),
            "---\nsection: Guide\ntitle: Page\n---\nBody\n",
        )
        .unwrap();
        fs::remove_dir_all(&fixture.config.source_dir).unwrap();
        let config = BuildConfig {
            source_dir: root.clone(),
            output_dir: root.join("public"),
            exclude: vec![root.join("folio.toml")],
            ..fixture.config.clone()
        };
        let builder = SiteBuilder::new(config);

        let reports: Vec<_> = (0..3).map(|_| builder.build().unwrap()).collect();

        assert!(reports.iter().all(|r| r.pages == 1 && r.assets == 1));
        assert!(root.join("public/page/index.html").exists());
        assert!(root.join("public/logo.png").exists());
        assert!(!root.join("public/public").exists());
        assert!(!root.join("public/menu.yaml").exists());
        assert!(!root.join("public/folio.toml").exists());
    }

    #[test]
    fn test_build_empty_title_uses_first_heading() {
        let fixture = Fixture::new();
        fixture.page(
            "guide/intro.md",
            "section: Guide\nchapter: Intro\ntitle: \"\"\n",
            "# Getting Started\n\nBody\n",
        );

        SiteBuilder::new(fixture.config.clone()).build().unwrap();

        let html = fixture.output("guide/intro/index.html");
        assert!(html.contains("<title>Getting Started | Documentation</title>"));
    }

    #[test]
    fn test_check_writes_nothing() {
        let fixture = Fixture::new();
        fixture.page("guide/intro.md", "section: Nope\ntitle: Intro\n", "");

        let report = SiteBuilder::new(fixture.config.clone()).check().unwrap();

        assert_eq!(report.pages, 1);
        assert_eq!(report.fallbacks.len(), 1);
        assert!(!fixture.config.output_dir.exists());
    }

    #[test]
    fn test_build_duplicate_urls() {
        let fixture = Fixture::new();
        fixture
            .page("guide.md", "title: A\n", "")
            .page("guide/index.md", "title: B\n", "");

        let err = SiteBuilder::new(fixture.config.clone()).build().unwrap_err();

        assert!(matches!(err, BuildError::DuplicateUrl { ref url, .. } if url == "guide"));
    }

    #[test]
    fn test_build_missing_source_dir() {
        let fixture = Fixture::new();
        let config = BuildConfig {
            source_dir: fixture.config.source_dir.join("missing"),
            ..fixture.config.clone()
        };

        let err = SiteBuilder::new(config).build().unwrap_err();
        assert!(matches!(err, BuildError::SourceNotFound(_)));
    }

    #[test]
    fn test_build_empty_menu() {
        let fixture = Fixture::new();
        fs::write(&fixture.config.menu_path, "[]").unwrap();

        let err = SiteBuilder::new(fixture.config.clone()).build().unwrap_err();
        assert!(matches!(err, BuildError::Menu(MenuError::Parse(_))));
    }

    #[test]
    fn test_output_file() {
        let out = Path::new("/out");
        assert_eq!(output_file(out, ""), PathBuf::from("/out/index.html"));
        assert_eq!(
            output_file(out, "guide/setup"),
            PathBuf::from("/out/guide/setup/index.html")
        );
    }
}
