//! CLI command implementations.

mod build;
mod check;

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_site::{BuildConfig, LayoutOptions, NavigationPolicy, SectionFallback, SiteBuilder};

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

use crate::error::CliError;
use crate::output::Output;

/// Options shared by commands that load a site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Menu file, YAML or JSON (overrides config).
    #[arg(long)]
    menu: Option<PathBuf>,

    /// Fail on pages whose section is not in the menu.
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            source_dir: self.source_dir.clone(),
            output_dir: self.output_dir.clone(),
            menu_file: self.menu.clone(),
            strict_navigation: self.strict.then_some(true),
        }
    }

    /// Load configuration and create a site builder from it.
    pub(crate) fn builder(&self, output: &Output) -> Result<SiteBuilder, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        tracing::debug!(
            source_dir = %config.docs_resolved.source_dir.display(),
            menu = %config.docs_resolved.menu_path.display(),
            strict = config.docs_resolved.strict_navigation,
            "Configuration loaded"
        );
        Ok(SiteBuilder::new(build_config(config)))
    }
}

fn build_config(config: Config) -> BuildConfig {
    let docs = config.docs_resolved;
    let site = config.site;
    let policy = if docs.strict_navigation {
        NavigationPolicy::Strict
    } else {
        NavigationPolicy::Lenient
    };

    BuildConfig {
        policy,
        layout: LayoutOptions {
            site_title: site.title,
            site_description: site.description,
            footer: site.footer,
            path_prefix: site.path_prefix,
            language: site.language,
            stylesheet: site.stylesheet,
        },
        exclude: config.config_path.into_iter().collect(),
        ..BuildConfig::new(docs.source_dir, docs.output_dir, docs.menu_path)
    }
}

fn report_fallbacks(output: &Output, fallbacks: &[SectionFallback]) {
    for fallback in fallbacks {
        output.warning(&format!(
            "{}: unknown section {:?}, rendered under {:?}",
            fallback.source.display(),
            fallback.declared,
            fallback.used
        ));
    }
}
