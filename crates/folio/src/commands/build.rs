//! `folio build` command implementation.

use clap::Args;

use super::{SiteArgs, report_fallbacks};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any page cannot be built.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let builder = self.site.builder(&output)?;
        let config = builder.config();

        output.info(&format!("Source: {}", config.source_dir.display()));
        output.info(&format!("Output: {}", config.output_dir.display()));

        let report = builder.build()?;

        report_fallbacks(&output, &report.fallbacks);
        output.success(&format!(
            "Built {} pages and copied {} assets to {}",
            report.pages,
            report.assets,
            config.output_dir.display()
        ));
        Ok(())
    }
}
