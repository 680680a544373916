//! `folio check` command implementation.

use clap::Args;

use super::{SiteArgs, report_fallbacks};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Renders every page in memory. Pages declaring a section that is not in
    /// the menu are listed and make the check fail.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails to render or falls back to the
    /// first menu section.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let builder = self.site.builder(&output)?;

        output.info(&format!(
            "Checking {} against {}",
            builder.config().source_dir.display(),
            builder.config().menu_path.display()
        ));

        let report = builder.check()?;

        if report.fallbacks.is_empty() {
            output.success(&format!("{} pages OK", report.pages));
            return Ok(());
        }

        report_fallbacks(&output, &report.fallbacks);
        output.detail("Add the sections to the menu or fix the page frontmatter");
        Err(CliError::Validation(format!(
            "{} of {} pages declare a section that is not in the menu",
            report.fallbacks.len(),
            report.pages
        )))
    }
}
