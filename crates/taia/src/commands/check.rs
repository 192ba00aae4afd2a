//! `taia check` command implementation.

use clap::Args;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Treat warnings as errors.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the record store cannot be built, or if it has
    /// warnings and `--strict` is set.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(None)?;

        let site = self.site.render(&config, &output)?;
        let warnings = output.warnings(&site.report().warnings);

        if self.strict && warnings > 0 {
            return Err(CliError::Validation(format!(
                "{warnings} warning(s) found"
            )));
        }

        let report = site.report();
        output.success(&format!(
            "{} entries OK: {} pages, {} feed pages, {} tag pages",
            report.entries, report.pages, report.feed_pages, report.tag_pages
        ));
        Ok(())
    }
}
