//! `taia build` command implementation.

use std::path::PathBuf;

use clap::Args;
use taia_build::FsSink;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, parsing, rendering or writing fails.
    /// Content errors are detected before anything is written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.site.load_config(self.output_dir)?;

        let site = self.site.render(&config, &output)?;
        output.warnings(&site.report().warnings);

        output.path("Output", &config.output_dir);
        let mut sink = FsSink::new(config.output_dir.clone());
        site.write_to(&mut sink)?;

        let report = site.report();
        tracing::info!(
            output_dir = %config.output_dir.display(),
            files = report.files(),
            warnings = report.warnings.len(),
            "Site written"
        );
        output.success(&format!(
            "Built {} pages, {} feed pages and {} tag pages to {}",
            report.pages,
            report.feed_pages,
            report.tag_pages,
            config.output_dir.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_writes_site() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("taia.toml");
        std::fs::write(&config, "[site]\ntitle = \"Saltmarsh\"\n").unwrap();
        let source = tmp.path().join("chronicle.taia");
        std::fs::write(&source, "TITL: Home\nDESC: Hello.\n").unwrap();
        let out = tmp.path().join("site");

        let args = BuildArgs {
            site: SiteArgs {
                config: Some(config),
                source: Some(source),
                notation: None,
                page_size: None,
                navigation: None,
                verbose: false,
            },
            output_dir: Some(out.clone()),
        };
        args.execute().unwrap();

        assert!(out.join("home.html").exists());
        assert!(out.join("index.html").exists());
        assert!(out.join("search_index.json").exists());
    }
}
