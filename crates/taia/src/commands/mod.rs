//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Args;
use taia_build::{BuildOptions, HtmlTemplate, RenderedSite, StaticSiteBuilder};
use taia_config::{CliSettings, Config, NavigationPolicyName, SourceNotation};
use taia_site::NavigationKind;
use taia_store::NotationKind;

use crate::error::CliError;
use crate::output::Output;

/// Options shared by `build` and `check`.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover taia.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Record store file (overrides config).
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Record notation: auto, block or tagged (overrides config).
    #[arg(long)]
    notation: Option<SourceNotation>,

    /// Feed entries per page (overrides config).
    #[arg(long)]
    page_size: Option<usize>,

    /// Navigation policy: trail, masters or tree (overrides config).
    #[arg(long = "nav")]
    navigation: Option<NavigationPolicyName>,

    /// Enable verbose output (show build progress logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl SiteArgs {
    /// Load configuration with these arguments applied.
    fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            source: self.source.clone(),
            notation: self.notation,
            output_dir,
            page_size: self.page_size,
            navigation: self.navigation,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Read the record store and render the site in memory.
    fn render(&self, config: &Config, output: &Output) -> Result<RenderedSite, CliError> {
        let path = &config.source_resolved.path;
        output.path("Source", path);

        let text = std::fs::read_to_string(path).map_err(|source| CliError::Source {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Read record store");

        let template = HtmlTemplate::new(
            config.site.title.clone(),
            config.site.stylesheet.clone(),
            config.site.script.clone(),
        );
        let builder = StaticSiteBuilder::new(build_options(config)?).with_template(template);
        Ok(builder.render_text(&text, notation_kind(config.source_resolved.notation))?)
    }
}

/// Builder options from configuration.
fn build_options(config: &Config) -> Result<BuildOptions, CliError> {
    let page_size = NonZeroUsize::new(config.feed.page_size).ok_or_else(|| {
        CliError::Validation("feed.page_size must be greater than 0".to_owned())
    })?;
    let navigation = match config.navigation.policy {
        NavigationPolicyName::Trail => NavigationKind::Trail,
        NavigationPolicyName::Masters => NavigationKind::Masters,
        NavigationPolicyName::Tree => NavigationKind::Tree {
            max_depth: config.navigation.max_depth,
        },
    };
    Ok(BuildOptions {
        page_size,
        navigation,
        max_passes: config.markup.max_passes,
        feed_title: config.feed.title.clone(),
    })
}

fn notation_kind(notation: SourceNotation) -> NotationKind {
    match notation {
        SourceNotation::Auto => NotationKind::Auto,
        SourceNotation::Block => NotationKind::Block,
        SourceNotation::Tagged => NotationKind::Tagged,
    }
}
