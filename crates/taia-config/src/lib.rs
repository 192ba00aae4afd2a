//! Configuration management for taia.
//!
//! Parses `taia.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `source.path`
//! - `output.dir`

mod expand;

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override record store path.
    pub source: Option<PathBuf>,
    /// Override record notation.
    pub notation: Option<SourceNotation>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override feed page size.
    pub page_size: Option<usize>,
    /// Override navigation policy.
    pub navigation: Option<NavigationPolicyName>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "taia.toml";

const DEFAULT_SOURCE: &str = "database/chronicle.taia";
const DEFAULT_OUTPUT: &str = "output_pages";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide page settings.
    pub site: SiteConfig,
    /// Record store location (paths are relative strings from TOML).
    source: SourceConfigRaw,
    /// Output location (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Feed settings.
    pub feed: FeedConfig,
    /// Navigation menu settings.
    pub navigation: NavigationConfig,
    /// Markup compiler settings.
    pub markup: MarkupConfig,

    /// Resolved source configuration (set after loading).
    #[serde(skip)]
    pub source_resolved: SourceConfig,
    /// Resolved output directory (set after loading).
    #[serde(skip)]
    pub output_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site-wide page settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title of the site entry point.
    pub title: String,
    /// Stylesheet linked from every page.
    pub stylesheet: String,
    /// Search script included in every page.
    pub script: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Chronicle".to_owned(),
            stylesheet: "styles.css".to_owned(),
            script: "script.js".to_owned(),
        }
    }
}

/// Record notation selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceNotation {
    /// Detect from the first non-blank line.
    #[default]
    Auto,
    /// `key: value` blocks separated by blank lines.
    Block,
    /// `TITL:` / `UNDE:` / `DESC:` records.
    Tagged,
}

/// Raw source configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SourceConfigRaw {
    path: Option<String>,
    notation: SourceNotation,
}

/// Resolved source configuration with an absolute path.
#[derive(Debug, Default)]
pub struct SourceConfig {
    /// Record store file.
    pub path: PathBuf,
    /// Notation of the record store.
    pub notation: SourceNotation,
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Feed settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Heading of feed pages.
    pub title: String,
    /// Entries per feed page.
    pub page_size: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: "Chronicle".to_owned(),
            page_size: 16,
        }
    }
}

/// Navigation policy selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationPolicyName {
    /// Masters, ancestor chain and children of the current page.
    #[default]
    Trail,
    /// Masters only.
    Masters,
    /// Full hierarchy up to `max_depth`.
    Tree,
}

/// Navigation menu settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Menu policy.
    pub policy: NavigationPolicyName,
    /// Depth limit for the `tree` policy.
    pub max_depth: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            policy: NavigationPolicyName::Trail,
            max_depth: 8,
        }
    }
}

/// Markup compiler settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Rewrite passes allowed before giving up on a description.
    pub max_passes: usize,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self { max_passes: 32 }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message (e.g., "${`SITE_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a numeric field to be greater than zero.
fn require_positive(value: usize, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `taia.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated after the overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source) = &settings.source {
            self.source_resolved.path.clone_from(source);
        }
        if let Some(notation) = settings.notation {
            self.source_resolved.notation = notation;
        }
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir.clone_from(output_dir);
        }
        if let Some(page_size) = settings.page_size {
            self.feed.page_size = page_size;
        }
        if let Some(policy) = settings.navigation {
            self.navigation.policy = policy;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            source: SourceConfigRaw::default(),
            output: OutputConfigRaw::default(),
            feed: FeedConfig::default(),
            navigation: NavigationConfig::default(),
            markup: MarkupConfig::default(),
            source_resolved: SourceConfig {
                path: base.join(DEFAULT_SOURCE),
                notation: SourceNotation::Auto,
            },
            output_dir: base.join(DEFAULT_OUTPUT),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`] after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_positive(self.feed.page_size, "feed.page_size")?;
        require_positive(self.markup.max_passes, "markup.max_passes")?;
        if self.navigation.policy == NavigationPolicyName::Tree {
            require_positive(self.navigation.max_depth, "navigation.max_depth")?;
        }
        Ok(())
    }

    /// Expand environment variable references in path strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.source.path {
            self.source.path = Some(expand::expand_env(path, "source.path")?);
        }
        if let Some(ref dir) = self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.source_resolved = SourceConfig {
            path: resolve(self.source.path.as_deref(), DEFAULT_SOURCE),
            notation: self.source.notation,
        };
        self.output_dir = resolve(self.output.dir.as_deref(), DEFAULT_OUTPUT);
    }
}

impl FromStr for SourceNotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "block" => Ok(Self::Block),
            "tagged" => Ok(Self::Tagged),
            other => Err(format!(
                "unknown notation '{other}' (expected auto, block or tagged)"
            )),
        }
    }
}

impl fmt::Display for SourceNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Block => "block",
            Self::Tagged => "tagged",
        })
    }
}

impl FromStr for NavigationPolicyName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trail" => Ok(Self::Trail),
            "masters" => Ok(Self::Masters),
            "tree" => Ok(Self::Tree),
            other => Err(format!(
                "unknown navigation policy '{other}' (expected trail, masters or tree)"
            )),
        }
    }
}

impl fmt::Display for NavigationPolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trail => "trail",
            Self::Masters => "masters",
            Self::Tree => "tree",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.title, "Chronicle");
        assert_eq!(config.site.stylesheet, "styles.css");
        assert_eq!(config.site.script, "script.js");
        assert_eq!(
            config.source_resolved.path,
            PathBuf::from("/test/database/chronicle.taia")
        );
        assert_eq!(config.source_resolved.notation, SourceNotation::Auto);
        assert_eq!(config.output_dir, PathBuf::from("/test/output_pages"));
        assert_eq!(config.feed.page_size, 16);
        assert_eq!(config.navigation.policy, NavigationPolicyName::Trail);
        assert_eq!(config.navigation.max_depth, 8);
        assert_eq!(config.markup.max_passes, 32);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.title, "Chronicle");
        assert_eq!(config.feed.page_size, 16);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
title = "Saltmarsh"
stylesheet = "assets/site.css"
script = "assets/search.js"

[source]
path = "lore/world.taia"
notation = "tagged"

[output]
dir = "public"

[feed]
title = "Ship's log"
page_size = 10

[navigation]
policy = "tree"
max_depth = 3

[markup]
max_passes = 8
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.title, "Saltmarsh");
        assert_eq!(config.site.stylesheet, "assets/site.css");
        assert_eq!(config.site.script, "assets/search.js");
        assert_eq!(
            config.source_resolved.path,
            PathBuf::from("/project/lore/world.taia")
        );
        assert_eq!(config.source_resolved.notation, SourceNotation::Tagged);
        assert_eq!(config.output_dir, PathBuf::from("/project/public"));
        assert_eq!(config.feed.title, "Ship's log");
        assert_eq!(config.feed.page_size, 10);
        assert_eq!(config.navigation.policy, NavigationPolicyName::Tree);
        assert_eq!(config.navigation.max_depth, 3);
        assert_eq!(config.markup.max_passes, 8);
    }

    #[test]
    fn test_parse_unknown_policy_fails() {
        let result: Result<Config, _> = toml::from_str("[navigation]\npolicy = \"spiral\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.source_resolved.path,
            PathBuf::from("/project/database/chronicle.taia")
        );
        assert_eq!(config.output_dir, PathBuf::from("/project/output_pages"));
    }

    #[test]
    fn test_resolve_paths_absolute_kept() {
        let mut config: Config = toml::from_str("[output]\ndir = \"/var/www/lore\"\n").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.output_dir, PathBuf::from("/var/www/lore"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taia.toml");
        std::fs::write(&path, "[source]\npath = \"data/log.taia\"\n").unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();
        assert_eq!(config.source_resolved.path, dir.path().join("data/log.taia"));
        assert_eq!(config.output_dir, dir.path().join("output_pages"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taia.toml");
        std::fs::write(&path, "[feed\npage_size = 3\n").unwrap();
        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taia.toml");
        std::fs::write(&path, "[feed]\npage_size = 0\n").unwrap();
        let err = Config::load(Some(path.as_path()), None).unwrap_err();
        assert!(err.to_string().contains("feed.page_size"));
    }

    #[test]
    fn test_discover_from_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("lore/regions/coast");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            Config::discover_from(&nested),
            Some(dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            source: Some(PathBuf::from("/data/other.taia")),
            notation: Some(SourceNotation::Block),
            output_dir: Some(PathBuf::from("/tmp/site")),
            page_size: Some(4),
            navigation: Some(NavigationPolicyName::Masters),
        };
        config.apply_cli_settings(&settings);

        assert_eq!(config.source_resolved.path, PathBuf::from("/data/other.taia"));
        assert_eq!(config.source_resolved.notation, SourceNotation::Block);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/site"));
        assert_eq!(config.feed.page_size, 4);
        assert_eq!(config.navigation.policy, NavigationPolicyName::Masters);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.output_dir, PathBuf::from("/test/output_pages"));
        assert_eq!(config.feed.page_size, 16);
    }

    #[test]
    fn test_expand_env_vars_paths() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TAIA_TEST_SITE_ROOT", "/srv/site");
        }

        let toml = r#"
[source]
path = "${TAIA_TEST_SITE_ROOT}/chronicle.taia"

[output]
dir = "${TAIA_TEST_OUTPUT:-/srv/out}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.source_resolved.path,
            PathBuf::from("/srv/site/chronicle.taia")
        );
        assert_eq!(config.output_dir, PathBuf::from("/srv/out"));

        unsafe {
            std::env::remove_var("TAIA_TEST_SITE_ROOT");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TAIA_TEST_MISSING_SOURCE");
        }

        let mut config: Config =
            toml::from_str("[source]\npath = \"${TAIA_TEST_MISSING_SOURCE}\"\n").unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("TAIA_TEST_MISSING_SOURCE"));
        assert!(err.to_string().contains("source.path"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_site_title_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.title = "  ".to_owned();
        assert_validation_error(&config, &["site.title", "empty"]);
    }

    #[test]
    fn test_validate_page_size_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.feed.page_size = 0;
        assert_validation_error(&config, &["feed.page_size", "greater than 0"]);
    }

    #[test]
    fn test_validate_max_passes_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.markup.max_passes = 0;
        assert_validation_error(&config, &["markup.max_passes"]);
    }

    #[test]
    fn test_validate_tree_depth_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navigation.policy = NavigationPolicyName::Tree;
        config.navigation.max_depth = 0;
        assert_validation_error(&config, &["navigation.max_depth"]);
    }

    #[test]
    fn test_validate_depth_ignored_for_trail() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navigation.max_depth = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_override_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taia.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            page_size: Some(0),
            ..CliSettings::default()
        };
        let err = Config::load(Some(path.as_path()), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_names_from_str() {
        assert_eq!("tagged".parse::<SourceNotation>(), Ok(SourceNotation::Tagged));
        assert_eq!(
            "masters".parse::<NavigationPolicyName>(),
            Ok(NavigationPolicyName::Masters)
        );
        assert!("sideways".parse::<NavigationPolicyName>().is_err());
        assert_eq!(NavigationPolicyName::Tree.to_string(), "tree");
        assert_eq!(SourceNotation::Block.to_string(), "block");
    }
}
