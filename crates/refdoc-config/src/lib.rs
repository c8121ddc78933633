//! Configuration management for refdoc.
//!
//! Parses `refdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Relative paths are
//! resolved against the directory holding the config file.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment
//!
//! String values support `${VAR}` and `${VAR:-default}` expansion. Expanded
//! fields:
//! - `project.dir`
//! - `project.doxygen_dir`
//! - `project.include_dir`
//! - `project.extractor`
//! - `docs.source_dir`
//! - `docs.output_dir`
//!
//! The process flags `REFDOC_DEBUG` and `REFDOC_ALWAYS_REBUILD` accept `1`,
//! `yes` or `y` (any case) as true.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override expanded docs output directory.
    pub output_dir: Option<PathBuf>,
    /// Force every linked document to be rebuilt.
    pub always_rebuild: Option<bool>,
    /// Override debug flag.
    pub debug: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "refdoc.toml";

const DEBUG_ENV: &str = "REFDOC_DEBUG";
const ALWAYS_REBUILD_ENV: &str = "REFDOC_ALWAYS_REBUILD";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    project: ProjectConfigRaw,
    docs: DocsConfigRaw,
    /// Listing extraction settings.
    pub listing: ListingConfig,

    /// Resolved project configuration (set after loading).
    #[serde(skip)]
    pub project_resolved: ProjectConfig,
    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Process flags (set after loading).
    #[serde(skip)]
    pub flags: Flags,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ProjectConfigRaw {
    dir: Option<String>,
    doxygen_dir: Option<String>,
    include_dir: Option<String>,
    header_pattern: Option<String>,
    extractor: Option<String>,
}

/// Resolved C++ project configuration with absolute paths.
#[derive(Debug, Default, Clone)]
pub struct ProjectConfig {
    /// Project root; the extractor runs here.
    pub project_dir: PathBuf,
    /// Directory holding the extracted XML dump.
    pub doxygen_dir: PathBuf,
    /// Root of the header tree.
    pub include_dir: PathBuf,
    /// Header file pattern watched for changes.
    pub header_pattern: String,
    /// Shell command regenerating the XML dump.
    pub extractor: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    state_file: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default, Clone)]
pub struct DocsConfig {
    /// Directory holding `.rst` documents with API directives.
    pub source_dir: PathBuf,
    /// Directory receiving expanded documents.
    pub output_dir: PathBuf,
    /// Persisted link table.
    pub state_file: PathBuf,
}

/// Listing extraction settings.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ListingConfig {
    /// Lines containing this marker are left out of class listings.
    pub comment_marker: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            comment_marker: "///".to_owned(),
        }
    }
}

/// Behaviour flags read from the process environment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    /// Verbose staleness logging.
    pub debug: bool,
    /// Treat every linked document as outdated.
    pub always_rebuild: bool,
}

impl Flags {
    /// Read flags from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read flags through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |name: &str| lookup(name).is_some_and(|value| is_truthy(&value));
        Self {
            debug: flag(DEBUG_ENV),
            always_rebuild: flag(ALWAYS_REBUILD_ENV),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "yes" | "y")
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
        /// Config field path (e.g., "`project.extractor`").
        field: String,
        /// Error message (e.g., "${`DOXYGEN`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(v) = value.as_mut() {
        *v = expand::expand_env(v, field)?;
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `refdoc.toml` in current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// Environment flags are read after the file, CLI settings last.
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

        config.flags = Flags::from_env();
        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(always_rebuild) = settings.always_rebuild {
            self.flags.always_rebuild = always_rebuild;
        }
        if let Some(debug) = settings.debug {
            self.flags.debug = debug;
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            project: ProjectConfigRaw::default(),
            docs: DocsConfigRaw::default(),
            listing: ListingConfig::default(),
            project_resolved: ProjectConfig::default(),
            docs_resolved: DocsConfig::default(),
            flags: Flags::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values. Called automatically after loading from file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.project_resolved.extractor, "project.extractor")?;
        require_non_empty(
            &self.project_resolved.header_pattern,
            "project.header_pattern",
        )?;
        require_non_empty(&self.listing.comment_marker, "listing.comment_marker")?;
        if self.docs_resolved.source_dir == self.docs_resolved.output_dir {
            return Err(ConfigError::Validation(
                "docs.output_dir must differ from docs.source_dir".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand_opt(&mut self.project.dir, "project.dir")?;
        expand_opt(&mut self.project.doxygen_dir, "project.doxygen_dir")?;
        expand_opt(&mut self.project.include_dir, "project.include_dir")?;
        expand_opt(&mut self.project.extractor, "project.extractor")?;
        expand_opt(&mut self.docs.source_dir, "docs.source_dir")?;
        expand_opt(&mut self.docs.output_dir, "docs.output_dir")?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    ///
    /// Doxygen and include directories are relative to the project directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |base: &Path, path: Option<&str>, default: &str| {
            base.join(path.unwrap_or(default))
        };

        let project_dir = resolve(config_dir, self.project.dir.as_deref(), ".");
        self.project_resolved = ProjectConfig {
            doxygen_dir: resolve(
                &project_dir,
                self.project.doxygen_dir.as_deref(),
                "doxygen/xml",
            ),
            include_dir: resolve(&project_dir, self.project.include_dir.as_deref(), "include"),
            header_pattern: self
                .project
                .header_pattern
                .clone()
                .unwrap_or_else(|| "*.hpp".to_owned()),
            extractor: self
                .project
                .extractor
                .clone()
                .unwrap_or_else(|| "doxygen".to_owned()),
            project_dir,
        };

        self.docs_resolved = DocsConfig {
            source_dir: resolve(config_dir, self.docs.source_dir.as_deref(), "source"),
            output_dir: resolve(config_dir, self.docs.output_dir.as_deref(), "build/rst"),
            state_file: resolve(
                config_dir,
                self.docs.state_file.as_deref(),
                ".refdoc/links.json",
            ),
        };
    }
}
