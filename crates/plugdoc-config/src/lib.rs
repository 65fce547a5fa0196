//! Configuration management for plugdoc.
//!
//! Parses `plugdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `sources.basedir` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};

use plugdoc_descriptor::Dependency;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override diagnostics collection.
    pub diagnostics: Option<bool>,
    /// Override sources base directory.
    pub basedir: Option<PathBuf>,
    /// Override include patterns.
    pub includes: Option<Vec<String>>,
    /// Override exclude patterns.
    pub excludes: Option<Vec<String>>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "plugdoc.toml";

const DEFAULT_BASEDIR: &str = "src";

const DEFAULT_INCLUDE: &str = "**/*.java";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markup conversion configuration.
    pub markup: MarkupConfig,
    /// Source discovery configuration (basedir is a relative string from TOML).
    sources: SourcesConfigRaw,
    /// Plugin runtime dependencies, in declaration order.
    pub dependencies: Vec<Dependency>,

    /// Resolved sources configuration (set after loading).
    #[serde(skip)]
    pub sources_resolved: SourcesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Markup conversion configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Whether repair diagnostics are collected and reported.
    pub diagnostics: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SourcesConfigRaw {
    basedir: Option<String>,
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl Default for SourcesConfigRaw {
    fn default() -> Self {
        Self {
            basedir: None,
            includes: vec![DEFAULT_INCLUDE.to_owned()],
            excludes: Vec::new(),
        }
    }
}

/// Resolved source discovery configuration with an absolute base directory.
#[derive(Debug, Default)]
pub struct SourcesConfig {
    /// Directory scanned for sources.
    pub basedir: PathBuf,
    /// Include patterns, relative to `basedir`.
    pub includes: Vec<String>,
    /// Exclude patterns, relative to `basedir`.
    pub excludes: Vec<String>,
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
        /// Config field path (e.g., "`sources.basedir`").
        field: String,
        /// Error message (e.g., "${`SRC_ROOT`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `plugdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the loaded values are invalid.
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
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(diagnostics) = settings.diagnostics {
            self.markup.diagnostics = diagnostics;
        }
        if let Some(basedir) = &settings.basedir {
            self.sources_resolved.basedir.clone_from(basedir);
        }
        if let Some(includes) = &settings.includes {
            self.sources_resolved.includes.clone_from(includes);
        }
        if let Some(excludes) = &settings.excludes {
            self.sources_resolved.excludes.clone_from(excludes);
        }
    }

    /// Search for config file in current directory and parents.
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
        let sources = SourcesConfigRaw::default();
        Self {
            markup: MarkupConfig::default(),
            sources_resolved: SourcesConfig {
                basedir: base.join(DEFAULT_BASEDIR),
                includes: sources.includes.clone(),
                excludes: sources.excludes.clone(),
            },
            sources,
            dependencies: Vec::new(),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            dependencies = config.dependencies.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_sources()?;
        self.validate_dependencies()?;
        Ok(())
    }

    fn validate_sources(&self) -> Result<(), ConfigError> {
        if self.sources_resolved.includes.is_empty() {
            return Err(ConfigError::Validation(
                "sources.includes cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_dependencies(&self) -> Result<(), ConfigError> {
        for (i, dependency) in self.dependencies.iter().enumerate() {
            require_non_empty(&dependency.group_id, &format!("dependencies[{i}].group_id"))?;
            require_non_empty(
                &dependency.artifact_id,
                &format!("dependencies[{i}].artifact_id"),
            )?;
            require_non_empty(&dependency.kind, &format!("dependencies[{i}].type"))?;
            require_non_empty(&dependency.version, &format!("dependencies[{i}].version"))?;
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref basedir) = self.sources.basedir {
            self.sources.basedir = Some(expand::expand_env(basedir, "sources.basedir")?);
        }
        Ok(())
    }

    /// Resolve the sources base directory against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let basedir = self.sources.basedir.as_deref().unwrap_or(DEFAULT_BASEDIR);
        self.sources_resolved = SourcesConfig {
            basedir: config_dir.join(basedir),
            includes: self.sources.includes.clone(),
            excludes: self.sources.excludes.clone(),
        };
    }
}
