//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.source_dir`
//! - `docs.repository`
//! - `docs.path_prefix`
//! - `navigation.mounts` (values)

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override repository name used in page identities.
    pub repository: Option<String>,
    /// Override URL prefix of the documentation set.
    pub path_prefix: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Repository name used when the config directory has no usable name.
const DEFAULT_REPOSITORY: &str = "docs";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Navigation configuration.
    pub navigation: NavigationConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    repository: Option<String>,
    path_prefix: Option<String>,
}

/// Resolved documentation configuration.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Documentation-set root containing `docset.yml`.
    pub source_dir: PathBuf,
    /// Repository name, the scheme of every page identity (`repo://path.md`).
    pub repository: String,
    /// URL prefix of the documentation set.
    pub path_prefix: String,
}

/// Navigation configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Nested TOC identifier (`repo://path`) to the URL prefix it is mounted at.
    pub mounts: BTreeMap<String, String>,
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
        /// Config field path (e.g., "`docs.repository`").
        field: String,
        /// Error message (e.g., "${`DOCS_REPO`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL prefix to be absolute.
fn require_absolute_prefix(value: &str, field: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with '/', got '{value}'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, and the
    /// result is validated again.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the resulting configuration is invalid.
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
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(repository) = &settings.repository {
            self.docs_resolved.repository.clone_from(repository);
        }
        if let Some(path_prefix) = &settings.path_prefix {
            self.docs_resolved.path_prefix.clone_from(path_prefix);
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            navigation: NavigationConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                repository: default_repository(base),
                path_prefix: "/".to_owned(),
            },
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

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_mounts()?;
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        let repository = &self.docs_resolved.repository;
        require_non_empty(repository, "docs.repository")?;
        if repository.contains([':', '/']) {
            return Err(ConfigError::Validation(format!(
                "docs.repository cannot contain ':' or '/', got '{repository}'"
            )));
        }

        require_absolute_prefix(&self.docs_resolved.path_prefix, "docs.path_prefix")
    }

    fn validate_mounts(&self) -> Result<(), ConfigError> {
        for (toc, prefix) in &self.navigation.mounts {
            if !toc.contains("://") {
                return Err(ConfigError::Validation(format!(
                    "navigation.mounts key must be a 'repository://path' identifier, got '{toc}'"
                )));
            }
            require_absolute_prefix(prefix, &format!("navigation.mounts.\"{toc}\""))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let docs = &mut self.docs;
        if let Some(ref source_dir) = docs.source_dir {
            docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }
        if let Some(ref repository) = docs.repository {
            docs.repository = Some(expand::expand_env(repository, "docs.repository")?);
        }
        if let Some(ref path_prefix) = docs.path_prefix {
            docs.path_prefix = Some(expand::expand_env(path_prefix, "docs.path_prefix")?);
        }

        for (toc, prefix) in &mut self.navigation.mounts {
            *prefix = expand::expand_env(prefix, &format!("navigation.mounts.\"{toc}\""))?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and fill defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = self.docs.source_dir.as_deref().unwrap_or("docs");

        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(source_dir),
            repository: self
                .docs
                .repository
                .clone()
                .unwrap_or_else(|| default_repository(config_dir)),
            path_prefix: self
                .docs
                .path_prefix
                .clone()
                .unwrap_or_else(|| "/".to_owned()),
        };
    }
}

/// Repository name derived from the directory holding the configuration.
fn default_repository(base: &Path) -> String {
    base.canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(base)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty() && !name.contains(':'))
        .unwrap_or(DEFAULT_REPOSITORY)
        .to_owned()
}
