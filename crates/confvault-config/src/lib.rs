//! Configuration management for confvault.
//!
//! Parses `confvault.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Credentials (the Confluence API token) are never read implicitly: the
//! token file named by `confluence.token_file` is only touched by an
//! explicit [`Credentials::load`] call at startup, so a missing or
//! unreadable token fails fast with a descriptive error.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "confvault.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Confluence connection configuration.
    pub confluence: ConfluenceConfig,
    /// Backup configuration.
    #[serde(default)]
    pub backup: BackupConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Confluence connection configuration.
#[derive(Debug, Deserialize)]
pub struct ConfluenceConfig {
    /// Confluence Cloud base URL (e.g. `https://example.atlassian.net`).
    pub base_url: String,
    /// Atlassian account email the API token belongs to.
    pub email: String,
    /// Path to a file containing the API token string.
    ///
    /// Supports `~` expansion. Relative paths are resolved against the
    /// directory containing the config file.
    pub token_file: String,
}

/// Backup configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct BackupConfig {
    /// Local directory the mirrored tree is written under.
    pub root_dir: Option<PathBuf>,
    /// Top-level folders to back up, one traversal per entry.
    pub roots: Vec<RootFolder>,
}

/// A top-level Confluence folder to back up.
#[derive(Debug, Clone, Deserialize)]
pub struct RootFolder {
    /// Folder content ID.
    pub id: String,
    /// Display name, used as the local directory name for this root.
    pub name: String,
}

/// Loaded Confluence credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Atlassian account email.
    pub email: String,
    /// API token read from the token file.
    pub api_token: String,
}

impl Credentials {
    /// Read credentials for the given Confluence configuration.
    ///
    /// Expands `~` in the token file path, resolves relative paths against
    /// `base_dir` (usually the config file's directory), and trims
    /// surrounding whitespace from the token text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TokenFile`] if the token file cannot be read,
    /// or [`ConfigError::Validation`] if it is empty.
    pub fn load(confluence: &ConfluenceConfig, base_dir: &Path) -> Result<Self, ConfigError> {
        let expanded = shellexpand::tilde(&confluence.token_file);
        let mut path = PathBuf::from(expanded.as_ref());
        if path.is_relative() {
            path = base_dir.join(path);
        }

        let token = std::fs::read_to_string(&path).map_err(|source| ConfigError::TokenFile {
            path: path.clone(),
            source,
        })?;
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::Validation(format!(
                "token file {} is empty",
                path.display()
            )));
        }

        Ok(Self {
            email: confluence.email.clone(),
            api_token: token.to_owned(),
        })
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
    /// Token file could not be read.
    #[error("Cannot read token file {}: {source}", .path.display())]
    TokenFile {
        /// Resolved token file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise,
    /// searches for `confvault.toml` in the current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns an error if no config file is found, parsing fails, or
    /// validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        } else {
            Self::discover_config().ok_or_else(|| ConfigError::NotFound(CONFIG_FILENAME.into()))?
        };

        Self::load_from_file(&path)
    }

    /// Directory containing the loaded config file.
    ///
    /// Relative paths in the config (token file, backup root) resolve
    /// against this.
    #[must_use]
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    /// Resolved backup root directory (default `backups/` next to the
    /// config file).
    #[must_use]
    pub fn backup_root_dir(&self) -> PathBuf {
        let base = self.base_dir();
        match &self.backup.root_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => base.join(dir),
            None => base.join("backups"),
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

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any required field is empty or
    /// malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.confluence.base_url, "confluence.base_url")?;
        require_http_url(&self.confluence.base_url, "confluence.base_url")?;
        require_non_empty(&self.confluence.email, "confluence.email")?;
        require_non_empty(&self.confluence.token_file, "confluence.token_file")?;

        for root in &self.backup.roots {
            require_non_empty(&root.id, "backup.roots.id")?;
            require_non_empty(&root.name, "backup.roots.name")?;
        }

        Ok(())
    }

    /// Require at least one backup root to be configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` when `backup.roots` is empty.
    pub fn require_backup_roots(&self) -> Result<&[RootFolder], ConfigError> {
        if self.backup.roots.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[backup.roots]] entry required".to_owned(),
            ));
        }
        Ok(&self.backup.roots)
    }
}
