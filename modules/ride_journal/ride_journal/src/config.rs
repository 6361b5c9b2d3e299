use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

/// Environment prefix; nested keys are separated by `__`,
/// e.g. `RIDE_JOURNAL__DATABASE__URL`.
pub const ENV_PREFIX: &str = "RIDE_JOURNAL__";

/// Configuration for the `ride_journal` module
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RideJournalConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub blobs: BlobConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlobConfig {
    /// Directory uploaded images are written to.
    #[serde(default = "default_blob_root")]
    pub root_dir: PathBuf,
    /// Reference stored on vehicles created without an image.
    #[serde(default = "default_vehicle_image")]
    pub default_vehicle_image: String,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            root_dir: default_blob_root(),
            default_vehicle_image: default_vehicle_image(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// HS256 signing secret, at least 32 bytes.
    #[serde(default = "empty_secret")]
    pub jwt_secret: SecretString,
    #[serde(default)]
    pub issuer: Option<String>,
    /// Clock skew tolerated when checking `exp`.
    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: empty_secret(),
            issuer: None,
            leeway_secs: default_leeway_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl RideJournalConfig {
    /// Layer defaults, an optional YAML file and `RIDE_JOURNAL__*` env vars.
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed or the result is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        Self::from_figment(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Extract from a prepared figment and validate.
    ///
    /// # Errors
    /// Returns an error if extraction or validation fails.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let cfg: Self = figment.extract().map_err(Box::new)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.max_page_size == 0 {
            return Err(ConfigError::Invalid(
                "pagination.max_page_size must be positive".to_owned(),
            ));
        }
        if self.pagination.default_page_size > self.pagination.max_page_size {
            return Err(ConfigError::Invalid(format!(
                "pagination.default_page_size ({}) exceeds max_page_size ({})",
                self.pagination.default_page_size, self.pagination.max_page_size
            )));
        }
        if self.blobs.default_vehicle_image.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "blobs.default_vehicle_image must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_database_url() -> String {
    "sqlite://ride_journal.db?mode=rwc".to_owned()
}

fn default_page_size() -> u64 {
    ride_journal_sdk::DEFAULT_PAGE_LIMIT
}

fn default_max_page_size() -> u64 {
    100
}

fn default_blob_root() -> PathBuf {
    PathBuf::from("data/images")
}

fn default_vehicle_image() -> String {
    ride_journal_sdk::DEFAULT_IMAGE_REF.to_owned()
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_leeway_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_owned()
}
