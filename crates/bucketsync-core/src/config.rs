//! Configuration module for bucketsync.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, defaults, and a builder pattern for
//! programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{ContainerRef, DomainError};

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for bucketsync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub source: ContainerConfig,
    pub destination: ContainerConfig,
    pub sync: SyncConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// One side of the sync: a container plus optional prefix and endpoint
/// override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Tenancy namespace
    pub namespace: String,
    /// Bucket name
    pub bucket: String,
    /// Provider region (e.g. `eu-frankfurt-1`)
    pub region: String,
    /// On the source: lists only objects under this prefix.
    /// On the destination: prepended to every destination object name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// API endpoint override; defaults to the region's standard endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl ContainerConfig {
    /// Build the validated [`ContainerRef`] for this side.
    pub fn container_ref(&self) -> Result<ContainerRef, DomainError> {
        ContainerRef::new(&self.namespace, &self.bucket, &self.region)
    }

    /// Effective API endpoint (override or region template).
    #[must_use]
    pub fn effective_endpoint(&self) -> String {
        match &self.endpoint {
            Some(ep) => ep.clone(),
            None => format!("https://objectstorage.{}.oraclecloud.com", self.region),
        }
    }
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Maximum concurrently in-flight object workers.
    pub max_workers: u32,
    /// Copy attempts per run; also the per-object exhaustion threshold.
    pub max_retries: u32,
    /// Path of the local JSON state ledger.
    pub state_file: PathBuf,
}

/// Authentication settings.
///
/// Credential issuance is external to bucketsync; the adapter reads a
/// pre-issued bearer token from an environment variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Name of the environment variable holding the bearer token.
    pub token_env: String,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_workers: 50,
            max_retries: 5,
            state_file: PathBuf::from("sync_state.json"),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: "BUCKETSYNC_TOKEN".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/bucketsync/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("bucketsync")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"sync.max_workers"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound for `sync.max_workers`.
const MAX_WORKERS_CEILING: u32 = 256;

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        // --- source / destination ---
        Self::validate_container("source", &self.source, &mut errors);
        Self::validate_container("destination", &self.destination, &mut errors);

        // --- sync ---
        if self.sync.max_workers == 0 || self.sync.max_workers > MAX_WORKERS_CEILING {
            errors.push(ValidationError {
                field: "sync.max_workers".into(),
                message: format!("must be in range 1..={MAX_WORKERS_CEILING}"),
            });
        }
        if self.sync.max_retries == 0 {
            errors.push(ValidationError {
                field: "sync.max_retries".into(),
                message: "must be greater than 0".into(),
            });
        }
        if self.sync.state_file.as_os_str().is_empty() {
            errors.push(ValidationError {
                field: "sync.state_file".into(),
                message: "must not be empty".into(),
            });
        }

        // --- auth ---
        if self.auth.token_env.is_empty() {
            errors.push(ValidationError {
                field: "auth.token_env".into(),
                message: "must not be empty".into(),
            });
        }

        // --- logging ---
        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }

    fn validate_container(
        side: &str,
        container: &ContainerConfig,
        errors: &mut Vec<ValidationError>,
    ) {
        if container.namespace.is_empty() {
            errors.push(ValidationError {
                field: format!("{side}.namespace"),
                message: "must not be empty".into(),
            });
        }
        if container.bucket.is_empty() {
            errors.push(ValidationError {
                field: format!("{side}.bucket"),
                message: "must not be empty".into(),
            });
        }
        if container.region.is_empty() {
            errors.push(ValidationError {
                field: format!("{side}.region"),
                message: "must not be empty".into(),
            });
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use bucketsync_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .source("acme", "photos-src", "eu-frankfurt-1")
///     .destination("acme", "photos-dst", "us-ashburn-1")
///     .max_workers(16)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self::default()
    }

    // --- source ---

    pub fn source(
        mut self,
        namespace: impl Into<String>,
        bucket: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        self.config.source.namespace = namespace.into();
        self.config.source.bucket = bucket.into();
        self.config.source.region = region.into();
        self
    }

    pub fn source_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.source.prefix = Some(prefix.into());
        self
    }

    pub fn source_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.source.endpoint = Some(endpoint.into());
        self
    }

    // --- destination ---

    pub fn destination(
        mut self,
        namespace: impl Into<String>,
        bucket: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        self.config.destination.namespace = namespace.into();
        self.config.destination.bucket = bucket.into();
        self.config.destination.region = region.into();
        self
    }

    pub fn destination_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.destination.prefix = Some(prefix.into());
        self
    }

    pub fn destination_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.destination.endpoint = Some(endpoint.into());
        self
    }

    // --- sync ---

    pub fn max_workers(mut self, n: u32) -> Self {
        self.config.sync.max_workers = n;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.sync.max_retries = n;
        self
    }

    pub fn state_file(mut self, path: PathBuf) -> Self {
        self.config.sync.state_file = path;
        self
    }

    // --- auth / logging ---

    pub fn token_env(mut self, name: impl Into<String>) -> Self {
        self.config.auth.token_env = name.into();
        self
    }

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    // --- build ---

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
