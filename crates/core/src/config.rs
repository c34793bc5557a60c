//! Configuration types shared across crates.

use crate::error::{Error, Result};
use crate::size::MAX_DIMENSION;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Enable the /metrics endpoint for Prometheus scraping (default: true).
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            metrics_enabled: default_metrics_enabled(),
        }
    }
}

/// Storage configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory all served documents must live under.
    pub root: PathBuf,
}

/// Preview rendering configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Default target width when the request omits one.
    #[serde(default = "default_dimension")]
    pub default_width: u32,
    /// Default target height when the request omits one.
    #[serde(default = "default_dimension")]
    pub default_height: u32,
    /// Upper bound on wall-clock time spent rendering a single preview.
    /// A request that exceeds it receives a placeholder.
    #[serde(default = "default_render_timeout_secs")]
    pub render_timeout_secs: u64,
    /// Enable the in-memory single-flight preview cache (default: true).
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
    /// Maximum number of cached previews before FIFO eviction.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

fn default_dimension() -> u32 {
    256
}

fn default_render_timeout_secs() -> u64 {
    30
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    256
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            default_width: default_dimension(),
            default_height: default_dimension(),
            render_timeout_secs: default_render_timeout_secs(),
            cache_enabled: default_cache_enabled(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl PreviewConfig {
    /// Get the render timeout as a Duration.
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

impl AppConfig {
    /// Validate the configuration, failing fast on values the pipeline
    /// cannot operate with.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("preview.default_width", self.preview.default_width),
            ("preview.default_height", self.preview.default_height),
        ] {
            if value == 0 || value > MAX_DIMENSION {
                return Err(Error::Config(format!(
                    "{name} must be between 1 and {MAX_DIMENSION}, got {value}"
                )));
            }
        }
        if self.preview.render_timeout_secs == 0 {
            return Err(Error::Config(
                "preview.render_timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.preview.cache_enabled && self.preview.cache_capacity == 0 {
            return Err(Error::Config(
                "preview.cache_capacity must be at least 1 when the cache is enabled".to_string(),
            ));
        }
        if self.storage.root.as_os_str().is_empty() {
            return Err(Error::Config("storage.root must not be empty".to_string()));
        }
        Ok(())
    }

    /// Create a test configuration rooted at the given directory.
    ///
    /// **For testing only.**
    pub fn for_testing(root: impl Into<PathBuf>) -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig { root: root.into() },
            preview: PreviewConfig::default(),
        }
    }
}
