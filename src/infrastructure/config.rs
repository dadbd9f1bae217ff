//! Configuration infrastructure
//!
//! Loading and management of the image service configuration. Defaults are
//! embedded; a JSON file can override them for deployments that need a
//! different CDN placeholder or probe timeout.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Fixed, known-good fallback image substituted whenever a real image
/// cannot be validated.
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://cdn.cablecatalog.example/images/placeholder-cable.jpg";

/// Image service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageServiceConfig {
    /// Timeout for a single URL validation probe, in seconds
    pub probe_timeout_seconds: u64,

    /// User agent sent with validation probes
    pub user_agent: String,

    /// Fallback image URL substituted for failed slots
    pub placeholder_url: String,

    /// Follow redirects during validation probes
    pub follow_redirects: bool,
}

impl Default for ImageServiceConfig {
    fn default() -> Self {
        Self {
            probe_timeout_seconds: 10,
            user_agent: "cable-catalog-images/0.2".to_string(),
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
            follow_redirects: true,
        }
    }
}

/// Loads the service configuration from a JSON file, falling back to the
/// embedded defaults when the file is absent.
pub struct ConfigManager;

impl ConfigManager {
    pub async fn load_config(path: &Path) -> Result<ImageServiceConfig> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(ImageServiceConfig::default());
        }

        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ImageServiceConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded image service config from {}", path.display());
        Ok(config)
    }

    pub async fn save_config(path: &Path, config: &ImageServiceConfig) -> Result<()> {
        let raw = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        fs::write(path, raw)
            .await
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
