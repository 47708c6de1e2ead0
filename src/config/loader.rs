//! Configuration file loading

use super::Config;
use crate::utils::error::{Result, SecurityError};
use std::path::Path;
use tracing::info;

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());

        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SecurityError::config(format!("{}: {}", path.display(), e)))?;

        let config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| SecurityError::config(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }
}
