//! TOML configuration for the dashboard.
//!
//! Every key is optional. A missing data path means "use the bundled seed
//! table".
//!
//! ```toml
//! [data]
//! materials = "data/materials.csv"
//! inventory = "/srv/site/inventory.csv"
//!
//! [logging]
//! level = "debug"
//! file = "site-dashboard.log"
//!
//! [sink]
//! backend = "log"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use site_core::sink::SinkConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Optional overrides for each reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    pub materials: Option<PathBuf>,
    pub labor: Option<PathBuf>,
    pub inventory: Option<PathBuf>,
    pub projects: Option<PathBuf>,
    pub spending: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub data: DataConfig,
    pub logging: LoggingConfig,
    pub sink: SinkConfig,
}

impl AppConfig {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&contents)?;
        config.resolve_relative_to(path.parent().unwrap_or_else(|| Path::new(".")));
        Ok(config)
    }

    /// Makes relative data and log paths relative to the config file's
    /// directory instead of the working directory.
    fn resolve_relative_to(
        &mut self,
        base: &Path,
    ) {
        let resolve = |path: &mut Option<PathBuf>| {
            if let Some(p) = path.as_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        };
        resolve(&mut self.data.materials);
        resolve(&mut self.data.labor);
        resolve(&mut self.data.inventory);
        resolve(&mut self.data.projects);
        resolve(&mut self.data.spending);
        resolve(&mut self.logging.file);
    }
}
