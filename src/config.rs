use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use stars_catalog::ReaderConfig;
use stars_knn::TIE_EPSILON;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StarsConfig {
    /// RNG seed for tie-breaking. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Catalog settings.
    #[serde(default)]
    pub catalog: CatalogToml,

    /// Search settings.
    #[serde(default)]
    pub search: SearchToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogToml {
    pub path: Option<PathBuf>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for CatalogToml {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchToml {
    #[serde(default = "default_tie_epsilon")]
    pub tie_epsilon: f64,
}

impl Default for SearchToml {
    fn default() -> Self {
        Self {
            tie_epsilon: default_tie_epsilon(),
        }
    }
}

fn default_tie_epsilon() -> f64 {
    TIE_EPSILON
}

impl StarsConfig {
    /// Load configuration from a TOML file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }

    /// Reader settings for catalog files.
    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig::default().with_delimiter(self.catalog.delimiter)
    }
}
