//! Analytics configuration
//!
//! Every field has a default, so a YAML file only needs the keys it changes:
//!
//! ```yaml
//! data_path: ./data/messages.csv
//! top_n: 15
//! pagerank:
//!   damping_factor: 0.85
//!   max_iterations: 100
//!   tolerance: 0.0001
//! hits:
//!   max_iterations: 100
//!   tolerance: 0.000001
//! ```

use crate::algo::{HitsConfig, PageRankConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetgraphConfig {
    /// Interaction table to load
    pub data_path: PathBuf,
    /// Rows shown by top-N rankings
    pub top_n: usize,
    pub pagerank: PageRankConfig,
    pub hits: HitsConfig,
}

impl Default for NetgraphConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./data/messages.csv"),
            top_n: 15,
            pagerank: PageRankConfig::default(),
            hits: HitsConfig::default(),
        }
    }
}

impl NetgraphConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}
