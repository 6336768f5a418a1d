use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use peakenrich_io::DataLayout;
use peakenrich_scoring::EnrichmentConfig;

///
/// Contents of a `--config` TOML file: a `[layout]` and an `[enrichment]`
/// table, both optional.
///
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub layout: DataLayout,
    pub enrichment: EnrichmentConfig,
}

impl RunConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid run configuration")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Can't read config file {}", path.display()))?;
        RunConfig::from_toml_str(&contents)
            .with_context(|| format!("Can't parse config file {}", path.display()))
    }
}
