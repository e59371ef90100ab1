use std::path::PathBuf;

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

/// Runtime settings. Layered: built-in defaults, then an optional
/// `dota_parser.toml` in the working directory, then `DOTA_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Root holding one subdirectory per report section.
    pub pages_dir: PathBuf,
    /// Matches parsed per parallel batch before output is flushed.
    pub chunk_size: usize,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let file = File::with_name("dota_parser").required(false);
        Self::from_builder(Config::builder().add_source(file))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .set_default("pages_dir", "data/pages")?
            .set_default("chunk_size", 200_i64)?
            .add_source(Environment::with_prefix("DOTA"))
            .build()
            .context("reading settings")?
            .try_deserialize()
            .context("invalid settings")
    }
}
