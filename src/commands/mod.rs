pub mod keywords;
pub mod overview;
pub mod view;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use kitchenware_insights::data::loader::DataLoader;
use kitchenware_insights::{Catalog, Config};

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::load_or_default(path).with_context(|| match path {
        Some(path) => format!("failed to load config {}", path.display()),
        None => "invalid default config".to_string(),
    })?;
    if let Some(path) = path {
        info!(path = %path.display(), "loaded config");
    }
    Ok(config)
}

pub fn load_catalog(path: &Path, config: &Config) -> Result<Catalog> {
    DataLoader::load(path, &config.enrichment)
        .with_context(|| format!("failed to load products from {}", path.display()))
}

pub fn write_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}
