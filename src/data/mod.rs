pub mod catalog;
pub mod loader;

pub use catalog::{Catalog, ProductRecord};

use serde::Deserialize;
use thiserror::Error;

/// One CSV row as scraped, before any coercion. Numeric columns stay
/// textual here so malformed values can become "absent" instead of
/// failing the whole load.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProductRow {
    pub asin: String,
    pub title: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(rename = "price/value", default)]
    pub price: Option<String>,
    #[serde(default)]
    pub stars: Option<String>,
    #[serde(rename = "reviewsCount", default)]
    pub reviews_count: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "breadCrumbs", default)]
    pub bread_crumbs: Option<String>,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Row {row} has an empty identifier")]
    MissingIdentifier { row: usize },
    #[error("Duplicate identifier: {0}")]
    DuplicateIdentifier(String),
    #[error("Dataset contains no products")]
    EmptyDataset,
}

pub type Result<T> = std::result::Result<T, DataError>;
