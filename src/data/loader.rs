use super::{Catalog, DataError, RawProductRow, Result};
use crate::analysis::enrichment::Enricher;
use crate::config::EnrichmentSettings;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const REQUIRED_COLUMNS: [&str; 3] = ["asin", "title", "price/value"];

const KNOWN_COLUMNS: [&str; 8] = [
    "asin",
    "title",
    "brand",
    "price/value",
    "stars",
    "reviewsCount",
    "description",
    "breadCrumbs",
];

pub struct DataLoader;

impl DataLoader {
    fn verify_required_columns(headers: &[String]) -> Result<()> {
        let headers_set: HashSet<_> = headers.iter().map(|s| s.to_lowercase()).collect();

        for column in REQUIRED_COLUMNS {
            if !headers_set.contains(column) {
                return Err(DataError::MissingColumn(column.to_string()));
            }
        }
        Ok(())
    }

    /// Maps scraped header spellings (`breadcrumbs`, `ASIN`, ...) onto the
    /// canonical names the row struct deserializes from.
    fn canonical_headers(headers: &StringRecord) -> StringRecord {
        headers
            .iter()
            .map(|header| {
                KNOWN_COLUMNS
                    .iter()
                    .find(|known| known.eq_ignore_ascii_case(header))
                    .copied()
                    .unwrap_or(header)
            })
            .collect()
    }

    fn reader_builder() -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All);
        builder
    }

    pub fn load<P: AsRef<Path>>(path: P, settings: &EnrichmentSettings) -> Result<Catalog> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading product csv");
        let rdr = Self::reader_builder().from_path(path)?;
        Self::load_records(rdr, settings)
    }

    pub fn load_from_reader<R: Read>(reader: R, settings: &EnrichmentSettings) -> Result<Catalog> {
        let rdr = Self::reader_builder().from_reader(reader);
        Self::load_records(rdr, settings)
    }

    fn load_records<R: Read>(
        mut rdr: csv::Reader<R>,
        settings: &EnrichmentSettings,
    ) -> Result<Catalog> {
        let headers: Vec<String> = rdr.headers()?.iter().map(|s| s.to_string()).collect();
        Self::verify_required_columns(&headers)?;
        let canonical = Self::canonical_headers(rdr.headers()?);
        rdr.set_headers(canonical);

        let mut rows = Vec::new();
        for (idx, result) in rdr.deserialize().enumerate() {
            let row: RawProductRow = result?;
            if row.asin.trim().is_empty() {
                // header is line 1, first data row is line 2
                return Err(DataError::MissingIdentifier { row: idx + 2 });
            }
            rows.push(row);
        }
        debug!(rows = rows.len(), "parsed raw rows");

        let records = Enricher::new(settings).enrich(rows);

        let absent_prices = records.iter().filter(|r| r.price.is_none()).count();
        if absent_prices > 0 {
            warn!(absent_prices, "rows without a usable price");
        }

        let catalog = Catalog::new(records)?;
        info!(
            products = catalog.len(),
            categories = catalog.category_counts().len(),
            "catalog ready"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(csv: &str) -> Result<Catalog> {
        DataLoader::load_from_reader(csv.as_bytes(), &EnrichmentSettings::default())
    }

    #[test]
    fn test_missing_required_column() {
        let err = load("asin,title\nA1,Pan\n").unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(col) if col == "price/value"));
    }

    #[test]
    fn test_optional_columns_default() {
        let catalog = load("ASIN,Title,price/value\nA1,Pan,12.5\nA2,Pot,n/a\n").unwrap();
        let pan = catalog.get("A1").unwrap();
        assert_eq!(pan.price, Some(12.5));
        assert_eq!(pan.category, "Uncategorized");
        assert_eq!(pan.sentiment, 0.0);
        assert_eq!(pan.stars, None);
        assert_eq!(catalog.get("A2").unwrap().price, None);
    }

    #[test]
    fn test_blank_identifier_rejected() {
        let err = load("asin,title,price/value\nA1,Pan,1\n,Pot,2\n").unwrap_err();
        assert!(matches!(err, DataError::MissingIdentifier { row: 3 }));
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        assert!(matches!(
            load("asin,title,price/value\n"),
            Err(DataError::EmptyDataset)
        ));
    }
}
