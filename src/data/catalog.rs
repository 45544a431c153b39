use super::{DataError, Result};
use serde::Serialize;
use std::collections::HashMap;

/// A product row after enrichment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    pub asin: String,
    pub title: String,
    pub brand: String,
    pub category: String,
    pub price: Option<f64>,
    pub stars: Option<f64>,
    pub reviews_count: Option<f64>,
    pub description: String,
    pub sentiment: f64,
    /// Trailing rolling std of price in row order; `None` with fewer than
    /// two valid prices in the window.
    pub price_volatility: Option<f64>,
}

/// The enriched product set. Built once and read-only afterwards, so a
/// single instance can back any number of concurrent view renders.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<ProductRecord>,
    by_asin: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(records: Vec<ProductRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(DataError::EmptyDataset);
        }

        let mut by_asin = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            if by_asin.insert(record.asin.clone(), idx).is_some() {
                return Err(DataError::DuplicateIdentifier(record.asin.clone()));
            }
        }

        Ok(Self { records, by_asin })
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> &ProductRecord {
        &self.records[0]
    }

    pub fn get(&self, asin: &str) -> Option<&ProductRecord> {
        self.by_asin.get(asin).map(|&idx| &self.records[idx])
    }

    /// All records sharing `category`, in row order.
    pub fn peers<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ProductRecord> + 'a {
        self.records.iter().filter(move |r| r.category == category)
    }

    /// Distinct categories in first-seen order with their record counts.
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            match positions.get(record.category.as_str()) {
                Some(&pos) => counts[pos].1 += 1,
                None => {
                    positions.insert(record.category.as_str(), counts.len());
                    counts.push((record.category.clone(), 1));
                }
            }
        }
        counts
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ProductRecord;

    pub fn record(asin: &str, category: &str, price: Option<f64>) -> ProductRecord {
        ProductRecord {
            asin: asin.to_string(),
            title: format!("Product {asin}"),
            brand: "Acme".to_string(),
            category: category.to_string(),
            price,
            stars: Some(4.0),
            reviews_count: Some(10.0),
            description: String::new(),
            sentiment: 0.0,
            price_volatility: None,
        }
    }
}
