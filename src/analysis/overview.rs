use super::stats;
use crate::data::Catalog;
use ndarray::Array1;
use serde::Serialize;

/// Catalog-wide headline numbers shown before any product is picked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub products: usize,
    pub categories: usize,
    pub lowest_price: Option<f64>,
    pub mean_price: Option<f64>,
    pub price_std: Option<f64>,
    pub mean_sentiment: Option<f64>,
}

pub fn summarize(catalog: &Catalog) -> CatalogSummary {
    let prices = stats::present_values(catalog.records().iter().map(|r| r.price));
    let sentiment: Array1<f64> = catalog.records().iter().map(|r| r.sentiment).collect();

    CatalogSummary {
        products: catalog.len(),
        categories: catalog.category_counts().len(),
        lowest_price: stats::min(prices.view()),
        mean_price: stats::mean(prices.view()),
        price_std: stats::sample_std(prices.view()),
        mean_sentiment: stats::mean(sentiment.view()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighRiskReport {
    pub threshold: f64,
    pub titles: Vec<String>,
}

impl HighRiskReport {
    pub fn message(&self) -> String {
        if self.titles.is_empty() {
            "No high-risk products detected.".to_string()
        } else {
            format!("High-risk products:\n{}", self.titles.join(", "))
        }
    }
}

/// Up to `limit` titles, in row order, whose sentiment is below `threshold`.
pub fn detect_high_risk(catalog: &Catalog, threshold: f64, limit: usize) -> HighRiskReport {
    let titles = catalog
        .records()
        .iter()
        .filter(|r| r.sentiment < threshold)
        .take(limit)
        .map(|r| r.title.clone())
        .collect();
    HighRiskReport { threshold, titles }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over the observed range. The top edge belongs to
/// the last bin; a degenerate range is widened to one unit around it.
pub fn histogram(values: &Array1<f64>, bins: usize) -> Vec<HistogramBin> {
    let (Some(lo), Some(hi)) = (stats::min(values.view()), stats::max(values.view())) else {
        return Vec::new();
    };
    if bins == 0 {
        return Vec::new();
    }
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
    let width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &value in values.iter() {
        let idx = (((value - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: lo + width * (i + 1) as f64,
            count,
        })
        .collect()
}

pub fn sentiment_histogram(catalog: &Catalog, bins: usize) -> Vec<HistogramBin> {
    let values: Array1<f64> = catalog.records().iter().map(|r| r.sentiment).collect();
    histogram(&values, bins)
}
