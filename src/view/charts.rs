use crate::analysis::history::{PricePoint, SyntheticPriceHistory};
use crate::analysis::metrics::{BucketCount, RiskAxis, RiskVector};
use crate::analysis::overview::HistogramBin;
use crate::config::SaleSettings;
use crate::data::Catalog;
use chrono::NaiveDate;
use serde::Serialize;

pub const SALE_LABEL: &str = "SALE";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromotionMarker {
    pub date: NaiveDate,
    pub price: f64,
    pub label: &'static str,
}

/// Daily price line with promotion markers overlaid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceHistoryChart {
    pub points: Vec<PricePoint>,
    pub promotions: Vec<PromotionMarker>,
}

impl PriceHistoryChart {
    pub fn new(history: &SyntheticPriceHistory, sale: &SaleSettings) -> Self {
        let promotions = history
            .sale_points(sale)
            .into_iter()
            .map(|point| PromotionMarker {
                date: point.date,
                price: point.price,
                label: SALE_LABEL,
            })
            .collect();

        Self {
            points: history.points.clone(),
            promotions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn sentiment(buckets: &[BucketCount]) -> Self {
        Self {
            x_label: "Sentiment",
            y_label: "Count",
            bars: buckets
                .iter()
                .map(|b| Bar {
                    label: b.bucket.label().to_string(),
                    value: b.count as f64,
                })
                .collect(),
        }
    }

    pub fn category_counts(catalog: &Catalog) -> Self {
        Self {
            x_label: "Category",
            y_label: "Products",
            bars: catalog
                .category_counts()
                .into_iter()
                .map(|(label, count)| Bar {
                    label,
                    value: count as f64,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub axes: Vec<RiskAxis>,
    pub range: [f64; 2],
    pub filled: bool,
}

impl RadarChart {
    pub fn risk(vector: &RiskVector) -> Self {
        Self {
            axes: vector.axes(),
            range: [0.0, 1.0],
            filled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramChart {
    pub x_label: &'static str,
    pub bins: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub asin: String,
    pub title: String,
    pub brand: String,
    pub price: f64,
    pub stars: f64,
    pub size: f64,
}

/// Price against rating, sized by review count. Rows missing either axis
/// are left out of the plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    pub fn comparison(catalog: &Catalog) -> Self {
        let points = catalog
            .records()
            .iter()
            .filter_map(|r| {
                Some(ScatterPoint {
                    asin: r.asin.clone(),
                    title: r.title.clone(),
                    brand: r.brand.clone(),
                    price: r.price?,
                    stars: r.stars?,
                    size: r.reviews_count.unwrap_or(0.0),
                })
            })
            .collect();

        Self {
            x_label: "Price",
            y_label: "Stars",
            points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub x: String,
    pub y: Option<f64>,
    pub hover: String,
}

/// Catalog price per product in row order; absent prices leave gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<LinePoint>,
}

impl LineChart {
    pub fn catalog_prices(catalog: &Catalog) -> Self {
        Self {
            x_label: "asin",
            y_label: "price/value",
            points: catalog
                .records()
                .iter()
                .map(|r| LinePoint {
                    x: r.asin.clone(),
                    y: r.price,
                    hover: r.title.clone(),
                })
                .collect(),
        }
    }
}
