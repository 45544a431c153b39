//! View-models handed to the rendering layer.
//!
//! Building a view is a pure function of the catalog, the user's input and
//! the configured end date; nothing here mutates shared state.

pub mod charts;
pub mod format;

use crate::analysis::history::{self, HistoryError, HistoryGenerator};
use crate::analysis::metrics::{MetricsAggregator, ProductMetrics};
use crate::analysis::overview::{self, CatalogSummary};
use crate::analysis::selection;
use crate::config::Config;
use crate::data::Catalog;
use crate::types::SelectionSource;
use charts::{BarChart, HistogramChart, LineChart, PriceHistoryChart, RadarChart, ScatterChart};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Price history synthesis failed: {0}")]
    History(#[from] HistoryError),
}

pub type Result<T> = std::result::Result<T, ViewError>;

const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// What the user has typed or picked.
#[derive(Debug, Clone, Copy)]
pub struct ViewRequest<'a> {
    pub asin: Option<&'a str>,
    pub search: Option<&'a str>,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct KpiStrings {
    pub lowest: String,
    pub average: String,
    pub volatility: String,
    pub return_rate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductCharts {
    pub price_history: PriceHistoryChart,
    pub sentiment: BarChart,
    pub risk_radar: RadarChart,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub asin: String,
    pub selection: SelectionSource,
    pub title: String,
    pub subtitle: String,
    pub price: String,
    pub savings: String,
    pub badge: String,
    pub competitors: Vec<String>,
    pub kpis: KpiStrings,
    pub charts: ProductCharts,
    pub metrics: ProductMetrics,
}

pub fn build_product_view(
    config: &Config,
    catalog: &Catalog,
    request: &ViewRequest<'_>,
) -> Result<ProductView> {
    let selected = selection::resolve(catalog, request.asin, request.search);
    let record = selected.record;
    debug!(
        asin = %record.asin,
        source = selected.source.as_str(),
        "resolved product selection"
    );

    let seed = history::seed_for(&record.asin);
    let price_history =
        HistoryGenerator::new(&config.history).synthesize(record.price, seed, request.end_date)?;
    let metrics = MetricsAggregator::new(config).compute(catalog, record, &price_history);

    let title = if record.title.trim().is_empty() {
        UNKNOWN_PRODUCT.to_string()
    } else {
        record.title.clone()
    };
    let badge = if metrics.no_regret {
        format::NO_REGRET_BADGE.to_string()
    } else {
        String::new()
    };
    let competitors = metrics
        .competitors
        .iter()
        .map(|quote| format::competitor(&quote.channel, quote.price))
        .collect();
    let kpis = KpiStrings {
        lowest: format::money(metrics.kpis.lowest_price),
        average: format::money(metrics.kpis.mean_price),
        volatility: format::decimal(metrics.kpis.history_volatility),
        return_rate: format::percent(metrics.kpis.return_rate),
    };
    let charts = ProductCharts {
        price_history: PriceHistoryChart::new(&price_history, &config.history.sale),
        sentiment: BarChart::sentiment(&metrics.sentiment_buckets),
        risk_radar: RadarChart::risk(&metrics.risk),
    };

    Ok(ProductView {
        asin: record.asin.clone(),
        selection: selected.source,
        title,
        subtitle: format::subtitle(&record.brand, record.stars, record.reviews_count),
        price: format::money(record.price),
        savings: format::savings(record.price, config.metrics.was_price_markup),
        badge,
        competitors,
        kpis,
        charts,
        metrics,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectorOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryCards {
    pub lowest_price: String,
    pub average_price: String,
    pub price_volatility: String,
    pub average_sentiment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogCharts {
    pub price_by_product: LineChart,
    pub sentiment_distribution: HistogramChart,
    pub products_per_category: BarChart,
    pub comparison: ScatterChart,
}

/// Landing-page view: catalog-wide cards, risk note, charts and the
/// product picker.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogOverview {
    pub summary: CatalogSummary,
    pub cards: SummaryCards,
    pub high_risk: String,
    pub selector: Vec<SelectorOption>,
    pub charts: CatalogCharts,
}

pub fn build_catalog_overview(config: &Config, catalog: &Catalog) -> CatalogOverview {
    let settings = &config.overview;
    let summary = overview::summarize(catalog);
    let high_risk =
        overview::detect_high_risk(catalog, settings.high_risk_sentiment, settings.high_risk_limit);

    let cards = SummaryCards {
        lowest_price: format::money(summary.lowest_price),
        average_price: format::money(summary.mean_price),
        price_volatility: format::decimal(summary.price_std),
        average_sentiment: format::decimal(summary.mean_sentiment),
    };

    let selector = catalog
        .records()
        .iter()
        .map(|r| SelectorOption {
            label: format::truncate_chars(&r.title, settings.selector_title_chars),
            value: r.asin.clone(),
        })
        .collect();

    let charts = CatalogCharts {
        price_by_product: LineChart::catalog_prices(catalog),
        sentiment_distribution: HistogramChart {
            x_label: "sentiment_score",
            bins: overview::sentiment_histogram(catalog, settings.sentiment_bins),
        },
        products_per_category: BarChart::category_counts(catalog),
        comparison: ScatterChart::comparison(catalog),
    };

    CatalogOverview {
        summary,
        cards,
        high_risk: high_risk.message(),
        selector,
        charts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::fixtures::record;

    fn request(asin: Option<&str>) -> ViewRequest<'_> {
        ViewRequest {
            asin,
            search: None,
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            record("A1", "Blender", Some(20.0)),
            record("A2", "Blender", Some(22.0)),
            record("A3", "Kettle", None),
        ])
        .unwrap()
    }

    #[test]
    fn test_product_view_strings() {
        let config = Config::default();
        let view = build_product_view(&config, &catalog(), &request(Some("A1"))).unwrap();

        assert_eq!(view.asin, "A1");
        assert_eq!(view.selection, SelectionSource::Explicit);
        assert_eq!(view.price, "$20.00");
        assert_eq!(view.savings, "Save $4.00");
        assert_eq!(view.badge, format::NO_REGRET_BADGE);
        assert_eq!(view.kpis.lowest, "$20.00");
        assert_eq!(view.kpis.average, "$21.00");
        assert_eq!(view.kpis.return_rate, "20%");
        assert_eq!(view.competitors[0], "Official Website  $19.00");
        assert_eq!(view.charts.price_history.points.len(), 90);
        assert_eq!(view.charts.risk_radar.axes.len(), 5);
    }

    #[test]
    fn test_absent_price_renders_not_available() {
        let config = Config::default();
        let view = build_product_view(&config, &catalog(), &request(Some("A3"))).unwrap();

        assert_eq!(view.price, "N/A");
        assert_eq!(view.savings, "");
        assert_eq!(view.badge, "");
        assert_eq!(view.kpis.lowest, "N/A");
        assert_eq!(view.kpis.average, "N/A");
        assert!(view.competitors.iter().all(|c| c.ends_with("N/A")));
        assert_ne!(view.kpis.volatility, "N/A");
    }

    #[test]
    fn test_repeated_render_is_identical() {
        let config = Config::default();
        let catalog = catalog();
        let first = build_product_view(&config, &catalog, &request(Some("A2"))).unwrap();
        let second = build_product_view(&config, &catalog, &request(Some("A2"))).unwrap();
        assert_eq!(
            first.charts.price_history,
            second.charts.price_history
        );
        assert!(first.badge.is_empty());
    }

    #[test]
    fn test_catalog_overview() {
        let config = Config::default();
        let overview = build_catalog_overview(&config, &catalog());

        assert_eq!(overview.summary.products, 3);
        assert_eq!(overview.cards.lowest_price, "$20.00");
        assert_eq!(overview.cards.average_price, "$21.00");
        assert_eq!(overview.selector.len(), 3);
        assert_eq!(overview.charts.products_per_category.bars.len(), 2);
        assert_eq!(overview.charts.sentiment_distribution.bins.len(), 20);
        assert!(overview.high_risk.starts_with("High-risk products:"));
    }
}
