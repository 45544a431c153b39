use super::sentiment::SentimentAnalyzer;
use super::stats;
use crate::config::EnrichmentSettings;
use crate::data::{ProductRecord, RawProductRow};

/// Turns raw CSV rows into enriched product records: numeric coercion,
/// description sentiment, breadcrumb category and rolling price
/// volatility. Row count and order are preserved.
pub struct Enricher<'a> {
    settings: &'a EnrichmentSettings,
    analyzer: SentimentAnalyzer,
}

impl<'a> Enricher<'a> {
    pub fn new(settings: &'a EnrichmentSettings) -> Self {
        Self {
            settings,
            analyzer: SentimentAnalyzer::new(),
        }
    }

    pub fn enrich(&self, rows: Vec<RawProductRow>) -> Vec<ProductRecord> {
        let prices: Vec<Option<f64>> = rows
            .iter()
            .map(|row| parse_price(row.price.as_deref()))
            .collect();
        let volatility = stats::rolling_std(&prices, self.settings.volatility_window);

        rows.into_iter()
            .zip(prices)
            .zip(volatility)
            .map(|((row, price), price_volatility)| {
                let description = row.description.unwrap_or_default();
                ProductRecord {
                    category: self.category(row.bread_crumbs.as_deref()),
                    sentiment: self.analyzer.score(&description),
                    asin: row.asin.trim().to_string(),
                    title: row.title,
                    brand: row.brand.unwrap_or_default(),
                    price,
                    stars: parse_number(row.stars.as_deref()),
                    reviews_count: parse_count(row.reviews_count.as_deref()),
                    description,
                    price_volatility,
                }
            })
            .collect()
    }

    fn category(&self, bread_crumbs: Option<&str>) -> String {
        parse_category(bread_crumbs, &self.settings.breadcrumb_delimiter)
            .unwrap_or_else(|| self.settings.uncategorized_label.clone())
    }
}

/// Last non-empty breadcrumb segment, trimmed.
pub fn parse_category(bread_crumbs: Option<&str>, delimiter: &str) -> Option<String> {
    bread_crumbs?
        .split(delimiter)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}

/// Finite number or absent.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Prices additionally must be non-negative.
pub fn parse_price(raw: Option<&str>) -> Option<f64> {
    parse_number(raw).filter(|v| *v >= 0.0)
}

/// Review counts are scraped with thousands separators ("1,204").
pub fn parse_count(raw: Option<&str>) -> Option<f64> {
    let cleaned: String = raw?.chars().filter(|c| *c != ',').collect();
    parse_number(Some(&cleaned)).filter(|v| *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn row(asin: &str, price: &str, crumbs: Option<&str>, description: Option<&str>) -> RawProductRow {
        RawProductRow {
            asin: asin.to_string(),
            title: format!("Item {asin}"),
            price: Some(price.to_string()),
            bread_crumbs: crumbs.map(str::to_string),
            description: description.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_category_from_breadcrumbs() {
        assert_eq!(
            parse_category(Some("Home & Kitchen › Kitchen & Dining › Blenders "), "›"),
            Some("Blenders".to_string())
        );
        assert_eq!(
            parse_category(Some("Home › Kettles ›  "), "›"),
            Some("Kettles".to_string())
        );
        assert_eq!(parse_category(Some("  ›  "), "›"), None);
        assert_eq!(parse_category(None, "›"), None);
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(parse_price(Some(" 19.99 ")), Some(19.99));
        assert_eq!(parse_price(Some("$19.99")), None);
        assert_eq!(parse_price(Some("-3")), None);
        assert_eq!(parse_price(Some("NaN")), None);
        assert_eq!(parse_price(None), None);
        assert_eq!(parse_count(Some("1,204")), Some(1204.0));
        assert_eq!(parse_number(Some("4.5")), Some(4.5));
    }

    #[test]
    fn test_enrich_keeps_every_row() {
        let settings = EnrichmentSettings::default();
        let rows = vec![
            row("A1", "10", Some("Kitchen › Pans"), Some("great pan")),
            row("A2", "oops", None, None),
            row("A3", "12", Some("Kitchen › Pans"), Some("")),
        ];
        let records = Enricher::new(&settings).enrich(rows);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].category, "Pans");
        assert!(records[0].sentiment > 0.0);
        assert_eq!(records[1].price, None);
        assert_eq!(records[1].category, "Uncategorized");
        assert_eq!(records[1].sentiment, 0.0);
        assert_eq!(records[2].sentiment, 0.0);

        assert_eq!(records[0].price_volatility, None);
        assert_eq!(records[1].price_volatility, None);
        assert_relative_eq!(records[2].price_volatility.unwrap(), 2.0_f64.sqrt(), epsilon = 1e-12);
    }
}
