use super::history::SyntheticPriceHistory;
use super::stats;
use crate::config::{CompetitorChannel, Config, MetricsSettings};
use crate::data::{Catalog, ProductRecord};
use crate::types::{RiskFeature, SentimentBucket};
use ndarray::{Array1, ArrayView1};
use serde::Serialize;

/// All records sharing a category with the selected one (itself included).
#[derive(Debug, Clone)]
pub struct PeerGroup<'a> {
    pub category: &'a str,
    pub members: Vec<&'a ProductRecord>,
}

impl<'a> PeerGroup<'a> {
    pub fn of(catalog: &'a Catalog, record: &'a ProductRecord) -> Self {
        Self {
            category: &record.category,
            members: catalog.peers(&record.category).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Present prices only.
    pub fn prices(&self) -> Array1<f64> {
        stats::present_values(self.members.iter().map(|r| r.price))
    }

    pub fn lowest_price(&self) -> Option<f64> {
        stats::min(self.prices().view())
    }

    pub fn mean_price(&self) -> Option<f64> {
        stats::mean(self.prices().view())
    }

    pub fn price_quantile(&self, q: f64) -> Option<f64> {
        stats::quantile(self.prices().view(), q)
    }

    pub fn max_reviews(&self) -> Option<f64> {
        let reviews = stats::present_values(self.members.iter().map(|r| r.reviews_count));
        stats::max(reviews.view())
    }

    /// Share of members whose sentiment is below `-threshold`.
    pub fn negative_sentiment_rate(&self, threshold: f64) -> f64 {
        if self.members.is_empty() {
            return 0.0;
        }
        let negative = self
            .members
            .iter()
            .filter(|r| r.sentiment < -threshold)
            .count();
        negative as f64 / self.members.len() as f64
    }

    pub fn sentiment_buckets(&self, threshold: f64) -> Vec<BucketCount> {
        SentimentBucket::ALL
            .iter()
            .map(|&bucket| BucketCount {
                bucket,
                count: self
                    .members
                    .iter()
                    .filter(|r| SentimentBucket::classify(r.sentiment, threshold) == bucket)
                    .count(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub bucket: SentimentBucket,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub lowest_price: Option<f64>,
    pub mean_price: Option<f64>,
    pub history_volatility: Option<f64>,
    pub return_rate: f64,
}

/// Estimated return/complaint rate from description sentiment.
pub fn return_rate_proxy(sentiment: f64, settings: &MetricsSettings) -> f64 {
    ((1.0 - sentiment) * settings.return_rate_factor).clamp(0.0, settings.return_rate_cap)
}

/// True when `price` sits at or below the `quantile` of peer prices.
pub fn is_no_regret(price: Option<f64>, peers: &PeerGroup<'_>, quantile: f64) -> bool {
    match (price, peers.price_quantile(quantile)) {
        (Some(price), Some(threshold)) => price <= threshold,
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAxis {
    pub feature: RiskFeature,
    pub label: &'static str,
    pub raw: f64,
    pub normalized: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskVector {
    pub raw: [f64; 5],
    pub normalized: [f64; 5],
}

impl RiskVector {
    pub fn from_raw(raw: [f64; 5]) -> Self {
        let normed = stats::normalize(ArrayView1::from(&raw[..]));
        let mut normalized = [0.0; 5];
        for (slot, value) in normalized.iter_mut().zip(normed.iter()) {
            *slot = *value;
        }
        Self { raw, normalized }
    }

    pub fn axes(&self) -> Vec<RiskAxis> {
        RiskFeature::ALL
            .iter()
            .enumerate()
            .map(|(i, &feature)| RiskAxis {
                feature,
                label: feature.label(),
                raw: self.raw[i],
                normalized: self.normalized[i],
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorQuote {
    pub channel: String,
    pub price: Option<f64>,
}

pub fn competitor_quotes(base: Option<f64>, channels: &[CompetitorChannel]) -> Vec<CompetitorQuote> {
    channels
        .iter()
        .map(|channel| CompetitorQuote {
            channel: channel.name.clone(),
            price: base.map(|p| p * (1.0 + channel.offset)),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductMetrics {
    pub category: String,
    pub peer_count: usize,
    pub kpis: Kpis,
    pub no_regret: bool,
    pub risk: RiskVector,
    pub sentiment_buckets: Vec<BucketCount>,
    pub competitors: Vec<CompetitorQuote>,
}

pub struct MetricsAggregator<'a> {
    config: &'a Config,
}

impl<'a> MetricsAggregator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn compute(
        &self,
        catalog: &Catalog,
        record: &ProductRecord,
        history: &SyntheticPriceHistory,
    ) -> ProductMetrics {
        let settings = &self.config.metrics;
        let peers = PeerGroup::of(catalog, record);

        let history_volatility = history.volatility();
        let return_rate = return_rate_proxy(record.sentiment, settings);
        let kpis = Kpis {
            lowest_price: peers.lowest_price(),
            mean_price: peers.mean_price(),
            history_volatility,
            return_rate,
        };

        let risk = RiskVector::from_raw([
            history_volatility.unwrap_or(0.0),
            peers.negative_sentiment_rate(settings.sentiment_threshold),
            low_rating_severity(record.stars),
            relative_review_volume(record.reviews_count, peers.max_reviews()),
            return_rate,
        ]);

        ProductMetrics {
            category: record.category.clone(),
            peer_count: peers.len(),
            no_regret: is_no_regret(record.price, &peers, settings.no_regret_quantile),
            sentiment_buckets: peers.sentiment_buckets(settings.sentiment_threshold),
            competitors: competitor_quotes(record.price, &self.config.competitors),
            kpis,
            risk,
        }
    }
}

fn low_rating_severity(stars: Option<f64>) -> f64 {
    stars.map_or(0.0, |s| ((5.0 - s) / 5.0).max(0.0))
}

fn relative_review_volume(reviews: Option<f64>, peer_max: Option<f64>) -> f64 {
    match (reviews, peer_max) {
        (Some(count), Some(max)) if max > 0.0 => count / max,
        _ => 0.0,
    }
}
