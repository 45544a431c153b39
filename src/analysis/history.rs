use super::stats;
use crate::config::{HistorySettings, SaleSettings};
use chrono::{Duration, NaiveDate};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("History window must span at least one day")]
    EmptyWindow,
    #[error("Invalid noise distribution: {0}")]
    Noise(#[from] rand_distr::NormalError),
    #[error("History dates fall outside the supported calendar range")]
    DateOutOfRange,
}

pub type Result<T> = std::result::Result<T, HistoryError>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Consecutive daily prices ending at a fixed date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyntheticPriceHistory {
    pub points: Vec<PricePoint>,
}

impl SyntheticPriceHistory {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn prices(&self) -> Array1<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Sample std of the synthesized prices. This is the display volatility,
    /// distinct from the rolling volatility computed at ingestion.
    pub fn volatility(&self) -> Option<f64> {
        stats::sample_std(self.prices().view())
    }

    /// A day is a promotion point when its short trailing minimum drops
    /// below `threshold` times its long trailing (expanding) mean.
    pub fn sale_flags(&self, settings: &SaleSettings) -> Vec<bool> {
        let prices = self.prices();
        let short_min = stats::rolling_min(prices.view(), settings.short_window);
        let long_mean = stats::rolling_mean(prices.view(), settings.long_window);

        short_min
            .iter()
            .zip(long_mean.iter())
            .map(|(min, mean)| min.map_or(false, |m| m < mean * settings.threshold))
            .collect()
    }

    pub fn sale_points(&self, settings: &SaleSettings) -> Vec<&PricePoint> {
        self.points
            .iter()
            .zip(self.sale_flags(settings))
            .filter_map(|(point, flagged)| flagged.then_some(point))
            .collect()
    }
}

/// Stable per-product seed: the first eight bytes of the SHA-256 of the
/// identifier, reduced to 32 bits.
pub fn seed_for(asin: &str) -> u64 {
    let digest = Sha256::digest(asin.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes) % (1u64 << 32)
}

pub struct HistoryGenerator<'a> {
    settings: &'a HistorySettings,
}

impl<'a> HistoryGenerator<'a> {
    pub fn new(settings: &'a HistorySettings) -> Self {
        Self { settings }
    }

    /// Builds a descending trend with Gaussian noise and a few sharp dips.
    /// Every call owns its generator, so the same `(base, seed, end_date)`
    /// always yields the same series.
    pub fn synthesize(
        &self,
        base_price: Option<f64>,
        seed: u64,
        end_date: NaiveDate,
    ) -> Result<SyntheticPriceHistory> {
        let days = self.settings.days;
        if days == 0 {
            return Err(HistoryError::EmptyWindow);
        }

        let base = base_price
            .filter(|p| p.is_finite())
            .unwrap_or(self.settings.fallback_base_price);
        let mut rng = StdRng::seed_from_u64(seed);

        let start = base * self.settings.trend_start;
        let end = base * self.settings.trend_end;
        let step = if days > 1 {
            (end - start) / (days - 1) as f64
        } else {
            0.0
        };

        let noise = Normal::new(0.0, base * self.settings.noise_pct)?;
        let mut prices: Vec<f64> = (0..days)
            .map(|i| start + step * i as f64 + noise.sample(&mut rng))
            .collect();

        for _ in 0..(days / 30).max(1) {
            let idx = rng.gen_range(0..days);
            let fraction = self.settings.drop_min_pct + rng.gen::<f64>() * self.settings.drop_span_pct;
            let drop = prices[idx] * fraction;
            for price in prices.iter_mut().skip(idx).take(2) {
                *price -= drop;
            }
        }

        let floor = self.settings.price_floor;
        let points = prices
            .into_iter()
            .enumerate()
            .map(|(i, price)| {
                let offset = Duration::days((days - 1 - i) as i64);
                let date = end_date
                    .checked_sub_signed(offset)
                    .ok_or(HistoryError::DateOutOfRange)?;
                Ok(PricePoint {
                    date,
                    price: price.max(floor),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SyntheticPriceHistory { points })
    }
}
