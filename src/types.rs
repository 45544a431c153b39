use serde::{Deserialize, Serialize};

/// Coarse sentiment class used by the review-topic bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentBucket {
    Positive,
    Neutral,
    Negative,
}

impl SentimentBucket {
    pub const ALL: [SentimentBucket; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Scores strictly above `threshold` are positive, strictly below
    /// `-threshold` negative, everything in between neutral.
    pub fn classify(score: f64, threshold: f64) -> Self {
        if score > threshold {
            Self::Positive
        } else if score < -threshold {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }
}

/// Axes of the risk radar, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFeature {
    PriceVolatility,
    NegativeSentiment,
    LowRatings,
    HighReviews,
    ReturnComplaint,
}

impl RiskFeature {
    pub const ALL: [RiskFeature; 5] = [
        Self::PriceVolatility,
        Self::NegativeSentiment,
        Self::LowRatings,
        Self::HighReviews,
        Self::ReturnComplaint,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::PriceVolatility => "Price Volatility",
            Self::NegativeSentiment => "Negative Sentiment",
            Self::LowRatings => "Low Ratings",
            Self::HighReviews => "High Reviews",
            Self::ReturnComplaint => "Return/Complaint",
        }
    }
}

/// How a product was picked for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    Explicit,
    Search,
    Default,
}

impl SelectionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Search => "search",
            Self::Default => "default",
        }
    }
}
