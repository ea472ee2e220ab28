//! Hybrid sentiment ensemble.
//!
//! This module holds the ensemble data model and the two stages that turn
//! a lexicon base signal into a fused prediction:
//!
//! - [`simulators`] — two simulated classifiers with distinct variance
//!   behavior (a conservative forest-like model and a volatile cnn-like
//!   model) drawing from the shared base signal.
//! - [`combine`] — weighted score-distribution fusion with a fixed
//!   tie-break and an agreement-based confidence adjustment.
//!
//! Labels are a closed three-variant enum; every consumer matches
//! exhaustively, so no fourth label state can leak in from the wire.

pub mod combine;
pub mod simulators;

pub use combine::combine;
pub use simulators::{simulate_cnn, simulate_forest};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentiment class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// All labels in tie-break priority order (positive wins ties over
    /// negative, negative over neutral).
    pub const PRIORITY: [Sentiment; 3] =
        [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error for unrecognized wire labels.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown sentiment label: {0:?}")]
pub struct UnknownLabel(pub String);

impl FromStr for Sentiment {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(UnknownLabel(other.to_string())),
        }
    }
}

/// A single classifier's prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: Sentiment,
    /// Confidence in [0, 1].
    pub confidence: f64,
}

/// Per-class score weights. After [`normalized`](Self::normalized) the
/// three entries sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreDistribution {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

impl ScoreDistribution {
    pub fn get(&self, label: Sentiment) -> f64 {
        match label {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }

    pub fn set(&mut self, label: Sentiment, value: f64) {
        match label {
            Sentiment::Positive => self.positive = value,
            Sentiment::Negative => self.negative = value,
            Sentiment::Neutral => self.neutral = value,
        }
    }

    pub fn sum(&self) -> f64 {
        self.positive + self.negative + self.neutral
    }

    /// Scale entries to sum to 1. A degenerate all-zero distribution
    /// normalizes to uniform thirds rather than dividing by zero.
    pub fn normalized(&self) -> ScoreDistribution {
        let total = self.sum();
        if total <= 0.0 {
            return ScoreDistribution {
                positive: 1.0 / 3.0,
                negative: 1.0 / 3.0,
                neutral: 1.0 / 3.0,
            };
        }
        ScoreDistribution {
            positive: self.positive / total,
            negative: self.negative / total,
            neutral: self.neutral / total,
        }
    }

    /// The label with the maximum score. Ties resolve by the fixed
    /// priority order positive, negative, neutral: a later label must
    /// strictly exceed the current best to displace it.
    pub fn dominant(&self) -> Sentiment {
        let mut best = Sentiment::PRIORITY[0];
        for &label in &Sentiment::PRIORITY[1..] {
            if self.get(label) > self.get(best) {
                best = label;
            }
        }
        best
    }
}

/// The fused ensemble prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridResult {
    pub label: Sentiment,
    pub confidence: f64,
    pub scores: ScoreDistribution,
    /// True iff both simulators produced the same label. Derived, never
    /// set independently.
    pub agreement: bool,
}
