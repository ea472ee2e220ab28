//! Weighted fusion of the two simulator outputs.
//!
//! Each prediction is spread into a per-class score distribution, the two
//! distributions are blended with fixed weights (the volatile model gets
//! the higher weight), normalized, and the winning class picked with the
//! fixed tie-break. Agreement between the simulators boosts the final
//! confidence; disagreement floors it.

use super::{HybridResult, ScoreDistribution, Sentiment, SentimentResult};

const FOREST_WEIGHT: f64 = 0.4;
const CNN_WEIGHT: f64 = 0.6;

/// Remainder share given to positive/negative when they did not win.
const SIDE_SHARE: f64 = 0.3;
/// Remainder share given to neutral when it did not win.
const NEUTRAL_SHARE: f64 = 0.4;

/// Spread a single prediction into a three-class distribution: the
/// predicted label keeps the confidence, the losing classes split the
/// remainder (40% to neutral, 30% to each of positive/negative).
fn spread(result: &SentimentResult) -> ScoreDistribution {
    let remainder = 1.0 - result.confidence;
    let mut dist = ScoreDistribution::default();
    for label in Sentiment::PRIORITY {
        let share = match label {
            Sentiment::Neutral => NEUTRAL_SHARE,
            _ => SIDE_SHARE,
        };
        if label != result.label {
            dist.set(label, remainder * share);
        }
    }
    dist.set(result.label, result.confidence);
    dist
}

/// Fuse the forest-like and cnn-like predictions into the hybrid result.
pub fn combine(forest: &SentimentResult, cnn: &SentimentResult) -> HybridResult {
    let forest_dist = spread(forest);
    let cnn_dist = spread(cnn);

    let blended = ScoreDistribution {
        positive: forest_dist.positive * FOREST_WEIGHT + cnn_dist.positive * CNN_WEIGHT,
        negative: forest_dist.negative * FOREST_WEIGHT + cnn_dist.negative * CNN_WEIGHT,
        neutral: forest_dist.neutral * FOREST_WEIGHT + cnn_dist.neutral * CNN_WEIGHT,
    };

    let scores = blended.normalized();
    let label = scores.dominant();
    let max_score = scores.get(label);

    let agreement = forest.label == cnn.label;
    let confidence = if agreement {
        (max_score * 1.1).min(0.98)
    } else {
        max_score.max(0.5)
    };

    HybridResult {
        label,
        confidence,
        scores,
        agreement,
    }
}
