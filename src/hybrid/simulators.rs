//! Simulated classifiers over the lexicon base signal.
//!
//! Two estimators with deliberately different statistical shape:
//!
//! - [`simulate_forest`] never changes the base label and keeps its
//!   confidence in a narrow band (low variance).
//! - [`simulate_cnn`] jitters confidence over a wider range and can flip
//!   its label on short inputs (high variance).
//!
//! Both are pure functions of their inputs and the noise source; no state
//! is carried between calls.

use crate::lexicon::BaseSentiment;
use crate::noise::NoiseSource;

use super::{Sentiment, SentimentResult};

/// Inputs shorter than this (in chars) are eligible for the cnn-like
/// simulator's label flip.
const SHORT_TEXT_CHARS: usize = 50;

/// Probability mass above which the unit draw triggers a flip (20% chance).
const FLIP_THRESHOLD: f64 = 0.8;

/// Conservative, label-stable estimator.
///
/// Confidence is `max(0.4, base * 0.9 + u)` with `u` uniform in [0, 0.1],
/// so it tracks the base score closely and never drops below 0.4.
pub fn simulate_forest<N: NoiseSource>(base: &BaseSentiment, noise: &mut N) -> SentimentResult {
    let confidence = (base.score * 0.9 + noise.uniform(0.0, 0.1)).max(0.4);
    SentimentResult {
        label: base.label,
        confidence,
    }
}

/// Volatile estimator with a short-input instability.
///
/// Confidence is the base score jittered by a uniform draw in [−0.2, 0.2]
/// and clamped to [0.3, 0.98]. For inputs under 50 chars there is a 20%
/// chance the label is replaced by a uniformly random one and the
/// confidence scaled by 0.7.
pub fn simulate_cnn<N: NoiseSource>(
    text: &str,
    base: &BaseSentiment,
    noise: &mut N,
) -> SentimentResult {
    let mut confidence = (base.score + noise.uniform(-0.2, 0.2)).clamp(0.3, 0.98);
    let mut label = base.label;

    if text.chars().count() < SHORT_TEXT_CHARS && noise.unit() > FLIP_THRESHOLD {
        label = noise.pick3(Sentiment::PRIORITY);
        confidence *= 0.7;
    }

    SentimentResult { label, confidence }
}
