//! Lexicon-based base sentiment scoring.
//!
//! Tokenizes input text and counts matches against fixed positive and
//! negative word lists, then derives a base (label, score) pair with a
//! small uniform perturbation standing in for model noise. This signal
//! feeds both classifier simulators in [`crate::hybrid`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::hybrid::Sentiment;
use crate::noise::NoiseSource;

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "amazing",
        "excellent",
        "fantastic",
        "great",
        "wonderful",
        "awesome",
        "perfect",
        "love",
        "best",
        "incredible",
        "outstanding",
        "brilliant",
        "superb",
        "delicious",
        "excited",
        "happy",
        "joy",
        "beautiful",
        "impressive",
        "satisfied",
        "pleased",
    ]
    .into_iter()
    .collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "terrible",
        "awful",
        "horrible",
        "bad",
        "worst",
        "hate",
        "disgusting",
        "disappointing",
        "annoying",
        "frustrated",
        "angry",
        "sad",
        "boring",
        "useless",
        "ridiculous",
        "stupid",
        "waste",
        "poor",
        "failed",
        "broken",
    ]
    .into_iter()
    .collect()
});

static WORD_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());

/// Classification thresholds on the net lexicon score.
const POSITIVE_THRESHOLD: f64 = 0.2;
const NEGATIVE_THRESHOLD: f64 = -0.2;

/// The lexicon-derived signal before classifier-specific noise is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseSentiment {
    pub label: Sentiment,
    /// Confidence-like magnitude in [0.5, 0.95].
    pub score: f64,
}

/// Score raw text against the lexicons.
///
/// Total for all inputs: empty or punctuation-only text yields zero
/// matches and resolves to neutral through the thresholds.
pub fn score_text<N: NoiseSource>(text: &str, noise: &mut N) -> BaseSentiment {
    let lowered = text.to_lowercase();
    let mut positive = 0i64;
    let mut negative = 0i64;

    for word in WORD_SPLIT.split(&lowered).filter(|w| !w.is_empty()) {
        if POSITIVE_WORDS.contains(word) {
            positive += 1;
        }
        if NEGATIVE_WORDS.contains(word) {
            negative += 1;
        }
    }

    let net = (positive - negative) as f64 + noise.uniform(-0.15, 0.15);

    if net > POSITIVE_THRESHOLD {
        BaseSentiment {
            label: Sentiment::Positive,
            score: (0.6 + net.abs() * 0.2).min(0.95),
        }
    } else if net < NEGATIVE_THRESHOLD {
        BaseSentiment {
            label: Sentiment::Negative,
            score: (0.6 + net.abs() * 0.2).min(0.95),
        }
    } else {
        BaseSentiment {
            label: Sentiment::Neutral,
            score: (0.8 - net.abs() * 0.3).max(0.5),
        }
    }
}
