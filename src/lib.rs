//! # Sentilens — Hybrid Sentiment Analysis Engine
//!
//! Sentiment classification engine behind a model-comparison dashboard:
//! a lexicon scorer derives a base signal, two simulated classifiers with
//! different variance behavior build on it, and an ensemble combiner fuses
//! them into a single calibrated prediction.
//!
//! ## Quick Start
//!
//! ```
//! use sentilens::api::Analyzer;
//!
//! let analyzer = Analyzer::new();
//! let bundle = analyzer.analyze("This coffee is amazing!");
//!
//! println!("forest: {} ({:.0}%)",
//!          bundle.random_forest.label,
//!          bundle.random_forest.confidence * 100.0);
//! println!("cnn:    {} ({:.0}%)",
//!          bundle.cnn.label,
//!          bundle.cnn.confidence * 100.0);
//! println!("hybrid: {} ({:.0}%, agreement: {})",
//!          bundle.hybrid.label,
//!          bundle.hybrid.confidence * 100.0,
//!          bundle.hybrid.agreement);
//! ```
//!
//! ## Remote predictions with local fallback
//!
//! ```no_run
//! # async fn run() {
//! use sentilens::api::Analyzer;
//! use sentilens::remote::RemoteConfig;
//!
//! let analyzer = Analyzer::with_config(
//!     RemoteConfig::new().with_endpoint("http://127.0.0.1:5000/predict"),
//! );
//!
//! // Falls back to the local engine on any transport or decode failure.
//! let bundle = analyzer.analyze_remote("The service was wonderful").await;
//! # }
//! ```
//!
//! ## Design
//!
//! - The "classifiers" are lexicon-based heuristics with injected
//!   randomness standing in for trained models; their statistical shape
//!   (ranges, weights, tie-break) is part of the contract.
//! - All randomness flows through [`noise::NoiseSource`], so tests can
//!   seed or stub every draw.
//! - Labels are a closed enum; the wire layer strict-parses them and any
//!   malformed remote response degrades to local computation.

pub mod api;
pub mod hybrid;
pub mod lexicon;
pub mod noise;
pub mod remote;

pub use api::{AnalysisBundle, Analyzer};
pub use hybrid::{HybridResult, ScoreDistribution, Sentiment, SentimentResult};
