//! High-level analysis facade.
//!
//! This module provides the engine's public entry points: the local
//! pipeline (lexicon scoring, two classifier simulators, ensemble fusion)
//! and the remote path that degrades to the local pipeline on any failure.
//!
//! # Quick Start
//!
//! ```
//! use sentilens::api::Analyzer;
//!
//! let analyzer = Analyzer::new();
//! let bundle = analyzer.analyze("This product is amazing!");
//!
//! println!("{} ({:.1}%)", bundle.hybrid.label, bundle.hybrid.confidence * 100.0);
//! ```
//!
//! # Deterministic runs
//!
//! Randomness is injectable for reproducible output:
//!
//! ```
//! use sentilens::api::Analyzer;
//! use sentilens::noise::seeded_noise;
//!
//! let analyzer = Analyzer::new();
//! let a = analyzer.analyze_with("great coffee", &mut seeded_noise(42));
//! let b = analyzer.analyze_with("great coffee", &mut seeded_noise(42));
//! assert_eq!(a.hybrid, b.hybrid);
//! ```

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::hybrid::{combine, simulate_cnn, simulate_forest, HybridResult, SentimentResult};
use crate::lexicon::score_text;
use crate::noise::{thread_noise, NoiseSource};
use crate::remote::{RemoteClient, RemoteConfig};

/// One complete analysis: both simulated classifiers, the fused hybrid
/// prediction, and the time of analysis. Built fresh per input text and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisBundle {
    pub random_forest: SentimentResult,
    pub cnn: SentimentResult,
    pub hybrid: HybridResult,
    /// RFC 3339 timestamp with millisecond precision.
    pub timestamp: String,
}

impl AnalysisBundle {
    pub(crate) fn new(
        random_forest: SentimentResult,
        cnn: SentimentResult,
        hybrid: HybridResult,
    ) -> Self {
        AnalysisBundle {
            random_forest,
            cnn,
            hybrid,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Main entry point for sentiment analysis.
pub struct Analyzer {
    remote: RemoteClient,
}

impl Analyzer {
    /// Analyzer with the default remote configuration.
    pub fn new() -> Self {
        Self::with_config(RemoteConfig::default())
    }

    /// Analyzer with a custom remote endpoint/timeout.
    pub fn with_config(config: RemoteConfig) -> Self {
        Analyzer {
            remote: RemoteClient::new(config),
        }
    }

    /// Run the local pipeline with ambient randomness.
    ///
    /// Total: never fails, for any input including empty and non-ASCII
    /// text.
    pub fn analyze(&self, text: &str) -> AnalysisBundle {
        self.analyze_with(text, &mut thread_noise())
    }

    /// Run the local pipeline with a caller-supplied noise source.
    pub fn analyze_with<N: NoiseSource>(&self, text: &str, noise: &mut N) -> AnalysisBundle {
        let base = score_text(text, noise);
        let forest = simulate_forest(&base, noise);
        let cnn = simulate_cnn(text, &base, noise);
        let hybrid = combine(&forest, &cnn);
        AnalysisBundle::new(forest, cnn, hybrid)
    }

    /// Ask the remote prediction service, falling back to the local
    /// pipeline on any transport failure, timeout, or malformed response.
    ///
    /// Always returns a bundle; remote errors never escape this boundary.
    pub async fn analyze_remote(&self, text: &str) -> AnalysisBundle {
        match self.remote.fetch(text).await {
            Ok(bundle) => bundle,
            Err(err) => {
                warn!(error = %err, "remote prediction failed, using local analysis");
                self.analyze(text)
            }
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hybrid::Sentiment;
    use crate::noise::seeded_noise;
    use crate::noise::stub::ZeroNoise;
    use crate::remote::RemoteConfig;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;

    #[test]
    fn test_bundle_invariants_hold_across_seeds() {
        let analyzer = Analyzer::new();
        let texts = [
            "",
            "ok",
            "amazing excellent wonderful",
            "terrible awful broken waste",
            "the package arrived on a tuesday",
            "great great terrible",
        ];
        for seed in 0..50 {
            let mut noise = seeded_noise(seed);
            for text in texts {
                let bundle = analyzer.analyze_with(text, &mut noise);
                let scores = bundle.hybrid.scores;

                assert!((scores.sum() - 1.0).abs() < 1e-9);
                assert!(scores.positive >= 0.0 && scores.negative >= 0.0 && scores.neutral >= 0.0);
                assert_eq!(bundle.hybrid.label, scores.dominant());

                let max_score = scores.get(bundle.hybrid.label);
                if bundle.hybrid.agreement {
                    assert!(bundle.hybrid.confidence <= 0.98);
                    assert!(bundle.hybrid.confidence >= max_score);
                } else {
                    assert!(bundle.hybrid.confidence >= 0.5);
                }

                assert!((0.0..=1.0).contains(&bundle.random_forest.confidence));
                assert!((0.0..=1.0).contains(&bundle.cnn.confidence));
            }
        }
    }

    #[test]
    fn test_zero_noise_positive_scenario() {
        let analyzer = Analyzer::new();
        let bundle = analyzer.analyze_with("amazing excellent wonderful", &mut ZeroNoise);

        assert_eq!(bundle.random_forest.label, Sentiment::Positive);
        assert!(bundle.random_forest.confidence >= 0.855 - 1e-9);
        assert_eq!(bundle.cnn.label, Sentiment::Positive);
        assert_eq!(bundle.hybrid.label, Sentiment::Positive);
        assert!(bundle.hybrid.agreement);
    }

    #[test]
    fn test_zero_noise_empty_scenario() {
        let analyzer = Analyzer::new();
        let bundle = analyzer.analyze_with("", &mut ZeroNoise);

        assert_eq!(bundle.random_forest.label, Sentiment::Neutral);
        assert_eq!(bundle.cnn.label, Sentiment::Neutral);
        assert_eq!(bundle.hybrid.label, Sentiment::Neutral);
    }

    #[test]
    fn test_repeated_calls_yield_fresh_bundles() {
        let analyzer = Analyzer::new();
        let a = analyzer.analyze("decent enough");
        let b = analyzer.analyze("decent enough");
        // Values may differ (ambient randomness), shape may not.
        for bundle in [&a, &b] {
            assert!((0.0..=1.0).contains(&bundle.hybrid.confidence));
            assert!((bundle.hybrid.scores.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let analyzer = Analyzer::new();
        let bundle = analyzer.analyze("anything");
        assert!(chrono::DateTime::parse_from_rfc3339(&bundle.timestamp).is_ok());
    }

    #[test]
    fn test_bundle_serializes_camel_case() {
        let analyzer = Analyzer::new();
        let json = serde_json::to_string(&analyzer.analyze("great")).unwrap();
        assert!(json.contains("\"randomForest\""));
        assert!(json.contains("\"agreement\""));
        assert!(json.contains("\"timestamp\""));
    }

    /// One-shot HTTP stub on loopback answering every request with the
    /// given status line and body.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status_line,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{}/predict", addr)
    }

    #[tokio::test]
    async fn test_remote_500_falls_back_to_local() {
        let endpoint = serve_once("HTTP/1.1 500 Internal Server Error", "{}");
        let analyzer = Analyzer::with_config(
            RemoteConfig::new()
                .with_endpoint(endpoint)
                .with_timeout(Duration::from_secs(2)),
        );

        let bundle = analyzer.analyze_remote("amazing excellent wonderful").await;
        // Fallback bundle is structurally identical to the local path.
        assert!((bundle.hybrid.scores.sum() - 1.0).abs() < 1e-9);
        assert_eq!(bundle.hybrid.label, bundle.hybrid.scores.dominant());
    }

    #[tokio::test]
    async fn test_remote_success_reshapes_response() {
        let endpoint = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"rf": {"label": "positive", "confidence": 0.91},
               "cnn": {"label": "positive", "confidence": 0.88}}"#,
        );
        let analyzer = Analyzer::with_config(
            RemoteConfig::new()
                .with_endpoint(endpoint)
                .with_timeout(Duration::from_secs(2)),
        );

        let bundle = analyzer.analyze_remote("what a great day").await;
        assert_eq!(bundle.random_forest.confidence, 0.91);
        assert_eq!(bundle.hybrid.label, Sentiment::Positive);
        assert_eq!(bundle.hybrid.confidence, 0.88);
        assert!(bundle.hybrid.agreement);
    }

    #[tokio::test]
    async fn test_remote_malformed_body_falls_back() {
        let endpoint = serve_once("HTTP/1.1 200 OK", r#"{"unexpected": true}"#);
        let analyzer = Analyzer::with_config(
            RemoteConfig::new()
                .with_endpoint(endpoint)
                .with_timeout(Duration::from_secs(2)),
        );

        let bundle = analyzer.analyze_remote("fine").await;
        assert!((bundle.hybrid.scores.sum() - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unreachable_remote_falls_back() {
        let analyzer = Analyzer::with_config(
            RemoteConfig::new()
                .with_endpoint("http://127.0.0.1:1/predict")
                .with_timeout(Duration::from_millis(500)),
        );
        let bundle = analyzer.analyze_remote("hello there").await;
        assert!((bundle.hybrid.scores.sum() - 1.0).abs() < 1e-9);
        assert_eq!(bundle.hybrid.label, bundle.hybrid.scores.dominant());
    }
}
