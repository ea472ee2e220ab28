//! Client for the external prediction service.
//!
//! Posts the input text to the prediction endpoint and reshapes the
//! `{rf, cnn}` response into the local [`AnalysisBundle`] contract. Every
//! failure mode (transport, timeout, non-2xx, malformed body, unknown
//! label, out-of-range confidence) surfaces as a [`RemoteError`]; the
//! [`Analyzer`](crate::api::Analyzer) facade resolves all of them into a
//! local fallback, so callers never see this error type unless they use
//! the client directly.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::api::AnalysisBundle;
use crate::hybrid::{HybridResult, ScoreDistribution, SentimentResult, UnknownLabel};

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from the remote prediction path.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("prediction service returned status {0}")]
    Status(u16),

    #[error(transparent)]
    Label(#[from] UnknownLabel),

    #[error("confidence {0} outside [0, 1]")]
    Confidence(f64),
}

/// Remote client configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sentilens::remote::RemoteConfig;
///
/// let config = RemoteConfig::new()
///     .with_endpoint("http://predict.internal:8080/predict")
///     .with_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct WirePrediction {
    label: String,
    confidence: f64,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    rf: WirePrediction,
    cnn: WirePrediction,
}

impl WirePrediction {
    fn parse(&self) -> Result<SentimentResult, RemoteError> {
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(RemoteError::Confidence(self.confidence));
        }
        Ok(SentimentResult {
            label: self.label.parse()?,
            confidence: self.confidence,
        })
    }
}

impl WireResponse {
    /// Reshape the wire response into the local bundle contract: the
    /// hybrid slot mirrors the cnn prediction, scores are one-hot on its
    /// label, agreement is label equality of the two sub-objects.
    fn into_bundle(self) -> Result<AnalysisBundle, RemoteError> {
        let rf = self.rf.parse()?;
        let cnn = self.cnn.parse()?;

        let mut scores = ScoreDistribution::default();
        scores.set(cnn.label, cnn.confidence);

        let hybrid = HybridResult {
            label: cnn.label,
            confidence: cnn.confidence,
            scores,
            agreement: rf.label == cnn.label,
        };

        Ok(AnalysisBundle::new(rf, cnn, hybrid))
    }
}

/// HTTP client for the prediction service.
pub struct RemoteClient {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl RemoteClient {
    pub fn new(config: RemoteConfig) -> Self {
        RemoteClient {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// One prediction round-trip. Any error here is recoverable by the
    /// caller via the local pipeline.
    pub async fn fetch(&self, text: &str) -> Result<AnalysisBundle, RemoteError> {
        debug!(endpoint = %self.config.endpoint, "requesting remote prediction");

        let response = self
            .http
            .post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .json(&PredictRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let body: WireResponse = response.json().await?;
        body.into_bundle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hybrid::Sentiment;

    fn wire(json: &str) -> WireResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_response_reshape_mirrors_cnn() {
        let bundle = wire(
            r#"{"rf": {"label": "positive", "confidence": 0.8},
                "cnn": {"label": "negative", "confidence": 0.7}}"#,
        )
        .into_bundle()
        .unwrap();

        assert_eq!(bundle.hybrid.label, Sentiment::Negative);
        assert_eq!(bundle.hybrid.confidence, 0.7);
        assert!(!bundle.hybrid.agreement);
        assert_eq!(bundle.hybrid.scores.negative, 0.7);
        assert_eq!(bundle.hybrid.scores.positive, 0.0);
        assert_eq!(bundle.hybrid.scores.neutral, 0.0);
    }

    #[test]
    fn test_response_agreement_on_matching_labels() {
        let bundle = wire(
            r#"{"rf": {"label": "neutral", "confidence": 0.55},
                "cnn": {"label": "neutral", "confidence": 0.6}}"#,
        )
        .into_bundle()
        .unwrap();

        assert!(bundle.hybrid.agreement);
        assert_eq!(bundle.random_forest.label, Sentiment::Neutral);
    }

    #[test]
    fn test_unknown_label_is_an_error() {
        let err = wire(
            r#"{"rf": {"label": "mixed", "confidence": 0.5},
                "cnn": {"label": "neutral", "confidence": 0.5}}"#,
        )
        .into_bundle()
        .unwrap_err();
        assert!(matches!(err, RemoteError::Label(_)));
    }

    #[test]
    fn test_out_of_range_confidence_is_an_error() {
        let err = wire(
            r#"{"rf": {"label": "positive", "confidence": 1.2},
                "cnn": {"label": "neutral", "confidence": 0.5}}"#,
        )
        .into_bundle()
        .unwrap_err();
        assert!(matches!(err, RemoteError::Confidence(_)));
    }

    #[test]
    fn test_missing_field_fails_to_parse() {
        let parsed: Result<WireResponse, _> =
            serde_json::from_str(r#"{"rf": {"label": "positive", "confidence": 0.8}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = RemoteConfig::new()
            .with_endpoint("http://example.test/predict")
            .with_timeout(Duration::from_millis(250));
        assert_eq!(config.endpoint, "http://example.test/predict");
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_request_error() {
        // Port 1 on loopback is never listening.
        let client = RemoteClient::new(
            RemoteConfig::new()
                .with_endpoint("http://127.0.0.1:1/predict")
                .with_timeout(Duration::from_millis(500)),
        );
        let err = client.fetch("hello").await.unwrap_err();
        assert!(matches!(err, RemoteError::Request(_)));
    }
}
