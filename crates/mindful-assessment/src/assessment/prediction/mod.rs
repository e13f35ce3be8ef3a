//! Contract with the external prediction service.
//!
//! The service is treated as best-effort: a single attempt per submission,
//! and anything short of a well-formed [`PredictionResult`] is a
//! [`ServiceError`] that sends the pipeline to the local scorer.

mod client;

pub use client::PredictionClient;

use super::metrics::Metrics;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Probability class consulted for the displayed risk score.
pub const HIGH_RISK_CLASS: &str = "high_risk";

/// Allowed drift when checking that class probabilities sum to one.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-3;

/// Structured output of the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: u8,
    pub probability_scores: BTreeMap<String, f64>,
    pub confidence: f64,
    pub risk_level: String,
    pub prediction_label: String,
    pub recommendations: Vec<String>,
}

impl PredictionResult {
    pub fn is_high_risk(&self) -> bool {
        self.prediction == 1
    }

    pub fn high_risk_probability(&self) -> f64 {
        self.probability_scores
            .get(HIGH_RISK_CLASS)
            .copied()
            .unwrap_or_default()
    }

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.prediction > 1 {
            return Err(ServiceError::InvalidPayload(format!(
                "prediction must be 0 or 1 (got {})",
                self.prediction
            )));
        }

        if !unit_interval(self.confidence) {
            return Err(ServiceError::InvalidPayload(format!(
                "confidence {} outside [0, 1]",
                self.confidence
            )));
        }

        if !self.probability_scores.contains_key(HIGH_RISK_CLASS) {
            return Err(ServiceError::InvalidPayload(format!(
                "probability_scores missing '{HIGH_RISK_CLASS}'"
            )));
        }

        if let Some((class, value)) = self
            .probability_scores
            .iter()
            .find(|(_, value)| !unit_interval(**value))
        {
            return Err(ServiceError::InvalidPayload(format!(
                "probability for '{class}' is {value}, outside [0, 1]"
            )));
        }

        let total: f64 = self.probability_scores.values().sum();
        if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(ServiceError::InvalidPayload(format!(
                "probability_scores sum to {total:.4}, expected 1"
            )));
        }

        Ok(())
    }
}

fn unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Parses a prediction response body. Accepts either the bare result or the
/// `{"success": .., "result": {..}}` envelope returned by the model
/// service.
pub fn parse_prediction_response(raw: &str) -> Result<PredictionResult, ServiceError> {
    let mut value: Value = serde_json::from_str(raw)?;

    if let Some(object) = value.as_object_mut() {
        if object.get("success") == Some(&Value::Bool(false)) {
            return Err(ServiceError::InvalidPayload(
                "service reported success=false".to_string(),
            ));
        }
        if let Some(inner) = object.remove("result") {
            value = inner;
        }
    }

    let result: PredictionResult = serde_json::from_value(value)?;
    result.validate()?;
    Ok(result)
}

/// Reported by the service health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// Anything that can score metrics remotely.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict(&self, metrics: &Metrics) -> Result<PredictionResult, ServiceError>;

    async fn health(&self) -> Result<PredictorHealth, ServiceError>;
}

/// Predictor used when remote scoring is switched off; every call fails so
/// the pipeline goes straight to the rule engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflinePredictor;

#[async_trait]
impl Predictor for OfflinePredictor {
    async fn predict(&self, _metrics: &Metrics) -> Result<PredictionResult, ServiceError> {
        Err(ServiceError::Disabled)
    }

    async fn health(&self) -> Result<PredictorHealth, ServiceError> {
        Err(ServiceError::Disabled)
    }
}

/// Failure talking to the prediction service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("prediction service is disabled")]
    Disabled,
    #[error("invalid prediction service endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("prediction request timed out")]
    Timeout,
    #[error("prediction transport failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("prediction service returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("prediction response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("prediction response violates contract: {0}")]
    InvalidPayload(String),
}
