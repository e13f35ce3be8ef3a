use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::assessment::metrics::Metrics;
use crate::assessment::pipeline::AssessmentPipeline;
use crate::assessment::prediction::{PredictionResult, Predictor, PredictorHealth, ServiceError};

pub(super) fn metrics(
    sleep_hours: f64,
    screen_time: f64,
    tiktok_usage: f64,
    stress_level: i64,
) -> Metrics {
    Metrics {
        sleep_hours,
        screen_time,
        tiktok_usage,
        stress_level,
    }
}

/// Every rule triggers.
pub(super) fn scenario_a() -> Metrics {
    metrics(5.0, 9.0, 4.0, 8)
}

/// No rule triggers.
pub(super) fn scenario_b() -> Metrics {
    metrics(8.0, 4.0, 1.0, 3)
}

pub(super) fn prediction(high_risk: f64, confidence: f64, label: u8) -> PredictionResult {
    let mut probability_scores = BTreeMap::new();
    probability_scores.insert("low_risk".to_string(), 1.0 - high_risk);
    probability_scores.insert("high_risk".to_string(), high_risk);

    PredictionResult {
        prediction: label,
        probability_scores,
        confidence,
        risk_level: if label == 1 { "High" } else { "Low" }.to_string(),
        prediction_label: if label == 1 { "High Risk" } else { "Low Risk" }.to_string(),
        recommendations: vec![
            "Consider reducing daily screen time to under 8 hours".to_string(),
            "Aim for 7-9 hours of sleep per night for better mental health".to_string(),
            "Limit TikTok usage to reduce mental health impact".to_string(),
        ],
    }
}

pub(super) enum StubResponse {
    Prediction(PredictionResult),
    Unavailable,
    Pending,
}

/// Predictor double that records every metrics snapshot it receives.
pub(super) struct StubPredictor {
    response: StubResponse,
    calls: Mutex<Vec<Metrics>>,
}

impl StubPredictor {
    pub(super) fn new(response: StubResponse) -> Self {
        Self {
            response,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn calls(&self) -> Vec<Metrics> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }
}

#[async_trait]
impl Predictor for StubPredictor {
    async fn predict(&self, metrics: &Metrics) -> Result<PredictionResult, ServiceError> {
        self.calls.lock().expect("calls mutex poisoned").push(*metrics);
        match &self.response {
            StubResponse::Prediction(result) => Ok(result.clone()),
            StubResponse::Unavailable => Err(ServiceError::Status {
                status: 503,
                body: "model not loaded".to_string(),
            }),
            StubResponse::Pending => std::future::pending().await,
        }
    }

    async fn health(&self) -> Result<PredictorHealth, ServiceError> {
        Ok(PredictorHealth {
            status: "healthy".to_string(),
            model_loaded: true,
        })
    }
}

pub(super) fn pipeline(response: StubResponse) -> AssessmentPipeline<StubPredictor> {
    AssessmentPipeline::new(StubPredictor::new(response))
}
