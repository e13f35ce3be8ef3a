//! Assessment scoring, validation, and result normalization.

mod fallback;
pub mod metrics;
mod normalizer;
mod pipeline;
pub mod prediction;
mod validation;
mod wizard;

#[cfg(test)]
mod tests;

pub use fallback::{score_fallback, FallbackScore, RiskFactor, ScoreComponent, HIGH_RISK_THRESHOLD};
pub use metrics::{MetricField, Metrics, PredictionRequest};
pub use normalizer::{
    normalize_fallback, normalize_prediction, DisplayResult, Priority, Recommendation,
    ResultSource, FALLBACK_CONFIDENCE_PERCENTAGE,
};
pub use pipeline::{AssessmentPipeline, FallbackReason};
pub use prediction::{
    OfflinePredictor, PredictionClient, PredictionResult, Predictor, PredictorHealth,
    ServiceError,
};
pub use validation::{validate, ValidationError};
pub use wizard::{AssessmentOutcome, WizardController, WizardStep, WizardTransition};
