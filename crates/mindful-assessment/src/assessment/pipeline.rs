use super::fallback::score_fallback;
use super::metrics::Metrics;
use super::normalizer::{normalize_fallback, normalize_prediction, DisplayResult};
use super::prediction::{PredictionResult, Predictor, ServiceError};
use super::validation::ValidationError;
use tracing::{info, warn};

/// Why a submission was scored locally instead of by the model.
#[derive(Debug, thiserror::Error)]
pub enum FallbackReason {
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
    #[error("service: {0}")]
    Service(#[from] ServiceError),
}

impl FallbackReason {
    /// Note rendered as an informational badge next to the result.
    pub fn user_note(&self) -> &'static str {
        match self {
            FallbackReason::Validation(_) => {
                "Assessment data failed validation - using simplified assessment"
            }
            FallbackReason::Service(_) => "ML API unavailable - using simplified assessment",
        }
    }
}

/// Ordered scoring chain: validate, ask the predictor, and only then score
/// locally. Never fails; the local rules always produce a result.
pub struct AssessmentPipeline<P> {
    predictor: P,
}

impl<P> AssessmentPipeline<P>
where
    P: Predictor,
{
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub async fn assess(&self, metrics: Metrics) -> DisplayResult {
        let result = match self.remote(&metrics).await {
            Ok(prediction) => normalize_prediction(&prediction),
            Err(reason) => {
                warn!(error = %reason, "falling back to rule-based assessment");
                let score = score_fallback(&metrics);
                normalize_fallback(&metrics, &score, &reason)
            }
        };

        info!(
            fallback = result.is_fallback(),
            risk_score = result.final_risk_score,
            high_risk = result.is_high_risk,
            "assessment scored"
        );

        result
    }

    async fn remote(&self, metrics: &Metrics) -> Result<PredictionResult, FallbackReason> {
        ValidationError::check(metrics)?;
        let prediction = self.predictor.predict(metrics).await?;
        Ok(prediction)
    }
}
