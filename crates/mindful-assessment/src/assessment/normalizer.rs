use super::fallback::{FallbackScore, RiskFactor};
use super::metrics::Metrics;
use super::pipeline::FallbackReason;
use super::prediction::PredictionResult;
use serde::Serialize;

/// Illustrative confidence attached to rule-based results.
pub const FALLBACK_CONFIDENCE_PERCENTAGE: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Priority for the n-th service recommendation (zero-based).
    fn for_rank(index: usize) -> Self {
        match index {
            0 => Self::High,
            1 => Self::Medium,
            _ => Self::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

/// Which path produced a [`DisplayResult`]. Fallback results carry the note
/// shown to the user explaining why the model was not used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum ResultSource {
    Ml,
    Fallback { error: String },
}

/// Single shape consumed by the results view, whichever path scored it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayResult {
    pub final_risk_score: f64,
    pub is_high_risk: bool,
    pub confidence_percentage: f64,
    pub prediction_label: String,
    pub risk_level: String,
    pub recommendations: Vec<Recommendation>,
    #[serde(flatten)]
    pub source: ResultSource,
}

impl DisplayResult {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ResultSource::Fallback { .. })
    }

    pub fn error_note(&self) -> Option<&str> {
        match &self.source {
            ResultSource::Ml => None,
            ResultSource::Fallback { error } => Some(error),
        }
    }
}

pub fn normalize_prediction(result: &PredictionResult) -> DisplayResult {
    let recommendations = result
        .recommendations
        .iter()
        .enumerate()
        .map(|(index, description)| Recommendation {
            title: format!("Recommendation {}", index + 1),
            description: description.clone(),
            priority: Priority::for_rank(index),
        })
        .collect();

    DisplayResult {
        final_risk_score: result.high_risk_probability() * 100.0,
        is_high_risk: result.is_high_risk(),
        confidence_percentage: result.confidence * 100.0,
        prediction_label: result.prediction_label.clone(),
        risk_level: result.risk_level.clone(),
        recommendations,
        source: ResultSource::Ml,
    }
}

/// Builds the rule-based result. Recommendations come from re-checking each
/// threshold against `metrics`, not from the aggregate score.
pub fn normalize_fallback(
    metrics: &Metrics,
    score: &FallbackScore,
    reason: &FallbackReason,
) -> DisplayResult {
    let is_high_risk = score.is_high_risk();

    let mut recommendations: Vec<Recommendation> = RiskFactor::ordered()
        .into_iter()
        .filter(|factor| factor.is_triggered(metrics))
        .map(factor_recommendation)
        .collect();

    if recommendations.is_empty() {
        recommendations.push(Recommendation {
            title: "Maintain Your Balance".to_string(),
            description:
                "Your digital habits look healthy! Keep up the good work with regular check-ins."
                    .to_string(),
            priority: Priority::Low,
        });
    }

    let (prediction_label, risk_level) = if is_high_risk {
        ("High Risk", "High")
    } else {
        ("Low Risk", "Low")
    };

    DisplayResult {
        final_risk_score: f64::from(score.risk_score),
        is_high_risk,
        confidence_percentage: FALLBACK_CONFIDENCE_PERCENTAGE,
        prediction_label: prediction_label.to_string(),
        risk_level: risk_level.to_string(),
        recommendations,
        source: ResultSource::Fallback {
            error: reason.user_note().to_string(),
        },
    }
}

fn factor_recommendation(factor: RiskFactor) -> Recommendation {
    let (title, description, priority) = match factor {
        RiskFactor::ShortSleep => (
            "Improve Sleep Hygiene",
            "Aim for 7-9 hours of sleep nightly. Create a bedtime routine and avoid screens before bed.",
            Priority::High,
        ),
        RiskFactor::ExcessiveScreenTime => (
            "Reduce Screen Time",
            "Try the 20-20-20 rule: every 20 minutes, look at something 20 feet away for 20 seconds.",
            Priority::High,
        ),
        RiskFactor::HighStress => (
            "Manage Stress",
            "Practice mindfulness, deep breathing, or consider meditation apps for stress relief.",
            Priority::High,
        ),
        RiskFactor::HeavyTiktokUsage => (
            "Mindful TikTok Usage",
            "Set app time limits and take regular breaks to prevent endless scrolling.",
            Priority::Medium,
        ),
    };

    Recommendation {
        title: title.to_string(),
        description: description.to_string(),
        priority,
    }
}
