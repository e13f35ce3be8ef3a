use super::common::*;
use crate::assessment::fallback::score_fallback;
use crate::assessment::normalizer::{
    normalize_fallback, normalize_prediction, Priority, ResultSource,
    FALLBACK_CONFIDENCE_PERCENTAGE,
};
use crate::assessment::pipeline::FallbackReason;
use crate::assessment::prediction::ServiceError;
use crate::assessment::validation::ValidationError;

fn service_down() -> FallbackReason {
    FallbackReason::Service(ServiceError::Timeout)
}

#[test]
fn ml_result_maps_probabilities_to_percentages() {
    let display = normalize_prediction(&prediction(0.72, 0.88, 1));

    assert!((display.final_risk_score - 72.0).abs() < 1e-9);
    assert!((display.confidence_percentage - 88.0).abs() < 1e-9);
    assert!(display.is_high_risk);
    assert_eq!(display.prediction_label, "High Risk");
    assert_eq!(display.risk_level, "High");
    assert_eq!(display.source, ResultSource::Ml);
    assert_eq!(display.error_note(), None);
}

#[test]
fn ml_label_decides_high_risk_not_probability() {
    let display = normalize_prediction(&prediction(0.45, 0.55, 1));
    assert!(display.is_high_risk);

    let display = normalize_prediction(&prediction(0.65, 0.65, 0));
    assert!(!display.is_high_risk);
}

#[test]
fn ml_recommendations_are_ranked() {
    let display = normalize_prediction(&prediction(0.72, 0.88, 1));

    let titles: Vec<&str> = display
        .recommendations
        .iter()
        .map(|rec| rec.title.as_str())
        .collect();
    assert_eq!(
        titles,
        ["Recommendation 1", "Recommendation 2", "Recommendation 3"]
    );

    let priorities: Vec<Priority> = display
        .recommendations
        .iter()
        .map(|rec| rec.priority)
        .collect();
    assert_eq!(priorities, [Priority::High, Priority::Medium, Priority::Low]);
    assert_eq!(
        display.recommendations[0].description,
        "Consider reducing daily screen time to under 8 hours"
    );
}

#[test]
fn ml_result_may_have_no_recommendations() {
    let mut result = prediction(0.1, 0.9, 0);
    result.recommendations.clear();
    let display = normalize_prediction(&result);
    assert!(display.recommendations.is_empty());
}

#[test]
fn fallback_scenario_a_lists_every_triggered_rule() {
    let input = scenario_a();
    let display = normalize_fallback(&input, &score_fallback(&input), &service_down());

    assert_eq!(display.final_risk_score, 100.0);
    assert!(display.is_high_risk);
    assert_eq!(display.confidence_percentage, FALLBACK_CONFIDENCE_PERCENTAGE);
    assert_eq!(display.prediction_label, "High Risk");
    assert_eq!(display.risk_level, "High");

    let summary: Vec<(&str, Priority)> = display
        .recommendations
        .iter()
        .map(|rec| (rec.title.as_str(), rec.priority))
        .collect();
    assert_eq!(
        summary,
        [
            ("Improve Sleep Hygiene", Priority::High),
            ("Reduce Screen Time", Priority::High),
            ("Manage Stress", Priority::High),
            ("Mindful TikTok Usage", Priority::Medium),
        ]
    );
    assert_eq!(
        display.error_note(),
        Some("ML API unavailable - using simplified assessment")
    );
}

#[test]
fn fallback_scenario_b_keeps_balance() {
    let input = scenario_b();
    let display = normalize_fallback(&input, &score_fallback(&input), &service_down());

    assert_eq!(display.final_risk_score, 0.0);
    assert!(!display.is_high_risk);
    assert_eq!(display.prediction_label, "Low Risk");
    assert_eq!(display.risk_level, "Low");
    assert_eq!(display.recommendations.len(), 1);
    assert_eq!(display.recommendations[0].title, "Maintain Your Balance");
    assert_eq!(display.recommendations[0].priority, Priority::Low);
}

#[test]
fn low_risk_fallback_still_recommends_triggered_rules() {
    // tiktok only: score 15, low risk, but the rule still earns advice
    let input = metrics(8.0, 4.0, 5.0, 3);
    let score = score_fallback(&input);
    let display = normalize_fallback(&input, &score, &service_down());

    assert!(!display.is_high_risk);
    assert_eq!(display.final_risk_score, 15.0);
    assert_eq!(display.recommendations.len(), 1);
    assert_eq!(display.recommendations[0].title, "Mindful TikTok Usage");
    assert_eq!(display.recommendations[0].priority, Priority::Medium);
}

#[test]
fn validation_failures_get_their_own_note() {
    let input = metrics(2.0, 4.0, 1.0, 3);
    let reason = FallbackReason::Validation(ValidationError {
        violations: vec!["sleep_hours must be between 3 and 12 (got 2)".to_string()],
    });
    let display = normalize_fallback(&input, &score_fallback(&input), &reason);

    assert_eq!(
        display.error_note(),
        Some("Assessment data failed validation - using simplified assessment")
    );
    assert!(display.is_fallback());
}

#[test]
fn normalization_is_idempotent() {
    let result = prediction(0.72, 0.88, 1);
    assert_eq!(normalize_prediction(&result), normalize_prediction(&result));

    let input = scenario_a();
    let score = score_fallback(&input);
    let reason = service_down();
    assert_eq!(
        normalize_fallback(&input, &score, &reason),
        normalize_fallback(&input, &score, &reason)
    );
}

#[test]
fn display_result_serializes_for_results_view() {
    let input = scenario_b();
    let display = normalize_fallback(&input, &score_fallback(&input), &service_down());
    let body = serde_json::to_value(&display).expect("serializes");

    assert_eq!(body["source"], "fallback");
    assert_eq!(body["error"], "ML API unavailable - using simplified assessment");
    assert_eq!(body["isHighRisk"], false);
    assert_eq!(body["recommendations"][0]["priority"], "low");

    let ml = serde_json::to_value(normalize_prediction(&prediction(0.72, 0.88, 1)))
        .expect("serializes");
    assert_eq!(ml["source"], "ml");
    assert!(ml.get("error").is_none());
    assert_eq!(ml["predictionLabel"], "High Risk");
}
