use super::common::*;
use crate::assessment::fallback::{score_fallback, RiskFactor, HIGH_RISK_THRESHOLD};

#[test]
fn scenario_a_triggers_every_rule() {
    let score = score_fallback(&scenario_a());

    assert_eq!(score.risk_score, 100);
    assert!(score.is_high_risk());
    assert_eq!(
        score.factors().collect::<Vec<_>>(),
        RiskFactor::ordered().to_vec()
    );
    assert_eq!(
        score.components.iter().map(|c| u16::from(c.score)).sum::<u16>(),
        100
    );
}

#[test]
fn scenario_b_scores_zero() {
    let score = score_fallback(&scenario_b());

    assert_eq!(score.risk_score, 0);
    assert!(!score.is_high_risk());
    assert!(score.components.is_empty());
}

#[test]
fn thresholds_are_strict() {
    let base = scenario_b();

    let at_boundary = metrics(6.0, 8.0, 3.0, 7);
    assert_eq!(score_fallback(&at_boundary).risk_score, 0);

    let mut sleep = base;
    sleep.sleep_hours = 5.999;
    assert_eq!(score_fallback(&sleep).risk_score, 30);

    let mut screen = base;
    screen.screen_time = 8.001;
    assert_eq!(score_fallback(&screen).risk_score, 25);

    let mut stress = base;
    stress.stress_level = 8;
    assert_eq!(score_fallback(&stress).risk_score, 30);

    let mut tiktok = base;
    tiktok.tiktok_usage = 3.001;
    assert_eq!(score_fallback(&tiktok).risk_score, 15);
}

#[test]
fn high_risk_requires_score_above_fifty() {
    // sleep + screen = 55
    let above = metrics(5.0, 9.0, 1.0, 3);
    assert_eq!(score_fallback(&above).risk_score, 55);
    assert!(score_fallback(&above).is_high_risk());

    // sleep + tiktok = 45
    let below = metrics(5.0, 4.0, 4.0, 3);
    assert_eq!(score_fallback(&below).risk_score, 45);
    assert!(!score_fallback(&below).is_high_risk());

    assert_eq!(HIGH_RISK_THRESHOLD, 50);
}

#[test]
fn scoring_is_deterministic() {
    let input = metrics(5.5, 10.0, 2.0, 9);
    let first = score_fallback(&input);
    let second = score_fallback(&input);
    assert_eq!(first, second);
    assert_eq!(first.risk_score, 85);
}

#[test]
fn components_explain_each_rule() {
    let score = score_fallback(&metrics(5.0, 4.0, 1.0, 9));
    let notes: Vec<&str> = score.components.iter().map(|c| c.notes.as_str()).collect();
    assert_eq!(notes.len(), 2);
    assert!(notes[0].contains("sleep"));
    assert!(notes[1].contains("stress level 9"));
}
