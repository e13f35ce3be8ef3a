use super::metrics::{MetricField, Metrics};
use serde::{Deserialize, Serialize};

/// Scores strictly above this value classify as high risk.
pub const HIGH_RISK_THRESHOLD: u8 = 50;

/// Lifestyle rule evaluated by the local scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    ShortSleep,
    ExcessiveScreenTime,
    HighStress,
    HeavyTiktokUsage,
}

impl RiskFactor {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::ShortSleep,
            Self::ExcessiveScreenTime,
            Self::HighStress,
            Self::HeavyTiktokUsage,
        ]
    }

    pub const fn weight(self) -> u8 {
        match self {
            Self::ShortSleep => 30,
            Self::ExcessiveScreenTime => 25,
            Self::HighStress => 30,
            Self::HeavyTiktokUsage => 15,
        }
    }

    pub const fn field(self) -> MetricField {
        match self {
            Self::ShortSleep => MetricField::SleepHours,
            Self::ExcessiveScreenTime => MetricField::ScreenTime,
            Self::HighStress => MetricField::StressLevel,
            Self::HeavyTiktokUsage => MetricField::TiktokUsage,
        }
    }

    pub const fn threshold(self) -> f64 {
        match self {
            Self::ShortSleep => 6.0,
            Self::ExcessiveScreenTime => 8.0,
            Self::HighStress => 7.0,
            Self::HeavyTiktokUsage => 3.0,
        }
    }

    /// Strict comparison against the threshold: below it for sleep, above it
    /// for everything else.
    pub fn is_triggered(self, metrics: &Metrics) -> bool {
        let value = metrics.get(self.field());
        match self {
            Self::ShortSleep => value < self.threshold(),
            _ => value > self.threshold(),
        }
    }

    fn note(self, value: f64) -> String {
        match self {
            Self::ShortSleep => format!(
                "{value} hours of sleep is below {} hours",
                self.threshold()
            ),
            Self::ExcessiveScreenTime => format!(
                "{value} hours of screen time exceeds {} hours",
                self.threshold()
            ),
            Self::HighStress => format!(
                "stress level {value} exceeds {}",
                self.threshold()
            ),
            Self::HeavyTiktokUsage => format!(
                "{value} hours on TikTok exceeds {} hours",
                self.threshold()
            ),
        }
    }
}

/// Contribution of one triggered rule, kept for the results breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: RiskFactor,
    pub score: u8,
    pub notes: String,
}

/// Output of the rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackScore {
    pub risk_score: u8,
    pub components: Vec<ScoreComponent>,
}

impl FallbackScore {
    pub fn is_high_risk(&self) -> bool {
        self.risk_score > HIGH_RISK_THRESHOLD
    }

    pub fn factors(&self) -> impl Iterator<Item = RiskFactor> + '_ {
        self.components.iter().map(|component| component.factor)
    }
}

/// Additive rule set used when the prediction service cannot be consulted.
pub fn score_fallback(metrics: &Metrics) -> FallbackScore {
    let mut components = Vec::new();
    let mut total: u16 = 0;

    for factor in RiskFactor::ordered() {
        if !factor.is_triggered(metrics) {
            continue;
        }
        let score = factor.weight();
        total += u16::from(score);
        components.push(ScoreComponent {
            factor,
            score,
            notes: factor.note(metrics.get(factor.field())),
        });
    }

    FallbackScore {
        risk_score: total.min(100) as u8,
        components,
    }
}
