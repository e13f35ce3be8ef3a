use serde::{Deserialize, Serialize};

/// The four lifestyle measurements collected by the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub sleep_hours: f64,
    pub screen_time: f64,
    pub tiktok_usage: f64,
    pub stress_level: i64,
}

impl Metrics {
    /// Values shown before the user has touched any input.
    pub const DEFAULT: Metrics = Metrics {
        sleep_hours: 7.0,
        screen_time: 5.0,
        tiktok_usage: 1.0,
        stress_level: 5,
    };

    pub fn get(&self, field: MetricField) -> f64 {
        match field {
            MetricField::SleepHours => self.sleep_hours,
            MetricField::ScreenTime => self.screen_time,
            MetricField::TiktokUsage => self.tiktok_usage,
            MetricField::StressLevel => self.stress_level as f64,
        }
    }

    /// Overwrites one field. Stress is an integer scale, so the value is
    /// rounded to the nearest whole level.
    pub fn set(&mut self, field: MetricField, value: f64) {
        match field {
            MetricField::SleepHours => self.sleep_hours = value,
            MetricField::ScreenTime => self.screen_time = value,
            MetricField::TiktokUsage => self.tiktok_usage = value,
            MetricField::StressLevel => self.stress_level = value.round() as i64,
        }
    }

    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            sleep_hours: self.sleep_hours,
            screen_time_hours: self.screen_time,
            hours_on_tiktok: self.tiktok_usage,
            stress_level: self.stress_level,
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Body posted to the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub sleep_hours: f64,
    pub screen_time_hours: f64,
    #[serde(rename = "hours_on_TikTok")]
    pub hours_on_tiktok: f64,
    pub stress_level: i64,
}

/// Identifies one input of the questionnaire together with its slider bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricField {
    SleepHours,
    ScreenTime,
    TiktokUsage,
    StressLevel,
}

impl MetricField {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::SleepHours,
            Self::ScreenTime,
            Self::TiktokUsage,
            Self::StressLevel,
        ]
    }

    /// Key used on the prediction service wire format.
    pub const fn wire_key(self) -> &'static str {
        match self {
            Self::SleepHours => "sleep_hours",
            Self::ScreenTime => "screen_time_hours",
            Self::TiktokUsage => "hours_on_TikTok",
            Self::StressLevel => "stress_level",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SleepHours => "Sleep Hours",
            Self::ScreenTime => "Screen Time",
            Self::TiktokUsage => "TikTok Usage",
            Self::StressLevel => "Stress Level",
        }
    }

    pub const fn prompt(self) -> &'static str {
        match self {
            Self::SleepHours => "How many hours of sleep do you get per night?",
            Self::ScreenTime => "How many hours do you spend on screens daily?",
            Self::TiktokUsage => "How many hours do you spend on TikTok daily?",
            Self::StressLevel => "Rate your current stress level",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::StressLevel => "/10",
            _ => "hours",
        }
    }

    pub const fn min(self) -> f64 {
        match self {
            Self::SleepHours => 3.0,
            Self::ScreenTime | Self::TiktokUsage => 0.0,
            Self::StressLevel => 1.0,
        }
    }

    pub const fn max(self) -> f64 {
        match self {
            Self::SleepHours => 12.0,
            Self::ScreenTime => 16.0,
            Self::TiktokUsage => 8.0,
            Self::StressLevel => 10.0,
        }
    }

    /// Slider increments per unit; the step is its reciprocal.
    const fn increments_per_unit(self) -> f64 {
        match self {
            Self::SleepHours | Self::ScreenTime => 2.0,
            Self::TiktokUsage => 10.0,
            Self::StressLevel => 1.0,
        }
    }

    pub fn step(self) -> f64 {
        1.0 / self.increments_per_unit()
    }

    pub const fn range_labels(self) -> (&'static str, &'static str) {
        match self {
            Self::SleepHours => ("3 hours", "12 hours"),
            Self::ScreenTime => ("0 hours", "16 hours"),
            Self::TiktokUsage => ("0 hours", "8+ hours"),
            Self::StressLevel => ("1 - Very Low", "10 - Very High"),
        }
    }

    pub fn default_value(self) -> f64 {
        Metrics::DEFAULT.get(self)
    }

    pub fn contains(self, value: f64) -> bool {
        value.is_finite() && value >= self.min() && value <= self.max()
    }

    /// Snaps a raw value onto the slider: nearest step, then clamped to the
    /// domain. Non-finite input falls back to the field default.
    pub fn clamp(self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default_value();
        }
        let increments = self.increments_per_unit();
        let snapped = (value * increments).round() / increments;
        snapped.clamp(self.min(), self.max())
    }

    /// Renders a value the way the questionnaire shows it; TikTok usage at
    /// the top of its range reads "8+".
    pub fn format_value(self, value: f64) -> String {
        match self {
            Self::TiktokUsage if value >= self.max() => format!("{}+", self.max()),
            Self::StressLevel => format!("{value:.0}"),
            _ => format!("{value:.1}"),
        }
    }
}
