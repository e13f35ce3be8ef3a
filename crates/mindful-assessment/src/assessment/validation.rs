use super::metrics::{MetricField, Metrics};

/// Raised when submitted metrics fall outside the questionnaire domains.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("metrics failed validation: {}", violations.join("; "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}

impl ValidationError {
    /// Runs [`validate`] and wraps any violations.
    pub fn check(metrics: &Metrics) -> Result<(), ValidationError> {
        let violations = validate(metrics);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }
}

/// Lists every field outside its documented domain. Empty means the metrics
/// may be submitted.
pub fn validate(metrics: &Metrics) -> Vec<String> {
    MetricField::ordered()
        .into_iter()
        .filter_map(|field| {
            let value = metrics.get(field);
            if field.contains(value) {
                None
            } else {
                Some(format!(
                    "{} must be between {} and {} (got {})",
                    field.wire_key(),
                    field.min(),
                    field.max(),
                    value
                ))
            }
        })
        .collect()
}
