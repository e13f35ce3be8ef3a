use metrics_exporter_prometheus::PrometheusHandle;
use mindful_assessment::assessment::{MetricField, WizardStep};
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Slider description for one questionnaire page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StepDescriptor {
    pub(crate) number: u8,
    pub(crate) total: u8,
    pub(crate) field: MetricField,
    pub(crate) title: &'static str,
    pub(crate) prompt: &'static str,
    pub(crate) unit: &'static str,
    pub(crate) min: f64,
    pub(crate) max: f64,
    pub(crate) increment: f64,
    pub(crate) default_value: f64,
    pub(crate) min_label: &'static str,
    pub(crate) max_label: &'static str,
}

impl StepDescriptor {
    pub(crate) fn for_step(step: WizardStep) -> Self {
        let field = step.field();
        let (min_label, max_label) = field.range_labels();
        Self {
            number: step.number(),
            total: WizardStep::TOTAL,
            field,
            title: field.label(),
            prompt: field.prompt(),
            unit: field.unit(),
            min: field.min(),
            max: field.max(),
            increment: field.step(),
            default_value: field.default_value(),
            min_label,
            max_label,
        }
    }
}

pub(crate) fn step_descriptors() -> Vec<StepDescriptor> {
    WizardStep::ordered()
        .into_iter()
        .map(StepDescriptor::for_step)
        .collect()
}
