use super::metrics::{MetricField, Metrics};
use super::normalizer::DisplayResult;
use super::pipeline::AssessmentPipeline;
use super::prediction::Predictor;
use serde::Serialize;
use tracing::debug;

/// Questionnaire pages in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SleepHours,
    ScreenTime,
    TiktokUsage,
    StressLevel,
}

impl WizardStep {
    pub const TOTAL: u8 = 4;

    pub const fn ordered() -> [Self; 4] {
        [
            Self::SleepHours,
            Self::ScreenTime,
            Self::TiktokUsage,
            Self::StressLevel,
        ]
    }

    /// One-based position shown as "Step n of 4".
    pub const fn number(self) -> u8 {
        match self {
            Self::SleepHours => 1,
            Self::ScreenTime => 2,
            Self::TiktokUsage => 3,
            Self::StressLevel => 4,
        }
    }

    pub const fn field(self) -> MetricField {
        match self {
            Self::SleepHours => MetricField::SleepHours,
            Self::ScreenTime => MetricField::ScreenTime,
            Self::TiktokUsage => MetricField::TiktokUsage,
            Self::StressLevel => MetricField::StressLevel,
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::SleepHours => Some(Self::ScreenTime),
            Self::ScreenTime => Some(Self::TiktokUsage),
            Self::TiktokUsage => Some(Self::StressLevel),
            Self::StressLevel => None,
        }
    }

    const fn previous(self) -> Option<Self> {
        match self {
            Self::SleepHours => None,
            Self::ScreenTime => Some(Self::SleepHours),
            Self::TiktokUsage => Some(Self::ScreenTime),
            Self::StressLevel => Some(Self::TiktokUsage),
        }
    }
}

/// Effect of a navigation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardTransition {
    Advanced(WizardStep),
    Retreated(WizardStep),
    Submitted,
    Ignored,
}

/// Result handed to the results view together with the metrics it scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentOutcome {
    pub metrics: Metrics,
    pub result: DisplayResult,
}

/// Step-by-step driver for one assessment.
///
/// The controller owns the mutable draft until submission; the pipeline
/// scores a copy taken at submit time. Once an outcome is recorded the
/// controller is terminal and ignores further input.
#[derive(Debug)]
pub struct WizardController {
    step: WizardStep,
    draft: Metrics,
    submitting: bool,
    outcome: Option<AssessmentOutcome>,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::with_draft(Metrics::DEFAULT)
    }
}

impl WizardController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: Metrics) -> Self {
        Self {
            step: WizardStep::SleepHours,
            draft,
            submitting: false,
            outcome: None,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &Metrics {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&AssessmentOutcome> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<AssessmentOutcome> {
        self.outcome
    }

    pub fn progress(&self) -> f64 {
        f64::from(self.step.number()) / f64::from(WizardStep::TOTAL)
    }

    fn accepts_input(&self) -> bool {
        !self.submitting && self.outcome.is_none()
    }

    /// Overwrites one draft field. The caller's input widget is responsible
    /// for keeping `value` inside the field's domain. Returns `false` when the
    /// draft is no longer editable.
    pub fn update_field(&mut self, field: MetricField, value: f64) -> bool {
        if !self.accepts_input() {
            debug!(?field, "draft locked, ignoring update");
            return false;
        }
        self.draft.set(field, value);
        true
    }

    pub fn retreat(&mut self) -> WizardTransition {
        if !self.accepts_input() {
            return WizardTransition::Ignored;
        }
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                debug!(step = previous.number(), "wizard moved back");
                WizardTransition::Retreated(previous)
            }
            None => WizardTransition::Ignored,
        }
    }

    /// Moves to the next page, or submits when already on the last one.
    pub async fn advance<P>(&mut self, pipeline: &AssessmentPipeline<P>) -> WizardTransition
    where
        P: Predictor,
    {
        if !self.accepts_input() {
            return WizardTransition::Ignored;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                debug!(step = next.number(), "wizard advanced");
                WizardTransition::Advanced(next)
            }
            None => self.submit(pipeline).await,
        }
    }

    /// Scores a snapshot of the draft and records the outcome. The submitting
    /// flag is cleared even if this future is dropped before completion.
    ///
    /// Accepted on any step; the current step is left unchanged. Use
    /// [`advance`](WizardController::advance) to submit only from the last page.
    pub async fn submit<P>(&mut self, pipeline: &AssessmentPipeline<P>) -> WizardTransition
    where
        P: Predictor,
    {
        let Some(snapshot) = self.begin_submission() else {
            return WizardTransition::Ignored;
        };

        let guard = SubmissionGuard { wizard: self };
        let result = pipeline.assess(snapshot).await;
        guard.wizard.finish_submission(snapshot, result);

        WizardTransition::Submitted
    }

    /// Locks the draft and returns the snapshot to score. `None` while another
    /// submission is open or after completion.
    pub fn begin_submission(&mut self) -> Option<Metrics> {
        if !self.accepts_input() {
            debug!("submission already in progress or complete");
            return None;
        }
        self.submitting = true;
        Some(self.draft)
    }

    /// Records the outcome of a submission opened by [`begin_submission`].
    ///
    /// [`begin_submission`]: WizardController::begin_submission
    pub fn finish_submission(&mut self, metrics: Metrics, result: DisplayResult) -> bool {
        if !self.submitting {
            debug!("no open submission, discarding result");
            return false;
        }
        self.submitting = false;
        self.outcome = Some(AssessmentOutcome { metrics, result });
        true
    }
}

struct SubmissionGuard<'a> {
    wizard: &'a mut WizardController,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.wizard.submitting = false;
    }
}
