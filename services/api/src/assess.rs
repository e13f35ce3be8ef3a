use clap::Args;
use mindful_assessment::assessment::{
    AssessmentOutcome, AssessmentPipeline, MetricField, Metrics, OfflinePredictor,
    PredictionClient, Predictor, ResultSource, WizardController, WizardStep, WizardTransition,
};
use mindful_assessment::config::AppConfig;
use mindful_assessment::error::AppError;
use mindful_assessment::telemetry;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Hours of sleep per night (3-12, steps of 0.5)
    #[arg(long, default_value_t = Metrics::DEFAULT.sleep_hours)]
    pub(crate) sleep_hours: f64,
    /// Daily screen time in hours (0-16, steps of 0.5)
    #[arg(long, default_value_t = Metrics::DEFAULT.screen_time)]
    pub(crate) screen_time: f64,
    /// Daily TikTok usage in hours (0-8+, steps of 0.1)
    #[arg(long, default_value_t = Metrics::DEFAULT.tiktok_usage)]
    pub(crate) tiktok_usage: f64,
    /// Current stress level (1-10)
    #[arg(long, default_value_t = Metrics::DEFAULT.stress_level)]
    pub(crate) stress_level: i64,
    /// Override the prediction service base URL
    #[arg(long)]
    pub(crate) predictor_url: Option<String>,
    /// Skip the prediction service and score with the local rules
    #[arg(long)]
    pub(crate) offline: bool,
    /// Print the outcome as JSON instead of a report
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn answers(&self) -> Metrics {
        Metrics {
            sleep_hours: self.sleep_hours,
            screen_time: self.screen_time,
            tiktok_usage: self.tiktok_usage,
            stress_level: self.stress_level,
        }
    }
}

pub(crate) async fn run_assessment(mut args: AssessArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(url) = args.predictor_url.take() {
        config.predictor.base_url = url;
    }

    telemetry::init(&config.telemetry)?;

    let answers = args.answers();
    let outcome = if args.offline {
        let pipeline = AssessmentPipeline::new(OfflinePredictor);
        complete_wizard(&pipeline, answers, !args.json).await
    } else {
        let client = PredictionClient::new(&config.predictor)?;
        let pipeline = AssessmentPipeline::new(client);
        complete_wizard(&pipeline, answers, !args.json).await
    };

    let Some(outcome) = outcome else {
        eprintln!("assessment did not complete");
        return Ok(());
    };

    if args.json {
        let rendered = serde_json::to_string_pretty(&outcome)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))?;
        println!("{rendered}");
    } else {
        render_outcome(&outcome);
    }

    Ok(())
}

/// Feeds each answer through the wizard the way the slider would, then
/// advances past the last page to submit.
async fn complete_wizard<P>(
    pipeline: &AssessmentPipeline<P>,
    answers: Metrics,
    verbose: bool,
) -> Option<AssessmentOutcome>
where
    P: Predictor,
{
    let mut wizard = WizardController::new();

    for step in WizardStep::ordered() {
        let field = step.field();
        let value = field.clamp(answers.get(field));
        wizard.update_field(field, value);

        if verbose {
            println!(
                "Step {} of {} - {}: {} {}",
                step.number(),
                WizardStep::TOTAL,
                field.label(),
                field.format_value(value),
                field.unit()
            );
        }

        if wizard.advance(pipeline).await == WizardTransition::Submitted {
            break;
        }
    }

    wizard.into_outcome()
}

fn render_outcome(outcome: &AssessmentOutcome) {
    let result = &outcome.result;

    println!("\nYour digital wellness results");
    println!(
        "{} ({} risk), risk score {:.0}/100, confidence {:.0}%",
        result.prediction_label,
        result.risk_level,
        result.final_risk_score,
        result.confidence_percentage
    );

    match &result.source {
        ResultSource::Ml => println!("Scored by: ML model"),
        ResultSource::Fallback { error } => println!("Scored by: rule-based assessment ({error})"),
    }

    println!("\nBreakdown");
    for field in MetricField::ordered() {
        println!(
            "- {}: {} {}",
            field.label(),
            field.format_value(outcome.metrics.get(field)),
            field.unit()
        );
    }

    if result.recommendations.is_empty() {
        println!("\nRecommendations: none");
    } else {
        println!("\nRecommendations");
        for recommendation in &result.recommendations {
            println!(
                "- [{}] {}: {}",
                recommendation.priority.label(),
                recommendation.title,
                recommendation.description
            );
        }
    }
}
