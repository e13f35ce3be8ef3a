use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use mindful_assessment::assessment::{
    AssessmentPipeline, OfflinePredictor, PredictionClient, Predictor,
};
use mindful_assessment::config::AppConfig;
use mindful_assessment::error::AppError;
use mindful_assessment::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(url) = args.predictor_url.take() {
        config.predictor.base_url = url;
    }

    telemetry::init(&config.telemetry)?;

    if args.offline {
        info!("prediction service disabled, using rule-based scoring only");
        serve(&config, AssessmentPipeline::new(OfflinePredictor)).await
    } else {
        let client = PredictionClient::new(&config.predictor)?;
        info!(predictor = %client.predict_url(), "prediction service configured");
        serve(&config, AssessmentPipeline::new(client)).await
    }
}

async fn serve<P>(config: &AppConfig, pipeline: AssessmentPipeline<P>) -> Result<(), AppError>
where
    P: Predictor + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_assessment_routes(Arc::new(pipeline))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
