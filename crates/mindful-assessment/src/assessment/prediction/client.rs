use super::{parse_prediction_response, PredictionResult, Predictor, PredictorHealth, ServiceError};
use crate::assessment::metrics::Metrics;
use crate::config::PredictorConfig;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

const ERROR_BODY_LIMIT: usize = 256;

/// HTTP client for the prediction service. One attempt per call, bounded by
/// the configured timeout.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    http: Client,
    predict_url: Url,
    health_url: Url,
}

impl PredictionClient {
    pub fn new(config: &PredictorConfig) -> Result<Self, ServiceError> {
        let predict_url = join_base_path(&config.base_url, "predict")?;
        let health_url = join_base_path(&config.base_url, "health")?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ServiceError::Transport)?;

        Ok(Self {
            http,
            predict_url,
            health_url,
        })
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }
}

#[async_trait]
impl Predictor for PredictionClient {
    async fn predict(&self, metrics: &Metrics) -> Result<PredictionResult, ServiceError> {
        debug!(url = %self.predict_url, "requesting prediction");

        let response = self
            .http
            .post(self.predict_url.clone())
            .json(&metrics.to_request())
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: truncate(body),
            });
        }

        parse_prediction_response(&body)
    }

    async fn health(&self) -> Result<PredictorHealth, ServiceError> {
        let response = self
            .http
            .get(self.health_url.clone())
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;
        if !status.is_success() {
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body: truncate(body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn classify_transport(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout
    } else {
        ServiceError::Transport(err)
    }
}

fn join_base_path(base: &str, path: &str) -> Result<Url, ServiceError> {
    let base = base.trim();
    if base.is_empty() {
        return Err(ServiceError::InvalidEndpoint {
            url: base.to_string(),
            reason: "base url is empty".to_string(),
        });
    }

    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&joined).map_err(|err| ServiceError::InvalidEndpoint {
        url: joined.clone(),
        reason: err.to_string(),
    })
}

fn truncate(mut body: String) -> String {
    if body.len() > ERROR_BODY_LIMIT {
        let mut cut = ERROR_BODY_LIMIT;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}
