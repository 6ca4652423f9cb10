//! HTTP adapter for the prediction service.
//!
//! One blocking `POST {base}/predict` per call. No retries and no client-side
//! timeout beyond reqwest's transport defaults.

use reqwest::blocking::Client;

use crate::config::Settings;
use crate::domain::{PredictionPayload, PredictionResult};
use crate::ports::Predictor;
use crate::HeartwatchError;

/// Predictor backed by a remote REST endpoint.
#[derive(Debug, Clone)]
pub struct HttpPredictor {
    client: Client,
    endpoint: String,
}

impl HttpPredictor {
    /// Build a predictor for the endpoint configured in `settings`.
    ///
    /// # Errors
    /// Returns `HeartwatchError::Transport` if the HTTP client cannot be built.
    pub fn new(settings: &Settings) -> crate::Result<Self> {
        Self::with_endpoint(settings.predict_url())
    }

    /// Build a predictor for an explicit endpoint URL.
    ///
    /// # Errors
    /// Returns `HeartwatchError::Transport` if the HTTP client cannot be built.
    pub fn with_endpoint(endpoint: impl Into<String>) -> crate::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("heartwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HeartwatchError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, payload: &PredictionPayload) -> crate::Result<PredictionResult> {
        tracing::debug!(endpoint = %self.endpoint, "Sending prediction request");

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .map_err(|e| {
                tracing::warn!("Prediction request failed before a response: {}", e);
                HeartwatchError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Prediction service rejected request");
            return Err(HeartwatchError::Service {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown Status").to_string(),
            });
        }

        let body = response
            .text()
            .map_err(|e| HeartwatchError::Transport(e.to_string()))?;

        let result: PredictionResult = serde_json::from_str(&body)
            .map_err(|e| HeartwatchError::ResponseFormat(e.to_string()))?;
        result.validate().map_err(HeartwatchError::ResponseFormat)?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeatureDraft, FieldName};
    use axum::{extract::State, http::header, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{mpsc, Arc, Mutex};

    type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// Serve `router` on an ephemeral port from a helper thread.
    fn spawn_server(router: Router) -> String {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("tokio runtime");

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind test listener");
                tx.send(listener.local_addr().expect("local addr"))
                    .expect("report address");
                let _ = axum::serve(listener, router).await;
            });
        });

        let addr = rx.recv().expect("server address");
        format!("http://{addr}")
    }

    async fn capture_and_score(
        State(captured): State<Captured>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        captured
            .lock()
            .expect("capture lock")
            .push((content_type, body));
        Json(json!({ "probability": 0.8421, "has_disease": true }))
    }

    fn payload() -> PredictionPayload {
        let mut draft = FeatureDraft::default();
        draft.set(FieldName::Age, "55").expect("age");
        draft.set(FieldName::RestingBP, "130").expect("bp");
        PredictionPayload::from_draft(&draft).expect("payload")
    }

    #[test]
    fn test_posts_json_and_parses_result() {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/predict", post(capture_and_score))
            .with_state(captured.clone());
        let base = spawn_server(router);

        let predictor =
            HttpPredictor::new(&Settings::with_api_base(&format!("{base}/"))).expect("client");
        assert_eq!(predictor.endpoint(), format!("{base}/predict"));

        let result = predictor.predict(&payload()).expect("prediction");
        assert_eq!(result, PredictionResult::new(0.8421, true));

        let requests = captured.lock().expect("capture lock");
        assert_eq!(requests.len(), 1);
        let (content_type, body) = &requests[0];
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body["Age"], json!("55"));
        assert_eq!(body["RestingBP"], json!(130.0));
        assert_eq!(body["Cholesterol"], Value::Null);
        assert_eq!(body["ST_Slope"], json!("Flat"));
    }

    #[test]
    fn test_server_error_is_service_error() {
        let router = Router::new().route(
            "/predict",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = spawn_server(router);
        let predictor = HttpPredictor::new(&Settings::with_api_base(&base)).expect("client");

        match predictor.predict(&payload()) {
            Err(HeartwatchError::Service { status, reason }) => {
                assert_eq!(status, 500);
                assert_eq!(reason, "Internal Server Error");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_body_is_response_format_error() {
        let router = Router::new()
            .route("/predict", post(|| async { "definitely not json" }))
            .route(
                "/out-of-range",
                post(|| async { Json(json!({ "probability": 4.2, "has_disease": true })) }),
            );
        let base = spawn_server(router);

        let predictor = HttpPredictor::new(&Settings::with_api_base(&base)).expect("client");
        assert!(matches!(
            predictor.predict(&payload()),
            Err(HeartwatchError::ResponseFormat(_))
        ));

        let predictor =
            HttpPredictor::with_endpoint(format!("{base}/out-of-range")).expect("client");
        assert!(matches!(
            predictor.predict(&payload()),
            Err(HeartwatchError::ResponseFormat(_))
        ));
    }

    #[test]
    fn test_unreachable_service_is_transport_error() {
        // Reserve a port, then free it so nothing is listening there.
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
            listener.local_addr().expect("local addr")
        };
        let predictor =
            HttpPredictor::new(&Settings::with_api_base(&format!("http://{addr}"))).expect("client");

        assert!(matches!(
            predictor.predict(&payload()),
            Err(HeartwatchError::Transport(_))
        ));
    }

    #[test]
    fn test_relative_endpoint_without_base_is_transport_error() {
        let predictor = HttpPredictor::new(&Settings::default()).expect("client");
        assert_eq!(predictor.endpoint(), "/predict");
        assert!(matches!(
            predictor.predict(&payload()),
            Err(HeartwatchError::Transport(_))
        ));
    }
}
