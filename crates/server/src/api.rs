//! HTTP API for category prediction

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use classifier_lib::{ErrorResponse, PredictRequest, PredictResponse, TextClassifier};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Error message for an absent or empty description
pub const MISSING_DESCRIPTION: &str = "Missing description";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn TextClassifier>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn TextClassifier>) -> Self {
        Self { classifier }
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// Predict the category of an expense description
async fn predict_category(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Rejected request body");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    let Some(description) = request.description() else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_DESCRIPTION);
    };

    match state.classifier.predict(description) {
        Ok(category) => (StatusCode::OK, Json(PredictResponse { category })).into_response(),
        Err(e) => {
            error!(error = %e, "Inference failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/predict-category", post(predict_category))
        .with_state(state)
}

/// Start the API server and run until `shutdown` resolves
pub async fn serve<F>(addr: &str, state: Arc<AppState>, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);

    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
