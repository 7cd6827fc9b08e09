use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use orchestration_parser::{handle, InvocationEvent};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

async fn handler(
    State(state): State<AppState>,
    Json(event): Json<InvocationEvent>,
) -> Response {
    match handle(&event, &state.options) {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            tracing::error!("Failed to parse model output: {}", e);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

// Configure routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/parse", post(handler))
        .with_state(state)
}
