use axum::{extract::State, response::IntoResponse, Json};

use crate::app_state::AppState;

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn config_get(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.config.as_ref().clone())
}
