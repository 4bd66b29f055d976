use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;

use crate::app_state::AppState;
use crate::handlers;

pub fn build_router(state: AppState) -> Router {
    let pkg_dir = state.pkg_dir.clone();
    Router::new()
        .route("/", get(handlers::form_page::request_form_get))
        .route("/rows/preview", get(handlers::form_page::rows_preview_get))
        .route("/config", get(handlers::system::config_get))
        .route("/healthz", get(handlers::system::healthz))
        // wasm-pack output for the browser bindings
        .nest_service(
            "/pkg",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-cache"),
                ))
                .service(ServeDir::new(pkg_dir)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
