use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use enrollrows::dom::Dom;
use enrollrows::enrollment::container_html;

use crate::app_state::AppState;
use crate::templates::{RequestFormTemplate, RowsFragmentTemplate};

use super::helpers::{document_with_rows, plain_html, render_fragment, render_template};

#[derive(Deserialize)]
pub struct PreviewQuery {
    pub count: Option<usize>,
}

pub async fn request_form_get(State(state): State<AppState>) -> impl IntoResponse {
    let doc = match document_with_rows(&state.config, state.seed_rows) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!(%e, "Failed to build seeded rows");
            return plain_html(e.user_message());
        }
    };
    let (rows_html, row_count) = match doc.element_by_id(&state.config.container_id) {
        Some(container) => (doc.inner_html(container), doc.child_element_count(&container)),
        None => (String::new(), 0),
    };

    render_template(
        &state,
        RequestFormTemplate {
            version: env!("CARGO_PKG_VERSION"),
            container_id: state.config.container_id.clone(),
            rows_html,
            row_count,
        },
    )
}

pub async fn rows_preview_get(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> impl IntoResponse {
    let count = query.count.unwrap_or(1);
    let doc = match document_with_rows(&state.config, count) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::error!(%e, "Failed to build preview rows");
            return plain_html(e.user_message());
        }
    };
    tracing::debug!(count, "Rendering rows preview");
    render_fragment(RowsFragmentTemplate {
        container_html: container_html(&doc, &state.config).unwrap_or_default(),
    })
}
