use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use enrollrows::config::{EnrollmentConfig, PageContext, MAX_PREVIEW_ROWS, PAGE_CONTEXT_GLOBAL};
use enrollrows::dom::Document;
use enrollrows::enrollment::{add_row, EnrollmentError};

use crate::app_state::AppState;

pub fn plain_html<S: AsRef<str>>(s: S) -> Response {
    Html(format!("<!DOCTYPE html><html><body><p>{}</p></body></html>", s.as_ref())).into_response()
}

/// Document whose container already holds `count` fresh rows.
pub fn document_with_rows(config: &EnrollmentConfig, count: usize) -> Result<Document, EnrollmentError> {
    let mut doc = Document::with_container(&config.container_id);
    for _ in 0..count.min(MAX_PREVIEW_ROWS) {
        add_row(&mut doc, config)?;
    }
    Ok(doc)
}

pub fn inject_context(state: &AppState, mut html: String) -> Response {
    // The browser bindings build their config from this.
    let context = PageContext::from(state.config.as_ref());
    let context_str = serde_json::to_string(&context)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");
    let inject = format!(
        r#"<script>window.{} = {};</script></body>"#,
        PAGE_CONTEXT_GLOBAL, context_str
    );
    html = html.replace("</body>", &inject);
    Html(html).into_response()
}

pub fn render_template<T: askama::Template>(state: &AppState, t: T) -> Response {
    match t.render() {
        Ok(body) => inject_context(state, body),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub fn render_fragment<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
