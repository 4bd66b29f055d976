use askama::Template;

/// Course request form page with the additional-enrollments section.
#[derive(Template)]
#[template(path = "request_form.html")]
pub struct RequestFormTemplate {
    pub version: &'static str,
    pub container_id: String,
    /// Pre-rendered rows; already escaped markup.
    pub rows_html: String,
    pub row_count: usize,
}
