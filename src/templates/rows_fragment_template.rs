use askama::Template;

#[derive(Template)]
#[template(path = "rows_fragment.html")]
pub struct RowsFragmentTemplate {
    pub container_html: String,
}
