pub mod request_form_template;
pub mod rows_fragment_template;

pub use request_form_template::RequestFormTemplate;
pub use rows_fragment_template::RowsFragmentTemplate;
