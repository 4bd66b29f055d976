pub mod form_page;
pub mod helpers;
pub mod system;
