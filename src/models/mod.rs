pub mod additional_enrollment;
pub mod role_option;
pub mod row_view;

pub use additional_enrollment::AdditionalEnrollment;
pub use role_option::{default_roles, role_label, RoleOption};
pub use row_view::RowView;
