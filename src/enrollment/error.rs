use thiserror::Error;

use crate::dom::DomError;

/// Why a row operation did not happen.
///
/// The classification is independent of how it is shown to the user;
/// [`EnrollmentError::user_message`] gives the text the form displays.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrollmentError {
    /// The caller asked to remove the container itself.
    #[error("refusing to remove container '{0}' from itself")]
    SelfRemoval(String),

    #[error("row '{0}' has already been removed or does not exist")]
    RowNotFound(String),

    #[error("container '{0}' does not exist")]
    ContainerNotFound(String),

    /// The row exists but lives somewhere other than the named container.
    #[error("row '{row_id}' is not a child of container '{container_id}'")]
    NotAChild { container_id: String, row_id: String },

    #[error("delete control is not bound to a row")]
    UnboundControl,

    #[error(transparent)]
    Dom(#[from] DomError),
}

impl EnrollmentError {
    pub fn user_message(&self) -> String {
        match self {
            EnrollmentError::SelfRemoval(_) => "Cannot remove parent div.".to_string(),
            EnrollmentError::RowNotFound(_) => {
                "Child div has already been removed or does not exist.".to_string()
            }
            EnrollmentError::ContainerNotFound(id) => {
                format!("Enrollment section '{id}' is missing from the page.")
            }
            EnrollmentError::NotAChild { container_id, row_id } => {
                format!("Row '{row_id}' does not belong to '{container_id}'.")
            }
            EnrollmentError::UnboundControl | EnrollmentError::Dom(_) => {
                format!("Something went wrong: {self}")
            }
        }
    }
}
