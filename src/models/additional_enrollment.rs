use serde::{Deserialize, Serialize};

/// One submitted additional enrollment (a user and the role they get).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalEnrollment {
    /// Position the row had in the submitted form.
    pub index: u32,
    /// Lowercased; `None` when the row submitted no user field.
    pub user: Option<String>,
    /// `None` when no role was picked.
    pub role: Option<String>,
}
