use serde::{Deserialize, Serialize};

/// One selectable entry of a row's role `<select>`.
///
/// `code` is what the form submits, `label` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleOption {
    pub code: String,
    pub label: String,
}

impl RoleOption {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Roles offered by the enrollment request form.
pub fn default_roles() -> Vec<RoleOption> {
    vec![
        RoleOption::new("TA", "TA"),
        RoleOption::new("DES", "Designer"),
        RoleOption::new("LIB", "Librarian"),
    ]
}

/// Human label for `code`, falling back to the code itself.
pub fn role_label<'a>(roles: &'a [RoleOption], code: &'a str) -> &'a str {
    roles
        .iter()
        .find(|r| r.code == code)
        .map(|r| r.label.as_str())
        .unwrap_or(code)
}
