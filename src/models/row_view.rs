use serde::{Deserialize, Serialize};

/// Flattened view of a rendered row, used for tables and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    pub row_id: String,
    pub user_field: String,
    pub role_field: String,
    pub user: String,
}
