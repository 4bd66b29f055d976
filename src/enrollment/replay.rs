use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::dom::Document;

use super::error::EnrollmentError;
use super::notify::Notifier;
use super::rows::EnrollmentRows;
use super::snapshot::delete_control;

/// One scripted user interaction against the rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayOp {
    /// Click "add another enrollment".
    Add,
    /// Call the remover directly. `container` defaults to the configured one.
    Remove { container: Option<String>, row: String },
    /// Click the Delete control inside `row`.
    Click { row: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown replay operation '{0}' (expected add, remove:<row>, remove:<container>:<row> or click:<row>)")]
pub struct ParseReplayOpError(String);

impl FromStr for ReplayOp {
    type Err = ParseReplayOpError;

    /// ```
    /// use enrollrows::enrollment::ReplayOp;
    ///
    /// assert_eq!("add".parse::<ReplayOp>(), Ok(ReplayOp::Add));
    /// assert_eq!(
    ///     "remove:box:addEnroll-2".parse::<ReplayOp>(),
    ///     Ok(ReplayOp::Remove { container: Some("box".into()), row: "addEnroll-2".into() })
    /// );
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.split(':');
        let op = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("add"), None, None, None) => ReplayOp::Add,
            (Some("remove"), Some(row), None, None) if !row.is_empty() => ReplayOp::Remove {
                container: None,
                row: row.to_string(),
            },
            (Some("remove"), Some(container), Some(row), None) if !container.is_empty() && !row.is_empty() => {
                ReplayOp::Remove {
                    container: Some(container.to_string()),
                    row: row.to_string(),
                }
            }
            (Some("click"), Some(row), None, None) if !row.is_empty() => ReplayOp::Click {
                row: row.to_string(),
            },
            _ => return Err(ParseReplayOpError(s.to_string())),
        };
        Ok(op)
    }
}

impl fmt::Display for ReplayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayOp::Add => write!(f, "add"),
            ReplayOp::Remove { container: None, row } => write!(f, "remove:{row}"),
            ReplayOp::Remove {
                container: Some(container),
                row,
            } => write!(f, "remove:{container}:{row}"),
            ReplayOp::Click { row } => write!(f, "click:{row}"),
        }
    }
}

/// What happened for one [`ReplayOp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayStep {
    pub op: ReplayOp,
    /// Row id added or removed on success.
    pub row_id: Option<String>,
    /// Error text on failure.
    pub error: Option<String>,
}

impl ReplayStep {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Applies `ops` in order; failures are recorded and do not stop the run.
pub fn replay<N: Notifier>(rows: &mut EnrollmentRows<Document, N>, ops: &[ReplayOp]) -> Vec<ReplayStep> {
    ops.iter()
        .map(|op| {
            let result = match op {
                ReplayOp::Add => rows.add().map(|added| added.row_id),
                ReplayOp::Remove { container, row } => {
                    let container = container
                        .clone()
                        .unwrap_or_else(|| rows.config().container_id.clone());
                    rows.remove(&container, row).map(|removed| removed.row_id)
                }
                ReplayOp::Click { row } => match delete_control(rows.dom(), row) {
                    Some(control) => rows.activate_delete(&control).map(|removed| removed.row_id),
                    None => {
                        let e = EnrollmentError::RowNotFound(row.clone());
                        rows.notifier_mut().notify(&e.user_message());
                        Err(e)
                    }
                },
            };
            match result {
                Ok(row_id) => ReplayStep {
                    op: op.clone(),
                    row_id: Some(row_id),
                    error: None,
                },
                Err(e) => ReplayStep {
                    op: op.clone(),
                    row_id: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect()
}
