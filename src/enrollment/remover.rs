use serde::Serialize;

use crate::dom::Dom;

use super::adder::{CONTAINER_ATTR, ROW_ATTR};
use super::error::EnrollmentError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedRow {
    pub row_id: String,
}

/// Detaches row `row_id` from container `container_id`.
///
/// Checks run in order: self-removal, missing row, missing container, and
/// finally that the row really is a direct child of the container. Nothing
/// is mutated unless every check passes.
pub fn remove_row<D: Dom>(dom: &mut D, container_id: &str, row_id: &str) -> Result<RemovedRow, EnrollmentError> {
    tracing::debug!(container_id, row_id, "remove enrollment row requested");

    if container_id == row_id {
        tracing::warn!(container_id, "attempted to remove the container itself");
        return Err(EnrollmentError::SelfRemoval(container_id.to_string()));
    }

    let Some(row) = dom.element_by_id(row_id) else {
        tracing::warn!(row_id, "row already removed or missing");
        return Err(EnrollmentError::RowNotFound(row_id.to_string()));
    };
    let Some(container) = dom.element_by_id(container_id) else {
        tracing::warn!(container_id, "container missing");
        return Err(EnrollmentError::ContainerNotFound(container_id.to_string()));
    };

    if !dom.is_child_of(&row, &container) {
        tracing::warn!(container_id, row_id, "row found outside its container");
        return Err(EnrollmentError::NotAChild {
            container_id: container_id.to_string(),
            row_id: row_id.to_string(),
        });
    }

    dom.remove_child(&container, &row)?;
    Ok(RemovedRow {
        row_id: row_id.to_string(),
    })
}

/// Runs the removal a row's Delete control is bound to.
pub fn activate_delete<D: Dom>(dom: &mut D, control: &D::Node) -> Result<RemovedRow, EnrollmentError> {
    let container_id = dom.attribute(control, CONTAINER_ATTR);
    let row_id = dom.attribute(control, ROW_ATTR);
    match (container_id, row_id) {
        (Some(container_id), Some(row_id)) => remove_row(dom, &container_id, &row_id),
        _ => Err(EnrollmentError::UnboundControl),
    }
}
