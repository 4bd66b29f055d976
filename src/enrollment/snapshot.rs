use crate::config::EnrollmentConfig;
use crate::dom::{Document, Dom, NodeId};
use crate::models::RowView;

use super::adder::ROW_ATTR;

/// Ids of the container's children, in order.
pub fn row_ids(doc: &Document, config: &EnrollmentConfig) -> Vec<String> {
    let Some(container) = doc.element_by_id(&config.container_id) else {
        return Vec::new();
    };
    doc.children(&container)
        .iter()
        .filter_map(|row| doc.attribute(row, "id"))
        .collect()
}

/// One [`RowView`] per row currently in the container.
pub fn row_views(doc: &Document, config: &EnrollmentConfig) -> Vec<RowView> {
    let Some(container) = doc.element_by_id(&config.container_id) else {
        return Vec::new();
    };
    doc.children(&container)
        .into_iter()
        .map(|row| {
            let input = doc.find(row, |d, n| d.tag_name(n) == Some("input"));
            let select = doc.find(row, |d, n| d.tag_name(n) == Some("select"));
            RowView {
                row_id: doc.attribute(&row, "id").unwrap_or_default(),
                user_field: input
                    .and_then(|n| doc.attribute(&n, "name"))
                    .unwrap_or_default(),
                role_field: select
                    .and_then(|n| doc.attribute(&n, "name"))
                    .unwrap_or_default(),
                user: input
                    .and_then(|n| doc.attribute(&n, "value"))
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// The Delete control inside row `row_id`.
pub fn delete_control(doc: &Document, row_id: &str) -> Option<NodeId> {
    let row = doc.element_by_id(row_id)?;
    doc.find(row, |d, n| d.attribute(&n, ROW_ATTR).is_some())
}

/// Outer HTML of the configured container.
pub fn container_html(doc: &Document, config: &EnrollmentConfig) -> Option<String> {
    doc.element_by_id(&config.container_id)
        .map(|container| doc.to_html(container))
}
