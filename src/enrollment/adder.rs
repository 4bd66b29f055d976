use serde::Serialize;

use crate::config::{EnrollmentConfig, REMOVE_FUNCTION};
use crate::dom::{self, Dom};

use super::error::EnrollmentError;

/// Attribute on the Delete control naming the container it removes from.
pub const CONTAINER_ATTR: &str = "data-enroll-container";
/// Attribute on the Delete control naming the row it removes.
pub const ROW_ATTR: &str = "data-enroll-row";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedRow {
    pub sequence: u32,
    pub row_id: String,
}

/// Sequence number the next row gets.
///
/// One past the larger of the child count and the highest sequence already
/// used by a child, so ids stay unique after removals.
pub fn next_sequence<D: Dom>(dom: &D, container: &D::Node, config: &EnrollmentConfig) -> u32 {
    let children = dom.children(container);
    let highest = children
        .iter()
        .filter_map(|child| dom.attribute(child, "id"))
        .filter_map(|id| config.sequence_of(&id))
        .max()
        .unwrap_or(0);
    let count = u32::try_from(children.len()).unwrap_or(u32::MAX);
    count.max(highest).saturating_add(1)
}

/// Appends a fresh row to the configured container.
pub fn add_row<D: Dom>(dom: &mut D, config: &EnrollmentConfig) -> Result<AddedRow, EnrollmentError> {
    let container = dom
        .element_by_id(&config.container_id)
        .ok_or_else(|| EnrollmentError::ContainerNotFound(config.container_id.clone()))?;

    let sequence = next_sequence(dom, &container, config);
    let row_id = config.row_id(sequence);
    let row = build_row(dom, config, sequence, &row_id)?;
    dom.append_child(&container, &row)?;

    tracing::debug!(row_id = %row_id, sequence, container_id = %config.container_id, "added enrollment row");
    Ok(AddedRow { sequence, row_id })
}

/// Builds a detached row element for `sequence`.
pub fn build_row<D: Dom>(
    dom: &mut D,
    config: &EnrollmentConfig,
    sequence: u32,
    row_id: &str,
) -> dom::Result<D::Node> {
    let row = dom.create_element("div")?;
    dom.set_attribute(&row, "id", row_id)?;
    dom.set_attribute(&row, "class", &config.row_class)?;

    let user_class = format!("{}-user", config.row_class);
    let user_label = child(dom, &row, "label", &[("class", user_class.as_str())])?;
    dom.append_text(&user_label, &config.user_label)?;
    child(
        dom,
        &user_label,
        "input",
        &[
            ("name", config.field_name(sequence, "user").as_str()),
            ("value", ""),
            ("class", "form-control"),
            ("type", "text"),
        ],
    )?;

    let role_class = format!("{}-role", config.row_class);
    let role_label = child(dom, &row, "label", &[("class", role_class.as_str())])?;
    dom.append_text(&role_label, &config.role_label)?;
    let role_field = config.field_name(sequence, "role");
    let select = child(dom, &role_label, "select", &[("name", role_field.as_str())])?;
    let placeholder = child(dom, &select, "option", &[("disabled", ""), ("selected", "")])?;
    dom.append_text(&placeholder, &config.placeholder)?;
    for role in &config.roles {
        let option = child(dom, &select, "option", &[("value", role.code.as_str())])?;
        dom.append_text(&option, &role.label)?;
    }

    let delete_class = format!("{}-delete", config.row_class);
    let onclick = format!("{REMOVE_FUNCTION}('{}','{}')", config.container_id, row_id);
    let delete = child(
        dom,
        &row,
        "a",
        &[
            ("class", delete_class.as_str()),
            ("onclick", onclick.as_str()),
            (CONTAINER_ATTR, config.container_id.as_str()),
            (ROW_ATTR, row_id),
        ],
    )?;
    dom.append_text(&delete, &format!("{} ", config.delete_label))?;
    child(dom, &delete, "i", &[("class", "fas fa-times")])?;

    Ok(row)
}

fn child<D: Dom>(dom: &mut D, parent: &D::Node, tag_name: &str, attrs: &[(&str, &str)]) -> dom::Result<D::Node> {
    let node = dom.create_element(tag_name)?;
    for (name, value) in attrs {
        dom.set_attribute(&node, name, value)?;
    }
    dom.append_child(parent, &node)?;
    Ok(node)
}
