use super::document::{Document, NodeId, NodeType};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];
const BOOLEAN_ATTRIBUTES: &[&str] = &["checked", "disabled", "readonly", "required", "selected"];

/// Escapes a string for use inside a double-quoted attribute value.
///
/// ```
/// use enrollrows::dom::escape_attr;
///
/// assert_eq!(escape_attr(r#"a"b<c>&"#), "a&quot;b&lt;c&gt;&amp;");
/// ```
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

impl Document {
    /// Outer HTML of `node`.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Ok(n) = self.node(node) {
            for child in &n.children {
                self.write_node(*child, &mut out);
            }
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Ok(node) = self.node(id) else {
            return;
        };
        match &node.node_type {
            NodeType::Document => {
                for child in &node.children {
                    self.write_node(*child, out);
                }
            }
            NodeType::Text(text) => out.push_str(&escape_text(text)),
            NodeType::Element(element) => {
                out.push('<');
                out.push_str(&element.tag_name);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if value.is_empty() && BOOLEAN_ATTRIBUTES.contains(&name.as_str()) {
                        continue;
                    }
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
                    return;
                }
                for child in &node.children {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag_name);
                out.push('>');
            }
        }
    }
}
