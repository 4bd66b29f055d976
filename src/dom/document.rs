use super::{Dom, DomError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub(super) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(super) struct Element {
    pub(super) tag_name: String,
    /// Kept in insertion order so serialised markup is stable.
    pub(super) attrs: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub(super) struct Node {
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) node_type: NodeType,
}

/// Arena-backed document tree.
///
/// Nodes are never freed; a removed subtree simply loses its parent and
/// becomes unreachable from the root, which is also what makes it invisible
/// to [`Dom::element_by_id`].
#[derive(Debug, Clone)]
pub struct Document {
    pub(super) nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Document holding a single empty `<div id="{container_id}">`.
    pub fn with_container(container_id: &str) -> Self {
        let mut doc = Self::new();
        let root = doc.root();
        doc.append_element(root, "div", &[("id", container_id)]);
        doc
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates an element with `attrs` and attaches it as the last child of
    /// `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag_name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let element = Element {
            tag_name: tag_name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        self.create_node(Some(parent), NodeType::Element(element))
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag_name.as_str())
    }

    pub fn text_content(&self, node: NodeId) -> String {
        let Some(n) = self.nodes.get(node.0) else {
            return String::new();
        };
        match &n.node_type {
            NodeType::Text(text) => text.clone(),
            NodeType::Document | NodeType::Element(_) => {
                let mut out = String::new();
                for child in &n.children {
                    out.push_str(&self.text_content(*child));
                }
                out
            }
        }
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            cursor = self.nodes.get(current.0).and_then(|n| n.parent);
        }
        false
    }

    /// All attached elements, depth first in document order.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(node, &mut out);
        out
    }

    /// First descendant of `scope` (inclusive) matching `predicate`.
    pub fn find(&self, scope: NodeId, predicate: impl Fn(&Document, NodeId) -> bool) -> Option<NodeId> {
        if self.element(scope).is_some() && predicate(self, scope) {
            return Some(scope);
        }
        self.descendants(scope)
            .into_iter()
            .find(|id| predicate(self, *id))
    }

    fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        let Some(n) = self.nodes.get(node.0) else {
            return;
        };
        for child in &n.children {
            if self.element(*child).is_some() {
                out.push(*child);
                self.collect_descendants(*child, out);
            }
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(super) fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(DomError::InvalidNode(id.0))
    }

    pub(super) fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes.get(id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        let node = self.nodes.get_mut(id.0).ok_or(DomError::InvalidNode(id.0))?;
        match &mut node.node_type {
            NodeType::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id.0)),
        }
    }

    fn can_have_children(&self, id: NodeId) -> Result<()> {
        match self.node(id)?.node_type {
            NodeType::Document | NodeType::Element(_) => Ok(()),
            NodeType::Text(_) => Err(DomError::NotAnElement(id.0)),
        }
    }
}

impl Dom for Document {
    type Node = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendants(self.root)
            .into_iter()
            .find(|node| self.attribute(node, "id").as_deref() == Some(id))
    }

    fn create_element(&mut self, tag_name: &str) -> Result<NodeId> {
        let element = Element {
            tag_name: tag_name.to_string(),
            attrs: Vec::new(),
        };
        Ok(self.create_node(None, NodeType::Element(element)))
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<()> {
        let element = self.element_mut(*node)?;
        match element.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => element.attrs.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn append_text(&mut self, parent: &NodeId, text: &str) -> Result<()> {
        self.can_have_children(*parent)?;
        self.create_node(Some(*parent), NodeType::Text(text.to_string()));
        Ok(())
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        let (parent, child) = (*parent, *child);
        self.can_have_children(parent)?;
        self.node(child)?;
        if child == self.root {
            return Err(DomError::Cycle {
                parent: parent.0,
                child: child.0,
            });
        }

        // Parent must not sit inside child's subtree.
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(DomError::Cycle {
                    parent: parent.0,
                    child: child.0,
                });
            }
            cursor = self.nodes[node.0].parent;
        }

        if let Some(old_parent) = self.nodes[child.0].parent {
            self.nodes[old_parent.0].children.retain(|id| *id != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<()> {
        let (parent, child) = (*parent, *child);
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild {
                parent: parent.0,
                child: child.0,
            });
        }
        self.nodes[parent.0].children.retain(|id| *id != child);
        self.nodes[child.0].parent = None;
        Ok(())
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(node.0)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|c| self.element(*c).is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes.get(node.0)?.parent
    }

    fn same_node(&self, a: &NodeId, b: &NodeId) -> bool {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_by_id_ignores_detached_nodes() {
        let mut doc = Document::with_container("box");
        let orphan = doc.create_element("div").unwrap();
        doc.set_attribute(&orphan, "id", "ghost").unwrap();
        assert!(doc.element_by_id("ghost").is_none());

        let container = doc.element_by_id("box").unwrap();
        doc.append_child(&container, &orphan).unwrap();
        assert_eq!(doc.element_by_id("ghost"), Some(orphan));

        doc.remove_child(&container, &orphan).unwrap();
        assert!(doc.element_by_id("ghost").is_none());
        assert!(!doc.is_attached(orphan));
    }

    #[test]
    fn element_by_id_returns_first_in_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = doc.append_element(root, "div", &[("id", "dup")]);
        doc.append_element(root, "span", &[("id", "dup")]);
        assert_eq!(doc.element_by_id("dup"), Some(first));
    }

    #[test]
    fn append_child_rejects_cycles() {
        let mut doc = Document::with_container("outer");
        let outer = doc.element_by_id("outer").unwrap();
        let inner = doc.append_element(outer, "div", &[]);
        let err = doc.append_child(&inner, &outer).unwrap_err();
        assert!(matches!(err, DomError::Cycle { .. }));
    }

    #[test]
    fn append_child_moves_existing_node() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_element(root, "div", &[("id", "a")]);
        let b = doc.append_element(root, "div", &[("id", "b")]);
        let item = doc.append_element(a, "p", &[]);
        doc.append_child(&b, &item).unwrap();
        assert!(doc.children(&a).is_empty());
        assert_eq!(doc.children(&b), vec![item]);
        assert_eq!(doc.parent(&item), Some(b));
    }

    #[test]
    fn remove_child_requires_direct_child() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.append_element(root, "div", &[]);
        let nested = doc.append_element(a, "div", &[]);
        let deeper = doc.append_element(nested, "div", &[]);
        let err = doc.remove_child(&a, &deeper).unwrap_err();
        assert_eq!(
            err,
            DomError::NotAChild {
                parent: a.index(),
                child: deeper.index()
            }
        );
    }

    #[test]
    fn set_attribute_replaces_in_place() {
        let mut doc = Document::new();
        let root = doc.root();
        let el = doc.append_element(root, "input", &[("name", "a"), ("type", "text")]);
        doc.set_attribute(&el, "name", "b").unwrap();
        assert_eq!(doc.attribute(&el, "name").as_deref(), Some("b"));
        assert_eq!(doc.element(el).unwrap().attrs[0].0, "name");
    }

    #[test]
    fn text_nodes_cannot_have_children() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append_text(&root, "hello").unwrap();
        let text = doc.nodes[root.index()].children[0];
        let err = doc.append_text(&text, "x").unwrap_err();
        assert_eq!(err, DomError::NotAnElement(text.index()));
        assert_eq!(doc.text_content(root), "hello");
    }
}
