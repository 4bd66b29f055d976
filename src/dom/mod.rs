//! Minimal DOM surface the enrollment rows need.
//!
//! The row operations only ever look elements up by id, build new
//! elements, and attach or detach children. [`Dom`] captures exactly that,
//! so the same code runs against the in-memory [`Document`] (tests, CLI,
//! preview server) and against the browser through `web-sys`.

mod document;
mod error;
mod serialize;

pub use document::{Document, NodeId};
pub use error::DomError;
pub use serialize::escape_attr;

pub type Result<T> = core::result::Result<T, DomError>;

pub trait Dom {
    /// Handle to an element owned by the backend.
    type Node: Clone;

    /// First attached element carrying `id`, in document order.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn create_element(&mut self, tag_name: &str) -> Result<Self::Node>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<()>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn append_text(&mut self, parent: &Self::Node, text: &str) -> Result<()>;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Element children of `node`, in order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    fn same_node(&self, a: &Self::Node, b: &Self::Node) -> bool;

    fn child_element_count(&self, node: &Self::Node) -> usize {
        self.children(node).len()
    }

    fn is_child_of(&self, child: &Self::Node, parent: &Self::Node) -> bool {
        self.parent(child)
            .map(|p| self.same_node(&p, parent))
            .unwrap_or(false)
    }
}
