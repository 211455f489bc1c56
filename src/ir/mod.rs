//! Intermediate Representation (IR) for a reflowed ebook document.
//!
//! The IR provides a small tree structure shared by the loader, the footnote
//! resolver and the Markdown emitter:
//! - Nodes with semantic roles (paragraphs, links, anchors, footnotes, ...)
//! - Sparse semantic attributes (href, id, footnote identifier)
//! - A document-wide text buffer with range references
//!
//! # Example
//!
//! ```
//! use footmark::ir::{Document, Node, NodeId, Role};
//!
//! let mut doc = Document::new();
//! let para = doc.alloc_node(Node::new(Role::Paragraph));
//! doc.append_child(NodeId::ROOT, para);
//! let text = doc.create_text("Hello");
//! doc.append_child(para, text);
//!
//! assert_eq!(doc.collect_text(NodeId::ROOT), "Hello");
//! ```

mod links;
mod node;
mod semantic;

pub use links::{Link, LinkTarget};
pub use node::{Node, NodeId, Role, TextRange};
pub use semantic::SemanticMap;

/// A document in normalized IR form.
///
/// Nodes live in an arena and are never freed; removing a node from the tree
/// only detaches it. Children are kept as an ordered `Vec` so that the
/// resolver can splice siblings by index.
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes in the arena (index 0 is always the root).
    nodes: Vec<Node>,
    /// Sparse semantic attributes (href, id, identifier).
    pub semantics: SemanticMap,
    /// Global text buffer (nodes reference ranges into this).
    text: String,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document with a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(Role::Root)],
            semantics: SemanticMap::new(),
            text: String::new(),
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Role of a node, if it exists.
    pub fn role(&self, id: NodeId) -> Option<Role> {
        self.node(id).map(|n| n.role)
    }

    /// Get the number of allocated nodes (attached or not).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Allocate a new node and return its ID.
    pub fn alloc_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append text to the global buffer and return the range.
    pub fn append_text(&mut self, text: &str) -> TextRange {
        let start = self.text.len() as u32;
        self.text.push_str(text);
        TextRange::new(start, text.len() as u32)
    }

    /// Allocate a detached text node holding `text`.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        let range = self.append_text(text);
        self.alloc_node(Node::text(range))
    }

    /// Get text from a range.
    pub fn text(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = range.end() as usize;
        &self.text[start..end]
    }

    /// Text of a Text node; empty for any other node.
    pub fn node_text(&self, id: NodeId) -> &str {
        match self.node(id) {
            Some(node) if node.role == Role::Text => self.text(node.text),
            _ => "",
        }
    }

    /// Point a Text node at new content.
    pub fn set_node_text(&mut self, id: NodeId, text: &str) {
        let range = self.append_text(text);
        if let Some(node) = self.node_mut(id) {
            node.text = range;
        }
    }

    /// Ordered children of a node.
    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        self.node(parent).map_or(&[], |n| n.children.as_slice())
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Position of `child` among its parent's children.
    pub fn index_in_parent(&self, child: NodeId) -> Option<usize> {
        let parent = self.parent(child)?;
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Sibling immediately before `child`.
    pub fn prev_sibling(&self, child: NodeId) -> Option<NodeId> {
        let parent = self.parent(child)?;
        let index = self.index_in_parent(child)?;
        index
            .checked_sub(1)
            .map(|i| self.children(parent)[i])
    }

    /// Sibling immediately after `child`.
    pub fn next_sibling(&self, child: NodeId) -> Option<NodeId> {
        let parent = self.parent(child)?;
        let index = self.index_in_parent(child)?;
        self.children(parent).get(index + 1).copied()
    }

    /// Append a child node to a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let len = self.children(parent).len();
        self.insert_child(parent, len, child);
    }

    /// Insert `child` at `index` among the children of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = Some(parent);
        }
        if let Some(parent_node) = self.node_mut(parent) {
            let index = index.min(parent_node.children.len());
            parent_node.children.insert(index, child);
        }
    }

    /// Detach and return the child at `index`.
    pub fn remove_child(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let parent_node = self.node_mut(parent)?;
        if index >= parent_node.children.len() {
            return None;
        }
        let child = parent_node.children.remove(index);
        if let Some(child_node) = self.node_mut(child) {
            child_node.parent = None;
        }
        Some(child)
    }

    /// Replace the child at `index` with `replacement`, returning the old child.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        index: usize,
        replacement: NodeId,
    ) -> Option<NodeId> {
        let old = self.remove_child(parent, index)?;
        self.insert_child(parent, index, replacement);
        Some(old)
    }

    /// Iterate over all attached nodes in depth-first order.
    pub fn iter_dfs(&self) -> DfsIter<'_> {
        DfsIter {
            doc: self,
            stack: vec![NodeId::ROOT],
        }
    }

    /// Collect all text under a node, collapsing runs of whitespace.
    pub fn collect_text(&self, id: NodeId) -> String {
        let mut result = String::new();
        self.collect_text_recursive(id, &mut result);
        result
    }

    fn collect_text_recursive(&self, id: NodeId, result: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };

        if node.role == Role::Text && !node.text.is_empty() {
            let text = self.text(node.text);
            let has_leading = text.starts_with(char::is_whitespace);
            let has_trailing = text.ends_with(char::is_whitespace);
            let words: Vec<&str> = text.split_whitespace().collect();

            if !words.is_empty() {
                if has_leading && !result.is_empty() && !result.ends_with(' ') {
                    result.push(' ');
                }
                result.push_str(&words.join(" "));
                if has_trailing {
                    result.push(' ');
                }
            } else if !text.is_empty() && !result.is_empty() && !result.ends_with(' ') {
                result.push(' ');
            }
        }

        for &child in &node.children {
            self.collect_text_recursive(child, result);
        }
    }
}

/// Depth-first iterator over all attached nodes.
pub struct DfsIter<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DfsIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Push children in reverse order so they're visited left-to-right
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());

        Some(current)
    }
}
