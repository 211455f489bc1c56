//! Arena-allocated DOM that html5ever parses into.
//!
//! This is the raw markup tree, before role mapping. Only what the IR
//! transform needs is kept: element names, attributes and text.

use html5ever::{LocalName, QualName};

/// Unique identifier for a node in the raw DOM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawId(pub u32);

/// Node payload.
#[derive(Debug, Clone)]
pub enum RawData {
    /// Document root.
    Document,
    /// Element with name and attributes.
    ///
    /// The name is boxed so references handed out to html5ever stay valid
    /// while the arena grows.
    Element {
        name: Box<QualName>,
        attrs: Vec<Attribute>,
    },
    /// Text content.
    Text(String),
    /// Comments, doctypes and processing instructions (ignored).
    Other,
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the raw DOM.
#[derive(Debug)]
pub struct RawNode {
    pub data: RawData,
    pub parent: Option<RawId>,
    pub children: Vec<RawId>,
}

/// Arena-based DOM tree.
#[derive(Debug)]
pub struct RawDom {
    nodes: Vec<RawNode>,
}

impl Default for RawDom {
    fn default() -> Self {
        Self::new()
    }
}

impl RawDom {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self { nodes: Vec::new() };
        dom.alloc(RawData::Document);
        dom
    }

    fn alloc(&mut self, data: RawData) -> RawId {
        let id = RawId(self.nodes.len() as u32);
        self.nodes.push(RawNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> RawId {
        RawId(0)
    }

    /// Get a node by ID.
    pub fn get(&self, id: RawId) -> Option<&RawNode> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: RawId) -> Option<&mut RawNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Create a new element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> RawId {
        self.alloc(RawData::Element {
            name: Box::new(name),
            attrs,
        })
    }

    /// Create a new text node.
    pub fn create_text(&mut self, text: String) -> RawId {
        self.alloc(RawData::Text(text))
    }

    /// Create a node the transform will ignore.
    pub fn create_other(&mut self) -> RawId {
        self.alloc(RawData::Other)
    }

    /// Append a child to a parent node.
    pub fn append(&mut self, parent: RawId, child: RawId) {
        self.detach(child);
        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = Some(parent);
        }
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(child);
        }
    }

    /// Insert a node before a sibling.
    pub fn insert_before(&mut self, sibling: RawId, new_node: RawId) {
        self.detach(new_node);
        let Some(parent) = self.get(sibling).and_then(|n| n.parent) else {
            return;
        };
        let index = self.index_of(parent, sibling).unwrap_or(0);
        if let Some(new) = self.get_mut(new_node) {
            new.parent = Some(parent);
        }
        if let Some(par) = self.get_mut(parent) {
            par.children.insert(index, new_node);
        }
    }

    /// Append text, merging with a trailing text child when there is one.
    pub fn append_text(&mut self, parent: RawId, text: &str) {
        let last = self.get(parent).and_then(|n| n.children.last().copied());
        if let Some(last) = last
            && let Some(RawNode {
                data: RawData::Text(existing),
                ..
            }) = self.get_mut(last)
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.append(parent, text_node);
    }

    /// Insert text before a sibling, merging with a preceding text node.
    pub fn insert_text_before(&mut self, sibling: RawId, text: &str) {
        let prev = self.get(sibling).and_then(|n| n.parent).and_then(|parent| {
            let index = self.index_of(parent, sibling)?;
            let prev = index.checked_sub(1)?;
            self.get(parent).map(|p| p.children[prev])
        });
        if let Some(prev) = prev
            && let Some(RawNode {
                data: RawData::Text(existing),
                ..
            }) = self.get_mut(prev)
        {
            existing.push_str(text);
            return;
        }

        let text_node = self.create_text(text.to_string());
        self.insert_before(sibling, text_node);
    }

    /// Remove a node from its parent, if it has one.
    pub fn detach(&mut self, id: RawId) {
        let Some(parent) = self.get(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(par) = self.get_mut(parent) {
            par.children.retain(|&c| c != id);
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    /// Move every child of `node` to the end of `new_parent`.
    pub fn reparent_children(&mut self, node: RawId, new_parent: RawId) {
        let children = match self.get_mut(node) {
            Some(n) => std::mem::take(&mut n.children),
            None => return,
        };
        for child in children {
            if let Some(c) = self.get_mut(child) {
                c.parent = None;
            }
            self.append(new_parent, child);
        }
    }

    fn index_of(&self, parent: RawId, child: RawId) -> Option<usize> {
        self.get(parent)?.children.iter().position(|&c| c == child)
    }

    /// Children of a node.
    pub fn children(&self, parent: RawId) -> &[RawId] {
        self.get(parent).map_or(&[], |n| n.children.as_slice())
    }

    /// Find the first element with the given tag, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Option<RawId> {
        let mut stack = vec![self.document()];
        while let Some(id) = stack.pop() {
            if self.element_name(id).is_some_and(|n| n.as_ref() == tag) {
                return Some(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        None
    }

    /// Get element's local name (tag).
    pub fn element_name(&self, id: RawId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            RawData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: RawId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            RawData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Get text content of a text node.
    pub fn text_content(&self, id: RawId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            RawData::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether a node has no element or non-whitespace text descendants.
    pub fn is_contentless(&self, id: RawId) -> bool {
        self.children(id).iter().all(|&child| {
            self.text_content(child)
                .is_some_and(|t| t.trim().is_empty())
                || matches!(self.get(child).map(|n| &n.data), Some(RawData::Other))
        })
    }
}
