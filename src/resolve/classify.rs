//! Anchor/link classification.
//!
//! One depth-first, left-to-right walk per document. Each visit returns a
//! [`Flow`] telling the walker how to continue after the visited node may
//! have been replaced or removed.
//!
//! In the chapter every link is a footnote reference. In the footnote
//! container a link is a definition when the sibling right before it is an
//! anchor marker that some earlier reference already resolved to; otherwise it
//! is a reference too. Because that test only looks at what has been resolved
//! so far, the chapter must be classified first, and a link classified as a
//! reference is never revisited, even if its own anchor is cited later.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::allocator::Allocator;
use super::collect::link_target;
use crate::config::DocumentKind;
use crate::error::{Error, Result};
use crate::ir::{Document, Node, NodeId, Role};

/// Traversal control returned for every visited node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Descend into the node, then move to the next sibling.
    Continue,
    /// Move to the next sibling without descending.
    SkipSubtree,
    /// Resume at this index of the current parent's children.
    ReprocessAt(usize),
}

/// Footnote nodes produced so far, by identifier.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    pub references: BTreeMap<String, usize>,
    pub definitions: BTreeSet<String>,
}

/// Walks one document, rewriting links in place.
pub(crate) struct Classifier<'a> {
    doc: &'a mut Document,
    kind: DocumentKind,
    own_file: &'a str,
    allocator: &'a mut Allocator,
    tally: &'a mut Tally,
}

impl<'a> Classifier<'a> {
    pub fn new(
        doc: &'a mut Document,
        kind: DocumentKind,
        own_file: &'a str,
        allocator: &'a mut Allocator,
        tally: &'a mut Tally,
    ) -> Self {
        Self {
            doc,
            kind,
            own_file,
            allocator,
            tally,
        }
    }

    /// Classify the whole document.
    pub fn run(mut self) -> Result<()> {
        self.walk(NodeId::ROOT)
    }

    fn walk(&mut self, parent: NodeId) -> Result<()> {
        let mut index = 0;
        while let Some(&child) = self.doc.children(parent).get(index) {
            match self.visit(parent, index, child)? {
                Flow::Continue => {
                    self.walk(child)?;
                    index += 1;
                }
                Flow::SkipSubtree => index += 1,
                Flow::ReprocessAt(next) => index = next,
            }
        }
        Ok(())
    }

    fn visit(&mut self, parent: NodeId, index: usize, node: NodeId) -> Result<Flow> {
        match self.doc.role(node) {
            Some(Role::Link) => match self.kind {
                DocumentKind::Chapter => self.reference(parent, index, node),
                DocumentKind::Footnotes => match self.cited_anchor_before(parent, index) {
                    Some((anchor_index, identifier)) => {
                        self.definition(parent, anchor_index, index, identifier)
                    }
                    None => self.reference(parent, index, node),
                },
            },
            Some(Role::Anchor) => self.anchor(parent, index, node),
            Some(Role::FootnoteReference | Role::FootnoteDefinition) => Ok(Flow::SkipSubtree),
            _ => Ok(Flow::Continue),
        }
    }

    /// Whitespace-only text, which does not separate a marker from its link.
    fn is_blank_text(&self, id: NodeId) -> bool {
        self.doc.role(id) == Some(Role::Text) && self.doc.node_text(id).trim().is_empty()
    }

    /// Index and identifier of the cited anchor marker right before `index`.
    fn cited_anchor_before(&self, parent: NodeId, index: usize) -> Option<(usize, String)> {
        let siblings = self.doc.children(parent);
        let anchor_index = (0..index)
            .rev()
            .find(|&i| !self.is_blank_text(siblings[i]))?;
        let prev = siblings[anchor_index];
        if self.doc.role(prev) != Some(Role::Anchor) {
            return None;
        }
        let anchor = self.doc.semantics.id(prev)?;
        let identifier = self.allocator.registry().lookup(anchor)?;
        Some((anchor_index, identifier.to_string()))
    }

    /// Anchor markers only survive in the footnote container, and only when
    /// cited and followed by the link they pair with.
    fn anchor(&mut self, parent: NodeId, index: usize, node: NodeId) -> Result<Flow> {
        let anchor = self.doc.semantics.id(node).unwrap_or_default();
        let cited = self.allocator.registry().is_cited(anchor);

        if self.kind == DocumentKind::Footnotes && cited {
            let next = self.doc.children(parent)[index + 1..]
                .iter()
                .copied()
                .find(|&n| !self.is_blank_text(n));
            if next.and_then(|n| self.doc.role(n)) != Some(Role::Link) {
                return Err(Error::UnexpectedSiblingStructure {
                    anchor: anchor.to_string(),
                    reason: "cited anchor is not followed by a link",
                });
            }
            return Ok(Flow::SkipSubtree);
        }

        self.doc.remove_child(parent, index);
        Ok(Flow::ReprocessAt(index))
    }

    fn reference(&mut self, parent: NodeId, index: usize, node: NodeId) -> Result<Flow> {
        let target = link_target(self.doc, node, self.own_file)?;
        let text = self.doc.collect_text(node);
        let label = footnote_label(&text);
        if label.is_empty() {
            return Err(Error::MalformedLink {
                href: self.doc.semantics.href(node).unwrap_or_default().to_string(),
                reason: "link has no text label",
            });
        }

        let identifier = self.allocator.resolve(&target.anchor, label)?;
        debug!(
            document = self.kind.name(),
            target = %target.anchor,
            identifier = %identifier,
            "footnote reference"
        );

        let reference = self.doc.alloc_node(Node::new(Role::FootnoteReference));
        self.doc.semantics.set_identifier(reference, &identifier);
        self.doc.replace_child(parent, index, reference);
        *self.tally.references.entry(identifier).or_default() += 1;

        Ok(Flow::SkipSubtree)
    }

    /// Replace the link at `index`, its anchor marker at `anchor_index` and
    /// any blank text between them with one empty definition.
    fn definition(
        &mut self,
        parent: NodeId,
        anchor_index: usize,
        index: usize,
        identifier: String,
    ) -> Result<Flow> {
        let anchor = self.doc.children(parent)[anchor_index];
        let anchor_id = self.doc.semantics.id(anchor).unwrap_or_default().to_string();

        if self.tally.definitions.contains(&identifier) {
            return Err(Error::UnexpectedSiblingStructure {
                anchor: anchor_id,
                reason: "footnote is defined twice",
            });
        }
        debug!(target = %anchor_id, identifier = %identifier, "footnote definition");

        let definition = self.doc.alloc_node(Node::new(Role::FootnoteDefinition));
        self.doc.semantics.set_identifier(definition, &identifier);
        self.doc.semantics.set_id(definition, &anchor_id);
        self.doc.replace_child(parent, index, definition);
        for _ in anchor_index..index {
            self.doc.remove_child(parent, anchor_index);
        }
        self.tally.definitions.insert(identifier);

        Ok(Flow::ReprocessAt(anchor_index + 1))
    }
}

/// Label of a reference link: its text, without the brackets some sources
/// print around note numbers (`[1]`).
fn footnote_label(text: &str) -> &str {
    let text = text.trim();
    text.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .map_or(text, str::trim)
}
