//! Transform RawDom to the IR Document.

use super::arena::{RawData, RawDom, RawId};
use super::role_map::element_to_role;
use crate::ir::{Document, Node, NodeId, Role};

/// Context for the transform operation.
struct TransformContext<'a> {
    dom: &'a RawDom,
    doc: Document,
}

/// Build an IR document from the body of a parsed DOM.
pub fn transform(dom: &RawDom) -> Document {
    TransformContext {
        dom,
        doc: Document::new(),
    }
    .transform()
}

impl<'a> TransformContext<'a> {
    fn transform(mut self) -> Document {
        // Find the body element, or use document root
        let body = self.dom.find_by_tag("body").unwrap_or(self.dom.document());
        self.process_children(body, NodeId::ROOT, true);
        self.doc
    }

    fn process_children(&mut self, raw_parent: RawId, ir_parent: NodeId, in_block: bool) {
        let dom = self.dom;
        for &child in dom.children(raw_parent) {
            self.process_node(child, ir_parent, in_block);
        }
    }

    fn push(&mut self, ir_parent: NodeId, node: Node) -> NodeId {
        let id = self.doc.alloc_node(node);
        self.doc.append_child(ir_parent, id);
        id
    }

    fn push_anchor(&mut self, ir_parent: NodeId, anchor: &str) {
        let id = self.push(ir_parent, Node::new(Role::Anchor));
        self.doc.semantics.set_id(id, anchor);
    }

    fn process_node(&mut self, raw_id: RawId, ir_parent: NodeId, in_block: bool) {
        let dom = self.dom;
        let Some(node) = dom.get(raw_id) else {
            return;
        };

        match &node.data {
            RawData::Text(text) => {
                if text.trim().is_empty() {
                    // Inter-element whitespace between blocks carries no content;
                    // between inline elements it is a single space.
                    if (in_block && text.contains('\n')) || ir_parent == NodeId::ROOT {
                        return;
                    }
                    let id = self.doc.create_text(" ");
                    self.doc.append_child(ir_parent, id);
                    return;
                }
                let id = self.doc.create_text(text);
                self.doc.append_child(ir_parent, id);
            }

            RawData::Element { name, .. } => {
                let local = name.local.as_ref();
                if local == "a" || local == "span" {
                    self.process_anchor_like(raw_id, local, ir_parent, in_block);
                    return;
                }

                let Some(role) = element_to_role(&name.local) else {
                    return;
                };

                let ir_id = self.push(ir_parent, Node::new(role));
                if let Some(id) = dom.get_attr(raw_id, "id") {
                    self.doc.semantics.set_id(ir_id, id);
                }
                if role == Role::Image {
                    if let Some(src) = dom.get_attr(raw_id, "src") {
                        self.doc.semantics.set_src(ir_id, src);
                    }
                    if let Some(alt) = dom.get_attr(raw_id, "alt") {
                        self.doc.semantics.set_alt(ir_id, alt);
                    }
                }

                self.process_children(raw_id, ir_id, role.is_block());
            }

            RawData::Document | RawData::Other => {}
        }
    }

    /// `<a>` and `<span>` carry the anchor/link convention.
    ///
    /// - a contentless element with an id becomes an Anchor marker;
    /// - `<a href>` becomes a Link, preceded by an Anchor when it has an id;
    /// - an `<a>` with neither is transparent.
    fn process_anchor_like(
        &mut self,
        raw_id: RawId,
        local: &str,
        ir_parent: NodeId,
        in_block: bool,
    ) {
        let dom = self.dom;
        let is_a = local == "a";
        let href = if is_a { dom.get_attr(raw_id, "href") } else { None };
        let anchor = dom
            .get_attr(raw_id, "id")
            .or_else(|| if is_a { dom.get_attr(raw_id, "name") } else { None })
            .filter(|id| !id.trim().is_empty());

        if href.is_none()
            && let Some(anchor) = anchor
            && dom.is_contentless(raw_id)
        {
            self.push_anchor(ir_parent, anchor);
            return;
        }

        if !is_a {
            let ir_id = self.push(ir_parent, Node::new(Role::Inline));
            if let Some(anchor) = anchor {
                self.doc.semantics.set_id(ir_id, anchor);
            }
            self.process_children(raw_id, ir_id, false);
            return;
        }

        if let Some(anchor) = anchor {
            self.push_anchor(ir_parent, anchor);
        }

        match href {
            Some(href) => {
                let link = self.push(ir_parent, Node::new(Role::Link));
                self.doc.semantics.set_href(link, href);
                self.process_children(raw_id, link, false);
            }
            None => self.process_children(raw_id, ir_parent, in_block),
        }
    }
}
