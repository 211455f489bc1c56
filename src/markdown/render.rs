//! Core IR → Markdown rendering.
//!
//! Pure rendering logic: no I/O is performed here.

use crate::ir::{Document, NodeId, Role};

use super::escape::escape_markdown;

/// Tracks list context for numbering.
#[derive(Debug, Clone)]
struct ListContext {
    /// Whether this is an ordered list.
    is_ordered: bool,
    /// Current item counter.
    counter: usize,
}

/// Context for rendering (pure string accumulation, no I/O).
pub struct RenderContext<'a> {
    doc: &'a Document,
    // Accumulated output
    output: String,
    // Formatting state
    line_prefix: String,
    list_stack: Vec<ListContext>,
    at_line_start: bool,
    has_line_content: bool,
    pending_newline: bool,
    last_block_role: Option<Role>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context for a document.
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            output: String::new(),
            line_prefix: String::new(),
            list_stack: Vec::new(),
            at_line_start: true,
            has_line_content: false,
            pending_newline: false,
            last_block_role: None,
        }
    }

    /// Render the document, consuming the context.
    pub fn render(mut self) -> String {
        self.walk_children(NodeId::ROOT);

        // Ensure final newline
        if !self.at_line_start {
            self.output.push('\n');
        }
        self.output
    }

    /// Ensure we're ready to write content (write prefix if at line start).
    fn ensure_line_started(&mut self) {
        if self.at_line_start {
            self.output.push_str(&self.line_prefix);
            self.at_line_start = false;
        }
    }

    /// Write inline markup that counts as line content.
    fn write_inline(&mut self, s: &str) {
        self.ensure_line_started();
        self.output.push_str(s);
        self.has_line_content = true;
    }

    /// Write a newline.
    fn write_newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
        self.has_line_content = false;
    }

    /// Write a hard line break (backslash in markdown).
    fn write_hard_break(&mut self) {
        self.output.push('\\');
        self.write_newline();
    }

    /// Start a new block element.
    fn start_block(&mut self) {
        if self.pending_newline {
            if !self.at_line_start {
                self.write_newline();
            }
            self.write_newline();
            self.pending_newline = false;
        }
        self.ensure_line_started();
    }

    /// End a block element.
    fn end_block(&mut self, role: Role) {
        self.pending_newline = true;
        self.last_block_role = Some(role);
    }

    /// Check if we need a separator between adjacent lists.
    fn needs_list_separator(&self, current_role: Role) -> bool {
        matches!(
            (self.last_block_role, current_role),
            (Some(Role::OrderedList), Role::OrderedList)
                | (Some(Role::UnorderedList), Role::UnorderedList)
        )
    }

    /// Write a list separator comment (for adjacent lists).
    fn write_list_separator(&mut self) {
        if !self.at_line_start {
            self.write_newline();
        }
        self.write_newline();
        self.ensure_line_started();
        self.output.push_str("<!-- -->\n");
        self.at_line_start = true;
    }

    /// Whether a container holds inline content directly (`<div>text</div>`).
    fn holds_inline_content(&self, id: NodeId) -> bool {
        self.doc.children(id).iter().any(|&child| {
            self.doc
                .role(child)
                .is_some_and(|role| !role.is_block() && role != Role::Anchor)
        })
    }

    fn walk_node(&mut self, id: NodeId) {
        let doc = self.doc;
        let Some(node) = doc.node(id) else {
            return;
        };
        let role = node.role;

        match role {
            Role::Text => {
                if !node.text.is_empty() {
                    let text = doc.text(node.text);
                    self.write_text(text);
                }
            }

            Role::Paragraph => {
                self.start_block();
                self.walk_children(id);
                self.end_block(role);
            }

            Role::Heading(level) => {
                self.start_block();
                for _ in 0..level {
                    self.output.push('#');
                }
                self.output.push(' ');
                self.walk_children(id);
                self.end_block(role);
            }

            Role::Container => {
                if self.holds_inline_content(id) {
                    self.start_block();
                    self.walk_children(id);
                    self.end_block(role);
                } else {
                    self.walk_children(id);
                }
            }

            Role::OrderedList | Role::UnorderedList => {
                if self.needs_list_separator(role) {
                    self.write_list_separator();
                }
                self.start_block();
                self.list_stack.push(ListContext {
                    is_ordered: role == Role::OrderedList,
                    counter: 0,
                });
                self.walk_children(id);
                self.list_stack.pop();
                self.end_block(role);
            }

            Role::ListItem => {
                if !self.at_line_start && self.has_line_content {
                    self.write_newline();
                }
                self.ensure_line_started();

                // Get bullet/number from parent list
                let bullet = match self.list_stack.last_mut() {
                    Some(list_ctx) => {
                        list_ctx.counter += 1;
                        if list_ctx.is_ordered {
                            format!("{}. ", list_ctx.counter)
                        } else {
                            "- ".to_string()
                        }
                    }
                    None => String::new(),
                };
                self.output.push_str(&bullet);

                // Set continuation indent for subsequent lines
                let old_prefix = self.line_prefix.clone();
                self.line_prefix.push_str(&" ".repeat(bullet.len()));

                self.walk_children(id);

                self.line_prefix = old_prefix;
                self.pending_newline = false;
            }

            Role::BlockQuote => {
                if self.pending_newline {
                    if !self.at_line_start {
                        self.write_newline();
                    }
                    self.write_newline();
                    self.pending_newline = false;
                }

                let prefix = "> ";
                if !self.at_line_start {
                    self.output.push_str(prefix);
                }

                let old_prefix = self.line_prefix.clone();
                self.line_prefix.push_str(prefix);

                self.walk_children(id);

                self.line_prefix = old_prefix;
                self.end_block(role);
            }

            Role::Link => {
                match doc.semantics.href(id).filter(|h| !h.is_empty()) {
                    Some(href) => {
                        self.write_inline("[");
                        self.walk_children(id);
                        self.write_inline(&format!("]({})", href));
                    }
                    None => self.walk_children(id),
                }
            }

            Role::Image => {
                self.start_block();
                let alt = doc.semantics.alt(id).unwrap_or("image");
                let src = doc.semantics.src(id).unwrap_or("");
                self.output
                    .push_str(&format!("![{}]({})", escape_markdown(alt), src));
                self.end_block(role);
            }

            Role::Emphasis | Role::Strong => {
                let marker = if role == Role::Strong { "**" } else { "*" };
                if self.doc.collect_text(id).trim().is_empty() {
                    self.walk_children(id);
                } else {
                    self.write_inline(marker);
                    self.walk_children(id);
                    self.write_inline(marker);
                }
            }

            Role::Break => self.write_hard_break(),

            Role::Rule => {
                self.start_block();
                self.output.push_str("---");
                self.end_block(role);
            }

            Role::FootnoteReference => {
                let identifier = doc.semantics.identifier(id).unwrap_or_default();
                self.write_inline(&format!("[^{}]", identifier));
            }

            Role::FootnoteDefinition => {
                // A definition always opens its own block
                if self.has_line_content {
                    self.pending_newline = true;
                }
                self.start_block();
                let identifier = doc.semantics.identifier(id).unwrap_or_default();
                self.write_inline(&format!("[^{}]: ", identifier));
                self.walk_children(id);
                self.end_block(role);
            }

            Role::Anchor => {}

            Role::Inline | Role::Root => self.walk_children(id),
        }
    }

    fn walk_children(&mut self, id: NodeId) {
        let doc = self.doc;
        for &child in doc.children(id) {
            self.walk_node(child);
        }
    }

    fn write_text(&mut self, text: &str) {
        self.ensure_line_started();

        // Normalize internal whitespace while preserving leading/trailing
        let has_leading = text.starts_with(char::is_whitespace);
        let has_trailing = text.ends_with(char::is_whitespace);

        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            if !text.is_empty() && self.has_line_content && !self.output.ends_with(' ') {
                self.output.push(' ');
            }
            return;
        }

        if has_leading && self.has_line_content && !self.output.ends_with(' ') {
            self.output.push(' ');
        }

        let joined = words.join(" ");
        self.output.push_str(&escape_markdown(&joined));
        self.has_line_content = true;

        if has_trailing {
            self.output.push(' ');
        }
    }
}

/// Render a document to Markdown.
pub fn render(doc: &Document) -> String {
    RenderContext::new(doc).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Node;

    fn paragraph(doc: &mut Document, parent: NodeId) -> NodeId {
        let p = doc.alloc_node(Node::new(Role::Paragraph));
        doc.append_child(parent, p);
        p
    }

    fn text(doc: &mut Document, parent: NodeId, s: &str) {
        let t = doc.create_text(s);
        doc.append_child(parent, t);
    }

    fn footnote(doc: &mut Document, parent: NodeId, role: Role, identifier: &str) -> NodeId {
        let node = doc.alloc_node(Node::new(role));
        doc.semantics.set_identifier(node, identifier);
        doc.append_child(parent, node);
        node
    }

    #[test]
    fn test_simple_paragraphs() {
        let mut doc = Document::new();
        let p1 = paragraph(&mut doc, NodeId::ROOT);
        text(&mut doc, p1, "Hello, World!");
        let p2 = paragraph(&mut doc, NodeId::ROOT);
        text(&mut doc, p2, "Second.");

        assert_eq!(render(&doc), "Hello, World!\n\nSecond.\n");
    }

    #[test]
    fn test_heading() {
        let mut doc = Document::new();
        let h2 = doc.alloc_node(Node::new(Role::Heading(2)));
        doc.append_child(NodeId::ROOT, h2);
        text(&mut doc, h2, "Chapter One");

        assert_eq!(render(&doc), "## Chapter One\n");
    }

    #[test]
    fn test_footnote_reference() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, NodeId::ROOT);
        text(&mut doc, p, "Main text");
        footnote(&mut doc, p, Role::FootnoteReference, "1");
        text(&mut doc, p, " continues.");

        assert_eq!(render(&doc), "Main text[^1] continues.\n");
    }

    #[test]
    fn test_footnote_definitions() {
        let mut doc = Document::new();
        for (id, body) in [("1", "First note."), ("ast1", "Starred note.")] {
            let p = paragraph(&mut doc, NodeId::ROOT);
            let def = footnote(&mut doc, p, Role::FootnoteDefinition, id);
            text(&mut doc, def, body);
        }

        assert_eq!(
            render(&doc),
            "[^1]: First note.\n\n[^ast1]: Starred note.\n"
        );
    }

    #[test]
    fn test_definition_after_inline_content_opens_block() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, NodeId::ROOT);
        text(&mut doc, p, "Notes");
        let def = footnote(&mut doc, p, Role::FootnoteDefinition, "2");
        text(&mut doc, def, "Body.");

        assert_eq!(render(&doc), "Notes\n\n[^2]: Body.\n");
    }

    #[test]
    fn test_lists() {
        let mut doc = Document::new();
        let ol = doc.alloc_node(Node::new(Role::OrderedList));
        doc.append_child(NodeId::ROOT, ol);
        for i in 1..=2 {
            let li = doc.alloc_node(Node::new(Role::ListItem));
            doc.append_child(ol, li);
            text(&mut doc, li, &format!("Item {}", i));
        }

        let result = render(&doc);
        assert!(result.contains("1. Item 1"));
        assert!(result.contains("2. Item 2"));
    }

    #[test]
    fn test_emphasis_and_escaping() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, NodeId::ROOT);
        let em = doc.alloc_node(Node::new(Role::Emphasis));
        doc.append_child(p, em);
        text(&mut doc, em, "Ibid");
        text(&mut doc, p, ", p. *12*");

        assert_eq!(render(&doc), "*Ibid*, p. \\*12\\*\n");
    }

    #[test]
    fn test_anchor_is_silent() {
        let mut doc = Document::new();
        let p = paragraph(&mut doc, NodeId::ROOT);
        let anchor = doc.alloc_node(Node::new(Role::Anchor));
        doc.semantics.set_id(anchor, "x");
        doc.append_child(p, anchor);
        text(&mut doc, p, "Text");

        assert_eq!(render(&doc), "Text\n");
    }

    #[test]
    fn test_div_with_text_is_a_block() {
        let mut doc = Document::new();
        for s in ["One", "Two"] {
            let div = doc.alloc_node(Node::new(Role::Container));
            doc.append_child(NodeId::ROOT, div);
            text(&mut doc, div, s);
        }

        assert_eq!(render(&doc), "One\n\nTwo\n");
    }
}
