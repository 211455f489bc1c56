//! Footnote container assembly.
//!
//! Classification leaves every definition empty, followed by the text that
//! used to trail its number (`<a>1</a>. The note text`). Assembly moves that
//! trailing inline content into the definition and tidies it up.
//!
//! Only the content of the definition's own block is moved: later paragraphs
//! of a multi-paragraph note stay sibling blocks.

use crate::ir::{Document, Node, NodeId, Role};

/// Separator punctuation left over from the source numbering (`1.`, `1:`, `1)`).
const SEPARATORS: [char; 3] = ['.', ':', ')'];

/// Fill every footnote definition of `doc` from its trailing siblings.
pub fn assemble(doc: &mut Document) {
    let definitions: Vec<NodeId> = doc
        .iter_dfs()
        .filter(|&id| doc.role(id) == Some(Role::FootnoteDefinition))
        .collect();

    for definition in definitions {
        adopt_trailing_content(doc, definition);
        strip_separator(doc, definition);
        normalize_line_breaks(doc, definition);
    }
}

/// Move the inline siblings after `definition` into it. When the definition
/// sits inside an inline wrapper (`<sup>`), adoption carries on after the
/// wrapper, up to the enclosing block.
fn adopt_trailing_content(doc: &mut Document, definition: NodeId) {
    let mut current = definition;
    while let (Some(parent), Some(index)) = (doc.parent(current), doc.index_in_parent(current)) {
        while let Some(&next) = doc.children(parent).get(index + 1) {
            if ends_definition(doc, next) {
                return;
            }
            let Some(moved) = doc.remove_child(parent, index + 1) else {
                return;
            };
            doc.append_child(definition, moved);
        }

        if doc.role(parent).is_none_or(Role::is_block) {
            return;
        }
        current = parent;
    }
}

/// A block, or anything holding the next definition, ends the note.
fn ends_definition(doc: &Document, id: NodeId) -> bool {
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        match doc.role(current) {
            None | Some(Role::FootnoteDefinition) => return true,
            Some(role) if role.is_block() => return true,
            Some(_) => stack.extend(doc.children(current).iter().copied()),
        }
    }
    false
}

/// Text nodes under `id`, in document order.
fn text_nodes(doc: &Document, id: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
        if doc.role(current) == Some(Role::Text) {
            out.push(current);
        }
        stack.extend(doc.children(current).iter().rev().copied());
    }
    out
}

/// Drop leading whitespace, one separator, and the whitespace after it.
/// The prefix may be spread over several text nodes.
fn strip_separator(doc: &mut Document, definition: NodeId) {
    let mut seen_separator = false;
    for id in text_nodes(doc, definition) {
        let original = doc.node_text(id).to_string();
        let mut rest = original.trim_start();
        if !seen_separator && let Some(after) = rest.strip_prefix(SEPARATORS) {
            rest = after.trim_start();
            seen_separator = true;
        }

        if rest.len() != original.len() {
            doc.set_node_text(id, rest);
        }
        if !rest.is_empty() {
            break;
        }
    }
}

fn normalize_line_breaks(doc: &mut Document, definition: NodeId) {
    let descendants: Vec<NodeId> = {
        let mut out = Vec::new();
        let mut stack = vec![definition];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(doc.children(current).iter().copied());
        }
        out
    };

    for id in descendants {
        match doc.role(id) {
            Some(Role::Text) => {
                let text = doc.node_text(id);
                if text.contains(['\n', '\r']) {
                    let joined = collapse_line_breaks(text);
                    doc.set_node_text(id, &joined);
                }
            }
            Some(Role::Break) => {
                let range = doc.append_text(" ");
                if let Some(node) = doc.node_mut(id) {
                    *node = Node {
                        parent: node.parent,
                        ..Node::text(range)
                    };
                }
            }
            _ => {}
        }
    }
}

/// Replace every whitespace run containing a line break with one space.
fn collapse_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();
    for c in text.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.contains(['\n', '\r']) {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition_paragraph(parts: &[&str]) -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let para = doc.alloc_node(Node::new(Role::Paragraph));
        doc.append_child(NodeId::ROOT, para);
        let definition = doc.alloc_node(Node::new(Role::FootnoteDefinition));
        doc.semantics.set_identifier(definition, "1");
        doc.append_child(para, definition);
        for part in parts {
            let text = doc.create_text(part);
            doc.append_child(para, text);
        }
        (doc, para, definition)
    }

    #[test]
    fn test_trailing_text_is_adopted() {
        let (mut doc, para, definition) = definition_paragraph(&[". The note", " text."]);

        assemble(&mut doc);

        assert_eq!(doc.children(para), &[definition]);
        assert_eq!(doc.collect_text(definition), "The note text.");
    }

    #[test]
    fn test_separator_split_across_nodes() {
        let (mut doc, _, definition) = definition_paragraph(&[" ", ")", "  Body"]);

        assemble(&mut doc);

        assert_eq!(doc.collect_text(definition), "Body");
    }

    #[test]
    fn test_only_one_separator_stripped() {
        let (mut doc, _, definition) = definition_paragraph(&[". ...and so on"]);

        assemble(&mut doc);

        assert_eq!(doc.collect_text(definition), "...and so on");
    }

    #[test]
    fn test_line_breaks_normalized() {
        let (mut doc, _, definition) = definition_paragraph(&[". First line\n   second  line"]);
        let br = doc.alloc_node(Node::new(Role::Break));
        let para = doc.parent(definition).unwrap();
        doc.append_child(para, br);
        let tail = doc.create_text("third");
        doc.append_child(para, tail);

        assemble(&mut doc);

        let texts: Vec<&str> = text_nodes(&doc, definition)
            .into_iter()
            .map(|id| doc.node_text(id))
            .collect();
        assert_eq!(texts, vec!["First line second  line", " ", "third"]);
    }

    #[test]
    fn test_stops_at_next_definition_and_blocks() {
        let mut doc = Document::new();
        let container = doc.alloc_node(Node::new(Role::Container));
        doc.append_child(NodeId::ROOT, container);

        let first = doc.alloc_node(Node::new(Role::FootnoteDefinition));
        doc.append_child(container, first);
        let t1 = doc.create_text(". One");
        doc.append_child(container, t1);
        let second = doc.alloc_node(Node::new(Role::FootnoteDefinition));
        doc.append_child(container, second);
        let t2 = doc.create_text(". Two");
        doc.append_child(container, t2);
        let para = doc.alloc_node(Node::new(Role::Paragraph));
        doc.append_child(container, para);

        assemble(&mut doc);

        assert_eq!(doc.children(container), &[first, second, para]);
        assert_eq!(doc.collect_text(first), "One");
        assert_eq!(doc.collect_text(second), "Two");
    }

    #[test]
    fn test_definition_inside_inline_wrapper() {
        let mut doc = Document::new();
        let para = doc.alloc_node(Node::new(Role::Paragraph));
        doc.append_child(NodeId::ROOT, para);
        let sup = doc.alloc_node(Node::new(Role::Inline));
        doc.append_child(para, sup);
        let definition = doc.alloc_node(Node::new(Role::FootnoteDefinition));
        doc.append_child(sup, definition);
        let body = doc.create_text(". Note text.");
        doc.append_child(para, body);

        assemble(&mut doc);

        assert_eq!(doc.children(para), &[sup]);
        assert_eq!(doc.collect_text(definition), "Note text.");
    }

    #[test]
    fn test_wrapped_definitions_stay_apart() {
        let mut doc = Document::new();
        let container = doc.alloc_node(Node::new(Role::Container));
        doc.append_child(NodeId::ROOT, container);

        let mut definitions = Vec::new();
        for body in [". One", ". Two"] {
            let sup = doc.alloc_node(Node::new(Role::Inline));
            doc.append_child(container, sup);
            let definition = doc.alloc_node(Node::new(Role::FootnoteDefinition));
            doc.append_child(sup, definition);
            let text = doc.create_text(body);
            doc.append_child(container, text);
            definitions.push(definition);
        }

        assemble(&mut doc);

        assert_eq!(doc.collect_text(definitions[0]), "One");
        assert_eq!(doc.collect_text(definitions[1]), "Two");
    }
}
