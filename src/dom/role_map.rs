//! Maps HTML elements to semantic roles.

use html5ever::LocalName;

use crate::ir::Role;

/// Map an HTML element name to its semantic role.
///
/// Returns `None` for elements whose content never reaches the output.
pub fn element_to_role(local_name: &LocalName) -> Option<Role> {
    let role = match local_name.as_ref() {
        // Never rendered
        "head" | "script" | "style" | "title" | "meta" | "link" | "template" | "noscript" => {
            return None;
        }

        // Paragraphs - block-level text containers
        "p" => Role::Paragraph,

        // Headings with level
        "h1" => Role::Heading(1),
        "h2" => Role::Heading(2),
        "h3" => Role::Heading(3),
        "h4" => Role::Heading(4),
        "h5" => Role::Heading(5),
        "h6" => Role::Heading(6),

        // Line break and thematic break (leaf nodes)
        "br" => Role::Break,
        "hr" => Role::Rule,

        "em" | "i" | "cite" | "var" | "dfn" => Role::Emphasis,
        "strong" | "b" => Role::Strong,

        // Other inline containers, including the sup/sub wrappers
        // reflow tools put around footnote numbers
        "span" | "sup" | "sub" | "small" | "big" | "u" | "ins" | "s" | "strike" | "del"
        | "mark" | "abbr" | "time" | "q" | "code" | "kbd" | "samp" | "tt" | "font" | "label" => {
            Role::Inline
        }

        "a" => Role::Link,
        "img" => Role::Image,

        // Lists
        "ul" => Role::UnorderedList,
        "ol" => Role::OrderedList,
        "li" => Role::ListItem,

        "blockquote" => Role::BlockQuote,

        // Default to container for div/section/body and unknown elements
        _ => Role::Container,
    };
    Some(role)
}
