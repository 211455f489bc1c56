//! IR node types and roles.

/// Unique identifier for a node within a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

/// Semantic role of a node (independent of source element).
///
/// Roles map to the Markdown constructs the emitter knows how to write.
/// Attributes (href, id, footnote identifier) live in the
/// [`SemanticMap`](super::SemanticMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Leaf text content node.
    /// References a range in the document's text buffer.
    #[default]
    Text,
    /// Paragraph - a block-level text container (`<p>`).
    Paragraph,
    /// Headings with level 1-6.
    Heading(u8),
    /// Generic structural container (div, section, body, ...).
    Container,
    /// Generic inline container (`<span>`, `<sup>`, ...).
    Inline,
    /// Emphasis (`<em>`, `<i>`).
    Emphasis,
    /// Strong emphasis (`<strong>`, `<b>`).
    Strong,
    /// Hyperlink. href in SemanticMap.
    Link,
    /// Contentless anchor marker (`<a id="..."></a>`). id in SemanticMap.
    Anchor,
    /// Raster image. src/alt in SemanticMap.
    Image,
    /// Ordered list (`<ol>`).
    OrderedList,
    /// Unordered list (`<ul>`).
    UnorderedList,
    /// Individual list items.
    ListItem,
    /// Block quotes.
    BlockQuote,
    /// Semantic line break (`<br>`).
    Break,
    /// Horizontal rule (`<hr>`).
    Rule,
    /// Root document node.
    Root,
    /// Footnote citation site, rendered `[^id]`.
    FootnoteReference,
    /// Footnote body, rendered `[^id]: content`.
    FootnoteDefinition,
}

impl Role {
    /// Roles whose content is laid out as a Markdown block.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Role::Paragraph
                | Role::Heading(_)
                | Role::Container
                | Role::Image
                | Role::OrderedList
                | Role::UnorderedList
                | Role::ListItem
                | Role::BlockQuote
                | Role::Rule
                | Role::Root
        )
    }
}

/// Range into the document text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    /// Byte offset into Document.text.
    pub start: u32,
    /// Length in bytes.
    pub len: u32,
}

impl TextRange {
    /// Create a new text range.
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the end offset.
    pub fn end(&self) -> u32 {
        self.start + self.len
    }
}

/// A node in the IR tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Semantic role.
    pub role: Role,
    /// Parent node (None for the root and for detached nodes).
    pub parent: Option<NodeId>,
    /// Ordered children.
    pub children: Vec<NodeId>,
    /// Text content range (only for Text nodes).
    pub text: TextRange,
}

impl Node {
    /// Create a new node with default values.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            parent: None,
            children: Vec::new(),
            text: TextRange::default(),
        }
    }

    /// Create a text node with the given range.
    pub fn text(range: TextRange) -> Self {
        Self {
            role: Role::Text,
            parent: None,
            children: Vec::new(),
            text: range,
        }
    }
}
