//! Document loader: raw markup to IR.
//!
//! Reflow tools produce tag soup, so parsing goes through html5ever's
//! browser-grade tree builder into an arena DOM ([`arena`]), which is then
//! lowered into the IR ([`transform`]). Role mapping lives in [`role_map`].
//!
//! The loader also normalises the anchor/link convention: an `<a>` carrying
//! both `id` and `href` is split into an Anchor marker followed by a Link,
//! so the resolver only ever sees the marker-then-node shape.

mod arena;
mod role_map;
mod transform;
mod tree_sink;

use std::borrow::Cow;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use crate::ir::Document;
use tree_sink::RawSink;

/// Parse HTML into an IR document.
///
/// # Example
///
/// ```
/// use footmark::dom::load_html;
/// use footmark::ir::{NodeId, Role};
///
/// let doc = load_html(r#"<p>Text<a href="notes.html#fn1">1</a></p>"#);
/// let para = doc.children(NodeId::ROOT)[0];
/// assert_eq!(doc.role(para), Some(Role::Paragraph));
/// ```
pub fn load_html(html: &str) -> Document {
    let dom = parse_document(RawSink::new(), ParseOpts::default())
        .from_utf8()
        .one(html.as_bytes())
        .into_dom();
    transform::transform(&dom)
}

/// Decode raw file bytes to a string.
///
/// UTF-8 (a BOM is honoured and stripped) with a Windows-1252 fallback,
/// the usual encoding of older ebook sources.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}
