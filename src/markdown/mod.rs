//! Pure markdown generation from IR.
//!
//! - [`escape_markdown`]: string escaping for text content
//! - [`render`]: IR → Markdown, including footnote references (`[^id]`)
//!   and definitions (`[^id]: text`)
//!
//! Neither function performs I/O; [`crate::convert_files`] does.

mod escape;
mod render;

pub use escape::escape_markdown;
pub use render::{RenderContext, render};
