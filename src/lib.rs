//! # footmark
//!
//! Footnote resolution for reflowed ebook chapters.
//!
//! Conversion tools often split a chapter into its body and a separate
//! footnote container, cross-linked by anchors. footmark reunites the pair as
//! Markdown with proper footnotes: links in the chapter become `[^id]`
//! references, and the marker+link pairs of the container become
//! `[^id]: text` definitions.
//!
//! ## Quick Start
//!
//! ```no_run
//! use footmark::{Config, convert_files};
//!
//! // Reads chapter.html and footnotes.html
//! let out = convert_files("book/ch01", &Config::default()).unwrap();
//! std::fs::write("book/ch01/chapter.md", out.combined()).unwrap();
//! ```
//!
//! ## Working with Trees
//!
//! The pipeline steps are public, for callers that build or inspect the IR
//! themselves:
//!
//! ```
//! use footmark::dom::load_html;
//! use footmark::markdown::render;
//! use footmark::{Config, Resolver};
//!
//! let mut chapter = load_html(r#"<p>See<a href="footnotes.html#n">*</a></p>"#);
//! let mut notes = load_html(r#"<p><a id="n"></a><a href="chapter.html">*</a> Aside.</p>"#);
//!
//! let mut resolver = Resolver::new(&Config::default());
//! resolver.classify_chapter(&mut chapter).unwrap();
//! resolver.classify_footnotes(&mut notes).unwrap();
//! footmark::resolve::assemble(&mut notes);
//! let report = resolver.verify().unwrap();
//!
//! assert_eq!(report.identifiers, vec!["ast1"]);
//! assert_eq!(render(&chapter), "See[^ast1]\n");
//! assert_eq!(render(&notes), "[^ast1]: Aside.\n");
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod ir;
pub mod markdown;
pub mod resolve;

mod convert;

pub use config::{Config, DocumentKind, OutputMode};
pub use convert::{Conversion, convert, convert_files};
pub use error::{Error, Result};
pub use resolve::{Report, Resolver};
