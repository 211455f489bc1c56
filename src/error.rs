//! Error types for footnote resolution.
//!
//! Every variant except [`Error::Io`] means the two input documents do not
//! follow the anchor/link pairing convention the resolver relies on. None of
//! them is recoverable: the run stops and no Markdown is produced.

use thiserror::Error;

/// Errors that can occur while resolving and rendering footnotes.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("link `{href}` points outside the chapter/footnote pair")]
    ExternalReference { href: String },

    #[error("malformed link `{href}`: {reason}")]
    MalformedLink { href: String, reason: &'static str },

    #[error("{document} references {count} files ({files}), at most {limit} allowed")]
    TooManyReferencedFiles {
        document: &'static str,
        count: usize,
        limit: usize,
        files: String,
    },

    #[error("numeric footnote label `{label}` is used by more than one footnote")]
    ConflictingNumericIdentifier { label: String },

    #[error("unexpected sibling structure around anchor `{anchor}`: {reason}")]
    UnexpectedSiblingStructure { anchor: String, reason: &'static str },

    #[error("footnote definition `[^{identifier}]` is never referenced")]
    UnresolvedAnchor { identifier: String },

    #[error("footnote container classified before the chapter")]
    Precondition,
}

pub type Result<T> = std::result::Result<T, Error>;
