//! Footnote resolution engine.
//!
//! Turns the links of a chapter/footnote-container pair into Markdown
//! footnote references and definitions, in place:
//!
//! - [`collect`]: validates where each document links to
//! - [`allocator`]: hands out collision-free footnote identifiers
//! - [`classify`]: decides reference vs. definition for every link
//! - [`assemble`]: fills definitions with their note text
//!
//! ## Ordering contract
//!
//! Whether a footnote-container link is a definition depends on which anchors
//! have been cited *so far*. [`Resolver::classify_chapter`] must therefore run
//! to completion before [`Resolver::classify_footnotes`]; the resolver refuses
//! the opposite order with [`Error::Precondition`].
//!
//! A footnote-container link that cites an anchor whose own marker+link pair
//! was already visited stays a plain reference: pairs are never reclassified.
//! Such references end up without a definition and are reported as dangling.

mod allocator;
mod assemble;
mod classify;
mod collect;

pub use allocator::{Allocator, Registry, SENTINEL_PREFIX};
pub use assemble::assemble;
pub use classify::Flow;
pub use collect::{ReferenceSummary, collect_references};

use tracing::{info, warn};

use crate::config::{Config, DocumentKind};
use crate::error::{Error, Result};
use crate::ir::Document;
use classify::{Classifier, Tally};

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Report {
    /// Footnote reference nodes emitted, across both documents.
    pub references: usize,
    /// Footnote definition nodes emitted.
    pub definitions: usize,
    /// Every identifier handed out, sorted.
    pub identifiers: Vec<String>,
    /// Identifiers referenced but never defined.
    pub dangling: Vec<String>,
}

/// Resolution context of one run.
///
/// Owns the identifier registry shared by both passes. Build a fresh one per
/// run; it is consumed by [`Resolver::verify`].
#[derive(Debug, Default)]
pub struct Resolver {
    config: Config,
    allocator: Allocator,
    tally: Tally,
    chapter_done: bool,
}

impl Resolver {
    /// Create a resolver for the document pair named by `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            ..Self::default()
        }
    }

    /// Identifier state so far.
    pub fn registry(&self) -> &Registry {
        self.allocator.registry()
    }

    /// First pass: every chapter link becomes a footnote reference.
    pub fn classify_chapter(&mut self, chapter: &mut Document) -> Result<()> {
        self.classify(chapter, DocumentKind::Chapter)?;
        self.chapter_done = true;
        info!(
            identifiers = self.registry().used_count(),
            "classified chapter"
        );
        Ok(())
    }

    /// Second pass: cited marker+link pairs become definitions, other links
    /// references. Fails unless [`classify_chapter`](Self::classify_chapter)
    /// has completed.
    pub fn classify_footnotes(&mut self, footnotes: &mut Document) -> Result<()> {
        if !self.chapter_done {
            return Err(Error::Precondition);
        }
        self.classify(footnotes, DocumentKind::Footnotes)?;
        info!(
            definitions = self.tally.definitions.len(),
            "classified footnote container"
        );
        Ok(())
    }

    fn classify(&mut self, doc: &mut Document, kind: DocumentKind) -> Result<()> {
        let own_file = self.config.file_name(kind).to_string();
        Classifier::new(doc, kind, &own_file, &mut self.allocator, &mut self.tally).run()
    }

    /// Check that every definition is referenced and summarise the run.
    pub fn verify(self) -> Result<Report> {
        if let Some(identifier) = self
            .tally
            .definitions
            .iter()
            .find(|id| !self.tally.references.contains_key(*id))
        {
            return Err(Error::UnresolvedAnchor {
                identifier: identifier.clone(),
            });
        }

        let dangling: Vec<String> = self
            .tally
            .references
            .keys()
            .filter(|id| !self.tally.definitions.contains(*id))
            .cloned()
            .collect();
        for identifier in &dangling {
            warn!(identifier = %identifier, "footnote reference has no definition");
        }

        Ok(Report {
            references: self.tally.references.values().sum(),
            definitions: self.tally.definitions.len(),
            identifiers: self.allocator.registry().identifiers(),
            dangling,
        })
    }
}

/// Resolve all footnotes of a document pair, in place.
///
/// Validates both documents, classifies the chapter then the footnote
/// container, assembles the definitions and verifies the result. On error
/// the documents may be partially rewritten and must be discarded.
pub fn resolve(chapter: &mut Document, footnotes: &mut Document, config: &Config) -> Result<Report> {
    for (doc, kind) in [
        (&*chapter, DocumentKind::Chapter),
        (&*footnotes, DocumentKind::Footnotes),
    ] {
        let summary = collect_references(doc, kind, config)?;
        info!(
            document = kind.name(),
            links = summary.links,
            files = ?summary.files,
            "collected references"
        );
    }

    let mut resolver = Resolver::new(config);
    resolver.classify_chapter(chapter)?;
    resolver.classify_footnotes(footnotes)?;
    assemble(footnotes);
    resolver.verify()
}
