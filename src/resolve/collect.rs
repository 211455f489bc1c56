//! Reference collection.
//!
//! Checks that a document only links where the resolver expects it to:
//! every link names an anchor, every target file is one of the run's two
//! documents, and a document references no more files than its role allows.
//! Nothing is mutated.

use std::collections::BTreeSet;

use crate::config::{Config, DocumentKind};
use crate::error::{Error, Result};
use crate::ir::{Document, Link, LinkTarget, NodeId, Role};

/// What a document links to.
#[derive(Debug, Clone)]
pub struct ReferenceSummary {
    /// Document the summary describes.
    pub kind: DocumentKind,
    /// Number of link nodes.
    pub links: usize,
    /// Distinct target files, including the document itself when it
    /// links to its own anchors.
    pub files: BTreeSet<String>,
}

/// Upper bound on distinct target files: the chapter may only point at its
/// footnote container (or itself), the container at itself and the chapter.
fn file_limit(kind: DocumentKind) -> usize {
    match kind {
        DocumentKind::Chapter => 1,
        DocumentKind::Footnotes => 2,
    }
}

/// Parse the href of a link node into its target.
///
/// An empty file part is resolved to `own_file`.
pub(crate) fn link_target(doc: &Document, link: NodeId, own_file: &str) -> Result<LinkTarget> {
    let href = doc.semantics.href(link).unwrap_or_default();
    match Link::parse(href) {
        Link::External(_) => Err(Error::ExternalReference {
            href: href.to_string(),
        }),
        Link::Relative(target) if target.anchor.is_empty() => Err(Error::MalformedLink {
            href: href.to_string(),
            reason: "missing anchor id",
        }),
        Link::Relative(mut target) => {
            if target.file.is_empty() {
                target.file = own_file.to_string();
            }
            Ok(target)
        }
    }
}

/// Validate every link of `doc` and summarise its targets.
pub fn collect_references(
    doc: &Document,
    kind: DocumentKind,
    config: &Config,
) -> Result<ReferenceSummary> {
    let own_file = config.file_name(kind);
    let known = [
        config.file_name(DocumentKind::Chapter),
        config.file_name(DocumentKind::Footnotes),
    ];

    let mut summary = ReferenceSummary {
        kind,
        links: 0,
        files: BTreeSet::new(),
    };

    for id in doc.iter_dfs() {
        if doc.role(id) != Some(Role::Link) {
            continue;
        }
        summary.links += 1;

        let target = link_target(doc, id, own_file)?;
        if !known.contains(&target.file.as_str()) {
            return Err(Error::ExternalReference {
                href: doc.semantics.href(id).unwrap_or_default().to_string(),
            });
        }

        summary.files.insert(target.file);
        let limit = file_limit(kind);
        if summary.files.len() > limit {
            return Err(Error::TooManyReferencedFiles {
                document: kind.name(),
                count: summary.files.len(),
                limit,
                files: summary
                    .files
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Node;

    fn doc_with_links(hrefs: &[&str]) -> Document {
        let mut doc = Document::new();
        let p = doc.alloc_node(Node::new(Role::Paragraph));
        doc.append_child(NodeId::ROOT, p);
        for (i, href) in hrefs.iter().enumerate() {
            let link = doc.alloc_node(Node::new(Role::Link));
            doc.semantics.set_href(link, href);
            doc.append_child(p, link);
            let label = doc.create_text(&(i + 1).to_string());
            doc.append_child(link, label);
        }
        doc
    }

    #[test]
    fn test_chapter_single_file() {
        let doc = doc_with_links(&["footnotes.html#fn1", "footnotes.html#fn2"]);
        let summary =
            collect_references(&doc, DocumentKind::Chapter, &Config::default()).unwrap();

        assert_eq!(summary.links, 2);
        assert_eq!(summary.files.len(), 1);
        assert!(summary.files.contains("footnotes.html"));
    }

    #[test]
    fn test_footnotes_two_files() {
        let doc = doc_with_links(&["chapter.html#r1", "#fn2", "footnotes.html#fn3"]);
        let summary =
            collect_references(&doc, DocumentKind::Footnotes, &Config::default()).unwrap();

        assert_eq!(summary.files.len(), 2);
    }

    #[test]
    fn test_chapter_too_many_files() {
        let doc = doc_with_links(&["footnotes.html#fn1", "#sec2"]);
        let err = collect_references(&doc, DocumentKind::Chapter, &Config::default())
            .unwrap_err();

        assert!(
            matches!(err, Error::TooManyReferencedFiles { count: 2, limit: 1, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_unknown_file() {
        let doc = doc_with_links(&["appendix.html#a1"]);
        let err = collect_references(&doc, DocumentKind::Chapter, &Config::default())
            .unwrap_err();
        assert!(matches!(err, Error::ExternalReference { ref href } if href == "appendix.html#a1"));
    }

    #[test]
    fn test_external_url() {
        let doc = doc_with_links(&["https://example.com/footnotes.html#fn1"]);
        let err = collect_references(&doc, DocumentKind::Footnotes, &Config::default())
            .unwrap_err();
        assert!(matches!(err, Error::ExternalReference { .. }));
    }

    #[test]
    fn test_missing_anchor() {
        for href in ["footnotes.html", "footnotes.html#", ""] {
            let doc = doc_with_links(&[href]);
            let err = collect_references(&doc, DocumentKind::Chapter, &Config::default())
                .unwrap_err();
            assert!(
                matches!(err, Error::MalformedLink { .. }),
                "{href:?} gave {err:?}"
            );
        }
    }
}
