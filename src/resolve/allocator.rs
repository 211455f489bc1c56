//! Footnote identifier allocation.
//!
//! Markdown footnote labels share one namespace per output document, while
//! the source pair numbers its notes independently per file (and sometimes
//! marks them `*`). The allocator hands out collision-free labels while
//! keeping the author's label whenever it is still free.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{Error, Result};

/// Label that cannot be written as a Markdown footnote label.
const STAR: &str = "*";

/// Prefix of the labels substituted for [`STAR`]: `ast1`, `ast2`, ...
pub const SENTINEL_PREFIX: &str = "ast";

/// Identifier state of one run.
///
/// Read by the classifier; only [`Allocator`] mutates it.
#[derive(Debug, Default)]
pub struct Registry {
    used: HashSet<String>,
    target_to_identifier: HashMap<String, String>,
}

impl Registry {
    /// Identifier already assigned to an anchor target.
    pub fn lookup(&self, target: &str) -> Option<&str> {
        self.target_to_identifier.get(target).map(String::as_str)
    }

    /// Whether some reference has resolved to `target`.
    pub fn is_cited(&self, target: &str) -> bool {
        self.target_to_identifier.contains_key(target)
    }

    /// Number of identifiers handed out.
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Number of anchor targets with an identifier.
    pub fn target_count(&self) -> usize {
        self.target_to_identifier.len()
    }

    /// All identifiers handed out, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.used.iter().cloned().collect();
        identifiers.sort();
        identifiers
    }
}

/// Owns the [`Registry`] and decides the final identifier of every footnote.
#[derive(Debug, Default)]
pub struct Allocator {
    registry: Registry,
}

impl Allocator {
    /// Create an allocator with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Allocate an identifier for `desired`.
    ///
    /// - `*` becomes the sentinel `ast1`;
    /// - a free label is returned verbatim;
    /// - a taken integer label is an error, numbering is author-significant;
    /// - any other taken label grows until free: the sentinel counts up
    ///   (`ast2`, `ast3`), other labels repeat (`a`, `aa`, `aaa`).
    pub fn allocate(&mut self, desired: &str) -> Result<String> {
        if desired.trim().is_empty() {
            return Err(Error::MalformedLink {
                href: desired.to_string(),
                reason: "empty footnote label",
            });
        }

        let is_sentinel = desired == STAR;
        let base = if is_sentinel {
            format!("{SENTINEL_PREFIX}1")
        } else {
            desired.to_string()
        };

        if !self.registry.used.contains(&base) {
            self.registry.used.insert(base.clone());
            return Ok(base);
        }

        if is_integer(&base) {
            return Err(Error::ConflictingNumericIdentifier { label: base });
        }

        let identifier = (2..)
            .map(|n| {
                if is_sentinel {
                    format!("{SENTINEL_PREFIX}{n}")
                } else {
                    desired.repeat(n)
                }
            })
            .find(|candidate| !self.registry.used.contains(candidate))
            .unwrap_or_default();

        debug!(desired, identifier = %identifier, "renamed colliding footnote label");
        self.registry.used.insert(identifier.clone());
        Ok(identifier)
    }

    /// Identifier of `target`, allocating one from `label` on first sight.
    pub fn resolve(&mut self, target: &str, label: &str) -> Result<String> {
        if let Some(identifier) = self.registry.lookup(target) {
            return Ok(identifier.to_string());
        }

        let identifier = self.allocate(label)?;
        self.registry
            .target_to_identifier
            .insert(target.to_string(), identifier.clone());
        Ok(identifier)
    }
}

/// Optional sign followed by ASCII digits, ignoring surrounding whitespace.
fn is_integer(label: &str) -> bool {
    let label = label.trim();
    let digits = label
        .strip_prefix(['+', '-'])
        .unwrap_or(label);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
