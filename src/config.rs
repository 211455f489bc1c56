//! Run configuration.

use std::path::{Path, PathBuf};

/// Default chapter body file name.
pub const DEFAULT_CHAPTER_FILE: &str = "chapter.html";
/// Default footnote container file name.
pub const DEFAULT_FOOTNOTE_FILE: &str = "footnotes.html";

/// Which of the two documents of a run a tree came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// The chapter body.
    Chapter,
    /// The footnote container.
    Footnotes,
}

impl DocumentKind {
    /// Human-readable name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::Chapter => "chapter",
            DocumentKind::Footnotes => "footnote container",
        }
    }
}

/// How Markdown output is split into files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One file: the chapter followed by its footnotes.
    #[default]
    Combined,
    /// One Markdown file per input document.
    Separate,
}

/// Configuration for a conversion run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chapter body file, as referenced by the footnote container.
    pub chapter_file: String,
    /// Footnote container file, as referenced by the chapter.
    pub footnote_file: String,
    /// Output layout.
    pub output: OutputMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chapter_file: DEFAULT_CHAPTER_FILE.to_string(),
            footnote_file: DEFAULT_FOOTNOTE_FILE.to_string(),
            output: OutputMode::default(),
        }
    }
}

impl Config {
    /// File name (final path segment) of a document, as hrefs name it.
    pub fn file_name(&self, kind: DocumentKind) -> &str {
        let path = match kind {
            DocumentKind::Chapter => &self.chapter_file,
            DocumentKind::Footnotes => &self.footnote_file,
        };
        Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path)
    }

    /// Markdown path written for a document: same stem, `.md` extension.
    pub fn markdown_path(&self, kind: DocumentKind) -> PathBuf {
        let path = match kind {
            DocumentKind::Chapter => &self.chapter_file,
            DocumentKind::Footnotes => &self.footnote_file,
        };
        Path::new(path).with_extension("md")
    }
}
