//! End-to-end conversion of a chapter/footnote-container pair.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{Config, DocumentKind, OutputMode};
use crate::dom::{decode, load_html};
use crate::error::Result;
use crate::markdown::render;
use crate::resolve::{Report, resolve};

/// Markdown produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Chapter body, footnote references resolved.
    pub chapter: String,
    /// Footnote container, definitions assembled.
    pub footnotes: String,
    /// Run summary.
    pub report: Report,
}

impl Conversion {
    /// Chapter followed by its footnotes, separated by a blank line.
    pub fn combined(&self) -> String {
        if self.footnotes.trim().is_empty() {
            return self.chapter.clone();
        }
        if self.chapter.trim().is_empty() {
            return self.footnotes.clone();
        }
        format!("{}\n{}", self.chapter, self.footnotes)
    }

    /// Files to write for `config.output`, paths relative to the input
    /// directory.
    pub fn outputs(&self, config: &Config) -> Vec<(PathBuf, String)> {
        match config.output {
            OutputMode::Combined => {
                vec![(config.markdown_path(DocumentKind::Chapter), self.combined())]
            }
            OutputMode::Separate => vec![
                (
                    config.markdown_path(DocumentKind::Chapter),
                    self.chapter.clone(),
                ),
                (
                    config.markdown_path(DocumentKind::Footnotes),
                    self.footnotes.clone(),
                ),
            ],
        }
    }
}

/// Convert a chapter and its footnote container to Markdown.
///
/// Nothing is rendered unless every resolution step succeeds.
///
/// # Example
///
/// ```
/// use footmark::{Config, convert};
///
/// let chapter = r#"<p>Claim.<a href="footnotes.html#fn1">1</a></p>"#;
/// let notes = r#"<p><a id="fn1"></a><a href="chapter.html#r1">1</a>. Source.</p>"#;
///
/// let out = convert(chapter, notes, &Config::default()).unwrap();
/// assert_eq!(out.chapter, "Claim.[^1]\n");
/// assert_eq!(out.footnotes, "[^1]: Source.\n");
/// ```
pub fn convert(chapter_html: &str, footnote_html: &str, config: &Config) -> Result<Conversion> {
    let mut chapter = load_html(chapter_html);
    let mut footnotes = load_html(footnote_html);
    debug!(
        chapter_nodes = chapter.node_count(),
        footnote_nodes = footnotes.node_count(),
        "loaded documents"
    );

    let report = resolve(&mut chapter, &mut footnotes, config)?;

    Ok(Conversion {
        chapter: render(&chapter),
        footnotes: render(&footnotes),
        report,
    })
}

/// Read both documents named by `config` from `dir` and convert them.
pub fn convert_files(dir: impl AsRef<Path>, config: &Config) -> Result<Conversion> {
    let dir = dir.as_ref();
    let chapter = fs::read(dir.join(&config.chapter_file))?;
    let footnotes = fs::read(dir.join(&config.footnote_file))?;
    convert(&decode(&chapter), &decode(&footnotes), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversion(chapter: &str, footnotes: &str) -> Conversion {
        Conversion {
            chapter: chapter.to_string(),
            footnotes: footnotes.to_string(),
            report: Report::default(),
        }
    }

    #[test]
    fn test_combined_joins_with_blank_line() {
        let out = conversion("Text[^1]\n", "[^1]: Note.\n");
        assert_eq!(out.combined(), "Text[^1]\n\n[^1]: Note.\n");
    }

    #[test]
    fn test_combined_without_footnotes() {
        let out = conversion("Text\n", "");
        assert_eq!(out.combined(), "Text\n");
    }

    #[test]
    fn test_outputs_by_mode() {
        let out = conversion("A\n", "B\n");
        let mut config = Config::default();

        let combined = out.outputs(&config);
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].0, PathBuf::from("chapter.md"));

        config.output = OutputMode::Separate;
        let separate = out.outputs(&config);
        assert_eq!(
            separate,
            vec![
                (PathBuf::from("chapter.md"), "A\n".to_string()),
                (PathBuf::from("footnotes.md"), "B\n".to_string()),
            ]
        );
    }
}
