//! Link target parsing.
//!
//! Reflowed ebook chapters point at their footnotes with relative hrefs:
//! - **Cross-document**: `footnotes.html#fn1`
//! - **Same document**: `#fn1`
//!
//! Anything with a URL scheme is external and never a footnote.

use percent_encoding::percent_decode_str;

/// Target of a document-relative link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTarget {
    /// Final path segment of the target file, percent-decoded.
    /// Empty for fragment-only links (`#fn1`).
    pub file: String,

    /// Fragment id, percent-decoded. Empty when the href has no fragment.
    pub anchor: String,
}

/// A parsed link, either external or document-relative.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Link {
    /// External URL (http://, https://, mailto:, etc.)
    External(String),

    /// Relative link into one of the documents of the run.
    Relative(LinkTarget),
}

impl Link {
    /// Parse a raw href string into a Link.
    pub fn parse(href: &str) -> Link {
        let href = href.trim();

        if has_scheme(href) {
            return Link::External(href.to_string());
        }

        let (path, fragment) = match href.split_once('#') {
            Some((path, fragment)) => (path, fragment),
            None => (href, ""),
        };

        // Drop any query string, then keep only the file name
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        let file = path.rsplit('/').next().unwrap_or(path);

        Link::Relative(LinkTarget {
            file: decode(file),
            anchor: decode(fragment),
        })
    }
}

fn decode(s: &str) -> String {
    percent_decode_str(s).decode_utf8_lossy().into_owned()
}

/// RFC 3986 scheme: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative(href: &str) -> LinkTarget {
        match Link::parse(href) {
            Link::Relative(target) => target,
            other => panic!("Expected relative link, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_external_links() {
        assert!(matches!(
            Link::parse("https://example.com/notes.html#fn1"),
            Link::External(_)
        ));
        assert!(matches!(
            Link::parse("mailto:user@example.com"),
            Link::External(_)
        ));
    }

    #[test]
    fn test_parse_cross_document_link() {
        let target = relative("footnotes.html#fn1");
        assert_eq!(target.file, "footnotes.html");
        assert_eq!(target.anchor, "fn1");
    }

    #[test]
    fn test_parse_fragment_link() {
        let target = relative("#fn1");
        assert_eq!(target.file, "");
        assert_eq!(target.anchor, "fn1");
    }

    #[test]
    fn test_parse_path_and_encoding() {
        let target = relative("../text/foot%20notes.html?x=1#note%2D3");
        assert_eq!(target.file, "foot notes.html");
        assert_eq!(target.anchor, "note-3");
    }

    #[test]
    fn test_parse_missing_fragment() {
        let target = relative("footnotes.html");
        assert_eq!(target.file, "footnotes.html");
        assert!(target.anchor.is_empty());

        let target = relative("footnotes.html#");
        assert!(target.anchor.is_empty());
    }
}
