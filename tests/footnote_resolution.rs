//! End-to-end footnote resolution over inline HTML pairs.

use footmark::{Config, Error, convert};

fn run(chapter: &str, footnotes: &str) -> footmark::Result<footmark::Conversion> {
    convert(chapter, footnotes, &Config::default())
}

#[test]
fn test_basic_pair() {
    let chapter = r#"<html><body>
        <h2>Chapter One</h2>
        <p>It was a dark night.<a id="r1" href="footnotes.html#fn1"><sup>1</sup></a></p>
    </body></html>"#;
    let footnotes = r#"<html><body>
        <p><a id="fn1"></a><a href="chapter.html#r1">1</a>. Note text</p>
    </body></html>"#;

    let out = run(chapter, footnotes).unwrap();

    assert_eq!(out.chapter, "## Chapter One\n\nIt was a dark night.[^1]\n");
    assert_eq!(out.footnotes, "[^1]: Note text\n");
    assert_eq!(out.report.references, 1);
    assert_eq!(out.report.definitions, 1);
    assert_eq!(out.report.identifiers, vec!["1"]);
    assert!(out.report.dangling.is_empty());

    // The definition link itself is not also turned into a reference
    assert_eq!(out.footnotes.matches("[^1]").count(), 1);
}

#[test]
fn test_star_labels_get_sentinels() {
    let chapter = r#"<p>First<a href="footnotes.html#n1">*</a> and second<a href="footnotes.html#n2">*</a>.</p>"#;
    let footnotes = r#"
        <p><a id="n1" href="chapter.html#s1">*</a> Starred.</p>
        <p><a id="n2" href="chapter.html#s2">*</a> Starred again.</p>"#;

    let out = run(chapter, footnotes).unwrap();

    assert_eq!(out.chapter, "First[^ast1] and second[^ast2].\n");
    assert_eq!(
        out.footnotes,
        "[^ast1]: Starred.\n\n[^ast2]: Starred again.\n"
    );
    assert_eq!(out.report.identifiers, vec!["ast1", "ast2"]);
    assert_eq!(out.report.identifiers.len(), out.report.definitions);
}

#[test]
fn test_repeated_text_label() {
    let chapter = r#"<p>One<a href="footnotes.html#a1">a</a> two<a href="footnotes.html#a2">a</a></p>"#;
    let footnotes = r#"
        <p><a id="a1"></a><a href="chapter.html#x">a</a>) Alpha.</p>
        <p><a id="a2"></a><a href="chapter.html#y">a</a>) Again.</p>"#;

    let out = run(chapter, footnotes).unwrap();

    assert_eq!(out.chapter, "One[^a] two[^aa]\n");
    assert_eq!(out.footnotes, "[^a]: Alpha.\n\n[^aa]: Again.\n");
    assert_eq!(out.report.identifiers, vec!["a", "aa"]);
    assert_eq!(out.report.identifiers.len(), out.report.definitions);
}

#[test]
fn test_same_target_cited_twice_shares_identifier() {
    let chapter = r#"<p>A<a href="footnotes.html#fn1">1</a> B<a href="footnotes.html#fn1">1</a></p>"#;
    let footnotes = r#"<p><a id="fn1"></a><a href="chapter.html#r1">1</a>. Shared.</p>"#;

    let out = run(chapter, footnotes).unwrap();

    assert_eq!(out.chapter, "A[^1] B[^1]\n");
    assert_eq!(out.report.references, 2);
    assert_eq!(out.report.definitions, 1);
}

#[test]
fn test_numeric_label_collision() {
    let chapter = r#"<p>A<a href="footnotes.html#fn1">7</a> B<a href="footnotes.html#fn2">7</a></p>"#;

    let err = run(chapter, "<p>Notes</p>").unwrap_err();

    assert!(
        matches!(err, Error::ConflictingNumericIdentifier { ref label } if label == "7"),
        "got {err:?}"
    );
}

#[test]
fn test_third_file_is_external() {
    let chapter = r#"<p>A<a href="appendix.html#a1">1</a></p>"#;

    let err = run(chapter, "").unwrap_err();
    assert!(matches!(err, Error::ExternalReference { .. }), "got {err:?}");

    let chapter = r#"<p>See <a href="https://example.com/#top">the site</a></p>"#;
    let err = run(chapter, "").unwrap_err();
    assert!(matches!(err, Error::ExternalReference { .. }), "got {err:?}");
}

#[test]
fn test_chapter_may_only_reference_one_file() {
    let chapter = r##"<p>A<a href="footnotes.html#fn1">1</a> B<a href="#top">2</a></p>"##;

    let err = run(chapter, "").unwrap_err();

    assert!(
        matches!(err, Error::TooManyReferencedFiles { count: 2, limit: 1, .. }),
        "got {err:?}"
    );
}

#[test]
fn test_link_without_anchor_is_malformed() {
    let chapter = r#"<p>A<a href="footnotes.html">1</a></p>"#;

    let err = run(chapter, "").unwrap_err();

    assert!(matches!(err, Error::MalformedLink { .. }), "got {err:?}");
}

#[test]
fn test_container_link_without_anchor_is_reference() {
    let chapter = r#"<p>Body<a href="footnotes.html#fn1">1</a></p>"#;
    let footnotes = r#"
        <p><a id="fn1"></a><a href="chapter.html#r1">1</a>. Compare <a href="chapter.html#r9">9</a>.</p>"#;

    let out = run(chapter, footnotes).unwrap();

    assert_eq!(out.footnotes, "[^1]: Compare [^9].\n");
    assert_eq!(out.report.dangling, vec!["9"]);
}

#[test]
fn test_forward_reference_between_notes() {
    let chapter = r#"<p>Body<a href="footnotes.html#fn1">1</a></p>"#;
    let footnotes = r##"
        <p><a id="fn1"></a><a href="chapter.html#r1">1</a>. See note <a href="#fn2">2</a>.</p>
        <p><a id="fn2"></a><a href="chapter.html#r2">2</a>. Other.</p>"##;

    let out = run(chapter, footnotes).unwrap();

    assert_eq!(out.footnotes, "[^1]: See note [^2].\n\n[^2]: Other.\n");
    assert_eq!(out.report.definitions, 2);
    assert!(out.report.dangling.is_empty());
}

#[test]
fn test_cited_anchor_without_link() {
    let chapter = r#"<p>Body<a href="footnotes.html#fn1">1</a></p>"#;
    let footnotes = r#"<p><a id="fn1"></a>1. Note without its link</p>"#;

    let err = run(chapter, footnotes).unwrap_err();

    assert!(
        matches!(err, Error::UnexpectedSiblingStructure { ref anchor, .. } if anchor == "fn1"),
        "got {err:?}"
    );
}

#[test]
fn test_uncited_anchors_are_dropped() {
    let chapter = r#"<p><a id="top"></a>Body<a href="footnotes.html#fn1">1</a></p>"#;
    let footnotes = r#"
        <div><span id="page12"></span>
        <p><a id="fn1"></a><a href="chapter.html#r1">1</a>. Kept.</p></div>"#;

    let out = run(chapter, footnotes).unwrap();

    assert_eq!(out.chapter, "Body[^1]\n");
    assert_eq!(out.footnotes, "[^1]: Kept.\n");
}

#[test]
fn test_multiline_definition_is_joined() {
    let chapter = r#"<p>Body<a href="footnotes.html#fn1">1</a></p>"#;
    let footnotes = "<p><a id=\"fn1\"></a><a href=\"chapter.html#r1\">1</a>: A note\nthat wraps<br/>twice.</p>";

    let out = run(chapter, footnotes).unwrap();

    assert_eq!(out.footnotes, "[^1]: A note that wraps twice.\n");
}

#[test]
fn test_custom_file_names() {
    let config = Config {
        chapter_file: "text/part0004.html".to_string(),
        footnote_file: "text/part0005.html".to_string(),
        ..Config::default()
    };
    let chapter = r#"<p>Body<a href="part0005.html#fn1">1</a></p>"#;
    let footnotes = r#"<p><a id="fn1"></a><a href="part0004.html#r1">1</a>. Note.</p>"#;

    let out = convert(chapter, footnotes, &config).unwrap();

    assert_eq!(out.combined(), "Body[^1]\n\n[^1]: Note.\n");
}

#[test]
fn test_marker_inside_superscript() {
    let chapter = r#"<p>Body<a href="footnotes.html#fn1">1</a></p>"#;
    let footnotes = r#"
        <p><sup><a id="fn1" href="chapter.html#r1">1</a></sup>. Note text.</p>
        <p><sup><a id="fn2" href="chapter.html#r2">2</a></sup>. Unused.</p>"#;

    let out = run(chapter, footnotes).unwrap();

    assert!(out.footnotes.starts_with("[^1]: Note text.\n"), "{}", out.footnotes);
    assert_eq!(out.report.definitions, 1);
}

#[test]
fn test_space_between_marker_and_link() {
    let chapter = r#"<p>Body<a href="footnotes.html#fn1">1</a></p>"#;
    let footnotes = r#"<p><a id="fn1"></a> <a href="chapter.html#r1">1</a>. Note text.</p>"#;

    let out = run(chapter, footnotes).unwrap();

    assert_eq!(out.footnotes, "[^1]: Note text.\n");
}

#[test]
fn test_bracketed_note_numbers() {
    let chapter = r#"<p>Body<a href="footnotes.html#fn1">[1]</a></p>"#;
    let footnotes = r#"<p><a id="fn1"></a><a href="chapter.html#r1">[1]</a> Note text.</p>"#;

    let out = run(chapter, footnotes).unwrap();

    assert_eq!(out.combined(), "Body[^1]\n\n[^1]: Note text.\n");
}
