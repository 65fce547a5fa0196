//! End-to-end conversion of documentation comments.

use plugdoc_markup::{Converter, balance, to_html, to_text};
use pretty_assertions::assert_eq;

const SAMPLES: &[&str] = &[
    "",
    "Plain text only.",
    "Generates <i>something</i> for the project.",
    "Generates <i>something</i> <b> for the project.",
    "Line1<br>Line2",
    "& &amp; < > \u{00a0}",
    "{@code <A&B>} and {@literal x < y}",
    "<p>First paragraph<p>Second <em>paragraph",
    "<ul>\n<li>{@link Foo#bar(int, int)}</li>\n</ul>",
    "Mismatched <b><i>nesting</b></i> here",
    "<table><tr><td>cell</table>",
    "Unknown {@docRoot} and unterminated {@code x",
    "\u{05e9}\u{05dc}\u{05d5}\u{05dd} <b>\u{0627}\u{0644}\u{0639}\u{0631}\u{0628}\u{064a}\u{0629}",
];

#[test]
fn test_html_empty_for_absent_or_empty() {
    assert_eq!(to_html(None), "");
    assert_eq!(to_html(Some("")), "");
}

#[test]
fn test_text_empty_for_absent_or_empty() {
    assert_eq!(to_text(None), "");
    assert_eq!(to_text(Some("")), "");
}

#[test]
fn test_html_true_html_unchanged() {
    assert_eq!(
        to_html(Some("Generates <i>something</i> for the project.")),
        "Generates <i>something</i> for the project."
    );
}

#[test]
fn test_html_wrong_html_closed() {
    assert_eq!(
        to_html(Some("Generates <i>something</i> <b> for the project.")),
        "Generates <i>something</i> <b> for the project.</b>"
    );
}

#[test]
fn test_html_void_element() {
    let html = to_html(Some("Line1<br>Line2"));
    let compact: String = html.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(compact, "Line1<br/>Line2");
}

#[test]
fn test_html_entities() {
    assert_eq!(
        to_html(Some("& &amp; < > \u{00a0}")),
        "&amp; &amp; &lt; &gt; \u{00a0}"
    );
}

#[test]
fn test_html_inline_tags() {
    assert_eq!(to_html(Some("{@code <A&B>}")), "<code>&lt;A&amp;B&gt;</code>");
    assert_eq!(
        to_html(Some("{@linkplain Class#method(Object, String)}")),
        "Class.method()"
    );
    assert_eq!(
        to_html(Some("{@linkplain #method(Object, String) label}")),
        "label"
    );
}

#[test]
fn test_text_line_breaks() {
    assert_eq!(to_text(Some("Line1\r\nLine2")), "Line1 Line2");
    assert_eq!(to_text(Some("Line1<br>Line2")), "Line1\nLine2");
}

#[test]
fn test_text_inline_code() {
    assert_eq!(
        to_text(Some("Generates {@code something} for the project.")),
        "Generates something for the project."
    );
}

#[test]
fn test_text_multiline_comment() {
    let doc = "The goal prefix.\n<p>\nUse {@link #execute()} to run,\nthen {@value #DEFAULT}.<br>\nDone.";
    assert_eq!(
        to_text(Some(doc)),
        "The goal prefix.  Use execute() to run, then DEFAULT.\n Done."
    );
}

#[test]
fn test_balance_idempotent_on_html_output() {
    for &sample in SAMPLES {
        let html = to_html(Some(sample));
        assert_eq!(balance(&html), html, "sample: {sample:?}");
    }
}

#[test]
fn test_conversion_is_deterministic() {
    for &sample in SAMPLES {
        assert_eq!(to_html(Some(sample)), to_html(Some(sample)));
        assert_eq!(to_text(Some(sample)), to_text(Some(sample)));
    }
}

#[test]
fn test_text_output_has_no_tags() {
    for &sample in SAMPLES {
        let text = to_text(Some(sample));
        assert!(!text.contains("<b>"), "sample: {sample:?}");
        assert!(!text.contains("</"), "sample: {sample:?}");
    }
}

#[test]
fn test_non_latin_text_passes_through() {
    let html = to_html(Some(SAMPLES[12]));
    assert!(html.starts_with("\u{05e9}\u{05dc}\u{05d5}\u{05dd} <b>"));
    assert!(html.ends_with("</b>"));
}

#[test]
fn test_multibyte_text_at_start() {
    assert_eq!(to_html(Some("é")), "é");
    assert_eq!(to_text(Some("é")), "é");
    assert_eq!(to_html(Some("日本語 & more")), "日本語 &amp; more");
}

#[test]
fn test_multibyte_text_around_tags() {
    assert_eq!(
        to_html(Some("<b>über</b>ñ<br>日本 <i>Größe")),
        "<b>über</b>ñ<br/>日本 <i>Größe</i>"
    );
    assert_eq!(
        to_text(Some("<b>über</b>ñ<br>日本\nÅ")),
        "überñ\n日本 Å"
    );
}

#[test]
fn test_multibyte_inline_bodies() {
    assert_eq!(to_text(Some("{@code Größe} – ok")), "Größe – ok");
    assert_eq!(to_html(Some("{@code ü<ß>}")), "<code>ü&lt;ß&gt;</code>");
}

#[test]
fn test_unterminated_inline_tag_rest_is_text() {
    assert_eq!(to_html(Some("See {@code x < y")), "See {@code x &lt; y");
}

#[test]
fn test_large_malformed_input() {
    let tags = "x <a ".repeat(40_000);
    assert_eq!(to_html(Some(&tags)), tags.replace('<', "&lt;"));

    let inline = "{@code ".repeat(40_000);
    assert_eq!(to_text(Some(&inline)), inline);
}

#[test]
fn test_concurrent_conversion() {
    let handles: Vec<_> = SAMPLES
        .iter()
        .map(|sample| {
            let sample = (*sample).to_owned();
            std::thread::spawn(move || (to_html(Some(&sample)), to_text(Some(&sample))))
        })
        .collect();

    for (handle, sample) in handles.into_iter().zip(SAMPLES.iter().copied()) {
        let (html, text) = handle.join().unwrap();
        assert_eq!(html, to_html(Some(sample)));
        assert_eq!(text, to_text(Some(sample)));
    }
}

#[test]
fn test_diagnostics_for_repairs() {
    let mut converter = Converter::new().with_diagnostics();
    let html = converter.html(Some("Mismatched <b><i>nesting</b></i> here"));
    assert_eq!(html, "Mismatched <b><i>nesting</i></b></i> here");

    let warnings = converter.warnings();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("unclosed <i>"));
    assert!(warnings[1].contains("stray closing tag </i>"));
}
