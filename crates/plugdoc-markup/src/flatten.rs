//! Plain-text flattening.
//!
//! Source line wrapping collapses to spaces, `<br>` elements become newlines,
//! every other tag is dropped, and entity references are decoded.

use crate::entities::decode;
use crate::token::{Token, Tokenizer};

/// Reduce markup to plain text.
///
/// Expects inline tags to be resolved already (see [`Target::Text`](crate::Target::Text)).
///
/// # Examples
///
/// ```
/// use plugdoc_markup::flatten;
///
/// assert_eq!(flatten("Line1\r\nLine2"), "Line1 Line2");
/// assert_eq!(flatten("Line1<br>Line2"), "Line1\nLine2");
/// assert_eq!(flatten("<b>bold</b> &amp; plain"), "bold & plain");
/// ```
pub fn flatten(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for token in Tokenizer::new(input) {
        match token {
            Token::Text(text) => out.push_str(&decode(&join_lines(text))),
            Token::OpenTag(tag) | Token::SelfClosingTag(tag) if tag.is("br") => out.push('\n'),
            Token::InlineDocTag { raw, .. } => out.push_str(raw),
            Token::OpenTag(_) | Token::CloseTag(_) | Token::SelfClosingTag(_) | Token::Comment(_) => {}
        }
    }

    out
}

/// Replace each line break sequence (`\r\n`, `\r`, `\n`) with one space.
fn join_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push(' ');
            }
            '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty() {
        assert_eq!(flatten(""), "");
    }

    #[test]
    fn test_line_breaks_become_spaces() {
        assert_eq!(flatten("a\nb\rc\r\nd"), "a b c d");
    }

    #[test]
    fn test_consecutive_breaks_not_collapsed() {
        assert_eq!(flatten("a\n\nb"), "a  b");
    }

    #[test]
    fn test_br_forms_become_newlines() {
        assert_eq!(flatten("a<br>b<br/>c<BR />d"), "a\nb\nc\nd");
    }

    #[test]
    fn test_br_with_source_wrapping() {
        assert_eq!(flatten("a<br>\nb"), "a\n b");
    }

    #[test]
    fn test_tags_stripped() {
        assert_eq!(
            flatten(r#"<p>Generates <a href="x">something</a></p>"#),
            "Generates something"
        );
    }

    #[test]
    fn test_comments_stripped() {
        assert_eq!(flatten("a<!-- hidden -->b"), "ab");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(flatten("&lt;A&amp;B&gt;"), "<A&B>");
    }

    #[test]
    fn test_stray_less_than_kept() {
        assert_eq!(flatten("a < b"), "a < b");
    }

    #[test]
    fn test_no_whitespace_collapse() {
        assert_eq!(flatten("a   <b> b </b>  c"), "a    b   c");
    }
}
