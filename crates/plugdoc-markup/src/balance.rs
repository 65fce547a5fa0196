//! HTML balancing ("make valid").
//!
//! Every non-void element opened in the input is closed in the output, in
//! correct nesting order. Missing close tags are synthesized; nothing else
//! about the markup changes, except that stray reserved characters in text
//! are escaped and void elements are written in self-closing form.

use crate::entities::push_escaped_stray;
use crate::token::{Token, Tokenizer};

/// Names of currently open elements, most recent last.
#[derive(Debug, Default)]
struct ElementStack<'a> {
    open: Vec<&'a str>,
}

impl<'a> ElementStack<'a> {
    fn push(&mut self, name: &'a str) {
        self.open.push(name);
    }

    fn pop(&mut self) -> Option<&'a str> {
        self.open.pop()
    }

    /// Index of the most recently opened element called `name`.
    fn position(&self, name: &str) -> Option<usize> {
        self.open.iter().rposition(|open| open.eq_ignore_ascii_case(name))
    }

    /// Remove and return the elements opened after `index`, most recent first.
    fn unwind_above(&mut self, index: usize) -> Vec<&'a str> {
        let mut unwound = self.open.split_off(index + 1);
        unwound.reverse();
        unwound
    }
}

/// Balances tags in documentation markup.
///
/// # Example
///
/// ```
/// use plugdoc_markup::Balancer;
///
/// let mut balancer = Balancer::new();
/// assert_eq!(
///     balancer.balance("Generates <i>something</i> <b> for the project."),
///     "Generates <i>something</i> <b> for the project.</b>"
/// );
/// assert_eq!(balancer.warnings().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Balancer {
    warnings: Vec<String>,
}

impl Balancer {
    /// Create a new balancer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance `input`, which must already have its inline tags resolved.
    pub fn balance(&mut self, input: &str) -> String {
        let mut out = String::with_capacity(input.len() + 16);
        let mut stack = ElementStack::default();

        for token in Tokenizer::new(input) {
            match token {
                Token::Text(text) => push_escaped_stray(&mut out, text),
                Token::OpenTag(tag) if tag.is_void() => {
                    out.push('<');
                    out.push_str(tag.name);
                    out.push_str(tag.attrs);
                    out.push_str("/>");
                }
                Token::OpenTag(tag) => {
                    out.push_str(tag.raw);
                    stack.push(tag.name);
                }
                Token::CloseTag(tag) => {
                    if let Some(index) = stack.position(tag.name) {
                        for name in stack.unwind_above(index) {
                            self.warn(format!(
                                "unclosed <{name}> closed before </{}>",
                                tag.name
                            ));
                            push_close(&mut out, name);
                        }
                        stack.pop();
                    } else {
                        self.warn(format!("stray closing tag </{}> left as is", tag.name));
                    }
                    out.push_str(tag.raw);
                }
                Token::SelfClosingTag(tag) => out.push_str(tag.raw),
                Token::Comment(raw) | Token::InlineDocTag { raw, .. } => out.push_str(raw),
            }
        }

        while let Some(name) = stack.pop() {
            self.warn(format!("unclosed <{name}> closed at end of input"));
            push_close(&mut out, name);
        }

        out
    }

    /// Warnings collected by every `balance` call on this balancer.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the balancer, returning its warnings.
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    fn warn(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

fn push_close(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Balance `input`, discarding warnings.
pub fn balance(input: &str) -> String {
    Balancer::new().balance(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty() {
        assert_eq!(balance(""), "");
    }

    #[test]
    fn test_valid_html_unchanged() {
        let html = "Generates <i>something</i> for the project.";
        assert_eq!(balance(html), html);
    }

    #[test]
    fn test_unclosed_at_end() {
        assert_eq!(
            balance("Generates <i>something</i> <b> for the project."),
            "Generates <i>something</i> <b> for the project.</b>"
        );
    }

    #[test]
    fn test_unclosed_lifo_order() {
        assert_eq!(balance("<p><b><i>x"), "<p><b><i>x</i></b></p>");
    }

    #[test]
    fn test_void_element_self_closed() {
        assert_eq!(balance("Line1<br>Line2"), "Line1<br/>Line2");
        assert_eq!(balance(r#"<img src="a.png">"#), r#"<img src="a.png"/>"#);
        assert_eq!(balance("<BR>"), "<BR/>");
    }

    #[test]
    fn test_self_closing_forms_unchanged() {
        assert_eq!(balance("a<br/>b<br />c"), "a<br/>b<br />c");
    }

    #[test]
    fn test_self_closing_non_void_not_pushed() {
        assert_eq!(balance("<div/>x"), "<div/>x");
    }

    #[test]
    fn test_stray_characters_escaped() {
        assert_eq!(
            balance("& &amp; < > \u{00a0}"),
            "&amp; &amp; &lt; &gt; \u{00a0}"
        );
    }

    #[test]
    fn test_attributes_not_escaped() {
        let html = r#"<a href="?a=1&b=2">x</a>"#;
        assert_eq!(balance(html), html);
    }

    #[test]
    fn test_stray_close_passed_through() {
        let mut balancer = Balancer::new();
        assert_eq!(balancer.balance("a</b>c"), "a</b>c");
        assert!(balancer.warnings()[0].contains("stray closing tag </b>"));
    }

    #[test]
    fn test_close_deeper_element() {
        let mut balancer = Balancer::new();
        assert_eq!(balancer.balance("<b><i>x</b>y"), "<b><i>x</i></b>y");
        assert!(balancer.warnings()[0].contains("unclosed <i> closed before </b>"));
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(balance("<B>x</b>"), "<B>x</b>");
    }

    #[test]
    fn test_comment_preserved() {
        assert_eq!(balance("<!-- <b> -->x"), "<!-- <b> -->x");
    }

    #[test]
    fn test_synthesized_close_uses_written_name() {
        assert_eq!(balance("<EM>x"), "<EM>x</EM>");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "Generates <i>something</i> <b> for the project.",
            "<b><i>x</b>y</i>",
            "a</b><p>c<br>d & e",
            "<ul><li>one<li>two</ul>",
            "x < y && y > z",
        ] {
            let once = balance(input);
            assert_eq!(balance(&once), once, "input: {input}");
        }
    }

    #[test]
    fn test_no_warnings_for_valid_input() {
        let mut balancer = Balancer::new();
        balancer.balance("<p>a <code>b</code><br></p>");
        assert!(balancer.warnings().is_empty());
    }
}
