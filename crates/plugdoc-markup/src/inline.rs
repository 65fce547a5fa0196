//! Inline documentation tags: `{@code ...}`, `{@literal ...}`, `{@link ...}`,
//! `{@linkplain ...}` and `{@value ...}`.
//!
//! Inline tags are resolved before any HTML balancing, since their expansions
//! may contain markup and escaped text that must not be escaped again.

use std::fmt;

use crate::entities::escape;
use crate::token::Token;

/// Supported inline tag kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineTagKind {
    /// `{@code TEXT}`: escaped text in code font.
    Code,
    /// `{@literal TEXT}`: escaped text.
    Literal,
    /// `{@link REF [LABEL]}`: reference in code font.
    Link,
    /// `{@linkplain REF [LABEL]}`: reference in plain font.
    Linkplain,
    /// `{@value REF}`: constant reference.
    Value,
}

impl InlineTagKind {
    /// Parse a tag name. Names are case-sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "code" => Some(Self::Code),
            "literal" => Some(Self::Literal),
            "link" => Some(Self::Link),
            "linkplain" => Some(Self::Linkplain),
            "value" => Some(Self::Value),
            _ => None,
        }
    }

    /// Tag name as written after `{@`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Literal => "literal",
            Self::Link => "link",
            Self::Linkplain => "linkplain",
            Self::Value => "value",
        }
    }
}

impl fmt::Display for InlineTagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output representation for resolved inline tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Keep structural wrapping such as `<code>`.
    Html,
    /// Drop structural wrapping; text is still entity-escaped.
    Text,
}

/// Reference of a link-style tag: `Class`, `#member`, or `Class#member`,
/// optionally followed by a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkRef<'a> {
    /// Class part before `#`, simple or fully qualified.
    pub class: Option<&'a str>,
    /// Member part after `#`, possibly with a parameter list.
    pub member: Option<&'a str>,
    /// Label following the reference.
    pub label: Option<&'a str>,
}

impl<'a> LinkRef<'a> {
    /// Parse the body of a link-style tag.
    ///
    /// The reference ends at the first whitespace outside parentheses, so
    /// `#method(Object, String) label` keeps its parameter list intact.
    pub fn parse(body: &'a str) -> Self {
        let body = body.trim();

        let mut depth = 0usize;
        let mut split = None;
        for (i, c) in body.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                c if c.is_whitespace() && depth == 0 => {
                    split = Some(i);
                    break;
                }
                _ => {}
            }
        }

        let (reference, label) = match split {
            Some(i) => (&body[..i], Some(body[i..].trim()).filter(|l| !l.is_empty())),
            None => (body, None),
        };

        let (class, member) = match reference.split_once('#') {
            Some((class, member)) => (class, Some(member)),
            None => (reference, None),
        };

        Self {
            class: Some(class).filter(|c| !c.is_empty()),
            member: member.filter(|m| !m.is_empty()),
            label,
        }
    }

    /// Display text derived from the reference alone.
    ///
    /// Parameter lists collapse to `()` and `Class#member` becomes
    /// `Class.member`.
    ///
    /// # Examples
    ///
    /// ```
    /// use plugdoc_markup::LinkRef;
    ///
    /// assert_eq!(LinkRef::parse("Class#method(Object, String)").display_text(), "Class.method()");
    /// assert_eq!(LinkRef::parse("#field").display_text(), "field");
    /// ```
    pub fn display_text(&self) -> String {
        let member = self.member.map(|m| match m.find('(') {
            Some(paren) => format!("{}()", &m[..paren]),
            None => m.to_owned(),
        });

        match (self.class, member) {
            (Some(class), Some(member)) => format!("{class}.{member}"),
            (Some(class), None) => class.to_owned(),
            (None, Some(member)) => member,
            (None, None) => String::new(),
        }
    }
}

/// Splits documentation text into text runs and inline doc tags.
///
/// Unknown openers stay in the text and scanning resumes inside them. An
/// unterminated tag turns the rest of the input into text. The reasons are
/// collected as warnings.
pub struct InlineTokenizer<'a> {
    input: &'a str,
    pos: usize,
    warnings: Vec<String>,
}

impl<'a> InlineTokenizer<'a> {
    /// Create a tokenizer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            warnings: Vec::new(),
        }
    }

    /// Take the warnings collected so far.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

impl<'a> Iterator for InlineTokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.input[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let mut text_len = 0;
        if rest.starts_with("{@") {
            match scan_tag(rest) {
                Ok((kind, body, len)) => {
                    self.pos += len;
                    return Some(Token::InlineDocTag {
                        kind,
                        body,
                        raw: &rest[..len],
                    });
                }
                Err(err) => {
                    if let Some(warning) = err.warning(self.pos) {
                        self.warnings.push(warning);
                    }
                    // No closing brace anywhere ahead: nothing after this can resolve
                    if matches!(err, ScanError::Unterminated(_)) {
                        self.pos = self.input.len();
                        return Some(Token::Text(rest));
                    }
                    text_len = 2;
                }
            }
        }

        let end = rest[text_len..]
            .find("{@")
            .map_or(rest.len(), |i| text_len + i);
        self.pos += end;
        Some(Token::Text(&rest[..end]))
    }
}

/// Why a `{@` did not start an inline tag.
enum ScanError<'a> {
    /// Not tag syntax at all (e.g. `{@ ` or `{@}`).
    NotATag,
    /// Syntactically a tag, but not one of the supported kinds.
    Unknown(&'a str),
    /// Supported kind without a matching `}`.
    Unterminated(InlineTagKind),
}

impl ScanError<'_> {
    fn warning(&self, offset: usize) -> Option<String> {
        match self {
            Self::NotATag => None,
            Self::Unknown(name) => Some(format!(
                "unknown inline tag {{@{name}}} at offset {offset} left as text"
            )),
            Self::Unterminated(kind) => Some(format!(
                "unterminated inline tag {{@{kind}}} at offset {offset}: rest of input left as text"
            )),
        }
    }
}

/// Scan an inline tag at the start of `s`, which begins with `{@`.
///
/// Returns the kind, the body with leading whitespace removed, and the total
/// length including the closing brace.
fn scan_tag(s: &str) -> Result<(InlineTagKind, &str, usize), ScanError<'_>> {
    let after_open = &s[2..];
    let name_len = after_open
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(after_open.len());
    if name_len == 0 {
        return Err(ScanError::NotATag);
    }
    let name = &after_open[..name_len];

    match after_open[name_len..].chars().next() {
        Some(c) if c == '}' || c.is_whitespace() => {}
        // Name runs to end of input
        None => {
            return match InlineTagKind::parse(name) {
                Some(kind) => Err(ScanError::Unterminated(kind)),
                None => Err(ScanError::NotATag),
            };
        }
        Some(_) => return Err(ScanError::NotATag),
    }

    let kind = InlineTagKind::parse(name).ok_or(ScanError::Unknown(name))?;

    let body_start = 2 + name_len;
    let mut depth = 1usize;
    for (i, c) in s[body_start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = body_start + i;
                    let body = s[body_start..end].trim_start();
                    return Ok((kind, body, end + 1));
                }
            }
            _ => {}
        }
    }

    Err(ScanError::Unterminated(kind))
}

/// Rewrites inline doc tags into their display form.
///
/// # Example
///
/// ```
/// use plugdoc_markup::{InlineResolver, Target};
///
/// let mut resolver = InlineResolver::new(Target::Html);
/// assert_eq!(resolver.resolve("{@code <A&B>}"), "<code>&lt;A&amp;B&gt;</code>");
/// ```
#[derive(Debug)]
pub struct InlineResolver {
    target: Target,
    warnings: Vec<String>,
}

impl InlineResolver {
    /// Create a resolver producing output for `target`.
    pub fn new(target: Target) -> Self {
        Self {
            target,
            warnings: Vec::new(),
        }
    }

    /// Resolve every inline tag in `input`, left to right.
    pub fn resolve(&mut self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        let mut tokens = InlineTokenizer::new(input);

        for token in tokens.by_ref() {
            match token {
                Token::InlineDocTag { kind, body, .. } => self.render(kind, body, &mut out),
                other => out.push_str(other.raw()),
            }
        }

        self.warnings.extend(tokens.take_warnings());
        out
    }

    /// Warnings collected by every `resolve` call on this resolver.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consume the resolver, returning its warnings.
    pub fn into_warnings(self) -> Vec<String> {
        self.warnings
    }

    fn render(&mut self, kind: InlineTagKind, body: &str, out: &mut String) {
        let html = self.target == Target::Html;
        match kind {
            InlineTagKind::Code if html => {
                out.push_str("<code>");
                out.push_str(&escape(body));
                out.push_str("</code>");
            }
            InlineTagKind::Code | InlineTagKind::Literal => out.push_str(&escape(body)),
            InlineTagKind::Link | InlineTagKind::Linkplain => {
                let link = LinkRef::parse(body);
                let text = match link.label {
                    Some(label) => label.to_owned(),
                    None => escape(&link.display_text()),
                };
                if html && kind == InlineTagKind::Link {
                    out.push_str("<code>");
                    out.push_str(&text);
                    out.push_str("</code>");
                } else {
                    out.push_str(&text);
                }
            }
            InlineTagKind::Value => {
                let link = LinkRef::parse(body);
                if let Some(extra) = link.label {
                    self.warnings.push(format!(
                        "ignoring trailing text \"{extra}\" in {{@value}} tag"
                    ));
                }
                out.push_str(&escape(&link.display_text()));
            }
        }
    }
}

/// Resolve inline tags in `input` for `target`, discarding warnings.
pub fn resolve_inline(input: &str, target: Target) -> String {
    InlineResolver::new(target).resolve(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn html(input: &str) -> String {
        resolve_inline(input, Target::Html)
    }

    fn text(input: &str) -> String {
        resolve_inline(input, Target::Text)
    }

    #[test]
    fn test_empty() {
        assert_eq!(html(""), "");
    }

    #[test]
    fn test_code() {
        assert_eq!(html("{@code text}"), "<code>text</code>");
        assert_eq!(html("{@code <A&B>}"), "<code>&lt;A&amp;B&gt;</code>");
    }

    #[test]
    fn test_code_nested_braces() {
        assert_eq!(html("{@code Map<K, {V}>}"), "<code>Map&lt;K, {V}&gt;</code>");
    }

    #[test]
    fn test_code_text_target() {
        assert_eq!(text("{@code <A&B>}"), "&lt;A&amp;B&gt;");
    }

    #[test]
    fn test_literal() {
        assert_eq!(html("{@literal text}"), "text");
        assert_eq!(html("{@literal text}  {@literal text}"), "text  text");
        assert_eq!(html("{@literal <A&B>}"), "&lt;A&amp;B&gt;");
    }

    #[test]
    fn test_link() {
        assert_eq!(html("{@link Class}"), "<code>Class</code>");
        assert_eq!(html("{@link Class#method(int)}"), "<code>Class.method()</code>");
        assert_eq!(html("{@link Class label}"), "<code>label</code>");
        assert_eq!(text("{@link Class}"), "Class");
    }

    #[test]
    fn test_link_escapes_reference() {
        assert_eq!(html("{@link List<String>}"), "<code>List&lt;String&gt;</code>");
    }

    #[test]
    fn test_linkplain() {
        assert_eq!(html("{@linkplain Class}"), "Class");
        assert_eq!(html("{@linkplain #field}"), "field");
        assert_eq!(html("{@linkplain Class#field}"), "Class.field");
        assert_eq!(html("{@linkplain #method()}"), "method()");
        assert_eq!(html("{@linkplain #method(Object arg)}"), "method()");
        assert_eq!(html("{@linkplain #method(Object, String)}"), "method()");
        assert_eq!(html("{@linkplain #method(Object, String) label}"), "label");
        assert_eq!(html("{@linkplain Class#method(Object, String)}"), "Class.method()");
        assert_eq!(html("{@linkplain Class#method(Object, String) label}"), "label");
    }

    #[test]
    fn test_linkplain_qualified_class() {
        assert_eq!(
            html("{@linkplain java.util.List#size()}"),
            "java.util.List.size()"
        );
    }

    #[test]
    fn test_value() {
        assert_eq!(html("{@value #MAX}"), "MAX");
        assert_eq!(html("{@value Limits#MAX}"), "Limits.MAX");
        assert_eq!(html("{@value}"), "");
    }

    #[test]
    fn test_value_ignores_label() {
        let mut resolver = InlineResolver::new(Target::Html);
        assert_eq!(resolver.resolve("{@value #MAX the max}"), "MAX");
        assert!(resolver.warnings()[0].contains("trailing text"));
    }

    #[test]
    fn test_multiple_tags_in_text() {
        assert_eq!(
            html("Use {@code a} or {@link B#c()} here."),
            "Use <code>a</code> or <code>B.c()</code> here."
        );
    }

    #[test]
    fn test_unknown_kind_verbatim() {
        let mut resolver = InlineResolver::new(Target::Html);
        assert_eq!(resolver.resolve("{@docRoot}/a"), "{@docRoot}/a");
        assert!(resolver.warnings()[0].contains("unknown inline tag {@docRoot}"));
    }

    #[test]
    fn test_kind_is_case_sensitive() {
        assert_eq!(html("{@Code x}"), "{@Code x}");
    }

    #[test]
    fn test_nested_known_tag_inside_unknown() {
        assert_eq!(html("{@foo {@code x}}"), "{@foo <code>x</code>}");
    }

    #[test]
    fn test_unterminated_left_as_text() {
        let mut resolver = InlineResolver::new(Target::Html);
        assert_eq!(
            resolver.resolve("a {@code b} {@code open {@literal x}"),
            "a <code>b</code> {@code open {@literal x}"
        );
        assert_eq!(resolver.warnings().len(), 1);
        assert!(resolver.warnings()[0].contains("unterminated inline tag {@code}"));
    }

    #[test]
    fn test_many_unterminated_tags_scan_linearly() {
        let input = "{@code ".repeat(40_000);
        let started = std::time::Instant::now();
        let mut resolver = InlineResolver::new(Target::Text);
        assert_eq!(resolver.resolve(&input), input);
        assert_eq!(resolver.warnings().len(), 1);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn test_multibyte_bodies() {
        assert_eq!(html("ü {@code Größe<ß>} é"), "ü <code>Größe&lt;ß&gt;</code> é");
        assert_eq!(html("{@linkplain Café#größe() Grüße}"), "Grüße");
    }

    #[test]
    fn test_not_a_tag() {
        let mut resolver = InlineResolver::new(Target::Html);
        assert_eq!(resolver.resolve("{@ x} {@}"), "{@ x} {@}");
        assert!(resolver.warnings().is_empty());
    }

    #[test]
    fn test_link_ref_parse() {
        let link = LinkRef::parse("  Class#method(Object, String)   the label ");
        assert_eq!(link.class, Some("Class"));
        assert_eq!(link.member, Some("method(Object, String)"));
        assert_eq!(link.label, Some("the label"));
    }

    #[test]
    fn test_kind_round_trip_names() {
        for kind in [
            InlineTagKind::Code,
            InlineTagKind::Literal,
            InlineTagKind::Link,
            InlineTagKind::Linkplain,
            InlineTagKind::Value,
        ] {
            assert_eq!(InlineTagKind::parse(kind.as_str()), Some(kind));
        }
    }
}
