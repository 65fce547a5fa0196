//! Markup tokens and the tag tokenizer.
//!
//! Documentation text is near-HTML: loose fragments with the occasional
//! unclosed element. The tokenizer only recognizes what it needs to balance
//! and flatten tags; anything that does not look like a tag is text.

use crate::inline::InlineTagKind;

/// Elements that never take a body or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "embed", "frame", "hr", "img", "input", "isindex",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Check whether `name` is a void element (ASCII case-insensitive).
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// A start, end, or self-closing tag as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Element name as written.
    pub name: &'a str,
    /// Everything between the name and the closing `>` (or `/>`), verbatim.
    pub attrs: &'a str,
    /// The whole tag as written.
    pub raw: &'a str,
}

impl Tag<'_> {
    /// Compare the element name, ignoring ASCII case.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Whether this is a void element.
    pub fn is_void(&self) -> bool {
        is_void_element(self.name)
    }
}

/// A single lexical unit of documentation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Plain text run.
    Text(&'a str),
    /// `<name attrs>`
    OpenTag(Tag<'a>),
    /// `</name>`
    CloseTag(Tag<'a>),
    /// `<name attrs/>`
    SelfClosingTag(Tag<'a>),
    /// `<!-- ... -->`, `<!DOCTYPE ...>` or `<?...?>`.
    Comment(&'a str),
    /// `{@kind body}`
    InlineDocTag {
        kind: InlineTagKind,
        body: &'a str,
        raw: &'a str,
    },
}

impl<'a> Token<'a> {
    /// Source text this token was scanned from.
    pub fn raw(&self) -> &'a str {
        match *self {
            Token::Text(raw) | Token::Comment(raw) | Token::InlineDocTag { raw, .. } => raw,
            Token::OpenTag(tag) | Token::CloseTag(tag) | Token::SelfClosingTag(tag) => tag.raw,
        }
    }
}

/// Splits markup into text, tag and comment tokens.
///
/// Scanning is linear in the input length. A start tag that runs off the end
/// of input (an unclosed quoted value, say) ends markup recognition: the rest
/// of the input is text.
///
/// # Example
///
/// ```
/// use plugdoc_markup::{Token, Tokenizer};
///
/// let tokens: Vec<_> = Tokenizer::new("a <b>c</b>").collect();
/// assert_eq!(tokens.len(), 4);
/// assert!(matches!(tokens[1], Token::OpenTag(tag) if tag.is("b")));
/// ```
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Offset of the last `>`; every form of markup ends in one.
    last_gt: Option<usize>,
    /// Offset of the last `-->`.
    last_comment_end: Option<usize>,
    /// Set once a start tag ran off the end of input.
    exhausted: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over `input`.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            last_gt: input.rfind('>'),
            last_comment_end: input.rfind("-->"),
            exhausted: false,
        }
    }

    /// Try to scan a tag, comment, or declaration at byte offset `at`.
    ///
    /// Returns the token and its byte length.
    fn markup_at(&mut self, at: usize) -> Option<(Token<'a>, usize)> {
        let input = self.input;
        let s = &input[at..];
        let bytes = s.as_bytes();
        if self.exhausted || bytes.first() != Some(&b'<') {
            return None;
        }
        if self.last_gt.is_none_or(|gt| gt < at) {
            return None;
        }

        match *bytes.get(1)? {
            b'!' if s.starts_with("<!--") => {
                if self.last_comment_end.is_none_or(|end| end < at + 4) {
                    return None;
                }
                let end = s[4..].find("-->")? + 4 + 3;
                Some((Token::Comment(&s[..end]), end))
            }
            b'!' | b'?' => {
                let next = *bytes.get(2)?;
                if !(next.is_ascii_alphabetic() || next == b'[') {
                    return None;
                }
                let end = s.find('>')? + 1;
                Some((Token::Comment(&s[..end]), end))
            }
            b'/' => {
                let name_len = name_len(&s[2..]);
                if name_len == 0 {
                    return None;
                }
                let name = &s[2..2 + name_len];
                let after = &s[2 + name_len..];
                let trimmed = after.trim_start_matches(|c: char| c.is_ascii_whitespace());
                if !trimmed.starts_with('>') {
                    return None;
                }
                let end = s.len() - trimmed.len() + 1;
                let tag = Tag {
                    name,
                    attrs: "",
                    raw: &s[..end],
                };
                Some((Token::CloseTag(tag), end))
            }
            c if c.is_ascii_alphabetic() => {
                let name_len = name_len(&s[1..]);
                let name = &s[1..=name_len];
                let after_name = 1 + name_len;
                match *bytes.get(after_name)? {
                    b'>' | b'/' => {}
                    c if c.is_ascii_whitespace() => {}
                    _ => return None,
                }
                let gt = match find_tag_end(s, after_name) {
                    TagEnd::Found(gt) => gt,
                    TagEnd::Interrupted => return None,
                    TagEnd::Exhausted => {
                        self.exhausted = true;
                        return None;
                    }
                };
                let inner = &s[after_name..gt];
                let end = gt + 1;
                let raw = &s[..end];
                if let Some(attrs) = inner.strip_suffix('/') {
                    Some((Token::SelfClosingTag(Tag { name, attrs, raw }), end))
                } else {
                    Some((
                        Token::OpenTag(Tag {
                            name,
                            attrs: inner,
                            raw,
                        }),
                        end,
                    ))
                }
            }
            _ => None,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let input = self.input;
        let start = self.pos;
        let rest = &input[start..];
        if rest.is_empty() {
            return None;
        }

        if let Some((token, len)) = self.markup_at(start) {
            self.pos += len;
            return Some(token);
        }

        // Text runs up to the next '<' that starts real markup
        let mut end = rest.len();
        let mut search = rest.chars().next().map_or(1, char::len_utf8);
        while let Some(offset) = rest[search..].find('<') {
            let candidate = search + offset;
            if self.markup_at(start + candidate).is_some() {
                end = candidate;
                break;
            }
            search = candidate + 1;
        }

        self.pos += end;
        Some(Token::Text(&rest[..end]))
    }
}

/// Length of the element name at the start of `s`.
fn name_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c.is_ascii_alphabetic() => {}
        _ => return 0,
    }
    chars
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')))
        .map_or(s.len(), |(i, _)| i)
}

/// Outcome of scanning for the end of a start tag.
enum TagEnd {
    /// Offset of the closing `>`.
    Found(usize),
    /// An unquoted `<` came first.
    Interrupted,
    /// Input ended first.
    Exhausted,
}

/// Find the `>` closing a start tag, skipping quoted attribute values.
fn find_tag_end(s: &str, from: usize) -> TagEnd {
    let bytes = s.as_bytes();
    let mut quote: Option<u8> = None;
    let mut after_equals = false;

    for (i, &b) in bytes.iter().enumerate().skip(from) {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            continue;
        }
        match b {
            b'>' => return TagEnd::Found(i),
            b'<' => return TagEnd::Interrupted,
            b'"' | b'\'' if after_equals => quote = Some(b),
            b'=' => {
                after_equals = true;
                continue;
            }
            _ => {}
        }
        if !b.is_ascii_whitespace() {
            after_equals = false;
        }
    }
    TagEnd::Exhausted
}
