//! Character entity table.
//!
//! Escapes the three reserved markup characters and recognizes entity
//! references already present in source text. Everything outside the
//! reserved set, including non-Latin-1 text, passes through untouched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Entity reference syntax: numeric, hexadecimal, or named.
const ENTITY_SYNTAX: &str = r"&(?:#([0-9]{1,7})|#[xX]([0-9a-fA-F]{1,6})|([A-Za-z][A-Za-z0-9]{1,31}));";

/// Regex for finding entity references anywhere in a string.
static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ENTITY_SYNTAX).expect("invalid entity regex"));

/// Regex for an entity reference at the start of a string.
static LEADING_ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^{ENTITY_SYNTAX}")).expect("invalid leading entity regex")
});

/// Escape every `&`, `<` and `>` in `text`.
///
/// Applied to raw spans whose content is literal, such as the body of
/// `{@code ...}`. Not idempotent: `&amp;` becomes `&amp;amp;`.
///
/// # Examples
///
/// ```
/// use plugdoc_markup::escape;
///
/// assert_eq!(escape("<A&B>"), "&lt;A&amp;B&gt;");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape stray reserved characters, keeping recognized entity references.
///
/// # Examples
///
/// ```
/// use plugdoc_markup::escape_stray;
///
/// assert_eq!(escape_stray("& &amp; < >"), "&amp; &amp; &lt; &gt;");
/// ```
pub fn escape_stray(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped_stray(&mut out, text);
    out
}

/// Append `text` to `out` with stray `&`, `<` and `>` escaped.
pub(crate) fn push_escaped_stray(out: &mut String, text: &str) {
    let mut rest = text;
    while let Some(pos) = rest.find(['&', '<', '>']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        let consumed = match tail.as_bytes()[0] {
            b'&' => {
                if let Some(len) = reference_len(tail) {
                    out.push_str(&tail[..len]);
                    len
                } else {
                    out.push_str("&amp;");
                    1
                }
            }
            b'<' => {
                out.push_str("&lt;");
                1
            }
            _ => {
                out.push_str("&gt;");
                1
            }
        };
        rest = &tail[consumed..];
    }
    out.push_str(rest);
}

/// Length of the recognized entity reference at the start of `text`.
fn reference_len(text: &str) -> Option<usize> {
    let caps = LEADING_ENTITY_PATTERN.captures(text)?;
    resolve(&caps).map(|_| caps[0].len())
}

/// Replace recognized entity references with the characters they stand for.
///
/// Unknown named references are left as they are.
///
/// # Examples
///
/// ```
/// use plugdoc_markup::decode;
///
/// assert_eq!(decode("&lt;A&amp;B&gt; &#169; &unknown;"), "<A&B> \u{a9} &unknown;");
/// ```
pub fn decode(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    ENTITY_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            resolve(caps).unwrap_or_else(|| Cow::Owned(caps[0].to_owned()))
        })
        .into_owned()
}

/// Resolve a matched reference to its replacement text.
fn resolve(caps: &Captures<'_>) -> Option<Cow<'static, str>> {
    if let Some(decimal) = caps.get(1) {
        return code_point(decimal.as_str().parse().ok()?);
    }
    if let Some(hex) = caps.get(2) {
        return code_point(u32::from_str_radix(hex.as_str(), 16).ok()?);
    }
    named_entity(caps.get(3)?.as_str()).map(Cow::Borrowed)
}

fn code_point(value: u32) -> Option<Cow<'static, str>> {
    char::from_u32(value)
        .filter(|c| *c != '\0')
        .map(|c| Cow::Owned(c.to_string()))
}

/// Map a named entity to its Unicode text.
#[allow(clippy::too_many_lines)]
fn named_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        // XML
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",

        // Latin-1 symbols
        "nbsp" => "\u{00a0}",
        "iexcl" => "\u{00a1}",
        "cent" => "\u{00a2}",
        "pound" => "\u{00a3}",
        "curren" => "\u{00a4}",
        "yen" => "\u{00a5}",
        "brvbar" => "\u{00a6}",
        "sect" => "\u{00a7}",
        "uml" => "\u{00a8}",
        "copy" => "\u{00a9}",
        "ordf" => "\u{00aa}",
        "laquo" => "\u{00ab}",
        "not" => "\u{00ac}",
        "shy" => "\u{00ad}",
        "reg" => "\u{00ae}",
        "macr" => "\u{00af}",
        "deg" => "\u{00b0}",
        "plusmn" => "\u{00b1}",
        "sup2" => "\u{00b2}",
        "sup3" => "\u{00b3}",
        "acute" => "\u{00b4}",
        "micro" => "\u{00b5}",
        "para" => "\u{00b6}",
        "middot" => "\u{00b7}",
        "cedil" => "\u{00b8}",
        "sup1" => "\u{00b9}",
        "ordm" => "\u{00ba}",
        "raquo" => "\u{00bb}",
        "frac14" => "\u{00bc}",
        "frac12" => "\u{00bd}",
        "frac34" => "\u{00be}",
        "iquest" => "\u{00bf}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",

        // Latin-1 letters
        "Agrave" => "\u{00c0}",
        "Aacute" => "\u{00c1}",
        "Acirc" => "\u{00c2}",
        "Atilde" => "\u{00c3}",
        "Auml" => "\u{00c4}",
        "Aring" => "\u{00c5}",
        "AElig" => "\u{00c6}",
        "Ccedil" => "\u{00c7}",
        "Egrave" => "\u{00c8}",
        "Eacute" => "\u{00c9}",
        "Ecirc" => "\u{00ca}",
        "Euml" => "\u{00cb}",
        "Igrave" => "\u{00cc}",
        "Iacute" => "\u{00cd}",
        "Icirc" => "\u{00ce}",
        "Iuml" => "\u{00cf}",
        "ETH" => "\u{00d0}",
        "Ntilde" => "\u{00d1}",
        "Ograve" => "\u{00d2}",
        "Oacute" => "\u{00d3}",
        "Ocirc" => "\u{00d4}",
        "Otilde" => "\u{00d5}",
        "Ouml" => "\u{00d6}",
        "Oslash" => "\u{00d8}",
        "Ugrave" => "\u{00d9}",
        "Uacute" => "\u{00da}",
        "Ucirc" => "\u{00db}",
        "Uuml" => "\u{00dc}",
        "Yacute" => "\u{00dd}",
        "THORN" => "\u{00de}",
        "szlig" => "\u{00df}",
        "agrave" => "\u{00e0}",
        "aacute" => "\u{00e1}",
        "acirc" => "\u{00e2}",
        "atilde" => "\u{00e3}",
        "auml" => "\u{00e4}",
        "aring" => "\u{00e5}",
        "aelig" => "\u{00e6}",
        "ccedil" => "\u{00e7}",
        "egrave" => "\u{00e8}",
        "eacute" => "\u{00e9}",
        "ecirc" => "\u{00ea}",
        "euml" => "\u{00eb}",
        "igrave" => "\u{00ec}",
        "iacute" => "\u{00ed}",
        "icirc" => "\u{00ee}",
        "iuml" => "\u{00ef}",
        "eth" => "\u{00f0}",
        "ntilde" => "\u{00f1}",
        "ograve" => "\u{00f2}",
        "oacute" => "\u{00f3}",
        "ocirc" => "\u{00f4}",
        "otilde" => "\u{00f5}",
        "ouml" => "\u{00f6}",
        "oslash" => "\u{00f8}",
        "ugrave" => "\u{00f9}",
        "uacute" => "\u{00fa}",
        "ucirc" => "\u{00fb}",
        "uuml" => "\u{00fc}",
        "yacute" => "\u{00fd}",
        "thorn" => "\u{00fe}",
        "yuml" => "\u{00ff}",

        // Spacing and punctuation
        "ensp" => "\u{2002}",
        "emsp" => "\u{2003}",
        "thinsp" => "\u{2009}",
        "zwnj" => "\u{200c}",
        "zwj" => "\u{200d}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "sbquo" => "\u{201a}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bdquo" => "\u{201e}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "permil" => "\u{2030}",
        "prime" => "\u{2032}",
        "Prime" => "\u{2033}",
        "lsaquo" => "\u{2039}",
        "rsaquo" => "\u{203a}",
        "euro" => "\u{20ac}",
        "trade" => "\u{2122}",

        // Arrows
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "rarr" => "\u{2192}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",

        // Math
        "minus" => "\u{2212}",
        "infin" => "\u{221e}",
        "ne" => "\u{2260}",
        "le" => "\u{2264}",
        "ge" => "\u{2265}",

        _ => return None,
    })
}
