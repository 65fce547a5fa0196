//! Conversion pipeline: inline tags first, then balancing or flattening.

use crate::balance::Balancer;
use crate::flatten::flatten;
use crate::inline::{InlineResolver, Target};

/// Converts documentation comments to HTML or plain text.
///
/// Conversion never fails: absent or empty input yields an empty string, and
/// malformed markup is repaired on a best-effort basis. With diagnostics
/// enabled the repairs are recorded as warnings; they never change output.
///
/// # Example
///
/// ```
/// use plugdoc_markup::Converter;
///
/// let mut converter = Converter::new().with_diagnostics();
/// let html = converter.html(Some("Uses {@code Map} <b>and more"));
/// assert_eq!(html, "Uses <code>Map</code> <b>and more</b>");
/// assert_eq!(converter.warnings().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Converter {
    diagnostics: bool,
    warnings: Vec<String>,
}

impl Converter {
    /// Create a converter that discards diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep diagnostics for [`warnings`](Self::warnings).
    #[must_use]
    pub fn with_diagnostics(mut self) -> Self {
        self.diagnostics = true;
        self
    }

    /// Convert to well-formed HTML.
    pub fn html(&mut self, doc: Option<&str>) -> String {
        let Some(doc) = doc.filter(|d| !d.is_empty()) else {
            return String::new();
        };

        let mut resolver = InlineResolver::new(Target::Html);
        let resolved = resolver.resolve(doc);
        let mut balancer = Balancer::new();
        let html = balancer.balance(&resolved);

        self.collect(resolver.into_warnings());
        self.collect(balancer.into_warnings());
        html
    }

    /// Convert to plain text.
    pub fn text(&mut self, doc: Option<&str>) -> String {
        let Some(doc) = doc.filter(|d| !d.is_empty()) else {
            return String::new();
        };

        let mut resolver = InlineResolver::new(Target::Text);
        let resolved = resolver.resolve(doc);
        let text = flatten(&resolved);

        self.collect(resolver.into_warnings());
        text
    }

    /// Diagnostics from every conversion so far (empty unless enabled).
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Take the collected diagnostics, leaving the converter empty.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn collect(&mut self, warnings: Vec<String>) {
        for warning in &warnings {
            tracing::debug!(warning = %warning, "Markup repaired");
        }
        if self.diagnostics {
            self.warnings.extend(warnings);
        }
    }
}

/// Convert a documentation comment to well-formed HTML.
///
/// # Examples
///
/// ```
/// use plugdoc_markup::to_html;
///
/// assert_eq!(to_html(None), "");
/// assert_eq!(to_html(Some("Line1<br>Line2")), "Line1<br/>Line2");
/// ```
pub fn to_html(doc: Option<&str>) -> String {
    Converter::new().html(doc)
}

/// Convert a documentation comment to plain text.
///
/// # Examples
///
/// ```
/// use plugdoc_markup::to_text;
///
/// assert_eq!(
///     to_text(Some("Generates {@code something} for the project.")),
///     "Generates something for the project."
/// );
/// ```
pub fn to_text(doc: Option<&str>) -> String {
    Converter::new().text(doc)
}
