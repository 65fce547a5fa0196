//! Documentation comment markup conversion.
//!
//! Documentation comments mix loose HTML fragments with inline tags such as
//! `{@code ...}` and `{@link ...}`. This crate rewrites them into either
//! well-formed HTML for generated documentation or flattened plain text for
//! summaries and tooltips.
//!
//! # Architecture
//!
//! Each stage is an independent pass over a string:
//! - [`InlineResolver`]: rewrites inline tags for a [`Target`]
//! - [`Balancer`]: closes unclosed elements and escapes stray characters
//! - [`flatten`]: strips markup down to text
//!
//! [`Converter`] (and the [`to_html`] / [`to_text`] shortcuts) runs inline
//! resolution first, then balancing or flattening. All passes are pure and
//! never fail; repairs can optionally be collected as warnings.
//!
//! # Example
//!
//! ```
//! use plugdoc_markup::{to_html, to_text};
//!
//! let doc = "Generates <i>something</i> <b> for {@link Project#build(Context)}.";
//! assert_eq!(
//!     to_html(Some(doc)),
//!     "Generates <i>something</i> <b> for <code>Project.build()</code>.</b>"
//! );
//! assert_eq!(to_text(Some(doc)), "Generates something  for Project.build().");
//! ```

mod balance;
mod entities;
mod flatten;
mod inline;
mod pipeline;
mod token;

pub use balance::{Balancer, balance};
pub use entities::{decode, escape, escape_stray};
pub use flatten::flatten;
pub use inline::{InlineResolver, InlineTagKind, InlineTokenizer, LinkRef, Target, resolve_inline};
pub use pipeline::{Converter, to_html, to_text};
pub use token::{Tag, Token, Tokenizer, VOID_ELEMENTS, is_void_element};
