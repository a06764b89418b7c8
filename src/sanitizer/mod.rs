//! Markup and text sanitizers.
//!
//! - [`HtmlSanitizer`] -- rebuilds markup from allowlisted tags and
//!   attributes.
//! - [`StyleFilter`] -- keeps allowlisted declarations of a `style` value.
//! - [`TextFilter`] -- strips markup delimiters and script vectors from
//!   plain text.

mod html;
pub mod node;
mod style;
mod text;

pub use html::HtmlSanitizer;
pub use node::MarkupNode;
pub use style::StyleFilter;
pub use text::{DEFAULT_MAX_TEXT_LEN, TextFilter};

/// Trait for content sanitizers.
///
/// Each sanitizer receives untrusted input and returns a cleaned version.
/// Implementations must be `Send + Sync` so one instance can be shared
/// across threads.
pub trait Sanitizer: Send + Sync {
    /// Transform the given input, returning the sanitized result.
    fn sanitize(&self, input: &str) -> String;
}
