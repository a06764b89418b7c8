//! # html_guard
//!
//! Allowlist-based sanitization of untrusted rich text, plus plain-text
//! filtering and record validation built on top of it.
//!
//! ## Overview
//!
//! [`HtmlSanitizer`] parses markup, rebuilds it from a small set of
//! presentational tags (paragraphs, emphasis, lists, headings, inline
//! styling) and serializes it again. Disallowed elements degrade to their
//! text; disallowed attributes vanish; `style` values are filtered per
//! declaration by [`StyleFilter`]. [`TextFilter`] cleans plain free-text
//! fields, and [`FieldValidator`] checks a [`PatientRecord`] using both.
//!
//! Every operation is synchronous and pure. The default allowlists are
//! immutable statics, so one sanitizer can be shared freely across threads.
//!
//! ## Quick start
//!
//! ```rust
//! use html_guard::{filter_text, sanitize};
//!
//! let html = sanitize(r#"<p onclick="steal()">Hi <script>alert(1)</script></p>"#);
//! assert_eq!(html, "<p>Hi alert(1)</p>");
//!
//! assert_eq!(filter_text("  <b>Ana</b>  "), "bAna/b");
//! ```
//!
//! Custom allowlists are built with [`PolicyBuilder`].

pub mod config;
pub mod error;
pub mod policy;
pub mod record;
pub mod sanitizer;
pub mod validator;

pub use config::PolicyBuilder;
pub use error::{HtmlGuardError, Result};
pub use policy::Policy;
pub use record::{Field, PatientRecord};
pub use sanitizer::{HtmlSanitizer, MarkupNode, Sanitizer, StyleFilter, TextFilter};
pub use validator::{FieldValidator, ValidationError, ValidationResult};

use std::sync::LazyLock;

// Shared default instances behind the free functions.
static VALIDATOR: LazyLock<FieldValidator> = LazyLock::new(FieldValidator::default);
static HTML: LazyLock<HtmlSanitizer> = LazyLock::new(HtmlSanitizer::default);
static TEXT: LazyLock<TextFilter> = LazyLock::new(TextFilter::default);

/// Sanitize markup with the default policy.
///
/// Empty or whitespace-only input yields an empty string.
pub fn sanitize(markup: &str) -> String {
    HTML.sanitize(markup)
}

/// Filter a `style` value with the default property allowlist.
///
/// Returns `None` when nothing safe remains.
pub fn filter_style(raw: &str) -> Option<String> {
    HTML.policy().style_filter().filter(raw)
}

/// Filter plain text with the default 1000-character bound.
pub fn filter_text(raw: &str) -> String {
    TEXT.filter(raw)
}

/// Validate a record with the default sanitizers.
pub fn validate(record: &PatientRecord) -> ValidationResult {
    VALIDATOR.validate(record)
}
