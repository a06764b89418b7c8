//! Filter for plain free-text fields.

use std::sync::LazyLock;

use regex::Regex;

use super::Sanitizer;

/// Default maximum length of filtered text, in characters.
pub const DEFAULT_MAX_TEXT_LEN: usize = 1000;

static JAVASCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)javascript:").expect("invalid regex pattern"));

// `on` + ASCII alphanumerics + `=`, e.g. `onclick=` or `ONMouseOver=`.
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)on[a-z0-9]+=").expect("invalid regex pattern"));

/// Strips markup delimiters and script vectors from plain text and bounds
/// its length.
///
/// Steps, in order: trim surrounding whitespace, drop every `<` and `>`,
/// drop every `javascript:` and every `on<name>=` (ASCII case-insensitive),
/// then truncate to the maximum length counted in characters. Removal is a
/// single pass.
///
/// # Example
///
/// ```
/// use html_guard::TextFilter;
///
/// let filter = TextFilter::new();
/// assert_eq!(filter.filter("  <b>Hi</b> onclick=x  "), "bHi/b x");
/// ```
#[derive(Clone, Debug)]
pub struct TextFilter {
    max_len: usize,
}

impl TextFilter {
    /// Create a filter with the default length bound.
    pub fn new() -> Self {
        Self {
            max_len: DEFAULT_MAX_TEXT_LEN,
        }
    }

    /// Create a filter truncating to `max_len` characters.
    pub fn with_max_len(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Filter the given text.
    pub fn filter(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let stripped: String = trimmed.chars().filter(|c| !matches!(c, '<' | '>')).collect();
        let stripped = JAVASCRIPT_SCHEME.replace_all(&stripped, "");
        let stripped = EVENT_HANDLER.replace_all(&stripped, "");

        if stripped.chars().count() > self.max_len {
            stripped.chars().take(self.max_len).collect()
        } else {
            stripped.into_owned()
        }
    }
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for TextFilter {
    fn sanitize(&self, input: &str) -> String {
        self.filter(input)
    }
}
