//! Declaration-level filter for `style` attribute values.

use std::collections::HashSet;

use crate::policy::ALLOWED_STYLE_PROPERTIES;

/// Substrings that reject a declaration value outright.
const SCRIPT_VECTORS: &[&str] = &["javascript:", "expression("];

/// Filter that keeps only allowlisted `property: value` declarations.
///
/// Input is treated as a flat declaration list split on `;`, each
/// declaration split on its first `:`. Property names are compared exactly
/// as written (after trimming). Values containing `javascript:` or
/// `expression(` are rejected; that match is case-sensitive unless
/// [`case_insensitive`](Self::case_insensitive) is enabled.
///
/// # Example
///
/// ```
/// use html_guard::StyleFilter;
///
/// let filter = StyleFilter::default();
/// assert_eq!(
///     filter.filter("color:red; position:absolute"),
///     Some("color: red".to_string()),
/// );
/// assert_eq!(filter.filter("position:absolute"), None);
/// ```
#[derive(Clone, Debug)]
pub struct StyleFilter {
    properties: HashSet<String>,
    case_insensitive: bool,
}

impl StyleFilter {
    /// Create a filter allowing the given property names.
    pub fn new<I, S>(properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            properties: properties.into_iter().map(Into::into).collect(),
            case_insensitive: false,
        }
    }

    /// Match script vectors regardless of ASCII case.
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// Returns `true` if declarations for `property` may be kept.
    pub fn allows_property(&self, property: &str) -> bool {
        self.properties.contains(property)
    }

    /// Filter a raw style string.
    ///
    /// Returns `None` when no declaration survives, so the caller can omit
    /// the attribute instead of emitting `style=""`.
    pub fn filter(&self, raw: &str) -> Option<String> {
        let kept: Vec<String> = raw
            .split(';')
            .filter_map(|declaration| self.filter_declaration(declaration))
            .collect();

        if kept.is_empty() {
            None
        } else {
            Some(kept.join("; "))
        }
    }

    fn filter_declaration(&self, declaration: &str) -> Option<String> {
        let (property, value) = declaration.split_once(':')?;
        let (property, value) = (property.trim(), value.trim());

        if property.is_empty() || value.is_empty() {
            return None;
        }
        if !self.allows_property(property) {
            tracing::trace!("Dropping style property {property}");
            return None;
        }
        if self.carries_script(value) {
            tracing::trace!("Dropping style {property} with script vector in value");
            return None;
        }

        Some(format!("{property}: {value}"))
    }

    fn carries_script(&self, value: &str) -> bool {
        if self.case_insensitive {
            let lower = value.to_ascii_lowercase();
            SCRIPT_VECTORS.iter().any(|v| lower.contains(v))
        } else {
            SCRIPT_VECTORS.iter().any(|v| value.contains(v))
        }
    }
}

impl Default for StyleFilter {
    fn default() -> Self {
        Self::new(ALLOWED_STYLE_PROPERTIES.iter().copied())
    }
}
