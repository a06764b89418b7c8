//! The allowlists that decide what survives sanitization.
//!
//! The defaults are process-wide constants. A [`Policy`] built from them (or
//! from a [`PolicyBuilder`](crate::PolicyBuilder)) is immutable and can be
//! shared across threads without synchronization.

use std::collections::HashSet;

use crate::sanitizer::StyleFilter;

/// Tags that pass through structurally. Everything else degrades to text.
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "b", "em", "i", "u", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol",
    "li", "div", "span", "blockquote", "pre", "code",
];

/// Attributes kept on allowed elements, in the order they are emitted.
pub const ALLOWED_ATTRIBUTES: &[&str] = &["class", "style", "id"];

/// CSS properties kept inside a `style` attribute.
pub const ALLOWED_STYLE_PROPERTIES: &[&str] = &[
    "color",
    "background-color",
    "font-weight",
    "font-style",
    "text-decoration",
    "text-align",
    "margin",
    "padding",
    "font-size",
    "line-height",
];

/// Elements nested deeper than this are flattened to text while parsing.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Largest nesting bound a custom policy may set; every pass over the tree
/// recurses once per level.
pub const MAX_DEPTH_LIMIT: usize = DEFAULT_MAX_DEPTH * 4;

/// An immutable tag / attribute / style allowlist.
///
/// `class` and `id` values are copied verbatim; only `style` values are
/// inspected.
#[derive(Clone, Debug)]
pub struct Policy {
    pub(crate) tags: HashSet<String>,
    pub(crate) attributes: Vec<String>,
    pub(crate) style: StyleFilter,
    pub(crate) max_depth: usize,
}

impl Policy {
    /// Returns `true` if elements named `tag` are kept as elements.
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Allowed attribute names, in emission order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    /// The filter applied to `style` attribute values.
    pub fn style_filter(&self) -> &StyleFilter {
        &self.style
    }

    /// Maximum element nesting kept as structure.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            tags: ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
            attributes: ALLOWED_ATTRIBUTES.iter().map(|a| a.to_string()).collect(),
            style: StyleFilter::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
