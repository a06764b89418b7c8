//! Builder for custom sanitization policies.

use crate::error::{HtmlGuardError, Result};
use crate::policy::{
    ALLOWED_ATTRIBUTES, ALLOWED_STYLE_PROPERTIES, ALLOWED_TAGS, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT,
    Policy,
};
use crate::sanitizer::StyleFilter;

/// Tags whose content is raw text, script or foreign markup.
const UNSAFE_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "template", "noscript", "textarea", "title",
    "xmp", "plaintext", "noembed", "noframes", "svg", "math",
];

/// Attributes whose values are URLs or documents; they are copied verbatim
/// so they can never be allowed.
const URL_ATTRIBUTES: &[&str] = &[
    "href", "src", "srcset", "srcdoc", "action", "formaction", "poster", "background", "data",
    "codebase", "ping",
];

/// Builder for a [`Policy`].
///
/// Starts from the default allowlists and lets callers widen or narrow
/// them. [`build`](Self::build) refuses entries that would let script
/// through.
///
/// # Example
///
/// ```
/// use html_guard::{HtmlSanitizer, PolicyBuilder};
///
/// let policy = PolicyBuilder::new()
///     .deny_tag("div")
///     .allow_style_properties(["border"])
///     .case_insensitive_style_checks(true)
///     .build()
///     .unwrap();
/// let sanitizer = HtmlSanitizer::new(policy);
/// assert_eq!(sanitizer.sanitize("<div>x</div>"), "x");
/// ```
#[derive(Clone, Debug)]
pub struct PolicyBuilder {
    tags: Vec<String>,
    attributes: Vec<String>,
    style_properties: Vec<String>,
    case_insensitive_style: bool,
    max_depth: usize,
}

impl PolicyBuilder {
    /// Create a builder holding the default allowlists.
    ///
    /// Defaults: the tags of [`ALLOWED_TAGS`], attributes `class`, `style`,
    /// `id`, the properties of [`ALLOWED_STYLE_PROPERTIES`], case-sensitive
    /// script-vector checks, max depth [`DEFAULT_MAX_DEPTH`].
    pub fn new() -> Self {
        Self {
            tags: to_owned(ALLOWED_TAGS),
            attributes: to_owned(ALLOWED_ATTRIBUTES),
            style_properties: to_owned(ALLOWED_STYLE_PROPERTIES),
            case_insensitive_style: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a builder with every allowlist empty.
    pub fn empty() -> Self {
        Self {
            tags: Vec::new(),
            attributes: Vec::new(),
            style_properties: Vec::new(),
            case_insensitive_style: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Allow additional tags.
    pub fn allow_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_unique(&mut self.tags, tags);
        self
    }

    /// Remove a tag from the allowlist.
    pub fn deny_tag(mut self, tag: &str) -> Self {
        self.tags.retain(|t| t != tag);
        self
    }

    /// Allow additional attributes. New names are emitted after existing
    /// ones.
    pub fn allow_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_unique(&mut self.attributes, attributes);
        self
    }

    /// Remove an attribute from the allowlist.
    pub fn deny_attribute(mut self, attribute: &str) -> Self {
        self.attributes.retain(|a| a != attribute);
        self
    }

    /// Allow additional CSS properties inside `style`.
    pub fn allow_style_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_unique(&mut self.style_properties, properties);
        self
    }

    /// Remove a CSS property from the allowlist.
    pub fn deny_style_property(mut self, property: &str) -> Self {
        self.style_properties.retain(|p| p != property);
        self
    }

    /// Match `javascript:` / `expression(` in style values regardless of
    /// ASCII case.
    pub fn case_insensitive_style_checks(mut self, enabled: bool) -> Self {
        self.case_insensitive_style = enabled;
        self
    }

    /// Maximum element nesting kept as structure; deeper elements are
    /// flattened to text. Must be within `1..=`[`MAX_DEPTH_LIMIT`].
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Validate the allowlists and produce an immutable [`Policy`].
    pub fn build(self) -> Result<Policy> {
        if self.max_depth == 0 {
            return Err(HtmlGuardError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(HtmlGuardError::Config(format!(
                "max_depth must be at most {MAX_DEPTH_LIMIT}"
            )));
        }

        for tag in &self.tags {
            check_name(tag)?;
            if UNSAFE_TAGS.contains(&tag.as_str()) {
                return Err(HtmlGuardError::UnsafeTag(tag.clone()));
            }
        }
        for attribute in &self.attributes {
            check_name(attribute)?;
            if attribute.starts_with("on") || URL_ATTRIBUTES.contains(&attribute.as_str()) {
                return Err(HtmlGuardError::UnsafeAttribute(attribute.clone()));
            }
        }
        for property in &self.style_properties {
            check_name(property)?;
        }

        Ok(Policy {
            tags: self.tags.into_iter().collect(),
            attributes: self.attributes,
            style: StyleFilter::new(self.style_properties)
                .case_insensitive(self.case_insensitive_style),
            max_depth: self.max_depth,
        })
    }
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn push_unique<I, S>(list: &mut Vec<String>, names: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for name in names {
        let name = name.into();
        if !list.contains(&name) {
            list.push(name);
        }
    }
}

/// Names must be non-empty lowercase ASCII alphanumerics and hyphens.
fn check_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(HtmlGuardError::InvalidName(name.to_string()))
    }
}
