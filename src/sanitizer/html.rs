//! Allowlist-based rewrite of a parsed markup tree.

use super::Sanitizer;
use super::node::{self, MarkupNode};
use crate::policy::Policy;

/// Sanitizer that rebuilds markup from allowlisted tags and attributes.
///
/// Disallowed elements are not dropped: they degrade to a text node holding
/// their flattened text, so `<script>alert(1)</script>` becomes the plain
/// text `alert(1)`. Attributes outside the policy are removed without
/// inspection, and `style` values pass through the policy's
/// [`StyleFilter`](crate::StyleFilter).
///
/// Sanitization never fails and is idempotent.
///
/// # Example
///
/// ```
/// use html_guard::HtmlSanitizer;
///
/// let sanitizer = HtmlSanitizer::default();
/// assert_eq!(sanitizer.sanitize(r#"<p onclick="evil()">hi</p>"#), "<p>hi</p>");
/// ```
#[derive(Clone, Debug, Default)]
pub struct HtmlSanitizer {
    policy: Policy,
}

impl HtmlSanitizer {
    /// Create a sanitizer enforcing `policy`.
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// The policy this sanitizer enforces.
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Parse, filter and re-serialize `markup`.
    pub fn sanitize(&self, markup: &str) -> String {
        if markup.trim().is_empty() {
            return String::new();
        }
        let nodes = node::parse_fragment(markup, self.policy.max_depth());
        let html = node::serialize(&self.filter_nodes(&nodes));
        // Whitespace-only output would itself sanitize to "".
        if html.trim().is_empty() {
            return String::new();
        }
        html
    }

    /// Returns `true` if sanitizing `markup` would leave it byte-for-byte
    /// unchanged.
    pub fn is_safe(&self, markup: &str) -> bool {
        self.sanitize(markup) == markup
    }

    /// Filter each top-level node independently, keeping order.
    pub fn filter_nodes(&self, nodes: &[MarkupNode]) -> Vec<MarkupNode> {
        nodes.iter().filter_map(|n| self.filter(n)).collect()
    }

    /// Produce the sanitized counterpart of `node`. The input is left
    /// untouched.
    pub fn filter(&self, node: &MarkupNode) -> Option<MarkupNode> {
        match node {
            MarkupNode::Text(text) => Some(MarkupNode::Text(text.clone())),
            MarkupNode::Element { tag, .. } if !self.policy.allows_tag(tag) => {
                tracing::debug!("Degrading <{tag}> to text");
                Some(MarkupNode::Text(node.text_content()))
            }
            MarkupNode::Element {
                tag,
                attributes,
                children,
            } => Some(MarkupNode::Element {
                tag: tag.clone(),
                attributes: self.filter_attributes(tag, attributes),
                children: self.filter_nodes(children),
            }),
        }
    }

    fn filter_attributes(
        &self,
        tag: &str,
        attributes: &[(String, String)],
    ) -> Vec<(String, String)> {
        if tracing::enabled!(tracing::Level::TRACE) {
            for (name, _) in attributes {
                if !self.policy.attributes().any(|allowed| allowed == name) {
                    tracing::trace!("Dropping attribute {name} on <{tag}>");
                }
            }
        }

        let mut kept = Vec::new();
        for name in self.policy.attributes() {
            let Some((_, value)) = attributes.iter().find(|(k, _)| k == name) else {
                continue;
            };
            if name == "style" {
                if let Some(style) = self.policy.style_filter().filter(value) {
                    kept.push((name.to_string(), style));
                }
            } else {
                kept.push((name.to_string(), value.clone()));
            }
        }
        kept
    }
}

impl Sanitizer for HtmlSanitizer {
    fn sanitize(&self, input: &str) -> String {
        HtmlSanitizer::sanitize(self, input)
    }
}
