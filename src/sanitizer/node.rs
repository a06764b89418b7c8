//! Owned markup tree and its bridge to the HTML parser.
//!
//! Parsing is delegated to `scraper` (html5ever), which recovers from any
//! malformed input. The parsed `ego_tree` is copied into [`MarkupNode`]s so
//! that sanitization works on plain owned values.

use ego_tree::NodeRef;
use scraper::{Html, node::Node};

/// A node of parsed markup: either text or an element with ordered
/// attributes and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupNode {
    /// Character data, unescaped.
    Text(String),
    /// An element. `tag` and attribute names are lowercase as produced by
    /// the parser.
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    },
}

impl MarkupNode {
    /// Convenience constructor for a text node.
    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text(content.into())
    }

    /// Convenience constructor for an element node.
    pub fn element(
        tag: impl Into<String>,
        attributes: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    ) -> Self {
        MarkupNode::Element {
            tag: tag.into(),
            attributes,
            children,
        }
    }

    /// All descendant text concatenated in document order, tags discarded.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Value of the named attribute, if this is an element carrying it.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            MarkupNode::Text(_) => None,
            MarkupNode::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
        }
    }
}

/// HTML5 void elements that must not have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Parse `markup` as a body fragment and return its top-level nodes.
///
/// Comments, doctypes and processing instructions are dropped. Elements
/// nested deeper than `max_depth` are replaced by their flattened text.
pub fn parse_fragment(markup: &str, max_depth: usize) -> Vec<MarkupNode> {
    let document = Html::parse_fragment(markup);

    // The parser wraps fragment content in a synthetic <html> element.
    let Some(container) = document
        .tree
        .root()
        .children()
        .find(|child| child.value().is_element())
    else {
        return Vec::new();
    };

    container
        .children()
        .filter_map(|child| convert(child, 1, max_depth))
        .collect()
}

fn convert(node: NodeRef<'_, Node>, depth: usize, max_depth: usize) -> Option<MarkupNode> {
    match node.value() {
        Node::Text(text) => Some(MarkupNode::Text((**text).to_owned())),
        Node::Element(el) => {
            if depth > max_depth {
                tracing::warn!(
                    "Nesting deeper than {max_depth} flattened at <{}>",
                    el.name()
                );
                return Some(MarkupNode::Text(flatten(node)));
            }

            let attributes = el
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            let children = node
                .children()
                .filter_map(|child| convert(child, depth + 1, max_depth))
                .collect();

            Some(MarkupNode::Element {
                tag: el.name().to_string(),
                attributes,
                children,
            })
        }
        _ => None,
    }
}

/// Text of every descendant, walked iteratively so depth is irrelevant.
fn flatten(node: NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    for descendant in node.descendants() {
        if let Node::Text(text) = descendant.value() {
            out.push_str(text);
        }
    }
    out
}

/// Serialize a sequence of nodes back to HTML.
pub fn serialize(nodes: &[MarkupNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        serialize_node(node, &mut out);
    }
    out
}

fn serialize_node(node: &MarkupNode, out: &mut String) {
    match node {
        MarkupNode::Text(text) => escape_text(text, out),
        MarkupNode::Element {
            tag,
            attributes,
            children,
        } => {
            out.push('<');
            out.push_str(tag);
            for (k, v) in attributes {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                escape_attr(v, out);
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }

            let start = out.len();
            for child in children {
                serialize_node(child, out);
            }
            // The parser drops one newline right after <pre>.
            if tag == "pre" && out[start..].starts_with('\n') {
                out.insert(start, '\n');
            }

            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
