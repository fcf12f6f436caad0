//! Input element tree produced by an HTML parser.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Kind of an input node, keyed by HTML element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// `#text`
    Text,
    /// `h1`..`h6`
    Heading(u8),
    /// `p`
    Paragraph,
    /// `strong`, `b`
    Bold,
    /// `em`, `i`
    Italic,
    /// `pre`
    Preformatted,
    /// `span`
    Span,
    /// `code`
    Code,
    /// `blockquote`
    Blockquote,
    /// `a`
    Link,
    /// `ul` / `ol`
    List {
        /// `ol` when true
        ordered: bool,
    },
    /// `li`
    ListItem,
    /// `hr`
    Rule,
    /// `table`
    Table,
    /// `thead`
    TableHead,
    /// `tbody`
    TableBody,
    /// `tr`
    TableRow,
    /// `th`
    TableHeaderCell,
    /// `td`
    TableCell,
    /// `img`
    Image,
    /// Any other element; produces no output.
    Other(String),
}

impl NodeKind {
    /// Map an element name to a kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "#text" => NodeKind::Text,
            "h1" => NodeKind::Heading(1),
            "h2" => NodeKind::Heading(2),
            "h3" => NodeKind::Heading(3),
            "h4" => NodeKind::Heading(4),
            "h5" => NodeKind::Heading(5),
            "h6" => NodeKind::Heading(6),
            "p" => NodeKind::Paragraph,
            "strong" | "b" => NodeKind::Bold,
            "em" | "i" => NodeKind::Italic,
            "pre" => NodeKind::Preformatted,
            "span" => NodeKind::Span,
            "code" => NodeKind::Code,
            "blockquote" => NodeKind::Blockquote,
            "a" => NodeKind::Link,
            "ul" => NodeKind::List { ordered: false },
            "ol" => NodeKind::List { ordered: true },
            "li" => NodeKind::ListItem,
            "hr" => NodeKind::Rule,
            "table" => NodeKind::Table,
            "thead" => NodeKind::TableHead,
            "tbody" => NodeKind::TableBody,
            "tr" => NodeKind::TableRow,
            "th" => NodeKind::TableHeaderCell,
            "td" => NodeKind::TableCell,
            "img" => NodeKind::Image,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Canonical element name.
    pub fn tag(&self) -> &str {
        match self {
            NodeKind::Text => "#text",
            NodeKind::Heading(1) => "h1",
            NodeKind::Heading(2) => "h2",
            NodeKind::Heading(3) => "h3",
            NodeKind::Heading(4) => "h4",
            NodeKind::Heading(5) => "h5",
            NodeKind::Heading(_) => "h6",
            NodeKind::Paragraph => "p",
            NodeKind::Bold => "strong",
            NodeKind::Italic => "em",
            NodeKind::Preformatted => "pre",
            NodeKind::Span => "span",
            NodeKind::Code => "code",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Link => "a",
            NodeKind::List { ordered: false } => "ul",
            NodeKind::List { ordered: true } => "ol",
            NodeKind::ListItem => "li",
            NodeKind::Rule => "hr",
            NodeKind::Table => "table",
            NodeKind::TableHead => "thead",
            NodeKind::TableBody => "tbody",
            NodeKind::TableRow => "tr",
            NodeKind::TableHeaderCell => "th",
            NodeKind::TableCell => "td",
            NodeKind::Image => "img",
            NodeKind::Other(name) => name,
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        NodeKind::from_tag(&tag)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.tag().to_string()
    }
}

/// An element attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Attribute value
    pub value: String,
}

/// A node of the parsed element tree.
///
/// Serialises in the shape HTML parsers such as parse5 emit:
/// `{"nodeName": "p", "attrs": [...], "childNodes": [...]}` and
/// `{"nodeName": "#text", "value": "..."}` for text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Element kind
    #[serde(rename = "nodeName")]
    pub kind: NodeKind,

    /// Literal text of a `#text` node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Attributes in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<Attribute>,

    /// Children in source order
    #[serde(default, rename = "childNodes", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create an element node with children.
    pub fn element(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            value: None,
            attrs: Vec::new(),
            children,
        }
    }

    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            value: Some(value.into()),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute and return self.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(Attribute {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Check if this is a text node.
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Literal text, empty for elements.
    pub fn text_value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Value of the first attribute with this name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// First child that is not a text node.
    pub fn first_element_child(&self) -> Option<&Node> {
        self.children.iter().find(|c| !c.is_text())
    }

    /// Check if any direct child has this kind.
    pub fn has_child(&self, kind: &NodeKind) -> bool {
        self.children.iter().any(|c| &c.kind == kind)
    }

    /// Concatenated text of this subtree.
    pub fn plain_text(&self) -> String {
        if self.is_text() {
            return self.text_value().to_string();
        }
        self.children.iter().map(Node::plain_text).collect()
    }
}

/// Nodes the walker should consume for a parsed document.
///
/// Descends `#document` → `html` → `body` when given a full document, returns
/// the children of a `body`, and otherwise treats the root as the only node.
pub fn document_body(root: &Node) -> &[Node] {
    match root.kind.tag() {
        "#document" | "html" => root
            .children
            .iter()
            .find(|c| matches!(c.kind.tag(), "html" | "body"))
            .map(document_body)
            .unwrap_or(&root.children),
        "body" => &root.children,
        _ => std::slice::from_ref(root),
    }
}

/// Parse an element tree from JSON.
///
/// Accepts either an array of nodes or a single root node, which is reduced
/// with [`document_body`].
pub fn parse_tree(json: &str) -> Result<Vec<Node>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }
    let root: Node = serde_json::from_value(value)?;
    Ok(document_body(&root).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip_names() {
        for tag in ["h3", "p", "strong", "ul", "ol", "td", "img", "#text"] {
            assert_eq!(NodeKind::from_tag(tag).tag(), tag);
        }
        assert_eq!(NodeKind::from_tag("b"), NodeKind::Bold);
        assert_eq!(NodeKind::from_tag("i"), NodeKind::Italic);
        assert_eq!(
            NodeKind::from_tag("video"),
            NodeKind::Other("video".to_string())
        );
    }

    #[test]
    fn test_node_helpers() {
        let p = Node::element(
            NodeKind::Paragraph,
            vec![
                Node::text("\n"),
                Node::element(NodeKind::Bold, vec![Node::text("Note")]),
                Node::text(" body"),
            ],
        )
        .with_attr("class", "lead");

        assert_eq!(p.attr("class"), Some("lead"));
        assert_eq!(p.attr("id"), None);
        assert_eq!(p.first_element_child().unwrap().kind, NodeKind::Bold);
        assert!(p.has_child(&NodeKind::Bold));
        assert_eq!(p.plain_text(), "\nNote body");
    }

    #[test]
    fn test_parse_tree_from_parse5_shape() {
        let json = r##"{
            "nodeName": "#document",
            "childNodes": [{
                "nodeName": "html",
                "childNodes": [
                    {"nodeName": "head"},
                    {"nodeName": "body", "childNodes": [
                        {"nodeName": "h1", "childNodes": [{"nodeName": "#text", "value": "Title"}]},
                        {"nodeName": "img", "attrs": [{"name": "src", "value": "a.png"}]}
                    ]}
                ]
            }]
        }"##;

        let nodes = parse_tree(json).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].kind, NodeKind::Heading(1));
        assert_eq!(nodes[0].plain_text(), "Title");
        assert_eq!(nodes[1].attr("src"), Some("a.png"));
    }

    #[test]
    fn test_parse_tree_from_array() {
        let json = r##"[{"nodeName": "hr"}, {"nodeName": "#text", "value": "x"}]"##;
        let nodes = parse_tree(json).unwrap();
        assert_eq!(nodes[0].kind, NodeKind::Rule);
        assert!(nodes[1].is_text());
    }

    #[test]
    fn test_parse_tree_invalid() {
        assert!(parse_tree("{").is_err());
    }
}
