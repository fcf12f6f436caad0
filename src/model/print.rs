//! Print-layout tree consumed by the rendering engine.

use super::{Admonition, Alignment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Content of a text-bearing node.
///
/// A lone text child stays a bare string; anything else is a sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    /// Single run of text
    Text(String),
    /// Ordered child nodes
    Nodes(Vec<PrintNode>),
}

impl Content {
    /// Empty text content.
    pub fn empty() -> Self {
        Content::Text(String::new())
    }

    /// Check if there is nothing to print.
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Text(text) => text.is_empty(),
            Content::Nodes(nodes) => nodes.is_empty(),
        }
    }

    /// Bare text, if this is a single run.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text),
            Content::Nodes(_) => None,
        }
    }

    /// Child nodes, if this is a sequence.
    pub fn nodes(&self) -> &[PrintNode] {
        match self {
            Content::Text(_) => &[],
            Content::Nodes(nodes) => nodes,
        }
    }

    /// Turn content into a single node.
    pub fn into_node(self) -> PrintNode {
        match self {
            Content::Text(text) => PrintNode::PlainText { text },
            Content::Nodes(items) => PrintNode::Stack { items },
        }
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Nodes(nodes) => nodes.iter().map(PrintNode::plain_text).collect(),
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::empty()
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Vec<PrintNode>> for Content {
    fn from(nodes: Vec<PrintNode>) -> Self {
        Content::Nodes(nodes)
    }
}

/// Left border of a boxed block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    /// Line width in points
    pub width: f32,
    /// Line color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Inner padding of a boxed block, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub content: Content,

    /// Style names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<String>,

    /// Alignment read from the cell's inline style
    #[serde(default)]
    pub alignment: Alignment,
}

/// A node of the print-layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrintNode {
    /// Unstyled run of text inside a sequence.
    PlainText { text: String },

    /// Inline run with direct formatting.
    StyledText {
        text: Content,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        styles: Vec<String>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        bold: bool,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        italics: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },

    /// Block of inline content.
    Paragraph {
        text: Content,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        styles: Vec<String>,
    },

    /// Heading, level 1 to 6.
    Heading {
        level: u8,
        text: Content,
        styles: Vec<String>,
    },

    /// Ordered or bulleted list.
    List { ordered: bool, items: Vec<PrintNode> },

    /// Table with one header row.
    Table {
        header: Vec<TableCell>,
        rows: Vec<Vec<TableCell>>,
        column_count: usize,
        header_rows: usize,
        styles: Vec<String>,
    },

    /// Boxed quote, optionally an admonition.
    Blockquote {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variant: Option<Admonition>,
        content: Content,
        styles: Vec<String>,
        border: Border,
        padding: Padding,
    },

    /// Raster image sized in points.
    Image {
        path: PathBuf,
        width: f32,
        height: f32,
        /// Square fit box edge, set when a caption follows.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fit: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        styles: Vec<String>,
    },

    /// Single-cell box holding an image's alt text.
    Caption {
        text: String,
        styles: Vec<String>,
        /// Set on the fallback for a rejected image, unset under a rendered one.
        bordered: bool,
    },

    /// Horizontal rule.
    Rule {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        margin_bottom: f32,
    },

    /// Boxed preformatted block.
    CodeBlock {
        content: Content,
        styles: Vec<String>,
        padding: f32,
    },

    /// Several nodes produced from one input node.
    Stack { items: Vec<PrintNode> },
}

impl PrintNode {
    /// Plain text node.
    pub fn plain(text: impl Into<String>) -> Self {
        PrintNode::PlainText { text: text.into() }
    }

    /// Styled text node with only style names set.
    pub fn styled(text: Content, styles: Vec<String>) -> Self {
        PrintNode::StyledText {
            text,
            styles,
            bold: false,
            italics: false,
            color: None,
            link: None,
        }
    }

    /// Short name of the variant, as serialised.
    pub fn kind(&self) -> &'static str {
        match self {
            PrintNode::PlainText { .. } => "plain_text",
            PrintNode::StyledText { .. } => "styled_text",
            PrintNode::Paragraph { .. } => "paragraph",
            PrintNode::Heading { .. } => "heading",
            PrintNode::List { .. } => "list",
            PrintNode::Table { .. } => "table",
            PrintNode::Blockquote { .. } => "blockquote",
            PrintNode::Image { .. } => "image",
            PrintNode::Caption { .. } => "caption",
            PrintNode::Rule { .. } => "rule",
            PrintNode::CodeBlock { .. } => "code_block",
            PrintNode::Stack { .. } => "stack",
        }
    }

    /// Style names attached to this node.
    pub fn styles(&self) -> &[String] {
        match self {
            PrintNode::StyledText { styles, .. }
            | PrintNode::Paragraph { styles, .. }
            | PrintNode::Heading { styles, .. }
            | PrintNode::Table { styles, .. }
            | PrintNode::Blockquote { styles, .. }
            | PrintNode::Image { styles, .. }
            | PrintNode::Caption { styles, .. }
            | PrintNode::CodeBlock { styles, .. } => styles,
            _ => &[],
        }
    }

    /// Concatenated text of this subtree.
    pub fn plain_text(&self) -> String {
        match self {
            PrintNode::PlainText { text } | PrintNode::Caption { text, .. } => text.clone(),
            PrintNode::StyledText { text, .. }
            | PrintNode::Paragraph { text, .. }
            | PrintNode::Heading { text, .. } => text.plain_text(),
            PrintNode::Blockquote { content, .. } | PrintNode::CodeBlock { content, .. } => {
                content.plain_text()
            }
            PrintNode::List { items, .. } | PrintNode::Stack { items } => {
                items.iter().map(PrintNode::plain_text).collect()
            }
            PrintNode::Table { header, rows, .. } => header
                .iter()
                .chain(rows.iter().flatten())
                .map(|cell| cell.content.plain_text())
                .collect(),
            PrintNode::Image { .. } | PrintNode::Rule { .. } => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_serialises_bare_text() {
        let content = Content::from("hello");
        assert_eq!(serde_json::to_string(&content).unwrap(), "\"hello\"");

        let nodes = Content::Nodes(vec![PrintNode::plain("a")]);
        assert_eq!(
            serde_json::to_string(&nodes).unwrap(),
            r#"[{"type":"plain_text","text":"a"}]"#
        );
    }

    #[test]
    fn test_print_node_tagging() {
        let node = PrintNode::Paragraph {
            text: "x".into(),
            styles: vec!["paragraph".to_string()],
        };
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"type":"paragraph","text":"x","styles":["paragraph"]}"#);

        let back: PrintNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_styled_text_omits_defaults() {
        let node = PrintNode::styled("t".into(), Vec::new());
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"{"type":"styled_text","text":"t"}"#
        );
    }

    #[test]
    fn test_into_node() {
        assert_eq!(Content::from("a").into_node(), PrintNode::plain("a"));
        assert!(matches!(
            Content::Nodes(vec![]).into_node(),
            PrintNode::Stack { items } if items.is_empty()
        ));
    }

    #[test]
    fn test_plain_text() {
        let node = PrintNode::Stack {
            items: vec![
                PrintNode::plain("a "),
                PrintNode::styled(Content::Nodes(vec![PrintNode::plain("b")]), vec![]),
            ],
        };
        assert_eq!(node.plain_text(), "a b");
        assert_eq!(node.kind(), "stack");
        assert!(node.styles().is_empty());
    }
}
