//! Document definition handed to the rendering engine.

use crate::model::{default_style, Content, Style, StyleSheet};
use crate::transform::{PageSize, TransformOptions};
use serde::{Deserialize, Serialize};

/// Print tree together with the page setup and styles it refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDefinition {
    /// Converted content
    pub content: Content,

    /// Page size in points
    pub page_size: PageSize,

    /// `[left, top, right, bottom]` in points
    pub page_margins: [f32; 4],

    /// Named styles
    pub styles: StyleSheet,

    /// Style applied to the whole document
    pub default_style: Style,
}

impl DocumentDefinition {
    /// Top-level nodes, or none if the content is a bare string.
    pub fn nodes(&self) -> &[crate::model::PrintNode] {
        self.content.nodes()
    }
}

/// Assemble a document definition from converted content.
pub fn build_document(content: Content, options: &TransformOptions) -> DocumentDefinition {
    DocumentDefinition {
        content,
        page_size: options.page_size,
        page_margins: options.margins.to_array(),
        styles: options.styles.clone(),
        default_style: default_style(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Margins;

    #[test]
    fn test_build_document() {
        let options = TransformOptions::new().with_margins(Margins::uniform(36.0));
        let doc = build_document(Content::from("hi"), &options);

        assert_eq!(doc.page_margins, [36.0; 4]);
        assert_eq!(doc.page_size.width, 612.0);
        assert_eq!(doc.default_style.font.as_deref(), Some("Roboto"));
        assert!(doc.nodes().is_empty());
    }

    #[test]
    fn test_camel_case_keys() {
        let doc = build_document(Content::Nodes(vec![]), &TransformOptions::default());
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"pageSize\":{\"width\":612.0,\"height\":792.0}"));
        assert!(json.contains("\"pageMargins\":[0.0,0.0,0.0,0.0]"));
        assert!(json.contains("\"defaultStyle\""));
    }
}
