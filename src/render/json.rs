//! JSON rendering for document definitions.

use super::DocumentDefinition;
use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document definition to JSON.
pub fn to_json(doc: &DocumentDefinition, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Content, PrintNode};
    use crate::render::build_document;
    use crate::transform::TransformOptions;

    fn sample() -> DocumentDefinition {
        let content = Content::Nodes(vec![PrintNode::Heading {
            level: 1,
            text: "Test".into(),
            styles: vec!["heading".to_string(), "h1".to_string()],
        }]);
        build_document(content, &TransformOptions::default())
    }

    #[test]
    fn test_to_json_pretty() {
        let json = to_json(&sample(), JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"heading\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let json = to_json(&sample(), JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n')); // Compact has no newlines
    }

    #[test]
    fn test_json_parses_back() {
        let doc = sample();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let back: DocumentDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
