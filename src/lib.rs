//! # mdprint
//!
//! Print-layout tree builder for rendered Markdown.
//!
//! This library takes the element tree an HTML parser produces from rendered
//! Markdown and converts it to a tree of print-layout instructions for a PDF
//! rendering engine. Print-only concerns are resolved on the way: admonition
//! colors, paragraphs split around inline images, syntax-highlight styles,
//! table alignment, and image sizing from PNG/JPEG resolution metadata.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdprint::{parse_tree, JsonFormat, MdPrint};
//!
//! fn main() -> mdprint::Result<()> {
//!     let json = std::fs::read_to_string("README.tree.json")?;
//!     let nodes = parse_tree(&json)?;
//!
//!     let result = MdPrint::new()
//!         .with_base_dir(".")
//!         .with_margins(mdprint::Margins::uniform(36.0))
//!         .transform(&nodes);
//!
//!     println!("{}", result.to_json(JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Admonitions**: blockquotes led by a bold keyword become colored callouts
//! - **Inline images**: paragraphs are split so images stand on their own
//! - **Print sizing**: PNG `pHYs`, JFIF and EXIF resolution drive point sizes
//! - **Code highlighting**: highlighter classes map to named code styles
//! - **Parallel batches**: uses Rayon to convert many documents at once

pub mod detect;
pub mod error;
pub mod image;
pub mod model;
pub mod render;
pub mod transform;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, ImageFormat};
pub use error::{Error, Result};
pub use image::{DecodeError, ImageInfo};
pub use model::{
    document_body, parse_tree, Admonition, Alignment, Content, KeywordTable, Node, NodeKind,
    PrintNode, Style, StyleSheet, TableCell,
};
pub use render::{DocumentDefinition, JsonFormat, PrintResult, TransformStats};
pub use transform::{ImageSizeLimit, Margins, PageSize, TransformOptions, Transformer};

use std::path::{Path, PathBuf};

/// Convert an element tree to a document definition with statistics.
///
/// # Example
///
/// ```
/// use mdprint::{transform, Node, NodeKind, TransformOptions};
///
/// let nodes = vec![Node::element(NodeKind::Paragraph, vec![Node::text("Hello")])];
/// let result = transform(&nodes, &TransformOptions::default());
/// assert_eq!(result.stats.paragraph_count, 1);
/// ```
pub fn transform(nodes: &[Node], options: &TransformOptions) -> PrintResult {
    let mut walker = Transformer::new(options);
    let content = walker.transform(nodes);
    PrintResult::new(
        render::build_document(content, options),
        walker.into_stats(),
    )
}

/// Parse an element tree from JSON and convert it.
pub fn transform_json(json: &str, options: &TransformOptions) -> Result<PrintResult> {
    let nodes = parse_tree(json)?;
    Ok(transform(&nodes, options))
}

/// Convert an element tree straight to document-definition JSON.
///
/// # Example
///
/// ```
/// use mdprint::{to_json, JsonFormat, Node, NodeKind, TransformOptions};
///
/// let nodes = vec![Node::element(NodeKind::Rule, vec![])];
/// let json = to_json(&nodes, &TransformOptions::default(), JsonFormat::Compact).unwrap();
/// assert!(json.contains("\"type\":\"rule\""));
/// ```
pub fn to_json(nodes: &[Node], options: &TransformOptions, format: JsonFormat) -> Result<String> {
    transform(nodes, options).to_json(format)
}

/// Read pixel size and resolution of a PNG or JPEG file.
pub fn read_image_info<P: AsRef<Path>>(path: P) -> Result<ImageInfo> {
    image::read_image_file(path)
}

/// Convert several documents independently.
///
/// With `options.parallel` the documents are spread over the Rayon thread
/// pool. Results are returned in input order.
pub fn transform_batch(documents: &[Vec<Node>], options: &TransformOptions) -> Vec<PrintResult> {
    #[cfg(feature = "parallel")]
    {
        if options.parallel {
            use rayon::prelude::*;
            return documents
                .par_iter()
                .map(|nodes| transform(nodes, options))
                .collect();
        }
    }

    documents
        .iter()
        .map(|nodes| transform(nodes, options))
        .collect()
}

/// Builder for converting element trees.
///
/// # Example
///
/// ```no_run
/// use mdprint::{ImageSizeLimit, MdPrint};
///
/// let json = MdPrint::new()
///     .with_base_dir("docs")
///     .with_image_limit(ImageSizeLimit::Fraction(0.8))
///     .transform_file("docs/guide.tree.json")?
///     .to_json(mdprint::JsonFormat::Compact)?;
/// # Ok::<(), mdprint::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MdPrint {
    options: TransformOptions,
}

impl MdPrint {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing options.
    pub fn with_options(options: TransformOptions) -> Self {
        Self { options }
    }

    /// Set the base directory for image paths.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_base_dir(dir);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.options = self.options.with_page_size(page_size);
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.options = self.options.with_margins(margins);
        self
    }

    /// Set the image width cap.
    pub fn with_image_limit(mut self, limit: ImageSizeLimit) -> Self {
        self.options = self.options.with_image_limit(limit);
        self
    }

    /// Set the style sheet.
    pub fn with_styles(mut self, styles: StyleSheet) -> Self {
        self.options = self.options.with_styles(styles);
        self
    }

    /// Set the keyword table.
    pub fn with_keywords(mut self, keywords: KeywordTable) -> Self {
        self.options = self.options.with_keywords(keywords);
        self
    }

    /// Disable parallel batch conversion.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Get the options.
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Convert an element tree.
    pub fn transform(&self, nodes: &[Node]) -> PrintResult {
        transform(nodes, &self.options)
    }

    /// Parse and convert an element tree given as JSON.
    pub fn transform_json(&self, json: &str) -> Result<PrintResult> {
        transform_json(json, &self.options)
    }

    /// Read, parse and convert an element tree JSON file.
    ///
    /// Without a configured base directory, images resolve against the
    /// file's own directory.
    pub fn transform_file<P: AsRef<Path>>(&self, path: P) -> Result<PrintResult> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        if self.options.base_dir.is_some() {
            return self.transform_json(&json);
        }
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        transform_json(&json, &self.options.clone().with_base_dir(base_dir))
    }

    /// Convert several documents.
    pub fn transform_batch(&self, documents: &[Vec<Node>]) -> Vec<PrintResult> {
        transform_batch(documents, &self.options)
    }
}
