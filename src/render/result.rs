//! Conversion result with statistics.

use super::{to_json, DocumentDefinition, JsonFormat};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Result of converting one document, including statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintResult {
    /// Document definition for the renderer
    pub document: DocumentDefinition,

    /// Conversion statistics
    pub stats: TransformStats,
}

impl PrintResult {
    /// Create a new result.
    pub fn new(document: DocumentDefinition, stats: TransformStats) -> Self {
        Self { document, stats }
    }

    /// Serialise the document definition.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(&self.document, format)
    }

    /// Get the document definition.
    pub fn document(&self) -> &DocumentDefinition {
        &self.document
    }
}

/// Statistics collected while walking one element tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformStats {
    /// Number of paragraphs emitted, counting each split segment
    pub paragraph_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of non-empty lists
    pub list_count: u32,

    /// Number of tables emitted
    pub table_count: u32,

    /// Tables dropped for lacking a header or data rows
    pub omitted_table_count: u32,

    /// Number of preformatted blocks
    pub code_block_count: u32,

    /// Number of blockquotes, admonitions included
    pub blockquote_count: u32,

    /// Blockquotes rendered as admonitions
    pub admonition_count: u32,

    /// Images embedded with their print size
    pub image_count: u32,

    /// Images replaced by their alt text or dropped
    pub rejected_image_count: u32,
}

impl TransformStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment list count.
    pub fn add_list(&mut self) {
        self.list_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment omitted table count.
    pub fn add_omitted_table(&mut self) {
        self.omitted_table_count += 1;
    }

    /// Increment code block count.
    pub fn add_code_block(&mut self) {
        self.code_block_count += 1;
    }

    /// Increment blockquote count, and admonition count if it is one.
    pub fn add_blockquote(&mut self, admonition: bool) {
        self.blockquote_count += 1;
        if admonition {
            self.admonition_count += 1;
        }
    }

    /// Increment image count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Increment rejected image count.
    pub fn add_rejected_image(&mut self) {
        self.rejected_image_count += 1;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &TransformStats) {
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.list_count += other.list_count;
        self.table_count += other.table_count;
        self.omitted_table_count += other.omitted_table_count;
        self.code_block_count += other.code_block_count;
        self.blockquote_count += other.blockquote_count;
        self.admonition_count += other.admonition_count;
        self.image_count += other.image_count;
        self.rejected_image_count += other.rejected_image_count;
    }
}
