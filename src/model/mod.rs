//! Document model types.
//!
//! The input side is the element tree an HTML parser produces from rendered
//! Markdown. The output side is the print-layout tree handed to the
//! rendering engine, together with the named styles and admonition keywords
//! both sides refer to.

mod keywords;
mod node;
mod print;
mod style;

pub use keywords::{Admonition, KeywordTable};
pub use node::{document_body, parse_tree, Attribute, Node, NodeKind};
pub use print::{Border, Content, Padding, PrintNode, TableCell};
pub use style::{default_style, names as style_names, Alignment, Style, StyleSheet};
