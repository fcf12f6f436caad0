//! Output assembly for the rendering engine.
//!
//! The print tree produced by [`crate::transform`] is wrapped in a
//! [`DocumentDefinition`] carrying page setup and styles, and serialised to
//! JSON for the engine.

mod document;
mod json;
mod result;

pub use document::{build_document, DocumentDefinition};
pub use json::{to_json, JsonFormat};
pub use result::{PrintResult, TransformStats};
