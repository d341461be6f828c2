//! Rich-text document model and text utilities.
//!
//! This module provides:
//! - `Document`, `Block`, `Paragraph` and `Inline` for the document tree
//! - `DocumentBuilder` and `Document::parse` for constructing documents
//! - `DocPointer`, the document's `Navigator` implementation
//! - `CharIndex` for byte offset <-> char offset conversion

mod builder;
mod pointer;
mod text;
mod tree;

pub use builder::{DocumentBuilder, InlineBuilder};
pub use pointer::{DocPointer, Location};
pub use text::{CharIndex, TERMINATOR};
pub use tree::{Block, Document, Inline, Paragraph};
