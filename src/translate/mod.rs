//! Translation between flattened character offsets and structured positions.
//!
//! This module provides:
//! - `Navigator` and `TextContainer`, the traversal contract a host document implements
//! - `OffsetTranslator` for offset -> position and position -> offset queries
//! - `ForwardScan` for amortized increasing-offset queries

mod navigator;
mod translator;

pub use navigator::{
    Boundary, ElementClass, LogicalDirection, Navigator, TextContainer, TERMINATOR_LEN,
};
pub use translator::{ForwardScan, OffsetTranslator, TranslateOptions};
