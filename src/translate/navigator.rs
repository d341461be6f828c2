//! Traversal contract the translator needs from a host document.
//!
//! A host exposes its content as a sequence of structural boundaries: text runs,
//! element starts and element ends. The translator only ever walks those boundaries
//! and never looks at the host's tree directly.

use std::fmt;

/// Direction of travel through document content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalDirection {
    Forward,
    Backward,
}

/// What a navigator sits next to when looking in a given direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// A run of plain characters.
    Text,
    /// The opening edge of an element.
    ElementStart,
    /// The closing edge of an element.
    ElementEnd,
    /// The edge of the document.
    None,
}

/// Classification of the element adjacent to an element boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementClass {
    Paragraph,
    LineBreak,
    Other,
}

impl ElementClass {
    /// Whether the end of this element contributes a terminator to the flattened text.
    pub fn is_terminated(self) -> bool {
        matches!(self, Self::Paragraph | Self::LineBreak)
    }
}

/// Characters contributed by each paragraph or line-break end (`\r\n`).
pub const TERMINATOR_LEN: usize = 2;

/// A totally ordered cursor over a host document's structure.
///
/// Positions compare in document order. Comparing positions taken from different
/// documents, or from a document that has changed since they were produced, is a
/// logic error.
pub trait Navigator: Clone + Ord + fmt::Debug {
    /// Classify the boundary adjacent to this position.
    fn boundary(&self, direction: LogicalDirection) -> Boundary;

    /// Move past the adjacent boundary. A text run counts as one boundary.
    ///
    /// Returns `false` and leaves the position unchanged at the document edge.
    fn advance(&mut self, direction: LogicalDirection) -> bool;

    /// Length in characters of the text run adjacent in `direction`, or 0.
    fn run_len(&self, direction: LogicalDirection) -> usize;

    /// The position `chars` characters into the run that starts here.
    ///
    /// Clamped to the end of the run.
    fn at_run_offset(&self, chars: usize) -> Self;

    /// Characters from this run start up to `target`.
    ///
    /// Saturates to 0 when `target` precedes this position and to the run length
    /// when it lies beyond the run.
    fn chars_to(&self, target: &Self) -> usize;

    /// The element whose start or end is adjacent in `direction`.
    ///
    /// Returns [`ElementClass::Other`] when the adjacent boundary is not an element.
    fn adjacent_element(&self, direction: LogicalDirection) -> ElementClass;

    /// The nearest position strictly beyond this one where a caret may rest.
    fn insertion_position(&self, direction: LogicalDirection) -> Option<Self>;
}

/// A document that can hand out navigators at its two edges.
///
/// The sentinels are read again on every translator reset, so a host that
/// replaces its content only needs the translator to be reset before reuse.
pub trait TextContainer {
    type Navigator: Navigator;

    fn content_start(&self) -> Self::Navigator;

    fn content_end(&self) -> Self::Navigator;
}
