//! Positions within a [`Document`] and their structural navigation.

use std::cmp::Ordering;
use std::fmt;

use crate::translate::{
    Boundary, ElementClass, LogicalDirection, Navigator, OffsetTranslator, TextContainer,
};

use super::tree::{Document, ElementKind, Symbol};

/// A position between two symbols of a document.
///
/// Pointers order by index. Pointers from different documents compare by index
/// alone and must not be mixed.
#[derive(Clone, Copy)]
pub struct DocPointer<'a> {
    document: &'a Document,
    index: usize,
}

impl<'a> DocPointer<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    fn symbol(&self, direction: LogicalDirection) -> Option<Symbol> {
        let symbols = self.document.symbols();
        match direction {
            LogicalDirection::Forward => symbols.get(self.index).copied(),
            LogicalDirection::Backward => self
                .index
                .checked_sub(1)
                .and_then(|i| symbols.get(i))
                .copied(),
        }
    }

    /// Describe where this pointer sits in terms of paragraphs, lines and columns.
    pub fn location(&self) -> Location {
        let mut paragraphs = 0usize;
        let mut line = 0usize;
        let mut column = 0usize;
        let mut paragraph_depth = 0usize;

        for symbol in &self.document.symbols()[..self.index] {
            match symbol {
                Symbol::Open(ElementKind::Paragraph) => {
                    paragraphs += 1;
                    paragraph_depth += 1;
                    line = 0;
                    column = 0;
                }
                Symbol::Close(ElementKind::Paragraph) => paragraph_depth -= 1,
                Symbol::Close(ElementKind::LineBreak) => {
                    line += 1;
                    column = 0;
                }
                Symbol::Char(_) => column += 1,
                Symbol::Open(_) | Symbol::Close(_) => {}
            }
        }

        if paragraph_depth > 0 {
            Location::Inside {
                paragraph: paragraphs - 1,
                line,
                column,
            }
        } else if paragraphs < self.document.paragraph_count() {
            Location::Before {
                paragraph: paragraphs,
            }
        } else {
            Location::End
        }
    }
}

impl PartialEq for DocPointer<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for DocPointer<'_> {}

impl PartialOrd for DocPointer<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DocPointer<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert!(
            std::ptr::eq(self.document, other.document),
            "compared pointers from different documents"
        );
        self.index.cmp(&other.index)
    }
}

impl fmt::Debug for DocPointer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocPointer({} @ {})", self.index, self.location())
    }
}

impl fmt::Display for DocPointer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.location().fmt(f)
    }
}

impl Navigator for DocPointer<'_> {
    fn boundary(&self, direction: LogicalDirection) -> Boundary {
        match self.symbol(direction) {
            Some(Symbol::Char(_)) => Boundary::Text,
            Some(Symbol::Open(_)) => Boundary::ElementStart,
            Some(Symbol::Close(_)) => Boundary::ElementEnd,
            None => Boundary::None,
        }
    }

    fn advance(&mut self, direction: LogicalDirection) -> bool {
        match self.symbol(direction) {
            None => false,
            Some(Symbol::Char(_)) => {
                let len = self.run_len(direction);
                match direction {
                    LogicalDirection::Forward => self.index += len,
                    LogicalDirection::Backward => self.index -= len,
                }
                true
            }
            Some(Symbol::Open(_) | Symbol::Close(_)) => {
                match direction {
                    LogicalDirection::Forward => self.index += 1,
                    LogicalDirection::Backward => self.index -= 1,
                }
                true
            }
        }
    }

    fn run_len(&self, direction: LogicalDirection) -> usize {
        let symbols = self.document.symbols();
        let is_char = |symbol: &Symbol| matches!(symbol, Symbol::Char(_));
        match direction {
            LogicalDirection::Forward => symbols[self.index..]
                .iter()
                .take_while(|s| is_char(s))
                .count(),
            LogicalDirection::Backward => symbols[..self.index]
                .iter()
                .rev()
                .take_while(|s| is_char(s))
                .count(),
        }
    }

    fn at_run_offset(&self, chars: usize) -> Self {
        Self {
            document: self.document,
            index: self.index + chars.min(self.run_len(LogicalDirection::Forward)),
        }
    }

    fn chars_to(&self, target: &Self) -> usize {
        target
            .index
            .saturating_sub(self.index)
            .min(self.run_len(LogicalDirection::Forward))
    }

    fn adjacent_element(&self, direction: LogicalDirection) -> ElementClass {
        match self.symbol(direction) {
            Some(Symbol::Open(kind) | Symbol::Close(kind)) => kind.class(),
            Some(Symbol::Char(_)) | None => ElementClass::Other,
        }
    }

    fn insertion_position(&self, direction: LogicalDirection) -> Option<Self> {
        let holds_caret = |index: &usize| {
            self.document
                .container_at(*index)
                .is_some_and(ElementKind::holds_caret)
        };
        let index = match direction {
            LogicalDirection::Forward => {
                (self.index + 1..=self.document.symbol_len()).find(holds_caret)
            }
            LogicalDirection::Backward => (0..self.index).rev().find(holds_caret),
        }?;

        Some(Self {
            document: self.document,
            index,
        })
    }
}

impl<'a> TextContainer for &'a Document {
    type Navigator = DocPointer<'a>;

    fn content_start(&self) -> DocPointer<'a> {
        Document::content_start(*self)
    }

    fn content_end(&self) -> DocPointer<'a> {
        Document::content_end(*self)
    }
}

impl Document {
    pub fn content_start(&self) -> DocPointer<'_> {
        self.pointer(0)
    }

    pub fn content_end(&self) -> DocPointer<'_> {
        self.pointer(self.symbol_len())
    }

    /// Pointer at a symbol index, clamped to the end of the document.
    pub fn pointer(&self, index: usize) -> DocPointer<'_> {
        DocPointer {
            document: self,
            index: index.min(self.symbol_len()),
        }
    }

    /// A translator bound to this document.
    pub fn translator(&self) -> OffsetTranslator<&Document> {
        OffsetTranslator::new(self)
    }
}

/// Human-readable placement of a [`DocPointer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Inside a paragraph; line counts line breaks, column counts chars.
    Inside {
        paragraph: usize,
        line: usize,
        column: usize,
    },
    /// Outside any paragraph, before the given one.
    Before { paragraph: usize },
    /// Outside any paragraph, after the last one.
    End,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Inside {
                paragraph,
                line,
                column,
            } => write!(f, "p{}:{}:{}", paragraph, line, column),
            Location::Before { paragraph } => write!(f, "before p{}", paragraph),
            Location::End => f.write_str("end"),
        }
    }
}
