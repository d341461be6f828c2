//! Text views of a document and offset utilities.
//!
//! Provides the flattened text that offsets are measured against, the host's
//! rendered text (with indentation tabs), and byte offset <-> char offset conversion.

use super::tree::{Block, Document, ElementKind, Inline, Symbol};

/// Paragraph and line-break terminator in the flattened text.
pub const TERMINATOR: &str = "\r\n";

impl Document {
    /// The flattened text: every character of every text run, with `\r\n` after
    /// each paragraph end and each line-break end.
    ///
    /// Flattened offsets count `char`s of this string.
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.symbol_len());
        for symbol in self.symbols() {
            match symbol {
                Symbol::Char(c) => text.push(*c),
                Symbol::Close(ElementKind::Paragraph | ElementKind::LineBreak) => {
                    text.push_str(TERMINATOR)
                }
                Symbol::Open(_) | Symbol::Close(_) => {}
            }
        }
        text
    }

    /// Length of [`Document::text`] in chars, without building it.
    pub fn text_len(&self) -> usize {
        self.symbols()
            .iter()
            .map(|symbol| match symbol {
                Symbol::Char(_) => 1,
                Symbol::Close(kind) if kind.class().is_terminated() => TERMINATOR.len(),
                Symbol::Open(_) | Symbol::Close(_) => 0,
            })
            .sum()
    }

    /// Text as a host would render it, with paragraph indentation expanded to tabs.
    ///
    /// Continuation lines after a line break start at the margin. The tabs exist
    /// only in this view; they are not part of the flattened text.
    pub fn rendered_text(&self) -> String {
        let mut out = String::new();
        for block in self.blocks() {
            render_block(block, &mut out);
        }
        out
    }
}

fn render_block(block: &Block, out: &mut String) {
    match block {
        Block::Paragraph(paragraph) => {
            push_tabs(out, paragraph.leading_tabs());
            render_inlines(&paragraph.inlines, usize::from(paragraph.margin), out);
            out.push_str(TERMINATOR);
        }
        Block::Section(blocks) => {
            for block in blocks {
                render_block(block, out);
            }
        }
    }
}

fn render_inlines(inlines: &[Inline], margin: usize, out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::LineBreak => {
                out.push_str(TERMINATOR);
                push_tabs(out, margin);
            }
            Inline::Span(children) => render_inlines(children, margin, out),
        }
    }
}

fn push_tabs(out: &mut String, count: usize) {
    out.extend(std::iter::repeat('\t').take(count));
}

/// Pre-computed char boundaries for byte offset <-> char offset conversion.
///
/// Regex matches report byte offsets, while flattened offsets count chars.
#[derive(Debug, Clone)]
pub struct CharIndex {
    /// Byte offset where each char starts, plus the total length.
    char_starts: Vec<usize>,
}

impl CharIndex {
    pub fn new(text: &str) -> Self {
        let mut char_starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        char_starts.push(text.len());
        Self { char_starts }
    }

    /// Number of chars in the indexed text.
    pub fn char_len(&self) -> usize {
        self.char_starts.len() - 1
    }

    /// Convert a byte offset to a char offset.
    ///
    /// A byte offset inside a multi-byte char maps to that char. Offsets past the
    /// end clamp to the char length.
    pub fn char_offset(&self, byte_offset: usize) -> usize {
        match self.char_starts.binary_search(&byte_offset) {
            Ok(index) => index,
            Err(index) => index.saturating_sub(1).min(self.char_len()),
        }
    }

    /// Convert a char offset to a byte offset, clamped to the text length.
    pub fn byte_offset(&self, char_offset: usize) -> usize {
        let last = self.char_starts.len() - 1;
        self.char_starts[char_offset.min(last)]
    }

    /// Convert a byte span to a char span.
    pub fn char_span(&self, span: &std::ops::Range<usize>) -> std::ops::Range<usize> {
        self.char_offset(span.start)..self.char_offset(span.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentBuilder;

    #[test]
    fn flattened_text_counts_terminators() {
        let doc = DocumentBuilder::new()
            .text_paragraph("ab")
            .paragraph(|p| {
                p.text("c").line_break().text("d");
            })
            .text_paragraph("")
            .build();

        assert_eq!(doc.text(), "ab\r\nc\r\nd\r\n\r\n");
        assert_eq!(doc.text_len(), doc.text().chars().count());
    }

    #[test]
    fn sections_and_spans_add_nothing() {
        let doc = DocumentBuilder::new()
            .section(|s| {
                s.paragraph(|p| {
                    p.text("a").span(|s| {
                        s.text("b");
                    });
                })
            })
            .build();

        assert_eq!(doc.text(), "ab\r\n");
        assert_eq!(doc.text_len(), 4);
    }

    #[test]
    fn rendered_text_expands_indentation() {
        let doc = DocumentBuilder::new()
            .indented_paragraph(1, 1, |p| {
                p.text("a").line_break().text("b");
            })
            .build();

        assert_eq!(doc.rendered_text(), "\t\ta\r\n\tb\r\n");
        assert_eq!(doc.text(), "a\r\nb\r\n");
    }

    #[test]
    fn char_index_ascii() {
        let idx = CharIndex::new("hello");
        assert_eq!(idx.char_len(), 5);
        assert_eq!(idx.char_offset(0), 0);
        assert_eq!(idx.char_offset(5), 5);
        assert_eq!(idx.byte_offset(3), 3);
    }

    #[test]
    fn char_index_multibyte() {
        // 'é' is 2 bytes, '😀' is 4 bytes
        let idx = CharIndex::new("aé😀b");
        assert_eq!(idx.char_len(), 4);
        assert_eq!(idx.char_offset(1), 1);
        assert_eq!(idx.char_offset(3), 2);
        assert_eq!(idx.char_offset(7), 3);
        assert_eq!(idx.char_offset(8), 4);
        // Inside '😀'
        assert_eq!(idx.char_offset(5), 2);
        assert_eq!(idx.byte_offset(3), 7);
        assert_eq!(idx.char_span(&(1..7)), 1..3);
    }

    #[test]
    fn char_index_out_of_bounds() {
        let idx = CharIndex::new("ab");
        assert_eq!(idx.char_offset(10), 2);
        assert_eq!(idx.byte_offset(10), 2);
    }
}
