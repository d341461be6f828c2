//! Document construction: a builder API and plain-text import.

use super::tree::{Block, Document, Inline, Paragraph};

/// Characters that become line breaks inside a paragraph on import.
const LINE_BREAK_CHARS: [char; 2] = ['\u{2028}', '\u{000B}'];

/// Builds a [`Document`] block by block.
///
/// ```
/// use flatpos::DocumentBuilder;
///
/// let doc = DocumentBuilder::new()
///     .text_paragraph("ab")
///     .paragraph(|p| {
///         p.text("c").line_break().text("d");
///     })
///     .build();
/// assert_eq!(doc.text(), "ab\r\nc\r\nd\r\n");
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    blocks: Vec<Block>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(self, build: impl FnOnce(&mut InlineBuilder)) -> Self {
        self.indented_paragraph(0, 0, build)
    }

    /// A paragraph with a left margin and first-line indent, both in tab stops.
    pub fn indented_paragraph(
        mut self,
        margin: u16,
        first_line_indent: u16,
        build: impl FnOnce(&mut InlineBuilder),
    ) -> Self {
        let mut inlines = InlineBuilder::default();
        build(&mut inlines);
        self.blocks.push(Block::Paragraph(Paragraph {
            margin,
            first_line_indent,
            inlines: inlines.inlines,
        }));
        self
    }

    /// A paragraph holding a single text run. An empty string gives an empty paragraph.
    pub fn text_paragraph(self, text: &str) -> Self {
        self.paragraph(|p| {
            if !text.is_empty() {
                p.text(text);
            }
        })
    }

    pub fn section(mut self, build: impl FnOnce(DocumentBuilder) -> DocumentBuilder) -> Self {
        let inner = build(DocumentBuilder::new());
        self.blocks.push(Block::Section(inner.blocks));
        self
    }

    pub fn build(self) -> Document {
        Document::new(self.blocks)
    }
}

/// Collects the inline content of a paragraph or span.
#[derive(Debug, Default)]
pub struct InlineBuilder {
    inlines: Vec<Inline>,
}

impl InlineBuilder {
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.inlines.push(Inline::Text(text.into()));
        self
    }

    pub fn line_break(&mut self) -> &mut Self {
        self.inlines.push(Inline::LineBreak);
        self
    }

    pub fn span(&mut self, build: impl FnOnce(&mut InlineBuilder)) -> &mut Self {
        let mut inner = InlineBuilder::default();
        build(&mut inner);
        self.inlines.push(Inline::Span(inner.inlines));
        self
    }
}

impl Document {
    /// Import plain text.
    ///
    /// Each line (LF or CRLF terminated) becomes a paragraph. Leading tabs become
    /// the paragraph margin rather than text. `U+2028` and vertical tab become line
    /// breaks within the paragraph.
    pub fn parse(source: &str) -> Self {
        let mut builder = DocumentBuilder::new();

        for line in source.lines() {
            let body = line.trim_start_matches('\t');
            let margin = u16::try_from(line.len() - body.len()).unwrap_or(u16::MAX);

            builder = builder.indented_paragraph(margin, 0, |p| {
                for (i, segment) in body.split(LINE_BREAK_CHARS).enumerate() {
                    if i > 0 {
                        p.line_break();
                    }
                    if !segment.is_empty() {
                        p.text(segment);
                    }
                }
            });
        }

        builder.build()
    }
}
