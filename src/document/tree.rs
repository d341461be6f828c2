//! Rich-text document tree and its linearized form.

use crate::translate::ElementClass;

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    /// A container of blocks. Its end contributes nothing to the flattened text.
    Section(Vec<Block>),
}

/// A paragraph of inline content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Left margin, in tab stops.
    pub margin: u16,
    /// Extra indent of the first line, in tab stops.
    pub first_line_indent: u16,
    pub inlines: Vec<Inline>,
}

impl Paragraph {
    /// Tab stops rendered in front of the first line.
    pub fn leading_tabs(&self) -> usize {
        usize::from(self.margin) + usize::from(self.first_line_indent)
    }
}

/// An inline node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    LineBreak,
    /// A container of inlines (formatting, links). Splits text runs but adds no characters.
    Span(Vec<Inline>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ElementKind {
    Section,
    Paragraph,
    LineBreak,
    Span,
}

impl ElementKind {
    pub(crate) fn class(self) -> ElementClass {
        match self {
            ElementKind::Paragraph => ElementClass::Paragraph,
            ElementKind::LineBreak => ElementClass::LineBreak,
            ElementKind::Section | ElementKind::Span => ElementClass::Other,
        }
    }

    /// Whether a caret may rest directly inside this element.
    pub(crate) fn holds_caret(self) -> bool {
        matches!(self, ElementKind::Paragraph | ElementKind::Span)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Symbol {
    Open(ElementKind),
    Close(ElementKind),
    Char(char),
}

/// An immutable rich-text document.
///
/// Positions in the document are indices between symbols of the linearized tree,
/// where every element start, element end and character is one symbol.
#[derive(Debug, Clone)]
pub struct Document {
    blocks: Vec<Block>,
    symbols: Vec<Symbol>,
    /// Innermost open element at each position; one entry more than `symbols`.
    containers: Vec<Option<ElementKind>>,
    paragraph_count: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        let mut linear = Linearizer::default();
        for block in &blocks {
            linear.block(block);
        }

        let Linearizer {
            symbols,
            containers,
            paragraph_count,
            ..
        } = linear;

        Self {
            blocks,
            symbols,
            containers,
            paragraph_count,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of paragraphs, including those nested in sections.
    pub fn paragraph_count(&self) -> usize {
        self.paragraph_count
    }

    /// Number of symbols; the last valid position index.
    pub fn symbol_len(&self) -> usize {
        self.symbols.len()
    }

    pub(crate) fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub(crate) fn container_at(&self, index: usize) -> Option<ElementKind> {
        self.containers.get(index).copied().flatten()
    }
}

#[derive(Debug)]
struct Linearizer {
    symbols: Vec<Symbol>,
    containers: Vec<Option<ElementKind>>,
    open: Vec<ElementKind>,
    paragraph_count: usize,
}

impl Default for Linearizer {
    fn default() -> Self {
        Self {
            symbols: Vec::new(),
            containers: vec![None],
            open: Vec::new(),
            paragraph_count: 0,
        }
    }
}

impl Linearizer {
    fn push(&mut self, symbol: Symbol) {
        match symbol {
            Symbol::Open(kind) => self.open.push(kind),
            Symbol::Close(_) => {
                self.open.pop();
            }
            Symbol::Char(_) => {}
        }
        self.symbols.push(symbol);
        self.containers.push(self.open.last().copied());
    }

    fn element(&mut self, kind: ElementKind, children: impl FnOnce(&mut Self)) {
        self.push(Symbol::Open(kind));
        children(self);
        self.push(Symbol::Close(kind));
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(paragraph) => {
                self.paragraph_count += 1;
                self.element(ElementKind::Paragraph, |this| this.inlines(&paragraph.inlines));
            }
            Block::Section(blocks) => self.element(ElementKind::Section, |this| {
                for block in blocks {
                    this.block(block);
                }
            }),
        }
    }

    fn inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            match inline {
                Inline::Text(text) => {
                    for c in text.chars() {
                        self.push(Symbol::Char(c));
                    }
                }
                Inline::LineBreak => self.element(ElementKind::LineBreak, |_| {}),
                Inline::Span(children) => {
                    self.element(ElementKind::Span, |this| this.inlines(children))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ElementKind as K;

    #[test]
    fn linearizes_nested_blocks() {
        let doc = Document::new(vec![
            Block::Section(vec![Block::Paragraph(Paragraph {
                inlines: vec![Inline::Text("a".into()), Inline::LineBreak],
                ..Default::default()
            })]),
            Block::Paragraph(Paragraph::default()),
        ]);

        assert_eq!(
            doc.symbols(),
            &[
                Symbol::Open(K::Section),
                Symbol::Open(K::Paragraph),
                Symbol::Char('a'),
                Symbol::Open(K::LineBreak),
                Symbol::Close(K::LineBreak),
                Symbol::Close(K::Paragraph),
                Symbol::Close(K::Section),
                Symbol::Open(K::Paragraph),
                Symbol::Close(K::Paragraph),
            ]
        );
        assert_eq!(doc.paragraph_count(), 2);
    }

    #[test]
    fn tracks_innermost_container() {
        let doc = Document::new(vec![Block::Section(vec![Block::Paragraph(Paragraph {
            inlines: vec![Inline::Span(vec![Inline::Text("x".into())])],
            ..Default::default()
        })])]);

        let containers: Vec<_> = (0..=doc.symbol_len()).map(|i| doc.container_at(i)).collect();
        assert_eq!(
            containers,
            vec![
                None,
                Some(K::Section),
                Some(K::Paragraph),
                Some(K::Span),
                Some(K::Span),
                Some(K::Paragraph),
                Some(K::Section),
                None,
            ]
        );
    }

    #[test]
    fn empty_document_has_one_position() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc.symbol_len(), 0);
        assert_eq!(doc.container_at(0), None);
    }
}
