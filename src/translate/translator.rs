//! Offset <-> position translation over a host document.
//!
//! The flattened text of a document is the concatenation of every text run, with
//! two extra characters (`\r\n`) after each paragraph end and each line-break end.
//! Element starts and ends of any other element contribute nothing, and neither
//! does any indentation the host renders in front of a paragraph.

use serde::Deserialize;
use tracing::trace;

use super::navigator::{Boundary, LogicalDirection, Navigator, TextContainer, TERMINATOR_LEN};

/// Controls whether a query rewinds to the start of the document first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslateOptions {
    /// Rewind before searching (default: true).
    ///
    /// With `false`, a query continues from where the previous one stopped, which
    /// keeps a run of increasing-offset queries linear in the document size.
    pub reset_to_start: bool,
}

impl TranslateOptions {
    /// Always rewind before searching.
    pub const RESET: Self = Self {
        reset_to_start: true,
    };

    /// Continue from the previous query when the offset allows it.
    pub const RESUME: Self = Self {
        reset_to_start: false,
    };
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self::RESET
    }
}

#[derive(Debug, Clone)]
struct TranslatorState<N> {
    /// Flattened offset of the boundary the cursor sits on.
    run_start: usize,
    cursor: N,
    end: N,
    /// Offset of the last offset query, if the cursor still reflects it.
    last_offset: Option<usize>,
}

impl<N: Navigator> TranslatorState<N> {
    fn at_start<D>(document: &D) -> Self
    where
        D: TextContainer<Navigator = N>,
    {
        Self {
            run_start: 0,
            cursor: document.content_start(),
            end: document.content_end(),
            last_offset: None,
        }
    }
}

/// Converts between flattened offsets and navigator positions of one document.
///
/// The translator keeps a forward-only cursor between calls. It must be reset
/// (or rebuilt) after the document changes; positions and offsets from an older
/// version of the document are not meaningful afterwards.
#[derive(Debug, Clone)]
pub struct OffsetTranslator<D: TextContainer> {
    document: D,
    state: TranslatorState<D::Navigator>,
}

impl<D: TextContainer> OffsetTranslator<D> {
    /// Create a translator positioned at the start of `document`.
    pub fn new(document: D) -> Self {
        let state = TranslatorState::at_start(&document);
        Self { document, state }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Rewind to the start of the document and re-read its edges.
    pub fn reset(&mut self) {
        self.state = TranslatorState::at_start(&self.document);
    }

    /// Position whose flattened offset is `offset`, searching from the start.
    pub fn position_at_offset(&mut self, offset: usize) -> D::Navigator {
        self.position_at_offset_with(offset, TranslateOptions::RESET)
    }

    /// Position whose flattened offset is `offset`.
    ///
    /// An offset equal to the end of a text run resolves to the end of that run.
    /// An offset that falls inside a terminator resolves to the start of the next
    /// run. Offsets inside the trailing terminators resolve to the last insertion
    /// position of the document, and anything beyond the text clamps to the end.
    ///
    /// Without `reset_to_start` the search resumes from the previous query. A
    /// smaller offset than last time rewinds anyway, so the answer is always the
    /// same as a fresh search.
    pub fn position_at_offset_with(
        &mut self,
        offset: usize,
        options: TranslateOptions,
    ) -> D::Navigator {
        let resumable = matches!(self.state.last_offset, Some(last) if last <= offset);
        if options.reset_to_start || !resumable {
            self.reset();
        }
        self.state.last_offset = Some(offset);
        self.seek(offset)
    }

    /// Start a sequence of increasing-offset queries that share one cursor.
    pub fn forward_scan(&mut self) -> ForwardScan<'_, D> {
        self.reset();
        self.state.last_offset = Some(0);
        ForwardScan { translator: self }
    }

    fn seek(&mut self, offset: usize) -> D::Navigator {
        let state = &mut self.state;
        let mut visited = 0usize;

        while state.cursor < state.end {
            match state.cursor.boundary(LogicalDirection::Forward) {
                Boundary::ElementEnd => {
                    if state
                        .cursor
                        .adjacent_element(LogicalDirection::Forward)
                        .is_terminated()
                    {
                        state.run_start += TERMINATOR_LEN;
                    }
                }
                Boundary::Text => {
                    let run_len = state.cursor.run_len(LogicalDirection::Forward);
                    let run_end = state.run_start + run_len;
                    if offset <= run_end {
                        // An offset inside the preceding terminator lands on the run start.
                        let local = offset.saturating_sub(state.run_start);
                        trace!(offset, run_start = state.run_start, visited, "offset inside text run");
                        return state.cursor.at_run_offset(local);
                    }
                    state.run_start = run_end;
                }
                Boundary::ElementStart | Boundary::None => {}
            }

            if !state.cursor.advance(LogicalDirection::Forward) {
                break;
            }
            visited += 1;
        }

        if state.run_start != 0 && offset <= state.run_start {
            if let Some(position) = state.end.insertion_position(LogicalDirection::Backward) {
                trace!(offset, run_start = state.run_start, visited, "offset on trailing terminator");
                return position;
            }
        }

        trace!(offset, run_start = state.run_start, visited, "offset clamped to document end");
        state.end.clone()
    }

    /// Flattened offset of `position`.
    ///
    /// Always searches from the start of the document. A position that is not inside
    /// a text run (an empty paragraph, a gap between blocks, the inside of a line
    /// break) maps to the offset just after the last terminator counted before it.
    pub fn offset_at_position(&mut self, position: &D::Navigator) -> usize {
        self.reset();
        let state = &mut self.state;
        let mut visited = 0usize;

        while state.cursor < state.end {
            match state.cursor.boundary(LogicalDirection::Forward) {
                Boundary::ElementEnd => {
                    if state
                        .cursor
                        .adjacent_element(LogicalDirection::Forward)
                        .is_terminated()
                    {
                        if *position <= state.cursor {
                            trace!(run_start = state.run_start, visited, "position before terminator");
                            return state.run_start;
                        }
                        state.run_start += TERMINATOR_LEN;
                    }
                }
                Boundary::Text => {
                    let len = state.cursor.run_len(LogicalDirection::Forward);
                    let run_end = state.cursor.at_run_offset(len);
                    if *position <= run_end {
                        let local = state.cursor.chars_to(position);
                        trace!(run_start = state.run_start, local, visited, "position inside text run");
                        return state.run_start + local;
                    }
                    state.run_start += len;
                }
                Boundary::ElementStart | Boundary::None => {}
            }

            if !state.cursor.advance(LogicalDirection::Forward) {
                break;
            }
            visited += 1;
        }

        trace!(run_start = state.run_start, visited, "position at document end");
        state.run_start
    }
}

/// A resumable cursor for queries with non-decreasing offsets.
///
/// Each query continues from where the previous one stopped. A query that goes
/// backwards is still answered correctly, at the cost of rescanning from the start.
#[derive(Debug)]
pub struct ForwardScan<'t, D: TextContainer> {
    translator: &'t mut OffsetTranslator<D>,
}

impl<D: TextContainer> ForwardScan<'_, D> {
    pub fn position_at(&mut self, offset: usize) -> D::Navigator {
        self.translator
            .position_at_offset_with(offset, TranslateOptions::RESUME)
    }

    /// Start and end positions of the span `start..start + len`.
    pub fn span(&mut self, start: usize, len: usize) -> (D::Navigator, D::Navigator) {
        let from = self.position_at(start);
        let to = self.position_at(start + len);
        (from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Document, DocumentBuilder};

    fn two_paragraphs() -> Document {
        DocumentBuilder::new()
            .text_paragraph("ab")
            .text_paragraph("cd")
            .build()
    }

    #[test]
    fn offsets_resolve_inside_runs() {
        let doc = two_paragraphs();
        let mut translator = doc.translator();

        let positions: Vec<usize> = (0..=10)
            .map(|offset| translator.position_at_offset(offset).index())
            .collect();
        // Symbols: <p> a b </p> <p> c d </p>
        assert_eq!(positions, vec![1, 2, 3, 5, 5, 6, 7, 7, 7, 8, 8]);
    }

    #[test]
    fn positions_resolve_to_offsets() {
        let doc = two_paragraphs();
        let mut translator = doc.translator();

        let offsets: Vec<usize> = (0..=doc.symbol_len())
            .map(|index| translator.offset_at_position(&doc.pointer(index)))
            .collect();
        assert_eq!(offsets, vec![0, 0, 1, 2, 4, 4, 5, 6, 8]);
    }

    #[test]
    fn second_paragraph_content_starts_after_terminator() {
        let doc = two_paragraphs();
        let mut translator = doc.translator();

        assert_eq!(translator.offset_at_position(&doc.pointer(5)), 4);
        assert_eq!(translator.position_at_offset(2), doc.pointer(3));
    }

    #[test]
    fn empty_paragraph_position_maps_to_its_terminator() {
        let doc = DocumentBuilder::new()
            .text_paragraph("a")
            .text_paragraph("")
            .text_paragraph("b")
            .build();
        let mut translator = doc.translator();

        // Symbols: <p> a </p> <p> </p> <p> b </p>
        assert_eq!(translator.offset_at_position(&doc.pointer(4)), 3);
        assert_eq!(translator.offset_at_position(&doc.pointer(3)), 3);
        assert_eq!(translator.position_at_offset(3), doc.pointer(6));
    }

    #[test]
    fn out_of_range_offset_clamps_to_end() {
        let doc = two_paragraphs();
        let mut translator = doc.translator();

        assert_eq!(translator.position_at_offset(10_000), doc.content_end());
        assert_eq!(
            translator.offset_at_position(&doc.content_end()),
            doc.text_len()
        );
    }

    #[test]
    fn empty_document() {
        let doc = Document::default();
        let mut translator = doc.translator();

        assert_eq!(translator.offset_at_position(&doc.content_start()), 0);
        assert_eq!(translator.position_at_offset(0), doc.content_start());
        assert_eq!(translator.position_at_offset(0), doc.content_end());
    }

    #[test]
    fn lone_empty_paragraph_resolves_inside_it() {
        let doc = DocumentBuilder::new().text_paragraph("").build();
        let mut translator = doc.translator();

        assert_eq!(translator.position_at_offset(0), doc.pointer(1));
        assert_eq!(translator.position_at_offset(2), doc.pointer(1));
        assert_eq!(translator.position_at_offset(3), doc.pointer(2));
        assert_eq!(translator.offset_at_position(&doc.pointer(1)), 0);
    }

    #[test]
    fn line_break_counts_two_characters() {
        let doc = DocumentBuilder::new()
            .paragraph(|p| {
                p.text("ab").line_break().text("cd");
            })
            .build();
        let mut translator = doc.translator();

        // Symbols: <p> a b <br> </br> c d </p>
        assert_eq!(translator.position_at_offset(4), doc.pointer(5));
        assert_eq!(translator.offset_at_position(&doc.pointer(5)), 4);
        assert_eq!(translator.offset_at_position(&doc.pointer(4)), 2);
        assert_eq!(translator.offset_at_position(&doc.content_end()), 8);
    }

    #[test]
    fn spans_split_runs_without_adding_characters() {
        let doc = DocumentBuilder::new()
            .paragraph(|p| {
                p.text("ab").span(|s| {
                    s.text("cd");
                });
                p.text("ef");
            })
            .build();
        let mut translator = doc.translator();

        // Symbols: <p> a b <span> c d </span> e f </p>
        assert_eq!(translator.position_at_offset(3), doc.pointer(5));
        assert_eq!(translator.position_at_offset(4), doc.pointer(6));
        assert_eq!(translator.position_at_offset(5), doc.pointer(8));
        assert_eq!(translator.offset_at_position(&doc.pointer(8)), 5);
    }

    #[test]
    fn indentation_is_not_counted() {
        let doc = DocumentBuilder::new()
            .indented_paragraph(2, 1, |p| {
                p.text("ab");
            })
            .text_paragraph("cd")
            .build();
        let mut translator = doc.translator();

        assert_eq!(doc.rendered_text(), "\t\t\tab\r\ncd\r\n");
        assert_eq!(translator.position_at_offset(0), doc.pointer(1));
        assert_eq!(translator.position_at_offset(4), doc.pointer(5));
    }

    #[test]
    fn resumed_queries_match_fresh_queries() {
        let doc = two_paragraphs();
        let mut fresh = doc.translator();
        let mut resumed = doc.translator();

        for offset in 0..=12 {
            assert_eq!(
                resumed.position_at_offset_with(offset, TranslateOptions::RESUME),
                fresh.position_at_offset(offset),
                "offset {offset}"
            );
        }
    }

    #[test]
    fn resume_after_backwards_query_rescans() {
        let doc = two_paragraphs();
        let mut translator = doc.translator();

        assert_eq!(
            translator.position_at_offset_with(6, TranslateOptions::RESUME),
            doc.pointer(7)
        );
        assert_eq!(
            translator.position_at_offset_with(1, TranslateOptions::RESUME),
            doc.pointer(2)
        );
    }

    #[test]
    fn offset_query_invalidates_resumable_state() {
        let doc = two_paragraphs();
        let mut translator = doc.translator();

        translator.position_at_offset_with(1, TranslateOptions::RESUME);
        assert_eq!(translator.offset_at_position(&doc.content_end()), 8);
        assert_eq!(
            translator.position_at_offset_with(2, TranslateOptions::RESUME),
            doc.pointer(3)
        );
    }

    #[test]
    fn forward_scan_spans() {
        let doc = two_paragraphs();
        let mut translator = doc.translator();
        let mut scan = translator.forward_scan();

        assert_eq!(scan.span(0, 2), (doc.pointer(1), doc.pointer(3)));
        assert_eq!(scan.span(4, 2), (doc.pointer(5), doc.pointer(7)));
    }

    #[test]
    fn default_options_reset() {
        assert_eq!(TranslateOptions::default(), TranslateOptions::RESET);
        let parsed: TranslateOptions = toml::from_str("").unwrap();
        assert!(parsed.reset_to_start);
        let parsed: TranslateOptions = toml::from_str("reset_to_start = false").unwrap();
        assert_eq!(parsed, TranslateOptions::RESUME);
    }
}
