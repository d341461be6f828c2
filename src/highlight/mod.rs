//! Highlighting: token spans over flattened text mapped onto document positions.
//!
//! This is the caller side of the translator. Rules find `(start, len)` spans in
//! `Document::text()`; each span is translated twice to get the two positions a
//! host needs to apply a style.

mod tokens;

use tracing::debug;

use crate::document::{DocPointer, Document};
use crate::translate::{Navigator, OffsetTranslator, TextContainer, TranslateOptions};

pub use tokens::{HighlightRule, Token};

/// A highlighted range in document positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRange<'h, P> {
    /// Name of the rule that matched.
    pub rule: &'h str,
    pub token: Token,
    pub start: P,
    pub end: P,
}

/// An ordered set of highlight rules.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    rules: Vec<HighlightRule>,
}

impl Highlighter {
    pub fn new(rules: Vec<HighlightRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Token spans over flattened `text`, sorted by start offset.
    pub fn tokens(&self, text: &str) -> Vec<Token> {
        tokens::collect_tokens(&self.rules, text)
    }

    /// Highlight `document`, translating every token into document positions.
    pub fn highlight<'d>(
        &self,
        document: &'d Document,
        options: TranslateOptions,
    ) -> Vec<StyledRange<'_, DocPointer<'d>>> {
        let text = document.text();
        self.highlight_container(document, &text, options)
    }

    /// Highlight any host container whose flattened text is `text`.
    ///
    /// Without `reset_to_start`, all spans share one forward scan.
    pub fn highlight_container<D, N>(
        &self,
        container: D,
        text: &str,
        options: TranslateOptions,
    ) -> Vec<StyledRange<'_, N>>
    where
        D: TextContainer<Navigator = N>,
        N: Navigator,
    {
        let tokens = self.tokens(text);
        let mut translator = OffsetTranslator::new(container);

        let ranges: Vec<_> = if options.reset_to_start {
            tokens
                .into_iter()
                .map(|token| {
                    let start = translator.position_at_offset(token.start);
                    let end = translator.position_at_offset(token.end());
                    self.styled(token, start, end)
                })
                .collect()
        } else {
            let mut scan = translator.forward_scan();
            tokens
                .into_iter()
                .map(|token| {
                    let (start, end) = scan.span(token.start, token.len);
                    self.styled(token, start, end)
                })
                .collect()
        };

        debug!(
            rules = self.rules.len(),
            ranges = ranges.len(),
            reset_to_start = options.reset_to_start,
            "highlighted document"
        );
        ranges
    }

    fn styled<P>(&self, token: Token, start: P, end: P) -> StyledRange<'_, P> {
        StyledRange {
            rule: self.rules[token.rule].name(),
            token,
            start,
            end,
        }
    }
}
