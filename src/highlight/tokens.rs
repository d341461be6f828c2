//! Regex-based token spans over flattened text.

use regex::Regex;

use crate::document::CharIndex;

/// A named pattern whose matches are highlighted.
#[derive(Debug, Clone)]
pub struct HighlightRule {
    name: String,
    pattern: Regex,
}

impl HighlightRule {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

/// A matched span in flattened char offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    pub start: usize,
    pub len: usize,
    /// Index of the rule that produced this token.
    pub rule: usize,
}

impl Token {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Collector for tokens of every rule.
struct TokenCollector<'a> {
    index: &'a CharIndex,
    tokens: Vec<Token>,
}

impl<'a> TokenCollector<'a> {
    fn new(index: &'a CharIndex) -> Self {
        Self {
            index,
            tokens: Vec::new(),
        }
    }

    fn push(&mut self, byte_span: std::ops::Range<usize>, rule: usize) {
        let span = self.index.char_span(&byte_span);
        // Empty matches have nothing to style.
        if span.start < span.end {
            self.tokens.push(Token {
                start: span.start,
                len: span.end - span.start,
                rule,
            });
        }
    }

    fn into_tokens(mut self) -> Vec<Token> {
        self.tokens.sort_by_key(|t| (t.start, t.rule));
        self.tokens
    }
}

/// Collect tokens for `rules` over `text`, sorted by start offset then rule order.
pub(crate) fn collect_tokens(rules: &[HighlightRule], text: &str) -> Vec<Token> {
    let index = CharIndex::new(text);
    let mut collector = TokenCollector::new(&index);

    for (rule_index, rule) in rules.iter().enumerate() {
        for found in rule.pattern.find_iter(text) {
            collector.push(found.range(), rule_index);
        }
    }

    collector.into_tokens()
}
