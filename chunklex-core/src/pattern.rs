//! Resumable pattern matching over the input buffer
//!
//! The engine owns the search cursor; a [`Pattern`] only answers "where is the
//! next match at or after this offset".

use regex::Regex;
use smallvec::SmallVec;
use std::ops::Range;
use std::sync::Arc;

/// Byte ranges of a match and its capture groups, relative to the haystack
///
/// Index 0 is the whole match. Groups that did not participate are `None`.
pub type Spans = SmallVec<[Option<Range<usize>>; 4]>;

/// A matcher that can resume searching from an arbitrary offset
pub trait Pattern {
    /// Find the leftmost match starting at or after `start`
    ///
    /// Anchors and word boundaries must see the whole `haystack`, not just the
    /// suffix beginning at `start`.
    fn find_spans_at(&self, haystack: &str, start: usize) -> Option<Spans>;

    /// Number of groups, counting the implicit whole-match group
    fn group_count(&self) -> usize;

    /// Index of a named group
    fn group_index(&self, name: &str) -> Option<usize>;
}

impl Pattern for Regex {
    fn find_spans_at(&self, haystack: &str, start: usize) -> Option<Spans> {
        self.captures_at(haystack, start)
            .map(|caps| caps.iter().map(|m| m.map(|m| m.range())).collect())
    }

    fn group_count(&self) -> usize {
        self.captures_len()
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        self.capture_names().position(|n| n == Some(name))
    }
}

impl<P: Pattern + ?Sized> Pattern for &P {
    fn find_spans_at(&self, haystack: &str, start: usize) -> Option<Spans> {
        (**self).find_spans_at(haystack, start)
    }

    fn group_count(&self) -> usize {
        (**self).group_count()
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        (**self).group_index(name)
    }
}

impl<P: Pattern + ?Sized> Pattern for Arc<P> {
    fn find_spans_at(&self, haystack: &str, start: usize) -> Option<Spans> {
        (**self).find_spans_at(haystack, start)
    }

    fn group_count(&self) -> usize {
        (**self).group_count()
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        (**self).group_index(name)
    }
}

/// A resolved match, or a piece of separator text, borrowed from the buffer
///
/// Group 0 is the text this unit consumes. After a leave-behind split it no
/// longer covers the whole match; the other groups are left untouched.
#[derive(Debug, Clone)]
pub struct Match<'h> {
    haystack: &'h str,
    spans: Spans,
    consumed: Range<usize>,
    base: usize,
}

impl<'h> Match<'h> {
    /// Build a match from pattern spans; `base` is the stream offset of `haystack`
    pub(crate) fn new(haystack: &'h str, spans: Spans, base: usize) -> Self {
        let consumed = spans
            .first()
            .cloned()
            .flatten()
            .unwrap_or(0..haystack.len());
        Self {
            haystack,
            spans,
            consumed,
            base,
        }
    }

    /// Wrap plain text as a single-group match starting at stream offset `offset`
    pub(crate) fn text(text: &'h str, offset: usize) -> Self {
        let mut spans = Spans::new();
        spans.push(Some(0..text.len()));
        Self {
            haystack: text,
            spans,
            consumed: 0..text.len(),
            base: offset,
        }
    }

    /// Text consumed by this unit
    pub fn as_str(&self) -> &'h str {
        &self.haystack[self.consumed.clone()]
    }

    /// Text of the whole match, before any leave-behind split
    pub fn full(&self) -> &'h str {
        match self.span(0) {
            Some(span) => &self.haystack[span],
            None => self.as_str(),
        }
    }

    /// Text of group `index`; group 0 is the consumed text
    pub fn get(&self, index: usize) -> Option<&'h str> {
        if index == 0 {
            return Some(self.as_str());
        }
        self.span(index).map(|span| &self.haystack[span])
    }

    /// Number of groups, counting group 0
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Always false; a match has at least group 0
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Absolute byte offset of the consumed text in the stream
    pub fn offset(&self) -> usize {
        self.base + self.consumed.start
    }

    pub(crate) fn span(&self, index: usize) -> Option<Range<usize>> {
        self.spans.get(index).cloned().flatten()
    }

    pub(crate) fn slice(&self, span: Range<usize>) -> &'h str {
        &self.haystack[span]
    }

    /// Stream offset of haystack offset `at`
    pub(crate) fn offset_of(&self, at: usize) -> usize {
        self.base + at
    }

    /// Text between the start of the consumed span and `at`
    pub(crate) fn prefix_until(&self, at: usize) -> &'h str {
        let end = at.clamp(self.consumed.start, self.consumed.end);
        &self.haystack[self.consumed.start..end]
    }

    /// Narrow the consumed span to start at haystack offset `at`
    pub(crate) fn consume_from(&mut self, at: usize) {
        self.consumed.start = at.clamp(self.consumed.start, self.consumed.end);
    }
}
