//! Placeholder markers and the side table that maps them back to source text.
//!
//! A protected span is replaced in the working buffer by a marker of the form
//! `STX <decimal id> ETX`. Neither control character can start or continue a
//! CSS token, and any raw occurrence in the source is itself protected, so a
//! marker can never be confused with stylesheet content.

use std::borrow::Cow;
use std::ops::Range;

use nom::{
    IResult,
    character::complete::{char, digit1},
    combinator::map_res,
    sequence::delimited,
};

/// Opens a placeholder marker (START OF TEXT).
pub const MARKER_OPEN: char = '\u{2}';
/// Closes a placeholder marker (END OF TEXT).
pub const MARKER_CLOSE: char = '\u{3}';

/// What kind of source construct a placeholder stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// A `/* ... */` block comment.
    Comment,
    /// A single- or double-quoted string.
    String,
    /// A `url(...)` function token, quoted argument included.
    Url,
    /// An `@font-face` block.
    FontFace,
    /// A no-flip marker comment together with the declaration or rule it guards.
    NoFlip,
    /// A raw marker control character found in the source.
    Delimiter,
}

/// One protected span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub id: usize,
    pub kind: SpanKind,
    /// Byte range of the span in the source text.
    pub range: Range<usize>,
    /// Text written back on restore. Borrowed from the source unless a url
    /// pass replaced it.
    pub text: Cow<'a, str>,
}

/// Ordered table of protected spans for a single transform call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderMap<'a> {
    entries: Vec<Placeholder<'a>>,
}

impl<'a> PlaceholderMap<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `source[range]` and returns the marker that replaces it.
    ///
    /// Ranges must be pushed in ascending, non-overlapping order.
    pub fn push(&mut self, kind: SpanKind, source: &'a str, range: Range<usize>) -> String {
        debug_assert!(
            self.entries
                .last()
                .map_or(true, |last| last.range.end <= range.start),
            "placeholder ranges must be disjoint and ordered"
        );
        let id = self.entries.len();
        self.entries.push(Placeholder {
            id,
            kind,
            text: Cow::Borrowed(&source[range.clone()]),
            range,
        });
        marker(id)
    }

    pub fn get(&self, id: usize) -> Option<&Placeholder<'a>> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placeholder<'a>> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Placeholder<'a>> {
        self.entries.iter_mut()
    }
}

/// Renders the marker for `id`.
pub fn marker(id: usize) -> String {
    format!("{MARKER_OPEN}{id}{MARKER_CLOSE}")
}

/// Parses a marker at the start of `input`, returning its id.
pub fn parse_marker(input: &str) -> IResult<&str, usize> {
    map_res(
        delimited(char(MARKER_OPEN), digit1, char(MARKER_CLOSE)),
        |digits: &str| digits.parse::<usize>(),
    )(input)
}

/// Length in bytes of the marker at the start of `input`, if one is there.
pub(crate) fn marker_len(input: &str) -> Option<usize> {
    parse_marker(input)
        .ok()
        .map(|(rest, _)| input.len() - rest.len())
}
