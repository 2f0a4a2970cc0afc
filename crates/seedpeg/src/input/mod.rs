//! Input positions and source ranges.
//!
//! The engine treats input as an ordered sequence of code points (`&[char]`)
//! and never mutates it. A [`Position`] is a value-typed cursor into that
//! sequence: a code-point offset plus 1-based line and column counters.
//! Positions are copied wholesale when the evaluator snapshots state, and
//! ordering compares offsets only; two positions produced by the same parse
//! with equal offsets always carry equal line/column values.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A cursor into the input.
///
/// `offset` is the number of code points consumed since the beginning of the
/// input; `line` and `column` are 1-based and maintained by the evaluator
/// (the newline combinator advances `line`, every consumed code point
/// advances `column`).
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Position at the start of an input: offset 0, line 1, column 1.
    #[must_use]
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Consume one code point on the current line.
    pub fn advance_column(&mut self) {
        self.offset += 1;
        self.column += 1;
    }

    /// Start a new line.
    ///
    /// The offset is unchanged: the newline combinator wraps the terminal
    /// that consumed the line break, so the cursor has already advanced.
    pub fn advance_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open span of input between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRange {
    pub begin: Position,
    pub end: Position,
}

impl SourceRange {
    #[must_use]
    pub const fn new(begin: Position, end: Position) -> Self {
        Self { begin, end }
    }

    /// Number of code points covered by the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset - self.begin.offset
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.begin.offset == self.end.offset
    }
}

#[cfg(feature = "diagnostics")]
impl From<SourceRange> for miette::SourceSpan {
    fn from(range: SourceRange) -> Self {
        Self::new(range.begin.offset.into(), range.len())
    }
}

/// A successful rule match, as delivered to a registered action.
///
/// Carries the begin and end positions of the match together with the
/// matched slice of the input, so an action can read the text it matched
/// without the engine exposing any mutable state.
#[derive(Debug, Clone, Copy)]
pub struct MatchSpan<'a> {
    pub begin: Position,
    pub end: Position,
    source: &'a [char],
}

impl<'a> MatchSpan<'a> {
    pub(crate) fn new(begin: Position, end: Position, source: &'a [char]) -> Self {
        Self { begin, end, source }
    }

    /// The matched code points.
    #[must_use]
    pub fn chars(&self) -> &'a [char] {
        self.source
    }

    /// The matched text, collected into an owned string.
    #[must_use]
    pub fn text(&self) -> String {
        self.source.iter().collect()
    }

    /// The span covered by this match.
    #[must_use]
    pub fn range(&self) -> SourceRange {
        SourceRange::new(self.begin, self.end)
    }
}
