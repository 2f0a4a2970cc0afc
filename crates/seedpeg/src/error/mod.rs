//! Parse error types.
//!
//! A failed parse reports exactly one error, attached to the furthest
//! position any attempt reached (the "furthest failure" heuristic: every
//! terminal mismatch pushes the error cursor forward, and ordered choice
//! never rolls it back).
//!
//! When the `diagnostics` feature is enabled, errors derive
//! [`miette::Diagnostic`] for rich reporting.

use thiserror::Error;

use crate::input::{Position, SourceRange};

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// Error produced by a failed parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum ParseError {
    /// The input did not match the grammar. The span covers one code point
    /// at the furthest position any alternative reached.
    #[error("syntax error at line {}, column {}", .span.begin.line, .span.begin.column)]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(seedpeg::syntax_error)))]
    Syntax {
        #[cfg_attr(feature = "diagnostics", label("unexpected input"))]
        span: SourceRange,
    },

    /// The grammar matched but input remained, and every attempt to consume
    /// the remainder reached the end of input. Zero-length span at the end.
    #[error("unexpected end of input at line {}, column {}", .at.line, .at.column)]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(seedpeg::invalid_eof)))]
    InvalidEof { at: Position },
}

impl ParseError {
    /// The span this error points at.
    #[must_use]
    pub const fn span(&self) -> SourceRange {
        match self {
            Self::Syntax { span } => *span,
            Self::InvalidEof { at } => SourceRange::new(*at, *at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(offset: usize, line: u32, column: u32) -> Position {
        Position {
            offset,
            line,
            column,
        }
    }

    #[test]
    fn syntax_error_display_carries_line_and_column() {
        let err = ParseError::Syntax {
            span: SourceRange::new(pos(4, 2, 3), pos(5, 2, 4)),
        };
        assert_eq!(err.to_string(), "syntax error at line 2, column 3");
        assert_eq!(err.span().len(), 1);
    }

    #[test]
    fn eof_error_has_empty_span() {
        let err = ParseError::InvalidEof { at: pos(7, 1, 8) };
        assert!(err.span().is_empty());
        assert_eq!(err.to_string(), "unexpected end of input at line 1, column 8");
    }
}
