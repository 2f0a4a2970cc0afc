//! # Parser Module
//!
//! The parse driver and its supporting state.
//!
//! [`parse`] is the public entry point: it primes leading whitespace,
//! evaluates the root rule, consumes trailing whitespace, verifies the
//! whole input was consumed, and only then replays the match journal to
//! fire registered actions in input order. A failed parse fires no actions
//! and reports exactly one [`ParseError`] at the furthest position any
//! attempt reached.

mod context;
mod engine;

use crate::error::ParseError;
use crate::grammar::{Grammar, RuleId};
use crate::input::{MatchSpan, SourceRange};

pub(crate) use context::Context;
pub(crate) use engine::{Mode, Status};

/// Parse `input` against `root`, skipping `whitespace` between tokens.
///
/// On success, every action registered on the grammar is invoked once per
/// surviving match, in input order (ties broken by completion order: inner
/// rules before outer), each receiving the match span and `data`. Matches
/// that were backtracked over never fire.
///
/// On failure, exactly one error is pushed into `errors`: a
/// [`ParseError::Syntax`] at the furthest mismatch, or
/// [`ParseError::InvalidEof`] when every attempt to consume the remainder
/// ran off the end of the input. No actions fire on failure.
///
/// The whitespace rule is evaluated in token mode and is a best-effort
/// consumer; it must not be left-recursive.
pub fn parse<D>(
    grammar: &Grammar<D>,
    input: &[char],
    root: RuleId,
    whitespace: RuleId,
    errors: &mut Vec<ParseError>,
    data: &mut D,
) -> bool {
    let mut ctx = Context::new(grammar, input, whitespace);

    ctx.skip_whitespace();

    // An unconsumed GrowDone can only escape here for recursion shapes the
    // seed/grow protocol does not support; it is reported as an ordinary
    // failure and never crosses the public boundary.
    let matched = matches!(ctx.eval_rule(root, Mode::NonToken), Status::Matched);
    if !matched {
        errors.push(syntax_error(&ctx));
        return false;
    }

    ctx.skip_whitespace();

    if !ctx.at_end() {
        if ctx.error_cursor.offset < input.len() {
            errors.push(syntax_error(&ctx));
        } else {
            errors.push(ParseError::InvalidEof {
                at: ctx.error_cursor,
            });
        }
        return false;
    }

    for entry in &ctx.journal {
        let span = MatchSpan::new(
            entry.begin,
            entry.end,
            &input[entry.begin.offset..entry.end.offset],
        );
        grammar.run_action(entry.rule, &span, data);
    }
    true
}

/// [`parse`] over a `&str`, collected into code points first.
pub fn parse_str<D>(
    grammar: &Grammar<D>,
    text: &str,
    root: RuleId,
    whitespace: RuleId,
    errors: &mut Vec<ParseError>,
    data: &mut D,
) -> bool {
    let input: Vec<char> = text.chars().collect();
    parse(grammar, &input, root, whitespace, errors, data)
}

fn syntax_error<D>(ctx: &Context<'_, D>) -> ParseError {
    let begin = ctx.error_cursor;
    let mut end = begin;
    end.advance_column();
    ParseError::Syntax {
        span: SourceRange::new(begin, end),
    }
}
