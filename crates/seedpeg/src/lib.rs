//! # Seedpeg
//!
//! A recursive-descent engine for Parsing Expression Grammars with direct
//! and indirect left-recursion support.
//!
//! ## Overview
//!
//! Seedpeg evaluates a grammar, an immutable graph of parsing expressions
//! over named rules, directly against a sequence of code points. It
//! provides:
//!
//! - **An expression algebra**: terminals, ordered sequence and choice,
//!   greedy repetition, optional matches, and syntactic lookahead, composed
//!   with [`Expr`](grammar::Expr) builders and `then`/`or` methods
//! - **Left recursion**: rules that re-enter themselves at the same input
//!   position are resolved with a seed-then-grow protocol, producing the
//!   left-associative matches a left-recursive grammar means
//! - **Two-mode whitespace**: a designated whitespace rule is skipped
//!   implicitly inside sequences and repetitions, except inside
//!   [`Expr::token`](grammar::Expr::token) subtrees
//! - **Deferred actions**: rule callbacks fire in input order, only after
//!   the whole parse succeeds; matches that were backtracked over are
//!   never observed
//!
//! ## Quick Start
//!
//! A grammar that sums a list of integers:
//!
//! ```
//! use seedpeg::grammar::{Expr, GrammarBuilder};
//! use seedpeg::parser::parse_str;
//!
//! let mut builder = GrammarBuilder::<i64>::new();
//! let ws = builder.rule("ws");
//! let num = builder.rule("num");
//! let sum = builder.rule("sum");
//!
//! builder.define(ws, Expr::star(Expr::set(" \t")));
//! builder.define(num, Expr::token(Expr::plus(Expr::range('0', '9'))));
//! builder.define(sum, Expr::from(num).then(Expr::star(Expr::from('+').then(num))));
//! builder.on_match(num, |span, total: &mut i64| {
//!     *total += span.text().parse::<i64>().unwrap();
//! });
//! let grammar = builder.build().unwrap();
//!
//! let mut errors = Vec::new();
//! let mut total = 0;
//! assert!(parse_str(&grammar, "16 + 26", sum, ws, &mut errors, &mut total));
//! assert_eq!(total, 42);
//! ```
//!
//! ## Left recursion
//!
//! A rule is left-recursive when its leftmost production path re-enters it
//! at the same input offset. The evaluator detects this by offset equality
//! at rule entry and resolves it in two phases: a *seed* parse with the
//! recursive alternatives disabled establishes a base match, then a *grow*
//! loop re-evaluates the rule with the previous match exposed as a
//! same-position success, extending it greedily until it stops improving.
//! Direct left recursion and single-step indirect recursion through an
//! ordered choice are supported; two rules mutually head-recursive at the
//! same position through disjoint choice paths are not.
//!
//! ## Modules
//!
//! - [`grammar`] - Expression algebra, grammar builder, rule actions
//! - [`parser`] - The parse entry points
//! - [`input`] - Positions, ranges, and match spans
//! - [`error`] - Parse errors

pub mod error;
pub mod grammar;
pub mod input;
pub mod parser;

pub use error::ParseError;
pub use grammar::{Expr, Grammar, GrammarBuilder, GrammarError, RuleId};
pub use input::{MatchSpan, Position, SourceRange};
pub use parser::{parse, parse_str};
