//! # Grammar Module
//!
//! Grammar definition for parsing expression grammars.
//!
//! ## Overview
//!
//! A grammar is built in two phases: declare rules with
//! [`GrammarBuilder::rule`] (yielding [`RuleId`] handles that expressions
//! can reference, including recursively), then give each rule its
//! expression with [`GrammarBuilder::define`]. Expressions are composed
//! from the [`Expr`] algebra: terminals (`Char`, `Literal`, `Set`, `Any`,
//! `Eof`), combinators (`Seq`, `Choice`, `Repeat`, `Opt`, lookaheads), and
//! the mode/line wrappers (`Terminal`, `Newline`).
//!
//! Rules may carry at most one action, registered with
//! [`GrammarBuilder::on_match`]; actions fire in input order only after a
//! parse succeeds (see [`crate::parser::parse`]).
//!
//! ## Usage
//!
//! ```
//! use seedpeg::grammar::{Expr, GrammarBuilder};
//!
//! let mut builder = GrammarBuilder::<Vec<String>>::new();
//! let ws = builder.rule("ws");
//! let word = builder.rule("word");
//! builder.define(ws, Expr::star(Expr::set(" \t")));
//! builder.define(word, Expr::token(Expr::plus(Expr::range('a', 'z'))));
//! builder.on_match(word, |span, words| words.push(span.text()));
//! let grammar = builder.build().unwrap();
//! assert_eq!(grammar.rule_count(), 2);
//! ```

mod builder;
mod char_set;
pub mod expr;

pub use builder::{Action, Grammar, GrammarBuilder, GrammarError};
pub use char_set::CharSet;
pub use expr::Expr;

/// Identity of a rule within its grammar.
///
/// Ids are dense indices assigned at declaration order by
/// [`GrammarBuilder::rule`] and are meaningful only for the grammar that
/// issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleId(u32);

impl RuleId {
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("grammar has more than u32::MAX rules"))
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
