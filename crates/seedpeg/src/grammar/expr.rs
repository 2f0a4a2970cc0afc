//! Parsing expressions and the algebra that builds them.

use compact_str::CompactString;

use crate::grammar::{CharSet, RuleId};

/// A parsing expression.
///
/// Expressions form a tree: every combinator exclusively owns its children.
/// The only back-reference is [`Expr::Rule`], which holds a [`RuleId`]
/// handle into the owning [`Grammar`](crate::grammar::Grammar), the one
/// construct that recurses by name.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Match a single code point.
    Char(char),
    /// Match an exact sequence of code points.
    Literal(CompactString),
    /// Match one code point belonging to a set.
    Set(CharSet),
    /// Match any single code point (fails only at end of input).
    Any,
    /// Succeed only at end of input.
    Eof,
    /// Evaluate the child in token mode: no implicit whitespace skipping
    /// inside its subtree.
    Terminal(Box<Expr>),
    /// Greedy repetition: at least `min` matches, then as many as possible.
    Repeat { expr: Box<Expr>, min: u32 },
    /// Match the child, or succeed without consuming input.
    Opt(Box<Expr>),
    /// Positive lookahead: succeed iff the child would succeed; never
    /// consumes input.
    Lookahead(Box<Expr>),
    /// Negative lookahead: succeed iff the child would fail; never consumes
    /// input.
    NotLookahead(Box<Expr>),
    /// On success of the child, advance the line counter and reset the
    /// column. Wraps the terminal that consumes a line break.
    Newline(Box<Expr>),
    /// Ordered concatenation.
    Seq(Vec<Expr>),
    /// Ordered alternation: the first alternative to succeed wins; later
    /// ones are tried only after the context is fully restored.
    Choice(Vec<Expr>),
    /// Reference to a named rule.
    Rule(RuleId),
}

impl Expr {
    /// Exact match of `text`, code point by code point.
    #[must_use]
    pub fn literal(text: impl Into<CompactString>) -> Self {
        Self::Literal(text.into())
    }

    /// One code point out of the enumerated set.
    #[must_use]
    pub fn set(chars: &str) -> Self {
        Self::Set(CharSet::from_chars(chars))
    }

    /// One code point in the inclusive range `lo..=hi`.
    #[must_use]
    pub fn range(lo: char, hi: char) -> Self {
        Self::Set(CharSet::range(lo, hi))
    }

    /// Any single code point.
    #[must_use]
    pub const fn any() -> Self {
        Self::Any
    }

    /// End of input.
    #[must_use]
    pub const fn eof() -> Self {
        Self::Eof
    }

    /// Force token-mode evaluation of `expr`.
    #[must_use]
    pub fn token(expr: impl Into<Self>) -> Self {
        Self::Terminal(Box::new(expr.into()))
    }

    /// Advance the line counter after `expr` matches.
    #[must_use]
    pub fn newline(expr: impl Into<Self>) -> Self {
        Self::Newline(Box::new(expr.into()))
    }

    /// Zero or more, greedy.
    #[must_use]
    pub fn star(expr: impl Into<Self>) -> Self {
        Self::Repeat {
            expr: Box::new(expr.into()),
            min: 0,
        }
    }

    /// One or more, greedy.
    #[must_use]
    pub fn plus(expr: impl Into<Self>) -> Self {
        Self::Repeat {
            expr: Box::new(expr.into()),
            min: 1,
        }
    }

    /// Optional match.
    #[must_use]
    pub fn opt(expr: impl Into<Self>) -> Self {
        Self::Opt(Box::new(expr.into()))
    }

    /// Positive lookahead.
    #[must_use]
    pub fn lookahead(expr: impl Into<Self>) -> Self {
        Self::Lookahead(Box::new(expr.into()))
    }

    /// Negative lookahead.
    #[must_use]
    pub fn not_lookahead(expr: impl Into<Self>) -> Self {
        Self::NotLookahead(Box::new(expr.into()))
    }

    /// Ordered concatenation of `exprs`.
    ///
    /// A single-element sequence collapses to its element.
    #[must_use]
    pub fn seq<I>(exprs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut vec: Vec<_> = exprs.into_iter().collect();
        if vec.len() == 1 {
            vec.pop().unwrap()
        } else {
            Self::Seq(vec)
        }
    }

    /// Ordered alternation over `exprs`.
    ///
    /// A single-element choice collapses to its element.
    #[must_use]
    pub fn choice<I>(exprs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut vec: Vec<_> = exprs.into_iter().collect();
        if vec.len() == 1 {
            vec.pop().unwrap()
        } else {
            Self::Choice(vec)
        }
    }

    /// `self` followed by `rhs`.
    #[must_use]
    pub fn then(self, rhs: impl Into<Self>) -> Self {
        match self {
            Self::Seq(mut children) => {
                children.push(rhs.into());
                Self::Seq(children)
            }
            other => Self::Seq(vec![other, rhs.into()]),
        }
    }

    /// `self`, or `rhs` if `self` fails.
    #[must_use]
    pub fn or(self, rhs: impl Into<Self>) -> Self {
        match self {
            Self::Choice(mut alternatives) => {
                alternatives.push(rhs.into());
                Self::Choice(alternatives)
            }
            other => Self::Choice(vec![other, rhs.into()]),
        }
    }
}

impl From<char> for Expr {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<&str> for Expr {
    fn from(text: &str) -> Self {
        Self::Literal(text.into())
    }
}

impl From<RuleId> for Expr {
    fn from(rule: RuleId) -> Self {
        Self::Rule(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn then_flattens_left_nesting() {
        let expr = Expr::from('a').then('b').then('c');
        match expr {
            Expr::Seq(children) => assert_eq!(children.len(), 3),
            other => panic!("expected Seq, got {other:?}"),
        }
    }

    #[test]
    fn or_flattens_left_nesting() {
        let expr = Expr::from('a').or('b').or('c');
        match expr {
            Expr::Choice(alternatives) => assert_eq!(alternatives.len(), 3),
            other => panic!("expected Choice, got {other:?}"),
        }
    }

    #[test]
    fn singleton_seq_collapses() {
        let expr = Expr::seq([Expr::from('a')]);
        assert!(matches!(expr, Expr::Char('a')));
    }

    #[test]
    fn singleton_choice_collapses() {
        let expr = Expr::choice([Expr::any()]);
        assert!(matches!(expr, Expr::Any));
    }

    #[test]
    fn literal_from_str() {
        let expr = Expr::from("abc");
        match expr {
            Expr::Literal(text) => assert_eq!(text, "abc"),
            other => panic!("expected Literal, got {other:?}"),
        }
    }

    #[test]
    fn repeat_builders_set_min() {
        assert!(matches!(
            Expr::star('a'),
            Expr::Repeat { min: 0, .. }
        ));
        assert!(matches!(
            Expr::plus('a'),
            Expr::Repeat { min: 1, .. }
        ));
    }
}
