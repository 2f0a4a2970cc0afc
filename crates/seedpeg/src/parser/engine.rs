//! The evaluator: expression dispatch and the rule entry protocol.
//!
//! Evaluation is a single recursive `eval` over the expression tree,
//! parameterised on a whitespace [`Mode`] instead of being duplicated per
//! mode: in [`Mode::NonToken`] the compound combinators interleave
//! whitespace skipping, in [`Mode::Token`] they do not, and the `Terminal`
//! wrapper switches its subtree to token mode.
//!
//! Left recursion is handled at rule entry. A re-entry of a rule at the
//! offset it was last entered at switches the rule into the seed/grow
//! protocol: the seed evaluation runs with recursive re-entries rejected so
//! a base case can match, then the grow loop re-evaluates the rule with the
//! previous match exposed as a same-position success, extending it greedily.
//! When growth stops, a [`Status::GrowDone`] travels up through every frame
//! of the recursive descent (combinators pass it through untouched) until
//! the nearest enclosing frame of the same rule that is evaluating
//! ordinarily converts it into a match. Rule frames it passes through
//! restore their rule's recursion state on the way.

use crate::grammar::{CharSet, Expr, RuleId};
use crate::parser::context::{Context, LrMode, MatchEntry};

/// Whitespace discipline for the current subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Skip whitespace inside `Seq` and `Repeat`.
    NonToken,
    /// No implicit whitespace: the subtree is a single token.
    Token,
}

/// Outcome of evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub(crate) enum Status {
    Matched,
    Failed,
    /// A left-recursive rule finished growing. Propagates through every
    /// combinator frame without restoring the context, and is caught by the
    /// nearest enclosing ordinarily-evaluating frame of the named rule.
    GrowDone(RuleId),
}

impl<D> Context<'_, D> {
    pub(crate) fn eval(&mut self, expr: &Expr, mode: Mode) -> Status {
        match expr {
            Expr::Char(expected) => self.match_char(*expected),
            Expr::Literal(text) => self.match_literal(text),
            Expr::Set(set) => self.match_set(set),
            Expr::Any => self.match_any(),
            Expr::Eof => {
                if self.at_end() {
                    Status::Matched
                } else {
                    Status::Failed
                }
            }
            Expr::Terminal(child) => self.eval(child, Mode::Token),
            Expr::Newline(child) => {
                let status = self.eval(child, mode);
                if status == Status::Matched {
                    self.cursor.advance_line();
                }
                status
            }
            Expr::Opt(child) => {
                let snapshot = self.snapshot();
                match self.eval(child, mode) {
                    Status::Failed => {
                        self.restore(snapshot);
                        Status::Matched
                    }
                    status => status,
                }
            }
            Expr::Lookahead(child) => {
                let snapshot = self.snapshot();
                match self.eval(child, mode) {
                    done @ Status::GrowDone(_) => done,
                    status => {
                        self.restore(snapshot);
                        status
                    }
                }
            }
            Expr::NotLookahead(child) => {
                let snapshot = self.snapshot();
                match self.eval(child, mode) {
                    done @ Status::GrowDone(_) => done,
                    Status::Matched => {
                        self.restore(snapshot);
                        Status::Failed
                    }
                    Status::Failed => {
                        self.restore(snapshot);
                        Status::Matched
                    }
                }
            }
            Expr::Repeat { expr: child, min } => self.eval_repeat(child, *min, mode),
            Expr::Seq(children) => self.eval_seq(children, mode),
            Expr::Choice(alternatives) => self.eval_choice(alternatives, mode),
            Expr::Rule(id) => self.eval_rule(*id, mode),
        }
    }

    fn eval_seq(&mut self, children: &[Expr], mode: Mode) -> Status {
        let snapshot = self.snapshot();
        for (index, child) in children.iter().enumerate() {
            if mode == Mode::NonToken && index > 0 {
                self.skip_whitespace();
            }
            match self.eval(child, mode) {
                Status::Matched => {}
                Status::Failed => {
                    self.restore(snapshot);
                    return Status::Failed;
                }
                done => return done,
            }
        }
        Status::Matched
    }

    fn eval_choice(&mut self, alternatives: &[Expr], mode: Mode) -> Status {
        let snapshot = self.snapshot();
        for alternative in alternatives {
            match self.eval(alternative, mode) {
                Status::Failed => self.restore(snapshot),
                status => return status,
            }
        }
        Status::Failed
    }

    fn eval_repeat(&mut self, child: &Expr, min: u32, mode: Mode) -> Status {
        let start = self.snapshot();
        let mut count: u32 = 0;
        loop {
            if mode == Mode::NonToken {
                self.skip_whitespace();
            }
            let attempt = self.snapshot();
            match self.eval(child, mode) {
                Status::Matched => {
                    count += 1;
                    // a zero-width match would repeat forever
                    if self.cursor.offset == attempt.cursor.offset {
                        break;
                    }
                }
                Status::Failed => {
                    self.restore(attempt);
                    break;
                }
                done => return done,
            }
        }
        if count < min {
            self.restore(start);
            return Status::Failed;
        }
        Status::Matched
    }

    /// Rule entry: left-recursion detection and the seed/grow protocol.
    pub(crate) fn eval_rule(&mut self, id: RuleId, mode: Mode) -> Status {
        let saved = self.lr[id.index()];
        let offset = self.cursor.offset;
        let recursed = saved.last_offset == Some(offset);
        self.lr[id.index()].last_offset = Some(offset);

        let status = match saved.mode {
            LrMode::Parse => {
                if recursed {
                    self.seed_and_grow(id, mode)
                } else {
                    match self.eval_rule_body(id, mode) {
                        // growth of this rule completed somewhere below:
                        // the cursor already sits at the grown position
                        Status::GrowDone(rule) if rule == id => Status::Matched,
                        status => status,
                    }
                }
            }
            LrMode::Reject => {
                if recursed {
                    // breaks the infinite regress of the seed evaluation
                    Status::Failed
                } else {
                    self.lr[id.index()].mode = LrMode::Parse;
                    match self.eval_rule_body(id, mode) {
                        Status::GrowDone(rule) if rule == id => Status::Matched,
                        status => status,
                    }
                }
            }
            LrMode::Accept => {
                if recursed {
                    // the previous grow iteration's match is the left operand
                    Status::Matched
                } else {
                    self.lr[id.index()].mode = LrMode::Parse;
                    match self.eval_rule_body(id, mode) {
                        Status::GrowDone(rule) if rule == id => Status::Matched,
                        status => status,
                    }
                }
            }
        };

        self.lr[id.index()] = saved;
        status
    }

    fn seed_and_grow(&mut self, id: RuleId, mode: Mode) -> Status {
        // seed: reject recursive re-entries so a base alternative can match
        self.lr[id.index()].mode = LrMode::Reject;
        match self.eval_rule_body(id, mode) {
            Status::Failed => Status::Failed,
            done @ Status::GrowDone(_) => done,
            Status::Matched => {
                // grow: expose the match so far as a same-position success
                // and re-evaluate until the match stops improving
                self.lr[id.index()].mode = LrMode::Accept;
                loop {
                    let snapshot = self.snapshot();
                    self.lr[id.index()].last_offset = Some(self.cursor.offset);
                    match self.eval_rule_body(id, mode) {
                        Status::Matched if self.cursor.offset > snapshot.cursor.offset => {}
                        Status::Matched | Status::Failed => {
                            self.restore(snapshot);
                            break;
                        }
                        done @ Status::GrowDone(_) => return done,
                    }
                }
                Status::GrowDone(id)
            }
        }
    }

    /// Evaluate a rule's expression, journalling the match when the rule
    /// has an action registered.
    fn eval_rule_body(&mut self, id: RuleId, mode: Mode) -> Status {
        let grammar = self.grammar;
        let expr = grammar.expr(id);
        if grammar.has_action(id) {
            let begin = self.cursor;
            let status = self.eval(expr, mode);
            if status == Status::Matched {
                self.journal.push(MatchEntry {
                    rule: id,
                    begin,
                    end: self.cursor,
                });
            }
            status
        } else {
            self.eval(expr, mode)
        }
    }

    /// Best-effort whitespace consumption: the designated whitespace rule,
    /// always in token mode, outcome ignored.
    pub(crate) fn skip_whitespace(&mut self) {
        let whitespace = self.whitespace;
        let _ = self.eval_rule(whitespace, Mode::Token);
    }

    fn match_char(&mut self, expected: char) -> Status {
        if let Some(c) = self.current() {
            if c == expected {
                self.cursor.advance_column();
                return Status::Matched;
            }
        }
        self.note_error();
        Status::Failed
    }

    fn match_literal(&mut self, text: &str) -> Status {
        let start = self.cursor;
        for expected in text.chars() {
            match self.current() {
                Some(c) if c == expected => self.cursor.advance_column(),
                _ => {
                    // the furthest reach includes the prefix already matched
                    self.note_error();
                    self.cursor = start;
                    return Status::Failed;
                }
            }
        }
        Status::Matched
    }

    fn match_set(&mut self, set: &CharSet) -> Status {
        if let Some(c) = self.current() {
            if set.contains(c) {
                self.cursor.advance_column();
                return Status::Matched;
            }
        }
        self.note_error();
        Status::Failed
    }

    fn match_any(&mut self) -> Status {
        if self.current().is_some() {
            self.cursor.advance_column();
            return Status::Matched;
        }
        self.note_error();
        Status::Failed
    }
}
