//! Per-parse mutable state.

use crate::grammar::{Grammar, RuleId};
use crate::input::Position;

/// How a rule entry behaves while left recursion is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LrMode {
    /// Ordinary evaluation.
    Parse,
    /// Seed phase: a recursive re-entry at the same offset fails, so the
    /// non-recursive alternatives establish a base match.
    Reject,
    /// Grow phase: a recursive re-entry at the same offset succeeds without
    /// evaluating, exposing the previous iteration's match as the left
    /// operand.
    Accept,
}

/// Left-recursion bookkeeping for one rule, scoped to one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LrState {
    pub mode: LrMode,
    /// Offset of the most recent entry into the rule. `None` until the rule
    /// is first entered; left recursion is detected when a new entry sees
    /// its own offset here.
    pub last_offset: Option<usize>,
}

impl LrState {
    pub(crate) const INITIAL: Self = Self {
        mode: LrMode::Parse,
        last_offset: None,
    };
}

/// Journal entry: a successful match of an action-bearing rule.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MatchEntry {
    pub rule: RuleId,
    pub begin: Position,
    pub end: Position,
}

/// Saved state for backtracking: cursor plus journal length.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Snapshot {
    pub cursor: Position,
    journal_len: usize,
}

/// Mutable state of one parse: the cursor, the furthest-error cursor, the
/// match journal, and the per-rule left-recursion table.
///
/// The grammar itself stays immutable; everything a parse mutates lives
/// here, which is what makes a grammar reusable and shareable across
/// parses.
pub(crate) struct Context<'g, D> {
    pub grammar: &'g Grammar<D>,
    pub input: &'g [char],
    pub whitespace: RuleId,
    pub cursor: Position,
    pub error_cursor: Position,
    pub journal: Vec<MatchEntry>,
    pub lr: Vec<LrState>,
}

impl<'g, D> Context<'g, D> {
    pub(crate) fn new(grammar: &'g Grammar<D>, input: &'g [char], whitespace: RuleId) -> Self {
        Self {
            grammar,
            input,
            whitespace,
            cursor: Position::start(),
            error_cursor: Position::start(),
            journal: Vec::new(),
            lr: vec![LrState::INITIAL; grammar.rule_count()],
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.cursor.offset >= self.input.len()
    }

    /// Code point under the cursor, if any.
    pub(crate) fn current(&self) -> Option<char> {
        self.input.get(self.cursor.offset).copied()
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            cursor: self.cursor,
            journal_len: self.journal.len(),
        }
    }

    /// Restore the cursor and truncate the journal to the snapshot. The
    /// error cursor is deliberately untouched: errors record the furthest
    /// point any attempt reached.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.cursor = snapshot.cursor;
        self.journal.truncate(snapshot.journal_len);
    }

    /// Push the error cursor forward to the current position, never back.
    pub(crate) fn note_error(&mut self) {
        if self.cursor > self.error_cursor {
            self.error_cursor = self.cursor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{Expr, GrammarBuilder};

    fn sample_grammar() -> (Grammar<()>, RuleId) {
        let mut builder = GrammarBuilder::new();
        let ws = builder.rule("ws");
        builder.define(ws, Expr::star(Expr::set(" ")));
        (builder.build().unwrap(), ws)
    }

    #[test]
    fn restore_resets_cursor_and_truncates_journal() {
        let (grammar, ws) = sample_grammar();
        let input: Vec<char> = "ab".chars().collect();
        let mut ctx = Context::new(&grammar, &input, ws);

        let snapshot = ctx.snapshot();
        ctx.cursor.advance_column();
        ctx.journal.push(MatchEntry {
            rule: ws,
            begin: snapshot.cursor,
            end: ctx.cursor,
        });
        assert_eq!(ctx.journal.len(), 1);

        ctx.restore(snapshot);
        assert_eq!(ctx.cursor.offset, 0);
        assert!(ctx.journal.is_empty());
    }

    #[test]
    fn note_error_is_monotone() {
        let (grammar, ws) = sample_grammar();
        let input: Vec<char> = "abc".chars().collect();
        let mut ctx = Context::new(&grammar, &input, ws);

        ctx.cursor.advance_column();
        ctx.cursor.advance_column();
        ctx.note_error();
        assert_eq!(ctx.error_cursor.offset, 2);

        let snapshot = Snapshot {
            cursor: Position::start(),
            journal_len: 0,
        };
        ctx.restore(snapshot);
        ctx.note_error();
        assert_eq!(ctx.error_cursor.offset, 2, "error cursor never moves back");
    }

    #[test]
    fn lr_table_starts_in_parse_mode() {
        let (grammar, ws) = sample_grammar();
        let input: Vec<char> = Vec::new();
        let ctx = Context::new(&grammar, &input, ws);
        assert_eq!(ctx.lr.len(), 1);
        assert_eq!(ctx.lr[ws.index()], LrState::INITIAL);
    }
}
