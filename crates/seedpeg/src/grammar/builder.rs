//! Grammar construction and validation.

use compact_str::CompactString;
use hashbrown::HashMap;

use crate::grammar::{Expr, RuleId};
use crate::input::MatchSpan;

/// Callback invoked for a rule match after the overall parse succeeds.
///
/// Receives the match span (begin position, end position, matched text) and
/// the caller's user data.
pub type Action<D> = Box<dyn Fn(&MatchSpan<'_>, &mut D)>;

struct RuleData<D> {
    name: CompactString,
    expr: Expr,
    action: Option<Action<D>>,
}

/// A compiled grammar: the expression graph plus the rule registry.
///
/// Immutable once built. All per-parse mutable state (including the
/// left-recursion bookkeeping for each rule) lives in the parse context, so
/// one grammar may serve any number of parses, including concurrently from
/// multiple threads when `D` permits it.
pub struct Grammar<D = ()> {
    rules: Vec<RuleData<D>>,
}

impl<D> std::fmt::Debug for Grammar<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar")
            .field("rule_count", &self.rules.len())
            .finish()
    }
}

impl<D> Grammar<D> {
    /// Number of rules in the grammar.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Name the rule was declared with.
    #[must_use]
    pub fn rule_name(&self, id: RuleId) -> &str {
        &self.rules[id.index()].name
    }

    pub(crate) fn expr(&self, id: RuleId) -> &Expr {
        &self.rules[id.index()].expr
    }

    pub(crate) fn has_action(&self, id: RuleId) -> bool {
        self.rules[id.index()].action.is_some()
    }

    pub(crate) fn run_action(&self, id: RuleId, span: &MatchSpan<'_>, data: &mut D) {
        if let Some(action) = &self.rules[id.index()].action {
            action(span, data);
        }
    }
}

/// Error raised by [`GrammarBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("duplicate rule name `{0}`")]
    DuplicateRule(String),

    #[error("rule `{0}` was declared but never defined")]
    UndefinedRule(String),

    #[error("rule `{0}` defined more than once")]
    RedefinedRule(String),

    #[error("rule `{0}` already has an action registered")]
    DuplicateAction(String),

    #[error("rule `{0}` references a rule id that does not belong to this grammar")]
    ForeignRule(String),
}

struct PendingRule<D> {
    name: CompactString,
    expr: Option<Expr>,
    action: Option<Action<D>>,
}

/// Two-phase grammar builder.
///
/// Rules are declared first with [`rule`](Self::rule), which hands back a
/// [`RuleId`] that can be referenced from any expression, including the
/// rule's own, which is how recursive (and left-recursive) grammars are
/// written. Each declared rule must then be given exactly one expression
/// with [`define`](Self::define) before [`build`](Self::build).
///
/// ```
/// use seedpeg::grammar::{Expr, GrammarBuilder};
///
/// let mut builder = GrammarBuilder::<()>::new();
/// let digits = builder.rule("digits");
/// builder.define(digits, Expr::plus(Expr::range('0', '9')));
/// let grammar = builder.build().unwrap();
/// assert_eq!(grammar.rule_count(), 1);
/// ```
pub struct GrammarBuilder<D = ()> {
    rules: Vec<PendingRule<D>>,
    names: HashMap<CompactString, RuleId, ahash::RandomState>,
    error: Option<GrammarError>,
}

impl<D> Default for GrammarBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> GrammarBuilder<D> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            names: HashMap::with_hasher(ahash::RandomState::new()),
            error: None,
        }
    }

    /// Declare a rule, returning its id.
    ///
    /// The id is valid immediately and may appear in expressions before the
    /// rule is defined. Declaring the same name twice is an error, reported
    /// by [`build`](Self::build); the original id is returned so
    /// construction can continue.
    pub fn rule(&mut self, name: &str) -> RuleId {
        if let Some(&existing) = self.names.get(name) {
            self.record(GrammarError::DuplicateRule(name.to_string()));
            return existing;
        }
        let id = RuleId::new(self.rules.len());
        self.rules.push(PendingRule {
            name: name.into(),
            expr: None,
            action: None,
        });
        self.names.insert(name.into(), id);
        id
    }

    /// Install the expression root of a declared rule.
    ///
    /// Each rule has exactly one root; a second `define` for the same rule
    /// is an error reported by [`build`](Self::build).
    pub fn define(&mut self, id: RuleId, expr: impl Into<Expr>) -> &mut Self {
        let slot = &mut self.rules[id.index()];
        if slot.expr.is_some() {
            let name = slot.name.to_string();
            self.record(GrammarError::RedefinedRule(name));
        } else {
            slot.expr = Some(expr.into());
        }
        self
    }

    /// Register the action fired for every surviving match of the rule.
    ///
    /// At most one action per rule; a second registration is an error
    /// reported by [`build`](Self::build). Rules without an action produce
    /// no journal entries.
    pub fn on_match(
        &mut self,
        id: RuleId,
        action: impl Fn(&MatchSpan<'_>, &mut D) + 'static,
    ) -> &mut Self {
        let slot = &mut self.rules[id.index()];
        if slot.action.is_some() {
            let name = slot.name.to_string();
            self.record(GrammarError::DuplicateAction(name));
        } else {
            slot.action = Some(Box::new(action));
        }
        self
    }

    /// Validate and produce the grammar.
    ///
    /// # Errors
    ///
    /// Returns the first construction error: a duplicate rule name, a rule
    /// declared but never defined, a rule defined or given an action twice,
    /// or an expression referencing a rule id from a different builder.
    pub fn build(self) -> Result<Grammar<D>, GrammarError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let rule_count = self.rules.len();
        let mut rules = Vec::with_capacity(rule_count);
        for pending in self.rules {
            let Some(expr) = pending.expr else {
                return Err(GrammarError::UndefinedRule(pending.name.to_string()));
            };
            if !refs_in_range(&expr, rule_count) {
                return Err(GrammarError::ForeignRule(pending.name.to_string()));
            }
            rules.push(RuleData {
                name: pending.name,
                expr,
                action: pending.action,
            });
        }
        Ok(Grammar { rules })
    }

    fn record(&mut self, error: GrammarError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}

fn refs_in_range(expr: &Expr, rule_count: usize) -> bool {
    match expr {
        Expr::Rule(id) => id.index() < rule_count,
        Expr::Char(_) | Expr::Literal(_) | Expr::Set(_) | Expr::Any | Expr::Eof => true,
        Expr::Terminal(child)
        | Expr::Repeat { expr: child, .. }
        | Expr::Opt(child)
        | Expr::Lookahead(child)
        | Expr::NotLookahead(child)
        | Expr::Newline(child) => refs_in_range(child, rule_count),
        Expr::Seq(children) | Expr::Choice(children) => {
            children.iter().all(|c| refs_in_range(c, rule_count))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_simple_grammar() {
        let mut builder = GrammarBuilder::<()>::new();
        let word = builder.rule("word");
        builder.define(word, Expr::plus(Expr::range('a', 'z')));
        let grammar = builder.build().unwrap();
        assert_eq!(grammar.rule_count(), 1);
        assert_eq!(grammar.rule_name(word), "word");
        assert!(!grammar.has_action(word));
    }

    #[test]
    fn forward_reference_between_rules() {
        let mut builder = GrammarBuilder::<()>::new();
        let term = builder.rule("term");
        let field = builder.rule("field");
        builder.define(field, Expr::from(term).then('.').then(term));
        builder.define(term, Expr::plus(Expr::range('a', 'z')));
        assert!(builder.build().is_ok());
    }

    #[test]
    fn undefined_rule_is_rejected() {
        let mut builder = GrammarBuilder::<()>::new();
        let _ = builder.rule("dangling");
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::UndefinedRule("dangling".to_string())
        );
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut builder = GrammarBuilder::<()>::new();
        let first = builder.rule("word");
        let again = builder.rule("word");
        assert_eq!(first, again);
        builder.define(first, Expr::any());
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::DuplicateRule("word".to_string())
        );
    }

    #[test]
    fn redefinition_is_rejected() {
        let mut builder = GrammarBuilder::<()>::new();
        let word = builder.rule("word");
        builder.define(word, Expr::any());
        builder.define(word, Expr::eof());
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::RedefinedRule("word".to_string())
        );
    }

    #[test]
    fn second_action_is_rejected() {
        let mut builder = GrammarBuilder::<u32>::new();
        let word = builder.rule("word");
        builder.define(word, Expr::any());
        builder.on_match(word, |_, count| *count += 1);
        builder.on_match(word, |_, count| *count += 2);
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::DuplicateAction("word".to_string())
        );
    }

    #[test]
    fn foreign_rule_id_is_rejected() {
        let mut other = GrammarBuilder::<()>::new();
        let _ = other.rule("a");
        let foreign = other.rule("b");

        let mut builder = GrammarBuilder::<()>::new();
        let word = builder.rule("word");
        builder.define(word, Expr::from(foreign));
        assert_eq!(
            builder.build().unwrap_err(),
            GrammarError::ForeignRule("word".to_string())
        );
    }
}
