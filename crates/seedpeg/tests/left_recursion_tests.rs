//! Left-recursive grammars resolved through the seed/grow protocol.
//!
//! The field-reference grammar is the classic indirect case:
//!
//! ```text
//! Term           = FieldReference | NameReference
//! FieldReference = Term "." Identifier
//! NameReference  = Identifier
//! Identifier     = [a-z]+
//! ```
//!
//! `Term` re-enters itself through `FieldReference`'s leftmost position, so
//! `foo.bar.baz` must parse as a left-associative nest: the seed parse
//! matches `NameReference(foo)`, and each grow iteration wraps the match so
//! far in one more `FieldReference`.

use seedpeg::grammar::{Expr, Grammar, GrammarBuilder, RuleId};
use seedpeg::parser::parse_str;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Ast {
    Ident(String),
    Name(String),
    Field(Box<Ast>, String),
}

fn field_reference_grammar() -> (Grammar<Vec<Ast>>, RuleId, RuleId) {
    let mut b = GrammarBuilder::new();
    let ws = b.rule("ws");
    let ident = b.rule("identifier");
    let name_ref = b.rule("name_reference");
    let field_ref = b.rule("field_reference");
    let term = b.rule("term");

    b.define(ws, Expr::star(Expr::set(" \t\n")));
    b.define(ident, Expr::token(Expr::plus(Expr::range('a', 'z'))));
    b.define(name_ref, Expr::from(ident));
    b.define(field_ref, Expr::from(term).then('.').then(ident));
    b.define(term, Expr::from(field_ref).or(name_ref));

    b.on_match(ident, |span, stack: &mut Vec<Ast>| {
        stack.push(Ast::Ident(span.text()));
    });
    b.on_match(name_ref, |_, stack: &mut Vec<Ast>| {
        let Some(Ast::Ident(name)) = stack.pop() else {
            panic!("name reference expects an identifier on the stack");
        };
        stack.push(Ast::Name(name));
    });
    b.on_match(field_ref, |_, stack: &mut Vec<Ast>| {
        let Some(Ast::Ident(field)) = stack.pop() else {
            panic!("field reference expects the field identifier on top");
        };
        let base = stack.pop().expect("field reference expects a base term");
        stack.push(Ast::Field(Box::new(base), field));
    });

    (b.build().unwrap(), term, ws)
}

fn parse_term(text: &str) -> Option<Ast> {
    let (grammar, term, ws) = field_reference_grammar();
    let mut errors = Vec::new();
    let mut stack = Vec::new();
    if parse_str(&grammar, text, term, ws, &mut errors, &mut stack) {
        assert_eq!(stack.len(), 1, "stack must reduce to a single term");
        stack.pop()
    } else {
        assert_eq!(errors.len(), 1);
        None
    }
}

#[test]
fn plain_name_needs_no_recursion() {
    assert_eq!(parse_term("foo"), Some(Ast::Name("foo".into())));
}

#[test]
fn single_field_reference_grows_once() {
    // seed: NameReference(foo); one grow iteration consumes ".bar"
    assert_eq!(
        parse_term("foo.bar"),
        Some(Ast::Field(
            Box::new(Ast::Name("foo".into())),
            "bar".into()
        ))
    );
}

#[test]
fn chained_field_references_nest_left_associatively() {
    // two grow iterations: ((foo).bar).baz
    assert_eq!(
        parse_term("foo.bar.baz"),
        Some(Ast::Field(
            Box::new(Ast::Field(
                Box::new(Ast::Name("foo".into())),
                "bar".into()
            )),
            "baz".into()
        ))
    );
}

#[test]
fn trailing_dot_fails_without_firing_actions() {
    assert_eq!(parse_term("foo."), None);
}

#[test]
fn direct_left_recursion_depth_equals_suffix_count() {
    // r = r 'x' | 'b': every journal entry for r is one seed or grow step
    let mut b = GrammarBuilder::new();
    let ws = b.rule("ws");
    let r = b.rule("r");
    b.define(ws, Expr::star(Expr::set(" ")));
    b.define(r, Expr::from(r).then('x').or('b'));
    b.on_match(r, |_, count: &mut usize| *count += 1);
    let grammar = b.build().unwrap();

    for suffix in 0..5 {
        let text = format!("b{}", "x".repeat(suffix));
        let mut errors = Vec::new();
        let mut count = 0usize;
        assert!(
            parse_str(&grammar, &text, r, ws, &mut errors, &mut count),
            "failed on {text:?}"
        );
        assert_eq!(count, suffix + 1, "one nest level per x in {text:?}");
    }
}

#[test]
fn actions_fire_operands_before_operators() {
    // record every action with its begin offset to check journal order
    let mut b = GrammarBuilder::new();
    let ws = b.rule("ws");
    let ident = b.rule("ident");
    let field = b.rule("field");
    let term = b.rule("term");
    b.define(ws, Expr::star(Expr::set(" ")));
    b.define(ident, Expr::token(Expr::plus(Expr::range('a', 'z'))));
    b.define(field, Expr::from(term).then('.').then(ident));
    b.define(term, Expr::from(field).or(ident));
    b.on_match(ident, |span, log: &mut Vec<(String, usize)>| {
        log.push((span.text(), span.begin.offset));
    });
    b.on_match(field, |span, log: &mut Vec<(String, usize)>| {
        log.push(("<field>".into(), span.begin.offset));
    });
    let grammar = b.build().unwrap();

    let mut errors = Vec::new();
    let mut log = Vec::new();
    assert!(parse_str(&grammar, "ab.cd", term, ws, &mut errors, &mut log));
    assert_eq!(
        log,
        vec![
            ("ab".to_string(), 0),
            ("cd".to_string(), 3),
            ("<field>".to_string(), 2),
        ]
    );
}
