//! Field-reference expressions: the classic indirect left recursion.
//!
//! ```text
//! Term           = FieldReference | NameReference
//! FieldReference = Term "." Identifier
//! NameReference  = Identifier
//! ```
//!
//! `a.b.c` nests left-associatively: the seed parse matches the name `a`,
//! and each grow iteration wraps the term so far in one more field access.

use std::fmt;

use seedpeg::grammar::{Expr, Grammar, GrammarBuilder, RuleId};
use seedpeg::parser::parse_str;

#[derive(Debug, Clone)]
enum Term {
    Ident(String),
    Name(String),
    Field(Box<Term>, String),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => write!(f, "Identifier {{ {name} }}"),
            Self::Name(name) => write!(f, "NameReference {{ name: {name} }}"),
            Self::Field(base, field) => {
                write!(f, "FieldReference {{ base: {base}, fieldName: {field} }}")
            }
        }
    }
}

fn grammar() -> (Grammar<Vec<Term>>, RuleId, RuleId) {
    let mut b = GrammarBuilder::new();
    let ws = b.rule("ws");
    let ident = b.rule("identifier");
    let name_ref = b.rule("name_reference");
    let field_ref = b.rule("field_reference");
    let term = b.rule("term");

    b.define(ws, Expr::star(Expr::set(" \t\n")));
    b.define(ident, Expr::token(Expr::plus(Expr::range('a', 'z').or(Expr::range('A', 'Z')))));
    b.define(name_ref, Expr::from(ident));
    b.define(field_ref, Expr::from(term).then('.').then(ident));
    b.define(term, Expr::from(field_ref).or(name_ref));

    b.on_match(ident, |span, stack: &mut Vec<Term>| {
        stack.push(Term::Ident(span.text()));
    });
    b.on_match(name_ref, |_, stack: &mut Vec<Term>| {
        let Some(Term::Ident(name)) = stack.pop() else {
            unreachable!("a name reference is exactly one identifier");
        };
        stack.push(Term::Name(name));
    });
    b.on_match(field_ref, |_, stack: &mut Vec<Term>| {
        let Some(Term::Ident(field)) = stack.pop() else {
            unreachable!("the field identifier finishes last");
        };
        let base = stack.pop().expect("base term");
        stack.push(Term::Field(Box::new(base), field));
    });

    (b.build().expect("valid grammar"), term, ws)
}

fn main() {
    let (grammar, term, ws) = grammar();
    for text in ["foo", "foo.bar", "foo.bar.baz"] {
        let mut errors = Vec::new();
        let mut stack = Vec::new();
        if parse_str(&grammar, text, term, ws, &mut errors, &mut stack) {
            println!("{text}  =>  {}", stack[0]);
        } else {
            for error in &errors {
                println!("{text}: {error}");
            }
        }
    }
}
