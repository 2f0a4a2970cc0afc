//! Integer calculator built on deferred actions.
//!
//! Every `num` match pushes a value; every operator match pops its two
//! operands and pushes the result. Actions fire in input order after the
//! parse succeeds, so the stack reduces to the expression's value.

use seedpeg::grammar::{Expr, Grammar, GrammarBuilder, RuleId};
use seedpeg::input::MatchSpan;
use seedpeg::parser::parse_str;

fn binop(op: fn(i64, i64) -> i64) -> impl Fn(&MatchSpan<'_>, &mut Vec<i64>) + 'static {
    move |_, stack| {
        let b = stack.pop().expect("right operand");
        let a = stack.pop().expect("left operand");
        stack.push(op(a, b));
    }
}

fn calculator() -> (Grammar<Vec<i64>>, RuleId, RuleId) {
    let mut b = GrammarBuilder::new();
    let ws = b.rule("ws");
    let num = b.rule("num");
    let val = b.rule("val");
    let mul_op = b.rule("mul_op");
    let div_op = b.rule("div_op");
    let mul = b.rule("mul");
    let add_op = b.rule("add_op");
    let sub_op = b.rule("sub_op");
    let expr = b.rule("expr");

    b.define(ws, Expr::star(Expr::newline('\n').or(Expr::set(" \t"))));
    b.define(num, Expr::token(Expr::plus(Expr::range('0', '9'))));
    b.define(val, Expr::from(num).or(Expr::from('(').then(expr).then(')')));
    b.define(mul_op, Expr::from(mul).then('*').then(mul));
    b.define(div_op, Expr::from(mul).then('/').then(mul));
    b.define(mul, Expr::from(mul_op).or(div_op).or(val));
    b.define(add_op, Expr::from(expr).then('+').then(expr));
    b.define(sub_op, Expr::from(expr).then('-').then(expr));
    b.define(expr, Expr::from(add_op).or(sub_op).or(mul));

    b.on_match(num, |span, stack: &mut Vec<i64>| {
        stack.push(span.text().parse().expect("digits"));
    });
    b.on_match(add_op, binop(|a, b| a + b));
    b.on_match(sub_op, binop(|a, b| a - b));
    b.on_match(mul_op, binop(|a, b| a * b));
    b.on_match(div_op, binop(|a, b| a / b));

    (b.build().expect("valid grammar"), expr, ws)
}

fn main() {
    let (grammar, expr, ws) = calculator();
    for text in ["16+26", "2*3+4", "2+3*4", "(1+2)*3", "1+"] {
        let mut errors = Vec::new();
        let mut stack = Vec::new();
        if parse_str(&grammar, text, expr, ws, &mut errors, &mut stack) {
            println!("{text} = {}", stack[0]);
        } else {
            for error in &errors {
                println!("{text}: {error}");
            }
        }
    }
}
