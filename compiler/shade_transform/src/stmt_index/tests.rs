#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use shade_ir::ProgramBuilder;

#[test]
fn parents_of_nested_statements() {
    let mut b = ProgramBuilder::new();

    // for (var i = 0; i < 4; i++) { }
    let zero = b.int(0);
    let i_decl = b.var("i", None, Some(zero));
    let init = b.decl_stmt(i_decl);
    let i = b.ident("i");
    let four = b.int(4);
    let cond = b.less(i, four);
    let i2 = b.ident("i");
    let cont = b.increment(i2);
    let for_body = b.block([]);
    let for_stmt = b.for_stmt(Some(init), Some(cond), Some(cont), for_body);

    // if (a) { } else if (c) { } else { }
    let a = b.ident("a");
    let then = b.block([]);
    let c = b.ident("c");
    let then2 = b.block([]);
    let otherwise = b.block([]);
    let else_if = b.if_stmt(c, then2, Some(otherwise));
    let if_stmt = b.if_stmt(a, then, Some(else_if));

    let f = b.function("f", vec![], None, [for_stmt, if_stmt]);
    b.global(f);
    let program = b.build();
    let index = StatementIndex::build(&program);

    let shade_ir::DeclKind::Function(func) = &program.decl(f).kind else {
        panic!("expected function");
    };
    let body = func.body.unwrap();

    assert_eq!(index.parent(body), Some(Parent::Function(f)));
    assert_eq!(index.parent(for_stmt), Some(Parent::Block(body)));
    assert_eq!(index.parent(init), Some(Parent::ForInitializer(for_stmt)));
    assert_eq!(index.parent(cont), Some(Parent::ForContinuing(for_stmt)));
    assert_eq!(index.parent(for_body), Some(Parent::Statement(for_stmt)));
    assert_eq!(index.parent(else_if), Some(Parent::Else(if_stmt)));
    assert_eq!(index.parent(otherwise), Some(Parent::Statement(else_if)));
    assert_eq!(index.parent(then), Some(Parent::Statement(if_stmt)));
    assert_eq!(
        index.statements(),
        &[body, for_stmt, init, cont, for_body, if_stmt, then, else_if, then2, otherwise]
    );
    assert_eq!(index.blocks(), &[body, for_body, then, then2, otherwise]);
}

#[test]
fn owners_cover_whole_expression_trees() {
    let mut b = ProgramBuilder::new();
    let x = b.ident("x");
    let y = b.ident("y");
    let one = b.int(1);
    let sum = b.add(y, one);
    let call = b.call("f", [sum]);
    let assign = b.assign(x, call);

    let s = b.ident("s");
    let sel = b.int(3);
    let case_body = b.block([]);
    let case = b.case(vec![shade_ir::CaseSelector::Expr(sel)], case_body);
    let switch = b.switch_stmt(s, [case]);

    let stray = b.int(7);
    let f = b.function("g", vec![], None, [assign, switch]);
    b.global(f);
    let program = b.build();
    let index = StatementIndex::build(&program);

    for expr in [x, y, one, sum, call] {
        assert_eq!(index.owner(expr), Some(assign));
    }
    assert_eq!(index.owner(s), Some(switch));
    assert_eq!(index.owner(sel), Some(switch));
    assert_eq!(index.owner(stray), None);
    assert_eq!(index.kind(switch).map(|k| k.describe()), Some("switch"));
}

#[test]
fn loop_bodies_and_case_bodies() {
    let mut b = ProgramBuilder::new();
    let brk = b.break_stmt();
    let body = b.block([brk]);
    let t = b.bool_lit(true);
    let break_if = b.break_if(t);
    let continuing = b.block([break_if]);
    let loop_stmt = b.loop_stmt(body, Some(continuing));

    let w = b.ident("w");
    let while_body = b.block([]);
    let while_stmt = b.while_stmt(w, while_body);

    let f = b.function("f", vec![], None, [loop_stmt, while_stmt]);
    b.global(f);
    let program = b.build();
    let index = StatementIndex::build(&program);

    assert_eq!(index.parent(body), Some(Parent::Statement(loop_stmt)));
    assert_eq!(index.parent(continuing), Some(Parent::Statement(loop_stmt)));
    assert_eq!(index.parent(break_if), Some(Parent::Block(continuing)));
    assert_eq!(index.owner(t), Some(break_if));
    assert_eq!(index.parent(while_body), Some(Parent::Statement(while_stmt)));
    assert_eq!(index.owner(w), Some(while_stmt));
}

#[test]
fn statements_outside_functions_are_not_indexed() {
    let mut b = ProgramBuilder::new();
    let orphan = b.break_stmt();
    let program = b.build();
    let index = StatementIndex::build(&program);

    assert!(!index.contains(orphan));
    assert!(index.statements().is_empty());
}

#[test]
fn direct_expressions_skip_nested_statements() {
    let mut b = ProgramBuilder::new();
    let c = b.ident("c");
    let x = b.ident("x");
    let one = b.int(1);
    let inner = b.assign(x, one);
    let then = b.block([inner]);
    let if_stmt = b.if_stmt(c, then, None);
    let program = b.build();

    assert_eq!(direct_expressions(program.arena(), if_stmt).as_slice(), &[c]);
    assert_eq!(direct_expressions(program.arena(), inner).as_slice(), &[x, one]);
    assert!(direct_expressions(program.arena(), then).is_empty());
}
