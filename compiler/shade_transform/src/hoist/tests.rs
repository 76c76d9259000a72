#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use shade_ir::{print_program, unindent, Program};

/// Build `fn f() { <stmts> }` as the only global.
fn program_with(build: impl FnOnce(&mut ProgramBuilder) -> Vec<StmtId>) -> Program {
    let mut b = ProgramBuilder::new();
    let stmts = build(&mut b);
    let f = b.function("f", vec![], None, stmts);
    b.global(f);
    b.build()
}

/// Run `requests` against a copy of `program` and print the result.
fn rewrite(
    program: &Program,
    requests: impl FnOnce(&mut HoistToDeclBefore<'_>, &mut ProgramBuilder),
) -> (bool, String) {
    let index = StatementIndex::build(program);
    let mut b = ProgramBuilder::from_program(program);
    let mut hoister = HoistToDeclBefore::new(&index);
    requests(&mut hoister, &mut b);
    let changed = hoister.apply(&mut b);
    (changed, print_program(&b.build()))
}

fn find_call(program: &Program, name: &str) -> ExprId {
    let name = program.interner().get(name).unwrap();
    (0..program.arena().expr_count())
        .map(|i| ExprId::new(u32::try_from(i).unwrap()))
        .find(|&id| match program.expr(id).kind {
            ExprKind::Call { target, .. } => {
                matches!(program.expr(target).kind, ExprKind::Ident { name: n, .. } if n == name)
            }
            _ => false,
        })
        .unwrap()
}

#[test]
fn declaration_goes_before_statement_in_block() {
    let program = program_with(|b| {
        let x = b.ident("x");
        let call = b.call("g", []);
        vec![b.assign(x, call)]
    });
    let g = find_call(&program, "g");

    let (changed, text) = rewrite(&program, |h, b| {
        let name = h.add(b, g, HoistKind::Let, "tmp").unwrap();
        assert_eq!(b.interner().lookup(name), "tmp");
    });

    assert!(changed);
    assert_eq!(
        text,
        unindent(
            r"
            fn f() {
              let tmp = g();
              x = tmp;
            }
            "
        )
    );
}

#[test]
fn declarations_keep_request_order() {
    let program = program_with(|b| {
        let g = b.call("g", []);
        let h = b.call("h", []);
        let sum = b.add(g, h);
        vec![b.ret(Some(sum))]
    });
    let g = find_call(&program, "g");
    let h = find_call(&program, "h");

    let (_, text) = rewrite(&program, |hoister, b| {
        hoister.add(b, g, HoistKind::Let, "a").unwrap();
        hoister.add(b, h, HoistKind::Var, "b").unwrap();
    });

    assert_eq!(
        text,
        unindent(
            r"
            fn f() {
              let a = g();
              var b = h();
              return (a + b);
            }
            "
        )
    );
}

#[test]
fn for_condition_becomes_loop() {
    let program = program_with(|b| {
        let zero = b.int(0);
        let i_decl = b.var("i", None, Some(zero));
        let init = b.decl_stmt(i_decl);
        let i = b.ident("i");
        let n = b.call("n", []);
        let cond = b.less(i, n);
        let i2 = b.ident("i");
        let cont = b.increment(i2);
        let a = b.call("a", []);
        let body_stmt = b.call_stmt(a);
        let body = b.block([body_stmt]);
        vec![b.for_stmt(Some(init), Some(cond), Some(cont), body)]
    });
    let n = find_call(&program, "n");

    let (_, text) = rewrite(&program, |h, b| {
        h.add(b, n, HoistKind::Let, "tmp").unwrap();
    });

    assert_eq!(
        text,
        unindent(
            r"
            fn f() {
              {
                var i = 0;
                loop {
                  let tmp = n();
                  if (!(i < tmp)) {
                    break;
                  }
                  {
                    a();
                  }
                  continuing {
                    i++;
                  }
                }
              }
            }
            "
        )
    );
}

#[test]
fn for_initializer_and_continuing() {
    let program = program_with(|b| {
        let g = b.call("g", []);
        let i_decl = b.var("i", None, Some(g));
        let init = b.decl_stmt(i_decl);
        let i = b.ident("i");
        let h = b.call("h", []);
        let cont = b.assign(i, h);
        let body = b.block([]);
        vec![b.for_stmt(Some(init), None, Some(cont), body)]
    });
    let g = find_call(&program, "g");
    let h = find_call(&program, "h");

    let (_, text) = rewrite(&program, |hoister, b| {
        hoister.add(b, g, HoistKind::Let, "first").unwrap();
        hoister.add(b, h, HoistKind::Let, "next").unwrap();
    });

    assert_eq!(
        text,
        unindent(
            r"
            fn f() {
              {
                let first = g();
                var i = first;
                loop {
                  {
                  }
                  continuing {
                    let next = h();
                    i = next;
                  }
                }
              }
            }
            "
        )
    );
}

#[test]
fn for_without_initializer_is_replaced_in_place() {
    let program = program_with(|b| {
        let i = b.ident("i");
        let h = b.call("h", []);
        let cont = b.assign(i, h);
        let body = b.block([]);
        vec![b.for_stmt(None, None, Some(cont), body)]
    });
    let h = find_call(&program, "h");

    let (_, text) = rewrite(&program, |hoister, b| {
        hoister.add(b, h, HoistKind::Let, "tmp").unwrap();
    });

    assert_eq!(
        text,
        unindent(
            r"
            fn f() {
              loop {
                {
                }
                continuing {
                  let tmp = h();
                  i = tmp;
                }
              }
            }
            "
        )
    );
}

#[test]
fn while_condition_becomes_loop() {
    let program = program_with(|b| {
        let c = b.call("c", []);
        let body = b.block([]);
        vec![b.while_stmt(c, body)]
    });
    let c = find_call(&program, "c");

    let (_, text) = rewrite(&program, |h, b| {
        h.add(b, c, HoistKind::Let, "tmp").unwrap();
    });

    assert_eq!(
        text,
        unindent(
            r"
            fn f() {
              loop {
                let tmp = c();
                if (!tmp) {
                  break;
                }
                {
                }
              }
            }
            "
        )
    );
}

#[test]
fn else_if_becomes_else_block() {
    let program = program_with(|b| {
        let a = b.ident("a");
        let then = b.block([]);
        let cond = b.call("b", []);
        let x = b.ident("x");
        let one = b.int(1);
        let assign = b.assign(x, one);
        let then2 = b.block([assign]);
        let else_if = b.if_stmt(cond, then2, None);
        vec![b.if_stmt(a, then, Some(else_if))]
    });
    let cond = find_call(&program, "b");

    let (_, text) = rewrite(&program, |h, b| {
        h.add(b, cond, HoistKind::Let, "tmp").unwrap();
    });

    assert_eq!(
        text,
        unindent(
            r"
            fn f() {
              if (a) {
              } else {
                let tmp = b();
                if (tmp) {
                  x = 1;
                }
              }
            }
            "
        )
    );
}

#[test]
fn prepare_converts_without_inserting() {
    let mut cond = None;
    let program = program_with(|b| {
        let c = b.ident("c");
        cond = Some(c);
        let body = b.block([]);
        vec![b.for_stmt(None, Some(c), None, body)]
    });
    let c = cond.unwrap();

    let (changed, text) = rewrite(&program, |h, _| h.prepare(c).unwrap());

    assert!(changed);
    assert_eq!(
        text,
        unindent(
            r"
            fn f() {
              loop {
                if (!c) {
                  break;
                }
                {
                }
              }
            }
            "
        )
    );
}

#[test]
fn preparing_a_block_statement_changes_nothing() {
    let program = program_with(|b| {
        let c = b.call("c", []);
        vec![b.call_stmt(c)]
    });
    let c = find_call(&program, "c");

    let (changed, text) = rewrite(&program, |h, _| h.prepare(c).unwrap());

    assert!(!changed);
    assert_eq!(text, print_program(&program));
}

#[test]
fn replace_statement() {
    let mut discard = None;
    let mut target = None;
    let program = program_with(|b| {
        let x = b.ident("x");
        let one = b.int(1);
        let assign = b.assign(x, one);
        target = Some(assign);
        discard = Some(b.discard());
        vec![assign]
    });

    let (changed, text) = rewrite(&program, |h, _| {
        h.replace(target.unwrap(), discard.unwrap()).unwrap();
    });

    assert!(changed);
    assert_eq!(
        text,
        unindent(
            r"
            fn f() {
              discard;
            }
            "
        )
    );
}

#[test]
fn requests_on_unknown_nodes_fail() {
    let mut b = ProgramBuilder::new();
    let orphan_expr = b.int(1);
    let orphan_stmt = b.break_stmt();
    let new_stmt = b.discard();
    let f = b.function("f", vec![], None, []);
    b.global(f);
    let program = b.build();
    let index = StatementIndex::build(&program);
    let mut hoister = HoistToDeclBefore::new(&index);

    assert_eq!(
        hoister.prepare(orphan_expr),
        Err(TransformError::DetachedExpression { expr: orphan_expr })
    );
    assert_eq!(
        hoister.insert_before(orphan_stmt, new_stmt),
        Err(TransformError::UnknownStatement { stmt: orphan_stmt })
    );
}

#[test]
fn statements_without_insertion_point_fail() {
    let mut loop_body = None;
    let program = program_with(|b| {
        let brk = b.break_stmt();
        let body = b.block([brk]);
        loop_body = Some(body);
        vec![b.loop_stmt(body, None)]
    });
    let loop_body = loop_body.unwrap();
    let index = StatementIndex::build(&program);
    let mut b = ProgramBuilder::from_program(&program);
    let new_stmt = b.discard();
    let mut hoister = HoistToDeclBefore::new(&index);

    assert_eq!(
        hoister.insert_before(loop_body, new_stmt),
        Err(TransformError::UnhandledInsertionPoint {
            stmt: loop_body,
            kind: "block",
        })
    );
}
