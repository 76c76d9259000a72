#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use shade_diagnostic::ErrorCode;
use shade_ir::{print_decl, print_program, unindent, DeclId, ProgramBuilder, StmtId};
use shade_transform::SemanticTable;

/// `fn main() { x = f() + g(); }`, then `fn f`, `fn g` and `var x`.
fn pipeline_program() -> (Program, DeclId, Vec<DeclId>) {
    let mut b = ProgramBuilder::new();
    let x = b.ident("x");
    let f_call = b.call("f", []);
    let g_call = b.call("g", []);
    let sum = b.add(f_call, g_call);
    let assign = b.assign(x, sum);
    let main = b.function("main", vec![], None, [assign]);
    b.global(main);

    let mut helpers = Vec::new();
    for name in ["f", "g"] {
        let i32_ty = b.ident("i32");
        let one = b.int(1);
        let ret = b.ret(Some(one));
        let func = b.function(name, vec![], Some(i32_ty), [ret]);
        helpers.push(b.global(func));
    }
    let i32_ty = b.ident("i32");
    let var = b.var("x", Some(i32_ty), None);
    helpers.push(b.global(var));
    (b.build(), main, helpers)
}

fn impure(program: &Program) -> SemanticTable {
    let mut sem = SemanticTable::new();
    sem.impure_function(program, "f").impure_function(program, "g");
    sem
}

#[test]
fn run_orders_then_promotes() {
    let (program, main, helpers) = pipeline_program();
    let sem = impure(&program);
    let mut session = Session::new(CompilerOptions::default());

    let output = session.run(program, &sem).unwrap();

    assert!(session.diagnostics().is_empty());
    assert!(output.promoted);
    // Dependencies in order of first reference: `x`, then `f` and `g`.
    let (f, g, x) = (helpers[0], helpers[1], helpers[2]);
    assert_eq!(output.graph.ordered_globals, vec![x, f, g, main]);
    assert_eq!(
        print_decl(&output.program, main),
        unindent(
            r"
            fn main() {
              let tmp = f();
              let tmp_1 = g();
              x = (tmp + tmp_1);
            }
            "
        )
    );
}

#[test]
fn nothing_to_promote_returns_input() {
    let (program, _, _) = pipeline_program();
    let before = print_program(&program);
    let mut session = Session::new(CompilerOptions::default());

    let output = session.run(program, &SemanticTable::new()).unwrap();

    assert!(!output.promoted);
    assert_eq!(print_program(&output.program), before);
}

#[test]
fn resolution_errors_stop_the_pipeline() {
    let mut b = ProgramBuilder::new();
    let b_ty = b.ident("B");
    let a = b.alias("A", b_ty);
    b.global(a);
    let a_ty = b.ident("A");
    let alias_b = b.alias("B", a_ty);
    b.global(alias_b);
    let program = b.build();
    let mut session = Session::new(CompilerOptions::default());

    assert!(session.run(program, &SemanticTable::new()).is_none());

    let codes: Vec<ErrorCode> = session.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1002]);
}

#[test]
fn error_limit_drops_later_errors() {
    let mut b = ProgramBuilder::new();
    for value in 1..=3 {
        let init = b.int(value);
        let c = b.const_decl("c", init);
        b.global(c);
    }
    let program = b.build();
    let mut session = Session::new(CompilerOptions::default().with_error_limit(1));

    assert!(session.resolve(&program).is_none());

    let diagnostics = session.into_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.error_count(), 2);
    assert_eq!(diagnostics.dropped_count(), 1);
}

#[test]
fn transform_failures_become_internal_errors() {
    let mut session = Session::new(CompilerOptions::default());

    session.report_transform_error(
        "PromoteSideEffectsToDecl",
        &TransformError::UnknownStatement {
            stmt: StmtId::new(3),
        },
    );

    let diagnostic = session.diagnostics().iter().next().unwrap();
    assert_eq!(diagnostic.code, ErrorCode::E9001);
    assert!(diagnostic
        .message
        .starts_with("internal compiler error: PromoteSideEffectsToDecl: statement"));
}

#[test]
fn options_carry_through() {
    let options = CompilerOptions::default().with_error_limit(5);
    let session = Session::new(options);

    assert_eq!(session.options().diagnostics.error_limit, 5);
    assert_eq!(session.options().promote.temp_prefix, "tmp");
    assert!(!session.options().resolve.dump_graph);
}
