use super::*;
use pretty_assertions::assert_eq;
use shade_diagnostic::ErrorCode;
use shade_ir::{
    Access, AddressSpace, BuiltinFunction, BuiltinType, ExprKind, ProgramBuilder, Span,
    VariableKind,
};

fn resolve(program: &Program) -> (DependencyGraph, bool, DiagnosticList) {
    let mut diagnostics = DiagnosticList::new();
    let (graph, ok) =
        DependencyGraph::build(program, &mut diagnostics, &ResolveOptions::default());
    (graph, ok, diagnostics)
}

fn names(program: &Program, decls: &[DeclId]) -> Vec<String> {
    decls
        .iter()
        .map(|&d| match program.decl(d).name() {
            Some(name) => program.name(name).to_owned(),
            None => format!("<{}>", program.decl(d).kind_name()),
        })
        .collect()
}

#[test]
fn dependencies_come_first() {
    let mut b = ProgramBuilder::new();
    // fn main() { let a = helper(); }
    let call = b.call("helper", []);
    let a = b.let_decl("a", call);
    let a_stmt = b.decl_stmt(a);
    let main = b.function("main", vec![], None, [a_stmt]);
    // fn helper() -> S { return S(1.0); }
    let ret_ty = b.ident("S");
    let one = b.float(1.0);
    let ctor = b.call("S", [one]);
    let ret = b.ret(Some(ctor));
    let helper = b.function("helper", vec![], Some(ret_ty), [ret]);
    // struct S { x : f32 }
    let f32_ty = b.ident("f32");
    let s = b.structure("S", vec![("x", f32_ty)]);
    let enable = b.enable(&["f16"]);
    for decl in [main, helper, s, enable] {
        b.global(decl);
    }
    let program = b.build();

    let (graph, ok, diagnostics) = resolve(&program);

    assert!(ok);
    assert!(diagnostics.is_empty());
    assert_eq!(
        names(&program, &graph.ordered_globals),
        vec!["<enable>", "S", "helper", "main"]
    );
}

#[test]
fn call_target_is_ordered_before_its_arguments() {
    let mut b = ProgramBuilder::new();
    // fn main() { g(x); }
    let x_ref = b.ident("x");
    let call = b.call("g", [x_ref]);
    let stmt = b.call_stmt(call);
    let main = b.function("main", vec![], None, [stmt]);
    let i32_ty = b.ident("i32");
    let x = b.var("x", Some(i32_ty), None);
    let v_ty = b.ident("i32");
    let v = b.param("v", v_ty);
    let g = b.function("g", vec![v], None, []);
    for decl in [main, x, g] {
        b.global(decl);
    }
    let program = b.build();

    let (graph, ok, _) = resolve(&program);

    assert!(ok);
    assert_eq!(names(&program, &graph.ordered_globals), vec!["g", "x", "main"]);
}

#[test]
fn independent_globals_keep_declaration_order() {
    let mut b = ProgramBuilder::new();
    let i32_ty = b.ident("i32");
    let c = b.var("c", Some(i32_ty), None);
    let a = b.alias("A", i32_ty);
    let f = b.function("f", vec![], None, []);
    for decl in [c, a, f] {
        b.global(decl);
    }
    let program = b.build();

    let (graph, ok, _) = resolve(&program);

    assert!(ok);
    assert_eq!(graph.ordered_globals, vec![c, a, f]);
}

#[test]
fn redeclaration_cites_both_sites() {
    let mut b = ProgramBuilder::new();
    b.set_span(Span::new(0, 5));
    let i32_ty = b.ident("i32");
    let first = b.var("x", Some(i32_ty), None);
    b.set_span(Span::new(10, 15));
    let one = b.int(1);
    let second = b.const_decl("x", one);
    b.global(first);
    b.global(second);
    let program = b.build();

    let (graph, ok, diagnostics) = resolve(&program);

    assert!(!ok);
    assert!(graph.ordered_globals.is_empty());
    assert_eq!(diagnostics.len(), 1);
    let diag = &diagnostics.as_slice()[0];
    assert_eq!(diag.code, ErrorCode::E1001);
    assert_eq!(diag.message, "redeclaration of 'x'");
    assert_eq!(diag.primary_span(), Some(Span::new(10, 15)));
    let notes: Vec<_> = diag
        .secondary_labels()
        .map(|l| (l.span, l.message.as_str()))
        .collect();
    assert_eq!(notes, vec![(Span::new(0, 5), "'x' previously declared here")]);
}

#[test]
fn duplicate_parameters_are_redeclarations() {
    let mut b = ProgramBuilder::new();
    let i32_ty = b.ident("i32");
    let p = b.param("p", i32_ty);
    let q = b.param("p", i32_ty);
    let f = b.function("f", vec![p, q], None, []);
    b.global(f);
    let program = b.build();

    let (_, ok, diagnostics) = resolve(&program);

    assert!(!ok);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.as_slice()[0].message, "redeclaration of 'p'");
}

#[test]
fn three_node_cycle_is_reported_once_with_every_edge() {
    let mut b = ProgramBuilder::new();
    b.set_span(Span::new(9, 10));
    let ref_b = b.ident("B");
    b.set_span(Span::new(0, 11));
    let a = b.alias("A", ref_b);
    b.set_span(Span::new(29, 30));
    let ref_c = b.ident("C");
    b.set_span(Span::new(20, 31));
    let bb = b.alias("B", ref_c);
    b.set_span(Span::new(49, 50));
    let ref_a = b.ident("A");
    b.set_span(Span::new(40, 51));
    let c = b.alias("C", ref_a);
    for decl in [a, bb, c] {
        b.global(decl);
    }
    let program = b.build();

    let (graph, ok, diagnostics) = resolve(&program);

    assert!(!ok);
    assert!(graph.ordered_globals.is_empty());
    assert_eq!(diagnostics.len(), 1);
    let diag = &diagnostics.as_slice()[0];
    assert_eq!(diag.code, ErrorCode::E1002);
    assert_eq!(diag.message, "cyclic dependency found: 'A' -> 'B' -> 'C' -> 'A'");
    assert_eq!(diag.primary_span(), Some(Span::new(0, 11)));
    let notes: Vec<_> = diag
        .secondary_labels()
        .map(|l| (l.span, l.message.clone()))
        .collect();
    assert_eq!(
        notes,
        vec![
            (Span::new(9, 10), "alias 'A' references alias 'B' here".to_owned()),
            (Span::new(29, 30), "alias 'B' references alias 'C' here".to_owned()),
            (Span::new(49, 50), "alias 'C' references alias 'A' here".to_owned()),
        ]
    );
}

#[test]
fn cycle_below_an_innocent_root() {
    let mut b = ProgramBuilder::new();
    let call_f = b.call("f", []);
    let s_main = b.call_stmt(call_f);
    let main = b.function("main", vec![], None, [s_main]);
    let call_g = b.call("g", []);
    let s_f = b.call_stmt(call_g);
    let f = b.function("f", vec![], None, [s_f]);
    let call_f2 = b.call("f", []);
    let s_g = b.call_stmt(call_f2);
    let g = b.function("g", vec![], None, [s_g]);
    for decl in [main, f, g] {
        b.global(decl);
    }
    let program = b.build();

    let (_, ok, diagnostics) = resolve(&program);

    assert!(!ok);
    let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["cyclic dependency found: 'f' -> 'g' -> 'f'"]);
    let labels: Vec<_> = diagnostics.as_slice()[0]
        .secondary_labels()
        .map(|l| l.message.as_str())
        .collect();
    assert_eq!(
        labels,
        vec![
            "function 'f' references function 'g' here",
            "function 'g' references function 'f' here",
        ]
    );
}

#[test]
fn self_reference_is_a_cycle() {
    let mut b = ProgramBuilder::new();
    let i32_ty = b.ident("i32");
    let x_ref = b.ident("x");
    let x = b.variable("x", VariableKind::Override, Some(i32_ty), Some(x_ref));
    b.global(x);
    let program = b.build();

    let (_, ok, diagnostics) = resolve(&program);

    assert!(!ok);
    let diag = &diagnostics.as_slice()[0];
    assert_eq!(diag.message, "cyclic dependency found: 'x' -> 'x'");
    let labels: Vec<_> = diag.secondary_labels().map(|l| l.message.as_str()).collect();
    assert_eq!(labels, vec!["override 'x' references override 'x' here"]);
}

#[test]
fn parameter_shadows_global() {
    let mut b = ProgramBuilder::new();
    let f32_ty = b.ident("f32");
    let global = b.var("p", Some(f32_ty), None);
    let param_ty = b.ident("f32");
    let param = b.param("p", param_ty);
    let use_p = b.ident("p");
    let ret = b.ret(Some(use_p));
    let ret_ty = b.ident("f32");
    let f = b.function("f", vec![param], Some(ret_ty), [ret]);
    b.global(global);
    b.global(f);
    let program = b.build();

    let (graph, ok, _) = resolve(&program);

    assert!(ok);
    assert_eq!(graph.shadowed_by(param), Some(global));
    assert_eq!(graph.resolved(use_p), Some(ResolvedIdentifier::Decl(param)));
    assert_eq!(graph.ordered_globals, vec![global, f]);
}

#[test]
fn parameter_may_share_its_type_name() {
    let mut b = ProgramBuilder::new();
    let f32_ty = b.ident("f32");
    let s = b.structure("S", vec![("v", f32_ty)]);
    let s_ty = b.ident("S");
    let param = b.param("S", s_ty);
    let f = b.function("f", vec![param], None, []);
    b.global(s);
    b.global(f);
    let program = b.build();

    let (graph, ok, _) = resolve(&program);

    assert!(ok);
    assert_eq!(graph.resolved(s_ty), Some(ResolvedIdentifier::Decl(s)));
    assert_eq!(graph.shadowed_by(param), Some(s));
    assert_eq!(graph.ordered_globals, vec![s, f]);
}

#[test]
fn builtins_and_unresolved_names() {
    let mut b = ProgramBuilder::new();
    let space = b.ident("private");
    let access = b.ident("read_write");
    let f32_ty = b.ident("f32");
    let one = b.float(1.0);
    let missing = b.ident("nowhere");
    let call = b.call("max", [one, missing]);
    let g = b.variable(
        "g",
        VariableKind::Var {
            address_space: Some(space),
            access: Some(access),
        },
        Some(f32_ty),
        Some(call),
    );
    b.global(g);
    let program = b.build();

    let (graph, ok, _) = resolve(&program);
    let ExprKind::Call { target, .. } = program.expr(call).kind else {
        panic!("expected call");
    };

    assert!(ok);
    assert_eq!(
        graph.resolved(space),
        Some(ResolvedIdentifier::Builtin(Builtin::AddressSpace(AddressSpace::Private)))
    );
    assert_eq!(
        graph.resolved(access),
        Some(ResolvedIdentifier::Builtin(Builtin::Access(Access::ReadWrite)))
    );
    assert_eq!(
        graph.resolved(f32_ty),
        Some(ResolvedIdentifier::Builtin(Builtin::Type(BuiltinType::F32)))
    );
    assert_eq!(
        graph.resolved(target),
        Some(ResolvedIdentifier::Builtin(Builtin::Function(BuiltinFunction::Max)))
    );
    let unresolved = graph.resolved(missing).unwrap_or_else(|| panic!("not recorded"));
    assert!(unresolved.is_unresolved());
    assert_eq!(unresolved.describe(&program), "unresolved identifier 'nowhere'");
}

#[test]
fn describe_names_kind_and_name() {
    let mut b = ProgramBuilder::new();
    let f32_ty = b.ident("f32");
    let s = b.structure("S", vec![("v", f32_ty)]);
    let f = b.function("f", vec![], None, []);
    let one = b.int(1);
    let c = b.const_decl("c", one);
    let p = b.param("p", f32_ty);
    let program = b.build();

    let describe = |r: ResolvedIdentifier| r.describe(&program);
    assert_eq!(describe(ResolvedIdentifier::Decl(s)), "type 'S'");
    assert_eq!(describe(ResolvedIdentifier::Decl(f)), "function 'f'");
    assert_eq!(describe(ResolvedIdentifier::Decl(c)), "const 'c'");
    assert_eq!(describe(ResolvedIdentifier::Decl(p)), "parameter 'p'");
    assert_eq!(
        describe(ResolvedIdentifier::Builtin(Builtin::Function(BuiltinFunction::Max))),
        "builtin function 'max'"
    );
}

#[test]
fn local_declarations_shadow_and_see_outer_names() {
    let mut b = ProgramBuilder::new();
    let i32_ty = b.ident("i32");
    let global = b.var("x", Some(i32_ty), None);
    // fn f() { let x = x; let y = x; }
    let outer_x = b.ident("x");
    let local = b.let_decl("x", outer_x);
    let s1 = b.decl_stmt(local);
    let inner_x = b.ident("x");
    let y = b.let_decl("y", inner_x);
    let s2 = b.decl_stmt(y);
    let f = b.function("f", vec![], None, [s1, s2]);
    b.global(global);
    b.global(f);
    let program = b.build();

    let (graph, ok, _) = resolve(&program);

    assert!(ok);
    assert_eq!(graph.resolved(outer_x), Some(ResolvedIdentifier::Decl(global)));
    assert_eq!(graph.resolved(inner_x), Some(ResolvedIdentifier::Decl(local)));
    assert_eq!(graph.shadowed_by(local), Some(global));
    assert_eq!(graph.shadowed_by(y), None);
    // The reference through `let x = x;` still orders the global first.
    assert_eq!(graph.ordered_globals, vec![global, f]);
}

#[test]
fn for_loop_declarations_end_with_the_loop() {
    let mut b = ProgramBuilder::new();
    // fn f() { for (var i = 0; i < 4; i++) {} let j = i; }
    let zero = b.int(0);
    let i = b.var("i", None, Some(zero));
    let init = b.decl_stmt(i);
    let i_cond = b.ident("i");
    let four = b.int(4);
    let cond = b.less(i_cond, four);
    let i_inc = b.ident("i");
    let cont = b.increment(i_inc);
    let body = b.block([]);
    let for_loop = b.for_stmt(Some(init), Some(cond), Some(cont), body);
    let i_after = b.ident("i");
    let j = b.let_decl("j", i_after);
    let j_stmt = b.decl_stmt(j);
    let f = b.function("f", vec![], None, [for_loop, j_stmt]);
    b.global(f);
    let program = b.build();

    let (graph, ok, _) = resolve(&program);

    assert!(ok);
    assert_eq!(graph.resolved(i_cond), Some(ResolvedIdentifier::Decl(i)));
    assert_eq!(graph.resolved(i_inc), Some(ResolvedIdentifier::Decl(i)));
    assert!(graph.resolved(i_after).is_some_and(ResolvedIdentifier::is_unresolved));
}

#[test]
fn loop_continuing_sees_body_declarations() {
    let mut b = ProgramBuilder::new();
    // loop { var n = 0; continuing { n++; } }
    let zero = b.int(0);
    let n = b.var("n", None, Some(zero));
    let n_stmt = b.decl_stmt(n);
    let body = b.block([n_stmt]);
    let n_ref = b.ident("n");
    let inc = b.increment(n_ref);
    let continuing = b.block([inc]);
    let looped = b.loop_stmt(body, Some(continuing));
    let f = b.function("f", vec![], None, [looped]);
    b.global(f);
    let program = b.build();

    let (graph, ok, _) = resolve(&program);

    assert!(ok);
    assert_eq!(graph.resolved(n_ref), Some(ResolvedIdentifier::Decl(n)));
}

#[test]
fn scan_errors_skip_the_sort() {
    let mut b = ProgramBuilder::new();
    let i32_ty = b.ident("i32");
    let x1 = b.var("x", Some(i32_ty), None);
    let x2 = b.var("x", Some(i32_ty), None);
    // A cycle that would be reported by the sort.
    let ref_b = b.ident("B");
    let a = b.alias("A", ref_b);
    let ref_a = b.ident("A");
    let bb = b.alias("B", ref_a);
    for decl in [x1, x2, a, bb] {
        b.global(decl);
    }
    let program = b.build();

    let (graph, ok, diagnostics) = resolve(&program);

    assert!(!ok);
    let codes: Vec<_> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E1001]);
    assert!(graph.ordered_globals.is_empty());
    // Resolutions gathered before the failure are still available.
    assert_eq!(graph.resolved(ref_b), Some(ResolvedIdentifier::Decl(bb)));
}

#[test]
fn earlier_errors_in_the_sink_do_not_fail_the_run() {
    let mut b = ProgramBuilder::new();
    let f = b.function("f", vec![], None, []);
    b.global(f);
    let program = b.build();
    let mut diagnostics = DiagnosticList::new();
    diagnostics.add(shade_diagnostic::internal_error(Span::DUMMY, "earlier pass"));

    let (graph, ok) =
        DependencyGraph::build(&program, &mut diagnostics, &ResolveOptions::default());

    assert!(ok);
    assert_eq!(graph.ordered_globals, vec![f]);
}

#[test]
fn deep_dependency_chain() {
    const DEPTH: usize = 5_000;
    let mut b = ProgramBuilder::new();
    // alias T0 = i32; alias T1 = T0; ... declared in reverse.
    let mut decls = Vec::with_capacity(DEPTH);
    let base = b.ident("i32");
    decls.push(b.alias("T0", base));
    for i in 1..DEPTH {
        let prev = b.ident(&format!("T{}", i - 1));
        decls.push(b.alias(&format!("T{i}"), prev));
    }
    for &decl in decls.iter().rev() {
        b.global(decl);
    }
    let program = b.build();

    let (graph, ok, _) = resolve(&program);

    assert!(ok);
    assert_eq!(graph.ordered_globals, decls);
}
