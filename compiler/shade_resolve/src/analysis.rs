//! Orchestration of one resolution run: gather, scan, sort, report.

use std::fmt::Write;

use rustc_hash::FxHashMap;

use shade_diagnostic::{internal_error, Diagnostic, DiagnosticList, ErrorCode};
use shade_ir::{DeclId, Named, Program};

use crate::global::{DependencyEdges, GlobalId, Globals};
use crate::scanner::DependencyScanner;
use crate::sort::{Cycle, Sorter};
use crate::{DependencyGraph, ResolveOptions};

pub(crate) struct DependencyAnalysis<'a> {
    program: &'a Program,
    diagnostics: &'a mut DiagnosticList,
    options: &'a ResolveOptions,
    globals: Globals,
    edges: DependencyEdges,
}

impl<'a> DependencyAnalysis<'a> {
    pub(crate) fn new(
        program: &'a Program,
        diagnostics: &'a mut DiagnosticList,
        options: &'a ResolveOptions,
    ) -> Self {
        DependencyAnalysis {
            program,
            diagnostics,
            options,
            globals: Globals::gather(program),
            edges: DependencyEdges::default(),
        }
    }

    pub(crate) fn run(mut self) -> (DependencyGraph, bool) {
        // Only errors raised by this run count against it.
        let errors_before = self.diagnostics.error_count();
        let mut graph = DependencyGraph::default();

        let ids: Vec<GlobalId> = self.globals.ids().collect();
        let mut scanner = DependencyScanner::new(
            self.program,
            &mut self.globals,
            &mut self.edges,
            &mut graph,
            self.diagnostics,
        );
        for id in ids {
            scanner.scan(id);
        }

        if self.diagnostics.error_count() == errors_before {
            let order = self.sort();
            if self.diagnostics.error_count() == errors_before {
                graph.ordered_globals = order;
            }
        } else {
            tracing::debug!("scan reported errors, skipping sort");
        }

        if self.options.dump_graph {
            tracing::debug!(
                target: "shade_resolve::dump",
                "{}",
                dump_text(self.program, &self.globals, &graph.ordered_globals)
            );
        }

        let ok = self.diagnostics.error_count() == errors_before;
        tracing::debug!(ok, ordered = graph.ordered_globals.len(), "dependency resolution done");
        (graph, ok)
    }

    fn sort(&mut self) -> Vec<DeclId> {
        let result = Sorter::new(self.program, &self.globals).sort();
        for cycle in &result.cycles {
            let diagnostic = self.cycle_diagnostic(cycle);
            self.diagnostics.add(diagnostic);
        }
        for &root in &result.unbalanced {
            let decl = self.program.decl(self.globals.get(root).decl);
            tracing::error!(root = ?root, "sort stack not empty after traversal");
            self.diagnostics.add(internal_error(
                decl.span,
                format!(
                    "stack not empty after returning from dependency traversal of '{}'",
                    global_name(self.program, self.globals.get(root).decl)
                ),
            ));
        }
        result
            .order
            .iter()
            .map(|&id| self.globals.get(id).decl)
            .collect()
    }

    /// `cyclic dependency found: 'a' -> 'b' -> 'a'`, with one label per edge
    /// at the reference that created it.
    fn cycle_diagnostic(&self, cycle: &Cycle) -> Diagnostic {
        let program = self.program;
        let decl_of = |id: GlobalId| self.globals.get(id).decl;

        let mut message = String::from("cyclic dependency found: ");
        for &id in &cycle.globals {
            let _ = write!(message, "'{}' -> ", global_name(program, decl_of(id)));
        }
        let first = cycle.globals.first().copied();
        if let Some(first) = first {
            let _ = write!(message, "'{}'", global_name(program, decl_of(first)));
        }

        let mut diagnostic = Diagnostic::error(ErrorCode::E1002).with_message(message);
        if let Some(first) = first {
            diagnostic = diagnostic.with_label(program.decl(decl_of(first)).span, "");
        }
        for (i, &from) in cycle.globals.iter().enumerate() {
            let to = cycle.globals[(i + 1) % cycle.globals.len()];
            let (from_decl, to_decl) = (program.decl(decl_of(from)), program.decl(decl_of(to)));
            let site = self.edges.site(from, to).unwrap_or(from_decl.span);
            diagnostic = diagnostic.with_secondary_label(
                site,
                format!(
                    "{} '{}' references {} '{}' here",
                    from_decl.kind_name(),
                    global_name(program, decl_of(from)),
                    to_decl.kind_name(),
                    global_name(program, decl_of(to)),
                ),
            );
        }
        diagnostic
    }
}

/// Declared name, or `<kind>` for unnamed declarations such as directives.
fn global_name(program: &Program, decl: DeclId) -> String {
    let decl = program.decl(decl);
    match decl.name() {
        Some(name) => program.name(name).to_owned(),
        None => format!("<{}>", decl.kind_name()),
    }
}

/// Declaration order followed by each ordered global's dependencies.
pub(crate) fn dump_text(program: &Program, globals: &Globals, ordered: &[DeclId]) -> String {
    let mut out = String::new();
    out.push_str("=========================\n");
    out.push_str("------ declaration ------\n");
    for id in globals.ids() {
        let _ = writeln!(out, "{}", global_name(program, globals.get(id).decl));
    }
    out.push_str("------ dependencies ------\n");
    let by_decl: FxHashMap<DeclId, GlobalId> =
        globals.ids().map(|id| (globals.get(id).decl, id)).collect();
    for &decl in ordered {
        let Some(&id) = by_decl.get(&decl) else {
            continue;
        };
        let _ = writeln!(out, "{} depends on:", global_name(program, decl));
        for &dep in &globals.get(id).deps {
            let _ = writeln!(out, "  {}", global_name(program, globals.get(dep).decl));
        }
    }
    out.push_str("=========================\n");
    out
}
