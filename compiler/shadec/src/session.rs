//! One compilation: options, diagnostics and the pass pipeline.

use shade_diagnostic::{internal_error, DiagnosticList};
use shade_ir::{Program, Span};
use shade_resolve::DependencyGraph;
use shade_transform::{
    ApplyResult, PromoteSideEffectsToDecl, SemanticInfo, Transform, TransformError,
};

use crate::CompilerOptions;

/// Result of a successful [`Session::run`].
#[derive(Debug)]
pub struct Compiled {
    /// The program after promotion, or the input when nothing was promoted.
    pub program: Program,
    /// Resolution results for the input program. Node ids of the input are
    /// still valid in `program`.
    pub graph: DependencyGraph,
    pub promoted: bool,
}

#[derive(Debug)]
pub struct Session {
    options: CompilerOptions,
    diagnostics: DiagnosticList,
}

impl Session {
    pub fn new(options: CompilerOptions) -> Self {
        let diagnostics = DiagnosticList::with_config(options.diagnostics.clone());
        Session {
            options,
            diagnostics,
        }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn diagnostics(&self) -> &DiagnosticList {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> DiagnosticList {
        self.diagnostics
    }

    /// Resolve module-scope dependencies. `None` if resolution reported errors.
    pub fn resolve(&mut self, program: &Program) -> Option<DependencyGraph> {
        let (graph, ok) =
            DependencyGraph::build(program, &mut self.diagnostics, &self.options.resolve);
        ok.then_some(graph)
    }

    /// Promote side effects to declarations. A transform failure is reported
    /// as an internal error and yields `None`.
    pub fn promote(&mut self, program: &Program, sem: &dyn SemanticInfo) -> Option<ApplyResult> {
        let transform = PromoteSideEffectsToDecl::new(self.options.promote.clone());
        match transform.apply(program, sem) {
            Ok(result) => Some(result),
            Err(err) => {
                self.report_transform_error(transform.name(), &err);
                None
            }
        }
    }

    /// Resolve, then promote. Stops after the first pass that reports errors.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self, program: Program, sem: &dyn SemanticInfo) -> Option<Compiled> {
        let graph = self.resolve(&program)?;
        let result = self.promote(&program, sem)?;
        let promoted = result.is_applied();
        tracing::debug!(promoted, "front end done");
        Some(Compiled {
            program: result.into_program(program),
            graph,
            promoted,
        })
    }

    fn report_transform_error(&mut self, transform: &str, err: &TransformError) {
        tracing::error!(transform, error = %err, "transform failed");
        let diagnostic = internal_error(Span::DUMMY, format!("{transform}: {err}"));
        self.diagnostics.add(diagnostic);
    }
}

#[cfg(test)]
mod tests;
