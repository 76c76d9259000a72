//! Pass output: identifier resolutions, shadows and declaration order.

use rustc_hash::FxHashMap;

use shade_diagnostic::DiagnosticList;
use shade_ir::{Builtin, DeclId, DeclKind, ExprId, Name, Named, Program};

use crate::analysis::DependencyAnalysis;
use crate::ResolveOptions;

/// What an identifier expression refers to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ResolvedIdentifier {
    /// A declaration in scope: global, parameter or local.
    Decl(DeclId),
    /// A builtin function, type, value, address space, access mode, texel
    /// format or interpolation tag.
    Builtin(Builtin),
    /// Nothing by that name is visible. Reported by later stages, if at all.
    Unresolved { name: Name },
}

impl ResolvedIdentifier {
    pub fn decl(self) -> Option<DeclId> {
        match self {
            ResolvedIdentifier::Decl(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn builtin(self) -> Option<Builtin> {
        match self {
            ResolvedIdentifier::Builtin(builtin) => Some(builtin),
            _ => None,
        }
    }

    pub fn is_unresolved(self) -> bool {
        matches!(self, ResolvedIdentifier::Unresolved { .. })
    }

    /// User-facing description, e.g. `type 'S'`, `builtin function 'max'`
    /// or `unresolved identifier 'x'`.
    pub fn describe(self, program: &Program) -> String {
        match self {
            ResolvedIdentifier::Decl(id) => {
                let decl = program.decl(id);
                let kind = match &decl.kind {
                    DeclKind::Struct(_) | DeclKind::Alias(_) => "type",
                    _ => decl.kind_name(),
                };
                let name = decl.name().map_or("", |name| program.name(name));
                format!("{kind} '{name}'")
            }
            ResolvedIdentifier::Builtin(builtin) => builtin.to_string(),
            ResolvedIdentifier::Unresolved { name } => {
                format!("unresolved identifier '{}'", program.name(name))
            }
        }
    }
}

/// Result of dependency resolution over one module.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DependencyGraph {
    /// Every identifier expression of the module and what it refers to.
    pub resolved_identifiers: FxHashMap<ExprId, ResolvedIdentifier>,
    /// Parameters and locals mapped to the outer declaration they hide.
    pub shadows: FxHashMap<DeclId, DeclId>,
    /// Global declarations, directives first, each after its dependencies.
    /// Empty when resolution failed.
    pub ordered_globals: Vec<DeclId>,
}

impl DependencyGraph {
    /// Resolve `program`'s module-scope dependencies.
    ///
    /// Problems are appended to `diagnostics`. The flag is `true` when no
    /// error was reported; the graph is returned either way so that callers
    /// can still inspect the resolutions gathered before the failure.
    #[tracing::instrument(level = "debug", skip_all, fields(globals = program.module().global_declarations.len()))]
    pub fn build(
        program: &Program,
        diagnostics: &mut DiagnosticList,
        options: &ResolveOptions,
    ) -> (DependencyGraph, bool) {
        DependencyAnalysis::new(program, diagnostics, options).run()
    }

    pub fn resolved(&self, ident: ExprId) -> Option<ResolvedIdentifier> {
        self.resolved_identifiers.get(&ident).copied()
    }

    /// The outer declaration hidden by `decl`, if any.
    pub fn shadowed_by(&self, decl: DeclId) -> Option<DeclId> {
        self.shadows.get(&decl).copied()
    }
}

#[cfg(test)]
mod tests;
