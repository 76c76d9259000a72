//! Dependency resolution for module-scope declarations.
//!
//! Given a [`Program`](shade_ir::Program), the pass
//! 1. gathers every global declaration by name,
//! 2. scans each declaration, resolving identifiers through a lexical scope
//!    stack and recording dependency edges between globals,
//! 3. sorts the globals so that every declaration follows everything it
//!    depends on, reporting cycles.
//!
//! Redeclarations and cycles are reported as diagnostics. Identifiers that
//! resolve to nothing are recorded as unresolved and left for later stages.
//!
//! ```text
//! let (graph, ok) = DependencyGraph::build(&program, &mut diagnostics, &ResolveOptions::default());
//! for decl in &graph.ordered_globals { /* declaration order */ }
//! ```

mod analysis;
mod global;
mod graph;
mod options;
mod scanner;
mod sort;

pub use graph::{DependencyGraph, ResolvedIdentifier};
pub use options::{ResolveOptions, DUMP_GRAPH_ENV};
