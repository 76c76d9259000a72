//! Shade IR - shared program representation
//!
//! This crate contains the data structures every shade pass works on:
//! - Spans for source locations
//! - Names for interned identifiers, plus fresh-name generation
//! - AST nodes for declarations, statements and expressions
//! - The arena that stores them and the builder that creates them
//! - Builtin identifier tables
//! - Expression traversal and a lexical scope stack
//! - A WGSL-style printer for tests and debug output
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifier text becomes `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices
//! - **Copy on Rewrite**: transforms clone the arena, so input node ids stay
//!   valid in their output
//!
//! Literals store floats as u64 bits so every node is `Eq + Hash`.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod builder;
mod builtin;
mod interner;
mod name;
mod node_id;
mod printer;
mod program;
mod scope;
mod span;
mod traverse;

pub use arena::AstArena;
pub use ast::{
    AliasDecl, Attribute, AttributeKind, BinaryOp, CaseSelector, Decl, DeclKind,
    DiagnosticControl, EnableDirective, Expr, ExprKind, FloatSuffix, FunctionDecl, IntSuffix,
    Literal, Module, ParameterDecl, PipelineStage, Stmt, StmtKind, StructDecl, StructMember,
    SwitchCase, UnaryOp, VariableDecl, VariableKind,
};
pub use builder::ProgramBuilder;
pub use builtin::{
    Access, AddressSpace, Builtin, BuiltinFunction, BuiltinType, BuiltinValue,
    InterpolationSampling, InterpolationType, TexelFormat,
};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::{Name, Named};
pub use node_id::{CaseRange, DeclId, ExprId, ExprRange, StmtId, StmtRange};
pub use printer::{print_decl, print_expr, print_program, print_stmt, unindent};
pub use program::Program;
pub use scope::ScopeStack;
pub use span::{Span, Spanned};
pub use traverse::{traverse_expressions, TraverseAction, TraverseOrder};

// Ids and spans are embedded in every node.
mod size_asserts {
    use super::{DeclId, ExprId, ExprRange, Name, Span, StmtId};
    crate::static_assert_size!(ExprId, 4);
    crate::static_assert_size!(StmtId, 4);
    crate::static_assert_size!(DeclId, 4);
    crate::static_assert_size!(Name, 4);
    crate::static_assert_size!(ExprRange, 8);
    crate::static_assert_size!(Span, 8);
}
