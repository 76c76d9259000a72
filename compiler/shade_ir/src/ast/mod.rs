//! AST node model.
//!
//! Three node families, each stored flat in the [`AstArena`](crate::AstArena):
//! declarations ([`Decl`]), statements ([`Stmt`]) and expressions ([`Expr`]).
//! Every family is a closed `enum`, so passes dispatch with exhaustive matches.

mod attr;
mod decl;
mod expr;
mod ops;
mod stmt;

pub use attr::{Attribute, AttributeKind, PipelineStage};
pub use decl::{
    AliasDecl, Decl, DeclKind, DiagnosticControl, EnableDirective, FunctionDecl, ParameterDecl,
    StructDecl, StructMember, VariableDecl, VariableKind,
};
pub use expr::{Expr, ExprKind, FloatSuffix, IntSuffix, Literal};
pub use ops::{BinaryOp, UnaryOp};
pub use stmt::{CaseSelector, Stmt, StmtKind, SwitchCase};

use crate::DeclId;

/// A module: its global declarations in source order.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Module {
    pub global_declarations: Vec<DeclId>,
}

impl Module {
    pub fn new() -> Self {
        Module::default()
    }
}
