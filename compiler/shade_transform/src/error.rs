//! Internal errors of the transforms.
//!
//! None of these can be caused by user input: they mean a transform was
//! handed nodes it does not know how to place, which is a bug in the caller
//! or in the transform.

use shade_ir::{ExprId, StmtId};
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TransformError {
    /// The statement is not reachable from any function body of the program.
    #[error("statement {stmt:?} is not part of the program being transformed")]
    UnknownStatement { stmt: StmtId },

    /// The expression is not owned by any statement, e.g. a global initializer.
    #[error("expression {expr:?} is not owned by a statement")]
    DetachedExpression { expr: ExprId },

    /// Nothing can be inserted before a statement in this position.
    #[error("cannot insert before {kind} statement {stmt:?}")]
    UnhandledInsertionPoint { stmt: StmtId, kind: &'static str },
}
