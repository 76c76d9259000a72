//! Program-to-program transforms.
//!
//! Transforms read an immutable [`Program`](shade_ir::Program) and, when they
//! change something, return a new one built from a private copy of the input
//! (see [`ProgramBuilder::from_program`](shade_ir::ProgramBuilder::from_program)).
//! Node ids of the input stay valid in the output.
//!
//! The main transform is [`PromoteSideEffectsToDecl`], which makes evaluation
//! order explicit: side-effecting sub-expressions, and the expressions they
//! could affect, are hoisted into `let` declarations before their statement,
//! and `&&`/`||` with side-effecting operands become `var` + `if` sequences.
//!
//! [`HoistToDeclBefore`] is the insertion utility it is built on. It knows how
//! to place a declaration before any statement, including positions that
//! have no enclosing block such as a `for` condition or an `else if`.

mod error;
mod hoist;
mod manager;
mod options;
mod promote;
mod sem;
mod side_effects;
mod stmt_index;

pub use error::TransformError;
pub use hoist::{HoistKind, HoistToDeclBefore};
pub use manager::{ApplyResult, Manager, Transform};
pub use options::{DefaultHoistPolicy, HoistPolicy, PromoteOptions};
pub use promote::{DecomposeSideEffects, PromoteSideEffectsToDecl, SimplifySideEffectStatements};
pub use sem::{SemanticInfo, SemanticTable, StoreKind, VariableUse};
pub use side_effects::SideEffects;
pub use stmt_index::{Parent, StatementIndex};
