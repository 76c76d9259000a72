//! Generic expression-tree walker.
//!
//! Pre-order traversal with an explicit stack, so arbitrarily deep
//! expressions never grow the call stack. The visitor decides per node
//! whether to descend into its operands, skip them, or stop the walk.
//!
//! Children visited per kind:
//! - identifier: template arguments
//! - binary: `lhs`, `rhs`
//! - unary: operand
//! - index: object, index
//! - member: object
//! - call: arguments (not the target)
//! - bitcast: the operand (not the target type)

use smallvec::SmallVec;

use crate::{AstArena, Expr, ExprId, ExprKind};

/// What the walker does after visiting a node.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TraverseAction {
    /// Visit the node's children.
    Descend,
    /// Do not visit the node's children.
    Skip,
    /// Abort the whole traversal.
    Stop,
}

/// Sibling visiting order.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum TraverseOrder {
    #[default]
    LeftToRight,
    RightToLeft,
}

/// Walk `root` and its sub-expressions in pre-order.
///
/// Returns `false` if the visitor stopped the walk.
pub fn traverse_expressions<F>(
    arena: &AstArena,
    root: ExprId,
    order: TraverseOrder,
    mut visit: F,
) -> bool
where
    F: FnMut(ExprId, &Expr) -> TraverseAction,
{
    let mut pending: SmallVec<[ExprId; 32]> = SmallVec::new();
    pending.push(root);

    while let Some(id) = pending.pop() {
        let expr = arena.expr(id);
        match visit(id, expr) {
            TraverseAction::Stop => return false,
            TraverseAction::Skip => continue,
            TraverseAction::Descend => {}
        }

        let start = pending.len();
        push_children(arena, &expr.kind, &mut pending);
        // The stack pops last-in first; reverse to visit the first child first.
        if order == TraverseOrder::LeftToRight {
            pending[start..].reverse();
        }
    }
    true
}

fn push_children(arena: &AstArena, kind: &ExprKind, pending: &mut SmallVec<[ExprId; 32]>) {
    match *kind {
        ExprKind::Ident { template_args, .. } => {
            pending.extend_from_slice(arena.expr_list(template_args));
        }
        ExprKind::Binary { lhs, rhs, .. } => {
            pending.push(lhs);
            pending.push(rhs);
        }
        ExprKind::Unary { operand, .. } => pending.push(operand),
        ExprKind::Index { object, index } => {
            pending.push(object);
            pending.push(index);
        }
        ExprKind::Member { object, .. } => pending.push(object),
        ExprKind::Call { args, .. } => pending.extend_from_slice(arena.expr_list(args)),
        ExprKind::Bitcast { expr, .. } => pending.push(expr),
        ExprKind::Literal(_) | ExprKind::Phony => {}
    }
}
