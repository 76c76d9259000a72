//! Structural side-effect analysis of expressions.

use shade_ir::{ExprId, ExprKind, Program};
use shade_stack::ensure_sufficient_stack;

use crate::SemanticInfo;

/// Whether each expression of a program may have side effects.
///
/// A call has side effects when its callee does or when any argument does.
/// Every other compound expression has side effects when any operand does.
/// Identifiers, literals and `_` never do.
#[derive(Clone, Debug, Default)]
pub struct SideEffects {
    table: Vec<Option<bool>>,
}

impl SideEffects {
    /// Analyse every expression of `program`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn compute(program: &Program, sem: &dyn SemanticInfo) -> Self {
        let count = program.arena().expr_count();
        let mut effects = SideEffects {
            table: vec![None; count],
        };
        for index in 0..count {
            let id = ExprId::new(u32::try_from(index).unwrap_or(u32::MAX));
            effects.visit(program, sem, id);
        }
        effects
    }

    /// Expressions allocated after the analysis report `false`.
    #[inline]
    pub fn has(&self, expr: ExprId) -> bool {
        self.table.get(expr.index()).copied().flatten().unwrap_or(false)
    }

    fn visit(&mut self, program: &Program, sem: &dyn SemanticInfo, expr: ExprId) -> bool {
        if let Some(known) = self.table.get(expr.index()).copied().flatten() {
            return known;
        }
        let result = ensure_sufficient_stack(|| self.visit_inner(program, sem, expr));
        if let Some(slot) = self.table.get_mut(expr.index()) {
            *slot = Some(result);
        }
        result
    }

    fn visit_inner(&mut self, program: &Program, sem: &dyn SemanticInfo, expr: ExprId) -> bool {
        match program.expr(expr).kind {
            ExprKind::Call { args, .. } => {
                // Every argument is visited so the table is filled either way.
                let mut any = sem.call_has_side_effects(expr);
                for &arg in program.arena().expr_list(args) {
                    any |= self.visit(program, sem, arg);
                }
                any
            }
            ExprKind::Binary { lhs, rhs, .. } | ExprKind::Index { object: lhs, index: rhs } => {
                let lhs = self.visit(program, sem, lhs);
                let rhs = self.visit(program, sem, rhs);
                lhs || rhs
            }
            ExprKind::Unary { operand, .. }
            | ExprKind::Member {
                object: operand, ..
            }
            | ExprKind::Bitcast { expr: operand, .. } => self.visit(program, sem, operand),
            ExprKind::Ident { .. } | ExprKind::Literal(_) | ExprKind::Phony => false,
        }
    }
}
