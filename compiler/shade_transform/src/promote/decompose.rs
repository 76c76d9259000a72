//! Rewriting of statements once the hoist set is known.
//!
//! Hoisted expressions become `let` declarations in front of their
//! statement. A `&&` or `||` whose operands have side effects becomes
//!
//! ```text
//! var t = lhs;
//! if (t) {        // `if (!t)` for `||`
//!   t = rhs;
//! }
//! ```
//!
//! with the statements needed to evaluate `rhs` placed inside the `if`.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use shade_ir::{
    BinaryOp, DeclKind, ExprId, ExprKind, ExprRange, ProgramBuilder, StmtId, StmtKind, VariableKind,
};
use shade_stack::ensure_sufficient_stack;

use crate::{HoistToDeclBefore, SideEffects, StatementIndex, TransformError};

type Stmts = SmallVec<[StmtId; 8]>;

pub(super) struct DecomposeState<'a> {
    b: &'a mut ProgramBuilder,
    effects: &'a SideEffects,
    to_hoist: &'a FxHashSet<ExprId>,
    prefix: &'a str,
    hoister: HoistToDeclBefore<'a>,
    changed: bool,
}

impl<'a> DecomposeState<'a> {
    pub(super) fn new(
        b: &'a mut ProgramBuilder,
        index: &'a StatementIndex,
        effects: &'a SideEffects,
        to_hoist: &'a FxHashSet<ExprId>,
        prefix: &'a str,
    ) -> Self {
        DecomposeState {
            b,
            effects,
            to_hoist,
            prefix,
            hoister: HoistToDeclBefore::new(index),
            changed: false,
        }
    }

    /// Rewrite every statement of every block. Returns whether anything changed.
    pub(super) fn run(mut self, index: &StatementIndex) -> Result<bool, TransformError> {
        for &block in index.blocks() {
            let StmtKind::Block(range) = self.b.arena().stmt(block).kind else {
                continue;
            };
            let stmts: Vec<StmtId> = self.b.arena().stmt_list(range).to_vec();
            for stmt in stmts {
                self.decompose_statement(stmt)?;
                self.decompose_unblocked(stmt)?;
            }
        }
        let DecomposeState { b, hoister, changed, .. } = self;
        if changed {
            hoister.apply(b);
        }
        Ok(changed)
    }

    /// Statements hanging off `stmt` outside any block: the initializer and
    /// continuing statement of a `for`, and each `if` of an `else if` chain.
    fn decompose_unblocked(&mut self, stmt: StmtId) -> Result<(), TransformError> {
        match self.b.arena().stmt(stmt).kind {
            StmtKind::For {
                initializer,
                continuing,
                ..
            } => {
                for inner in initializer.into_iter().chain(continuing) {
                    self.decompose_statement(inner)?;
                }
            }
            StmtKind::If { .. } => {
                let mut current = stmt;
                while let StmtKind::If {
                    else_stmt: Some(next),
                    ..
                } = self.b.arena().stmt(current).kind
                {
                    if !matches!(self.b.arena().stmt(next).kind, StmtKind::If { .. }) {
                        break;
                    }
                    self.decompose_statement(next)?;
                    current = next;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn decompose_statement(&mut self, stmt: StmtId) -> Result<(), TransformError> {
        let roots: SmallVec<[ExprId; 2]> = match self.b.arena().stmt(stmt).kind {
            StmtKind::Assign { lhs, rhs } => {
                if !self.effects.has(lhs) && !self.effects.has(rhs) {
                    return Ok(());
                }
                SmallVec::from_slice(&[lhs, rhs])
            }
            StmtKind::Call(expr)
            | StmtKind::While {
                condition: expr, ..
            }
            | StmtKind::If {
                condition: expr, ..
            }
            | StmtKind::For {
                condition: Some(expr),
                ..
            }
            | StmtKind::Return(Some(expr)) => {
                if !self.effects.has(expr) {
                    return Ok(());
                }
                SmallVec::from_slice(&[expr])
            }
            // Hoisted operands of a switch condition still need their lets.
            StmtKind::Switch { condition, .. } => SmallVec::from_slice(&[condition]),
            StmtKind::VarDecl(decl) => match &self.b.arena().decl(decl).kind {
                DeclKind::Variable(v) => match v.initializer {
                    Some(init) if self.effects.has(init) => SmallVec::from_slice(&[init]),
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            },
            _ => return Ok(()),
        };

        let mut stmts = Stmts::new();
        for root in roots {
            self.decompose(root, &mut stmts);
        }
        if !stmts.is_empty() {
            self.changed = true;
            for new_stmt in stmts {
                self.hoister.insert_before(stmt, new_stmt)?;
            }
        }
        Ok(())
    }

    fn decompose(&mut self, expr: ExprId, stmts: &mut Stmts) {
        ensure_sufficient_stack(|| self.decompose_inner(expr, stmts));
    }

    fn decompose_inner(&mut self, expr: ExprId, stmts: &mut Stmts) {
        match self.b.arena().expr(expr).kind {
            ExprKind::Binary { op, lhs, rhs } => {
                if op.is_logical() && (self.effects.has(lhs) || self.effects.has(rhs)) {
                    self.short_circuit(expr, op == BinaryOp::LogicalOr, lhs, rhs, stmts);
                    return;
                }
                self.decompose(lhs, stmts);
                self.decompose(rhs, stmts);
            }
            ExprKind::Index { object, index } => {
                self.decompose(object, stmts);
                self.decompose(index, stmts);
            }
            ExprKind::Unary { operand: inner, .. }
            | ExprKind::Member { object: inner, .. }
            | ExprKind::Bitcast { expr: inner, .. } => self.decompose(inner, stmts),
            ExprKind::Call { args, .. } => {
                let args: SmallVec<[ExprId; 4]> =
                    self.b.arena().expr_list(args).iter().copied().collect();
                for arg in args {
                    self.decompose(arg, stmts);
                }
            }
            ExprKind::Ident { .. } | ExprKind::Literal(_) | ExprKind::Phony => {}
        }
        if self.to_hoist.contains(&expr) {
            self.hoist(expr, stmts);
        }
    }

    /// Move `expr` into `let tmp = expr;` and make `expr` read `tmp`.
    fn hoist(&mut self, expr: ExprId, stmts: &mut Stmts) {
        let name = self.b.fresh(self.prefix);
        let moved = *self.b.arena().expr(expr);
        let old_span = self.b.set_span(moved.span);
        let value = self.b.arena_mut().alloc_expr(moved);
        let decl = self.b.variable_named(name, VariableKind::Let, None, Some(value));
        stmts.push(self.b.decl_stmt(decl));
        self.b.set_span(old_span);
        self.b.replace_expr(expr, ident(name));
    }

    fn short_circuit(
        &mut self,
        expr: ExprId,
        is_or: bool,
        lhs: ExprId,
        rhs: ExprId,
        stmts: &mut Stmts,
    ) {
        let span = self.b.arena().expr(expr).span;
        let old_span = self.b.set_span(span);
        let name = self.b.fresh(self.prefix);

        self.decompose(lhs, stmts);
        let var = self.b.variable_named(name, VariableKind::VAR, None, Some(lhs));
        stmts.push(self.b.decl_stmt(var));

        let t = self.b.ident_name(name);
        let condition = if is_or { self.b.not(t) } else { t };

        let mut body = Stmts::new();
        self.decompose(rhs, &mut body);
        let target = self.b.ident_name(name);
        body.push(self.b.assign(target, rhs));
        let body = self.b.block(body);
        stmts.push(self.b.if_stmt(condition, body, None));

        self.b.replace_expr(expr, ident(name));
        self.b.set_span(old_span);
        tracing::trace!(?expr, "short-circuit expression decomposed");
    }
}

fn ident(name: shade_ir::Name) -> ExprKind {
    ExprKind::Ident {
        name,
        template_args: ExprRange::EMPTY,
    }
}
