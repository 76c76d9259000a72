//! Selection of the expressions to hoist.
//!
//! Expressions are visited operands first, left to right. Each visit reports
//! whether its expression is a candidate: a value that a later side effect
//! could change (a variable load) or that must be evaluated before one (a
//! call). Candidates wait in a list until a side-effecting expression is met,
//! at which point every waiting candidate is hoisted.
//!
//! Accessor chains such as `v[a][b]` are hoisted whole rather than link by
//! link, and compound side-effect-free operands of a binary expression are
//! left for the parent to hoist as a unit.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use shade_ir::{AstArena, DeclKind, ExprId, ExprKind, StmtKind, UnaryOp};
use shade_stack::ensure_sufficient_stack;

use crate::{HoistPolicy, SemanticInfo, SideEffects, StatementIndex};

type MaybeHoist = SmallVec<[ExprId; 8]>;

pub(super) struct CollectHoists<'a> {
    arena: &'a AstArena,
    effects: &'a SideEffects,
    sem: &'a dyn SemanticInfo,
    policy: &'a dyn HoistPolicy,
    /// Expressions known not to have side effects, or no longer having them
    /// once hoisted.
    no_side_effects: FxHashSet<ExprId>,
    to_hoist: FxHashSet<ExprId>,
}

impl<'a> CollectHoists<'a> {
    pub(super) fn new(
        arena: &'a AstArena,
        effects: &'a SideEffects,
        sem: &'a dyn SemanticInfo,
        policy: &'a dyn HoistPolicy,
    ) -> Self {
        CollectHoists {
            arena,
            effects,
            sem,
            policy,
            no_side_effects: FxHashSet::default(),
            to_hoist: FxHashSet::default(),
        }
    }

    pub(super) fn run(mut self, index: &StatementIndex) -> FxHashSet<ExprId> {
        for &stmt in index.statements() {
            match self.arena.stmt(stmt).kind {
                StmtKind::Assign { lhs, rhs } => {
                    // One list: an rhs side effect can change what the lhs refers to.
                    let mut maybe = MaybeHoist::new();
                    self.process(lhs, &mut maybe);
                    self.process(rhs, &mut maybe);
                }
                StmtKind::Call(expr)
                | StmtKind::While {
                    condition: expr, ..
                }
                | StmtKind::If {
                    condition: expr, ..
                }
                | StmtKind::Switch {
                    condition: expr, ..
                } => self.process_root(Some(expr)),
                StmtKind::For { condition, .. } => self.process_root(condition),
                StmtKind::Return(value) => self.process_root(value),
                StmtKind::VarDecl(decl) => {
                    if let DeclKind::Variable(v) = &self.arena.decl(decl).kind {
                        self.process_root(v.initializer);
                    }
                }
                StmtKind::CompoundAssign { .. }
                | StmtKind::IncDec { .. }
                | StmtKind::Block(_)
                | StmtKind::Break
                | StmtKind::BreakIf(_)
                | StmtKind::Continue
                | StmtKind::Discard
                | StmtKind::Loop { .. }
                | StmtKind::ConstAssert(_) => {}
            }
        }
        tracing::trace!(count = self.to_hoist.len(), "collected hoists");
        self.to_hoist
    }

    fn process_root(&mut self, expr: Option<ExprId>) {
        if let Some(expr) = expr {
            let mut maybe = MaybeHoist::new();
            self.process(expr, &mut maybe);
        }
    }

    /// Side effects of `expr`, discounting operands that were hoisted.
    fn has_side_effects(&mut self, expr: ExprId) -> bool {
        if self.no_side_effects.contains(&expr) || !self.effects.has(expr) {
            return false;
        }
        let result = ensure_sufficient_stack(|| match self.arena.expr(expr).kind {
            ExprKind::Call { .. } => true,
            ExprKind::Binary { lhs, rhs, .. }
            | ExprKind::Index {
                object: lhs,
                index: rhs,
            } => self.has_side_effects(lhs) || self.has_side_effects(rhs),
            ExprKind::Member { object: inner, .. }
            | ExprKind::Bitcast { expr: inner, .. }
            | ExprKind::Unary { operand: inner, .. } => self.has_side_effects(inner),
            ExprKind::Ident { .. } | ExprKind::Literal(_) | ExprKind::Phony => false,
        });
        if !result {
            self.no_side_effects.insert(expr);
        }
        result
    }

    fn hoist(&mut self, expr: ExprId) {
        self.no_side_effects.insert(expr);
        self.to_hoist.insert(expr);
    }

    fn flush(&mut self, maybe: &mut MaybeHoist) {
        for expr in maybe.drain(..) {
            self.hoist(expr);
        }
    }

    /// Returns whether the parent may want to hoist `expr`.
    fn process(&mut self, expr: ExprId, maybe: &mut MaybeHoist) -> bool {
        ensure_sufficient_stack(|| self.process_inner(expr, maybe))
    }

    fn process_inner(&mut self, expr: ExprId, maybe: &mut MaybeHoist) -> bool {
        match self.arena.expr(expr).kind {
            ExprKind::Call { args, .. } => {
                if self.has_side_effects(expr) {
                    self.flush(maybe);
                }
                // Arguments get their own list: a later argument's side effect
                // must not hoist candidates from outside the call, which is
                // hoisted itself when needed.
                let mut arg_maybe = MaybeHoist::new();
                let arena = self.arena;
                for &arg in arena.expr_list(args) {
                    self.default_process(arg, &mut arg_maybe);
                }
                // Calls are always candidates so they keep their place relative
                // to later side effects.
                true
            }
            ExprKind::Ident { .. } => self
                .sem
                .variable_use(expr)
                .is_some_and(|variable| self.policy.can_hoist(&variable)),
            ExprKind::Binary { op, lhs, rhs } => {
                if op.is_logical() && self.has_side_effects(expr) {
                    // Short-circuiting operands are split into statements later.
                    self.process(lhs, maybe);
                    self.process(rhs, maybe);
                    false
                } else {
                    self.binary_process(lhs, rhs, maybe)
                }
            }
            ExprKind::Bitcast { expr: inner, .. } => self.process(inner, maybe),
            ExprKind::Unary { op, operand } => {
                let candidate = self.process(operand, maybe);
                // `&x` is never copied.
                op != UnaryOp::AddressOf && candidate
            }
            ExprKind::Index { object, index } => self.accessor_process(object, Some(index), maybe),
            ExprKind::Member { object, .. } => self.accessor_process(object, None, maybe),
            ExprKind::Literal(_) | ExprKind::Phony => false,
        }
    }

    fn default_process(&mut self, expr: ExprId, maybe: &mut MaybeHoist) {
        if self.process(expr, maybe) {
            maybe.push(expr);
        }
        if self.has_side_effects(expr) {
            self.flush(maybe);
        }
    }

    fn binary_process(&mut self, lhs: ExprId, rhs: ExprId, maybe: &mut MaybeHoist) -> bool {
        if !self.has_side_effects(lhs) && !self.has_side_effects(rhs) {
            // Let the parent hoist the whole expression.
            let lhs_candidate = self.process(lhs, maybe);
            let rhs_candidate = self.process(rhs, maybe);
            return lhs_candidate || rhs_candidate;
        }
        self.default_process(lhs, maybe);
        self.default_process(rhs, maybe);
        false
    }

    fn accessor_process(
        &mut self,
        object: ExprId,
        index: Option<ExprId>,
        maybe: &mut MaybeHoist,
    ) -> bool {
        let mut candidate = self.process(object, maybe);
        if candidate && self.has_side_effects(object) {
            maybe.push(object);
            self.flush(maybe);
            candidate = false;
        }
        if let Some(index) = index {
            self.default_process(index, maybe);
        }
        candidate
    }
}
