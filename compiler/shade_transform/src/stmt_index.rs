//! Parent links for the statements of a program.
//!
//! AST nodes only point down. Inserting a declaration before a statement
//! needs to know what contains that statement, and hoisting an expression
//! needs to know which statement evaluates it; the index answers both.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use shade_ir::{
    AstArena, CaseSelector, DeclId, DeclKind, ExprId, Program, StmtId, StmtKind, TraverseAction,
    TraverseOrder,
};
use shade_stack::ensure_sufficient_stack;

/// What directly contains a statement.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Parent {
    /// The body block of a function.
    Function(DeclId),
    /// A statement in a block's statement list.
    Block(StmtId),
    /// A body, `else` block, `continuing` block or case body of a statement.
    Statement(StmtId),
    /// The initializer of a `for` loop.
    ForInitializer(StmtId),
    /// The continuing statement of a `for` loop.
    ForContinuing(StmtId),
    /// The `if` of an `else if`.
    Else(StmtId),
}

#[derive(Clone, Debug, Default)]
pub struct StatementIndex {
    parents: FxHashMap<StmtId, Parent>,
    kinds: FxHashMap<StmtId, StmtKind>,
    owners: FxHashMap<ExprId, StmtId>,
    /// Pre-order, function by function.
    statements: Vec<StmtId>,
    blocks: Vec<StmtId>,
}

impl StatementIndex {
    /// Index every statement reachable from a function body.
    pub fn build(program: &Program) -> Self {
        let mut index = StatementIndex::default();
        for func in program.functions() {
            if let DeclKind::Function(f) = &program.decl(func).kind {
                if let Some(body) = f.body {
                    index.visit(program.arena(), body, Parent::Function(func));
                }
            }
        }
        index
    }

    pub fn parent(&self, stmt: StmtId) -> Option<Parent> {
        self.parents.get(&stmt).copied()
    }

    /// The statement that evaluates `expr`.
    pub fn owner(&self, expr: ExprId) -> Option<StmtId> {
        self.owners.get(&expr).copied()
    }

    /// Kind of `stmt` as it was when the index was built.
    pub fn kind(&self, stmt: StmtId) -> Option<StmtKind> {
        self.kinds.get(&stmt).copied()
    }

    pub fn contains(&self, stmt: StmtId) -> bool {
        self.parents.contains_key(&stmt)
    }

    pub fn statements(&self) -> &[StmtId] {
        &self.statements
    }

    pub fn blocks(&self) -> &[StmtId] {
        &self.blocks
    }

    fn visit(&mut self, arena: &AstArena, stmt: StmtId, parent: Parent) {
        ensure_sufficient_stack(|| self.visit_inner(arena, stmt, parent));
    }

    fn visit_inner(&mut self, arena: &AstArena, stmt: StmtId, parent: Parent) {
        let kind = arena.stmt(stmt).kind;
        self.parents.insert(stmt, parent);
        self.kinds.insert(stmt, kind);
        self.statements.push(stmt);

        for root in direct_expressions(arena, stmt) {
            shade_ir::traverse_expressions(arena, root, TraverseOrder::LeftToRight, |id, _| {
                self.owners.insert(id, stmt);
                TraverseAction::Descend
            });
        }

        match kind {
            StmtKind::Block(stmts) => {
                self.blocks.push(stmt);
                for &child in arena.stmt_list(stmts) {
                    self.visit(arena, child, Parent::Block(stmt));
                }
            }
            StmtKind::For {
                initializer,
                continuing,
                body,
                ..
            } => {
                if let Some(init) = initializer {
                    self.visit(arena, init, Parent::ForInitializer(stmt));
                }
                if let Some(cont) = continuing {
                    self.visit(arena, cont, Parent::ForContinuing(stmt));
                }
                self.visit(arena, body, Parent::Statement(stmt));
            }
            StmtKind::Loop { body, continuing } => {
                self.visit(arena, body, Parent::Statement(stmt));
                if let Some(cont) = continuing {
                    self.visit(arena, cont, Parent::Statement(stmt));
                }
            }
            StmtKind::While { body, .. } => self.visit(arena, body, Parent::Statement(stmt)),
            StmtKind::If {
                body, else_stmt, ..
            } => {
                self.visit(arena, body, Parent::Statement(stmt));
                if let Some(else_stmt) = else_stmt {
                    let parent = if matches!(arena.stmt(else_stmt).kind, StmtKind::If { .. }) {
                        Parent::Else(stmt)
                    } else {
                        Parent::Statement(stmt)
                    };
                    self.visit(arena, else_stmt, parent);
                }
            }
            StmtKind::Switch { cases, .. } => {
                for case in arena.cases(cases) {
                    self.visit(arena, case.body, Parent::Statement(stmt));
                }
            }
            StmtKind::Assign { .. }
            | StmtKind::CompoundAssign { .. }
            | StmtKind::IncDec { .. }
            | StmtKind::Break
            | StmtKind::BreakIf(_)
            | StmtKind::Continue
            | StmtKind::Discard
            | StmtKind::Call(_)
            | StmtKind::Return(_)
            | StmtKind::VarDecl(_)
            | StmtKind::ConstAssert(_) => {}
        }
    }
}

/// Root expressions evaluated by `stmt` itself, in evaluation order.
/// Expressions of nested statements are not included.
pub(crate) fn direct_expressions(arena: &AstArena, stmt: StmtId) -> SmallVec<[ExprId; 4]> {
    let mut roots = SmallVec::new();
    match arena.stmt(stmt).kind {
        StmtKind::Assign { lhs, rhs } | StmtKind::CompoundAssign { lhs, rhs, .. } => {
            roots.push(lhs);
            roots.push(rhs);
        }
        StmtKind::IncDec { lhs, .. } => roots.push(lhs),
        StmtKind::BreakIf(e) | StmtKind::Call(e) | StmtKind::ConstAssert(e) => roots.push(e),
        StmtKind::For { condition, .. } => roots.extend(condition),
        StmtKind::While { condition, .. } | StmtKind::If { condition, .. } => roots.push(condition),
        StmtKind::Return(value) => roots.extend(value),
        StmtKind::Switch { condition, cases } => {
            roots.push(condition);
            for case in arena.cases(cases) {
                for selector in &case.selectors {
                    if let CaseSelector::Expr(e) = *selector {
                        roots.push(e);
                    }
                }
            }
        }
        StmtKind::VarDecl(decl) => {
            if let DeclKind::Variable(v) = &arena.decl(decl).kind {
                roots.extend(v.initializer);
            }
        }
        StmtKind::Block(_)
        | StmtKind::Break
        | StmtKind::Continue
        | StmtKind::Discard
        | StmtKind::Loop { .. } => {}
    }
    roots
}

#[cfg(test)]
mod tests;
