//! Arena storage for AST nodes.
//!
//! All nodes of a program live in contiguous vectors addressed by
//! [`ExprId`], [`StmtId`] and [`DeclId`]. Child lists (call arguments,
//! template arguments, block statements, switch cases) live in side vectors
//! addressed by ranges.
//!
//! Cloning an arena keeps every id valid, which is what makes copy-on-rewrite
//! cheap to reason about: a transform clones its input's arena, appends new
//! nodes, and overwrites only the nodes on the path to a rewrite.

use crate::{
    CaseRange, Decl, DeclId, Expr, ExprId, ExprRange, Stmt, StmtId, StmtRange, SwitchCase,
};

fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("{what} arena exceeded u32::MAX entries"))
}


/// Node storage for one program.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct AstArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    decls: Vec<Decl>,
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
    cases: Vec<SwitchCase>,
}

impl AstArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expression"));
        self.exprs.push(expr);
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Overwrite an expression in place.
    #[inline]
    pub fn set_expr(&mut self, id: ExprId, expr: Expr) {
        self.exprs[id.index()] = expr;
    }

    #[inline]
    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statement"));
        self.stmts.push(stmt);
        id
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// Overwrite a statement in place.
    #[inline]
    pub fn set_stmt(&mut self, id: StmtId, stmt: Stmt) {
        self.stmts[id.index()] = stmt;
    }

    #[inline]
    pub fn alloc_decl(&mut self, decl: Decl) -> DeclId {
        let id = DeclId::new(to_u32(self.decls.len(), "declaration"));
        self.decls.push(decl);
        id
    }

    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    #[inline]
    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.index()]
    }

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "expression list");
        self.expr_lists.extend(exprs);
        let end = to_u32(self.expr_lists.len(), "expression list");
        ExprRange::new(start, end - start)
    }

    #[inline]
    pub fn expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.bounds()]
    }

    #[inline]
    pub fn expr_list_mut(&mut self, range: ExprRange) -> &mut [ExprId] {
        &mut self.expr_lists[range.bounds()]
    }

    pub fn alloc_stmt_list(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let start = to_u32(self.stmt_lists.len(), "statement list");
        self.stmt_lists.extend(stmts);
        let end = to_u32(self.stmt_lists.len(), "statement list");
        StmtRange::new(start, end - start)
    }

    #[inline]
    pub fn stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.bounds()]
    }

    pub fn alloc_cases(&mut self, cases: impl IntoIterator<Item = SwitchCase>) -> CaseRange {
        let start = to_u32(self.cases.len(), "switch case");
        self.cases.extend(cases);
        let end = to_u32(self.cases.len(), "switch case");
        CaseRange::new(start, end - start)
    }

    #[inline]
    pub fn cases(&self, range: CaseRange) -> &[SwitchCase] {
        &self.cases[range.bounds()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }

    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }
}
