//! Per-declaration scan: scoping, identifier resolution and dependency edges.

use shade_diagnostic::{internal_error, Diagnostic, DiagnosticList, ErrorCode};
use shade_ir::{
    Attribute, Builtin, CaseSelector, DeclId, DeclKind, ExprId, ExprKind, FunctionDecl, Name,
    Named, Program, ScopeStack, StmtId, StmtKind, TraverseAction, TraverseOrder, VariableDecl,
    VariableKind,
};
use shade_stack::ensure_sufficient_stack;

use crate::global::{DependencyEdges, GlobalId, Globals};
use crate::{DependencyGraph, ResolvedIdentifier};

/// Walks global declarations one at a time, maintaining the lexical scope
/// stack across them.
///
/// The outermost scope is seeded with every named global before the first
/// scan, so references to globals declared later in the module resolve.
pub(crate) struct DependencyScanner<'a> {
    program: &'a Program,
    globals: &'a mut Globals,
    edges: &'a mut DependencyEdges,
    graph: &'a mut DependencyGraph,
    diagnostics: &'a mut DiagnosticList,
    scope: ScopeStack<Name, DeclId>,
    /// Owner of every edge recorded by the current [`scan`](Self::scan).
    current: Option<GlobalId>,
}

impl<'a> DependencyScanner<'a> {
    pub(crate) fn new(
        program: &'a Program,
        globals: &'a mut Globals,
        edges: &'a mut DependencyEdges,
        graph: &'a mut DependencyGraph,
        diagnostics: &'a mut DiagnosticList,
    ) -> Self {
        let mut scope = ScopeStack::new();
        for (name, decl) in globals.named() {
            scope.set(name, decl);
        }
        DependencyScanner {
            program,
            globals,
            edges,
            graph,
            diagnostics,
            scope,
            current: None,
        }
    }

    /// Scan the declaration of `global`, recording its outgoing edges.
    pub(crate) fn scan(&mut self, global: GlobalId) {
        let previous = self.current.replace(global);
        let program = self.program;
        let decl_id = self.globals.get(global).decl;
        let decl = program.decl(decl_id);

        match &decl.kind {
            DeclKind::Struct(s) => {
                self.declare(s.name, decl_id);
                for member in &s.members {
                    self.traverse_attributes(&member.attributes);
                    self.traverse_expression(member.ty);
                }
            }
            DeclKind::Alias(a) => {
                self.declare(a.name, decl_id);
                self.traverse_expression(a.ty);
            }
            DeclKind::Function(f) => {
                self.declare(f.name, decl_id);
                self.traverse_function(f);
            }
            DeclKind::Variable(v) => {
                self.declare(v.name, decl_id);
                self.traverse_variable(v);
            }
            DeclKind::DiagnosticDirective(_) | DeclKind::Enable(_) => {}
            DeclKind::ConstAssert(condition) => self.traverse_expression(*condition),
            DeclKind::Parameter(_) => {
                tracing::error!(decl = ?decl_id, "parameter in global declaration list");
                self.diagnostics.add(internal_error(
                    decl.span,
                    format!("unhandled node type: {}", decl.kind_name()),
                ));
            }
        }

        self.current = previous;
    }

    /// Bind `name` in the innermost scope, reporting a redeclaration when a
    /// different declaration already owns it there.
    fn declare(&mut self, name: Name, decl: DeclId) {
        let Some(old) = self.scope.set(name, decl) else {
            return;
        };
        if old == decl {
            return;
        }
        let program = self.program;
        let text = program.name(name);
        tracing::debug!(name = text, ?decl, previous = ?old, "redeclaration");
        self.diagnostics.add(
            Diagnostic::error(ErrorCode::E1001)
                .with_message(format!("redeclaration of '{text}'"))
                .with_label(program.decl(decl).span, "")
                .with_secondary_label(
                    program.decl(old).span,
                    format!("'{text}' previously declared here"),
                ),
        );
    }

    /// Record that `decl` hides whatever `name` currently resolves to.
    fn record_shadow(&mut self, name: Name, decl: DeclId) {
        if let Some(hidden) = self.scope.get(&name) {
            self.graph.shadows.entry(decl).or_insert(hidden);
        }
    }

    fn traverse_function(&mut self, func: &FunctionDecl) {
        let program = self.program;
        self.traverse_attributes(&func.attributes);
        self.traverse_attributes(&func.return_type_attributes);
        // Parameter types resolve before any parameter is declared.
        for &param in &func.params {
            if let DeclKind::Parameter(p) = &program.decl(param).kind {
                self.traverse_attributes(&p.attributes);
                self.traverse_expression(p.ty);
            }
        }
        if let Some(ret) = func.return_type {
            self.traverse_expression(ret);
        }

        self.scope.push();
        for &param in &func.params {
            if let Some(name) = program.decl(param).name() {
                self.record_shadow(name, param);
                self.declare(name, param);
            }
        }
        if let Some(body) = func.body {
            if let StmtKind::Block(stmts) = program.stmt(body).kind {
                self.traverse_statements(program.arena().stmt_list(stmts));
            }
        }
        self.scope.pop();
    }

    fn traverse_variable(&mut self, var: &VariableDecl) {
        if let VariableKind::Var {
            address_space,
            access,
        } = var.kind
        {
            if let Some(space) = address_space {
                self.traverse_expression(space);
            }
            if let Some(access) = access {
                self.traverse_expression(access);
            }
        }
        if let Some(ty) = var.ty {
            self.traverse_expression(ty);
        }
        self.traverse_attributes(&var.attributes);
        if let Some(init) = var.initializer {
            self.traverse_expression(init);
        }
    }

    fn traverse_attributes(&mut self, attributes: &[Attribute]) {
        for attr in attributes {
            for expr in attr.kind.expressions() {
                self.traverse_expression(expr);
            }
        }
    }

    fn traverse_statements(&mut self, stmts: &[StmtId]) {
        for &stmt in stmts {
            self.traverse_statement(stmt);
        }
    }

    fn traverse_statement(&mut self, stmt: StmtId) {
        ensure_sufficient_stack(|| self.traverse_statement_inner(stmt));
    }

    fn traverse_statement_inner(&mut self, stmt: StmtId) {
        let program = self.program;
        match program.stmt(stmt).kind {
            StmtKind::Assign { lhs, rhs } | StmtKind::CompoundAssign { lhs, rhs, .. } => {
                self.traverse_expression(lhs);
                self.traverse_expression(rhs);
            }
            StmtKind::Block(stmts) => {
                self.scope.push();
                self.traverse_statements(program.arena().stmt_list(stmts));
                self.scope.pop();
            }
            StmtKind::BreakIf(condition) | StmtKind::ConstAssert(condition) => {
                self.traverse_expression(condition);
            }
            StmtKind::Call(call) => self.traverse_expression(call),
            StmtKind::For {
                initializer,
                condition,
                continuing,
                body,
            } => {
                self.scope.push();
                if let Some(init) = initializer {
                    self.traverse_statement(init);
                }
                if let Some(condition) = condition {
                    self.traverse_expression(condition);
                }
                if let Some(cont) = continuing {
                    self.traverse_statement(cont);
                }
                self.traverse_statement(body);
                self.scope.pop();
            }
            StmtKind::IncDec { lhs, .. } => self.traverse_expression(lhs),
            StmtKind::Loop { body, continuing } => {
                // The continuing block sees the loop body's declarations.
                self.scope.push();
                if let StmtKind::Block(stmts) = program.stmt(body).kind {
                    self.traverse_statements(program.arena().stmt_list(stmts));
                } else {
                    self.traverse_statement(body);
                }
                if let Some(cont) = continuing {
                    self.traverse_statement(cont);
                }
                self.scope.pop();
            }
            StmtKind::If {
                condition,
                body,
                else_stmt,
            } => {
                self.traverse_expression(condition);
                self.traverse_statement(body);
                if let Some(else_stmt) = else_stmt {
                    self.traverse_statement(else_stmt);
                }
            }
            StmtKind::Return(value) => {
                if let Some(value) = value {
                    self.traverse_expression(value);
                }
            }
            StmtKind::Switch { condition, cases } => {
                self.traverse_expression(condition);
                for case in program.arena().cases(cases) {
                    for selector in &case.selectors {
                        if let CaseSelector::Expr(expr) = *selector {
                            self.traverse_expression(expr);
                        }
                    }
                    self.traverse_statement(case.body);
                }
            }
            StmtKind::VarDecl(decl) => {
                if let DeclKind::Variable(var) = &program.decl(decl).kind {
                    self.record_shadow(var.name, decl);
                    // Declared after the initializer: `let x = x;` sees the outer `x`.
                    self.traverse_variable(var);
                    self.declare(var.name, decl);
                }
            }
            StmtKind::While { condition, body } => {
                self.scope.push();
                self.traverse_expression(condition);
                self.traverse_statement(body);
                self.scope.pop();
            }
            StmtKind::Break | StmtKind::Continue | StmtKind::Discard => {}
        }
    }

    fn traverse_expression(&mut self, root: ExprId) {
        let program = self.program;
        shade_ir::traverse_expressions(
            program.arena(),
            root,
            TraverseOrder::LeftToRight,
            |id, expr| {
                // Call targets and bitcast types are not operands. They are
                // resolved on arrival, ahead of the arguments.
                match expr.kind {
                    ExprKind::Ident { name, .. } => self.add_dependency(id, name),
                    ExprKind::Call { target, .. } => self.traverse_expression(target),
                    ExprKind::Bitcast { ty, .. } => self.traverse_expression(ty),
                    _ => {}
                }
                TraverseAction::Descend
            },
        );
    }

    /// Resolve identifier `ident` naming `name`, adding an edge from the
    /// current global when it names another global.
    fn add_dependency(&mut self, ident: ExprId, name: Name) {
        let resolved = match self.scope.get(&name) {
            Some(decl) => {
                if let (Some(from), Some(to)) = (self.current, self.globals.find(name)) {
                    if self.globals.get(to).decl == decl {
                        let site = self.program.expr(ident).span;
                        if self.edges.add(from, to, site) {
                            self.globals.push_dependency(from, to);
                        }
                    }
                }
                ResolvedIdentifier::Decl(decl)
            }
            None => Builtin::classify(self.program.name(name))
                .map_or(ResolvedIdentifier::Unresolved { name }, ResolvedIdentifier::Builtin),
        };
        self.graph.resolved_identifiers.entry(ident).or_insert(resolved);
    }
}
