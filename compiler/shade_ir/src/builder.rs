//! Node construction and copy-on-rewrite.
//!
//! [`ProgramBuilder`] is the only way new nodes come into existence. Tests
//! and front ends use it to assemble programs from scratch; transforms use
//! [`ProgramBuilder::from_program`] to obtain a private copy of their input,
//! append synthesized nodes, and overwrite the nodes they rewrite. The input
//! program is never touched.

use crate::{
    AliasDecl, AstArena, Attribute, AttributeKind, BinaryOp, CaseSelector, Decl, DeclId,
    DeclKind, DiagnosticControl, EnableDirective, Expr, ExprId, ExprKind, FloatSuffix,
    FunctionDecl, IntSuffix, Literal, Module, Name, ParameterDecl, Program, SharedInterner, Span,
    Stmt, StmtId, StmtKind, StructDecl, StructMember, SwitchCase, UnaryOp, VariableDecl,
    VariableKind,
};

/// Builder for programs.
///
/// New nodes take the builder's current span ([`Span::DUMMY`] unless changed
/// with [`set_span`](Self::set_span)).
pub struct ProgramBuilder {
    arena: AstArena,
    module: Module,
    interner: SharedInterner,
    span: Span,
}

impl ProgramBuilder {
    /// Empty program with a fresh interner.
    pub fn new() -> Self {
        Self::with_interner(SharedInterner::new())
    }

    /// Empty program sharing `interner`.
    pub fn with_interner(interner: SharedInterner) -> Self {
        ProgramBuilder {
            arena: AstArena::new(),
            module: Module::new(),
            interner,
            span: Span::DUMMY,
        }
    }

    /// Private copy of `program` for rewriting.
    ///
    /// Every node id and name of `program` is valid in the copy and initially
    /// denotes the same node. Names interned through the builder, such as
    /// [`fresh`](Self::fresh) temporaries, stay out of `program`.
    pub fn from_program(program: &Program) -> Self {
        ProgramBuilder {
            arena: program.arena().clone(),
            module: program.module().clone(),
            interner: program.interner().fork(),
            span: Span::DUMMY,
        }
    }

    pub fn build(self) -> Program {
        Program::from_parts(self.arena, self.module, self.interner)
    }

    #[inline]
    pub fn arena(&self) -> &AstArena {
        &self.arena
    }

    #[inline]
    pub fn arena_mut(&mut self) -> &mut AstArena {
        &mut self.arena
    }

    #[inline]
    pub fn module(&self) -> &Module {
        &self.module
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Set the span given to subsequently created nodes, returning the old one.
    pub fn set_span(&mut self, span: Span) -> Span {
        std::mem::replace(&mut self.span, span)
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Intern `text`.
    pub fn sym(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    /// A name not used anywhere in the program yet.
    pub fn fresh(&self, prefix: &str) -> Name {
        self.interner.fresh(prefix)
    }

    // Expressions

    pub fn expr(&mut self, kind: ExprKind) -> ExprId {
        let span = self.span;
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    pub fn ident(&mut self, name: &str) -> ExprId {
        let name = self.sym(name);
        self.ident_name(name)
    }

    pub fn ident_name(&mut self, name: Name) -> ExprId {
        self.expr(ExprKind::Ident {
            name,
            template_args: crate::ExprRange::EMPTY,
        })
    }

    /// Templated identifier such as `array<S, 4>`.
    pub fn templated(&mut self, name: &str, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        let name = self.sym(name);
        let template_args = self.arena.alloc_expr_list(args);
        self.expr(ExprKind::Ident {
            name,
            template_args,
        })
    }

    pub fn bool_lit(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Literal(Literal::Bool(value)))
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.int_suffixed(value, IntSuffix::None)
    }

    pub fn int_suffixed(&mut self, value: i64, suffix: IntSuffix) -> ExprId {
        self.expr(ExprKind::Literal(Literal::Int { value, suffix }))
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.expr(ExprKind::Literal(Literal::float(value, FloatSuffix::None)))
    }

    pub fn phony(&mut self) -> ExprId {
        self.expr(ExprKind::Phony)
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.expr(ExprKind::Binary { op, lhs, rhs })
    }

    /// `lhs && rhs`
    pub fn and(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::LogicalAnd, lhs, rhs)
    }

    /// `lhs || rhs`
    pub fn or(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::LogicalOr, lhs, rhs)
    }

    pub fn add(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Add, lhs, rhs)
    }

    pub fn less(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.binary(BinaryOp::Less, lhs, rhs)
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.expr(ExprKind::Unary { op, operand })
    }

    /// `!operand`
    pub fn not(&mut self, operand: ExprId) -> ExprId {
        self.unary(UnaryOp::Not, operand)
    }

    /// `&operand`
    pub fn address_of(&mut self, operand: ExprId) -> ExprId {
        self.unary(UnaryOp::AddressOf, operand)
    }

    /// `*operand`
    pub fn deref(&mut self, operand: ExprId) -> ExprId {
        self.unary(UnaryOp::Indirection, operand)
    }

    pub fn index(&mut self, object: ExprId, index: ExprId) -> ExprId {
        self.expr(ExprKind::Index { object, index })
    }

    pub fn member(&mut self, object: ExprId, member: &str) -> ExprId {
        let member = self.sym(member);
        self.expr(ExprKind::Member { object, member })
    }

    /// Call of the function or type named `name`.
    pub fn call(&mut self, name: &str, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        let target = self.ident(name);
        self.call_expr(target, args)
    }

    pub fn call_expr(&mut self, target: ExprId, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        let args = self.arena.alloc_expr_list(args);
        self.expr(ExprKind::Call { target, args })
    }

    /// `bitcast<ty>(expr)`
    pub fn bitcast(&mut self, ty: ExprId, expr: ExprId) -> ExprId {
        self.expr(ExprKind::Bitcast { ty, expr })
    }

    // Statements

    pub fn stmt(&mut self, kind: StmtKind) -> StmtId {
        let span = self.span;
        self.arena.alloc_stmt(Stmt::new(kind, span))
    }

    pub fn block(&mut self, stmts: impl IntoIterator<Item = StmtId>) -> StmtId {
        let range = self.arena.alloc_stmt_list(stmts);
        self.stmt(StmtKind::Block(range))
    }

    pub fn assign(&mut self, lhs: ExprId, rhs: ExprId) -> StmtId {
        self.stmt(StmtKind::Assign { lhs, rhs })
    }

    pub fn compound_assign(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> StmtId {
        self.stmt(StmtKind::CompoundAssign { op, lhs, rhs })
    }

    pub fn increment(&mut self, lhs: ExprId) -> StmtId {
        self.stmt(StmtKind::IncDec {
            lhs,
            increment: true,
        })
    }

    pub fn call_stmt(&mut self, call: ExprId) -> StmtId {
        self.stmt(StmtKind::Call(call))
    }

    pub fn ret(&mut self, value: Option<ExprId>) -> StmtId {
        self.stmt(StmtKind::Return(value))
    }

    pub fn break_stmt(&mut self) -> StmtId {
        self.stmt(StmtKind::Break)
    }

    pub fn break_if(&mut self, condition: ExprId) -> StmtId {
        self.stmt(StmtKind::BreakIf(condition))
    }

    pub fn continue_stmt(&mut self) -> StmtId {
        self.stmt(StmtKind::Continue)
    }

    pub fn discard(&mut self) -> StmtId {
        self.stmt(StmtKind::Discard)
    }

    pub fn if_stmt(&mut self, condition: ExprId, body: StmtId, else_stmt: Option<StmtId>) -> StmtId {
        self.stmt(StmtKind::If {
            condition,
            body,
            else_stmt,
        })
    }

    pub fn loop_stmt(&mut self, body: StmtId, continuing: Option<StmtId>) -> StmtId {
        self.stmt(StmtKind::Loop { body, continuing })
    }

    pub fn for_stmt(
        &mut self,
        initializer: Option<StmtId>,
        condition: Option<ExprId>,
        continuing: Option<StmtId>,
        body: StmtId,
    ) -> StmtId {
        self.stmt(StmtKind::For {
            initializer,
            condition,
            continuing,
            body,
        })
    }

    pub fn while_stmt(&mut self, condition: ExprId, body: StmtId) -> StmtId {
        self.stmt(StmtKind::While { condition, body })
    }

    pub fn switch_stmt(
        &mut self,
        condition: ExprId,
        cases: impl IntoIterator<Item = SwitchCase>,
    ) -> StmtId {
        let cases = self.arena.alloc_cases(cases);
        self.stmt(StmtKind::Switch { condition, cases })
    }

    pub fn case(&self, selectors: Vec<CaseSelector>, body: StmtId) -> SwitchCase {
        SwitchCase {
            selectors,
            body,
            span: self.span,
        }
    }

    /// Declaration statement for a local variable.
    pub fn decl_stmt(&mut self, decl: DeclId) -> StmtId {
        self.stmt(StmtKind::VarDecl(decl))
    }

    // Declarations

    pub fn decl(&mut self, kind: DeclKind) -> DeclId {
        let span = self.span;
        self.arena.alloc_decl(Decl::new(kind, span))
    }

    pub fn variable_named(
        &mut self,
        name: Name,
        kind: VariableKind,
        ty: Option<ExprId>,
        initializer: Option<ExprId>,
    ) -> DeclId {
        self.decl(DeclKind::Variable(VariableDecl {
            name,
            kind,
            ty,
            initializer,
            attributes: Vec::new(),
        }))
    }

    pub fn variable(
        &mut self,
        name: &str,
        kind: VariableKind,
        ty: Option<ExprId>,
        initializer: Option<ExprId>,
    ) -> DeclId {
        let name = self.sym(name);
        self.variable_named(name, kind, ty, initializer)
    }

    pub fn var(&mut self, name: &str, ty: Option<ExprId>, initializer: Option<ExprId>) -> DeclId {
        self.variable(name, VariableKind::VAR, ty, initializer)
    }

    pub fn let_decl(&mut self, name: &str, initializer: ExprId) -> DeclId {
        self.variable(name, VariableKind::Let, None, Some(initializer))
    }

    pub fn const_decl(&mut self, name: &str, initializer: ExprId) -> DeclId {
        self.variable(name, VariableKind::Const, None, Some(initializer))
    }

    pub fn override_decl(
        &mut self,
        name: &str,
        ty: Option<ExprId>,
        initializer: Option<ExprId>,
    ) -> DeclId {
        self.variable(name, VariableKind::Override, ty, initializer)
    }

    pub fn param(&mut self, name: &str, ty: ExprId) -> DeclId {
        let name = self.sym(name);
        self.decl(DeclKind::Parameter(ParameterDecl {
            name,
            ty,
            attributes: Vec::new(),
        }))
    }

    /// Function with a body built from `body` statements.
    pub fn function(
        &mut self,
        name: &str,
        params: Vec<DeclId>,
        return_type: Option<ExprId>,
        body: impl IntoIterator<Item = StmtId>,
    ) -> DeclId {
        let body = self.block(body);
        let name = self.sym(name);
        self.decl(DeclKind::Function(FunctionDecl {
            name,
            params,
            return_type,
            attributes: Vec::new(),
            return_type_attributes: Vec::new(),
            body: Some(body),
        }))
    }

    pub fn structure(&mut self, name: &str, members: Vec<(&str, ExprId)>) -> DeclId {
        let span = self.span;
        let members = members
            .into_iter()
            .map(|(member, ty)| StructMember {
                name: self.sym(member),
                ty,
                attributes: Vec::new(),
                span,
            })
            .collect();
        let name = self.sym(name);
        self.decl(DeclKind::Struct(StructDecl { name, members }))
    }

    pub fn alias(&mut self, name: &str, ty: ExprId) -> DeclId {
        let name = self.sym(name);
        self.decl(DeclKind::Alias(AliasDecl { name, ty }))
    }

    pub fn enable(&mut self, extensions: &[&str]) -> DeclId {
        let extensions = extensions.iter().map(|e| self.sym(e)).collect();
        self.decl(DeclKind::Enable(EnableDirective { extensions }))
    }

    pub fn diagnostic_directive(&mut self, severity: &str, rule: &str) -> DeclId {
        let severity = self.sym(severity);
        let rule = self.sym(rule);
        self.decl(DeclKind::DiagnosticDirective(DiagnosticControl {
            severity,
            rule,
        }))
    }

    pub fn const_assert(&mut self, condition: ExprId) -> DeclId {
        self.decl(DeclKind::ConstAssert(condition))
    }

    pub fn attribute(&self, kind: AttributeKind) -> Attribute {
        Attribute {
            kind,
            span: self.span,
        }
    }

    /// Append an attribute to a struct member, function, variable or
    /// parameter. Other declarations carry no attributes and are left as is.
    pub fn add_attribute(&mut self, decl: DeclId, attribute: Attribute) {
        match &mut self.arena.decl_mut(decl).kind {
            DeclKind::Function(f) => f.attributes.push(attribute),
            DeclKind::Variable(v) => v.attributes.push(attribute),
            DeclKind::Parameter(p) => p.attributes.push(attribute),
            DeclKind::Struct(s) => {
                if let Some(member) = s.members.last_mut() {
                    member.attributes.push(attribute);
                }
            }
            DeclKind::Alias(_)
            | DeclKind::DiagnosticDirective(_)
            | DeclKind::Enable(_)
            | DeclKind::ConstAssert(_) => {}
        }
    }

    // Module

    /// Append `decl` to the module's global declarations.
    pub fn global(&mut self, decl: DeclId) -> DeclId {
        self.module.global_declarations.push(decl);
        decl
    }

    // Rewriting

    /// Replace the kind of expression `id`, keeping its span.
    pub fn replace_expr(&mut self, id: ExprId, kind: ExprKind) {
        let span = self.arena.expr(id).span;
        self.arena.set_expr(id, Expr::new(kind, span));
    }

    /// Replace the kind of statement `id`, keeping its span.
    pub fn replace_stmt(&mut self, id: StmtId, kind: StmtKind) {
        let span = self.arena.stmt(id).span;
        self.arena.set_stmt(id, Stmt::new(kind, span));
    }

    /// Give block `block` a new statement list. Non-block statements are left untouched.
    pub fn set_block_statements(&mut self, block: StmtId, stmts: impl IntoIterator<Item = StmtId>) {
        if matches!(self.arena.stmt(block).kind, StmtKind::Block(_)) {
            let range = self.arena.alloc_stmt_list(stmts);
            self.replace_stmt(block, StmtKind::Block(range));
        }
    }
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}
