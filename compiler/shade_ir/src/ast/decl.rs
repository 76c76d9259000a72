//! Declaration nodes.
//!
//! Module-scope declarations, function parameters and function-local
//! variables share one arena so that every identifier can resolve to a
//! [`DeclId`](crate::DeclId).

use crate::{Attribute, DeclId, ExprId, Name, Named, Span, Spanned, StmtId};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Decl {
    pub kind: DeclKind,
    pub span: Span,
}

impl Decl {
    #[inline]
    pub const fn new(kind: DeclKind, span: Span) -> Self {
        Decl { kind, span }
    }

    /// Whether this is a `diagnostic(...)` or `enable` directive.
    #[inline]
    pub const fn is_directive(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::DiagnosticDirective(_) | DeclKind::Enable(_)
        )
    }

    /// User-facing kind, as used in dependency diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match &self.kind {
            DeclKind::Struct(_) => "struct",
            DeclKind::Alias(_) => "alias",
            DeclKind::Function(_) => "function",
            DeclKind::Variable(v) => v.kind.keyword(),
            DeclKind::Parameter(_) => "parameter",
            DeclKind::DiagnosticDirective(_) => "diagnostic",
            DeclKind::Enable(_) => "enable",
            DeclKind::ConstAssert(_) => "const_assert",
        }
    }
}

impl Spanned for Decl {
    fn span(&self) -> Span {
        self.span
    }
}

impl Named for Decl {
    fn name(&self) -> Option<Name> {
        match &self.kind {
            DeclKind::Struct(s) => Some(s.name),
            DeclKind::Alias(a) => Some(a.name),
            DeclKind::Function(f) => Some(f.name),
            DeclKind::Variable(v) => Some(v.name),
            DeclKind::Parameter(p) => Some(p.name),
            DeclKind::DiagnosticDirective(_) | DeclKind::Enable(_) | DeclKind::ConstAssert(_) => {
                None
            }
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    Struct(StructDecl),
    Alias(AliasDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
    /// Function parameter. Never appears in a module's global list.
    Parameter(ParameterDecl),
    DiagnosticDirective(DiagnosticControl),
    Enable(EnableDirective),
    ConstAssert(ExprId),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructDecl {
    pub name: Name,
    pub members: Vec<StructMember>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructMember {
    pub name: Name,
    pub ty: ExprId,
    pub attributes: Vec<Attribute>,
    pub span: Span,
}

/// `alias name = ty;`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct AliasDecl {
    pub name: Name,
    pub ty: ExprId,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionDecl {
    pub name: Name,
    pub params: Vec<DeclId>,
    pub return_type: Option<ExprId>,
    pub attributes: Vec<Attribute>,
    pub return_type_attributes: Vec<Attribute>,
    /// Block statement. `None` for declarations without a body.
    pub body: Option<StmtId>,
}

/// Variable-like declaration forms.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VariableKind {
    /// `var<address_space, access>`; both template arguments are optional.
    Var {
        address_space: Option<ExprId>,
        access: Option<ExprId>,
    },
    Let,
    Const,
    Override,
}

impl VariableKind {
    /// Plain `var` with no template arguments.
    pub const VAR: VariableKind = VariableKind::Var {
        address_space: None,
        access: None,
    };

    pub const fn keyword(self) -> &'static str {
        match self {
            VariableKind::Var { .. } => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
            VariableKind::Override => "override",
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct VariableDecl {
    pub name: Name,
    pub kind: VariableKind,
    pub ty: Option<ExprId>,
    pub initializer: Option<ExprId>,
    pub attributes: Vec<Attribute>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParameterDecl {
    pub name: Name,
    pub ty: ExprId,
    pub attributes: Vec<Attribute>,
}

/// `diagnostic(severity, rule);`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DiagnosticControl {
    pub severity: Name,
    pub rule: Name,
}

/// `enable ext1, ext2;`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EnableDirective {
    pub extensions: Vec<Name>,
}
