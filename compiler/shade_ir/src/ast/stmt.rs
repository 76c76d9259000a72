//! Statement nodes.

use crate::{BinaryOp, CaseRange, DeclId, ExprId, Span, Spanned, StmtId, StmtRange};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub const fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// Statement kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    /// `lhs = rhs;`
    Assign { lhs: ExprId, rhs: ExprId },

    /// `lhs op= rhs;`
    CompoundAssign {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },

    /// `lhs++;` / `lhs--;`
    IncDec { lhs: ExprId, increment: bool },

    /// `{ ... }`
    Block(StmtRange),

    Break,

    /// `break if cond;` (only inside `continuing`)
    BreakIf(ExprId),

    Continue,

    Discard,

    /// A call evaluated for its effects: `f(x);`
    Call(ExprId),

    /// `for (initializer; condition; continuing) body`
    For {
        initializer: Option<StmtId>,
        condition: Option<ExprId>,
        continuing: Option<StmtId>,
        body: StmtId,
    },

    /// `loop { body continuing { ... } }`
    Loop {
        body: StmtId,
        continuing: Option<StmtId>,
    },

    /// `while (condition) body`
    While { condition: ExprId, body: StmtId },

    /// `if (condition) body else else_stmt`, where `else_stmt` is a block or
    /// another `if`.
    If {
        condition: ExprId,
        body: StmtId,
        else_stmt: Option<StmtId>,
    },

    Return(Option<ExprId>),

    Switch { condition: ExprId, cases: CaseRange },

    /// Declaration of a function-local `var`, `let` or `const`.
    VarDecl(DeclId),

    /// `const_assert cond;`
    ConstAssert(ExprId),
}

impl StmtKind {
    /// Short kind name for internal error reports.
    pub const fn describe(&self) -> &'static str {
        match self {
            StmtKind::Assign { .. } => "assignment",
            StmtKind::CompoundAssign { .. } => "compound assignment",
            StmtKind::IncDec { .. } => "increment/decrement",
            StmtKind::Block(_) => "block",
            StmtKind::Break => "break",
            StmtKind::BreakIf(_) => "break-if",
            StmtKind::Continue => "continue",
            StmtKind::Discard => "discard",
            StmtKind::Call(_) => "call statement",
            StmtKind::For { .. } => "for-loop",
            StmtKind::Loop { .. } => "loop",
            StmtKind::While { .. } => "while",
            StmtKind::If { .. } => "if",
            StmtKind::Return(_) => "return",
            StmtKind::Switch { .. } => "switch",
            StmtKind::VarDecl(_) => "variable declaration",
            StmtKind::ConstAssert(_) => "const_assert",
        }
    }
}

/// Case selector: a constant expression or `default`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CaseSelector {
    Default,
    Expr(ExprId),
}

/// One `case ...: { ... }` clause of a switch.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct SwitchCase {
    pub selectors: Vec<CaseSelector>,
    pub body: StmtId,
    pub span: Span,
}
