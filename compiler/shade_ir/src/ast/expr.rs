//! Expression nodes.

use crate::{BinaryOp, ExprId, ExprRange, Name, Span, Spanned, UnaryOp};

/// Integer literal suffix.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IntSuffix {
    None,
    I,
    U,
}

/// Float literal suffix.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FloatSuffix {
    None,
    F,
    H,
}

/// Literal value. Floats are stored as bits so literals stay `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Literal {
    Bool(bool),
    Int { value: i64, suffix: IntSuffix },
    Float { bits: u64, suffix: FloatSuffix },
}

impl Literal {
    pub fn float(value: f64, suffix: FloatSuffix) -> Self {
        Literal::Float {
            bits: value.to_bits(),
            suffix,
        }
    }
}

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Literal(Literal),

    /// Identifier, optionally templated: `x`, `vec3<f32>`, `array<T, N>`.
    Ident { name: Name, template_args: ExprRange },

    /// `_`
    Phony,

    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },

    Unary { op: UnaryOp, operand: ExprId },

    /// `object[index]`
    Index { object: ExprId, index: ExprId },

    /// `object.member`
    Member { object: ExprId, member: Name },

    /// `target(args)`. The target is an identifier expression naming a
    /// function or a type constructor.
    Call { target: ExprId, args: ExprRange },

    /// `bitcast<ty>(expr)`
    Bitcast { ty: ExprId, expr: ExprId },
}

impl ExprKind {
    /// Short kind name for internal error reports.
    pub const fn describe(&self) -> &'static str {
        match self {
            ExprKind::Literal(_) => "literal",
            ExprKind::Ident { .. } => "identifier",
            ExprKind::Phony => "phony",
            ExprKind::Binary { .. } => "binary",
            ExprKind::Unary { .. } => "unary",
            ExprKind::Index { .. } => "index accessor",
            ExprKind::Member { .. } => "member accessor",
            ExprKind::Call { .. } => "call",
            ExprKind::Bitcast { .. } => "bitcast",
        }
    }
}
