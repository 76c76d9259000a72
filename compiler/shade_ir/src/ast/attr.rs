//! Attributes (`@binding(0)`, `@workgroup_size(8, 8)`, ...).

use crate::{ExprId, Name, Span};

/// Shader pipeline stage named by `@vertex`, `@fragment` or `@compute`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PipelineStage {
    Vertex,
    Fragment,
    Compute,
}

impl PipelineStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            PipelineStage::Vertex => "vertex",
            PipelineStage::Fragment => "fragment",
            PipelineStage::Compute => "compute",
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum AttributeKind {
    Align(ExprId),
    Binding(ExprId),
    Builtin(ExprId),
    Diagnostic { severity: Name, rule: Name },
    Group(ExprId),
    Id(ExprId),
    Interpolate {
        ty: ExprId,
        sampling: Option<ExprId>,
    },
    Invariant,
    Location(ExprId),
    MustUse,
    Offset(ExprId),
    Size(ExprId),
    Stage(PipelineStage),
    Stride(u32),
    Workgroup {
        x: ExprId,
        y: Option<ExprId>,
        z: Option<ExprId>,
    },
    /// Compiler-internal attribute carrying extra dependency expressions.
    Internal { dependencies: Vec<ExprId> },
}

impl AttributeKind {
    /// Expressions carried by this attribute, in source order.
    pub fn expressions(&self) -> Vec<ExprId> {
        match self {
            AttributeKind::Align(e)
            | AttributeKind::Binding(e)
            | AttributeKind::Builtin(e)
            | AttributeKind::Group(e)
            | AttributeKind::Id(e)
            | AttributeKind::Location(e)
            | AttributeKind::Offset(e)
            | AttributeKind::Size(e) => vec![*e],
            AttributeKind::Interpolate { ty, sampling } => {
                std::iter::once(*ty).chain(*sampling).collect()
            }
            AttributeKind::Workgroup { x, y, z } => {
                std::iter::once(*x).chain(*y).chain(*z).collect()
            }
            AttributeKind::Internal { dependencies } => dependencies.clone(),
            AttributeKind::Diagnostic { .. }
            | AttributeKind::Invariant
            | AttributeKind::MustUse
            | AttributeKind::Stage(_)
            | AttributeKind::Stride(_) => Vec::new(),
        }
    }

    /// Attribute spelling without the `@`.
    pub const fn keyword(&self) -> &'static str {
        match self {
            AttributeKind::Align(_) => "align",
            AttributeKind::Binding(_) => "binding",
            AttributeKind::Builtin(_) => "builtin",
            AttributeKind::Diagnostic { .. } => "diagnostic",
            AttributeKind::Group(_) => "group",
            AttributeKind::Id(_) => "id",
            AttributeKind::Interpolate { .. } => "interpolate",
            AttributeKind::Invariant => "invariant",
            AttributeKind::Location(_) => "location",
            AttributeKind::MustUse => "must_use",
            AttributeKind::Offset(_) => "offset",
            AttributeKind::Size(_) => "size",
            AttributeKind::Stage(stage) => stage.as_str(),
            AttributeKind::Stride(_) => "stride",
            AttributeKind::Workgroup { .. } => "workgroup_size",
            AttributeKind::Internal { .. } => "internal",
        }
    }
}
