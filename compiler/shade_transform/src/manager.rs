//! The transform interface and sequential composition of transforms.

use shade_ir::Program;

use crate::{SemanticInfo, TransformError};

/// Outcome of a transform that did not fail.
#[derive(Debug)]
pub enum ApplyResult {
    /// The input needed no change. Its node ids and semantic info remain valid.
    Skipped,
    /// The transformed program.
    Applied(Program),
}

impl ApplyResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyResult::Applied(_))
    }

    /// The transformed program, or `input` itself when the transform skipped.
    pub fn into_program(self, input: Program) -> Program {
        match self {
            ApplyResult::Skipped => input,
            ApplyResult::Applied(program) => program,
        }
    }
}

/// A program-to-program rewrite.
pub trait Transform {
    fn name(&self) -> &'static str;

    /// Rewrite `program`. Implementations must not modify the input, so a
    /// failed transform leaves the caller's program intact.
    fn apply(
        &self,
        program: &Program,
        sem: &dyn SemanticInfo,
    ) -> Result<ApplyResult, TransformError>;
}

/// Runs transforms in order, each on the output of the previous one.
///
/// Every transform receives the same [`SemanticInfo`]. Node ids survive
/// rewriting, and the expressions a transform allocates are unknown to the
/// semantic info, so later transforms see them as plain values.
#[derive(Default)]
pub struct Manager {
    transforms: Vec<Box<dyn Transform + Send + Sync>>,
}

impl Manager {
    pub fn new() -> Self {
        Manager::default()
    }

    #[must_use]
    pub fn with(mut self, transform: impl Transform + Send + Sync + 'static) -> Self {
        self.add(transform);
        self
    }

    pub fn add(&mut self, transform: impl Transform + Send + Sync + 'static) {
        self.transforms.push(Box::new(transform));
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Apply every transform. Skipped only when every transform skipped.
    pub fn run(
        &self,
        program: &Program,
        sem: &dyn SemanticInfo,
    ) -> Result<ApplyResult, TransformError> {
        let mut output: Option<Program> = None;
        for transform in &self.transforms {
            let input = output.as_ref().unwrap_or(program);
            let _span = tracing::debug_span!("transform", name = transform.name()).entered();
            match transform.apply(input, sem)? {
                ApplyResult::Skipped => tracing::debug!("skipped"),
                ApplyResult::Applied(next) => {
                    tracing::debug!("applied");
                    output = Some(next);
                }
            }
        }
        Ok(match output {
            Some(program) => ApplyResult::Applied(program),
            None => ApplyResult::Skipped,
        })
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.transforms.iter().map(|t| t.name()))
            .finish()
    }
}
