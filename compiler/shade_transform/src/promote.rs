//! Hoisting of side effects into declarations.
//!
//! Backends that evaluate expressions in their own order, or that cannot
//! express short-circuit operators over side-effecting operands, need every
//! side effect to happen in a statement of its own. [`PromoteSideEffectsToDecl`]
//! rewrites functions so that evaluating any remaining expression in any
//! order gives the same result as evaluating it left to right:
//!
//! ```text
//! x = a + f(&a);           let tmp = a;
//!                    =>    let tmp_1 = f(&a);
//!                          x = (tmp + tmp_1);
//! ```
//!
//! It runs as two transforms. [`SimplifySideEffectStatements`] moves
//! side-effecting conditions out of loop headers and `else if`s so that
//! every affected statement sits in a block, then [`DecomposeSideEffects`]
//! decides what to hoist and does it.

mod collect;
mod decompose;
mod simplify;

use shade_ir::{Program, ProgramBuilder};

use crate::{
    ApplyResult, Manager, PromoteOptions, SemanticInfo, SideEffects, StatementIndex, Transform,
    TransformError,
};

use collect::CollectHoists;
use decompose::DecomposeState;

pub use simplify::SimplifySideEffectStatements;

/// Hoists side-effecting expressions, and the expressions whose value they
/// could change, into `let`s, and decomposes `&&` and `||` over side effects
/// into `var` + `if`.
///
/// Runs standalone as well: without [`SimplifySideEffectStatements`] in
/// front of it, loop headers and `else if`s are converted on the fly when
/// something has to be declared before them.
#[derive(Clone, Debug, Default)]
pub struct DecomposeSideEffects {
    pub options: PromoteOptions,
}

impl DecomposeSideEffects {
    pub fn new(options: PromoteOptions) -> Self {
        DecomposeSideEffects { options }
    }
}

impl Transform for DecomposeSideEffects {
    fn name(&self) -> &'static str {
        "DecomposeSideEffects"
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn apply(
        &self,
        program: &Program,
        sem: &dyn SemanticInfo,
    ) -> Result<ApplyResult, TransformError> {
        let effects = SideEffects::compute(program, sem);
        let index = StatementIndex::build(program);
        let to_hoist = CollectHoists::new(program.arena(), &effects, sem, self.options.policy.as_ref())
            .run(&index);

        let mut b = ProgramBuilder::from_program(program);
        let changed = DecomposeState::new(
            &mut b,
            &index,
            &effects,
            &to_hoist,
            &self.options.temp_prefix,
        )
        .run(&index)?;

        if !changed {
            return Ok(ApplyResult::Skipped);
        }
        tracing::debug!(hoisted = to_hoist.len(), "side effects decomposed");
        Ok(ApplyResult::Applied(b.build()))
    }
}

/// [`SimplifySideEffectStatements`] followed by [`DecomposeSideEffects`].
#[derive(Clone, Debug, Default)]
pub struct PromoteSideEffectsToDecl {
    pub options: PromoteOptions,
}

impl PromoteSideEffectsToDecl {
    pub fn new(options: PromoteOptions) -> Self {
        PromoteSideEffectsToDecl { options }
    }
}

impl Transform for PromoteSideEffectsToDecl {
    fn name(&self) -> &'static str {
        "PromoteSideEffectsToDecl"
    }

    fn apply(
        &self,
        program: &Program,
        sem: &dyn SemanticInfo,
    ) -> Result<ApplyResult, TransformError> {
        Manager::new()
            .with(SimplifySideEffectStatements)
            .with(DecomposeSideEffects::new(self.options.clone()))
            .run(program, sem)
    }
}
