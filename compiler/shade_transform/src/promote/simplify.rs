//! Preparation of statements whose expressions have side effects.

use shade_ir::{Program, ProgramBuilder};

use crate::stmt_index::direct_expressions;
use crate::{
    ApplyResult, HoistToDeclBefore, SemanticInfo, SideEffects, StatementIndex, Transform,
    TransformError,
};

/// Rewrites every statement evaluating a side-effecting expression into a
/// form that can take declarations in front of it.
///
/// `for` and `while` loops become `loop`s and `else if`s become
/// `else { if }` when their condition, initializer or continuing
/// statement has side effects. Statements directly in a block are left
/// alone.
#[derive(Copy, Clone, Debug, Default)]
pub struct SimplifySideEffectStatements;

impl Transform for SimplifySideEffectStatements {
    fn name(&self) -> &'static str {
        "SimplifySideEffectStatements"
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn apply(
        &self,
        program: &Program,
        sem: &dyn SemanticInfo,
    ) -> Result<ApplyResult, TransformError> {
        let effects = SideEffects::compute(program, sem);
        let index = StatementIndex::build(program);
        let mut hoister = HoistToDeclBefore::new(&index);

        let mut prepared = 0usize;
        for &stmt in index.statements() {
            for root in direct_expressions(program.arena(), stmt) {
                if effects.has(root) {
                    hoister.prepare(root)?;
                    prepared += 1;
                }
            }
        }
        if prepared == 0 {
            return Ok(ApplyResult::Skipped);
        }

        let mut b = ProgramBuilder::from_program(program);
        if !hoister.apply(&mut b) {
            tracing::debug!(prepared, "side-effecting statements already in blocks");
            return Ok(ApplyResult::Skipped);
        }
        Ok(ApplyResult::Applied(b.build()))
    }
}
