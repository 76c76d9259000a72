//! Configuration of the side-effect promotion transform.

use std::fmt;
use std::sync::Arc;

use shade_ir::Access;

use crate::{StoreKind, VariableUse};

/// Decides whether a variable load may be copied into a temporary.
///
/// Hoisting a load pins the value it observes. Loads that cannot observe a
/// side effect gain nothing from that, and some targets cannot hold certain
/// handles in a local at all.
pub trait HoistPolicy: fmt::Debug + Send + Sync {
    fn can_hoist(&self, variable: &VariableUse) -> bool;
}

/// Hoists mutable value variables only: never constants, read-only
/// variables, textures or samplers.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DefaultHoistPolicy;

impl HoistPolicy for DefaultHoistPolicy {
    fn can_hoist(&self, variable: &VariableUse) -> bool {
        !variable.constant && variable.access != Access::Read && variable.store == StoreKind::Value
    }
}

#[derive(Clone, Debug)]
pub struct PromoteOptions {
    /// Prefix of synthesized declaration names (`tmp`, `tmp_1`, ...).
    pub temp_prefix: String,
    pub policy: Arc<dyn HoistPolicy>,
}

impl PromoteOptions {
    #[must_use]
    pub fn with_policy(mut self, policy: impl HoistPolicy + 'static) -> Self {
        self.policy = Arc::new(policy);
        self
    }
}

impl Default for PromoteOptions {
    fn default() -> Self {
        PromoteOptions {
            temp_prefix: "tmp".to_owned(),
            policy: Arc::new(DefaultHoistPolicy),
        }
    }
}
