//! Semantic queries the transforms depend on.
//!
//! Type and call analysis live outside this crate. Transforms only need two
//! answers from it, expressed by [`SemanticInfo`].

use rustc_hash::{FxHashMap, FxHashSet};

use shade_ir::{Access, ExprId, ExprKind, Program};

/// What kind of value a variable stores.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum StoreKind {
    #[default]
    Value,
    Texture,
    Sampler,
}

/// Facts about an identifier expression that loads a variable.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct VariableUse {
    /// The variable's value is known at compile time.
    pub constant: bool,
    pub access: Access,
    pub store: StoreKind,
}

impl VariableUse {
    /// A plain read-write variable holding a value.
    pub const MUTABLE: VariableUse = VariableUse {
        constant: false,
        access: Access::ReadWrite,
        store: StoreKind::Value,
    };
}

/// Per-expression semantic facts.
pub trait SemanticInfo {
    /// Whether calling the callee of `call` may have side effects. Argument
    /// side effects are accounted for separately.
    fn call_has_side_effects(&self, call: ExprId) -> bool;

    /// The variable loaded by identifier `ident`, or `None` if it does not
    /// name a variable.
    fn variable_use(&self, ident: ExprId) -> Option<VariableUse>;
}

/// Table-backed [`SemanticInfo`].
#[derive(Clone, Debug, Default)]
pub struct SemanticTable {
    impure_calls: FxHashSet<ExprId>,
    variables: FxHashMap<ExprId, VariableUse>,
}

impl SemanticTable {
    pub fn new() -> Self {
        SemanticTable::default()
    }

    /// Mark `call` as calling a function with side effects.
    pub fn impure_call(&mut self, call: ExprId) -> &mut Self {
        self.impure_calls.insert(call);
        self
    }

    /// Mark every call to the function named `name` in `program` as impure.
    pub fn impure_function(&mut self, program: &Program, name: &str) -> &mut Self {
        let Some(name) = program.interner().get(name) else {
            return self;
        };
        for id in 0..program.arena().expr_count() {
            let id = ExprId::new(u32::try_from(id).unwrap_or(u32::MAX));
            if let ExprKind::Call { target, .. } = program.expr(id).kind {
                if matches!(program.expr(target).kind, ExprKind::Ident { name: n, .. } if n == name) {
                    self.impure_calls.insert(id);
                }
            }
        }
        self
    }

    pub fn set_variable(&mut self, ident: ExprId, variable: VariableUse) -> &mut Self {
        self.variables.insert(ident, variable);
        self
    }

    /// Record `variable` for every identifier named `name` in `program`.
    pub fn variable(&mut self, program: &Program, name: &str, variable: VariableUse) -> &mut Self {
        let Some(name) = program.interner().get(name) else {
            return self;
        };
        for id in 0..program.arena().expr_count() {
            let id = ExprId::new(u32::try_from(id).unwrap_or(u32::MAX));
            if matches!(program.expr(id).kind, ExprKind::Ident { name: n, .. } if n == name) {
                self.variables.insert(id, variable);
            }
        }
        self
    }
}

impl SemanticInfo for SemanticTable {
    fn call_has_side_effects(&self, call: ExprId) -> bool {
        self.impure_calls.contains(&call)
    }

    fn variable_use(&self, ident: ExprId) -> Option<VariableUse> {
        self.variables.get(&ident).copied()
    }
}
