//! A complete, immutable program: arena, module and interner.

use crate::{
    AstArena, Decl, DeclId, DeclKind, Expr, ExprId, Module, Name, SharedInterner, Stmt, StmtId,
};

/// An immutable program.
///
/// Passes read a `Program` and either attach side tables keyed by node ids
/// or produce a new `Program` through a
/// [`ProgramBuilder`](crate::ProgramBuilder). Programs produced from another
/// program share its interner, and every node id of the input remains valid
/// in the output.
#[derive(Clone, Debug)]
pub struct Program {
    arena: AstArena,
    module: Module,
    interner: SharedInterner,
}

impl Program {
    pub(crate) fn from_parts(arena: AstArena, module: Module, interner: SharedInterner) -> Self {
        Program {
            arena,
            module,
            interner,
        }
    }

    #[inline]
    pub fn arena(&self) -> &AstArena {
        &self.arena
    }

    #[inline]
    pub fn module(&self) -> &Module {
        &self.module
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        self.arena.expr(id)
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        self.arena.stmt(id)
    }

    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        self.arena.decl(id)
    }

    /// Text of an interned name.
    #[inline]
    pub fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Functions of the module, in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.module
            .global_declarations
            .iter()
            .copied()
            .filter(|&id| matches!(self.arena.decl(id).kind, DeclKind::Function(_)))
    }

    /// Find a global declaration by name.
    pub fn find_global(&self, name: &str) -> Option<DeclId> {
        let name = self.interner.get(name)?;
        self.module.global_declarations.iter().copied().find(|&id| {
            crate::Named::name(self.arena.decl(id)) == Some(name)
        })
    }
}
