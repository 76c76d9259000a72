//! Insertion of declarations before arbitrary statements.
//!
//! Most statements sit in a block, where inserting before them is a matter
//! of splicing the block's statement list. A few positions have no block to
//! splice into:
//! - the condition of a `for` or `while` loop, and a `for` loop's
//!   initializer and continuing statement: the loop is rewritten into a
//!   `loop` whose body starts with the inserted statements;
//! - the condition of an `else if`: the `else if` becomes `else { ...; if }`.
//!
//! Requests are recorded first and materialized together by
//! [`HoistToDeclBefore::apply`], so node ids stay stable while requests are
//! being made.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use shade_ir::{ExprId, ExprKind, ExprRange, Name, ProgramBuilder, StmtId, StmtKind, VariableKind};

use crate::{Parent, StatementIndex, TransformError};

/// Kind of declaration [`HoistToDeclBefore::add`] introduces.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum HoistKind {
    Let,
    Var,
    Const,
}

impl HoistKind {
    fn variable_kind(self) -> VariableKind {
        match self {
            HoistKind::Let => VariableKind::Let,
            HoistKind::Var => VariableKind::VAR,
            HoistKind::Const => VariableKind::Const,
        }
    }
}

type Stmts = SmallVec<[StmtId; 4]>;

/// Statements to place around a loop that is rewritten into a `loop`.
#[derive(Clone, Debug, Default)]
struct LoopInfo {
    init_decls: Stmts,
    cond_decls: Stmts,
    cont_decls: Stmts,
}

pub struct HoistToDeclBefore<'i> {
    index: &'i StatementIndex,
    for_loops: FxHashMap<StmtId, LoopInfo>,
    while_loops: FxHashMap<StmtId, LoopInfo>,
    /// `else if` statements to turn into `else { ... if }`, with the
    /// statements to put before the `if`.
    else_ifs: FxHashMap<StmtId, Stmts>,
    /// Statements to splice into a block before the keyed statement.
    before: FxHashMap<StmtId, Stmts>,
    replacements: FxHashMap<StmtId, StmtId>,
}

impl<'i> HoistToDeclBefore<'i> {
    pub fn new(index: &'i StatementIndex) -> Self {
        HoistToDeclBefore {
            index,
            for_loops: FxHashMap::default(),
            while_loops: FxHashMap::default(),
            else_ifs: FxHashMap::default(),
            before: FxHashMap::default(),
            replacements: FxHashMap::default(),
        }
    }

    /// Move `expr` into a new declaration of kind `kind` named after `prefix`,
    /// placed before the statement that evaluates `expr`. `expr` becomes a
    /// reference to the declaration. Returns the declared name.
    pub fn add(
        &mut self,
        b: &mut ProgramBuilder,
        expr: ExprId,
        kind: HoistKind,
        prefix: &str,
    ) -> Result<Name, TransformError> {
        let owner = self
            .index
            .owner(expr)
            .ok_or(TransformError::DetachedExpression { expr })?;

        let name = b.fresh(prefix);
        let moved = *b.arena().expr(expr);
        let span = b.set_span(moved.span);
        let value = b.arena_mut().alloc_expr(moved);
        let decl = b.variable_named(name, kind.variable_kind(), None, Some(value));
        let decl_stmt = b.decl_stmt(decl);
        b.set_span(span);

        self.insert_before_impl(owner, Some(decl_stmt))?;
        b.replace_expr(
            expr,
            ExprKind::Ident {
                name,
                template_args: ExprRange::EMPTY,
            },
        );
        tracing::trace!(?expr, name = b.interner().lookup(name), "hoisted expression");
        Ok(name)
    }

    /// Insert `new_stmt` before `stmt`.
    pub fn insert_before(&mut self, stmt: StmtId, new_stmt: StmtId) -> Result<(), TransformError> {
        self.insert_before_impl(stmt, Some(new_stmt))
    }

    /// Replace `what` with `with`, preparing `what`'s position as
    /// [`prepare`](Self::prepare) would.
    pub fn replace(&mut self, what: StmtId, with: StmtId) -> Result<(), TransformError> {
        self.insert_before_impl(what, None)?;
        self.replacements.insert(what, with);
        Ok(())
    }

    /// Make the position before the statement evaluating `expr` able to
    /// take declarations, without inserting any.
    pub fn prepare(&mut self, expr: ExprId) -> Result<(), TransformError> {
        let owner = self
            .index
            .owner(expr)
            .ok_or(TransformError::DetachedExpression { expr })?;
        self.insert_before_impl(owner, None)
    }

    fn insert_before_impl(
        &mut self,
        stmt: StmtId,
        new_stmt: Option<StmtId>,
    ) -> Result<(), TransformError> {
        let parent = self
            .index
            .parent(stmt)
            .ok_or(TransformError::UnknownStatement { stmt })?;

        let decls = match parent {
            Parent::Else(_) => self.else_ifs.entry(stmt).or_default(),
            _ if self.is_for(stmt) => &mut self.for_loops.entry(stmt).or_default().cond_decls,
            _ if self.is_while(stmt) => &mut self.while_loops.entry(stmt).or_default().cond_decls,
            Parent::Block(_) => {
                // Nothing to prepare: a block can always take statements.
                if let Some(new_stmt) = new_stmt {
                    self.before.entry(stmt).or_default().push(new_stmt);
                }
                return Ok(());
            }
            Parent::ForInitializer(for_loop) => {
                &mut self.for_loops.entry(for_loop).or_default().init_decls
            }
            Parent::ForContinuing(for_loop) => {
                &mut self.for_loops.entry(for_loop).or_default().cont_decls
            }
            Parent::Function(_) | Parent::Statement(_) => {
                return Err(TransformError::UnhandledInsertionPoint {
                    stmt,
                    kind: self.kind_of(stmt),
                });
            }
        };
        decls.extend(new_stmt);
        Ok(())
    }

    fn is_for(&self, stmt: StmtId) -> bool {
        matches!(self.index.kind(stmt), Some(StmtKind::For { .. }))
    }

    fn is_while(&self, stmt: StmtId) -> bool {
        matches!(self.index.kind(stmt), Some(StmtKind::While { .. }))
    }

    fn kind_of(&self, stmt: StmtId) -> &'static str {
        self.index.kind(stmt).map_or("unknown", |kind| kind.describe())
    }

    /// Materialize every recorded request. Returns whether the program changed.
    pub fn apply(self, b: &mut ProgramBuilder) -> bool {
        let HoistToDeclBefore {
            index,
            for_loops,
            while_loops,
            else_ifs,
            before,
            replacements,
        } = self;
        let changed = !(for_loops.is_empty()
            && while_loops.is_empty()
            && else_ifs.is_empty()
            && before.is_empty()
            && replacements.is_empty());

        // A replaced statement is not rewritten any further.
        for (what, with) in sorted(replacements) {
            let kind = b.arena().stmt(with).kind;
            b.replace_stmt(what, kind);
        }

        for (stmt, info) in sorted(for_loops) {
            if let StmtKind::For {
                initializer,
                condition,
                continuing,
                body,
            } = b.arena().stmt(stmt).kind
            {
                rewrite_for(b, stmt, &info, initializer, condition, continuing, body);
            }
        }
        for (stmt, info) in sorted(while_loops) {
            if let StmtKind::While { condition, body } = b.arena().stmt(stmt).kind {
                let mut body_stmts: Vec<StmtId> = info.cond_decls.to_vec();
                body_stmts.push(break_unless(b, condition));
                body_stmts.push(body);
                let loop_body = b.block(body_stmts);
                b.replace_stmt(
                    stmt,
                    StmtKind::Loop {
                        body: loop_body,
                        continuing: None,
                    },
                );
                tracing::debug!(?stmt, "while converted to loop");
            }
        }
        for (stmt, cond_decls) in sorted(else_ifs) {
            let kind = b.arena().stmt(stmt).kind;
            if matches!(kind, StmtKind::If { .. }) {
                let inner_if = b.stmt(kind);
                let mut stmts: Vec<StmtId> = cond_decls.to_vec();
                stmts.push(inner_if);
                let range = b.arena_mut().alloc_stmt_list(stmts);
                b.replace_stmt(stmt, StmtKind::Block(range));
                tracing::debug!(?stmt, "else-if converted to else block");
            }
        }

        let mut blocks: Vec<StmtId> = before
            .keys()
            .filter_map(|&stmt| match index.parent(stmt) {
                Some(Parent::Block(block)) => Some(block),
                _ => None,
            })
            .collect();
        blocks.sort_unstable();
        blocks.dedup();
        for block in blocks {
            let StmtKind::Block(range) = b.arena().stmt(block).kind else {
                continue;
            };
            let old: Vec<StmtId> = b.arena().stmt_list(range).to_vec();
            let mut stmts = Vec::with_capacity(old.len());
            for stmt in old {
                if let Some(inserted) = before.get(&stmt) {
                    stmts.extend_from_slice(inserted);
                }
                stmts.push(stmt);
            }
            b.set_block_statements(block, stmts);
        }

        changed
    }
}

/// `if (!condition) { break; }`
fn break_unless(b: &mut ProgramBuilder, condition: ExprId) -> StmtId {
    let not_cond = b.not(condition);
    let brk = b.break_stmt();
    let brk_block = b.block([brk]);
    b.if_stmt(not_cond, brk_block, None)
}

/// `for (init; cond; cont) body` becomes
/// `{ init_decls; init; loop { cond_decls; if (!cond) { break; } body continuing { cont_decls; cont } } }`.
/// The outer block is left out when there is nothing to put before the loop.
fn rewrite_for(
    b: &mut ProgramBuilder,
    stmt: StmtId,
    info: &LoopInfo,
    initializer: Option<StmtId>,
    condition: Option<ExprId>,
    continuing: Option<StmtId>,
    body: StmtId,
) {
    let mut body_stmts: Vec<StmtId> = info.cond_decls.to_vec();
    if let Some(condition) = condition {
        body_stmts.push(break_unless(b, condition));
    }
    body_stmts.push(body);
    let loop_body = b.block(body_stmts);

    let continuing = continuing.map(|cont| {
        let mut cont_stmts: Vec<StmtId> = info.cont_decls.to_vec();
        cont_stmts.push(cont);
        b.block(cont_stmts)
    });

    if info.init_decls.is_empty() && initializer.is_none() {
        b.replace_stmt(
            stmt,
            StmtKind::Loop {
                body: loop_body,
                continuing,
            },
        );
    } else {
        let looped = b.loop_stmt(loop_body, continuing);
        let mut stmts: Vec<StmtId> = info.init_decls.to_vec();
        stmts.extend(initializer);
        stmts.push(looped);
        let range = b.arena_mut().alloc_stmt_list(stmts);
        b.replace_stmt(stmt, StmtKind::Block(range));
    }
    tracing::debug!(?stmt, "for-loop converted to loop");
}

fn sorted<V>(map: FxHashMap<StmtId, V>) -> Vec<(StmtId, V)> {
    let mut entries: Vec<_> = map.into_iter().collect();
    entries.sort_unstable_by_key(|(stmt, _)| *stmt);
    entries
}

#[cfg(test)]
mod tests;
