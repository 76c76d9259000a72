//! Topological sort of globals by their dependency edges.
//!
//! Iterative depth-first post-order over an explicit frame stack, so a chain
//! of thousands of dependent globals never grows the call stack.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use shade_ir::Program;

use crate::global::{GlobalId, Globals};

/// A dependency loop: each global references the next, the last references
/// the first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Cycle {
    pub(crate) globals: Vec<GlobalId>,
}

#[derive(Debug, Default)]
pub(crate) struct SortResult {
    /// Every global not involved in a cycle, dependencies first.
    pub(crate) order: Vec<GlobalId>,
    pub(crate) cycles: Vec<Cycle>,
    /// Roots whose traversal left frames behind. Always empty unless the
    /// sorter itself is broken.
    pub(crate) unbalanced: Vec<GlobalId>,
}

#[derive(Copy, Clone, Debug)]
struct Frame {
    global: GlobalId,
    /// Index of the next dependency to try.
    next: usize,
}

pub(crate) struct Sorter<'a> {
    program: &'a Program,
    globals: &'a Globals,
    /// Emitted, or abandoned because it sat on a reported cycle.
    done: Vec<bool>,
    stack: SmallVec<[Frame; 16]>,
    on_stack: FxHashSet<GlobalId>,
    result: SortResult,
}

impl<'a> Sorter<'a> {
    pub(crate) fn new(program: &'a Program, globals: &'a Globals) -> Self {
        Sorter {
            program,
            globals,
            done: vec![false; globals.len()],
            stack: SmallVec::new(),
            on_stack: FxHashSet::default(),
            result: SortResult::default(),
        }
    }

    /// Directives first in declaration order, then every other global after
    /// everything it depends on.
    pub(crate) fn sort(mut self) -> SortResult {
        let (program, globals) = (self.program, self.globals);
        let (directives, others): (Vec<GlobalId>, Vec<GlobalId>) = globals
            .ids()
            .partition(|&id| program.decl(globals.get(id).decl).is_directive());

        for id in directives {
            self.emit(id);
        }
        for root in others {
            self.visit_root(root);
            if !self.stack.is_empty() {
                self.result.unbalanced.push(root);
                self.stack.clear();
                self.on_stack.clear();
            }
        }
        self.result
    }

    fn emit(&mut self, global: GlobalId) {
        self.done[global.index()] = true;
        self.result.order.push(global);
    }

    fn enter(&mut self, global: GlobalId) {
        self.on_stack.insert(global);
        self.stack.push(Frame { global, next: 0 });
    }

    fn visit_root(&mut self, root: GlobalId) {
        if self.done[root.index()] {
            return;
        }
        self.enter(root);

        let globals = self.globals;
        while let Some(&Frame { global, next }) = self.stack.last() {
            if let Some(&dep) = globals.get(global).deps.get(next) {
                if self.on_stack.contains(&dep) {
                    self.cycle_found(dep);
                    return;
                }
                if self.done[dep.index()] {
                    self.advance();
                } else {
                    self.enter(dep);
                }
            } else {
                self.stack.pop();
                self.on_stack.remove(&global);
                self.emit(global);
                self.advance();
            }
        }
    }

    /// Move the innermost frame on to its next dependency.
    fn advance(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            frame.next += 1;
        }
    }

    /// `repeated` was reached again while on the stack. Record the loop and
    /// abandon every global on the stack so the loop is reported only once.
    fn cycle_found(&mut self, repeated: GlobalId) {
        let start = self
            .stack
            .iter()
            .position(|frame| frame.global == repeated)
            .unwrap_or(0);
        let globals = self.stack[start..].iter().map(|frame| frame.global).collect();
        tracing::debug!(?repeated, "dependency cycle");
        self.result.cycles.push(Cycle { globals });

        for frame in self.stack.drain(..) {
            self.done[frame.global.index()] = true;
        }
        self.on_stack.clear();
    }
}
