//! Per-run wrappers around module-scope declarations.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use shade_ir::{DeclId, Name, Named, Program, Span};

/// Index of a [`Global`] in [`Globals`]. Only meaningful within one run.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub(crate) struct GlobalId(u32);

impl GlobalId {
    /// Globals wrap distinct declarations and declaration ids are `u32`, so
    /// every position in [`Globals`] fits.
    fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(index) => GlobalId(index),
            Err(_) => unreachable!("global index {index} exceeds the declaration id space"),
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A module-scope declaration and the globals it references, in the order
/// the references were first seen.
#[derive(Clone, Debug)]
pub(crate) struct Global {
    pub(crate) decl: DeclId,
    pub(crate) deps: SmallVec<[GlobalId; 4]>,
}

/// All globals of a module in declaration order, plus the name lookup.
#[derive(Debug, Default)]
pub(crate) struct Globals {
    globals: Vec<Global>,
    by_name: FxHashMap<Name, GlobalId>,
}

impl Globals {
    /// Wrap every global declaration of `program`.
    ///
    /// When several globals share a name, the first one owns the name.
    pub(crate) fn gather(program: &Program) -> Self {
        let decls = &program.module().global_declarations;
        let mut globals = Globals {
            globals: Vec::with_capacity(decls.len()),
            by_name: FxHashMap::default(),
        };
        for &decl in decls {
            let id = GlobalId::from_index(globals.globals.len());
            if let Some(name) = program.decl(decl).name() {
                globals.by_name.entry(name).or_insert(id);
            }
            globals.globals.push(Global {
                decl,
                deps: SmallVec::new(),
            });
        }
        globals
    }

    #[inline]
    pub(crate) fn get(&self, id: GlobalId) -> &Global {
        &self.globals[id.index()]
    }

    /// The global owning `name`, if any.
    pub(crate) fn find(&self, name: Name) -> Option<GlobalId> {
        self.by_name.get(&name).copied()
    }

    /// Name → declaration bindings that seed the outermost scope.
    pub(crate) fn named(&self) -> impl Iterator<Item = (Name, DeclId)> + '_ {
        self.by_name
            .iter()
            .map(|(&name, &id)| (name, self.get(id).decl))
    }

    pub(crate) fn push_dependency(&mut self, from: GlobalId, to: GlobalId) {
        self.globals[from.index()].deps.push(to);
    }

    /// Globals in declaration order.
    pub(crate) fn ids(&self) -> impl Iterator<Item = GlobalId> {
        (0..self.globals.len()).map(GlobalId::from_index)
    }

    pub(crate) fn len(&self) -> usize {
        self.globals.len()
    }
}

/// First reference site of each (from, to) dependency.
#[derive(Debug, Default)]
pub(crate) struct DependencyEdges {
    edges: FxHashMap<(GlobalId, GlobalId), Span>,
}

impl DependencyEdges {
    /// Record an edge. Returns `false` if the pair was already recorded, in
    /// which case the first reference site is kept.
    pub(crate) fn add(&mut self, from: GlobalId, to: GlobalId, site: Span) -> bool {
        match self.edges.entry((from, to)) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(site);
                true
            }
        }
    }

    pub(crate) fn site(&self, from: GlobalId, to: GlobalId) -> Option<Span> {
        self.edges.get(&(from, to)).copied()
    }
}
