//! Lexical scope stack.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Stack of key→value maps, one per open lexical scope.
///
/// Lookups resolve through enclosing scopes, innermost first. The outermost
/// scope is never popped.
#[derive(Clone, Debug)]
pub struct ScopeStack<K, V> {
    scopes: Vec<FxHashMap<K, V>>,
}

impl<K: Eq + Hash, V: Copy> ScopeStack<K, V> {
    /// A stack with just the outermost scope.
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![FxHashMap::default()],
        }
    }

    /// Open a nested scope.
    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Close the innermost scope.
    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind `key` in the innermost scope.
    ///
    /// Returns the value previously bound to `key` in that same scope; bindings
    /// in enclosing scopes are shadowed, not replaced.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.scopes
            .last_mut()
            .and_then(|scope| scope.insert(key, value))
    }

    /// Resolve `key`, innermost scope first.
    pub fn get(&self, key: &K) -> Option<V> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(key).copied())
    }

    /// Number of open scopes, including the outermost.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Drop every binding and nested scope.
    pub fn clear(&mut self) {
        self.scopes.truncate(1);
        if let Some(outer) = self.scopes.first_mut() {
            outer.clear();
        }
    }
}

impl<K: Eq + Hash, V: Copy> Default for ScopeStack<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
