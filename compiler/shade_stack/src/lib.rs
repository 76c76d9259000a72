//! Stack safety for recursive tree traversals.
//!
//! Shader expressions are usually shallow, but generated code can nest logical
//! operators or blocks thousands of levels deep. Recursive passes wrap their
//! per-node step in [`ensure_sufficient_stack`] so the stack grows on demand
//! instead of overflowing.
//!
//! - **Native targets**: grows the stack through `stacker`.
//! - **WASM targets**: plain call.

/// Grow the stack when less than this remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each stack segment allocated on growth (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
///
/// ```text
/// fn decompose(&mut self, expr: ExprId) -> ExprId {
///     ensure_sufficient_stack(|| self.decompose_inner(expr))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
