//! Stack growth for deeply nested scripts.
//!
//! Statements, expressions and types all recurse. A script nesting a few
//! thousand parentheses would otherwise overflow the thread's stack, so the
//! recursive entry points run inside [`ensure_sufficient_stack`].
//!
//! On native targets `stacker` grows the stack on demand. On `wasm32` the
//! closure is called directly.

/// Grow the stack when less than this remains.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
