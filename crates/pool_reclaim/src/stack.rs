//! Stack growth for deeply nested graphs.
//!
//! Container recursion is bounded by [`ReclaimConfig::max_depth`], not by
//! the caller's thread stack. Each recursive step runs through
//! [`ensure_sufficient_stack`], which grows the stack on native targets
//! when less than the red zone remains.
//!
//! [`ReclaimConfig::max_depth`]: crate::ReclaimConfig::max_depth

/// Grow the stack once less than this much remains (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each additional stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
