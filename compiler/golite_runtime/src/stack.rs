//! Stack growth for the recursive passes.
//!
//! Lowering, evaluation, and struct copying all recurse once per nesting
//! level of the program or value being walked. Wrapping each level in
//! [`ensure_sufficient_stack`] lets deeply nested input run on a
//! heap-allocated stack segment instead of overflowing the thread's stack.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` allocates a new segment on demand.
//! - **WASM targets**: passthrough, since the runtime owns the stack.
//!
//! # Configuration
//!
//! - **Red zone**: 64KB. One evaluator frame plus a native call fits well
//!   inside it.
//! - **Growth**: 1MB per new segment.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment.
const GROWTH: usize = 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// within the red zone of its end.
///
/// Recursion still terminates only if the input does: this guards against
/// deep but finite nesting, not cycles.
///
/// # Platform Behavior
///
/// - **Native**: `stacker::maybe_grow`
/// - **WASM**: calls `f()` directly
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
