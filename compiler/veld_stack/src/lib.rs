//! Stack safety utilities for deep recursion.
//!
//! The type graph is arbitrarily deep: substitution, identity comparison,
//! and comparability analysis all recurse structurally, and user code can
//! nest types far beyond what a default thread stack handles. Wrap those
//! recursive calls with [`ensure_sufficient_stack`] to grow the stack on
//! demand instead of overflowing.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).

/// Minimum stack space to keep available (100KB red zone).
///
/// If less than this amount remains, we'll grow the stack.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, this allocates
/// additional stack space before calling `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_recursion() {
        fn depth_sum(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { n + depth_sum(n - 1) })
        }

        assert_eq!(depth_sum(10), 55);
    }

    #[test]
    fn deep_recursion_does_not_overflow() {
        fn deep_recurse(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { deep_recurse(n - 1) + 1 })
        }

        // 100k recursions - would overflow a typical 8MB stack
        assert_eq!(deep_recurse(100_000), 100_000);
    }

    #[test]
    fn returns_closure_result() {
        let result: Result<i32, &str> = ensure_sufficient_stack(|| Ok(123));
        assert_eq!(result, Ok(123));
    }
}
