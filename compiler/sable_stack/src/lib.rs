//! Stack safety for deep recursion.
//!
//! The parser and evaluator recurse on expression nesting, so pathological
//! input (`((((...1...))))`, deeply chained calls) can exhaust the OS
//! thread stack. Wrapping each recursive step in [`ensure_sufficient_stack`]
//! grows the stack on demand instead of crashing.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` grows the stack when it runs low.
//! - **WASM targets**: passthrough, WASM manages its own stack.

/// Remaining stack below this threshold triggers a growth (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Stack space allocated per growth (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// Call this at every recursion point whose depth is controlled by user
/// input. The cost when no growth is needed is a single stack-pointer
/// check.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_result() {
        assert_eq!(ensure_sufficient_stack(|| 7), 7);
        let ok: Result<i32, &str> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(ok, Ok(7));
    }

    #[test]
    fn survives_deep_recursion() {
        fn count_down(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { count_down(n - 1) + 1 })
        }

        // Deep enough to overflow a default 8MB thread stack without growth.
        assert_eq!(count_down(100_000), 100_000);
    }
}
