//! Stack growth for recursive descent.
//!
//! Both the parser and the evaluator recurse once per nesting level of an
//! expression, so a config like `((((...))))` or a long chain of
//! `a ? b : c ? ...` can exhaust the thread stack. Recursive entry points
//! wrap their body in [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`; on
//! `wasm32` the closure is called directly.

/// Grow when fewer than this many bytes of stack remain.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const GROW_BY: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mimics the evaluator: one frame per nested parenthesis.
    fn nested_depth(src: &[u8]) -> usize {
        ensure_sufficient_stack(|| match src.split_first() {
            Some((b'(', rest)) => 1 + nested_depth(rest),
            _ => 0,
        })
    }

    #[test]
    fn test_passes_result_through() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_deep_nesting() {
        let src = vec![b'('; 200_000];
        assert_eq!(nested_depth(&src), 200_000);
    }
}
