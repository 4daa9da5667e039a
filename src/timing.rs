//! Wall-clock measurement around a single call.

use std::time::{Duration, Instant};

/// Runs `f`, returning its result unchanged together with the elapsed
/// wall-clock time. How the duration is reported is up to the caller;
/// nothing is printed or stored here.
pub fn record_runtime<T, F>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_the_result_through() {
        let (result, elapsed) = record_runtime(|| 6 * 7);
        assert_eq!(42, result);
        assert!(elapsed >= Duration::ZERO);
    }
}
