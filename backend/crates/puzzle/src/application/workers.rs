//! Subpuzzle fan-out
//!
//! Subpuzzle searches are independent, so a challenge is split into
//! contiguous index ranges, one per scoped worker thread. Each worker
//! returns its results in index order and the ranges are concatenated in
//! order, so callers see the same sequence as a sequential search.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::PuzzleResult;

/// Run `solve_one` for every index in `0..count` on `workers` threads and
/// return the results in index order.
///
/// Once any worker fails the others stop at their next index, and the
/// first failing range in index order reports its error.
pub(crate) fn solve_in_order<T, F>(count: usize, workers: usize, solve_one: F) -> PuzzleResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> PuzzleResult<T> + Sync,
{
    if workers <= 1 || count <= 1 {
        return (0..count).map(solve_one).collect();
    }

    let failed = AtomicBool::new(false);
    let ranges = split(count, workers);

    let outcomes: Vec<PuzzleResult<Vec<T>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .map(|range| {
                let failed = &failed;
                let solve_one = &solve_one;
                scope.spawn(move || solve_range(range, failed, solve_one))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(outcome) => outcome,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    let mut results = Vec::with_capacity(count);
    for outcome in outcomes {
        results.extend(outcome?);
    }
    Ok(results)
}

fn solve_range<T, F>(range: Range<usize>, failed: &AtomicBool, solve_one: &F) -> PuzzleResult<Vec<T>>
where
    F: Fn(usize) -> PuzzleResult<T>,
{
    let mut results = Vec::with_capacity(range.len());
    for index in range {
        if failed.load(Ordering::Relaxed) {
            // Abandoned; the failing range reports the error.
            break;
        }
        match solve_one(index) {
            Ok(result) => results.push(result),
            Err(err) => {
                failed.store(true, Ordering::Relaxed);
                return Err(err);
            }
        }
    }
    Ok(results)
}

/// Contiguous ranges covering `0..count`, at most `workers` of them
fn split(count: usize, workers: usize) -> Vec<Range<usize>> {
    let chunk = count.div_ceil(workers);
    (0..count)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(count))
        .collect()
}
