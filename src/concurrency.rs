//! Concurrency helper: limit the number of videos analyzed at once.

use rayon::prelude::*;
use std::thread::sleep;
use std::time::Duration;

/// Map `items` through `f` with at most `limit` calls in flight, pausing `pause`
/// after each chunk. Output order matches input order.
pub fn map_limited<T, R, F>(items: &[T], limit: usize, pause: Duration, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Sync + Fn(&T) -> R,
{
    let mut out = Vec::with_capacity(items.len());
    for chunk in items.chunks(limit.max(1)) {
        if chunk.len() == 1 {
            out.push(f(&chunk[0]));
        } else {
            out.extend(chunk.par_iter().map(&f).collect::<Vec<_>>());
        }
        if !pause.is_zero() {
            sleep(pause);
        }
    }
    out
}
