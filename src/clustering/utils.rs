use crate::error::ClusterError;
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns whether tuple `i` participates in the computation.
/// An absent mask means every tuple is usable.
#[inline]
pub fn is_usable(mask: Option<&[bool]>, i: usize) -> bool {
    mask.map_or(true, |m| m[i])
}

/// Collects the indices of all usable tuples, in order.
pub fn usable_indices(n: usize, mask: Option<&[bool]>) -> Vec<usize> {
    (0..n).filter(|&i| is_usable(mask, i)).collect()
}

/// Resolves the caller-supplied seed, falling back to the system clock.
/// The resolved value is reported back in each engine's run summary so a
/// defaulted seed can still be persisted and replayed.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64
    })
}

pub(crate) fn check_tuple_count(
    array: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ClusterError> {
    if actual != expected {
        return Err(ClusterError::TupleCountMismatch {
            array,
            expected,
            actual,
        });
    }
    Ok(())
}
