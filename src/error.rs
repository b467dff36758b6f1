use thiserror::Error;

/// Configuration errors, all detected before any output buffer is mutated.
///
/// Cancellation is deliberately not represented here; it is a separate
/// outcome carried by [`crate::cancel::Outcome`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClusterError {
    #[error("{array} has {actual} tuples, expected {expected}")]
    TupleCountMismatch {
        array: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("representative table has shape {actual:?}, expected {expected:?}")]
    RepresentativeShape {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("cannot seed {k} clusters from {usable} usable tuples")]
    DegenerateInitialization { k: usize, usable: usize },
}
