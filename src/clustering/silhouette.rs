use crate::cancel::{CancelToken, Outcome};
use crate::clustering::utils::{check_tuple_count, is_usable, usable_indices};
use crate::core::scalar::ClusterScalar;
use crate::distances::{distance, DistanceMetric};
use crate::error::ClusterError;
use ndarray::{Array2, ArrayView2};

#[derive(Debug, Clone)]
pub struct SilhouetteParams {
    pub metric: DistanceMetric,
}

/// Summary of a completed silhouette run.
#[derive(Debug, Clone, PartialEq)]
pub struct SilhouetteRun {
    /// Mean silhouette over the usable tuples, the single number callers
    /// typically chart when comparing cluster counts.
    pub mean: f64,
}

/// Post-hoc cluster quality scoring over an existing assignment.
///
/// For every usable tuple the pairwise distances to all usable tuples are
/// accumulated into an N x (K + 1) table indexed by the other tuple's cluster
/// id, then normalized by cluster population. The per-tuple score is
/// `(b - a) / max(a, b)` where `a` is the mean distance within the own
/// cluster and `b` the smallest mean distance to any other non-empty
/// cluster. The O(N^2) accumulation dominates, independent of K.
pub struct Silhouette<'a, T: ClusterScalar> {
    params: SilhouetteParams,
    data: ArrayView2<'a, T>,
    mask: Option<&'a [bool]>,
}

impl<'a, T: ClusterScalar> Silhouette<'a, T> {
    pub fn new(params: SilhouetteParams, data: ArrayView2<'a, T>) -> Self {
        Self {
            params,
            data,
            mask: None,
        }
    }

    pub fn with_mask(mut self, mask: &'a [bool]) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn score(
        &self,
        assignments: &[i32],
        scores: &mut [f64],
        cancel: CancelToken,
    ) -> Result<Outcome<SilhouetteRun>, ClusterError> {
        let n = self.data.nrows();

        if let Some(mask) = self.mask {
            check_tuple_count("mask", n, mask.len())?;
        }
        check_tuple_count("cluster assignment", n, assignments.len())?;
        check_tuple_count("silhouette score", n, scores.len())?;

        let usable = usable_indices(n, self.mask);
        let k = usable
            .iter()
            .map(|&i| assignments[i].max(0) as usize)
            .max()
            .unwrap_or(0);

        let mut sizes = vec![0usize; k + 1];
        for &i in &usable {
            sizes[assignments[i].max(0) as usize] += 1;
        }

        // Masked-out tuples get a neutral score.
        for i in 0..n {
            if !is_usable(self.mask, i) {
                scores[i] = 0.0;
            }
        }

        let metric = self.params.metric;

        // Pairwise accumulation into the per-cluster distance sum table.
        let mut sums = Array2::<f64>::zeros((n, k + 1));
        for &i in &usable {
            if cancel.is_cancelled() {
                return Ok(Outcome::Cancelled);
            }
            let row = self.data.row(i);
            for &j in &usable {
                let c = assignments[j].max(0) as usize;
                sums[(i, c)] += distance(metric, &row, &self.data.row(j));
            }
        }

        let mut total = 0.0;
        let mut counted = 0usize;
        for &i in &usable {
            if cancel.is_cancelled() {
                return Ok(Outcome::Cancelled);
            }
            let own = assignments[i].max(0) as usize;
            let a = if sizes[own] > 0 {
                sums[(i, own)] / sizes[own] as f64
            } else {
                0.0
            };

            let mut b = f64::INFINITY;
            for c in 0..=k {
                if c == own || sizes[c] == 0 {
                    continue;
                }
                let mean = sums[(i, c)] / sizes[c] as f64;
                if mean < b {
                    b = mean;
                }
            }

            // A single populated cluster leaves b undefined; score neutrally.
            let s = if b.is_finite() && a.max(b) > 0.0 {
                (b - a) / a.max(b)
            } else {
                0.0
            };
            scores[i] = s;
            total += s;
            counted += 1;
        }

        let mean = if counted > 0 {
            total / counted as f64
        } else {
            0.0
        };

        Ok(Outcome::Completed(SilhouetteRun { mean }))
    }
}
