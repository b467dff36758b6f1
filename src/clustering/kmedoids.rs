use crate::cancel::{CancelToken, Outcome};
use crate::clustering::utils::{check_tuple_count, resolve_seed, usable_indices};
use crate::core::scalar::ClusterScalar;
use crate::distances::{distance, DistanceMetric};
use crate::error::ClusterError;
use log::debug;
use ndarray::{ArrayView2, ArrayViewMut2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct KMedoidsParams {
    pub k: usize,
    pub metric: DistanceMetric,
    pub seed: Option<u64>,
}

/// Summary of a completed k-medoids run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KMedoidsRun {
    /// The seed actually used, whether caller-supplied or clock-derived.
    pub seed_used: u64,
    pub iterations: usize,
    /// Tuple index of each cluster's medoid; entry `c - 1` belongs to cluster `c`.
    pub medoids: Vec<usize>,
}

/// K-medoids refinement: like k-means, but every representative must be an
/// actual tuple of the input buffer. The optimize step scans each cluster's
/// members exhaustively, so a full pass costs O(N^2) when one cluster holds
/// most of the data.
pub struct KMedoids<'a, T: ClusterScalar> {
    params: KMedoidsParams,
    data: ArrayView2<'a, T>,
    mask: Option<&'a [bool]>,
}

impl<'a, T: ClusterScalar> KMedoids<'a, T> {
    pub fn new(params: KMedoidsParams, data: ArrayView2<'a, T>) -> Self {
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

    pub fn fit(
        &self,
        assignments: &mut [i32],
        representatives: &mut ArrayViewMut2<'_, T>,
        cancel: CancelToken,
    ) -> Result<Outcome<KMedoidsRun>, ClusterError> {
        let n = self.data.nrows();
        let d = self.data.ncols();
        let k = self.params.k;

        if k == 0 {
            return Err(ClusterError::InvalidParameter("k must be at least 1".into()));
        }
        if let Some(mask) = self.mask {
            check_tuple_count("mask", n, mask.len())?;
        }
        check_tuple_count("cluster assignment", n, assignments.len())?;
        if representatives.dim() != (k + 1, d) {
            return Err(ClusterError::RepresentativeShape {
                expected: (k + 1, d),
                actual: representatives.dim(),
            });
        }

        let usable = usable_indices(n, self.mask);
        if usable.is_empty() || k > usable.len() {
            return Err(ClusterError::DegenerateInitialization {
                k,
                usable: usable.len(),
            });
        }

        let seed_used = resolve_seed(self.params.seed);
        let mut rng = SmallRng::seed_from_u64(seed_used);
        let mut medoids: Vec<usize> = (0..k)
            .map(|_| usable[rng.random_range(0..usable.len())])
            .collect();

        let metric = self.params.metric;
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); k + 1];
        let mut iterations = 0;
        loop {
            iterations += 1;

            // Assign each usable tuple to its nearest medoid.
            for member in &mut members {
                member.clear();
            }
            for &i in &usable {
                if cancel.is_cancelled() {
                    return Ok(Outcome::Cancelled);
                }
                let row = self.data.row(i);
                let mut best = (1usize, f64::INFINITY);
                for (c, &medoid) in medoids.iter().enumerate() {
                    let dist = distance(metric, &row, &self.data.row(medoid));
                    if dist < best.1 {
                        best = (c + 1, dist);
                    }
                }
                assignments[i] = best.0 as i32;
                members[best.0].push(i);
            }

            // Optimize: within each cluster, pick the member minimizing the
            // sum of distances to every other member.
            let mut changed = false;
            for c in 1..=k {
                if cancel.is_cancelled() {
                    return Ok(Outcome::Cancelled);
                }
                let cluster = &members[c];
                if cluster.is_empty() {
                    continue;
                }
                let mut best = (medoids[c - 1], f64::INFINITY);
                for &candidate in cluster {
                    let row = self.data.row(candidate);
                    let cost: f64 = cluster
                        .iter()
                        .map(|&other| distance(metric, &row, &self.data.row(other)))
                        .sum();
                    if cost < best.1 {
                        best = (candidate, cost);
                    }
                }
                if best.0 != medoids[c - 1] {
                    medoids[c - 1] = best.0;
                    changed = true;
                }
            }

            for c in 1..=k {
                for (dst, &v) in representatives
                    .row_mut(c)
                    .iter_mut()
                    .zip(self.data.row(medoids[c - 1]).iter())
                {
                    *dst = v;
                }
            }

            if !changed {
                debug!("k-medoids converged after {} iterations", iterations);
                break;
            }
        }

        Ok(Outcome::Completed(KMedoidsRun {
            seed_used,
            iterations,
            medoids,
        }))
    }
}
