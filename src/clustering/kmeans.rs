use crate::cancel::{CancelToken, Outcome};
use crate::clustering::utils::{check_tuple_count, resolve_seed, usable_indices};
use crate::core::scalar::ClusterScalar;
use crate::distances::{distance, DistanceMetric};
use crate::error::ClusterError;
use log::debug;
use ndarray::{Array2, ArrayView2, ArrayViewMut2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct KMeansParams {
    pub k: usize,
    pub metric: DistanceMetric,
    pub seed: Option<u64>,
}

/// Summary of a completed k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansRun {
    /// The seed actually used, whether caller-supplied or clock-derived.
    pub seed_used: u64,
    pub iterations: usize,
    /// Sum of squared Euclidean distances from each usable tuple to its
    /// assigned centroid, recorded after every assign pass. Non-increasing
    /// across passes for the Euclidean metrics.
    pub ssd_history: Vec<f64>,
}

/// Lloyd's algorithm over an N x D feature buffer.
///
/// Cluster ids are 1-based; id 0 is reserved for masked-out tuples. Centroid
/// arithmetic happens in f64 and is written back into the caller's
/// `(k + 1) x D` representative table (row 0 unused) after every update, so a
/// cancelled run leaves the table in its last partially-updated state.
pub struct KMeans<'a, T: ClusterScalar> {
    params: KMeansParams,
    data: ArrayView2<'a, T>,
    mask: Option<&'a [bool]>,
}

impl<'a, T: ClusterScalar> KMeans<'a, T> {
    pub fn new(params: KMeansParams, data: ArrayView2<'a, T>) -> Self {
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
    ) -> Result<Outcome<KMeansRun>, ClusterError> {
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

        // Seed each centroid from a randomly drawn usable tuple. Repeats are
        // allowed; a duplicated seed just leaves one cluster empty until the
        // first update zeroes it out.
        let mut centroids = Array2::<f64>::zeros((k + 1, d));
        for c in 1..=k {
            let idx = usable[rng.random_range(0..usable.len())];
            for (dst, &v) in centroids.row_mut(c).iter_mut().zip(self.data.row(idx).iter()) {
                *dst = v.as_f64();
            }
        }

        let metric = self.params.metric;
        let mut iterations = 0;
        let mut ssd_history = Vec::new();
        loop {
            iterations += 1;

            // Assign each usable tuple to its nearest centroid.
            let mut ssd = 0.0;
            for &i in &usable {
                if cancel.is_cancelled() {
                    return Ok(Outcome::Cancelled);
                }
                let row = self.data.row(i);
                let mut best = (1usize, f64::INFINITY);
                for c in 1..=k {
                    let dist = distance(metric, &row, &centroids.row(c));
                    if dist < best.1 {
                        best = (c, dist);
                    }
                }
                assignments[i] = best.0 as i32;
                ssd += distance(
                    DistanceMetric::SquaredEuclidean,
                    &row,
                    &centroids.row(best.0),
                );
            }
            ssd_history.push(ssd);

            // Recompute each centroid as the per-component mean of its members.
            let mut sums = Array2::<f64>::zeros((k + 1, d));
            let mut counts = vec![0usize; k + 1];
            for &i in &usable {
                if cancel.is_cancelled() {
                    return Ok(Outcome::Cancelled);
                }
                let c = assignments[i] as usize;
                for (dst, &v) in sums.row_mut(c).iter_mut().zip(self.data.row(i).iter()) {
                    *dst += v.as_f64();
                }
                counts[c] += 1;
            }

            let mut converged = true;
            for c in 1..=k {
                if cancel.is_cancelled() {
                    return Ok(Outcome::Cancelled);
                }
                let old = centroids[(c, 0)];
                if counts[c] == 0 {
                    centroids.row_mut(c).fill(0.0);
                } else {
                    let inv = 1.0 / counts[c] as f64;
                    for (dst, &sum) in centroids.row_mut(c).iter_mut().zip(sums.row(c).iter()) {
                        *dst = sum * inv;
                    }
                }
                if (old - centroids[(c, 0)]).abs() >= f64::EPSILON {
                    converged = false;
                }
            }

            for c in 1..=k {
                for (dst, &v) in representatives
                    .row_mut(c)
                    .iter_mut()
                    .zip(centroids.row(c).iter())
                {
                    *dst = T::from_mean(v);
                }
            }

            if converged {
                debug!("k-means converged after {} iterations", iterations);
                break;
            }
        }

        Ok(Outcome::Completed(KMeansRun {
            seed_used,
            iterations,
            ssd_history,
        }))
    }
}
