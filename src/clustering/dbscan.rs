use crate::cancel::{CancelToken, Outcome};
use crate::clustering::utils::{check_tuple_count, is_usable};
use crate::core::scalar::ClusterScalar;
use crate::distances::{distance, DistanceMetric};
use crate::error::ClusterError;
use log::debug;
use ndarray::ArrayView2;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct DbscanParams {
    pub epsilon: f64,
    pub min_points: usize,
    pub metric: DistanceMetric,
}

/// Summary of a completed DBSCAN run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbscanRun {
    /// Highest cluster id written to the assignment buffer. The caller must
    /// resize any per-cluster metadata to `cluster_count + 1` tuples, since
    /// the count is only known once the run finishes.
    pub cluster_count: usize,
}

/// Density-based clustering.
///
/// Phase 1 precomputes every usable tuple's epsilon-neighborhood in parallel;
/// each worker writes only its own `neighbors[i]` slot, so no synchronization
/// is needed beyond the partitioning. Phase 2 expands clusters sequentially
/// over the precomputed lists. A tuple's neighborhood includes the tuple
/// itself (its self-distance is zero).
pub struct Dbscan<'a, T: ClusterScalar> {
    params: DbscanParams,
    data: ArrayView2<'a, T>,
    mask: Option<&'a [bool]>,
}

impl<'a, T: ClusterScalar> Dbscan<'a, T> {
    pub fn new(params: DbscanParams, data: ArrayView2<'a, T>) -> Self {
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
        cancel: CancelToken,
    ) -> Result<Outcome<DbscanRun>, ClusterError> {
        let n = self.data.nrows();

        if self.params.epsilon <= 0.0 || !self.params.epsilon.is_finite() {
            return Err(ClusterError::InvalidParameter(
                "epsilon must be positive and finite".into(),
            ));
        }
        if self.params.min_points == 0 {
            return Err(ClusterError::InvalidParameter(
                "min_points must be at least 1".into(),
            ));
        }
        if let Some(mask) = self.mask {
            check_tuple_count("mask", n, mask.len())?;
        }
        check_tuple_count("cluster assignment", n, assignments.len())?;

        let epsilon = self.params.epsilon;
        let metric = self.params.metric;
        let mask = self.mask;
        let data = &self.data;

        // Phase 1: parallel neighborhood precompute. Each worker owns a
        // disjoint set of `neighbors[i]` slots and only reads the feature
        // buffer, so the partition needs no locks.
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); n];
        neighbors.par_iter_mut().enumerate().for_each(|(i, slot)| {
            if cancel.is_cancelled() || !is_usable(mask, i) {
                return;
            }
            let row = data.row(i);
            for j in 0..n {
                if is_usable(mask, j) && distance(metric, &row, &data.row(j)) < epsilon {
                    slot.push(j);
                }
            }
        });
        if cancel.is_cancelled() {
            return Ok(Outcome::Cancelled);
        }

        // Phase 2: sequential expansion over the precomputed lists.
        let min_points = self.params.min_points;
        let mut visited = vec![false; n];
        let mut clustered = vec![false; n];
        let mut cluster: i32 = 0;
        for i in 0..n {
            if cancel.is_cancelled() {
                return Ok(Outcome::Cancelled);
            }
            if !is_usable(mask, i) || visited[i] {
                continue;
            }
            visited[i] = true;

            if neighbors[i].len() < min_points {
                assignments[i] = 0;
                clustered[i] = true;
                continue;
            }

            cluster += 1;
            assignments[i] = cluster;
            clustered[i] = true;

            // Work-list expansion: reachable neighbors of core points are
            // appended and scanned in order.
            let mut work = neighbors[i].clone();
            let mut cursor = 0;
            while cursor < work.len() {
                let idx = work[cursor];
                cursor += 1;
                if !visited[idx] {
                    visited[idx] = true;
                    if neighbors[idx].len() >= min_points {
                        work.extend_from_slice(&neighbors[idx]);
                    }
                }
                if !clustered[idx] {
                    assignments[idx] = cluster;
                    clustered[idx] = true;
                }
            }
        }

        let cluster_count = assignments.iter().copied().max().unwrap_or(0).max(0) as usize;
        debug!("dbscan found {} clusters", cluster_count);

        Ok(Outcome::Completed(DbscanRun { cluster_count }))
    }
}
