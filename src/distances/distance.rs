use crate::core::scalar::ClusterScalar;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// The distance metrics understood by every engine.
///
/// All variants are pure, stateless computations, so a plain enum plus the
/// free [`distance`] function replaces any pluggable-functor machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    Euclidean,
    SquaredEuclidean,
    Manhattan,
    Cosine,
    Pearson,
    SquaredPearson,
}

/// Computes the distance between two equal-length vectors under `metric`.
///
/// Both operands are widened to `f64` before accumulation, so the two views
/// may carry different scalar types (e.g. an integer tuple against an f64
/// centroid). The views must have equal length; this is debug-asserted.
pub fn distance<A, B>(metric: DistanceMetric, a: &ArrayView1<'_, A>, b: &ArrayView1<'_, B>) -> f64
where
    A: ClusterScalar,
    B: ClusterScalar,
{
    debug_assert_eq!(a.len(), b.len(), "distance operands must have equal length");
    match metric {
        DistanceMetric::Euclidean => squared_euclidean(a, b).sqrt(),
        DistanceMetric::SquaredEuclidean => squared_euclidean(a, b),
        DistanceMetric::Manhattan => a
            .iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x.as_f64() - y.as_f64()).abs())
            .sum(),
        DistanceMetric::Cosine => {
            let mut dot = 0.0;
            let mut norm_a = 0.0;
            let mut norm_b = 0.0;
            for (&x, &y) in a.iter().zip(b.iter()) {
                let (x, y) = (x.as_f64(), y.as_f64());
                dot += x * y;
                norm_a += x * x;
                norm_b += y * y;
            }
            1.0 - dot / ((norm_a * norm_b).sqrt() + f64::MIN_POSITIVE)
        }
        DistanceMetric::Pearson => {
            let (numerator, denominator) = pearson_terms(a, b);
            1.0 - numerator / (denominator.sqrt() + f64::MIN_POSITIVE)
        }
        DistanceMetric::SquaredPearson => {
            let (numerator, denominator) = pearson_terms(a, b);
            1.0 - numerator * numerator / (denominator + f64::MIN_POSITIVE)
        }
    }
}

fn squared_euclidean<A, B>(a: &ArrayView1<'_, A>, b: &ArrayView1<'_, B>) -> f64
where
    A: ClusterScalar,
    B: ClusterScalar,
{
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let delta = x.as_f64() - y.as_f64();
            delta * delta
        })
        .sum()
}

/// Shared terms of the Pearson correlation: the centered cross sum and the
/// product of the centered square sums (not yet square-rooted).
fn pearson_terms<A, B>(a: &ArrayView1<'_, A>, b: &ArrayView1<'_, B>) -> (f64, f64)
where
    A: ClusterScalar,
    B: ClusterScalar,
{
    let d = a.len() as f64;
    let mean_a = a.iter().map(|&x| x.as_f64()).sum::<f64>() / d;
    let mean_b = b.iter().map(|&y| y.as_f64()).sum::<f64>() / d;

    let mut cross = 0.0;
    let mut square_a = 0.0;
    let mut square_b = 0.0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x.as_f64() - mean_a;
        let dy = y.as_f64() - mean_b;
        cross += dx * dy;
        square_a += dx * dx;
        square_b += dy * dy;
    }
    (cross, square_a * square_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_euclidean_distance() {
        let point1 = array![1.0, 2.0, 3.0];
        let point2 = array![4.0, 5.0, 6.0];

        let result = distance(DistanceMetric::Euclidean, &point1.view(), &point2.view());
        let expected = 27.0f64.sqrt();

        assert!((result - expected).abs() < 1e-9, "Expected {}, got {}", expected, result);
    }

    #[test]
    fn test_squared_euclidean_distance() {
        let point1 = array![1.0, 2.0, 3.0];
        let point2 = array![4.0, 5.0, 6.0];

        let result = distance(DistanceMetric::SquaredEuclidean, &point1.view(), &point2.view());
        let expected = 27.0; // (4-1)^2 + (5-2)^2 + (6-3)^2

        assert!((result - expected).abs() < 1e-9, "Expected {}, got {}", expected, result);
    }

    #[test]
    fn test_manhattan_distance() {
        let point1 = array![1.0, 2.0, 3.0];
        let point2 = array![4.0, 1.0, 6.0];

        let result = distance(DistanceMetric::Manhattan, &point1.view(), &point2.view());
        let expected = 7.0; // |4-1| + |1-2| + |6-3|

        assert!((result - expected).abs() < 1e-9, "Expected {}, got {}", expected, result);
    }

    #[test]
    fn test_cosine_distance_parallel_vectors() {
        let point1 = array![1.0, 2.0, 3.0];
        let point2 = array![2.0, 4.0, 6.0];

        let result = distance(DistanceMetric::Cosine, &point1.view(), &point2.view());

        assert!(result.abs() < 1e-9, "Parallel vectors should be at distance 0, got {}", result);
    }

    #[test]
    fn test_cosine_distance_small_norm_parallel_vectors() {
        // The denominator guard must not swamp a tiny but nonzero norm
        // product, so parallel vectors stay at distance 0 at any scale.
        let point1 = array![1e-9, 2e-9];
        let point2 = array![2e-9, 4e-9];

        let result = distance(DistanceMetric::Cosine, &point1.view(), &point2.view());

        assert!(result.abs() < 1e-6, "Parallel vectors should be at distance 0, got {}", result);
    }

    #[test]
    fn test_pearson_distance_small_magnitude_vectors() {
        let point1 = array![1e-9, 2e-9, 3e-9, 4e-9];
        let point2 = array![4e-9, 3e-9, 2e-9, 1e-9];

        let result = distance(DistanceMetric::Pearson, &point1.view(), &point2.view());

        assert!((result - 2.0).abs() < 1e-6, "Anticorrelated vectors should be at distance 2, got {}", result);
    }

    #[test]
    fn test_cosine_distance_orthogonal_vectors() {
        let point1 = array![1.0, 0.0];
        let point2 = array![0.0, 1.0];

        let result = distance(DistanceMetric::Cosine, &point1.view(), &point2.view());

        assert!((result - 1.0).abs() < 1e-9, "Orthogonal vectors should be at distance 1, got {}", result);
    }

    #[test]
    fn test_pearson_distance_correlated_vectors() {
        let point1 = array![1.0, 2.0, 3.0, 4.0];
        let point2 = array![10.0, 20.0, 30.0, 40.0];

        let result = distance(DistanceMetric::Pearson, &point1.view(), &point2.view());

        assert!(result.abs() < 1e-9, "Perfectly correlated vectors should be at distance 0, got {}", result);
    }

    #[test]
    fn test_pearson_distance_anticorrelated_vectors() {
        let point1 = array![1.0, 2.0, 3.0, 4.0];
        let point2 = array![4.0, 3.0, 2.0, 1.0];

        let result = distance(DistanceMetric::Pearson, &point1.view(), &point2.view());

        assert!((result - 2.0).abs() < 1e-9, "Anticorrelated vectors should be at distance 2, got {}", result);
    }

    #[test]
    fn test_squared_pearson_folds_anticorrelation() {
        let point1 = array![1.0, 2.0, 3.0, 4.0];
        let point2 = array![4.0, 3.0, 2.0, 1.0];

        let result = distance(DistanceMetric::SquaredPearson, &point1.view(), &point2.view());

        // r = -1, so 1 - r^2 = 0.
        assert!(result.abs() < 1e-9, "Expected 0, got {}", result);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_mismatched_lengths_are_rejected() {
        let point1 = array![1.0, 2.0];
        let point2 = array![1.0, 2.0, 3.0];
        distance(DistanceMetric::Euclidean, &point1.view(), &point2.view());
    }

    #[test]
    fn test_integer_scalars_widen_to_f64() {
        let point1 = array![1u8, 2u8, 3u8];
        let point2 = array![4.0f64, 5.0, 6.0];

        let result = distance(DistanceMetric::SquaredEuclidean, &point1.view(), &point2.view());

        assert!((result - 27.0).abs() < 1e-9, "Expected 27, got {}", result);
    }
}
