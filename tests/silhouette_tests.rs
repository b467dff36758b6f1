#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use nxcluster::cancel::CancelToken;
    use nxcluster::clustering::{Silhouette, SilhouetteParams};
    use nxcluster::distances::DistanceMetric;

    fn line_data() -> Array2<f64> {
        Array2::from_shape_vec((6, 1), vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0]).unwrap()
    }

    fn params() -> SilhouetteParams {
        SilhouetteParams {
            metric: DistanceMetric::Euclidean,
        }
    }

    #[test]
    fn test_well_separated_partition_scores_high() {
        let data = line_data();
        let assignments = vec![1i32, 1, 1, 2, 2, 2];
        let mut scores = vec![0.0; 6];

        let run = Silhouette::new(params(), data.view())
            .score(&assignments, &mut scores, CancelToken::new())
            .unwrap()
            .completed()
            .expect("run should complete");

        for (i, &s) in scores.iter().enumerate() {
            assert!(s > 0.8, "tuple {} scored {}, expected > 0.8", i, s);
            assert!((-1.0..=1.0).contains(&s));
        }
        assert!(run.mean > 0.8);
    }

    #[test]
    fn test_scores_stay_in_unit_interval() {
        // A deliberately bad partition that splits each dense group.
        let data = line_data();
        let assignments = vec![1i32, 2, 1, 2, 1, 2];
        let mut scores = vec![0.0; 6];

        Silhouette::new(params(), data.view())
            .score(&assignments, &mut scores, CancelToken::new())
            .unwrap()
            .completed()
            .expect("run should complete");

        for &s in &scores {
            assert!((-1.0..=1.0).contains(&s), "score {} out of range", s);
        }
    }

    #[test]
    fn test_masked_tuples_score_zero() {
        let data = line_data();
        let mask = [true, true, false, true, true, true];
        let assignments = vec![1i32, 1, 0, 2, 2, 2];
        let mut scores = vec![9.0; 6];

        Silhouette::new(params(), data.view())
            .with_mask(&mask)
            .score(&assignments, &mut scores, CancelToken::new())
            .unwrap()
            .completed()
            .expect("run should complete");

        assert_eq!(scores[2], 0.0, "masked tuple must score 0");
        for &i in &[0usize, 1, 3, 4, 5] {
            assert!(scores[i] > 0.8);
        }
    }

    #[test]
    fn test_exact_value_for_first_tuple() {
        let data = line_data();
        let assignments = vec![1i32, 1, 1, 2, 2, 2];
        let mut scores = vec![0.0; 6];

        Silhouette::new(params(), data.view())
            .score(&assignments, &mut scores, CancelToken::new())
            .unwrap();

        // a(0) = (0 + 1 + 2) / 3 = 1, b(0) = (10 + 11 + 12) / 3 = 11,
        // s(0) = (11 - 1) / 11.
        assert!((scores[0] - 10.0 / 11.0).abs() < 1e-9, "got {}", scores[0]);
    }

    #[test]
    fn test_pre_cancelled_token_returns_cancelled() {
        let data = line_data();
        let assignments = vec![1i32, 1, 1, 2, 2, 2];
        let mut scores = vec![0.0; 6];
        let token = CancelToken::new();
        token.cancel();

        let outcome = Silhouette::new(params(), data.view())
            .score(&assignments, &mut scores, token)
            .unwrap();

        assert!(outcome.is_cancelled());
    }
}
