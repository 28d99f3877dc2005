//! Property-based tests for scoring.

use proptest::prelude::*;
use qcore_grade::band_score;

proptest! {
    #[test]
    fn passed_iff_within_tolerance(d in 0.0_f64..10.0, t in 1e-6_f64..1.0) {
        let result = band_score(d, t);
        prop_assert_eq!(result.passed, d <= t);
        prop_assert!(result.score <= 100);
    }

    #[test]
    fn passing_scores_are_95_or_100(d in 0.0_f64..1.0, t in 1e-6_f64..1.0) {
        let result = band_score(d * t, t);
        prop_assert!(result.passed);
        prop_assert!(result.score == 95 || result.score == 100);
    }

    #[test]
    fn near_misses_score_70_to_89(f in 1.0001_f64..1.9999, t in 1e-4_f64..0.4) {
        let result = band_score(f * t, t);
        prop_assert!(!result.passed);
        prop_assert!((70..90).contains(&result.score), "score {}", result.score);
    }

    #[test]
    fn far_misses_score_below_50(f in 2.0_f64..100.0, t in 1e-6_f64..1.0) {
        let result = band_score(f * t, t);
        prop_assert!(!result.passed);
        prop_assert!(result.score < 50);
    }
}
