//! Tolerance-banded grading.
//!
//! A submission's distance from the target is turned into a verdict and a
//! 0–100 score:
//!
//! | Distance `d` | Passed | Score |
//! |--------------|--------|-------|
//! | `d ≤ 0.1·t` | yes | 100 |
//! | `d ≤ t` | yes | `max(95, 100·(1 − d/t))` |
//! | `t < d < 2t` | no | `max(70, 90·(1 − (d − t)/t))` |
//! | `d ≥ 2t` | no | `max(0, 50·(1 − min(d, 1)))` |
//!
//! Scores are truncated to integers. `passed` depends only on `d ≤ t`.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use qcore_sim::{Probabilities, SimulationResult};

use crate::error::{GradeError, GradeResult};
use crate::exercise::{Exercise, TargetType};

/// Verdict for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradingResult {
    /// Whether the distance was within tolerance.
    pub passed: bool,
    /// Score in `[0, 100]`.
    pub score: u8,
}

impl GradingResult {
    /// A failed submission with score 0.
    pub const FAIL: GradingResult = GradingResult {
        passed: false,
        score: 0,
    };
}

/// Map a total difference onto the scoring bands.
pub fn band_score(total_difference: f64, tolerance: f64) -> GradingResult {
    let (d, t) = (total_difference, tolerance);
    if !(d.is_finite() && d >= 0.0 && t.is_finite() && t > 0.0) {
        return GradingResult::FAIL;
    }

    let (passed, score) = if d <= t {
        if d <= 0.1 * t {
            (true, 100)
        } else {
            (true, ((100.0 * (1.0 - d / t)) as i64).max(95))
        }
    } else if d < 2.0 * t {
        (false, ((90.0 * (1.0 - (d - t) / t)) as i64).max(70))
    } else {
        (false, ((50.0 * (1.0 - d.min(1.0))) as i64).max(0))
    };

    GradingResult {
        passed,
        score: score.clamp(0, 100) as u8,
    }
}

/// `Σ |target_i − actual_i|`, or `None` if the lengths differ.
pub fn state_vector_distance(target: &[Complex64], actual: &[Complex64]) -> Option<f64> {
    (target.len() == actual.len()).then(|| {
        target
            .iter()
            .zip(actual)
            .map(|(t, a)| (t - a).norm())
            .sum()
    })
}

/// `Σ |p(s) − q(s)|` over the union of states, absent states counting as 0.
pub fn probability_distance(target: &Probabilities, actual: &Probabilities) -> f64 {
    target.l1_distance(actual)
}

/// Grade a simulated submission against `exercise`.
///
/// Distribution targets are compared with the exact probabilities, never the
/// sampled counts.
pub fn grade(exercise: &Exercise, outcome: &SimulationResult) -> GradeResult<GradingResult> {
    let missing = |field| GradeError::MissingTargetData {
        exercise_id: exercise.id().to_string(),
        field,
    };

    let total_difference = match exercise.target_type() {
        TargetType::StateVector => {
            let target = exercise
                .target_amplitudes()
                .ok_or_else(|| missing("state_vector"))?;
            match state_vector_distance(&target, &outcome.state_vector) {
                Some(d) => d,
                None => {
                    debug!(
                        "Exercise '{}': target has {} amplitudes, submission {}",
                        exercise.id(),
                        target.len(),
                        outcome.state_vector.len()
                    );
                    return Ok(GradingResult::FAIL);
                }
            }
        }
        TargetType::Probabilities | TargetType::Measurement => {
            let target = exercise
                .target_probabilities()
                .ok_or_else(|| missing("measurement_probabilities"))?;
            probability_distance(&target, &outcome.probabilities)
        }
        TargetType::Unsupported(name) => {
            return Err(GradeError::UnsupportedTargetType {
                exercise_id: exercise.id().to_string(),
                target_type: name.clone(),
            });
        }
    };

    let result = band_score(total_difference, exercise.tolerance());
    debug!(
        "Exercise '{}': difference {:.6} (tolerance {}) -> passed={}, score={}",
        exercise.id(),
        total_difference,
        exercise.tolerance(),
        result.passed,
        result.score
    );
    Ok(result)
}
