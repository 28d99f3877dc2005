//! The three operations exposed to a calling layer: simulate, grade and
//! exercise lookup.

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

use qcore_ir::GateOperation;
use qcore_sim::{SimulationResult, Simulator};

use crate::error::GradeResult;
use crate::exercise::{Exercise, TargetData};
use crate::grader::grade;
use crate::repository::ExerciseRepository;

/// Outcome of grading a submission.
#[derive(Debug, Clone, Serialize)]
pub struct GradeReport {
    /// Exercise that was graded.
    pub exercise_id: String,
    /// Whether the submission is within tolerance.
    pub passed: bool,
    /// Score in `[0, 100]`.
    pub score: u8,
    /// Simulation of the submitted circuit.
    pub simulation_result: SimulationResult,
    /// The exercise's target, echoed back.
    pub target_data: TargetData,
}

/// Simulation of a submission alongside the target, without grading.
#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    /// Exercise the submission was simulated for.
    pub exercise_id: String,
    /// Simulation of the submitted circuit.
    pub simulation_result: SimulationResult,
    /// The exercise's target, echoed back.
    pub target_data: TargetData,
}

/// Simulator plus exercise catalog.
///
/// Cloning is cheap; the catalog is shared.
#[derive(Debug, Clone)]
pub struct QuantumCore {
    simulator: Simulator,
    exercises: Arc<ExerciseRepository>,
}

impl QuantumCore {
    /// Create a core from a simulator and a loaded catalog.
    pub fn new(simulator: Simulator, exercises: Arc<ExerciseRepository>) -> Self {
        Self {
            simulator,
            exercises,
        }
    }

    /// The simulator.
    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }

    /// The exercise catalog.
    pub fn exercises(&self) -> &ExerciseRepository {
        &self.exercises
    }

    /// Simulate `operations` on `qubit_count` qubits.
    pub fn simulate(
        &self,
        qubit_count: u32,
        operations: &[GateOperation],
        shots: Option<u64>,
    ) -> GradeResult<SimulationResult> {
        Ok(self.simulator.simulate(qubit_count, operations, shots)?)
    }

    /// Simulate a submission on the exercise's qubit count and grade it.
    #[instrument(skip(self, operations), fields(ops = operations.len()))]
    pub fn grade(&self, exercise_id: &str, operations: &[GateOperation]) -> GradeResult<GradeReport> {
        let exercise = self.exercises.require(exercise_id)?;
        let simulation_result = self
            .simulator
            .simulate(exercise.num_qubits(), operations, None)?;
        let verdict = grade(exercise, &simulation_result)?;

        info!(
            "Graded '{}': passed={}, score={}",
            exercise_id, verdict.passed, verdict.score
        );

        Ok(GradeReport {
            exercise_id: exercise_id.to_string(),
            passed: verdict.passed,
            score: verdict.score,
            simulation_result,
            target_data: exercise.target_data().clone(),
        })
    }

    /// Simulate a submission for an exercise without grading it.
    pub fn preview(&self, exercise_id: &str, operations: &[GateOperation]) -> GradeResult<Preview> {
        let exercise = self.exercises.require(exercise_id)?;
        let simulation_result = self
            .simulator
            .simulate(exercise.num_qubits(), operations, None)?;
        Ok(Preview {
            exercise_id: exercise_id.to_string(),
            simulation_result,
            target_data: exercise.target_data().clone(),
        })
    }

    /// Look up an exercise; `None` for unknown ids.
    pub fn get_exercise(&self, exercise_id: &str) -> Option<&Exercise> {
        self.exercises.get(exercise_id)
    }

    /// All exercises, in catalog order.
    pub fn list_exercises(&self) -> &[Exercise] {
        self.exercises.list()
    }
}
