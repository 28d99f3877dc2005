//! qcore Exercise Grading
//!
//! Loads a read-only catalog of exercises and grades submitted circuits
//! against them.
//!
//! # Overview
//!
//! An [`Exercise`] names a qubit count, a target type and the target data:
//!
//! - **`state_vector`**: summed amplitude differences
//! - **`probabilities`**: L1 distance between distributions
//! - **`measurement`**: as `probabilities`; counts are normalized first
//!
//! The distance is mapped to a [`GradingResult`] by [`band_score`]. Grading
//! always uses exact probabilities from the simulator, never sampled counts.
//!
//! # Architecture
//!
//! ```text
//! [catalog JSON] -> ExerciseRepository (Arc, read-only)
//!                          |
//! [GateOperation] -> Simulator -> SimulationResult
//!                          |            |
//!                          v            v
//!                          grade(exercise, outcome)
//!                                  |
//!                                  v
//!                             GradeReport
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use qcore_grade::{ExerciseRepository, QuantumCore};
//! use qcore_ir::GateOperation;
//! use qcore_sim::Simulator;
//!
//! let repo = ExerciseRepository::from_json_str(r#"{"exercises": [{
//!     "id": "flip",
//!     "num_qubits": 1,
//!     "target_type": "state_vector",
//!     "target_data": {"state_vector": [0, 1]}
//! }]}"#)
//! .unwrap();
//!
//! let core = QuantumCore::new(Simulator::new(), Arc::new(repo));
//! let report = core.grade("flip", &[GateOperation::new("X", 0)]).unwrap();
//! assert!(report.passed);
//! assert_eq!(report.score, 100);
//! ```

pub mod error;
pub mod exercise;
pub mod grader;
pub mod repository;
pub mod service;

pub use error::{GradeError, GradeResult};
pub use exercise::{AmplitudeSpec, DEFAULT_TOLERANCE, Exercise, TargetData, TargetType};
pub use grader::{GradingResult, band_score, grade, probability_distance, state_vector_distance};
pub use repository::ExerciseRepository;
pub use service::{GradeReport, Preview, QuantumCore};
