//! Exercise model.
//!
//! Records are validated when deserialized, so an [`Exercise`] always has a
//! positive tolerance, a qubit count the simulator can handle and, for the
//! known target types, the target data its grading rule needs.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

use qcore_ir::MAX_SUPPORTED_QUBITS;
use qcore_sim::{Counts, Probabilities};

use crate::error::{GradeError, GradeResult};

/// Tolerance used when an exercise does not specify one.
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// What a submission is compared against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetType {
    /// Amplitude-by-amplitude comparison.
    StateVector,
    /// Exact probability distribution.
    Probabilities,
    /// Measurement distribution, given as probabilities or counts.
    Measurement,
    /// Anything else; loads fine but cannot be graded.
    Unsupported(String),
}

impl TargetType {
    /// Name as written in the catalog.
    pub fn as_str(&self) -> &str {
        match self {
            TargetType::StateVector => "state_vector",
            TargetType::Probabilities => "probabilities",
            TargetType::Measurement => "measurement",
            TargetType::Unsupported(name) => name,
        }
    }
}

impl From<String> for TargetType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "state_vector" => TargetType::StateVector,
            "probabilities" => TargetType::Probabilities,
            "measurement" => TargetType::Measurement,
            _ => TargetType::Unsupported(s),
        }
    }
}

impl From<TargetType> for String {
    fn from(t: TargetType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A target amplitude: a bare real number or a `[re, im]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmplitudeSpec {
    /// Real amplitude.
    Real(f64),
    /// Complex amplitude as `[re, im]`.
    Complex([f64; 2]),
}

impl AmplitudeSpec {
    /// Convert to a complex number.
    pub fn to_complex(self) -> Complex64 {
        match self {
            AmplitudeSpec::Real(re) => Complex64::new(re, 0.0),
            AmplitudeSpec::Complex([re, im]) => Complex64::new(re, im),
        }
    }
}

/// Target data of an exercise.
///
/// Unrecognized keys are kept so the data can be echoed back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetData {
    /// Expected amplitudes, indexed by basis state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_vector: Option<Vec<AmplitudeSpec>>,
    /// Expected probabilities keyed by bitstring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_probabilities: Option<BTreeMap<String, f64>>,
    /// Expected counts keyed by bitstring; normalized before comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_counts: Option<BTreeMap<String, u64>>,
    /// Tolerance, when given here rather than on the exercise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
    /// Other keys, passed through.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Raw catalog record, before validation.
#[derive(Debug, Deserialize)]
struct ExerciseRecord {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(alias = "qubit_count")]
    num_qubits: u32,
    target_type: TargetType,
    #[serde(default)]
    target_data: TargetData,
    #[serde(default)]
    tolerance: Option<f64>,
}

/// A graded exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExerciseRecord")]
pub struct Exercise {
    id: String,
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    difficulty: Option<String>,
    tags: Vec<String>,
    num_qubits: u32,
    target_type: TargetType,
    target_data: TargetData,
    tolerance: f64,
}

impl TryFrom<ExerciseRecord> for Exercise {
    type Error = GradeError;

    fn try_from(record: ExerciseRecord) -> GradeResult<Self> {
        let invalid = |reason: String| GradeError::InvalidExercise {
            exercise_id: record.id.clone(),
            reason,
        };

        if record.id.trim().is_empty() {
            return Err(invalid("id must not be empty".into()));
        }
        if record.num_qubits == 0 || record.num_qubits > MAX_SUPPORTED_QUBITS {
            return Err(invalid(format!(
                "num_qubits must be between 1 and {MAX_SUPPORTED_QUBITS}, got {}",
                record.num_qubits
            )));
        }

        let tolerance = record
            .tolerance
            .or(record.target_data.tolerance)
            .unwrap_or(DEFAULT_TOLERANCE);
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(invalid(format!("tolerance must be positive, got {tolerance}")));
        }

        let exercise = Exercise {
            id: record.id,
            title: record.title,
            description: record.description,
            difficulty: record.difficulty,
            tags: record.tags,
            num_qubits: record.num_qubits,
            target_type: record.target_type,
            target_data: record.target_data,
            tolerance,
        };
        exercise.check_target_data()?;
        Ok(exercise)
    }
}

impl Exercise {
    /// Validate an exercise built in code.
    pub fn new(
        id: impl Into<String>,
        num_qubits: u32,
        target_type: TargetType,
        target_data: TargetData,
    ) -> GradeResult<Self> {
        ExerciseRecord {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            difficulty: None,
            tags: Vec::new(),
            num_qubits,
            target_type,
            target_data,
            tolerance: None,
        }
        .try_into()
    }

    fn check_target_data(&self) -> GradeResult<()> {
        let missing = |field| GradeError::MissingTargetData {
            exercise_id: self.id.clone(),
            field,
        };
        let data = &self.target_data;

        match &self.target_type {
            TargetType::StateVector => {
                let amplitudes = data.state_vector.as_ref().ok_or_else(|| missing("state_vector"))?;
                if amplitudes.len() != 1 << self.num_qubits {
                    // Submissions against it grade as a plain fail.
                    warn!(
                        "Exercise '{}' has {} target amplitudes for {} qubits",
                        self.id,
                        amplitudes.len(),
                        self.num_qubits
                    );
                }
            }
            TargetType::Probabilities => {
                data.measurement_probabilities
                    .as_ref()
                    .ok_or_else(|| missing("measurement_probabilities"))?;
            }
            TargetType::Measurement => {
                if data.measurement_probabilities.is_none() {
                    let counts = data
                        .measurement_counts
                        .as_ref()
                        .ok_or_else(|| missing("measurement_probabilities"))?;
                    if counts.values().sum::<u64>() == 0 {
                        return Err(GradeError::InvalidExercise {
                            exercise_id: self.id.clone(),
                            reason: "measurement_counts total zero shots".into(),
                        });
                    }
                }
            }
            TargetType::Unsupported(name) => {
                warn!("Exercise '{}' has unsupported target type '{name}'", self.id);
            }
        }
        Ok(())
    }

    /// Set the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> GradeResult<Self> {
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(GradeError::InvalidExercise {
                exercise_id: self.id,
                reason: format!("tolerance must be positive, got {tolerance}"),
            });
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    /// Exercise id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Difficulty label.
    pub fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    /// Tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Number of qubits submissions are simulated on.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Target type.
    pub fn target_type(&self) -> &TargetType {
        &self.target_type
    }

    /// Target data, as loaded.
    pub fn target_data(&self) -> &TargetData {
        &self.target_data
    }

    /// Largest total difference that still passes.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Target amplitudes, if the exercise has any.
    pub fn target_amplitudes(&self) -> Option<Vec<Complex64>> {
        self.target_data
            .state_vector
            .as_ref()
            .map(|amps| amps.iter().map(|a| a.to_complex()).collect())
    }

    /// Target distribution; counts are normalized to probabilities.
    pub fn target_probabilities(&self) -> Option<Probabilities> {
        if let Some(probs) = &self.target_data.measurement_probabilities {
            return Some(probs.iter().map(|(k, v)| (k.clone(), *v)).collect());
        }
        if self.target_type == TargetType::Measurement {
            return self.target_data.measurement_counts.as_ref().map(|counts| {
                counts
                    .iter()
                    .map(|(k, v)| (k.clone(), *v))
                    .collect::<Counts>()
                    .to_probabilities()
            });
        }
        None
    }
}
