//! Simulator configuration.

use serde::{Deserialize, Serialize};

use qcore_ir::{DEFAULT_MAX_QUBITS, MAX_SUPPORTED_QUBITS};

use crate::error::{SimError, SimResult};
use crate::sampler::SamplingMode;

/// Configuration for a [`Simulator`](crate::Simulator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest accepted qubit count.
    pub max_qubits: u32,
    /// Shots used when the caller does not specify any.
    pub default_shots: u64,
    /// Largest accepted shot count.
    pub max_shots: u64,
    /// Allowed deviation of the squared norm from 1 after each gate.
    pub norm_tolerance: f64,
    /// Probabilities below this are left out of sampled counts.
    pub negligible_probability: f64,
    /// How measurement counts are derived from probabilities.
    pub sampling: SamplingMode,
    /// Fixed RNG seed for reproducible sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
            default_shots: 1024,
            max_shots: 1_000_000,
            norm_tolerance: 1e-9,
            negligible_probability: 1e-10,
            sampling: SamplingMode::default(),
            seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Set the qubit cap.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the default shot count.
    #[must_use]
    pub fn with_default_shots(mut self, shots: u64) -> Self {
        self.default_shots = shots;
        self
    }

    /// Set the shot cap.
    #[must_use]
    pub fn with_max_shots(mut self, shots: u64) -> Self {
        self.max_shots = shots;
        self
    }

    /// Set the sampling mode.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> SimResult<()> {
        if self.max_qubits == 0 || self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(SimError::InvalidConfig(format!(
                "max_qubits must be between 1 and {MAX_SUPPORTED_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        if self.max_shots == 0 {
            return Err(SimError::InvalidConfig("max_shots must be positive".into()));
        }
        if self.default_shots == 0 || self.default_shots > self.max_shots {
            return Err(SimError::InvalidConfig(format!(
                "default_shots must be between 1 and {}, got {}",
                self.max_shots, self.default_shots
            )));
        }
        if !(self.norm_tolerance.is_finite() && self.norm_tolerance > 0.0) {
            return Err(SimError::InvalidConfig(
                "norm_tolerance must be a positive number".into(),
            ));
        }
        if !(self.negligible_probability.is_finite() && self.negligible_probability >= 0.0) {
            return Err(SimError::InvalidConfig(
                "negligible_probability must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}
