//! Error types for the simulator.

use qcore_ir::IrError;
use thiserror::Error;

/// Errors that can occur while simulating or sampling.
///
/// Everything except [`SimError::Ir`] and [`SimError::InvalidShots`] signals
/// an internal inconsistency; a [`Circuit`](qcore_ir::Circuit) that passed
/// validation should never produce one.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit validation failed.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// An instruction references a qubit outside the statevector.
    #[error("Qubit {qubit} out of range for {num_qubits}-qubit statevector")]
    QubitOutOfRange {
        /// Offending qubit.
        qubit: u32,
        /// Width of the statevector.
        num_qubits: u32,
    },

    /// A controlled instruction uses the same qubit as control and target.
    #[error("Control qubit {0} is also the target")]
    ControlIsTarget(u32),

    /// Total probability mass left the tolerance band around 1.
    #[error("Norm drifted to {norm} after instruction #{position} (tolerance {tolerance})")]
    NormDrift {
        /// Squared norm observed.
        norm: f64,
        /// Index of the instruction just applied.
        position: usize,
        /// Allowed deviation from 1.
        tolerance: f64,
    },

    /// An amplitude vector does not have length `2^n`.
    #[error("Statevector has {actual} amplitudes, expected {expected}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Shot count is zero or above the configured cap.
    #[error("Invalid shot count {shots}: must be between 1 and {max}")]
    InvalidShots {
        /// Requested shots.
        shots: u64,
        /// Configured maximum.
        max: u64,
    },

    /// Probabilities are negative, non-finite or sum to zero.
    #[error("Invalid probability distribution: {0}")]
    InvalidDistribution(String),

    /// Simulator configuration is inconsistent.
    #[error("Invalid simulator configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ir_error_is_transparent() {
        let ir = IrError::UnknownGate {
            name: "foo".into(),
            position: Some(2),
        };
        let message = ir.to_string();
        assert_eq!(SimError::from(ir).to_string(), message);
    }

    #[test]
    fn test_invalid_shots_message() {
        let err = SimError::InvalidShots {
            shots: 0,
            max: 1_000_000,
        };
        assert_eq!(
            err.to_string(),
            "Invalid shot count 0: must be between 1 and 1000000"
        );
    }
}
