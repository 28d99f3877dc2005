//! Error types for the IR crate.

use thiserror::Error;

/// Errors raised while validating gate operations and building circuits.
///
/// All of these are detected before any simulation work starts.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A target or control qubit lies outside `[0, qubit_count)`.
    #[error(
        "Invalid qubit index {index} for {qubit_count}-qubit circuit (gate: {gate_name}){}",
        format_position(.position)
    )]
    InvalidQubitIndex {
        /// The offending index as supplied by the caller.
        index: i64,
        /// Number of qubits in the circuit.
        qubit_count: u32,
        /// Name of the gate that referenced the index.
        gate_name: String,
        /// Position of the operation in the submitted list.
        position: Option<usize>,
    },

    /// A controlled gate was submitted without a control qubit.
    #[error("Gate '{gate_name}' requires a control qubit{}", format_position(.position))]
    MissingControlQubit {
        /// Name of the gate.
        gate_name: String,
        /// Position of the operation in the submitted list.
        position: Option<usize>,
    },

    /// The gate name is not part of the catalog.
    #[error("Unknown gate '{name}'{}", format_position(.position))]
    UnknownGate {
        /// The name as supplied by the caller.
        name: String,
        /// Position of the operation in the submitted list.
        position: Option<usize>,
    },

    /// Control and target of a two-qubit gate are the same qubit.
    #[error(
        "Gate '{gate_name}' uses qubit {qubit} as both control and target{}",
        format_position(.position)
    )]
    ControlEqualsTarget {
        /// The shared qubit index.
        qubit: u32,
        /// Name of the gate.
        gate_name: String,
        /// Position of the operation in the submitted list.
        position: Option<usize>,
    },

    /// Rotation angle is NaN or infinite.
    #[error("Gate '{gate_name}' has a non-finite parameter {value}{}", format_position(.position))]
    InvalidParameter {
        /// Name of the gate.
        gate_name: String,
        /// The rejected value.
        value: f64,
        /// Position of the operation in the submitted list.
        position: Option<usize>,
    },

    /// Requested qubit count is zero or above the configured cap.
    #[error("Qubit count {requested} out of range: must be between 1 and {max}")]
    QubitCountOutOfRange {
        /// Requested number of qubits.
        requested: u32,
        /// Largest accepted number of qubits.
        max: u32,
    },

    /// No preset circuit exists under this name.
    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
}

impl IrError {
    /// Attach the position of the offending operation in the submitted list.
    #[must_use]
    pub fn at_position(mut self, at: usize) -> Self {
        match &mut self {
            IrError::InvalidQubitIndex { position, .. }
            | IrError::MissingControlQubit { position, .. }
            | IrError::UnknownGate { position, .. }
            | IrError::ControlEqualsTarget { position, .. }
            | IrError::InvalidParameter { position, .. } => *position = Some(at),
            IrError::QubitCountOutOfRange { .. } | IrError::UnknownAlgorithm(_) => {}
        }
        self
    }
}

/// Helper function to format the optional operation position.
#[allow(clippy::ref_option)]
fn format_position(position: &Option<usize>) -> String {
    match position {
        Some(p) => format!(" (operation #{p})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_is_rendered() {
        let err = IrError::UnknownGate {
            name: "FOO".into(),
            position: None,
        }
        .at_position(3);
        assert_eq!(err.to_string(), "Unknown gate 'FOO' (operation #3)");
    }

    #[test]
    fn test_position_ignored_for_circuit_level_errors() {
        let err = IrError::QubitCountOutOfRange {
            requested: 12,
            max: 10,
        }
        .at_position(1);
        assert_eq!(
            err.to_string(),
            "Qubit count 12 out of range: must be between 1 and 10"
        );
    }
}
