//! Caller-supplied gate operations, prior to validation.

use serde::{Deserialize, Serialize};

/// A gate operation as submitted by a caller.
///
/// Indices are signed so that negative values coming from an external
/// request surface as [`IrError::InvalidQubitIndex`](crate::IrError) instead
/// of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateOperation {
    /// Gate name, resolved case-insensitively against the catalog.
    #[serde(alias = "gate")]
    pub name: String,
    /// Target qubit.
    pub qubit: i64,
    /// Control qubit, required for controlled gates.
    #[serde(default, alias = "control", skip_serializing_if = "Option::is_none")]
    pub control_qubit: Option<i64>,
    /// Rotation angle in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<f64>,
    /// Sequencing key; defaults to the position in the submitted list.
    #[serde(
        default,
        alias = "timeStep",
        alias = "time_step",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<i64>,
}

impl GateOperation {
    /// Create an operation on a single target qubit.
    pub fn new(name: impl Into<String>, qubit: i64) -> Self {
        Self {
            name: name.into(),
            qubit,
            control_qubit: None,
            parameter: None,
            order: None,
        }
    }

    /// Create a controlled operation.
    pub fn controlled(name: impl Into<String>, control: i64, target: i64) -> Self {
        Self::new(name, target).with_control(control)
    }

    /// Set the control qubit.
    #[must_use]
    pub fn with_control(mut self, control: i64) -> Self {
        self.control_qubit = Some(control);
        self
    }

    /// Set the rotation angle.
    #[must_use]
    pub fn with_parameter(mut self, parameter: f64) -> Self {
        self.parameter = Some(parameter);
        self
    }

    /// Set the sequencing key.
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}
