//! Validated circuits and the builder that produces them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::error::{IrError, IrResult};
use crate::gate::{GateArity, StandardGate};
use crate::operation::GateOperation;
use crate::qubit::QubitId;

/// Default cap on the number of qubits a circuit may use.
pub const DEFAULT_MAX_QUBITS: u32 = 10;

/// Hard ceiling on the qubit cap; the dense statevector doubles per qubit.
pub const MAX_SUPPORTED_QUBITS: u32 = 16;

/// A validated gate application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate to apply.
    pub gate: StandardGate,
    /// Target qubit.
    pub target: QubitId,
    /// Control qubit, present exactly for controlled gates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<QubitId>,
    /// Sequencing key the instruction was sorted by.
    pub order: i64,
}

impl Instruction {
    /// Create a single-qubit instruction.
    pub fn single(gate: StandardGate, target: QubitId) -> Self {
        Self {
            gate,
            target,
            control: None,
            order: 0,
        }
    }

    /// Create a controlled instruction.
    pub fn controlled(gate: StandardGate, control: QubitId, target: QubitId) -> Self {
        Self {
            gate,
            target,
            control: Some(control),
            order: 0,
        }
    }

    /// Set the sequencing key.
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Qubits touched by this instruction, control first.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.control.into_iter().chain(std::iter::once(self.target))
    }
}

/// Summary statistics of a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CircuitMetrics {
    /// Number of qubits.
    pub num_qubits: u32,
    /// Total number of gates.
    pub gate_count: usize,
    /// Number of time steps, `max(order) + 1` (0 for an empty circuit).
    pub depth: usize,
    /// Gate count by name.
    pub gate_counts: BTreeMap<String, usize>,
    /// Number of single-qubit gates.
    pub single_qubit_gates: usize,
    /// Number of two-qubit gates.
    pub two_qubit_gates: usize,
}

/// A validated quantum circuit.
///
/// Instructions are stored in application order. Every qubit index is known
/// to be within `[0, num_qubits)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    num_qubits: u32,
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Validate and order `operations` on `qubit_count` qubits with the default cap.
    pub fn build(qubit_count: u32, operations: &[GateOperation]) -> IrResult<Self> {
        CircuitBuilder::new(qubit_count).build(operations)
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Dimension of the state space, `2^num_qubits`.
    pub fn dimension(&self) -> usize {
        1 << self.num_qubits
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of time steps, `max(order) + 1`, or 0 for an empty circuit.
    pub fn depth(&self) -> usize {
        self.instructions
            .iter()
            .map(|inst| inst.order)
            .max()
            .map_or(0, |max| usize::try_from(max).map_or(1, |m| m + 1))
    }

    /// Collect summary statistics.
    pub fn metrics(&self) -> CircuitMetrics {
        let mut gate_counts = BTreeMap::new();
        let mut single_qubit_gates = 0;
        let mut two_qubit_gates = 0;

        for inst in &self.instructions {
            *gate_counts.entry(inst.gate.name().to_string()).or_insert(0) += 1;
            match inst.gate.num_qubits() {
                1 => single_qubit_gates += 1,
                _ => two_qubit_gates += 1,
            }
        }

        CircuitMetrics {
            num_qubits: self.num_qubits,
            gate_count: self.instructions.len(),
            depth: self.depth(),
            gate_counts,
            single_qubit_gates,
            two_qubit_gates,
        }
    }
}

/// Validates caller-supplied operations into a [`Circuit`].
///
/// ```rust
/// use qcore_ir::{CircuitBuilder, GateOperation};
///
/// let circuit = CircuitBuilder::new(2)
///     .build(&[
///         GateOperation::new("H", 0),
///         GateOperation::controlled("CNOT", 0, 1),
///     ])
///     .unwrap();
/// assert_eq!(circuit.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CircuitBuilder {
    qubit_count: u32,
    max_qubits: u32,
}

impl CircuitBuilder {
    /// Create a builder for `qubit_count` qubits capped at [`DEFAULT_MAX_QUBITS`].
    pub fn new(qubit_count: u32) -> Self {
        Self {
            qubit_count,
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }

    /// Override the qubit cap. Values above [`MAX_SUPPORTED_QUBITS`] are clamped.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits.min(MAX_SUPPORTED_QUBITS);
        self
    }

    /// Validate `operations` and sort them by `order`.
    ///
    /// Fails on the first invalid operation. Ties in `order` keep their
    /// input-list order.
    pub fn build(&self, operations: &[GateOperation]) -> IrResult<Circuit> {
        if self.qubit_count == 0 || self.qubit_count > self.max_qubits {
            return Err(IrError::QubitCountOutOfRange {
                requested: self.qubit_count,
                max: self.max_qubits,
            });
        }

        let mut instructions = operations
            .iter()
            .enumerate()
            .map(|(position, op)| {
                self.validate(position, op)
                    .map_err(|e| e.at_position(position))
            })
            .collect::<IrResult<Vec<_>>>()?;

        // Stable: equal keys stay in submission order.
        instructions.sort_by_key(|inst| inst.order);

        debug!(
            "Built circuit: {} qubits, {} instructions",
            self.qubit_count,
            instructions.len()
        );

        Ok(Circuit {
            num_qubits: self.qubit_count,
            instructions,
        })
    }

    fn validate(&self, position: usize, op: &GateOperation) -> IrResult<Instruction> {
        let gate = StandardGate::from_name(&op.name, op.parameter)?;
        let target = self.qubit(op.qubit, gate)?;
        let order = op
            .order
            .unwrap_or_else(|| i64::try_from(position).unwrap_or(i64::MAX));

        let control = match gate.arity() {
            GateArity::Controlled => {
                let raw = op.control_qubit.ok_or_else(|| IrError::MissingControlQubit {
                    gate_name: gate.name().to_string(),
                    position: None,
                })?;
                let control = self.qubit(raw, gate)?;
                if control == target {
                    return Err(IrError::ControlEqualsTarget {
                        qubit: target.0,
                        gate_name: gate.name().to_string(),
                        position: None,
                    });
                }
                Some(control)
            }
            GateArity::Single | GateArity::Parameterized => {
                if let Some(control) = op.control_qubit {
                    warn!(
                        "Ignoring control qubit {control} on single-qubit gate '{}' (operation #{position})",
                        gate.name()
                    );
                }
                None
            }
        };

        Ok(Instruction {
            gate,
            target,
            control,
            order,
        })
    }

    fn qubit(&self, index: i64, gate: StandardGate) -> IrResult<QubitId> {
        u32::try_from(index)
            .ok()
            .filter(|&q| q < self.qubit_count)
            .map(QubitId)
            .ok_or_else(|| IrError::InvalidQubitIndex {
                index,
                qubit_count: self.qubit_count,
                gate_name: gate.name().to_string(),
                position: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::build(3, &[]).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.dimension(), 8);
        assert!(circuit.is_empty());
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_invalid_qubit_index() {
        let err = Circuit::build(3, &[GateOperation::new("H", 5)]).unwrap_err();
        assert!(matches!(
            err,
            IrError::InvalidQubitIndex {
                index: 5,
                qubit_count: 3,
                position: Some(0),
                ..
            }
        ));
    }

    #[test]
    fn test_negative_qubit_index() {
        let err = Circuit::build(2, &[GateOperation::new("X", -1)]).unwrap_err();
        assert!(matches!(err, IrError::InvalidQubitIndex { index: -1, .. }));
    }

    #[test]
    fn test_invalid_control_index() {
        let ops = [GateOperation::controlled("CNOT", 4, 0)];
        let err = Circuit::build(2, &ops).unwrap_err();
        assert!(matches!(err, IrError::InvalidQubitIndex { index: 4, .. }));
    }

    #[test]
    fn test_missing_control_qubit() {
        let ops = [GateOperation::new("H", 0), GateOperation::new("CNOT", 1)];
        let err = Circuit::build(2, &ops).unwrap_err();
        assert!(matches!(
            err,
            IrError::MissingControlQubit {
                position: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn test_control_equals_target() {
        let err = Circuit::build(2, &[GateOperation::controlled("CX", 1, 1)]).unwrap_err();
        assert!(matches!(err, IrError::ControlEqualsTarget { qubit: 1, .. }));
    }

    #[test]
    fn test_unknown_gate() {
        let err = Circuit::build(2, &[GateOperation::new("MEASURE", 0)]).unwrap_err();
        assert!(matches!(err, IrError::UnknownGate { ref name, .. } if name == "MEASURE"));
    }

    #[test]
    fn test_qubit_count_limits() {
        assert!(matches!(
            Circuit::build(0, &[]),
            Err(IrError::QubitCountOutOfRange { requested: 0, .. })
        ));
        assert!(matches!(
            Circuit::build(11, &[]),
            Err(IrError::QubitCountOutOfRange {
                requested: 11,
                max: 10
            })
        ));
        assert!(CircuitBuilder::new(12).with_max_qubits(12).build(&[]).is_ok());
        assert!(matches!(
            CircuitBuilder::new(20).with_max_qubits(64).build(&[]),
            Err(IrError::QubitCountOutOfRange { max: 16, .. })
        ));
    }

    #[test]
    fn test_sorted_by_order_stable() {
        let ops = [
            GateOperation::new("X", 0).with_order(2),
            GateOperation::new("H", 1).with_order(0),
            GateOperation::new("Z", 0).with_order(2),
            GateOperation::new("Y", 1).with_order(1),
        ];
        let circuit = Circuit::build(2, &ops).unwrap();
        let names: Vec<_> = circuit
            .instructions()
            .iter()
            .map(|i| i.gate.name())
            .collect();
        assert_eq!(names, ["h", "y", "x", "z"]);
    }

    #[test]
    fn test_default_order_is_position() {
        let ops = [GateOperation::new("H", 0), GateOperation::new("X", 0)];
        let circuit = Circuit::build(1, &ops).unwrap();
        assert_eq!(circuit.instructions()[0].order, 0);
        assert_eq!(circuit.instructions()[1].order, 1);
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_control_ignored_on_single_qubit_gate() {
        let ops = [GateOperation::new("H", 0).with_control(1)];
        let circuit = Circuit::build(2, &ops).unwrap();
        assert_eq!(circuit.instructions()[0].control, None);
    }

    #[test]
    fn test_metrics() {
        let ops = [
            GateOperation::new("H", 0).with_order(0),
            GateOperation::new("H", 1).with_order(0),
            GateOperation::controlled("CNOT", 0, 1).with_order(1),
            GateOperation::new("RZ", 1).with_order(4),
        ];
        let metrics = Circuit::build(2, &ops).unwrap().metrics();
        assert_eq!(metrics.gate_count, 4);
        assert_eq!(metrics.depth, 5);
        assert_eq!(metrics.gate_counts.get("h"), Some(&2));
        assert_eq!(metrics.gate_counts.get("cx"), Some(&1));
        assert_eq!(metrics.single_qubit_gates, 3);
        assert_eq!(metrics.two_qubit_gates, 1);
    }

    #[test]
    fn test_instruction_qubits() {
        let inst = Instruction::controlled(StandardGate::CX, QubitId(2), QubitId(0));
        let qubits: Vec<_> = inst.qubits().collect();
        assert_eq!(qubits, [QubitId(2), QubitId(0)]);
    }
}
