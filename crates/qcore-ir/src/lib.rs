//! qcore Circuit Representation
//!
//! This crate defines what a caller may ask the simulator to do: the fixed
//! catalog of supported gates, the raw [`GateOperation`] submitted by a
//! caller, and the validated [`Circuit`] the simulator consumes.
//!
//! # Overview
//!
//! Gate names arrive as strings and are resolved exactly once, by
//! [`CircuitBuilder`], into the closed [`StandardGate`] enum. Anything the
//! catalog does not know is rejected with [`IrError::UnknownGate`]; nothing is
//! skipped silently. Qubit indices, control qubits and the qubit-count cap are
//! checked at the same point, so a [`Circuit`] is always safe to simulate.
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qcore_ir::{Circuit, GateOperation, StandardGate};
//!
//! let circuit = Circuit::build(
//!     2,
//!     &[
//!         GateOperation::new("H", 0),
//!         GateOperation::controlled("CNOT", 0, 1),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.instructions()[1].gate, StandardGate::CX);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `T` | 1 | Phase gates |
//! | `RX`, `RY`, `RZ` | 1 | Rotation gates (default π/2, π/2, π/4) |
//! | `CNOT` / `CX` | 2 | Controlled-NOT |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod operation;
pub mod presets;
pub mod qubit;

pub use circuit::{
    Circuit, CircuitBuilder, CircuitMetrics, DEFAULT_MAX_QUBITS, Instruction,
    MAX_SUPPORTED_QUBITS,
};
pub use error::{IrError, IrResult};
pub use gate::{CATALOG, GateArity, GateInfo, Matrix2, StandardGate};
pub use operation::GateOperation;
pub use presets::Algorithm;
pub use qubit::QubitId;
