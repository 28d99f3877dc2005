//! qcore Statevector Simulator
//!
//! Dense statevector simulation for small circuits. Every amplitude of the
//! `2^n` state is kept, so results are exact and memory doubles per qubit;
//! the qubit count is capped by [`SimulatorConfig::max_qubits`].
//!
//! # Features
//!
//! - **Exact Simulation**: full statevector, norm checked after every gate
//! - **Two Sampling Modes**: multinomial draws or deterministic rounding
//! - **No Fabricated Output**: internal inconsistencies surface as [`SimError`]
//!
//! # Memory
//!
//! | Qubits | Amplitudes | Memory |
//! |--------|------------|--------|
//! | 10 | 1024 | ~16 KB |
//! | 12 | 4096 | ~64 KB |
//! | 16 | 65536 | ~1 MB |
//!
//! # Example
//!
//! ```rust
//! use qcore_ir::GateOperation;
//! use qcore_sim::Simulator;
//!
//! let sim = Simulator::new();
//! let result = sim
//!     .simulate(
//!         2,
//!         &[
//!             GateOperation::new("H", 0),
//!             GateOperation::controlled("CNOT", 0, 1),
//!         ],
//!         Some(1000),
//!     )
//!     .unwrap();
//!
//! // Expect ~50% |00⟩ and ~50% |11⟩
//! assert!((result.probabilities.get("00") - 0.5).abs() < 1e-9);
//! assert_eq!(result.measurement_counts.total(), 1000);
//! ```

mod config;
mod error;
mod result;
mod sampler;
mod simulator;
mod statevector;

pub use config::SimulatorConfig;
pub use error::{SimError, SimResult};
pub use result::{Counts, Histogram, Probabilities, SimulationResult};
pub use sampler::{Sampler, SamplingMode};
pub use simulator::Simulator;
pub use statevector::{KET_DISPLAY_THRESHOLD, Statevector, bitstring, ket_notation};
