//! Demonstration circuits for well-known algorithms.
//!
//! These are the simplified teaching versions: each produces a fixed gate
//! list for a given register width rather than a full oracle construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;
use crate::operation::GateOperation;

/// A preset algorithm circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Grover search with a single-Z oracle and H-Z-H diffusion.
    Grover,
    /// Deutsch-Jozsa with an X oracle on qubit 0.
    DeutschJozsa,
    /// Bernstein-Vazirani with hidden string `...1010`.
    BernsteinVazirani,
    /// Simon's algorithm with a copy oracle plus one period link.
    Simon,
}

impl Algorithm {
    /// All presets, in display order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Grover,
        Algorithm::DeutschJozsa,
        Algorithm::BernsteinVazirani,
        Algorithm::Simon,
    ];

    /// Get the name of this preset.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Grover => "grover",
            Algorithm::DeutschJozsa => "deutsch-jozsa",
            Algorithm::BernsteinVazirani => "bernstein-vazirani",
            Algorithm::Simon => "simon",
        }
    }

    /// Short human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Grover => "Grover's search algorithm",
            Algorithm::DeutschJozsa => "Deutsch-Jozsa algorithm",
            Algorithm::BernsteinVazirani => "Bernstein-Vazirani algorithm",
            Algorithm::Simon => "Simon's algorithm",
        }
    }

    /// Gate list for a register of `num_qubits` qubits.
    pub fn operations(self, num_qubits: u32) -> Vec<GateOperation> {
        let n = i64::from(num_qubits);
        let mut ops = Vec::new();

        match self {
            Algorithm::Grover => {
                ops.extend((0..n).map(|q| GateOperation::new("H", q).with_order(0)));
                if n > 0 {
                    ops.push(GateOperation::new("Z", n - 1).with_order(1));
                }
                for q in 0..n {
                    ops.push(GateOperation::new("H", q).with_order(2));
                    ops.push(GateOperation::new("Z", q).with_order(3));
                    ops.push(GateOperation::new("H", q).with_order(4));
                }
            }
            Algorithm::DeutschJozsa => {
                ops.extend((0..n).map(|q| GateOperation::new("H", q).with_order(0)));
                if n > 0 {
                    ops.push(GateOperation::new("X", 0).with_order(1));
                }
                // Last qubit is the ancilla.
                ops.extend((0..n - 1).map(|q| GateOperation::new("H", q).with_order(2)));
            }
            Algorithm::BernsteinVazirani => {
                ops.extend((0..n).map(|q| GateOperation::new("H", q).with_order(0)));
                for q in (0..n - 1).filter(|q| q % 2 == 1) {
                    ops.push(GateOperation::controlled("CNOT", q, n - 1).with_order(1));
                }
                ops.extend((0..n - 1).map(|q| GateOperation::new("H", q).with_order(2)));
            }
            Algorithm::Simon => {
                let half = n / 2;
                ops.extend((0..half).map(|q| GateOperation::new("H", q).with_order(0)));
                for q in 0..half {
                    ops.push(GateOperation::controlled("CNOT", q, q + half).with_order(1));
                }
                if half > 1 {
                    ops.push(GateOperation::controlled("CNOT", 0, half + 1).with_order(2));
                }
                ops.extend((0..half).map(|q| GateOperation::new("H", q).with_order(3)));
            }
        }

        ops
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "grover" => Ok(Algorithm::Grover),
            "deutsch-jozsa" | "dj" => Ok(Algorithm::DeutschJozsa),
            "bernstein-vazirani" | "bv" => Ok(Algorithm::BernsteinVazirani),
            "simon" => Ok(Algorithm::Simon),
            _ => Err(IrError::UnknownAlgorithm(s.to_string())),
        }
    }
}
