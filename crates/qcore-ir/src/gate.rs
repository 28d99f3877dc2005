//! The gate catalog: supported operators and their unitary action.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

use crate::error::{IrError, IrResult};

/// A 2×2 complex matrix in row-major order.
pub type Matrix2 = [[Complex64; 2]; 2];

/// How a gate addresses its qubits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateArity {
    /// Fixed single-qubit unitary.
    Single,
    /// Single-qubit rotation taking an angle in radians.
    Parameterized,
    /// Acts on a target qubit only where the control qubit is `|1⟩`.
    Controlled,
}

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Controlled-X (CNOT) gate.
    CX,
}

impl StandardGate {
    /// Resolve a caller-supplied gate name.
    ///
    /// Names are case-insensitive; `CNOT` and `CX` are the same gate. Rotations
    /// fall back to their default angle when `parameter` is `None`. The
    /// parameter is ignored for gates that take none.
    pub fn from_name(name: &str, parameter: Option<f64>) -> IrResult<Self> {
        let upper = name.trim().to_ascii_uppercase();
        let angle = |default: f64| -> IrResult<f64> {
            match parameter {
                Some(value) if !value.is_finite() => Err(IrError::InvalidParameter {
                    gate_name: upper.clone(),
                    value,
                    position: None,
                }),
                Some(value) => Ok(value),
                None => Ok(default),
            }
        };

        let gate = match upper.as_str() {
            "I" | "ID" => StandardGate::I,
            "H" => StandardGate::H,
            "X" => StandardGate::X,
            "Y" => StandardGate::Y,
            "Z" => StandardGate::Z,
            "S" => StandardGate::S,
            "T" => StandardGate::T,
            "RX" => StandardGate::Rx(angle(DEFAULT_RX_ANGLE)?),
            "RY" => StandardGate::Ry(angle(DEFAULT_RY_ANGLE)?),
            "RZ" => StandardGate::Rz(angle(DEFAULT_RZ_ANGLE)?),
            "CX" | "CNOT" => StandardGate::CX,
            _ => {
                return Err(IrError::UnknownGate {
                    name: name.to_string(),
                    position: None,
                });
            }
        };
        Ok(gate)
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::H => "h",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::S => "s",
            StandardGate::T => "t",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
        }
    }

    /// How this gate addresses qubits.
    #[inline]
    pub fn arity(&self) -> GateArity {
        match self {
            StandardGate::I
            | StandardGate::H
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::S
            | StandardGate::T => GateArity::Single,
            StandardGate::Rx(_) | StandardGate::Ry(_) | StandardGate::Rz(_) => {
                GateArity::Parameterized
            }
            StandardGate::CX => GateArity::Controlled,
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self.arity() {
            GateArity::Single | GateArity::Parameterized => 1,
            GateArity::Controlled => 2,
        }
    }

    /// Rotation angle, if this gate has one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(t) | StandardGate::Ry(t) | StandardGate::Rz(t) => Some(*t),
            _ => None,
        }
    }

    /// The 2×2 unitary applied to the target qubit.
    ///
    /// For controlled gates this is the action on the target within the
    /// subspace where the control qubit is `|1⟩`.
    pub fn matrix(&self) -> Matrix2 {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);

        match *self {
            StandardGate::I => [[one, zero], [zero, one]],
            StandardGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            StandardGate::X | StandardGate::CX => [[zero, one], [one, zero]],
            StandardGate::Y => [[zero, -i], [i, zero]],
            StandardGate::Z => [[one, zero], [zero, -one]],
            StandardGate::S => [[one, zero], [zero, i]],
            StandardGate::T => [[one, zero], [zero, Complex64::from_polar(1.0, FRAC_PI_4)]],
            StandardGate::Rx(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
                [[c, neg_i_s], [neg_i_s, c]]
            }
            StandardGate::Ry(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new((theta / 2.0).sin(), 0.0);
                [[c, -s], [s, c]]
            }
            StandardGate::Rz(theta) => [
                [Complex64::from_polar(1.0, -theta / 2.0), zero],
                [zero, Complex64::from_polar(1.0, theta / 2.0)],
            ],
        }
    }
}

/// Default angle for `RX` when no parameter is given.
pub const DEFAULT_RX_ANGLE: f64 = FRAC_PI_2;
/// Default angle for `RY` when no parameter is given.
pub const DEFAULT_RY_ANGLE: f64 = FRAC_PI_2;
/// Default angle for `RZ` when no parameter is given.
pub const DEFAULT_RZ_ANGLE: f64 = FRAC_PI_4;

/// Catalog entry describing a supported gate.
#[derive(Debug, Clone, Serialize)]
pub struct GateInfo {
    /// Canonical (upper-case) name accepted on input.
    pub name: &'static str,
    /// Alternative names accepted on input.
    pub aliases: &'static [&'static str],
    /// Display symbol.
    pub symbol: &'static str,
    /// Short description.
    pub description: &'static str,
    /// Operand shape.
    pub arity: GateArity,
    /// Angle used when the parameter is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_parameter: Option<f64>,
}

/// Every gate the simulator accepts.
pub const CATALOG: &[GateInfo] = &[
    GateInfo {
        name: "I",
        aliases: &["ID"],
        symbol: "I",
        description: "Identity",
        arity: GateArity::Single,
        default_parameter: None,
    },
    GateInfo {
        name: "H",
        aliases: &[],
        symbol: "H",
        description: "Hadamard",
        arity: GateArity::Single,
        default_parameter: None,
    },
    GateInfo {
        name: "X",
        aliases: &[],
        symbol: "X",
        description: "Pauli-X (NOT)",
        arity: GateArity::Single,
        default_parameter: None,
    },
    GateInfo {
        name: "Y",
        aliases: &[],
        symbol: "Y",
        description: "Pauli-Y",
        arity: GateArity::Single,
        default_parameter: None,
    },
    GateInfo {
        name: "Z",
        aliases: &[],
        symbol: "Z",
        description: "Pauli-Z",
        arity: GateArity::Single,
        default_parameter: None,
    },
    GateInfo {
        name: "S",
        aliases: &[],
        symbol: "S",
        description: "Phase gate, pi/2 about Z",
        arity: GateArity::Single,
        default_parameter: None,
    },
    GateInfo {
        name: "T",
        aliases: &[],
        symbol: "T",
        description: "Phase gate, pi/4 about Z",
        arity: GateArity::Single,
        default_parameter: None,
    },
    GateInfo {
        name: "RX",
        aliases: &[],
        symbol: "RX",
        description: "Rotation about the X axis",
        arity: GateArity::Parameterized,
        default_parameter: Some(DEFAULT_RX_ANGLE),
    },
    GateInfo {
        name: "RY",
        aliases: &[],
        symbol: "RY",
        description: "Rotation about the Y axis",
        arity: GateArity::Parameterized,
        default_parameter: Some(DEFAULT_RY_ANGLE),
    },
    GateInfo {
        name: "RZ",
        aliases: &[],
        symbol: "RZ",
        description: "Rotation about the Z axis",
        arity: GateArity::Parameterized,
        default_parameter: Some(DEFAULT_RZ_ANGLE),
    },
    GateInfo {
        name: "CNOT",
        aliases: &["CX"],
        symbol: "⊕",
        description: "Controlled-NOT",
        arity: GateArity::Controlled,
        default_parameter: None,
    },
];

/// Look up the catalog entry for a gate name (case-insensitive, aliases included).
pub fn lookup(name: &str) -> Option<&'static GateInfo> {
    let name = name.trim();
    CATALOG.iter().find(|info| {
        info.name.eq_ignore_ascii_case(name)
            || info.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    })
}
