//! Statevector simulation engine.
//!
//! Qubit `q` is bit `q` of the basis index, so qubit 0 is the least
//! significant bit. Gates are applied by updating amplitude pairs that differ
//! only in the target bit, which is the full `2^n` operator `I ⊗ U ⊗ I`
//! without materializing it.

use num_complex::Complex64;
use std::fmt::Write as _;

use qcore_ir::{Instruction, Matrix2, StandardGate};

use crate::error::{SimError, SimResult};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Amplitudes with a magnitude below this are left out of ket notation.
pub const KET_DISPLAY_THRESHOLD: f64 = 1e-6;

/// A statevector representing a quantum state.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: u32,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: u32) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Wrap an existing amplitude vector. The length must be a power of two.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(SimError::DimensionMismatch {
                expected: len.next_power_of_two().max(2),
                actual: len,
            });
        }
        Ok(Self {
            num_qubits: len.trailing_zeros(),
            amplitudes,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of amplitudes, `2^num_qubits`.
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// The amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the statevector, returning its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Total probability mass, `Σ |aᵢ|²`.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Probability of each basis state, indexed like the amplitudes.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        let target = self.checked(instruction.target.0)?;

        match instruction.control {
            Some(control) => {
                let control = self.checked(control.0)?;
                if control == target {
                    return Err(SimError::ControlIsTarget(instruction.target.0));
                }
                match instruction.gate {
                    StandardGate::CX => self.apply_cx(control, target),
                    gate => self.apply_controlled(control, target, &gate.matrix()),
                }
            }
            None => match instruction.gate {
                StandardGate::I => {}
                StandardGate::X => self.apply_x(target),
                StandardGate::Z => self.apply_diagonal(target, ONE, -ONE),
                StandardGate::S | StandardGate::T | StandardGate::Rz(_) => {
                    let m = instruction.gate.matrix();
                    self.apply_diagonal(target, m[0][0], m[1][1]);
                }
                gate => self.apply_single(target, &gate.matrix()),
            },
        }

        Ok(())
    }

    fn checked(&self, qubit: u32) -> SimResult<usize> {
        if qubit < self.num_qubits {
            Ok(qubit as usize)
        } else {
            Err(SimError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            })
        }
    }

    // =========================================================================
    // Gate kernels
    // =========================================================================

    fn apply_single(&mut self, qubit: usize, m: &Matrix2) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_diagonal(&mut self, qubit: usize, d0: Complex64, d1: Complex64) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp *= if i & mask == 0 { d0 } else { d1 };
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    fn apply_controlled(&mut self, control: usize, target: usize, m: &Matrix2) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    /// Render the state in ket notation, e.g. `0.707|00⟩ + 0.707|11⟩`.
    pub fn to_ket(&self) -> String {
        ket_notation(&self.amplitudes, self.num_qubits)
    }
}

/// Basis-state label for `index`, most significant qubit first.
pub fn bitstring(index: usize, num_qubits: u32) -> String {
    format!("{index:0width$b}", width = num_qubits as usize)
}

/// Render amplitudes in ket notation, hiding negligible terms.
pub fn ket_notation(amplitudes: &[Complex64], num_qubits: u32) -> String {
    let mut out = String::new();
    for (i, amp) in amplitudes.iter().enumerate() {
        if amp.norm() < KET_DISPLAY_THRESHOLD {
            continue;
        }
        if !out.is_empty() {
            out.push_str(" + ");
        }
        let _ = write!(out, "{}|{}⟩", format_amplitude(*amp), bitstring(i, num_qubits));
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

fn format_amplitude(amp: Complex64) -> String {
    let re_zero = amp.re.abs() < KET_DISPLAY_THRESHOLD;
    let im_zero = amp.im.abs() < KET_DISPLAY_THRESHOLD;
    match (re_zero, im_zero) {
        (_, true) => format!("{:.3}", amp.re),
        (true, false) => format!("{:.3}i", amp.im),
        (false, false) => {
            let sign = if amp.im < 0.0 { '-' } else { '+' };
            format!("({:.3}{sign}{:.3}i)", amp.re, amp.im.abs())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcore_ir::QubitId;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn h(q: u32) -> Instruction {
        Instruction::single(StandardGate::H, QubitId(q))
    }

    fn cx(c: u32, t: u32) -> Instruction {
        Instruction::controlled(StandardGate::CX, QubitId(c), QubitId(t))
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert_eq!(sv.amplitudes()[0], ONE);
        assert!(sv.amplitudes()[1..].iter().all(|a| *a == ZERO));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply(&h(0)).unwrap();

        assert!(approx_eq(sv.amplitudes()[0], Complex64::new(FRAC_1_SQRT_2, 0.0)));
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(FRAC_1_SQRT_2, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply(&h(0)).unwrap();
        sv.apply(&cx(0, 1)).unwrap();

        let expected = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitudes()[0], expected));
        assert!(approx_eq(sv.amplitudes()[1], ZERO));
        assert!(approx_eq(sv.amplitudes()[2], ZERO));
        assert!(approx_eq(sv.amplitudes()[3], expected));
    }

    #[test]
    fn test_x_on_high_qubit_sets_high_bit() {
        let mut sv = Statevector::new(3);
        sv.apply(&Instruction::single(StandardGate::X, QubitId(2)))
            .unwrap();
        assert!(approx_eq(sv.amplitudes()[0b100], ONE));
        assert_eq!(sv.to_ket(), "1.000|100⟩");
    }

    #[test]
    fn test_cx_respects_control() {
        // Control is |0⟩, so the target is untouched.
        let mut sv = Statevector::new(2);
        sv.apply(&cx(1, 0)).unwrap();
        assert!(approx_eq(sv.amplitudes()[0], ONE));
    }

    #[test]
    fn test_y_gate() {
        let mut sv = Statevector::new(1);
        sv.apply(&Instruction::single(StandardGate::Y, QubitId(0)))
            .unwrap();
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, 1.0)));
    }

    #[test]
    fn test_phase_gates() {
        let mut sv = Statevector::new(1);
        sv.apply(&Instruction::single(StandardGate::X, QubitId(0)))
            .unwrap();
        sv.apply(&Instruction::single(StandardGate::S, QubitId(0)))
            .unwrap();
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, 1.0)));
        sv.apply(&Instruction::single(StandardGate::T, QubitId(0)))
            .unwrap();
        assert!(approx_eq(
            sv.amplitudes()[1],
            Complex64::from_polar(1.0, 3.0 * PI / 4.0)
        ));
    }

    #[test]
    fn test_rx_pi_flips() {
        let mut sv = Statevector::new(1);
        sv.apply(&Instruction::single(StandardGate::Rx(PI), QubitId(0)))
            .unwrap();
        assert!(approx_eq(sv.amplitudes()[1], Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_ry_half_pi_superposition() {
        let mut sv = Statevector::new(1);
        sv.apply(&Instruction::single(StandardGate::Ry(PI / 2.0), QubitId(0)))
            .unwrap();
        let probs = sv.probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!((probs[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_instruction() {
        let mut sv = Statevector::new(2);
        assert_eq!(
            sv.apply(&h(2)),
            Err(SimError::QubitOutOfRange {
                qubit: 2,
                num_qubits: 2
            })
        );
    }

    #[test]
    fn test_control_is_target() {
        let mut sv = Statevector::new(2);
        assert_eq!(sv.apply(&cx(1, 1)), Err(SimError::ControlIsTarget(1)));
    }

    #[test]
    fn test_from_amplitudes() {
        let sv = Statevector::from_amplitudes(vec![ZERO, ZERO, ZERO, ONE]).unwrap();
        assert_eq!(sv.num_qubits(), 2);
        assert!(matches!(
            Statevector::from_amplitudes(vec![ONE, ZERO, ZERO]),
            Err(SimError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_bitstring_msb_first() {
        assert_eq!(bitstring(1, 3), "001");
        assert_eq!(bitstring(6, 3), "110");
    }

    #[test]
    fn test_ket_notation() {
        let amps = vec![
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            ZERO,
            ZERO,
            Complex64::new(0.0, -FRAC_1_SQRT_2),
        ];
        assert_eq!(ket_notation(&amps, 2), "0.707|00⟩ + -0.707i|11⟩");
        assert_eq!(
            ket_notation(&[Complex64::new(0.6, 0.8), ZERO], 1),
            "(0.600+0.800i)|0⟩"
        );
    }
}
