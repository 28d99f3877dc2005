//! Simulation results: probabilities, counts and the full result bundle.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use qcore_ir::CircuitMetrics;

use crate::sampler::SamplingMode;
use crate::statevector::{Statevector, bitstring, ket_notation};

/// Probability of each basis state, keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probabilities(BTreeMap<String, f64>);

impl Probabilities {
    /// Create an empty distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Probabilities of every basis state of `statevector`, zeros included.
    pub fn from_statevector(statevector: &Statevector) -> Self {
        let n = statevector.num_qubits();
        statevector
            .probabilities()
            .into_iter()
            .enumerate()
            .map(|(i, p)| (bitstring(i, n), p))
            .collect()
    }

    /// Set the probability of a basis state.
    pub fn insert(&mut self, bitstring: impl Into<String>, probability: f64) {
        self.0.insert(bitstring.into(), probability);
    }

    /// Probability of a basis state; 0 if absent.
    pub fn get(&self, bitstring: &str) -> f64 {
        self.0.get(bitstring).copied().unwrap_or(0.0)
    }

    /// Iterate over `(bitstring, probability)` in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// `Σ |p(s) − q(s)|` over the union of both key sets.
    pub fn l1_distance(&self, other: &Probabilities) -> f64 {
        let own: f64 = self
            .0
            .iter()
            .map(|(state, &p)| (p - other.get(state)).abs())
            .sum();
        let missing: f64 = other
            .0
            .iter()
            .filter(|(state, _)| !self.0.contains_key(*state))
            .map(|(_, &q)| q.abs())
            .sum();
        own + missing
    }
}

impl FromIterator<(String, f64)> for Probabilities {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Measurement counts, keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Count for a bitstring; 0 if never observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots recorded.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(bitstring, count)` in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Outcomes sorted by descending count, ties by bitstring.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Most frequently observed outcome.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.sorted().into_iter().next()
    }

    /// Relative frequencies. Empty counts give an empty distribution.
    pub fn to_probabilities(&self) -> Probabilities {
        let total = self.total();
        if total == 0 {
            return Probabilities::new();
        }
        self.0
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
            .collect()
    }

    /// Chart-ready view of the counts.
    pub fn histogram(&self) -> Histogram {
        let total = self.total();
        let mut histogram = Histogram::default();
        for (label, count) in self.iter() {
            histogram.labels.push(label.to_string());
            histogram.values.push(count);
            histogram.frequencies.push(if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            });
        }
        histogram
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }
}

/// Parallel label/value/frequency arrays, sorted by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bitstrings.
    pub labels: Vec<String>,
    /// Raw counts.
    pub values: Vec<u64>,
    /// Counts divided by the total.
    pub frequencies: Vec<f64>,
}

/// Everything produced by simulating one circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Number of qubits.
    pub num_qubits: u32,
    /// Final amplitudes, serialized as `[re, im]` pairs.
    pub state_vector: Vec<Complex64>,
    /// Exact probability of every basis state.
    pub probabilities: Probabilities,
    /// Counts drawn from `probabilities`.
    pub measurement_counts: Counts,
    /// Number of shots sampled.
    pub total_shots: u64,
    /// How the counts were produced.
    pub sampling: SamplingMode,
    /// Circuit summary.
    pub metrics: CircuitMetrics,
}

impl SimulationResult {
    /// The final state in ket notation.
    pub fn ket(&self) -> String {
        ket_notation(&self.state_vector, self.num_qubits)
    }
}
