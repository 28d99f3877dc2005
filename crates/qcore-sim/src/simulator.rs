//! Simulator facade: validate, evolve, measure.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, instrument};

use qcore_ir::{Circuit, CircuitBuilder, GateOperation, IrError};

use crate::config::SimulatorConfig;
use crate::error::{SimError, SimResult};
use crate::result::{Probabilities, SimulationResult};
use crate::sampler::Sampler;
use crate::statevector::Statevector;

/// Dense statevector simulator.
///
/// Holds only configuration, so one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulatorConfig,
}

impl Simulator {
    /// Create a simulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator with custom settings.
    pub fn with_config(config: SimulatorConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// A circuit builder that honours this simulator's qubit cap.
    pub fn builder(&self, qubit_count: u32) -> CircuitBuilder {
        CircuitBuilder::new(qubit_count).with_max_qubits(self.config.max_qubits)
    }

    /// Evolve |0…0⟩ through `circuit`.
    ///
    /// The norm is checked after every instruction; drift beyond the
    /// configured tolerance is reported rather than corrected.
    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits(), gates = circuit.len()))]
    pub fn statevector(&self, circuit: &Circuit) -> SimResult<Statevector> {
        if circuit.num_qubits() > self.config.max_qubits {
            return Err(SimError::Ir(IrError::QubitCountOutOfRange {
                requested: circuit.num_qubits(),
                max: self.config.max_qubits,
            }));
        }

        let start = Instant::now();
        let mut sv = Statevector::new(circuit.num_qubits());

        for (position, inst) in circuit.instructions().iter().enumerate() {
            sv.apply(inst)?;
            let norm = sv.norm_sqr();
            if (norm - 1.0).abs() > self.config.norm_tolerance {
                return Err(SimError::NormDrift {
                    norm,
                    position,
                    tolerance: self.config.norm_tolerance,
                });
            }
        }

        debug!("Statevector evolved in {:?}", start.elapsed());
        Ok(sv)
    }

    /// Exact probability of every basis state.
    pub fn probabilities(&self, circuit: &Circuit) -> SimResult<Probabilities> {
        Ok(Probabilities::from_statevector(&self.statevector(circuit)?))
    }

    /// Simulate `circuit` and sample `shots` measurements (default if `None`).
    pub fn run(&self, circuit: &Circuit, shots: Option<u64>) -> SimResult<SimulationResult> {
        let shots = shots.unwrap_or(self.config.default_shots);
        let sv = self.statevector(circuit)?;
        let probabilities = Probabilities::from_statevector(&sv);

        let sampler = Sampler::from_config(&self.config);
        let measurement_counts = match self.config.seed {
            Some(seed) => {
                sampler.sample_with_rng(&probabilities, shots, &mut StdRng::seed_from_u64(seed))?
            }
            None => sampler.sample(&probabilities, shots)?,
        };

        Ok(SimulationResult {
            num_qubits: sv.num_qubits(),
            state_vector: sv.into_amplitudes(),
            probabilities,
            measurement_counts,
            total_shots: shots,
            sampling: sampler.mode(),
            metrics: circuit.metrics(),
        })
    }

    /// Validate `operations` on `qubit_count` qubits, then [`run`](Self::run) them.
    #[instrument(skip(self, operations), fields(ops = operations.len()))]
    pub fn simulate(
        &self,
        qubit_count: u32,
        operations: &[GateOperation],
        shots: Option<u64>,
    ) -> SimResult<SimulationResult> {
        let circuit = self.builder(qubit_count).build(operations)?;
        debug!(
            "Simulating {} qubits, {} gates, depth {}",
            circuit.num_qubits(),
            circuit.len(),
            circuit.depth()
        );
        self.run(&circuit, shots)
    }
}
