//! Simulate command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::common::{
    OutputFormat, build_simulator, load_circuit_file, print_json, print_probabilities,
    print_results, print_state,
};
use crate::config::Config;

/// Options for `qcore simulate`.
#[derive(Debug, Clone)]
pub struct SimulateArgs<'a> {
    pub input: &'a Path,
    pub qubits: Option<u32>,
    pub shots: Option<u64>,
    pub seed: Option<u64>,
    pub exact: bool,
    pub format: OutputFormat,
}

/// Execute the simulate command.
pub fn execute(config: &Config, args: &SimulateArgs<'_>) -> Result<()> {
    let circuit = load_circuit_file(args.input)?;
    let num_qubits = args.qubits.or(circuit.num_qubits).ok_or_else(|| {
        anyhow::anyhow!(
            "{} does not give num_qubits; pass --qubits",
            args.input.display()
        )
    })?;

    info!(
        "Simulating {} on {} qubits",
        args.input.display(),
        num_qubits
    );

    let simulator = build_simulator(&config.simulator, args.seed, args.exact)?;
    let result = simulator
        .simulate(num_qubits, &circuit.operations, args.shots)
        .with_context(|| format!("Failed to simulate {}", args.input.display()))?;

    match args.format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            print_state(&result);
            print_probabilities(&result);
            print_results(&result);
        }
    }

    Ok(())
}
