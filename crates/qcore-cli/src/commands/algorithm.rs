//! Algorithm preset command implementation.

use anyhow::Result;
use console::style;

use qcore_ir::Algorithm;

use super::common::{
    OutputFormat, build_simulator, print_json, print_probabilities, print_results, print_state,
};
use crate::config::Config;

/// List the available presets.
pub fn list() {
    println!("{} Algorithm presets:\n", style("qcore").cyan().bold());
    for algorithm in Algorithm::ALL {
        println!(
            "  {:<20} {}",
            style(algorithm.name()).bold(),
            algorithm.description()
        );
    }
}

/// Run a named preset on `qubits` qubits.
pub fn execute(
    config: &Config,
    name: &str,
    qubits: u32,
    shots: Option<u64>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let algorithm: Algorithm = name.parse()?;
    let operations = algorithm.operations(qubits);

    let simulator = build_simulator(&config.simulator, seed, false)?;
    let result = simulator.simulate(qubits, &operations, shots)?;

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            println!(
                "{} {}",
                style(algorithm.name()).cyan().bold(),
                style(algorithm.description()).dim()
            );
            print_state(&result);
            print_probabilities(&result);
            print_results(&result);
        }
    }

    Ok(())
}
