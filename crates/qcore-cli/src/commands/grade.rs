//! Grade command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use super::common::{
    OutputFormat, load_circuit_file, load_core, print_json, print_probabilities, print_state,
};
use crate::config::Config;

/// Grade the circuit in `input` against exercise `id`.
///
/// A failing submission is a normal outcome and exits successfully.
pub fn execute(config: &Config, id: &str, input: &Path, format: OutputFormat) -> Result<()> {
    let core = load_core(config)?;
    let circuit = load_circuit_file(input)?;

    if let (Some(declared), Some(exercise)) = (circuit.num_qubits, core.get_exercise(id)) {
        if declared != exercise.num_qubits() {
            tracing::warn!(
                "{} declares {} qubits; exercise '{}' uses {}",
                input.display(),
                declared,
                id,
                exercise.num_qubits()
            );
        }
    }

    let report = core
        .grade(id, &circuit.operations)
        .with_context(|| format!("Failed to grade {}", input.display()))?;

    if format == OutputFormat::Json {
        return print_json(&report);
    }

    let verdict = if report.passed {
        style("✓ PASSED").green().bold()
    } else {
        style("✗ FAILED").red().bold()
    };
    println!(
        "{} {} (score {}/100)",
        verdict,
        style(&report.exercise_id).cyan(),
        style(report.score).yellow()
    );
    println!();
    print_state(&report.simulation_result);
    print_probabilities(&report.simulation_result);

    Ok(())
}
