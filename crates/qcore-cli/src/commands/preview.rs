//! Preview command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use super::common::{
    OutputFormat, load_circuit_file, load_core, print_json, print_probabilities, print_state,
};
use crate::config::Config;

/// Simulate a submission for an exercise and show the target, without grading.
pub fn execute(config: &Config, id: &str, input: &Path, format: OutputFormat) -> Result<()> {
    let core = load_core(config)?;
    let circuit = load_circuit_file(input)?;
    let preview = core.preview(id, &circuit.operations)?;

    if format == OutputFormat::Json {
        return print_json(&preview);
    }

    println!(
        "{} {}\n",
        style("Preview for").bold(),
        style(&preview.exercise_id).cyan()
    );
    print_state(&preview.simulation_result);
    print_probabilities(&preview.simulation_result);
    println!("\n{}", style("Target data:").bold());
    println!("{}", serde_json::to_string_pretty(&preview.target_data)?);

    Ok(())
}
