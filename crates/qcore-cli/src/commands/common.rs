//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use console::style;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use qcore_grade::{ExerciseRepository, QuantumCore};
use qcore_ir::GateOperation;
use qcore_sim::{SamplingMode, SimulationResult, Simulator, SimulatorConfig};

use crate::config::Config;

/// Rows shown before the remaining outcomes are summarized.
const MAX_ROWS: usize = 16;

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Styled text for a terminal.
    #[default]
    Table,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// A circuit read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CircuitFile {
    /// Register size; optional when an exercise supplies it.
    #[serde(default, alias = "qubit_count", alias = "qubits")]
    pub num_qubits: Option<u32>,
    /// Gate list in submission order.
    #[serde(default, alias = "gates", alias = "circuit")]
    pub operations: Vec<GateOperation>,
}

/// Load a circuit: `{"num_qubits": n, "operations": [...]}` or a bare
/// operation array.
pub fn load_circuit_file(path: &Path) -> Result<CircuitFile> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&source)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let circuit = match value {
        Value::Array(_) => CircuitFile {
            num_qubits: None,
            operations: serde_json::from_value(value)?,
        },
        other => serde_json::from_value(other)?,
    };
    Ok(circuit)
}

/// Build a simulator from configuration plus command-line overrides.
pub fn build_simulator(config: &SimulatorConfig, seed: Option<u64>, exact: bool) -> Result<Simulator> {
    let mut config = config.clone();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if exact {
        config = config.with_sampling(SamplingMode::Exact);
    }
    Ok(Simulator::with_config(config)?)
}

/// Load the exercise catalog named by the configuration.
pub fn load_core(config: &Config) -> Result<QuantumCore> {
    let path = config.exercises.path.as_deref().ok_or_else(|| {
        anyhow::anyhow!(
            "No exercise catalog configured. Pass --exercises, set QCORE_EXERCISES_PATH, or set exercises.path in the config file"
        )
    })?;

    let repository = ExerciseRepository::from_path(path)
        .with_context(|| format!("Failed to load exercises from {}", path.display()))?;
    let simulator = build_simulator(&config.simulator, None, false)?;
    Ok(QuantumCore::new(simulator, Arc::new(repository)))
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Human-readable name of a sampling mode.
pub fn sampling_name(mode: SamplingMode) -> &'static str {
    match mode {
        SamplingMode::Multinomial => "multinomial",
        SamplingMode::Exact => "exact",
    }
}

/// Print circuit size and the final state in ket notation.
pub fn print_state(result: &SimulationResult) {
    println!(
        "{} {} qubits, {} gates, depth {}",
        style("Circuit:").bold(),
        result.num_qubits,
        result.metrics.gate_count,
        result.metrics.depth
    );
    println!("{} {}", style("State:").bold(), style(result.ket()).cyan());
}

/// Print the exact distribution, skipping zero-probability states.
pub fn print_probabilities(result: &SimulationResult) {
    println!("\n{}", style("Probabilities:").bold());

    let nonzero: Vec<_> = result
        .probabilities
        .iter()
        .filter(|(_, p)| *p > 0.0)
        .collect();

    for (bitstring, prob) in nonzero.iter().take(MAX_ROWS) {
        println!("  {}: {:.6}", style(bitstring).cyan(), prob);
    }

    if nonzero.len() > MAX_ROWS {
        println!("  ... and {} more states", nonzero.len() - MAX_ROWS);
    }
}

/// Print sampled counts as a bar chart.
pub fn print_results(result: &SimulationResult) {
    println!(
        "\n{} Results ({} shots, {} sampling):",
        style("✓").green().bold(),
        result.total_shots,
        sampling_name(result.sampling)
    );

    let sorted = result.measurement_counts.sorted();
    let total = result.measurement_counts.total().max(1) as f64;

    for (bitstring, count) in sorted.iter().take(MAX_ROWS) {
        let prob = *count as f64 / total * 100.0;
        let bar_len = (prob / 2.0).round() as usize;
        let bar: String = "█".repeat(bar_len);

        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }
}
