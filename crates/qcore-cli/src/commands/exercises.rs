//! Exercises command implementation.

use anyhow::Result;
use console::style;

use super::common::{OutputFormat, load_core, print_json};
use crate::config::Config;

/// List every exercise in the catalog.
pub fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let core = load_core(config)?;
    let exercises = core.list_exercises();

    if format == OutputFormat::Json {
        return print_json(&exercises);
    }

    println!(
        "{} {} exercises:\n",
        style("qcore").cyan().bold(),
        exercises.len()
    );
    for exercise in exercises {
        println!(
            "  {:<24} {} qubits  {:<14} {}",
            style(exercise.id()).bold(),
            exercise.num_qubits(),
            style(exercise.target_type()).dim(),
            exercise.title()
        );
    }

    Ok(())
}

/// Show one exercise with its target data.
pub fn show(config: &Config, id: &str, format: OutputFormat) -> Result<()> {
    let core = load_core(config)?;
    let Some(exercise) = core.get_exercise(id) else {
        anyhow::bail!("Exercise not found: {id}");
    };

    if format == OutputFormat::Json {
        return print_json(exercise);
    }

    println!("{} {}", style(exercise.id()).cyan().bold(), exercise.title());
    if !exercise.description().is_empty() {
        println!("\n  {}\n", exercise.description());
    }
    println!("  Qubits:      {}", exercise.num_qubits());
    println!("  Target type: {}", exercise.target_type());
    println!("  Tolerance:   {}", exercise.tolerance());
    if let Some(difficulty) = exercise.difficulty() {
        println!("  Difficulty:  {difficulty}");
    }
    if !exercise.tags().is_empty() {
        println!("  Tags:        {}", exercise.tags().join(", "));
    }
    println!("\n{}", style("Target data:").bold());
    println!("{}", serde_json::to_string_pretty(exercise.target_data())?);

    Ok(())
}
