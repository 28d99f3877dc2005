//! Gates command implementation.

use anyhow::Result;
use console::style;

use qcore_ir::gate::lookup;
use qcore_ir::{CATALOG, GateArity, GateInfo};

use super::common::{OutputFormat, print_json};

fn arity_name(arity: GateArity) -> &'static str {
    match arity {
        GateArity::Single => "single",
        GateArity::Parameterized => "parameterized",
        GateArity::Controlled => "controlled",
    }
}

/// Execute the gates command: the whole catalog, or one gate by name or alias.
pub fn execute(name: Option<&str>, format: OutputFormat) -> Result<()> {
    if let Some(name) = name {
        let Some(gate) = lookup(name) else {
            anyhow::bail!("Unknown gate: '{name}'. Run `qcore gates` for the supported set");
        };
        return match format {
            OutputFormat::Json => print_json(gate),
            OutputFormat::Table => {
                print_gate(gate);
                Ok(())
            }
        };
    }

    if format == OutputFormat::Json {
        return print_json(&CATALOG);
    }

    println!("{} Supported gates:\n", style("qcore").cyan().bold());
    for gate in CATALOG {
        print_gate(gate);
    }

    Ok(())
}

fn print_gate(gate: &GateInfo) {
    let aliases = if gate.aliases.is_empty() {
        String::new()
    } else {
        format!(" (also {})", gate.aliases.join(", "))
    };
    println!(
        "  {:<4} {:<14} {}{}",
        style(gate.name).bold(),
        style(arity_name(gate.arity)).dim(),
        gate.description,
        aliases
    );
    if let Some(angle) = gate.default_parameter {
        println!("       default angle: {angle:.4} rad");
    }
}
