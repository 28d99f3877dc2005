//! qcore Command-Line Interface
//!
//! Simulates small circuits on a dense statevector and grades submissions
//! against an exercise catalog.
//!
//! ```text
//! qcore simulate -i bell.json --shots 1000
//! qcore algorithm grover --qubits 3
//! qcore exercises list --exercises catalog.json
//! qcore grade bell-state -i bell.json --exercises catalog.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;

mod commands;
mod config;
mod logging;

use commands::common::OutputFormat;
use commands::simulate::SimulateArgs;
use commands::{algorithm, exercises, gates, grade, preview, simulate, version};
use config::Config;

/// qcore - statevector simulation and exercise grading
#[derive(Parser)]
#[command(name = "qcore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "QCORE_CONFIG")]
    config: Option<PathBuf>,

    /// Exercise catalog (overrides the configured path)
    #[arg(long, global = true)]
    exercises: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a circuit from a JSON file
    Simulate {
        /// Circuit file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Number of qubits (overrides the file)
        #[arg(short, long)]
        qubits: Option<u32>,

        /// Number of shots (defaults to the configured value)
        #[arg(short, long)]
        shots: Option<u64>,

        /// RNG seed for reproducible counts
        #[arg(long)]
        seed: Option<u64>,

        /// Derive counts deterministically instead of sampling
        #[arg(long)]
        exact: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Run a built-in algorithm preset (lists presets when no name is given)
    Algorithm {
        /// Preset name (grover, deutsch-jozsa, bernstein-vazirani, simon)
        name: Option<String>,

        /// Number of qubits
        #[arg(short, long, default_value = "3")]
        qubits: u32,

        /// Number of shots
        #[arg(short, long)]
        shots: Option<u64>,

        /// RNG seed for reproducible counts
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List supported gates, or describe one
    Gates {
        /// Gate name or alias (e.g. cx)
        name: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Browse the exercise catalog
    Exercises {
        #[command(subcommand)]
        action: ExercisesAction,
    },

    /// Grade a circuit against an exercise
    Grade {
        /// Exercise ID
        exercise_id: String,

        /// Circuit file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Simulate a circuit for an exercise and show the target, without grading
    Preview {
        /// Exercise ID
        exercise_id: String,

        /// Circuit file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum ExercisesAction {
    /// List all exercises
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show one exercise
    Show {
        /// Exercise ID
        id: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.exercises {
        config.exercises.path = Some(path);
    }

    logging::init_logging(cli.verbose, &config.logging)?;

    match cli.command {
        Commands::Simulate {
            input,
            qubits,
            shots,
            seed,
            exact,
            format,
        } => simulate::execute(
            &config,
            &SimulateArgs {
                input: &input,
                qubits,
                shots,
                seed,
                exact,
                format,
            },
        ),

        Commands::Algorithm {
            name: Some(name),
            qubits,
            shots,
            seed,
            format,
        } => algorithm::execute(&config, &name, qubits, shots, seed, format),

        Commands::Algorithm { name: None, .. } => {
            algorithm::list();
            Ok(())
        }

        Commands::Gates { name, format } => gates::execute(name.as_deref(), format),

        Commands::Exercises { action } => match action {
            ExercisesAction::List { format } => exercises::list(&config, format),
            ExercisesAction::Show { id, format } => exercises::show(&config, &id, format),
        },

        Commands::Grade {
            exercise_id,
            input,
            format,
        } => grade::execute(&config, &exercise_id, &input, format),

        Commands::Preview {
            exercise_id,
            input,
            format,
        } => preview::execute(&config, &exercise_id, &input, format),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
