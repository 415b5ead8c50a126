//! qcge Command-Line Interface
//!
//! Replays editing scripts against a quantum circuit grid and emits the
//! compiled circuit.
//!
//! ```text
//! q0: ──H────●─────×──
//!            │     │
//! q1: ───────X─────×──
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod script;

use commands::{run, show, version};
use config::EditorConfig;

/// qcge - grid-based quantum circuit editing from the command line
#[derive(Parser)]
#[command(name = "qcge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a script and emit the compiled circuit
    Run {
        /// Script file
        #[arg(short, long)]
        script: PathBuf,

        /// Number of wires (overrides the config)
        #[arg(long)]
        qubits: Option<usize>,

        /// Number of columns (overrides the config)
        #[arg(long)]
        columns: Option<usize>,

        /// Output format (qasm3, qasm2, json, ops)
        #[arg(short, long, default_value = "qasm3")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the grid after replaying
        #[arg(long)]
        show_grid: bool,

        /// Abort on the first rejected action
        #[arg(long)]
        strict: bool,
    },

    /// Replay a script and print the grid
    Show {
        /// Script file
        #[arg(short, long)]
        script: PathBuf,

        /// Number of wires (overrides the config)
        #[arg(long)]
        qubits: Option<usize>,

        /// Number of columns (overrides the config)
        #[arg(long)]
        columns: Option<usize>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = execute(cli) {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = EditorConfig::load(cli.config.as_deref())?;

    // Setup logging
    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            script,
            qubits,
            columns,
            format,
            output,
            show_grid,
            strict,
        } => run::execute(
            &run::RunOptions {
                script: &script,
                qubits,
                columns,
                format: &format,
                output: output.as_deref(),
                show_grid,
                strict,
            },
            &config,
        ),

        Commands::Show {
            script,
            qubits,
            columns,
        } => show::execute(&script, qubits, columns, &config),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    }
}
