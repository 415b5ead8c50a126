//! Run command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use qcge_grid::CompiledCircuit;
use qcge_qasm::{emit, emit_qasm2};

use super::common::{replay, with_dimensions};
use crate::config::EditorConfig;

/// Options for the run command.
pub struct RunOptions<'a> {
    pub script: &'a Path,
    pub qubits: Option<usize>,
    pub columns: Option<usize>,
    pub format: &'a str,
    pub output: Option<&'a Path>,
    pub show_grid: bool,
    pub strict: bool,
}

/// Execute the run command.
pub fn execute(options: &RunOptions<'_>, config: &EditorConfig) -> Result<()> {
    let config = with_dimensions(config, options.qubits, options.columns)?;

    eprintln!(
        "{} Replaying {} on a {}x{} grid",
        style("→").cyan().bold(),
        style(options.script.display()).green(),
        config.grid.num_qubits,
        config.grid.num_columns
    );

    let session = replay(options.script, &config, options.strict)?;
    eprintln!(
        "  Applied {} actions, {} rejected",
        session.applied, session.rejected
    );

    if options.show_grid {
        eprint!("{}", session.engine.grid());
    }

    let circuit = session
        .engine
        .compile_with(&config.compile)
        .map_err(|e| anyhow::anyhow!("Compile error: {e}"))?;
    let content = render(&circuit, options.format)?;

    eprintln!(
        "{} Compiled {} operations",
        style("✓").green().bold(),
        circuit.len()
    );

    match options.output {
        Some(path) => {
            fs::write(path, &content)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            eprintln!("  Output: {}", style(path.display()).green());
        }
        None => print!("{content}"),
    }

    Ok(())
}

/// Render a compiled circuit in the requested format.
fn render(circuit: &CompiledCircuit, format: &str) -> Result<String> {
    match format.to_lowercase().as_str() {
        "qasm3" | "qasm" => emit(circuit).map_err(|e| anyhow::anyhow!("Emit error: {e}")),
        "qasm2" => emit_qasm2(circuit).map_err(|e| anyhow::anyhow!("Emit error: {e}")),
        "json" => {
            let mut json = serde_json::to_string_pretty(circuit)?;
            json.push('\n');
            Ok(json)
        }
        "ops" => Ok(circuit.iter().map(|op| format!("{op}\n")).collect()),
        other => {
            anyhow::bail!("Unknown format: '{other}'. Available: qasm3, qasm2, json, ops");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcge_grid::{Operation, OperationKind};

    fn bell() -> CompiledCircuit {
        let mut circuit = CompiledCircuit::new(2);
        circuit
            .operations
            .push(Operation::single(OperationKind::H, 0));
        circuit
            .operations
            .push(Operation::controlled(OperationKind::CX, [0], 1));
        circuit
    }

    #[test]
    fn test_render_ops() {
        assert_eq!(render(&bell(), "ops").unwrap(), "h [0]\ncx [0, 1]\n");
    }

    #[test]
    fn test_render_json_round_trips() {
        let json = render(&bell(), "JSON").unwrap();
        let back: CompiledCircuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bell());
    }

    #[test]
    fn test_render_unknown_format() {
        assert!(render(&bell(), "quil").is_err());
    }
}
