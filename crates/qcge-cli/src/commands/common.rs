//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::debug;

use qcge_grid::PlacementEngine;

use crate::config::EditorConfig;
use crate::script;

/// An editing session after a script has been replayed.
pub struct Session {
    pub engine: PlacementEngine,
    pub applied: usize,
    pub rejected: usize,
}

/// Apply command-line dimension overrides on top of the loaded config.
pub fn with_dimensions(
    config: &EditorConfig,
    qubits: Option<usize>,
    columns: Option<usize>,
) -> Result<EditorConfig> {
    let mut config = config.clone();
    if let Some(n) = qubits {
        config.grid.num_qubits = n;
    }
    if let Some(n) = columns {
        config.grid.num_columns = n;
    }
    config.validate()?;
    Ok(config)
}

/// Replay a script against a fresh session.
///
/// Rejected actions are reported and skipped, or abort the replay when
/// `strict` is set. Fatal errors always abort.
pub fn replay(path: &Path, config: &EditorConfig, strict: bool) -> Result<Session> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let steps = script::parse(&source, config.rotation_step)
        .with_context(|| format!("Failed to parse script: {}", path.display()))?;

    let mut engine = PlacementEngine::new(config.grid.num_qubits, config.grid.num_columns)?;
    let mut applied = 0;
    let mut rejected = 0;

    for step in steps {
        match engine.apply(step.action) {
            Ok(()) => {
                debug!(line = step.line, action = ?step.action, "applied");
                applied += 1;
            }
            Err(err) if err.is_fatal() || strict => {
                anyhow::bail!("Line {}: {}", step.line, err);
            }
            Err(err) => {
                eprintln!(
                    "  {} line {}: {}",
                    style("!").yellow().bold(),
                    step.line,
                    err
                );
                rejected += 1;
            }
        }
    }

    Ok(Session {
        engine,
        applied,
        rejected,
    })
}
