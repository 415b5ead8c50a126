//! Show command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use super::common::{replay, with_dimensions};
use crate::config::EditorConfig;

/// Execute the show command.
pub fn execute(
    script: &Path,
    qubits: Option<usize>,
    columns: Option<usize>,
    config: &EditorConfig,
) -> Result<()> {
    let config = with_dimensions(config, qubits, columns)?;
    let session = replay(script, &config, false)?;

    let (wire, column) = session.engine.position();
    print!("{}", session.engine.grid());
    println!(
        "{} wire {}, column {}",
        style("Cursor:").bold(),
        wire,
        column
    );
    if session.rejected > 0 {
        println!(
            "{} {} actions rejected",
            style("!").yellow().bold(),
            session.rejected
        );
    }

    Ok(())
}
