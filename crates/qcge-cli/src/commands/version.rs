//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum circuit grid editor",
        style("qcge").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qcge-grid  Grid model, placement engine and compiler");
    println!("  qcge-qasm  OpenQASM 3.0 and 2.0 emitter");
    println!("  qcge-cli   Command-line host");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
