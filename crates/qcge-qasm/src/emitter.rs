//! QASM emitter for compiled grid circuits.

use std::f64::consts::PI;

use qcge_grid::{CompiledCircuit, Operation};

use crate::error::{EmitError, EmitResult};

/// Tolerance for recognizing multiples of pi.
const PI_TOLERANCE: f64 = 1e-10;

/// Emit a circuit as QASM3 source code.
pub fn emit(circuit: &CompiledCircuit) -> EmitResult<String> {
    Emitter::new(Dialect::Qasm3).emit_circuit(circuit)
}

/// Emit a circuit as QASM 2.0 source code.
///
/// Register declarations use `qreg q[n];` and every gate comes from
/// `qelib1.inc`, so the output needs no inline gate definitions.
pub fn emit_qasm2(circuit: &CompiledCircuit) -> EmitResult<String> {
    Emitter::new(Dialect::Qasm2).emit_circuit(circuit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Qasm2,
    Qasm3,
}

struct Emitter {
    dialect: Dialect,
    output: String,
}

impl Emitter {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            output: String::new(),
        }
    }

    fn emit_circuit(mut self, circuit: &CompiledCircuit) -> EmitResult<String> {
        let num_qubits = circuit.num_qubits;

        match self.dialect {
            Dialect::Qasm3 => {
                self.writeln("OPENQASM 3.0;");
                self.writeln("include \"stdgates.inc\";");
                self.writeln("");
                self.writeln(&format!("qubit[{num_qubits}] q;"));
            }
            Dialect::Qasm2 => {
                self.writeln("OPENQASM 2.0;");
                self.writeln("include \"qelib1.inc\";");
                self.writeln("");
                self.writeln(&format!("qreg q[{num_qubits}];"));
            }
        }

        if !circuit.is_empty() {
            self.writeln("");
        }

        for (index, op) in circuit.iter().enumerate() {
            self.emit_operation(index, op, num_qubits)?;
        }

        Ok(self.output)
    }

    fn emit_operation(&mut self, index: usize, op: &Operation, num_qubits: usize) -> EmitResult<()> {
        let gate = op.kind.name();
        let qubits = op.qubits();

        if let Some(&qubit) = qubits.iter().find(|&&q| q >= num_qubits) {
            return Err(EmitError::QubitOutOfRange {
                index,
                gate,
                qubit,
                num_qubits,
            });
        }
        let qubits = qubits
            .iter()
            .map(|q| format!("q[{q}]"))
            .collect::<Vec<_>>()
            .join(", ");

        if op.kind.is_parameterized() {
            let angle = op.angle.ok_or(EmitError::MissingAngle { index, gate })?;
            if !angle.is_finite() {
                return Err(EmitError::NonFiniteAngle { index, gate, angle });
            }
            let param = emit_param(angle);
            self.writeln(&format!("{gate}({param}) {qubits};"));
        } else {
            self.writeln(&format!("{gate} {qubits};"));
        }
        Ok(())
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

/// Format an angle, preferring `pi` fractions where they are exact.
fn emit_param(v: f64) -> String {
    const FRACTIONS: [(f64, &str); 8] = [
        (PI, "pi"),
        (PI / 2.0, "pi/2"),
        (PI / 4.0, "pi/4"),
        (PI / 8.0, "pi/8"),
        (3.0 * PI / 2.0, "3*pi/2"),
        (2.0 * PI, "2*pi"),
        (-PI / 2.0, "-pi/2"),
        (-PI / 4.0, "-pi/4"),
    ];

    FRACTIONS
        .iter()
        .find(|(value, _)| (v - value).abs() < PI_TOLERANCE)
        .map_or_else(|| format!("{v:.6}"), |(_, text)| (*text).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcge_grid::OperationKind;

    #[test]
    fn test_emit_param() {
        assert_eq!(emit_param(PI), "pi");
        assert_eq!(emit_param(PI / 8.0), "pi/8");
        assert_eq!(emit_param(3.0 * PI / 2.0), "3*pi/2");
        assert_eq!(emit_param(0.3), "0.300000");
    }

    #[test]
    fn test_empty_circuit_header() {
        let qasm = emit(&CompiledCircuit::new(2)).unwrap();
        assert_eq!(qasm, "OPENQASM 3.0;\ninclude \"stdgates.inc\";\n\nqubit[2] q;\n");
    }

    #[test]
    fn test_missing_angle() {
        let mut circuit = CompiledCircuit::new(1);
        circuit
            .operations
            .push(Operation::single(OperationKind::Ry, 0));
        assert_eq!(
            emit(&circuit),
            Err(EmitError::MissingAngle {
                index: 0,
                gate: "ry"
            })
        );
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = CompiledCircuit::new(2);
        circuit
            .operations
            .push(Operation::controlled(OperationKind::CX, [0], 2));
        assert!(matches!(
            emit_qasm2(&circuit),
            Err(EmitError::QubitOutOfRange { qubit: 2, .. })
        ));
    }
}
