//! Compiled circuit operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The gate an [`Operation`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// S gate.
    S,
    /// S-dagger.
    Sdg,
    /// T gate.
    T,
    /// T-dagger.
    Tdg,
    /// Hadamard.
    H,
    /// X rotation.
    Rx,
    /// Y rotation.
    Ry,
    /// Z rotation.
    Rz,
    /// Controlled X.
    CX,
    /// Controlled Y.
    CY,
    /// Controlled Z.
    CZ,
    /// Controlled Hadamard.
    CH,
    /// Toffoli.
    CCX,
    /// Controlled X rotation.
    CRx,
    /// Controlled Y rotation.
    CRy,
    /// Controlled Z rotation.
    CRz,
    /// SWAP.
    Swap,
    /// Fredkin (controlled SWAP).
    CSwap,
}

impl OperationKind {
    /// Lower-case gate name as used by OpenQASM standard gate libraries.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::I => "id",
            OperationKind::X => "x",
            OperationKind::Y => "y",
            OperationKind::Z => "z",
            OperationKind::S => "s",
            OperationKind::Sdg => "sdg",
            OperationKind::T => "t",
            OperationKind::Tdg => "tdg",
            OperationKind::H => "h",
            OperationKind::Rx => "rx",
            OperationKind::Ry => "ry",
            OperationKind::Rz => "rz",
            OperationKind::CX => "cx",
            OperationKind::CY => "cy",
            OperationKind::CZ => "cz",
            OperationKind::CH => "ch",
            OperationKind::CCX => "ccx",
            OperationKind::CRx => "crx",
            OperationKind::CRy => "cry",
            OperationKind::CRz => "crz",
            OperationKind::Swap => "swap",
            OperationKind::CSwap => "cswap",
        }
    }

    /// Whether the operation carries an angle parameter.
    pub fn is_parameterized(self) -> bool {
        matches!(
            self,
            OperationKind::Rx
                | OperationKind::Ry
                | OperationKind::Rz
                | OperationKind::CRx
                | OperationKind::CRy
                | OperationKind::CRz
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One executable gate extracted from the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Which gate.
    pub kind: OperationKind,
    /// Wire of the cell that owns the gate.
    pub target: usize,
    /// Control wires, first control first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<usize>,
    /// Second SWAP operand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<usize>,
    /// Rotation angle in radians, for parameterized kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl Operation {
    /// An uncontrolled, unparameterized operation on one wire.
    pub fn single(kind: OperationKind, target: usize) -> Self {
        Self {
            kind,
            target,
            controls: vec![],
            partner: None,
            angle: None,
        }
    }

    /// A controlled operation.
    pub fn controlled(
        kind: OperationKind,
        controls: impl IntoIterator<Item = usize>,
        target: usize,
    ) -> Self {
        Self {
            controls: controls.into_iter().collect(),
            ..Self::single(kind, target)
        }
    }

    /// Attach a rotation angle.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    /// Attach a SWAP partner.
    #[must_use]
    pub fn with_partner(mut self, partner: usize) -> Self {
        self.partner = Some(partner);
        self
    }

    /// Operands in gate order: controls, then target, then partner.
    pub fn qubits(&self) -> Vec<usize> {
        self.controls
            .iter()
            .copied()
            .chain(std::iter::once(self.target))
            .chain(self.partner)
            .collect()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(angle) = self.angle {
            write!(f, "({angle:.6})")?;
        }
        let qubits = self
            .qubits()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, " [{qubits}]")
    }
}

/// The result of compiling a grid: register width plus ordered operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledCircuit {
    /// Number of qubits in the register.
    pub num_qubits: usize,
    /// Operations in column-major, wire-ascending order.
    pub operations: Vec<Operation>,
}

impl CompiledCircuit {
    /// Create an empty circuit over `num_qubits` wires.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            operations: vec![],
        }
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether no operation was emitted.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Iterate over operations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Computational basis labels of the register, `|0..0>` first.
    pub fn basis_state_labels(&self) -> Vec<String> {
        let width = self.num_qubits;
        (0..1usize << width)
            .map(|index| format!("|{index:0width$b}>"))
            .collect()
    }
}

impl<'a> IntoIterator for &'a CompiledCircuit {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_order() {
        let cx = Operation::controlled(OperationKind::CX, [0], 1);
        assert_eq!(cx.qubits(), vec![0, 1]);

        let cswap = Operation::controlled(OperationKind::CSwap, [2], 0).with_partner(1);
        assert_eq!(cswap.qubits(), vec![2, 0, 1]);

        let ccx = Operation::controlled(OperationKind::CCX, [0, 2], 1);
        assert_eq!(ccx.qubits(), vec![0, 2, 1]);
    }

    #[test]
    fn test_operation_display() {
        let rx = Operation::single(OperationKind::Rx, 1).with_angle(0.5);
        assert_eq!(rx.to_string(), "rx(0.500000) [1]");
        let swap = Operation::single(OperationKind::Swap, 0).with_partner(2);
        assert_eq!(swap.to_string(), "swap [0, 2]");
    }

    #[test]
    fn test_parameterized_kinds() {
        assert!(OperationKind::CRz.is_parameterized());
        assert!(!OperationKind::CX.is_parameterized());
        assert_eq!(OperationKind::I.name(), "id");
    }

    #[test]
    fn test_basis_state_labels() {
        assert_eq!(CompiledCircuit::new(1).basis_state_labels(), vec!["|0>", "|1>"]);
        assert_eq!(
            CompiledCircuit::new(2).basis_state_labels(),
            vec!["|00>", "|01>", "|10>", "|11>"]
        );
        assert_eq!(CompiledCircuit::new(3).basis_state_labels().len(), 8);
    }
}
