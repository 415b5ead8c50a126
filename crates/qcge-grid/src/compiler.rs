//! Linearizes a grid into an ordered operation list.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{CompileError, CompileResult};
use crate::grid::GridModel;
use crate::node::{GateKind, GateNode};
use crate::operation::{CompiledCircuit, Operation, OperationKind};

/// What to emit for a rotated X/Y/Z gate that also has a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlledRotation {
    /// Emit the plain rotation and drop the control.
    #[default]
    Discard,
    /// Emit CRX/CRY/CRZ.
    Controlled,
}

/// Knobs for [`compile_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Policy for rotated gates carrying a control.
    #[serde(default)]
    pub controlled_rotation: ControlledRotation,
}

impl CompileOptions {
    /// Set the controlled-rotation policy.
    #[must_use]
    pub fn with_controlled_rotation(mut self, policy: ControlledRotation) -> Self {
        self.controlled_rotation = policy;
        self
    }
}

/// Compile with default options.
pub fn compile(grid: &GridModel) -> CompileResult<CompiledCircuit> {
    compile_with(grid, &CompileOptions::default())
}

/// Compile a grid snapshot.
///
/// Cells are visited column by column, wires ascending. Only stored nodes
/// emit operations; derived control and swap markers are folded into the
/// operation of the cell that owns them, so the result depends only on the
/// grid contents and never on the edit history.
#[instrument(
    skip(grid, options),
    fields(num_qubits = grid.num_qubits(), num_columns = grid.num_columns())
)]
pub fn compile_with(grid: &GridModel, options: &CompileOptions) -> CompileResult<CompiledCircuit> {
    let mut circuit = CompiledCircuit::new(grid.num_qubits());

    for (wire, column, node) in grid.cells() {
        if let Some(op) = lower(node, wire, column, options)? {
            debug!(wire, column, op = %op, "Emitted operation");
            circuit.operations.push(op);
        }
    }

    info!(operations = circuit.len(), "Compiled grid");
    Ok(circuit)
}

fn lower(
    node: &GateNode,
    wire: usize,
    column: usize,
    options: &CompileOptions,
) -> CompileResult<Option<Operation>> {
    let controls: Vec<usize> = node.controls().collect();
    let unsupported = || CompileError::UnsupportedControls {
        kind: node.kind,
        wire,
        column,
        controls: controls.len(),
    };

    let op = match node.kind {
        GateKind::Empty | GateKind::Ctrl | GateKind::CtrlLine => return Ok(None),

        GateKind::Identity => Operation::single(OperationKind::I, wire),
        GateKind::S => Operation::single(OperationKind::S, wire),
        GateKind::Sdg => Operation::single(OperationKind::Sdg, wire),
        GateKind::T => Operation::single(OperationKind::T, wire),
        GateKind::Tdg => Operation::single(OperationKind::Tdg, wire),

        GateKind::X | GateKind::Y | GateKind::Z if !node.is_unrotated() => {
            let (plain, controlled) = rotation_kinds(node.kind);
            let op = match (controls.as_slice(), options.controlled_rotation) {
                ([], _) => Operation::single(plain, wire),
                ([ctrl], ControlledRotation::Controlled) => {
                    Operation::controlled(controlled, [*ctrl], wire)
                }
                (_, ControlledRotation::Controlled) => return Err(unsupported()),
                (dropped, ControlledRotation::Discard) => {
                    warn!(
                        wire,
                        column,
                        ?dropped,
                        "Rotated gate compiled without its controls"
                    );
                    Operation::single(plain, wire)
                }
            };
            op.with_angle(node.rotation_angle)
        }

        GateKind::X => match controls.as_slice() {
            [] => Operation::single(OperationKind::X, wire),
            [_] => Operation::controlled(OperationKind::CX, controls.iter().copied(), wire),
            [_, _] => Operation::controlled(OperationKind::CCX, controls.iter().copied(), wire),
            _ => return Err(unsupported()),
        },
        GateKind::Y => single_or_controlled(OperationKind::Y, OperationKind::CY, &controls, wire)
            .ok_or_else(unsupported)?,
        GateKind::Z => single_or_controlled(OperationKind::Z, OperationKind::CZ, &controls, wire)
            .ok_or_else(unsupported)?,
        GateKind::H => single_or_controlled(OperationKind::H, OperationKind::CH, &controls, wire)
            .ok_or_else(unsupported)?,

        GateKind::Swap => {
            let partner = node
                .swap_partner
                .ok_or(CompileError::MissingSwapPartner { wire, column })?;
            single_or_controlled(OperationKind::Swap, OperationKind::CSwap, &controls, wire)
                .ok_or_else(unsupported)?
                .with_partner(partner)
        }
    };

    Ok(Some(op))
}

fn single_or_controlled(
    plain: OperationKind,
    controlled: OperationKind,
    controls: &[usize],
    wire: usize,
) -> Option<Operation> {
    match controls {
        [] => Some(Operation::single(plain, wire)),
        [ctrl] => Some(Operation::controlled(controlled, [*ctrl], wire)),
        _ => None,
    }
}

fn rotation_kinds(kind: GateKind) -> (OperationKind, OperationKind) {
    match kind {
        GateKind::Y => (OperationKind::Ry, OperationKind::CRy),
        GateKind::Z => (OperationKind::Rz, OperationKind::CRz),
        _ => (OperationKind::Rx, OperationKind::CRx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn grid_with(cells: &[(usize, usize, GateNode)]) -> GridModel {
        let mut grid = GridModel::new(3, 3).unwrap();
        for &(wire, column, node) in cells {
            grid.set_node(wire, column, node).unwrap();
        }
        grid
    }

    fn kinds(circuit: &CompiledCircuit) -> Vec<OperationKind> {
        circuit.iter().map(|op| op.kind).collect()
    }

    #[test]
    fn test_empty_grid() {
        let circuit = compile(&GridModel::new(2, 2).unwrap()).unwrap();
        assert!(circuit.is_empty());
        assert_eq!(circuit.num_qubits, 2);
    }

    #[test]
    fn test_column_major_order() {
        let grid = grid_with(&[
            (1, 0, GateNode::new(GateKind::H)),
            (0, 1, GateNode::new(GateKind::T)),
            (0, 0, GateNode::new(GateKind::Z)),
            (2, 1, GateNode::new(GateKind::Identity)),
        ]);
        let circuit = compile(&grid).unwrap();
        assert_eq!(
            kinds(&circuit),
            vec![OperationKind::Z, OperationKind::H, OperationKind::T, OperationKind::I]
        );
        assert_eq!(circuit.operations[1].target, 1);
    }

    #[test]
    fn test_controlled_gates() {
        let grid = grid_with(&[
            (1, 0, GateNode::new(GateKind::X).with_control(0)),
            (2, 1, GateNode::new(GateKind::Y).with_control(1)),
            (0, 2, GateNode::new(GateKind::H).with_control(1)),
        ]);
        let circuit = compile(&grid).unwrap();
        assert_eq!(
            kinds(&circuit),
            vec![OperationKind::CX, OperationKind::CY, OperationKind::CH]
        );
        assert_eq!(circuit.operations[0].qubits(), vec![0, 1]);
        assert_eq!(circuit.operations[2].qubits(), vec![1, 0]);
    }

    #[test]
    fn test_toffoli() {
        let grid = grid_with(&[(
            1,
            0,
            GateNode::new(GateKind::X).with_control(0).with_second_control(2),
        )]);
        let circuit = compile(&grid).unwrap();
        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.operations[0].kind, OperationKind::CCX);
        assert_eq!(circuit.operations[0].qubits(), vec![0, 2, 1]);
    }

    #[test]
    fn test_two_controls_on_z_rejected() {
        let grid = grid_with(&[(
            1,
            0,
            GateNode::new(GateKind::Z).with_control(0).with_second_control(2),
        )]);
        assert_eq!(
            compile(&grid),
            Err(CompileError::UnsupportedControls {
                kind: GateKind::Z,
                wire: 1,
                column: 0,
                controls: 2
            })
        );
    }

    #[test]
    fn test_rotation_kinds() {
        let grid = grid_with(&[
            (0, 0, GateNode::new(GateKind::X).with_rotation(PI)),
            (1, 0, GateNode::new(GateKind::Y).with_rotation(PI / 2.0)),
            (2, 0, GateNode::new(GateKind::Z).with_rotation(PI / 4.0)),
        ]);
        let circuit = compile(&grid).unwrap();
        assert_eq!(
            kinds(&circuit),
            vec![OperationKind::Rx, OperationKind::Ry, OperationKind::Rz]
        );
        assert_eq!(circuit.operations[0].angle, Some(PI));
    }

    #[test]
    fn test_rotated_control_policy() {
        let grid = grid_with(&[(1, 0, GateNode::new(GateKind::X).with_control(0).with_rotation(PI))]);

        let discarded = compile(&grid).unwrap();
        assert_eq!(discarded.operations, vec![Operation::single(OperationKind::Rx, 1).with_angle(PI)]);

        let options = CompileOptions::default().with_controlled_rotation(ControlledRotation::Controlled);
        let kept = compile_with(&grid, &options).unwrap();
        assert_eq!(
            kept.operations,
            vec![Operation::controlled(OperationKind::CRx, [0], 1).with_angle(PI)]
        );
    }

    #[test]
    fn test_swap_emitted_once() {
        let grid = grid_with(&[
            (0, 1, GateNode::new(GateKind::Swap).with_swap_partner(2)),
            (1, 1, GateNode::new(GateKind::CtrlLine)),
            (2, 1, GateNode::empty().with_swap_partner(0)),
        ]);
        let circuit = compile(&grid).unwrap();
        assert_eq!(
            circuit.operations,
            vec![Operation::single(OperationKind::Swap, 0).with_partner(2)]
        );
    }

    #[test]
    fn test_controlled_swap() {
        let grid = grid_with(&[(1, 0, GateNode::new(GateKind::Swap).with_swap_partner(2).with_control(0))]);
        let circuit = compile(&grid).unwrap();
        assert_eq!(circuit.operations[0].kind, OperationKind::CSwap);
        assert_eq!(circuit.operations[0].qubits(), vec![0, 1, 2]);
    }

    #[test]
    fn test_swap_without_partner() {
        let grid = grid_with(&[(0, 2, GateNode::new(GateKind::Swap))]);
        assert_eq!(
            compile(&grid),
            Err(CompileError::MissingSwapPartner { wire: 0, column: 2 })
        );
    }
}
