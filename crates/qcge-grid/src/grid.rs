//! The `wires x columns` matrix of gate nodes.

use std::fmt;

use ndarray::{Array2, ArrayView1};

use crate::compiler;
use crate::error::{CompileResult, GridError, GridResult};
use crate::node::{GateKind, GateNode};
use crate::operation::CompiledCircuit;

/// A passive store of [`GateNode`]s indexed by `(wire, column)`.
///
/// The grid performs no validation of what is written into it; the
/// placement engine keeps multi-cell relationships consistent. Control and
/// swap markers on remote wires are derived on every query from the gate
/// cell that references them.
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel {
    nodes: Array2<GateNode>,
}

impl GridModel {
    /// Create an all-empty grid.
    pub fn new(num_qubits: usize, num_columns: usize) -> GridResult<Self> {
        if num_qubits == 0 || num_columns == 0 {
            return Err(GridError::InvalidDimensions {
                num_qubits,
                num_columns,
            });
        }
        Ok(Self {
            nodes: Array2::from_elem((num_qubits, num_columns), GateNode::empty()),
        })
    }

    /// Number of wires (rows).
    pub fn num_qubits(&self) -> usize {
        self.nodes.nrows()
    }

    /// Number of columns (time steps).
    pub fn num_columns(&self) -> usize {
        self.nodes.ncols()
    }

    /// Check that `(wire, column)` lies inside the grid.
    pub fn check(&self, wire: usize, column: usize) -> GridResult<()> {
        if wire < self.num_qubits() && column < self.num_columns() {
            Ok(())
        } else {
            Err(GridError::OutOfRange {
                wire,
                column,
                num_qubits: self.num_qubits(),
                num_columns: self.num_columns(),
            })
        }
    }

    /// Overwrite a cell.
    pub fn set_node(&mut self, wire: usize, column: usize, node: GateNode) -> GridResult<()> {
        self.check(wire, column)?;
        self.nodes[[wire, column]] = node;
        Ok(())
    }

    /// Read the node stored in a cell.
    pub fn get_node(&self, wire: usize, column: usize) -> GridResult<GateNode> {
        self.check(wire, column)?;
        Ok(self.nodes[[wire, column]])
    }

    /// The kind shown at a cell.
    ///
    /// A stored non-empty kind wins. Otherwise the rest of the column is
    /// scanned: a gate naming this wire as a control makes it `Ctrl`, a gate
    /// naming it as swap partner makes it `Swap`.
    pub fn displayed_kind(&self, wire: usize, column: usize) -> GridResult<GateKind> {
        let node = self.get_node(wire, column)?;
        if !node.is_empty() {
            return Ok(node.kind);
        }

        let others = || {
            self.nodes
                .column(column)
                .into_iter()
                .enumerate()
                .filter(move |(index, _)| *index != wire)
                .map(|(_, other)| other)
        };

        if others().any(|other| other.is_controlled_by(wire)) {
            Ok(GateKind::Ctrl)
        } else if others().any(|other| other.swap_partner == Some(wire)) {
            Ok(GateKind::Swap)
        } else {
            Ok(GateKind::Empty)
        }
    }

    /// The wire of the gate that uses `control_wire` as a control, if any.
    ///
    /// Returns the lowest such wire.
    pub fn find_control_wire(&self, control_wire: usize, column: usize) -> GridResult<Option<usize>> {
        self.check(control_wire, column)?;
        Ok(self
            .nodes
            .column(column)
            .iter()
            .enumerate()
            .find(|(index, node)| *index != control_wire && node.is_controlled_by(control_wire))
            .map(|(index, _)| index))
    }

    /// Read-only view of one column, indexed by wire.
    pub fn column(&self, column: usize) -> GridResult<ArrayView1<'_, GateNode>> {
        self.check(0, column)?;
        Ok(self.nodes.column(column))
    }

    /// Stored cells in compile order: column-major, wires ascending.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &GateNode)> + '_ {
        (0..self.num_columns()).flat_map(move |column| {
            self.nodes
                .column(column)
                .into_iter()
                .enumerate()
                .map(move |(wire, node)| (wire, column, node))
        })
    }

    /// Whether every stored cell is a plain empty node.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|node| *node == GateNode::empty())
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.nodes.fill(GateNode::empty());
    }

    /// Linearize the grid into an operation list with default options.
    pub fn compile(&self) -> CompileResult<CompiledCircuit> {
        compiler::compile(self)
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CircuitGridModel:")?;
        for wire in 0..self.num_qubits() {
            let row = (0..self.num_columns())
                .map(|column| {
                    self.displayed_kind(wire, column)
                        .map_or("?", GateKind::name)
                })
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
