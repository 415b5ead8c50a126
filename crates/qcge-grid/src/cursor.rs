//! Cursor position over the grid.

use serde::{Deserialize, Serialize};

/// A one-step cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
    /// Towards wire 0.
    Up,
    /// Towards the last wire.
    Down,
}

/// The current `(wire, column)` selection, clamped to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorController {
    wire: usize,
    column: usize,
    num_qubits: usize,
    num_columns: usize,
}

impl CursorController {
    /// A cursor at `(0, 0)` over a `num_qubits x num_columns` grid.
    pub fn new(num_qubits: usize, num_columns: usize) -> Self {
        Self {
            wire: 0,
            column: 0,
            num_qubits,
            num_columns,
        }
    }

    /// Step once in `direction`. Stepping off an edge does nothing.
    pub fn move_by(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.column = self.column.saturating_sub(1),
            Direction::Right if self.column + 1 < self.num_columns => self.column += 1,
            Direction::Up => self.wire = self.wire.saturating_sub(1),
            Direction::Down if self.wire + 1 < self.num_qubits => self.wire += 1,
            Direction::Right | Direction::Down => {}
        }
    }

    /// Current `(wire, column)`.
    pub fn position(&self) -> (usize, usize) {
        (self.wire, self.column)
    }

    /// Current wire.
    pub fn wire(&self) -> usize {
        self.wire
    }

    /// Current column.
    pub fn column(&self) -> usize {
        self.column
    }
}
