//! Logical editing actions relayed by a host.

use serde::{Deserialize, Serialize};

use crate::cursor::Direction;
use crate::node::GateKind;

/// Direction for moving a control to another wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlDirection {
    /// Towards wire 0.
    Up,
    /// Towards the last wire.
    Down,
}

/// One discrete request against a [`PlacementEngine`](crate::PlacementEngine).
///
/// Actions that act "here" use the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Step the cursor.
    MoveCursor(Direction),
    /// Place a single-qubit or fixed gate.
    Place(GateKind),
    /// Place a SWAP pair between the cursor wire and `partner`.
    PlaceSwap {
        /// Wire of the second half of the pair.
        partner: usize,
    },
    /// Add a control to the gate under the cursor, or remove it if present.
    AddControl,
    /// Move the control of the gate under the cursor by one wire.
    MoveControl(ControlDirection),
    /// Delete at the cursor.
    Delete,
    /// Delete at an explicit cell.
    DeleteAt {
        /// Target wire.
        wire: usize,
        /// Target column.
        column: usize,
    },
    /// Delete every cell.
    ClearAll,
    /// Add an angle in radians to the gate under the cursor.
    Rotate(f64),
}

impl Action {
    /// Whether the action can change the grid.
    pub fn is_edit(&self) -> bool {
        !matches!(self, Action::MoveCursor(_))
    }
}
