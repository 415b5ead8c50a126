//! Error types for the grid crate.

use crate::node::GateKind;
use thiserror::Error;

/// Caller contract violations on the grid itself.
///
/// These are programming errors by the host, not user mistakes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GridError {
    /// A grid needs at least one wire and one column.
    #[error("Grid dimensions must be at least 1x1, got {num_qubits}x{num_columns}")]
    InvalidDimensions {
        /// Requested number of wires.
        num_qubits: usize,
        /// Requested number of columns.
        num_columns: usize,
    },

    /// A coordinate outside the grid.
    #[error(
        "Cell (wire {wire}, column {column}) is outside the {num_qubits}x{num_columns} grid"
    )]
    OutOfRange {
        /// Requested wire.
        wire: usize,
        /// Requested column.
        column: usize,
        /// Number of wires in the grid.
        num_qubits: usize,
        /// Number of columns in the grid.
        num_columns: usize,
    },
}

/// Why a control could not be moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMoveFailure {
    /// The gate has no control to move.
    NoControl,
    /// The candidate wire falls off the grid.
    OutOfRange,
    /// The candidate wire is taken.
    Occupied(GateKind),
}

impl std::fmt::Display for ControlMoveFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlMoveFailure::NoControl => write!(f, "gate has no control"),
            ControlMoveFailure::OutOfRange => write!(f, "next wire is off the grid"),
            ControlMoveFailure::Occupied(kind) => write!(f, "next wire holds {kind}"),
        }
    }
}

/// Outcome of an editing action that did not go through.
///
/// Every variant except [`EditError::Grid`] leaves the grid untouched.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EditError {
    /// The target cell is already occupied.
    #[error("Cannot place a gate at (wire {wire}, column {column}): cell shows {occupied_by}")]
    InvalidPlacement {
        /// Target wire.
        wire: usize,
        /// Target column.
        column: usize,
        /// What the cell currently displays.
        occupied_by: GateKind,
    },

    /// Neither neighbouring wire can take a control.
    #[error("No free adjacent wire for a control at (wire {wire}, column {column})")]
    NoFreeControlWire {
        /// Gate wire.
        wire: usize,
        /// Gate column.
        column: usize,
    },

    /// The control could not be moved.
    #[error("Cannot move control of gate at (wire {wire}, column {column}): {reason}")]
    InvalidControlMove {
        /// Gate wire.
        wire: usize,
        /// Gate column.
        column: usize,
        /// What blocked the move.
        reason: ControlMoveFailure,
    },

    /// Rotation applies to X, Y and Z only.
    #[error("Gate {kind} does not support rotation")]
    UnsupportedRotationTarget {
        /// Kind displayed at the cursor.
        kind: GateKind,
    },

    /// The kind has no placement action.
    #[error("Gate {kind} cannot be placed directly")]
    NotPlaceable {
        /// Requested kind.
        kind: GateKind,
    },

    /// Control actions apply to X, Y, Z and H only.
    #[error("Gate {kind} cannot carry a control")]
    NotControllable {
        /// Kind displayed at the cursor.
        kind: GateKind,
    },

    /// The requested swap partner is unusable.
    #[error("Cannot pair wire {wire} with wire {partner} for SWAP in column {column}")]
    InvalidSwapPartner {
        /// Owning wire.
        wire: usize,
        /// Requested partner wire.
        partner: usize,
        /// Column of the pair.
        column: usize,
    },

    /// Rotation deltas must be finite.
    #[error("Rotation delta {angle} is not a finite angle")]
    InvalidAngle {
        /// Requested delta.
        angle: f64,
    },

    /// Caller contract violation on the grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl EditError {
    /// Whether this is a programming error rather than a rejected action.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EditError::Grid(_))
    }
}

/// Errors while linearizing a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A stored control combination with no matching operation.
    #[error("Gate {kind} at (wire {wire}, column {column}) cannot take {controls} controls")]
    UnsupportedControls {
        /// Stored kind.
        kind: GateKind,
        /// Gate wire.
        wire: usize,
        /// Gate column.
        column: usize,
        /// Number of controls set.
        controls: usize,
    },

    /// A stored SWAP without a partner.
    #[error("SWAP at (wire {wire}, column {column}) has no partner")]
    MissingSwapPartner {
        /// Gate wire.
        wire: usize,
        /// Gate column.
        column: usize,
    },
}

/// Result type for grid access.
pub type GridResult<T> = Result<T, GridError>;

/// Result type for editing actions.
pub type EditResult<T> = Result<T, EditError>;

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
