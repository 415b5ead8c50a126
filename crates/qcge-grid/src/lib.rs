//! Quantum Circuit Grid Editor core
//!
//! This crate holds the state behind a grid-based quantum circuit editor:
//! wires as rows, time steps as columns, one [`GateNode`] per cell.
//!
//! # Overview
//!
//! A [`PlacementEngine`] owns a [`GridModel`] and a [`CursorController`] and
//! applies logical [`Action`]s to them. Actions that would break a multi-cell
//! relationship (a gate and its control, a SWAP pair, the control line between
//! them) are refused with a non-fatal [`EditError`] and leave the grid as it
//! was. The grid can be linearized at any time into a [`CompiledCircuit`].
//!
//! Control and swap markers on remote wires are never stored. They are
//! derived on each query from the gate cell that references them, so the gate
//! cell is the single source of truth.
//!
//! # Example: Controlled NOT
//!
//! ```rust
//! use qcge_grid::{Action, Direction, GateKind, OperationKind, PlacementEngine};
//!
//! let mut engine = PlacementEngine::new(2, 3).unwrap();
//! engine.apply(Action::MoveCursor(Direction::Down)).unwrap();
//! engine.apply(Action::Place(GateKind::X)).unwrap();
//! engine.apply(Action::AddControl).unwrap();
//!
//! assert_eq!(engine.displayed_kind(0, 0).unwrap(), GateKind::Ctrl);
//!
//! let circuit = engine.compile().unwrap();
//! assert_eq!(circuit.operations[0].kind, OperationKind::CX);
//! assert_eq!(circuit.operations[0].qubits(), vec![0, 1]);
//! ```
//!
//! # Compiled Gates
//!
//! | Stored kind | Condition | Operation |
//! |-------------|-----------|-----------|
//! | `X`, `Y`, `Z` | no rotation | `X`/`Y`/`Z`, `CX`/`CY`/`CZ`, `CCX` (X only) |
//! | `X`, `Y`, `Z` | rotated | `Rx`/`Ry`/`Rz` (see [`ControlledRotation`]) |
//! | `H` | | `H`, `CH` |
//! | `S`, `SDG`, `T`, `TDG`, `IDENTITY` | | matching fixed gate |
//! | `SWAP` | owning cell | `Swap`, `CSwap` |

pub mod action;
pub mod compiler;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod grid;
pub mod node;
pub mod operation;

pub use action::{Action, ControlDirection};
pub use compiler::{CompileOptions, ControlledRotation, compile, compile_with};
pub use cursor::{CursorController, Direction};
pub use engine::PlacementEngine;
pub use error::{
    CompileError, CompileResult, ControlMoveFailure, EditError, EditResult, GridError, GridResult,
};
pub use grid::GridModel;
pub use node::{ANGLE_EPSILON, GateKind, GateNode, normalize_angle};
pub use operation::{CompiledCircuit, Operation, OperationKind};
