//! `OpenQASM` Emitter for compiled grid circuits
//!
//! Turns the operation list produced by `qcge_grid::compile` into `OpenQASM`
//! source, either 3.0 (`stdgates.inc`) or 2.0 (`qelib1.inc`). Every
//! operation kind the grid compiler produces maps to a standard library gate.
//!
//! # Example
//!
//! ```rust
//! use qcge_grid::{Action, Direction, GateKind, PlacementEngine};
//! use qcge_qasm::emit;
//!
//! let mut engine = PlacementEngine::new(2, 2).unwrap();
//! engine.apply(Action::Place(GateKind::H)).unwrap();
//! engine.apply(Action::MoveCursor(Direction::Right)).unwrap();
//! engine.apply(Action::MoveCursor(Direction::Down)).unwrap();
//! engine.apply(Action::Place(GateKind::X)).unwrap();
//! engine.apply(Action::AddControl).unwrap();
//!
//! let qasm = emit(&engine.compile().unwrap()).unwrap();
//! assert!(qasm.contains("qubit[2] q;"));
//! assert!(qasm.contains("h q[0];"));
//! assert!(qasm.contains("cx q[0], q[1];"));
//! ```

pub mod emitter;
pub mod error;

pub use emitter::{emit, emit_qasm2};
pub use error::{EmitError, EmitResult};
