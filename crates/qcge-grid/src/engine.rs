//! The cursor-driven editing state machine.

use tracing::{debug, info, warn};

use crate::action::{Action, ControlDirection};
use crate::compiler::{self, CompileOptions};
use crate::cursor::{CursorController, Direction};
use crate::error::{CompileResult, ControlMoveFailure, EditError, EditResult, GridResult};
use crate::grid::GridModel;
use crate::node::{GateKind, GateNode, normalize_angle};
use crate::operation::CompiledCircuit;

/// One editing session: a grid plus the cursor over it.
///
/// Every action either applies completely or returns a non-fatal
/// [`EditError`] with the grid left as it was. Multi-cell relationships
/// (a gate, its controls, its swap partner and the control line between
/// them) are only ever written here.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementEngine {
    grid: GridModel,
    cursor: CursorController,
}

impl PlacementEngine {
    /// Start a session on an empty `num_qubits x num_columns` grid.
    pub fn new(num_qubits: usize, num_columns: usize) -> GridResult<Self> {
        Ok(Self::from_grid(GridModel::new(num_qubits, num_columns)?))
    }

    /// Start a session on an existing grid, cursor at `(0, 0)`.
    pub fn from_grid(grid: GridModel) -> Self {
        let cursor = CursorController::new(grid.num_qubits(), grid.num_columns());
        Self { grid, cursor }
    }

    /// The grid being edited.
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Give up the session and keep the grid.
    pub fn into_grid(self) -> GridModel {
        self.grid
    }

    /// The cursor.
    pub fn cursor(&self) -> &CursorController {
        &self.cursor
    }

    /// Cursor `(wire, column)`.
    pub fn position(&self) -> (usize, usize) {
        self.cursor.position()
    }

    /// Kind shown at a cell, derived markers included.
    pub fn displayed_kind(&self, wire: usize, column: usize) -> GridResult<GateKind> {
        self.grid.displayed_kind(wire, column)
    }

    /// Node stored at a cell.
    pub fn node_at(&self, wire: usize, column: usize) -> GridResult<GateNode> {
        self.grid.get_node(wire, column)
    }

    /// Compile the current grid with default options.
    pub fn compile(&self) -> CompileResult<CompiledCircuit> {
        compiler::compile(&self.grid)
    }

    /// Compile the current grid.
    pub fn compile_with(&self, options: &CompileOptions) -> CompileResult<CompiledCircuit> {
        compiler::compile_with(&self.grid, options)
    }

    /// Dispatch a logical action.
    pub fn apply(&mut self, action: Action) -> EditResult<()> {
        let result = match action {
            Action::MoveCursor(direction) => {
                self.move_cursor(direction);
                Ok(())
            }
            Action::Place(kind) if kind.is_controllable() => self.place_single_qubit_gate(kind),
            Action::Place(kind) if kind.is_fixed() => self.place_fixed_gate(kind),
            Action::Place(kind) => Err(EditError::NotPlaceable { kind }),
            Action::PlaceSwap { partner } => self.place_swap(partner),
            Action::AddControl => self.add_control(),
            Action::MoveControl(direction) => self.move_control(direction),
            Action::Delete => self.delete(),
            Action::DeleteAt { wire, column } => self.delete_at(wire, column),
            Action::ClearAll => self.clear_all(),
            Action::Rotate(delta) => self.rotate(delta),
        };

        if let Err(err) = &result {
            debug!(?action, %err, "Action rejected");
        }
        result
    }

    /// Step the cursor; clamped at the edges.
    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor.move_by(direction);
    }

    /// Place X, Y, Z or H at the cursor.
    pub fn place_single_qubit_gate(&mut self, kind: GateKind) -> EditResult<()> {
        if !kind.is_controllable() {
            return Err(EditError::NotPlaceable { kind });
        }
        self.place_at_cursor(kind)
    }

    /// Place S, SDG, T, TDG or IDENTITY at the cursor.
    pub fn place_fixed_gate(&mut self, kind: GateKind) -> EditResult<()> {
        if !kind.is_fixed() {
            return Err(EditError::NotPlaceable { kind });
        }
        self.place_at_cursor(kind)
    }

    fn place_at_cursor(&mut self, kind: GateKind) -> EditResult<()> {
        let (wire, column) = self.cursor.position();
        self.require_empty(wire, column)?;
        self.grid.set_node(wire, column, GateNode::new(kind))?;
        debug!(wire, column, %kind, "Placed gate");
        Ok(())
    }

    /// Place a SWAP pair between the cursor wire and `partner`.
    ///
    /// Both ends and every wire between them must be empty. The cursor cell
    /// owns the pair; the partner cell stores only the back reference.
    pub fn place_swap(&mut self, partner: usize) -> EditResult<()> {
        let (wire, column) = self.cursor.position();
        self.require_empty(wire, column)?;

        let invalid = EditError::InvalidSwapPartner {
            wire,
            partner,
            column,
        };
        if partner == wire || partner >= self.grid.num_qubits() {
            return Err(invalid);
        }
        let (lo, hi) = (wire.min(partner), wire.max(partner));
        for w in lo..=hi {
            if w != wire && self.grid.displayed_kind(w, column)? != GateKind::Empty {
                return Err(invalid);
            }
        }

        self.grid.set_node(
            wire,
            column,
            GateNode::new(GateKind::Swap).with_swap_partner(partner),
        )?;
        self.grid
            .set_node(partner, column, GateNode::empty().with_swap_partner(wire))?;
        for w in lo + 1..hi {
            self.grid.set_node(w, column, GateNode::new(GateKind::CtrlLine))?;
        }
        debug!(wire, column, partner, "Placed swap pair");
        Ok(())
    }

    /// Toggle the control of the gate under the cursor.
    ///
    /// With a control present it is removed. Otherwise a control goes on the
    /// wire above, or failing that the wire below; nothing further is tried.
    pub fn add_control(&mut self) -> EditResult<()> {
        let (wire, column) = self.cursor.position();
        let mut node = self.controllable_node(wire, column)?;
        let before = span(&node, wire);

        if let Some(ctrl) = node.first_ctrl.take() {
            self.grid.set_node(wire, column, node)?;
            self.relink(wire, column, before)?;
            debug!(wire, column, ctrl, "Removed control");
            return Ok(());
        }

        let candidates = [wire.checked_sub(1), Some(wire + 1)];
        let mut chosen = None;
        for candidate in candidates.into_iter().flatten() {
            if candidate < self.grid.num_qubits() && self.is_free_for_control(candidate, column)? {
                chosen = Some(candidate);
                break;
            }
        }
        let ctrl = chosen.ok_or(EditError::NoFreeControlWire { wire, column })?;

        self.grid.set_node(ctrl, column, GateNode::empty())?;
        self.grid.set_node(wire, column, node.with_control(ctrl))?;
        self.relink(wire, column, before)?;
        debug!(wire, column, ctrl, "Added control");
        Ok(())
    }

    /// Move the control of the gate under the cursor one wire up or down,
    /// hopping over the gate's own wire.
    pub fn move_control(&mut self, direction: ControlDirection) -> EditResult<()> {
        let (wire, column) = self.cursor.position();
        let node = self.controllable_node(wire, column)?;
        let fail = |reason| EditError::InvalidControlMove {
            wire,
            column,
            reason,
        };
        let ctrl = node.first_ctrl.ok_or(fail(ControlMoveFailure::NoControl))?;

        let step = |from: usize| match direction {
            ControlDirection::Up => from.checked_sub(1),
            ControlDirection::Down => Some(from + 1),
        };
        let candidate = step(ctrl)
            .and_then(|c| if c == wire { step(c) } else { Some(c) })
            .filter(|&c| c < self.grid.num_qubits())
            .ok_or(fail(ControlMoveFailure::OutOfRange))?;

        if !self.is_free_for_control(candidate, column)? {
            let shown = self.grid.displayed_kind(candidate, column)?;
            return Err(fail(ControlMoveFailure::Occupied(shown)));
        }

        let before = span(&node, wire);
        self.grid.set_node(candidate, column, GateNode::empty())?;
        self.grid
            .set_node(wire, column, node.with_control(candidate))?;
        self.relink(wire, column, before)?;
        debug!(wire, column, from = ctrl, to = candidate, "Moved control");
        Ok(())
    }

    /// Delete at the cursor.
    pub fn delete(&mut self) -> EditResult<()> {
        let (wire, column) = self.cursor.position();
        self.delete_at(wire, column)
    }

    /// Delete at a cell.
    ///
    /// A controllable gate, one of its control markers, or a SWAP owner clears
    /// the whole span of that gate. Control lines and the partner half of a
    /// SWAP are left alone. Anything else clears just the cell.
    pub fn delete_at(&mut self, wire: usize, column: usize) -> EditResult<()> {
        let shown = self.grid.displayed_kind(wire, column)?;
        let stored = self.grid.get_node(wire, column)?;

        match shown {
            GateKind::X | GateKind::Y | GateKind::Z | GateKind::H => {
                self.clear_gate(wire, column)?;
            }
            GateKind::Ctrl => match self.grid.find_control_wire(wire, column)? {
                Some(owner) => self.clear_gate(owner, column)?,
                None => self.clear_cell(wire, column)?,
            },
            GateKind::Swap if stored.kind == GateKind::Swap => {
                self.clear_gate(wire, column)?;
            }
            GateKind::Swap | GateKind::CtrlLine => {
                debug!(wire, column, %shown, "Nothing to delete here");
            }
            GateKind::Empty
            | GateKind::Identity
            | GateKind::S
            | GateKind::Sdg
            | GateKind::T
            | GateKind::Tdg => self.clear_cell(wire, column)?,
        }
        Ok(())
    }

    /// Delete every cell, wire by wire.
    pub fn clear_all(&mut self) -> EditResult<()> {
        for wire in 0..self.grid.num_qubits() {
            for column in 0..self.grid.num_columns() {
                self.delete_at(wire, column)?;
            }
        }
        if !self.grid.is_empty() {
            warn!("Orphaned cells survived clearing, resetting grid");
            self.grid.clear();
        }
        info!(
            num_qubits = self.grid.num_qubits(),
            num_columns = self.grid.num_columns(),
            "Cleared grid"
        );
        Ok(())
    }

    /// Add `delta` radians to the X, Y or Z gate under the cursor.
    pub fn rotate(&mut self, delta: f64) -> EditResult<()> {
        if !delta.is_finite() {
            return Err(EditError::InvalidAngle { angle: delta });
        }
        let (wire, column) = self.cursor.position();
        let shown = self.grid.displayed_kind(wire, column)?;
        if !shown.is_rotatable() {
            return Err(EditError::UnsupportedRotationTarget { kind: shown });
        }

        let mut node = self.grid.get_node(wire, column)?;
        node.rotation_angle = normalize_angle(node.rotation_angle + delta);
        self.grid.set_node(wire, column, node)?;
        debug!(wire, column, angle = node.rotation_angle, "Rotated gate");
        Ok(())
    }

    fn require_empty(&self, wire: usize, column: usize) -> EditResult<()> {
        match self.grid.displayed_kind(wire, column)? {
            GateKind::Empty => Ok(()),
            occupied_by => Err(EditError::InvalidPlacement {
                wire,
                column,
                occupied_by,
            }),
        }
    }

    fn controllable_node(&self, wire: usize, column: usize) -> EditResult<GateNode> {
        let shown = self.grid.displayed_kind(wire, column)?;
        if !shown.is_controllable() {
            return Err(EditError::NotControllable { kind: shown });
        }
        Ok(self.grid.get_node(wire, column)?)
    }

    fn is_free_for_control(&self, wire: usize, column: usize) -> GridResult<bool> {
        Ok(matches!(
            self.grid.displayed_kind(wire, column)?,
            GateKind::Empty | GateKind::CtrlLine
        ))
    }

    /// Bring the control line of the gate at `(wire, column)` in line with
    /// its references after they changed from the `before` span.
    fn relink(&mut self, wire: usize, column: usize, before: (usize, usize)) -> GridResult<()> {
        let node = self.grid.get_node(wire, column)?;
        let (lo, hi) = span(&node, wire);
        let interior = |w: usize| lo < w && w < hi;

        for w in before.0..=before.1 {
            if !interior(w) && self.grid.get_node(w, column)?.kind == GateKind::CtrlLine {
                self.grid.set_node(w, column, GateNode::empty())?;
            }
        }
        for w in lo + 1..hi {
            if self.grid.displayed_kind(w, column)? == GateKind::Empty {
                self.grid.set_node(w, column, GateNode::new(GateKind::CtrlLine))?;
            }
        }
        Ok(())
    }

    /// Clear every wire from the gate out to its farthest reference.
    fn clear_gate(&mut self, wire: usize, column: usize) -> GridResult<()> {
        let node = self.grid.get_node(wire, column)?;
        let (lo, hi) = span(&node, wire);
        for w in lo..=hi {
            self.grid.set_node(w, column, GateNode::empty())?;
        }
        debug!(wire, column, from = lo, to = hi, kind = %node.kind, "Deleted gate");
        Ok(())
    }

    fn clear_cell(&mut self, wire: usize, column: usize) -> GridResult<()> {
        self.grid.set_node(wire, column, GateNode::empty())?;
        debug!(wire, column, "Cleared cell");
        Ok(())
    }
}

/// Inclusive wire range covered by a gate and everything it references.
fn span(node: &GateNode, wire: usize) -> (usize, usize) {
    node.controls()
        .chain(node.swap_partner)
        .fold((wire, wire), |(lo, hi), w| (lo.min(w), hi.max(w)))
}
