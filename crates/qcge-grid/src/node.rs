//! Per-cell gate descriptors.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

/// Angles this close to `0` or `2π` collapse to exactly `0`.
pub const ANGLE_EPSILON: f64 = 1e-9;

/// The kind of gate held by (or displayed at) a grid cell.
///
/// `Ctrl` is only ever produced by derivation. `CtrlLine` is stored as a
/// placeholder on wires between a gate and its control or swap partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GateKind {
    /// Nothing at this cell.
    #[default]
    Empty,
    /// Identity gate.
    Identity,
    /// Pauli-X, or RX when rotated.
    X,
    /// Pauli-Y, or RY when rotated.
    Y,
    /// Pauli-Z, or RZ when rotated.
    Z,
    /// S gate.
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate.
    T,
    /// T-dagger gate.
    Tdg,
    /// Hadamard gate.
    H,
    /// One half of a SWAP pair.
    Swap,
    /// Control marker for a gate on another wire.
    Ctrl,
    /// Vertical line between a gate and its control or swap partner.
    CtrlLine,
}

impl GateKind {
    /// Short upper-case name, as shown in grid dumps.
    pub fn name(self) -> &'static str {
        match self {
            GateKind::Empty => "EMPTY",
            GateKind::Identity => "IDENTITY",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::S => "S",
            GateKind::Sdg => "SDG",
            GateKind::T => "T",
            GateKind::Tdg => "TDG",
            GateKind::H => "H",
            GateKind::Swap => "SWAP",
            GateKind::Ctrl => "CTRL",
            GateKind::CtrlLine => "CTRL_LINE",
        }
    }

    /// Gates that can carry a control wire (X, Y, Z, H).
    pub fn is_controllable(self) -> bool {
        match self {
            GateKind::X | GateKind::Y | GateKind::Z | GateKind::H => true,
            GateKind::Empty
            | GateKind::Identity
            | GateKind::S
            | GateKind::Sdg
            | GateKind::T
            | GateKind::Tdg
            | GateKind::Swap
            | GateKind::Ctrl
            | GateKind::CtrlLine => false,
        }
    }

    /// Gates that accumulate a rotation angle (X, Y, Z).
    pub fn is_rotatable(self) -> bool {
        match self {
            GateKind::X | GateKind::Y | GateKind::Z => true,
            GateKind::Empty
            | GateKind::Identity
            | GateKind::S
            | GateKind::Sdg
            | GateKind::T
            | GateKind::Tdg
            | GateKind::H
            | GateKind::Swap
            | GateKind::Ctrl
            | GateKind::CtrlLine => false,
        }
    }

    /// Gates that never carry rotation or controls (S, SDG, T, TDG, IDENTITY).
    pub fn is_fixed(self) -> bool {
        match self {
            GateKind::Identity | GateKind::S | GateKind::Sdg | GateKind::T | GateKind::Tdg => true,
            GateKind::Empty
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::H
            | GateKind::Swap
            | GateKind::Ctrl
            | GateKind::CtrlLine => false,
        }
    }

    /// Marker kinds that only exist to draw multi-wire gates.
    pub fn is_marker(self) -> bool {
        matches!(self, GateKind::Ctrl | GateKind::CtrlLine)
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The descriptor stored in one grid cell.
///
/// Control and swap fields are outgoing references: the wire they name holds
/// no node of its own and displays `Ctrl`/`Swap` by derivation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GateNode {
    /// What gate is at this cell.
    pub kind: GateKind,
    /// Accumulated rotation in radians, kept in `[0, 2π)`.
    #[serde(default)]
    pub rotation_angle: f64,
    /// Wire of the first control, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_ctrl: Option<usize>,
    /// Wire of the second control, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_ctrl: Option<usize>,
    /// Wire of the swap partner, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_partner: Option<usize>,
}

impl GateNode {
    /// Create a node of the given kind with no rotation and no references.
    pub fn new(kind: GateKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// An empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the rotation angle (normalized into `[0, 2π)`).
    #[must_use]
    pub fn with_rotation(mut self, angle: f64) -> Self {
        self.rotation_angle = normalize_angle(angle);
        self
    }

    /// Set the first control wire.
    #[must_use]
    pub fn with_control(mut self, wire: usize) -> Self {
        self.first_ctrl = Some(wire);
        self
    }

    /// Set the second control wire.
    #[must_use]
    pub fn with_second_control(mut self, wire: usize) -> Self {
        self.second_ctrl = Some(wire);
        self
    }

    /// Set the swap partner wire.
    #[must_use]
    pub fn with_swap_partner(mut self, wire: usize) -> Self {
        self.swap_partner = Some(wire);
        self
    }

    /// Whether the cell stores no gate.
    pub fn is_empty(&self) -> bool {
        self.kind == GateKind::Empty
    }

    /// Whether the rotation angle is exactly zero.
    pub fn is_unrotated(&self) -> bool {
        self.rotation_angle == 0.0
    }

    /// Whether this node references `wire` as one of its controls.
    pub fn is_controlled_by(&self, wire: usize) -> bool {
        self.first_ctrl == Some(wire) || self.second_ctrl == Some(wire)
    }

    /// Control wires in `first, second` order.
    pub fn controls(&self) -> impl Iterator<Item = usize> {
        self.first_ctrl.into_iter().chain(self.second_ctrl)
    }
}

impl fmt::Display for GateNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type: {}", self.kind)?;
        if !self.is_unrotated() {
            write!(f, ", rotation_angle: {:.4}", self.rotation_angle)?;
        }
        if let Some(wire) = self.first_ctrl {
            write!(f, ", ctrl_a: {wire}")?;
        }
        if let Some(wire) = self.second_ctrl {
            write!(f, ", ctrl_b: {wire}")?;
        }
        if let Some(wire) = self.swap_partner {
            write!(f, ", swap: {wire}")?;
        }
        Ok(())
    }
}

/// Reduce an angle into `[0, 2π)`, snapping values within
/// [`ANGLE_EPSILON`] of either end to exactly `0`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped < ANGLE_EPSILON || TAU - wrapped < ANGLE_EPSILON {
        0.0
    } else {
        wrapped
    }
}
