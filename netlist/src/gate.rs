use serde::{Deserialize, Serialize};

use crate::logic::Logic;
use crate::wire::WireId;

/// Index of a gate in its circuit.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct GateId(pub usize);

/// Gate types of the lowered netlist.
///
/// `Output` is the pseudo-gate marking a primary output: it consumes one
/// wire and drives none, so the observation point has a gate to hang
/// faults on just like any internal pin.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum GateKind {
    And,
    Or,
    Nand,
    Nor,
    Not,
    Buf,
    Output,
}

impl GateKind {
    /// The input value that alone determines the output, if there is one.
    pub const fn controlling_value(self) -> Option<Logic> {
        match self {
            GateKind::And | GateKind::Nand => Some(Logic::Zero),
            GateKind::Or | GateKind::Nor => Some(Logic::One),
            _ => None,
        }
    }

    /// The value a side input must take so it does not mask the others.
    pub const fn noncontrolling_value(self) -> Option<Logic> {
        match self {
            GateKind::And | GateKind::Nand => Some(Logic::One),
            GateKind::Or | GateKind::Nor => Some(Logic::Zero),
            _ => None,
        }
    }

    /// Whether the gate inverts on the way through.
    pub const fn inverts(self) -> bool {
        matches!(self, GateKind::Nand | GateKind::Nor | GateKind::Not)
    }
}

/// A gate instance. Input order is significant: stuck-at faults address
/// gate inputs by position.
#[derive(Clone, Debug)]
pub struct Gate {
    pub kind: GateKind,
    pub inputs: Vec<WireId>,
    /// `None` exactly for `Output` pseudo-gates.
    pub output: Option<WireId>,
}
