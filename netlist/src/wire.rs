use serde::{Deserialize, Serialize};

use crate::gate::GateId;

/// Index of a wire in its circuit.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub struct WireId(pub usize);

/// A single net of the circuit graph.
///
/// Wires are created once by the builder and are read-only during search;
/// the mutable per-wire state (value, change marks) lives in side tables
/// such as [`WireState`](crate::state::WireState).
#[derive(Clone, Debug)]
pub struct Wire {
    pub name: String,
    /// Levelization depth: 0 for primary inputs, otherwise one more than
    /// the deepest wire feeding the driver.
    pub level: usize,
    pub is_input: bool,
    pub is_output: bool,
    /// The gate driving this wire; `None` for primary inputs.
    pub driver: Option<GateId>,
    /// Gates this wire feeds, including the `Output` pseudo-gate of a PO.
    pub fanout: Vec<GateId>,
}
