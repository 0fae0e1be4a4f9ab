use crate::gate::{Gate, GateId};
use crate::wire::{Wire, WireId};

/// An immutable, levelized gate-level netlist.
///
/// All structure is index-based; search-time mutation happens in side
/// tables keyed by the same indices, never in the graph itself.
#[derive(Clone, Debug)]
pub struct Circuit {
    pub wires: Vec<Wire>,
    pub gates: Vec<Gate>,
    /// Primary inputs, in canonical (declaration) order.
    pub inputs: Vec<WireId>,
    /// Primary outputs, in canonical order.
    pub outputs: Vec<WireId>,
    /// Every wire, sorted by ascending level. The simulator scans this
    /// forward; the propagation-target search scans it backward.
    pub sorted: Vec<WireId>,
}

impl Circuit {
    pub fn wire(&self, id: WireId) -> &Wire {
        &self.wires[id.0]
    }

    pub fn gate(&self, id: GateId) -> &Gate {
        &self.gates[id.0]
    }

    pub fn wire_by_name(&self, name: &str) -> Option<WireId> {
        self.wires.iter().position(|w| w.name == name).map(WireId)
    }
}
