use crate::circuit::Circuit;
use crate::logic::Logic;
use crate::wire::WireId;

/// Mutable per-wire search state, kept in side tables so the circuit graph
/// itself stays immutable while values and change marks churn.
#[derive(Clone, Debug)]
pub struct WireState {
    values: Vec<Logic>,
    changed: Vec<bool>,
}

impl WireState {
    pub fn new(circuit: &Circuit) -> Self {
        Self {
            values: vec![Logic::Unknown; circuit.wires.len()],
            changed: vec![false; circuit.wires.len()],
        }
    }

    /// Returns every wire to `Unknown` with no pending change marks.
    pub fn reset(&mut self) {
        self.values.fill(Logic::Unknown);
        self.changed.fill(false);
    }

    pub fn value(&self, wire: WireId) -> Logic {
        self.values[wire.0]
    }

    /// Stores a value without touching the change mark.
    pub fn set_value(&mut self, wire: WireId, value: Logic) {
        self.values[wire.0] = value;
    }

    /// Stores a value and marks the wire changed iff it actually moved.
    pub fn update(&mut self, wire: WireId, value: Logic) {
        if self.values[wire.0] != value {
            self.values[wire.0] = value;
            self.changed[wire.0] = true;
        }
    }

    pub fn is_changed(&self, wire: WireId) -> bool {
        self.changed[wire.0]
    }

    pub fn set_changed(&mut self, wire: WireId) {
        self.changed[wire.0] = true;
    }

    pub fn clear_changed(&mut self, wire: WireId) {
        self.changed[wire.0] = false;
    }
}
