use podem_netlist::circuit::Circuit;
use podem_netlist::gate::GateId;

use crate::search::SearchState;

/// Marks the transitive fanout of `gate`, up to the primary outputs, as
/// the propagation cone of the current fault. An already-marked gate
/// short-circuits the walk, so remarking is idempotent.
pub(crate) fn mark_cone(circuit: &Circuit, state: &mut SearchState, gate: GateId) {
    if state.marked[gate.0] {
        return;
    }
    state.marked[gate.0] = true;
    if let Some(out) = circuit.gate(gate).output {
        for &next in &circuit.wire(out).fanout {
            mark_cone(circuit, state, next);
        }
    }
}

/// Clears the marks [`mark_cone`] set, following the same walk.
pub(crate) fn unmark_cone(circuit: &Circuit, state: &mut SearchState, gate: GateId) {
    if !state.marked[gate.0] {
        return;
    }
    state.marked[gate.0] = false;
    if let Some(out) = circuit.gate(gate).output {
        for &next in &circuit.wire(out).fanout {
            unmark_cone(circuit, state, next);
        }
    }
}
