use log::trace;

use podem_netlist::circuit::Circuit;
use podem_netlist::gate::{GateId, GateKind};
use podem_netlist::logic::Logic;
use podem_netlist::wire::WireId;

use crate::backtrace::backtrace;
use crate::fault::{Fault, FaultSite};
use crate::search::SearchState;
use crate::xpath::has_unknown_path;

/// Picks the next objective for `fault` and backtraces it to a PI
/// assignment. `None` is a local dead end: the current decisions cannot
/// be extended into a test and the driver must backtrack.
pub(crate) fn next_assignment(
    circuit: &Circuit,
    state: &mut SearchState,
    fault: &Fault,
) -> Option<WireId> {
    let (wire, value) = next_objective(circuit, state, fault)?;
    trace!(
        "objective: {} = {}",
        circuit.wire(wire).name,
        value
    );
    backtrace(circuit, state, wire, value)
}

fn next_objective(
    circuit: &Circuit,
    state: &mut SearchState,
    fault: &Fault,
) -> Option<(WireId, Logic)> {
    let gate = circuit.gate(fault.gate);

    // A fault on the observation pin of a PO: excite the wire directly,
    // or give up if something already pinned it.
    if gate.kind == GateKind::Output {
        let po = gate.inputs[0];
        return (state.wires.value(po) == Logic::Unknown)
            .then(|| (po, fault.stuck.excitation()));
    }

    let out = gate.output?;
    let out_value = state.wires.value(out);

    if out_value != Logic::Unknown {
        // The fault effect must still be alive at the gate output.
        if !out_value.is_fault_effect() {
            return None;
        }
        let target = find_propagate_gate(circuit, state, circuit.wire(out).level)?;
        let target_gate = circuit.gate(target);
        let value = objective_through(target_gate.kind)?;
        Some((target_gate.output?, value))
    } else {
        if !has_unknown_path(circuit, state, out) {
            return None;
        }
        match fault.site {
            FaultSite::Output => Some((out, fault.stuck.excitation())),
            FaultSite::Input(pin) => {
                let faulted = gate.inputs[pin];
                if state.wires.value(faulted) != Logic::Unknown {
                    // The faulted input is pinned; steer the remaining
                    // side inputs so it dominates the gate.
                    Some((out, objective_through(gate.kind)?))
                } else {
                    Some((faulted, fault.stuck.excitation()))
                }
            }
        }
    }
}

/// The output objective that drives a gate's unassigned inputs to their
/// non-controlling values under backtrace. Single-input gates make no
/// propagation choice; the dead end is reported to the caller.
const fn objective_through(kind: GateKind) -> Option<Logic> {
    match kind {
        GateKind::And | GateKind::Nor => Some(Logic::One),
        GateKind::Or | GateKind::Nand => Some(Logic::Zero),
        _ => None,
    }
}

/// Scans the wire list from the deepest level down toward `level` (the
/// faulty gate output's own) for a D-frontier gate: marked, output still
/// unknown, some input carrying a fault effect, and an X-path onward to a
/// PO. Deeper wires are checked first, so the winner is the candidate
/// nearest the outputs.
fn find_propagate_gate(
    circuit: &Circuit,
    state: &mut SearchState,
    level: usize,
) -> Option<GateId> {
    for index in (0..circuit.sorted.len()).rev() {
        let wid = circuit.sorted[index];
        let wire = circuit.wire(wid);
        if wire.level == level {
            return None;
        }
        let Some(driver) = wire.driver else {
            continue;
        };
        if state.wires.value(wid) != Logic::Unknown || !state.marked[driver.0] {
            continue;
        }
        let on_frontier = circuit
            .gate(driver)
            .inputs
            .iter()
            .any(|&w| state.wires.value(w).is_fault_effect());
        if on_frontier && has_unknown_path(circuit, state, wid) {
            return Some(driver);
        }
    }
    None
}
