use podem_netlist::circuit::Circuit;
use podem_netlist::eval::evaluate;
use podem_netlist::gate::GateKind;
use podem_netlist::logic::Logic;
use podem_netlist::wire::WireId;

use crate::fault::{Fault, FaultSite, StuckAt};
use crate::search::SearchState;

/// Outcome of a backward implication pass.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum Implication {
    /// At least one PI was assigned without contradiction.
    ReachedPi,
    /// Nothing was uniquely determined; the search loop takes over.
    NoPiReached,
    /// The requirement contradicts an existing assignment.
    Conflict,
}

/// Pushes a value requirement backward until it either assigns PIs or
/// stops being uniquely determined. Only PIs are ever written; internal
/// wires get their values from simulation.
pub(crate) fn backward_imply(
    circuit: &Circuit,
    state: &mut SearchState,
    wire: WireId,
    desired: Logic,
) -> Implication {
    if circuit.wire(wire).is_input {
        let current = state.wires.value(wire);
        if current != Logic::Unknown && current != desired {
            return Implication::Conflict;
        }
        state.wires.set_value(wire, desired);
        state.wires.set_changed(wire);
        return Implication::ReachedPi;
    }
    let Some(driver) = circuit.wire(wire).driver else {
        return Implication::NoPiReached;
    };
    let gate = circuit.gate(driver);
    let forced: Vec<(WireId, Logic)> = match (gate.kind, desired) {
        (GateKind::Not, _) => vec![(gate.inputs[0], desired.not())],
        (GateKind::Buf, _) => vec![(gate.inputs[0], desired)],
        // The output sits at the gate's inversion of a non-controlled
        // input set: every input is pinned.
        (GateKind::And, Logic::One) | (GateKind::Nand, Logic::Zero) => {
            gate.inputs.iter().map(|&w| (w, Logic::One)).collect()
        }
        (GateKind::Or, Logic::Zero) | (GateKind::Nor, Logic::One) => {
            gate.inputs.iter().map(|&w| (w, Logic::Zero)).collect()
        }
        // Any other combination is satisfiable by more than one input
        // pattern; nothing is implied.
        _ => Vec::new(),
    };
    let mut outcome = Implication::NoPiReached;
    for (input, value) in forced {
        match backward_imply(circuit, state, input, value) {
            Implication::ReachedPi => outcome = Implication::ReachedPi,
            Implication::Conflict => return Implication::Conflict,
            Implication::NoPiReached => {}
        }
    }
    outcome
}

/// The implications forced by the fault before any search decision: side
/// inputs of the faulty gate at their non-controlling values, then the
/// faulty wire at its excitation value.
pub(crate) fn set_uniquely_implied_value(
    circuit: &Circuit,
    state: &mut SearchState,
    fault: &Fault,
) -> Implication {
    let gate = circuit.gate(fault.gate);
    let wire = fault.site_wire(circuit);
    if matches!(fault.site, FaultSite::Input(_)) {
        match gate.kind {
            // Single-input gates pin nothing here; excitation is left to
            // the objective loop.
            GateKind::Not | GateKind::Buf => return Implication::NoPiReached,
            _ => {
                if let Some(side_value) = gate.kind.noncontrolling_value() {
                    for &side in &gate.inputs {
                        if side == wire {
                            continue;
                        }
                        if backward_imply(circuit, state, side, side_value)
                            == Implication::Conflict
                        {
                            return Implication::Conflict;
                        }
                    }
                }
            }
        }
    }
    match backward_imply(circuit, state, wire, fault.stuck.excitation()) {
        Implication::Conflict => Implication::Conflict,
        _ => Implication::ReachedPi,
    }
}

/// Injects D or Dbar at the fault site once the good-machine value opposes
/// the stuck value. Returns the wire the effect appears on, to be
/// forward-implied; `None` means the effect is not (yet) visible past the
/// site.
pub(crate) fn fault_evaluate(
    circuit: &Circuit,
    state: &mut SearchState,
    fault: &Fault,
) -> Option<WireId> {
    let gate = circuit.gate(fault.gate);
    match fault.site {
        FaultSite::Output => {
            let out = gate.output?;
            let value = state.wires.value(out);
            if value == Logic::Unknown {
                return None;
            }
            match (fault.stuck, value) {
                (StuckAt::Stuck0, Logic::One) => state.wires.set_value(out, Logic::D),
                (StuckAt::Stuck1, Logic::Zero) => state.wires.set_value(out, Logic::Dbar),
                _ => {}
            }
            Some(out)
        }
        FaultSite::Input(pin) => {
            let input = gate.inputs[pin];
            let saved = state.wires.value(input);
            if saved == Logic::Unknown {
                return None;
            }
            match (fault.stuck, saved) {
                (StuckAt::Stuck0, Logic::One) => state.wires.set_value(input, Logic::D),
                (StuckAt::Stuck1, Logic::Zero) => state.wires.set_value(input, Logic::Dbar),
                _ => {}
            }
            if gate.kind == GateKind::Output {
                // The faulted wire is itself the observation point; the
                // injected value stays put.
                return None;
            }
            evaluate(circuit, fault.gate, &mut state.wires);
            state.wires.set_value(input, saved);
            let out = gate.output?;
            if state.wires.is_changed(out) {
                state.wires.clear_changed(out);
                Some(out)
            } else {
                None
            }
        }
    }
}

/// Depth-first propagation of a freshly changed wire through its fanout,
/// re-evaluating each gate and descending wherever the output moved.
pub(crate) fn forward_imply(circuit: &Circuit, state: &mut SearchState, wire: WireId) {
    for &gid in &circuit.wire(wire).fanout {
        let gate = circuit.gate(gid);
        if gate.kind == GateKind::Output {
            continue;
        }
        evaluate(circuit, gid, &mut state.wires);
        let Some(out) = gate.output else {
            continue;
        };
        if state.wires.is_changed(out) {
            forward_imply(circuit, state, out);
        }
        state.wires.clear_changed(out);
    }
}

/// Whether some primary output currently observes the fault effect.
pub(crate) fn check_test(circuit: &Circuit, state: &SearchState) -> bool {
    circuit
        .outputs
        .iter()
        .any(|&po| state.wires.value(po).is_fault_effect())
}
