use podem_netlist::circuit::Circuit;
use podem_netlist::gate::{Gate, GateKind};
use podem_netlist::logic::Logic;
use podem_netlist::wire::WireId;

use crate::search::SearchState;

/// Maps an internal objective `(wire, value)` to a primary-input
/// assignment by walking a single path backward through the cone of
/// `wire`. The chosen PI is assigned and returned; `None` means no
/// unassigned input remains anywhere along the walk.
///
/// When one controlling input suffices, the walk takes the
/// easiest-to-control unknown input (smallest level); when every input
/// must carry the non-controlling value, the hardest (largest level), so
/// the highest-leverage requirement is settled first.
pub(crate) fn backtrace(
    circuit: &Circuit,
    state: &mut SearchState,
    wire: WireId,
    value: Logic,
) -> Option<WireId> {
    if circuit.wire(wire).is_input {
        state.wires.set_value(wire, value);
        return Some(wire);
    }
    let driver = circuit.wire(wire).driver?;
    let gate = circuit.gate(driver);
    let next_wire = match gate.kind {
        GateKind::Or | GateKind::Nand => {
            if value == Logic::One {
                easiest_control(circuit, state, gate)
            } else {
                hardest_control(circuit, state, gate)
            }
        }
        GateKind::And | GateKind::Nor => {
            if value == Logic::One {
                hardest_control(circuit, state, gate)
            } else {
                easiest_control(circuit, state, gate)
            }
        }
        GateKind::Not | GateKind::Buf => Some(gate.inputs[0]),
        GateKind::Output => None,
    }?;
    let next_value = if gate.kind.inverts() { value.not() } else { value };
    backtrace(circuit, state, next_wire, next_value)
}

/// The unknown input reachable through the fewest levels of logic.
fn easiest_control(circuit: &Circuit, state: &SearchState, gate: &Gate) -> Option<WireId> {
    gate.inputs
        .iter()
        .copied()
        .filter(|&w| state.wires.value(w) == Logic::Unknown)
        .min_by_key(|&w| circuit.wire(w).level)
}

/// The unknown input buried under the most levels of logic.
fn hardest_control(circuit: &Circuit, state: &SearchState, gate: &Gate) -> Option<WireId> {
    gate.inputs
        .iter()
        .copied()
        .filter(|&w| state.wires.value(w) == Logic::Unknown)
        .max_by_key(|&w| circuit.wire(w).level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use podem_netlist::builder::CircuitBuilder;

    /// `z = OR(c, d)` where `c = AND(a, b)` is deeper than the bare PI `d`.
    fn lopsided_or() -> Circuit {
        let mut builder = CircuitBuilder::new();
        for name in ["a", "b", "d"] {
            builder.add_input(name).unwrap();
        }
        builder.add_gate(GateKind::And, "c", &["a", "b"]).unwrap();
        builder.add_gate(GateKind::Or, "z", &["c", "d"]).unwrap();
        builder.mark_output("z").unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_controlling_objective_takes_the_shallow_input() {
        let circuit = lopsided_or();
        let mut state = SearchState::new(&circuit);
        let z = circuit.wire_by_name("z").unwrap();
        let d = circuit.wire_by_name("d").unwrap();
        // One 1 suffices at an OR: the easiest input is the bare PI.
        assert_eq!(backtrace(&circuit, &mut state, z, Logic::One), Some(d));
        assert_eq!(state.wires.value(d), Logic::One);
    }

    #[test]
    fn test_noncontrolling_objective_takes_the_deep_input() {
        let circuit = lopsided_or();
        let mut state = SearchState::new(&circuit);
        let z = circuit.wire_by_name("z").unwrap();
        // All inputs must be 0: start from the hardest, which descends
        // through the AND (objective 0 there takes its easiest leg).
        let a = circuit.wire_by_name("a").unwrap();
        assert_eq!(backtrace(&circuit, &mut state, z, Logic::Zero), Some(a));
        assert_eq!(state.wires.value(a), Logic::Zero);
    }

    #[test]
    fn test_objective_value_flips_through_inverting_gates() {
        let mut builder = CircuitBuilder::new();
        builder.add_input("a").unwrap();
        builder.add_input("b").unwrap();
        builder.add_gate(GateKind::Nand, "n", &["a", "b"]).unwrap();
        builder.add_gate(GateKind::Not, "z", &["n"]).unwrap();
        builder.mark_output("z").unwrap();
        let circuit = builder.build().unwrap();
        let mut state = SearchState::new(&circuit);
        let z = circuit.wire_by_name("z").unwrap();

        // z=1 needs n=0 needs both NAND inputs 1; the walk lands on the
        // hardest (here: the later-declared tie) at value 1.
        let pi = backtrace(&circuit, &mut state, z, Logic::One).unwrap();
        assert_eq!(state.wires.value(pi), Logic::One);
    }

    #[test]
    fn test_no_unknown_input_means_no_assignment() {
        let circuit = lopsided_or();
        let mut state = SearchState::new(&circuit);
        let z = circuit.wire_by_name("z").unwrap();
        for name in ["a", "b", "d"] {
            let w = circuit.wire_by_name(name).unwrap();
            state.wires.set_value(w, Logic::Zero);
        }
        assert_eq!(backtrace(&circuit, &mut state, z, Logic::One), None);
    }
}
