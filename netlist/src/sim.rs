use crate::circuit::Circuit;
use crate::eval::evaluate;
use crate::gate::GateKind;
use crate::state::WireState;

/// One full-circuit pass: consumes every pending change mark in ascending
/// level order, re-evaluating the fanout of each changed wire. Because the
/// scan is levelized, a single pass settles the whole circuit.
pub fn simulate(circuit: &Circuit, state: &mut WireState) {
    for &wire in &circuit.sorted {
        if !state.is_changed(wire) {
            continue;
        }
        state.clear_changed(wire);
        for &gate in &circuit.wire(wire).fanout {
            if circuit.gate(gate).kind != GateKind::Output {
                evaluate(circuit, gate, state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CircuitBuilder;
    use crate::gate::GateKind;
    use crate::logic::Logic;
    use crate::wire::WireId;

    fn mux_like() -> Circuit {
        let mut builder = CircuitBuilder::new();
        builder.add_input("a").unwrap();
        builder.add_input("b").unwrap();
        builder.add_input("s").unwrap();
        builder.add_gate(GateKind::Not, "ns", &["s"]).unwrap();
        builder.add_gate(GateKind::And, "p", &["a", "ns"]).unwrap();
        builder.add_gate(GateKind::And, "q", &["b", "s"]).unwrap();
        builder.add_gate(GateKind::Or, "z", &["p", "q"]).unwrap();
        builder.mark_output("z").unwrap();
        builder.build().unwrap()
    }

    fn drive(circuit: &Circuit, state: &mut WireState, name: &str, value: Logic) {
        let id = circuit.wire_by_name(name).unwrap();
        state.set_value(id, value);
        state.set_changed(id);
    }

    fn read(circuit: &Circuit, state: &WireState, name: &str) -> Logic {
        state.value(circuit.wire_by_name(name).unwrap())
    }

    #[test]
    fn test_settles_in_one_pass() {
        let circuit = mux_like();
        let mut state = WireState::new(&circuit);
        drive(&circuit, &mut state, "a", Logic::One);
        drive(&circuit, &mut state, "b", Logic::Zero);
        drive(&circuit, &mut state, "s", Logic::Zero);
        simulate(&circuit, &mut state);
        assert_eq!(read(&circuit, &state, "z"), Logic::One);
        for wire in (0..circuit.wires.len()).map(WireId) {
            assert!(!state.is_changed(wire));
        }
    }

    #[test]
    fn test_partial_assignment_leaves_unknowns() {
        let circuit = mux_like();
        let mut state = WireState::new(&circuit);
        drive(&circuit, &mut state, "s", Logic::One);
        simulate(&circuit, &mut state);
        // The selected leg is still unknown, the deselected one is forced.
        assert_eq!(read(&circuit, &state, "p"), Logic::Zero);
        assert_eq!(read(&circuit, &state, "q"), Logic::Unknown);
        assert_eq!(read(&circuit, &state, "z"), Logic::Unknown);
    }

    #[test]
    fn test_incremental_resimulation() {
        let circuit = mux_like();
        let mut state = WireState::new(&circuit);
        drive(&circuit, &mut state, "a", Logic::One);
        drive(&circuit, &mut state, "b", Logic::Zero);
        drive(&circuit, &mut state, "s", Logic::Zero);
        simulate(&circuit, &mut state);
        assert_eq!(read(&circuit, &state, "z"), Logic::One);

        // Flip the select line only; the event-driven pass reconverges.
        drive(&circuit, &mut state, "s", Logic::One);
        simulate(&circuit, &mut state);
        assert_eq!(read(&circuit, &state, "z"), Logic::Zero);
    }

    #[test]
    fn test_composite_values_flow_to_outputs() {
        let circuit = mux_like();
        let mut state = WireState::new(&circuit);
        drive(&circuit, &mut state, "a", Logic::D);
        drive(&circuit, &mut state, "b", Logic::Zero);
        drive(&circuit, &mut state, "s", Logic::Zero);
        simulate(&circuit, &mut state);
        assert_eq!(read(&circuit, &state, "z"), Logic::D);
    }
}
