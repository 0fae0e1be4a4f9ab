use podem_netlist::circuit::Circuit;
use podem_netlist::logic::Logic;
use podem_netlist::wire::WireId;

use crate::search::SearchState;

/// Whether a path of all-`Unknown` wires still leads from `from` to some
/// primary output, i.e. whether fault propagation remains feasible.
///
/// Runs an explicit-stack DFS over the fanout wires; the transient visited
/// marks are scoped to this call and cleared again on every return path,
/// found or not.
pub(crate) fn has_unknown_path(circuit: &Circuit, state: &mut SearchState, from: WireId) -> bool {
    if circuit.wire(from).is_output {
        return true;
    }
    let mut work = vec![from];
    let mut seen = vec![from];
    state.xpath_seen[from.0] = true;

    let mut found = false;
    'dfs: while let Some(wire) = work.pop() {
        for &gate in &circuit.wire(wire).fanout {
            let Some(out) = circuit.gate(gate).output else {
                continue;
            };
            if state.xpath_seen[out.0] || state.wires.value(out) != Logic::Unknown {
                continue;
            }
            if circuit.wire(out).is_output {
                found = true;
                break 'dfs;
            }
            state.xpath_seen[out.0] = true;
            seen.push(out);
            work.push(out);
        }
    }
    for wire in seen {
        state.xpath_seen[wire.0] = false;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::two_stage_circuit;

    #[test]
    fn test_open_path_is_found_and_marks_are_cleared() {
        let circuit = two_stage_circuit();
        let mut state = SearchState::new(&circuit);
        let u = circuit.wire_by_name("u").unwrap();
        assert!(has_unknown_path(&circuit, &mut state, u));
        assert!(state.xpath_seen.iter().all(|&m| !m));
    }

    #[test]
    fn test_assigned_wire_blocks_the_path() {
        let circuit = two_stage_circuit();
        let mut state = SearchState::new(&circuit);
        let u = circuit.wire_by_name("u").unwrap();
        let z = circuit.wire_by_name("z").unwrap();
        state.wires.set_value(z, Logic::One);
        assert!(!has_unknown_path(&circuit, &mut state, u));
        assert!(state.xpath_seen.iter().all(|&m| !m));
    }

    #[test]
    fn test_po_wire_answers_immediately() {
        let circuit = two_stage_circuit();
        let mut state = SearchState::new(&circuit);
        let z = circuit.wire_by_name("z").unwrap();
        // Even with a value already on it: a PO observes itself.
        state.wires.set_value(z, Logic::D);
        assert!(has_unknown_path(&circuit, &mut state, z));
        assert!(state.xpath_seen.iter().all(|&m| !m));
    }
}
