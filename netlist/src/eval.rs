use crate::circuit::Circuit;
use crate::gate::{GateId, GateKind};
use crate::logic::Logic;
use crate::state::WireState;

/// Folds input values through one gate of the given kind.
///
/// `Output` pseudo-gates compute nothing; they yield `Unknown` and are
/// filtered out by every caller.
pub fn eval_gate(kind: GateKind, mut inputs: impl Iterator<Item = Logic>) -> Logic {
    match kind {
        GateKind::And => inputs.fold(Logic::One, Logic::and),
        GateKind::Nand => inputs.fold(Logic::One, Logic::and).not(),
        GateKind::Or => inputs.fold(Logic::Zero, Logic::or),
        GateKind::Nor => inputs.fold(Logic::Zero, Logic::or).not(),
        GateKind::Not => inputs.next().map_or(Logic::Unknown, Logic::not),
        GateKind::Buf => inputs.next().unwrap_or(Logic::Unknown),
        GateKind::Output => Logic::Unknown,
    }
}

/// Re-evaluates a single gate from its current input values, writing the
/// output wire and marking it changed iff the value moved.
pub fn evaluate(circuit: &Circuit, gate: GateId, state: &mut WireState) {
    let gate = circuit.gate(gate);
    let Some(out) = gate.output else {
        return;
    };
    let value = eval_gate(gate.kind, gate.inputs.iter().map(|&w| state.value(w)));
    state.update(out, value);
}
