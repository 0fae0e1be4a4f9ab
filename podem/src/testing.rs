//! Small circuits and reference evaluation shared by the unit tests.

use podem_netlist::builder::CircuitBuilder;
use podem_netlist::circuit::Circuit;
use podem_netlist::gate::{GateId, GateKind};
use podem_netlist::logic::Logic;

use crate::fault::{Fault, FaultSite};

/// `z = a AND b`, with `z` a primary output.
pub fn and_circuit() -> Circuit {
    let mut builder = CircuitBuilder::new();
    builder.add_input("a").unwrap();
    builder.add_input("b").unwrap();
    builder.add_gate(GateKind::And, "z", &["a", "b"]).unwrap();
    builder.mark_output("z").unwrap();
    builder.build().unwrap()
}

/// Two AND stages plus a sibling cone: `u = a AND b`, `v = a AND e`,
/// `z = u AND d`, with `z` and `v` primary outputs.
pub fn two_stage_circuit() -> Circuit {
    let mut builder = CircuitBuilder::new();
    for name in ["a", "b", "d", "e"] {
        builder.add_input(name).unwrap();
    }
    builder.add_gate(GateKind::And, "u", &["a", "b"]).unwrap();
    builder.add_gate(GateKind::And, "v", &["a", "e"]).unwrap();
    builder.add_gate(GateKind::And, "z", &["u", "d"]).unwrap();
    builder.mark_output("z").unwrap();
    builder.mark_output("v").unwrap();
    builder.build().unwrap()
}

/// The ISCAS-85 c17 benchmark: six NAND gates, two outputs, and no
/// redundant stuck-at fault anywhere.
pub fn c17() -> Circuit {
    let mut builder = CircuitBuilder::new();
    for name in ["i1", "i2", "i3", "i4", "i5"] {
        builder.add_input(name).unwrap();
    }
    builder.add_gate(GateKind::Nand, "n1", &["i1", "i3"]).unwrap();
    builder.add_gate(GateKind::Nand, "n2", &["i3", "i4"]).unwrap();
    builder.add_gate(GateKind::Nand, "n3", &["i2", "n2"]).unwrap();
    builder.add_gate(GateKind::Nand, "n4", &["n2", "i5"]).unwrap();
    builder.add_gate(GateKind::Nand, "o1", &["n1", "n3"]).unwrap();
    builder.add_gate(GateKind::Nand, "o2", &["n3", "n4"]).unwrap();
    builder.mark_output("o1").unwrap();
    builder.mark_output("o2").unwrap();
    builder.build().unwrap()
}

/// The gate driving the named wire.
pub fn driver_of(circuit: &Circuit, name: &str) -> GateId {
    circuit
        .wire(circuit.wire_by_name(name).unwrap())
        .driver
        .unwrap()
}

/// The `Output` pseudo-gate observing the named PO wire.
pub fn observer_of(circuit: &Circuit, name: &str) -> GateId {
    let wire = circuit.wire_by_name(name).unwrap();
    circuit
        .wire(wire)
        .fanout
        .iter()
        .copied()
        .find(|&g| circuit.gate(g).kind == GateKind::Output)
        .unwrap()
}

/// Reference two-valued evaluation of a complete PI pattern, optionally
/// with a stuck-at fault in effect. Used to cross-check generated tests:
/// a pattern is a test iff the faulty outputs differ from the good ones.
pub fn eval_pattern(circuit: &Circuit, pattern: &[Logic], fault: Option<&Fault>) -> Vec<Logic> {
    let mut values = vec![Logic::Unknown; circuit.wires.len()];
    for (i, &pi) in circuit.inputs.iter().enumerate() {
        values[pi.0] = pattern[i];
    }
    for &wid in &circuit.sorted {
        let Some(gid) = circuit.wire(wid).driver else {
            continue;
        };
        let gate = circuit.gate(gid);
        let inputs = gate.inputs.iter().enumerate().map(|(pin, &w)| {
            match fault {
                Some(f) if f.gate == gid && f.site == FaultSite::Input(pin) => f.stuck.value(),
                _ => values[w.0],
            }
        });
        let mut out = podem_netlist::eval::eval_gate(gate.kind, inputs);
        if let Some(f) = fault {
            if f.gate == gid && f.site == FaultSite::Output {
                out = f.stuck.value();
            }
        }
        values[wid.0] = out;
    }
    circuit
        .outputs
        .iter()
        .map(|&po| {
            match fault {
                // A fault on the observation pin clamps what the PO reads.
                Some(f) if circuit.gate(f.gate).inputs == [po] && f.site == FaultSite::Input(0)
                    && circuit.gate(f.gate).kind == GateKind::Output =>
                {
                    f.stuck.value()
                }
                _ => values[po.0],
            }
        })
        .collect()
}

/// Whether `pattern` detects `fault`: some PO differs between the good
/// and the faulty machine.
pub fn detects(circuit: &Circuit, pattern: &[Logic], fault: &Fault) -> bool {
    let good = eval_pattern(circuit, pattern, None);
    let bad = eval_pattern(circuit, pattern, Some(fault));
    good.iter()
        .zip(&bad)
        .any(|(g, b)| g.is_known() && b.is_known() && g != b)
}
