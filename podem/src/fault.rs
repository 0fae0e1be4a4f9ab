use serde::{Deserialize, Serialize};

use podem_netlist::circuit::Circuit;
use podem_netlist::gate::{GateId, GateKind};
use podem_netlist::logic::Logic;
use podem_netlist::wire::WireId;

/// Which pin of the gate carries the fault.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum FaultSite {
    /// The gate's output wire.
    Output,
    /// The gate input at this position.
    Input(usize),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum StuckAt {
    Stuck0,
    Stuck1,
}

impl StuckAt {
    /// The value the fault clamps the wire to.
    pub const fn value(self) -> Logic {
        match self {
            StuckAt::Stuck0 => Logic::Zero,
            StuckAt::Stuck1 => Logic::One,
        }
    }

    /// The value that excites the fault: the opposite of the stuck value.
    pub const fn excitation(self) -> Logic {
        match self {
            StuckAt::Stuck0 => Logic::One,
            StuckAt::Stuck1 => Logic::Zero,
        }
    }
}

/// A single stuck-at fault, addressed by gate and pin.
///
/// Primary-output faults sit on the input pin of the PO's `Output`
/// pseudo-gate; primary-input faults on an input pin of a fanout gate.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Fault {
    pub gate: GateId,
    pub site: FaultSite,
    pub stuck: StuckAt,
}

impl Fault {
    /// The wire the fault sits on.
    pub fn site_wire(&self, circuit: &Circuit) -> WireId {
        let gate = circuit.gate(self.gate);
        match self.site {
            FaultSite::Output => gate
                .output
                .expect("output-side faults never target Output pseudo-gates"),
            FaultSite::Input(pin) => gate.inputs[pin],
        }
    }

    /// Every uncollapsed stuck-at fault of the circuit, in gate order.
    pub fn enumerate(circuit: &Circuit) -> Vec<Fault> {
        let mut faults = Vec::new();
        for (index, gate) in circuit.gates.iter().enumerate() {
            let gate_id = GateId(index);
            for stuck in [StuckAt::Stuck0, StuckAt::Stuck1] {
                if gate.kind != GateKind::Output {
                    faults.push(Fault {
                        gate: gate_id,
                        site: FaultSite::Output,
                        stuck,
                    });
                }
                for pin in 0..gate.inputs.len() {
                    faults.push(Fault {
                        gate: gate_id,
                        site: FaultSite::Input(pin),
                        stuck,
                    });
                }
            }
        }
        faults
    }

    /// Human-readable descriptor, e.g. `c GI#1 SA0`.
    pub fn describe(&self, circuit: &Circuit) -> String {
        let wire = &circuit.wire(self.site_wire(circuit)).name;
        let site = match self.site {
            FaultSite::Output => "GO".to_string(),
            FaultSite::Input(pin) => format!("GI#{pin}"),
        };
        let stuck = match self.stuck {
            StuckAt::Stuck0 => "SA0",
            StuckAt::Stuck1 => "SA1",
        };
        format!("{wire} {site} {stuck}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::and_circuit;

    #[test]
    fn test_enumerate_counts_pins_and_outputs() {
        let circuit = and_circuit();
        let faults = Fault::enumerate(&circuit);
        // AND gate: output + two inputs; Output pseudo-gate: one input.
        // Each site in both polarities.
        assert_eq!(faults.len(), 2 * (3 + 1));
    }

    #[test]
    fn test_describe() {
        let circuit = and_circuit();
        let faults = Fault::enumerate(&circuit);
        assert_eq!(faults[0].describe(&circuit), "z GO SA0");
        let po_fault = faults.iter().find(|f| {
            circuit.gate(f.gate).kind == GateKind::Output && f.stuck == StuckAt::Stuck1
        });
        assert_eq!(po_fault.unwrap().describe(&circuit), "z GI#0 SA1");
    }
}
