use anyhow::{bail, ensure, Result};
use hashbrown::HashMap;
use itertools::Itertools;
use log::debug;

use crate::circuit::Circuit;
use crate::gate::{Gate, GateId, GateKind};
use crate::wire::{Wire, WireId};

/// Incremental construction of a [`Circuit`]: declare inputs, add gates,
/// mark outputs, then [`build`](Self::build) to validate and levelize.
///
/// Wires are interned by name on first mention, so gates may refer to
/// wires that are declared or driven later.
#[derive(Default)]
pub struct CircuitBuilder {
    wires: Vec<Wire>,
    gates: Vec<Gate>,
    names: HashMap<String, WireId>,
    inputs: Vec<WireId>,
    outputs: Vec<WireId>,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, name: &str) -> WireId {
        if let Some(&id) = self.names.get(name) {
            return id;
        }
        let id = WireId(self.wires.len());
        self.wires.push(Wire {
            name: name.to_string(),
            level: 0,
            is_input: false,
            is_output: false,
            driver: None,
            fanout: Vec::new(),
        });
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn add_input(&mut self, name: &str) -> Result<WireId> {
        let id = self.intern(name);
        let wire = &mut self.wires[id.0];
        ensure!(!wire.is_input, "wire `{name}` declared as input twice");
        ensure!(
            wire.driver.is_none(),
            "wire `{name}` is both an input and a gate output"
        );
        wire.is_input = true;
        self.inputs.push(id);
        Ok(id)
    }

    pub fn add_gate(&mut self, kind: GateKind, output: &str, inputs: &[&str]) -> Result<GateId> {
        ensure!(
            kind != GateKind::Output,
            "primary outputs are declared with `mark_output`"
        );
        match kind {
            GateKind::Not | GateKind::Buf => ensure!(
                inputs.len() == 1,
                "{kind:?} gate `{output}` takes exactly one input"
            ),
            _ => ensure!(
                inputs.len() >= 2,
                "{kind:?} gate `{output}` takes at least two inputs"
            ),
        }
        let out = self.intern(output);
        ensure!(
            self.wires[out.0].driver.is_none(),
            "wire `{output}` driven twice"
        );
        ensure!(
            !self.wires[out.0].is_input,
            "wire `{output}` is both an input and a gate output"
        );
        let gate_id = GateId(self.gates.len());
        let input_ids = inputs.iter().map(|name| self.intern(name)).collect_vec();
        for &w in &input_ids {
            self.wires[w.0].fanout.push(gate_id);
        }
        self.wires[out.0].driver = Some(gate_id);
        self.gates.push(Gate {
            kind,
            inputs: input_ids,
            output: Some(out),
        });
        Ok(gate_id)
    }

    /// Declares `name` a primary output, attaching the `Output` pseudo-gate
    /// that serves as its observation point.
    pub fn mark_output(&mut self, name: &str) -> Result<WireId> {
        let id = self.intern(name);
        ensure!(
            !self.wires[id.0].is_output,
            "wire `{name}` declared as output twice"
        );
        self.wires[id.0].is_output = true;
        let gate_id = GateId(self.gates.len());
        self.wires[id.0].fanout.push(gate_id);
        self.gates.push(Gate {
            kind: GateKind::Output,
            inputs: vec![id],
            output: None,
        });
        self.outputs.push(id);
        Ok(id)
    }

    pub fn build(mut self) -> Result<Circuit> {
        ensure!(!self.inputs.is_empty(), "circuit has no primary inputs");
        ensure!(!self.outputs.is_empty(), "circuit has no primary outputs");
        for wire in &self.wires {
            ensure!(
                wire.is_input || wire.driver.is_some(),
                "wire `{}` is neither an input nor driven by a gate",
                wire.name
            );
        }

        // Levelize: inputs sit at 0, every gate output one past its deepest
        // input. A worklist pass that stalls has found a cycle.
        let mut level: Vec<Option<usize>> = self
            .wires
            .iter()
            .map(|w| w.is_input.then_some(0))
            .collect();
        let mut unresolved: Vec<GateId> = (0..self.gates.len())
            .map(GateId)
            .filter(|&g| self.gates[g.0].kind != GateKind::Output)
            .collect();
        while !unresolved.is_empty() {
            let before = unresolved.len();
            unresolved.retain(|&gid| {
                let gate = &self.gates[gid.0];
                let deepest = gate
                    .inputs
                    .iter()
                    .try_fold(0usize, |acc, &w| level[w.0].map(|l| acc.max(l)));
                match (deepest, gate.output) {
                    (Some(depth), Some(out)) => {
                        level[out.0] = Some(depth + 1);
                        false
                    }
                    _ => true,
                }
            });
            if unresolved.len() == before {
                let gate = &self.gates[unresolved[0].0];
                let out = gate.output.expect("unresolved gates drive a wire");
                bail!(
                    "combinational cycle through wire `{}`",
                    self.wires[out.0].name
                );
            }
        }
        for (wire, depth) in self.wires.iter_mut().zip(level) {
            wire.level = depth.expect("levelization visited every wire");
        }

        let sorted = (0..self.wires.len())
            .map(WireId)
            .sorted_by_key(|&w| (self.wires[w.0].level, w.0))
            .collect_vec();
        debug!(
            "levelized circuit: {} wires, {} gates, {} PIs, {} POs, depth {}",
            self.wires.len(),
            self.gates.len(),
            self.inputs.len(),
            self.outputs.len(),
            self.wires.iter().map(|w| w.level).max().unwrap_or(0),
        );

        Ok(Circuit {
            wires: self.wires,
            gates: self.gates,
            inputs: self.inputs,
            outputs: self.outputs,
            sorted,
        })
    }
}
