use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use podem_netlist::circuit::Circuit;
use podem_netlist::logic::Logic;
use podem_netlist::sim::simulate;

use crate::cone::{mark_cone, unmark_cone};
use crate::fault::Fault;
use crate::imply::{
    check_test, fault_evaluate, forward_imply, set_uniquely_implied_value, Implication,
};
use crate::objective::next_assignment;
use crate::pattern::Pattern;
use crate::search::SearchState;

/// Search knobs for one generator instance.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct PodemConfig {
    /// Backtracks allowed per fault before its search is abandoned.
    pub backtrack_limit: u32,
    /// Patterns to generate per testable fault.
    pub patterns_per_fault: usize,
    /// Seed for the random fill of leftover unknown PIs.
    pub fill_seed: u64,
}

impl Default for PodemConfig {
    fn default() -> Self {
        Self {
            backtrack_limit: 50,
            patterns_per_fault: 1,
            fill_seed: 0,
        }
    }
}

/// Ternary verdict of one fault's search.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum TestOutcome {
    /// A test vector was found.
    Found,
    /// The decision tree was exhausted; the fault is redundant.
    Untestable,
    /// The backtrack budget ran out before a verdict.
    Aborted,
}

/// Result of running the generator on one fault.
#[derive(Clone, Debug, Serialize)]
pub struct PodemRun {
    pub outcome: TestOutcome,
    /// Backtracks consumed; each counts one value flip, never a retract.
    pub backtracks: u32,
    pub patterns: Vec<Pattern>,
}

/// The PODEM test generator: objective-driven search committing decisions
/// only at primary inputs. Holds the per-search scratch state, so running
/// many faults over one circuit reuses its allocations.
pub struct Podem<'a> {
    circuit: &'a Circuit,
    config: PodemConfig,
    state: SearchState,
    rng: ChaCha8Rng,
}

impl<'a> Podem<'a> {
    pub fn new(circuit: &'a Circuit, config: PodemConfig) -> Self {
        Self {
            circuit,
            config,
            state: SearchState::new(circuit),
            rng: ChaCha8Rng::seed_from_u64(config.fill_seed),
        }
    }

    /// Searches for up to `patterns_per_fault` test vectors for `fault`.
    ///
    /// Every wire starts the search at `Unknown`; all transient marks are
    /// cleared again before this returns, whatever the verdict.
    pub fn run(&mut self, fault: &Fault) -> PodemRun {
        self.state.reset();
        mark_cone(self.circuit, &mut self.state, fault.gate);

        let target = self.config.patterns_per_fault.max(1);
        let mut patterns = Vec::new();
        let mut found = 0usize;
        let mut no_test = false;
        let mut just_found = false;

        // Implications the fault itself forces, before any decision.
        match set_uniquely_implied_value(self.circuit, &mut self.state, fault) {
            Implication::Conflict => no_test = true,
            Implication::ReachedPi => {
                just_found = self.simulate_fault(fault);
                if just_found {
                    found += 1;
                    if target > 1 {
                        patterns.push(self.capture());
                    }
                }
            }
            Implication::NoPiReached => {}
        }

        // One backtrack-or-advance step, then one resimulation, per
        // iteration. After a recorded test the only way to another
        // pattern is revising a decision; otherwise the objective engine
        // speaks first and backtracking is the fallback.
        while self.state.backtracks < self.config.backtrack_limit && !no_test && found < target {
            let assigned = if just_found {
                self.state.backtrack()
            } else {
                match next_assignment(self.circuit, &mut self.state, fault) {
                    Some(pi) => {
                        self.state.push_decision(pi);
                        Some(pi)
                    }
                    None => self.state.backtrack(),
                }
            };
            if assigned.is_none() {
                no_test = true;
                continue;
            }
            just_found = self.simulate_fault(fault);
            if just_found {
                found += 1;
                if target > 1 {
                    patterns.push(self.capture());
                }
            }
        }

        // Leftover decisions keep their values for the reported pattern,
        // but no polarity-exhausted mark may leak into the next search.
        for index in 0..self.state.decisions.len() {
            let pi = self.state.decisions[index];
            self.state.all_assigned[pi.0] = false;
        }
        self.state.decisions.clear();
        unmark_cone(self.circuit, &mut self.state, fault.gate);

        let outcome = if found > 0 {
            if target == 1 {
                self.fill_unassigned();
                patterns.push(self.capture());
            }
            TestOutcome::Found
        } else if no_test {
            TestOutcome::Untestable
        } else {
            TestOutcome::Aborted
        };
        debug!(
            "fault {}: {:?} after {} backtracks, {} pattern(s)",
            fault.describe(self.circuit),
            outcome,
            self.state.backtracks,
            patterns.len(),
        );
        PodemRun {
            outcome,
            backtracks: self.state.backtracks,
            patterns,
        }
    }

    /// Settles the circuit on the current PI assignment, re-injects the
    /// fault effect and pushes it forward. True iff a PO observes it.
    fn simulate_fault(&mut self, fault: &Fault) -> bool {
        simulate(self.circuit, &mut self.state.wires);
        if let Some(wire) = fault_evaluate(self.circuit, &mut self.state, fault) {
            forward_imply(self.circuit, &mut self.state, wire);
        }
        check_test(self.circuit, &self.state)
    }

    /// Assigns every still-unknown PI a random bit and resolves composite
    /// values to the good machine.
    fn fill_unassigned(&mut self) {
        for &pi in &self.circuit.inputs {
            let value = match self.state.wires.value(pi) {
                Logic::Unknown => Logic::from_bool(self.rng.gen()),
                value => value.resolved(),
            };
            self.state.wires.set_value(pi, value);
        }
    }

    fn capture(&self) -> Pattern {
        Pattern(
            self.circuit
                .inputs
                .iter()
                .map(|&pi| self.state.wires.value(pi).resolved())
                .collect(),
        )
    }
}
