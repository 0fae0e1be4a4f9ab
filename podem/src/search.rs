use podem_netlist::circuit::Circuit;
use podem_netlist::logic::Logic;
use podem_netlist::state::WireState;
use podem_netlist::wire::WireId;

/// All mutable state owned by one fault's search: the wire values shared
/// with the simulator, plus the PODEM-specific side tables.
pub(crate) struct SearchState {
    pub wires: WireState,
    /// Per PI: both polarities of this decision have been tried.
    pub all_assigned: Vec<bool>,
    /// Per gate: lies on the propagation cone of the current fault.
    pub marked: Vec<bool>,
    /// Per wire: transient X-path DFS visited marks.
    pub xpath_seen: Vec<bool>,
    /// PI decisions, most recent last.
    pub decisions: Vec<WireId>,
    pub backtracks: u32,
}

impl SearchState {
    pub fn new(circuit: &Circuit) -> Self {
        Self {
            wires: WireState::new(circuit),
            all_assigned: vec![false; circuit.wires.len()],
            marked: vec![false; circuit.gates.len()],
            xpath_seen: vec![false; circuit.wires.len()],
            decisions: Vec::new(),
            backtracks: 0,
        }
    }

    /// Entry reset for a fault's search: every wire back to `Unknown`,
    /// every transient mark cleared, the decision stack empty.
    pub fn reset(&mut self) {
        self.wires.reset();
        self.all_assigned.fill(false);
        self.marked.fill(false);
        self.xpath_seen.fill(false);
        self.decisions.clear();
        self.backtracks = 0;
    }

    /// Records a fresh PI decision; the first polarity is the one the
    /// backtrace just assigned.
    pub fn push_decision(&mut self, pi: WireId) {
        self.all_assigned[pi.0] = false;
        self.wires.set_changed(pi);
        self.decisions.push(pi);
    }

    /// Chronological backtrack: retract decisions whose polarities are
    /// both spent, then flip the newest one that is not. `None` means the
    /// decision tree is exhausted.
    pub fn backtrack(&mut self) -> Option<WireId> {
        while let Some(&pi) = self.decisions.last() {
            if self.all_assigned[pi.0] {
                self.all_assigned[pi.0] = false;
                self.wires.set_value(pi, Logic::Unknown);
                self.wires.set_changed(pi);
                self.decisions.pop();
            } else {
                let flipped = self.wires.value(pi).not();
                self.wires.set_value(pi, flipped);
                self.wires.set_changed(pi);
                self.all_assigned[pi.0] = true;
                self.backtracks += 1;
                return Some(pi);
            }
        }
        None
    }
}
