use core::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use podem_netlist::logic::Logic;

/// One test vector over the primary inputs, in canonical PI order.
///
/// Composite values are already resolved to the good machine when a
/// pattern is captured; `Unknown` survives only in multi-pattern cubes,
/// where it prints as `x`.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Pattern(pub Vec<Logic>);

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().format(" "))
    }
}
