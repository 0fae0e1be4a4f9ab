use core::fmt;

use serde::{Deserialize, Serialize};

/// A value in the five-valued algebra of single-fault test generation.
///
/// `D` and `Dbar` are composite values carrying the fault-free and the
/// faulty machine in one symbol: `D` is 1 in the fault-free circuit and 0
/// in the faulty one, `Dbar` the opposite.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Logic {
    Zero,
    One,
    /// Unassigned / unknown.
    Unknown,
    /// 1 in the good machine, 0 in the faulty machine.
    D,
    /// 0 in the good machine, 1 in the faulty machine.
    Dbar,
}

impl Logic {
    pub const fn from_bool(b: bool) -> Self {
        if b {
            Logic::One
        } else {
            Logic::Zero
        }
    }

    /// The good-machine rail, or `None` when it is unknown.
    pub const fn good(self) -> Option<bool> {
        match self {
            Logic::Zero | Logic::Dbar => Some(false),
            Logic::One | Logic::D => Some(true),
            Logic::Unknown => None,
        }
    }

    /// The faulty-machine rail, or `None` when it is unknown.
    pub const fn faulty(self) -> Option<bool> {
        match self {
            Logic::Zero | Logic::D => Some(false),
            Logic::One | Logic::Dbar => Some(true),
            Logic::Unknown => None,
        }
    }

    /// Rebuilds a value from its two rails. Either rail unknown collapses
    /// the whole value to `Unknown`; the algebra has no mixed symbols.
    const fn from_rails(good: Option<bool>, faulty: Option<bool>) -> Self {
        match (good, faulty) {
            (Some(false), Some(false)) => Logic::Zero,
            (Some(true), Some(true)) => Logic::One,
            (Some(true), Some(false)) => Logic::D,
            (Some(false), Some(true)) => Logic::Dbar,
            _ => Logic::Unknown,
        }
    }

    pub const fn not(self) -> Self {
        match self {
            Logic::Zero => Logic::One,
            Logic::One => Logic::Zero,
            Logic::Unknown => Logic::Unknown,
            Logic::D => Logic::Dbar,
            Logic::Dbar => Logic::D,
        }
    }

    /// Five-valued AND, rail by rail. A known 0 on a rail wins over an
    /// unknown, so `0 & x = 0` and `D & Dbar = 0`.
    pub const fn and(self, other: Self) -> Self {
        Self::from_rails(
            and3(self.good(), other.good()),
            and3(self.faulty(), other.faulty()),
        )
    }

    /// Five-valued OR, rail by rail. Dually, `1 | x = 1` and `D | Dbar = 1`.
    pub const fn or(self, other: Self) -> Self {
        Self::from_rails(
            or3(self.good(), other.good()),
            or3(self.faulty(), other.faulty()),
        )
    }

    pub const fn is_known(self) -> bool {
        !matches!(self, Logic::Unknown)
    }

    /// Whether this value carries a fault effect.
    pub const fn is_fault_effect(self) -> bool {
        matches!(self, Logic::D | Logic::Dbar)
    }

    /// Collapses a composite value to its good-machine bit; other values
    /// pass through.
    pub const fn resolved(self) -> Self {
        match self {
            Logic::D => Logic::One,
            Logic::Dbar => Logic::Zero,
            v => v,
        }
    }
}

/// Three-valued AND on one rail, with Kleene short-circuit: a known
/// controlling bit beats an unknown operand.
const fn and3(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(false), _) | (_, Some(false)) => Some(false),
        (Some(true), Some(true)) => Some(true),
        _ => None,
    }
}

const fn or3(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    match (a, b) {
        (Some(true), _) | (_, Some(true)) => Some(true),
        (Some(false), Some(false)) => Some(false),
        _ => None,
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::Unknown => 'x',
            Logic::D => 'D',
            Logic::Dbar => 'B',
        };
        write!(f, "{c}")
    }
}
