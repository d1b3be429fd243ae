use serde::{Deserialize, Serialize};
use std::fmt;

/// Erection operations a crane configuration is priced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    /// Lower tower sections, below the hub-height breakpoint
    Base,
    /// Upper sections, nacelle and rotor
    Top,
    /// Unloading components from delivery trucks (two cranes in parallel)
    Offload,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Base, Operation::Top, Operation::Offload];

    /// Name used by the crew table's `Operation` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Base => "Base",
            Operation::Top => "Top",
            Operation::Offload => "Offload",
        }
    }

    /// Number of cranes of the chosen configuration working this operation on site
    pub fn crane_count(&self) -> u32 {
        match self {
            Operation::Offload => 2,
            Operation::Base | Operation::Top => 1,
        }
    }

    pub fn is_erection(&self) -> bool {
        matches!(self, Operation::Base | Operation::Top)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Height class of a component relative to the hub-height breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LiftClass {
    Base,
    Top,
}

impl LiftClass {
    pub fn operation(&self) -> Operation {
        match self {
            LiftClass::Base => Operation::Base,
            LiftClass::Top => Operation::Top,
        }
    }
}
