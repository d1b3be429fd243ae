pub mod envelope;
pub mod feasibility;

pub use envelope::*;
pub use feasibility::*;
