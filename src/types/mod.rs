pub mod conversion;
pub mod operation;
pub mod units;

pub use conversion::*;
pub use operation::{LiftClass, Operation};
pub use units::*;

// Re-export nalgebra
pub use nalgebra as na;
