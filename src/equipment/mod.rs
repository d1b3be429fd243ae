pub mod component;
pub mod crane;

pub use component::*;
pub use crane::*;
