pub mod weather;
pub mod wind_derating;

pub use weather::*;
pub use wind_derating::*;
