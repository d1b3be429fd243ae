pub mod types;
pub mod equipment;
pub mod capacity;
pub mod physics;
pub mod project;
pub mod schedule;
pub mod cost;
pub mod selection;
pub mod pipeline;
pub mod data;
pub mod logging;

pub use types::*;
pub use pipeline::{ErectionCost, ErectionError, ErectionPipeline, ProjectInputs};
