pub mod aggregate;
pub mod crew;
pub mod prices;

pub use aggregate::*;
pub use crew::*;
pub use prices::*;

use crate::types::Operation;

#[derive(Debug, thiserror::Error)]
pub enum CostError {
    #[error("No {table} entry for {key}")]
    MissingPriceData { table: &'static str, key: String },

    #[error("Duplicate {table} entry for {key}")]
    DuplicateKey { table: &'static str, key: String },

    #[error("No {stage} record for {crane} in the {operation} operation")]
    MissingRecord {
        stage: &'static str,
        crane: String,
        operation: Operation,
    },
}
