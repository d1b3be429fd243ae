pub mod operation_time;

pub use operation_time::*;

use crate::types::Operation;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Operational hours per day must be positive, got {0}")]
    NonPositiveHours(f64),

    #[error("Construction duration must be positive, got {0} months")]
    NonPositiveDuration(f64),

    #[error("Delivery rate must be positive, got {0} turbines per week")]
    NonPositiveDeliveryRate(f64),

    #[error("Schedule for the {operation} operation with {crane} is undefined ({days} days)")]
    UndefinedDays {
        crane: String,
        operation: Operation,
        days: f64,
    },
}
