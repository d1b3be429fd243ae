pub mod fleet;

use crate::capacity::envelope::{CapacityEnvelope, EnvelopeError};
use crate::types::*;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

pub use fleet::CraneFleet;

/// Equipment name marking cranes that may offload components from trucks
pub const OFFLOAD_EQUIPMENT: &str = "Offload crane";

/// One load chart row of the crane specification table
///
/// Several rows share an (equipment, crane, boom, capacity) tuple; together
/// they describe one configuration's chart.
#[derive(Debug, Clone)]
pub struct CraneSpec {
    pub equipment_name: String,
    pub crane_name: String,
    pub boom_system: String,

    /// Nominal crane class (e.g. 600 t), also the equipment price key
    pub rated_capacity: Mass,

    /// Chart capacity at `chart_height`
    pub chart_capacity: Mass,
    pub chart_height: Length,

    /// Maximum wind speed tabulated for the chart
    pub max_wind_speed: Velocity,
    pub hoist_speed: Velocity,
    pub travel_speed: Velocity,

    /// Rig-up time at each turbine
    pub setup_time: Time,

    pub crew_type: String,

    /// One-way mobilization cost, USD
    pub mobilization_cost: f64,
}

/// Index of a configuration inside its `CraneFleet`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConfigId(pub usize);

/// Crane and boom pair, the key for mobilization costs and crew rules
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CraneKey {
    pub crane_name: String,
    pub boom_system: String,
}

impl fmt::Display for CraneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.crane_name, self.boom_system)
    }
}

/// A distinct crane/boom/capacity setup with its aggregated chart data
#[derive(Debug, Clone, Serialize)]
pub struct CraneConfiguration {
    pub id: ConfigId,
    pub equipment_name: String,
    pub crane_name: String,
    pub boom_system: String,
    pub rated_capacity: Mass,

    /// Lowest tabulated wind limit across the chart rows
    pub max_wind_speed: Velocity,
    /// Slowest hoist speed across the chart rows
    pub hoist_speed: Velocity,
    /// Slowest travel speed across the chart rows
    pub travel_speed: Velocity,
    /// Longest setup time across the chart rows
    pub setup_time: Time,

    pub crew_type: String,
    pub mobilization_cost: f64,
    pub envelope: CapacityEnvelope,
}

impl CraneConfiguration {
    pub fn key(&self) -> CraneKey {
        CraneKey {
            crane_name: self.crane_name.clone(),
            boom_system: self.boom_system.clone(),
        }
    }

    pub fn is_offload_crane(&self) -> bool {
        self.equipment_name == OFFLOAD_EQUIPMENT
    }

    /// Offloading is reserved for offload cranes; any crane may erect
    pub fn can_perform(&self, operation: Operation) -> bool {
        match operation {
            Operation::Offload => self.is_offload_crane(),
            Operation::Base | Operation::Top => true,
        }
    }

    /// Tie-break order between equally priced configurations
    pub fn identity_cmp(&self, other: &Self) -> Ordering {
        self.crane_name
            .cmp(&other.crane_name)
            .then_with(|| self.boom_system.cmp(&other.boom_system))
            .then_with(|| self.equipment_name.cmp(&other.equipment_name))
            .then_with(|| {
                to_chart_mass(self.rated_capacity).total_cmp(&to_chart_mass(other.rated_capacity))
            })
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for CraneConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} / {} ({:.0} t)",
            self.equipment_name,
            self.crane_name,
            self.boom_system,
            to_chart_mass(self.rated_capacity)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("Crane specification table is empty")]
    Empty,

    #[error("Crane {crane} boom {boom}: rated capacity {capacity} is not positive")]
    InvalidCapacity {
        crane: String,
        boom: String,
        capacity: DisplayMass,
    },

    #[error("Crane {crane} boom {boom}: {source}")]
    Envelope {
        crane: String,
        boom: String,
        #[source]
        source: EnvelopeError,
    },

    #[error(
        "Crane {crane} uses crew type {first} with boom {first_boom} \
         but {second} with boom {second_boom}"
    )]
    InconsistentCrewType {
        crane: String,
        first: String,
        first_boom: String,
        second: String,
        second_boom: String,
    },
}
