//! Crew sizing and crew rates
//!
//! Management and mechanical-completion crews grow with the project:
//! - `Management - project size`: × ceil(turbines / 100)
//! - `Management - rate construction`, `Mechanical completion`:
//!   × ceil(delivery rate / 10)
//!
//! Scaled headcounts are rounded half to even.

use std::collections::BTreeMap;

use super::{CostError, CrewMember, LaborPrice};
use crate::project::Project;
use crate::types::Operation;
use serde::Serialize;

pub const MANAGEMENT_PROJECT_SIZE: &str = "Management - project size";
pub const MANAGEMENT_RATE_CONSTRUCTION: &str = "Management - rate construction";
pub const MECHANICAL_COMPLETION: &str = "Mechanical completion";

/// Crew table operations billed on top of every crane crew
pub const MANAGEMENT_OPERATIONS: [&str; 2] = ["Management", "Mechanical completion"];

/// Cost of a whole crew
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CrewRate {
    /// USD per hour, overtime included
    pub hourly: f64,
    /// USD per day
    pub per_diem: f64,
}

impl std::ops::Add for CrewRate {
    type Output = CrewRate;

    fn add(self, other: CrewRate) -> CrewRate {
        CrewRate {
            hourly: self.hourly + other.hourly,
            per_diem: self.per_diem + other.per_diem,
        }
    }
}

/// Crew rates grouped by (crew type, crew table operation)
#[derive(Debug, Clone, Default)]
pub struct CrewRoster {
    rates: BTreeMap<(String, String), CrewRate>,
    management: CrewRate,
}

impl CrewRoster {
    pub fn build(
        members: &[CrewMember],
        prices: &[LaborPrice],
        project: &Project,
    ) -> Result<Self, CostError> {
        let mut labor_prices: BTreeMap<&str, &LaborPrice> = BTreeMap::new();
        for price in prices {
            if labor_prices.insert(price.labor_type.as_str(), price).is_some() {
                return Err(CostError::DuplicateKey {
                    table: "crew_price",
                    key: price.labor_type.clone(),
                });
            }
        }

        let size_factor = (project.turbines() / 100.0).ceil();
        let rate_factor = (project.delivery_rate / 10.0).ceil();

        let mut rates: BTreeMap<(String, String), CrewRate> = BTreeMap::new();
        for member in members {
            let price = labor_prices.get(member.labor_type.as_str()).ok_or_else(|| {
                CostError::MissingPriceData {
                    table: "crew_price",
                    key: member.labor_type.clone(),
                }
            })?;

            let workers = match member.crew_name.as_str() {
                MANAGEMENT_PROJECT_SIZE => (member.workers * size_factor).round_ties_even(),
                MANAGEMENT_RATE_CONSTRUCTION | MECHANICAL_COMPLETION => {
                    (member.workers * rate_factor).round_ties_even()
                }
                _ => member.workers,
            };

            let rate = CrewRate {
                hourly: price.hourly * workers * project.overtime_multiplier,
                per_diem: price.per_diem * workers,
            };

            let entry = rates
                .entry((member.crew_type.clone(), member.operation.clone()))
                .or_default();
            *entry = *entry + rate;
        }

        let management = rates
            .iter()
            .filter(|((_, operation), _)| MANAGEMENT_OPERATIONS.contains(&operation.as_str()))
            .fold(CrewRate::default(), |sum, (_, &rate)| sum + rate);

        tracing::debug!(
            groups = rates.len(),
            management_hourly = management.hourly,
            management_per_diem = management.per_diem,
            "crew roster built"
        );

        Ok(Self { rates, management })
    }

    /// Rate of the crane crew working an operation
    pub fn rate(&self, crew_type: &str, operation: Operation) -> Result<CrewRate, CostError> {
        self.rates
            .get(&(crew_type.to_string(), operation.as_str().to_string()))
            .copied()
            .ok_or_else(|| CostError::MissingPriceData {
                table: "crew",
                key: format!("{} / {}", crew_type, operation),
            })
    }

    /// Combined management and mechanical-completion crews
    pub fn management(&self) -> CrewRate {
        self.management
    }
}
