//! Rental time of each usable configuration, across the whole turbine fleet
//!
//! Per (configuration, operation):
//! - erection = Σ (lift height / hoist speed + cycle time) × turbines
//! - travel = turbine spacing / travel speed × turbines
//! - setup = setup time × turbines
//!
//! The weather-exposure duration is the computed day count, capped at the
//! erection window. Offloading cannot finish before the last delivery.

use std::collections::BTreeMap;

use super::ScheduleError;
use crate::capacity::FeasibilityTable;
use crate::equipment::{Component, ConfigId, CraneFleet};
use crate::project::Project;
use crate::types::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OperationTimeRecord {
    pub configuration: ConfigId,
    pub operation: Operation,
    pub erection: Time,
    pub travel: Time,
    pub setup: Time,

    /// Rental time without weather
    pub total: Time,

    /// Days of work at the project's operational hours per day
    pub operational_days: f64,

    /// Days exposed to weather after the scheduling policy
    pub construction_days: f64,
}

impl OperationTimeRecord {
    pub fn total_hours(&self) -> f64 {
        self.total.get::<hour>()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OperationTimeTable {
    records: BTreeMap<(ConfigId, Operation), OperationTimeRecord>,
}

impl OperationTimeTable {
    pub fn get(
        &self,
        configuration: ConfigId,
        operation: Operation,
    ) -> Option<&OperationTimeRecord> {
        self.records.get(&(configuration, operation))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperationTimeRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct OperationTimeEstimator<'a> {
    project: &'a Project,
    components: &'a [Component],
    fleet: &'a CraneFleet,
}

impl<'a> OperationTimeEstimator<'a> {
    pub fn new(project: &'a Project, components: &'a [Component], fleet: &'a CraneFleet) -> Self {
        Self {
            project,
            components,
            fleet,
        }
    }

    pub fn estimate(
        &self,
        feasibility: &FeasibilityTable,
    ) -> Result<OperationTimeTable, ScheduleError> {
        let project = self.project;
        if !(project.hours_per_day > 0.0) {
            return Err(ScheduleError::NonPositiveHours(project.hours_per_day));
        }
        if !(project.construction_duration_months > 0.0) {
            return Err(ScheduleError::NonPositiveDuration(
                project.construction_duration_months,
            ));
        }
        if !(project.delivery_rate > 0.0) {
            return Err(ScheduleError::NonPositiveDeliveryRate(project.delivery_rate));
        }

        let turbines = project.turbines();
        let window_days = project.erection_window_days();
        let spacing = project.turbine_spacing_distance();

        let mut records = BTreeMap::new();
        for operation in feasibility.operations() {
            for &configuration in feasibility.usable(operation) {
                let config = &self.fleet[configuration];

                let per_turbine = feasibility
                    .lifts_for(configuration, operation)
                    .fold(Time::new::<hour>(0.0), |sum, lift| {
                        let part = &self.components[lift.component];
                        sum + part.lift_height / config.hoist_speed + part.cycle_time(operation)
                    });

                let erection = per_turbine * turbines;
                let travel = spacing / config.travel_speed * turbines;
                let setup = config.setup_time * turbines;
                let total = erection + travel + setup;

                let operational_days = total.get::<hour>() / project.hours_per_day;
                if !operational_days.is_finite() || operational_days < 0.0 {
                    return Err(ScheduleError::UndefinedDays {
                        crane: config.to_string(),
                        operation,
                        days: operational_days,
                    });
                }

                let construction_days = match operation {
                    Operation::Offload => operational_days.max(project.delivery_days()),
                    Operation::Base | Operation::Top if operational_days > window_days => {
                        tracing::warn!(
                            config = %config,
                            %operation,
                            operational_days,
                            window_days,
                            "operation exceeds the erection window, weather exposure capped"
                        );
                        window_days
                    }
                    Operation::Base | Operation::Top => operational_days,
                };

                tracing::debug!(
                    config = %config,
                    %operation,
                    hours = total.get::<hour>(),
                    construction_days,
                    "operation time"
                );

                records.insert(
                    (configuration, operation),
                    OperationTimeRecord {
                        configuration,
                        operation,
                        erection,
                        travel,
                        setup,
                        total,
                        operational_days,
                        construction_days,
                    },
                );
            }
        }

        tracing::info!(records = records.len(), "operation times estimated");
        Ok(OperationTimeTable { records })
    }
}
