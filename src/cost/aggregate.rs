//! Per-configuration erection cost
//!
//! For rental hours `h` and wind delay fraction `d`:
//! - inflated hours = h / (1 - d)
//! - equipment rental = inflated hours × hourly price
//! - labor days = round(inflated hours / operational hours per day)
//! - labor = inflated hours × crew hourly + labor days × crew per diem
//!   (crane crew plus management)
//! - fuel = fuel per day × fuel price × labor days
//! - total = labor + rental + fuel + 2 × mobilization

use std::collections::BTreeMap;

use super::{CostError, CrewRoster, PriceBook};
use crate::equipment::{ConfigId, CraneFleet};
use crate::physics::WindDelayTable;
use crate::project::Project;
use crate::schedule::OperationTimeTable;
use crate::types::*;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CostRecord {
    pub configuration: ConfigId,
    pub operation: Operation,

    pub base_hours: f64,
    /// Inflated minus base hours
    pub weather_hours: f64,
    pub inflated_hours: f64,
    pub wind_multiplier: f64,
    pub labor_days: f64,

    pub labor: f64,
    pub equipment_rental: f64,
    pub fuel: f64,
    /// One-way mobilization
    pub mobilization: f64,
    pub total: f64,
}

/// One configuration erecting every Base and Top lift
#[derive(Debug, Clone, Serialize)]
pub struct SameCraneCost {
    pub configuration: ConfigId,
    /// Per-operation records the sums are taken from
    pub records: Vec<CostRecord>,

    pub labor: f64,
    pub equipment_rental: f64,
    pub fuel: f64,
    /// Counted once: the crane stays on site between operations
    pub mobilization: f64,
    pub total: f64,
}

/// Costs under both erection strategies
#[derive(Debug, Clone, Default)]
pub struct CostTables {
    /// Independent configuration per operation
    pub separate: BTreeMap<Operation, Vec<CostRecord>>,
    /// Same configuration for Base and Top
    pub same_crane: Vec<SameCraneCost>,
}

pub struct CostAggregator<'a> {
    project: &'a Project,
    fleet: &'a CraneFleet,
    prices: &'a PriceBook,
    crew: &'a CrewRoster,
}

impl<'a> CostAggregator<'a> {
    pub fn new(
        project: &'a Project,
        fleet: &'a CraneFleet,
        prices: &'a PriceBook,
        crew: &'a CrewRoster,
    ) -> Self {
        Self {
            project,
            fleet,
            prices,
            crew,
        }
    }

    pub fn aggregate(
        &self,
        times: &OperationTimeTable,
        wind: &WindDelayTable,
    ) -> Result<CostTables, CostError> {
        let management = self.crew.management();
        let mut tables = CostTables::default();

        for time in times.iter() {
            let config = &self.fleet[time.configuration];
            let delay = wind
                .get(time.configuration, time.operation)
                .ok_or_else(|| CostError::MissingRecord {
                    stage: "wind delay",
                    crane: config.to_string(),
                    operation: time.operation,
                })?;

            let price = self.prices.equipment(config)?;
            let crew = self.crew.rate(&config.crew_type, time.operation)? + management;

            let base_hours = time.total_hours();
            let inflated_hours = base_hours / (1.0 - delay.delay_fraction);
            let labor_days = (inflated_hours / self.project.hours_per_day).round_ties_even();

            let labor = inflated_hours * crew.hourly + labor_days * crew.per_diem;
            let equipment_rental = inflated_hours * price.hourly;
            let fuel = price.fuel_per_day * self.project.fuel_price * labor_days;
            let mobilization = config.mobilization_cost;

            let record = CostRecord {
                configuration: time.configuration,
                operation: time.operation,
                base_hours,
                weather_hours: inflated_hours - base_hours,
                inflated_hours,
                wind_multiplier: delay.multiplier(),
                labor_days,
                labor,
                equipment_rental,
                fuel,
                mobilization,
                total: labor + equipment_rental + fuel + 2.0 * mobilization,
            };

            tracing::debug!(
                config = %config,
                operation = %record.operation,
                total = record.total,
                "configuration cost"
            );

            tables.separate.entry(time.operation).or_default().push(record);
        }

        tables.same_crane = self.same_crane(&tables.separate);

        tracing::info!(
            separate = tables.separate.values().map(Vec::len).sum::<usize>(),
            same_crane = tables.same_crane.len(),
            "erection costs aggregated"
        );

        Ok(tables)
    }

    /// Configurations holding a record for every erection operation present
    fn same_crane(&self, separate: &BTreeMap<Operation, Vec<CostRecord>>) -> Vec<SameCraneCost> {
        let erection: Vec<Operation> = separate
            .keys()
            .copied()
            .filter(Operation::is_erection)
            .collect();
        if erection.is_empty() {
            return Vec::new();
        }

        let mut by_config: BTreeMap<ConfigId, Vec<CostRecord>> = BTreeMap::new();
        for operation in &erection {
            for record in &separate[operation] {
                by_config
                    .entry(record.configuration)
                    .or_default()
                    .push(record.clone());
            }
        }

        by_config
            .into_iter()
            .filter(|(_, records)| records.len() == erection.len())
            .map(|(configuration, records)| {
                let labor = records.iter().map(|r| r.labor).sum::<f64>();
                let equipment_rental = records.iter().map(|r| r.equipment_rental).sum::<f64>();
                let fuel = records.iter().map(|r| r.fuel).sum::<f64>();
                let mobilization = self.fleet[configuration].mobilization_cost;

                SameCraneCost {
                    configuration,
                    records,
                    labor,
                    equipment_rental,
                    fuel,
                    mobilization,
                    total: labor + equipment_rental + fuel + 2.0 * mobilization,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capacity::CraneFeasibilityEngine;
    use crate::physics::{ExceedanceDelayEstimator, WindDerating};
    use crate::pipeline::ProjectInputs;
    use crate::pipeline::tests::full_inputs;
    use crate::schedule::OperationTimeEstimator;
    use approx::assert_relative_eq;

    fn aggregate(inputs: &ProjectInputs) -> Result<CostTables, CostError> {
        let project = &inputs.project;
        let feasibility = CraneFeasibilityEngine::new(&inputs.components, &inputs.fleet)
            .evaluate(&CraneFeasibilityEngine::operations(true))
            .unwrap();
        let times = OperationTimeEstimator::new(project, &inputs.components, &inputs.fleet)
            .estimate(&feasibility)
            .unwrap();
        let wind = WindDerating::new(
            &inputs.weather,
            &ExceedanceDelayEstimator,
            project.wind_shear_exponent,
        )
        .evaluate(&inputs.components, &inputs.fleet, &feasibility)
        .unwrap();
        let roster = CrewRoster::build(&inputs.crew, &inputs.labor_prices, project)?;
        CostAggregator::new(project, &inputs.fleet, &inputs.prices, &roster)
            .aggregate(&times, &wind)
    }

    #[test]
    fn test_record_arithmetic() {
        let inputs = full_inputs();
        let tables = aggregate(&inputs).unwrap();

        for record in tables.separate.values().flatten() {
            assert_eq!(
                record.total,
                record.labor + record.equipment_rental + record.fuel + 2.0 * record.mobilization
            );
            assert_relative_eq!(
                record.inflated_hours,
                record.base_hours * record.wind_multiplier,
                max_relative = 1e-12
            );
            assert_relative_eq!(record.weather_hours, record.inflated_hours - record.base_hours);
            assert_eq!(record.labor_days, (record.inflated_hours / 10.0).round_ties_even());
        }

        // Base: both erection cranes; Top: LR1600 only; Offload: GMK5250
        assert_eq!(tables.separate[&Operation::Base].len(), 2);
        assert_eq!(tables.separate[&Operation::Top].len(), 1);
        assert_eq!(tables.separate[&Operation::Offload].len(), 1);
    }

    #[test]
    fn test_same_crane_counts_mobilization_once() {
        let inputs = full_inputs();
        let tables = aggregate(&inputs).unwrap();

        assert_eq!(tables.same_crane.len(), 1);
        let same = &tables.same_crane[0];
        assert_eq!(inputs.fleet[same.configuration].crane_name, "LR1600");
        assert_eq!(same.records.len(), 2);

        let labor: f64 = same.records.iter().map(|r| r.labor).sum();
        assert_relative_eq!(same.labor, labor);
        assert_relative_eq!(same.mobilization, 50_000.0);
        assert_eq!(
            same.total,
            same.labor + same.equipment_rental + same.fuel + 2.0 * same.mobilization
        );
    }

    #[test]
    fn test_missing_crew_is_reported() {
        let mut inputs = full_inputs();
        inputs.crew.retain(|m| m.crew_type != "GMK5250-crew");

        match aggregate(&inputs) {
            Err(CostError::MissingPriceData { table, key }) => {
                assert_eq!(table, "crew");
                assert_eq!(key, "GMK5250-crew / Offload");
            }
            other => panic!("expected missing crew, got {:?}", other.map(|t| t.same_crane.len())),
        }
    }
}
