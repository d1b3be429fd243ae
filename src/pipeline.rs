//! Erection cost pipeline
//!
//! feasibility → operation time → wind delay → cost → selection

use std::io;

use crate::capacity::{CraneFeasibilityEngine, FeasibilityError};
use crate::cost::{CostAggregator, CostError, CrewMember, CrewRoster, LaborPrice, PriceBook};
use crate::equipment::{Component, CraneFleet, FleetError};
use crate::physics::{
    WeatherDelayEstimator, WeatherError, WeatherWindow, WindDelayError, WindDerating,
};
use crate::project::{Project, ProjectError};
use crate::schedule::{OperationTimeEstimator, ScheduleError};
use crate::selection::{CostLine, CraneSelector, SelectionError, SelectionResult};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ErectionError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Feasibility(#[from] FeasibilityError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    WindDelay(#[from] WindDelayError),

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the engine needs for one project
#[derive(Debug, Clone)]
pub struct ProjectInputs {
    pub project: Project,
    pub components: Vec<Component>,
    pub fleet: CraneFleet,
    pub prices: PriceBook,
    pub crew: Vec<CrewMember>,
    pub labor_prices: Vec<LaborPrice>,
    pub weather: WeatherWindow,
}

pub struct ErectionPipeline<'a, E: WeatherDelayEstimator + ?Sized> {
    inputs: &'a ProjectInputs,
    estimator: &'a E,
}

impl<'a, E: WeatherDelayEstimator + ?Sized> ErectionPipeline<'a, E> {
    pub fn new(inputs: &'a ProjectInputs, estimator: &'a E) -> Self {
        Self { inputs, estimator }
    }

    pub fn run(&self) -> Result<ErectionCost, ErectionError> {
        let inputs = self.inputs;
        let project = &inputs.project;
        let span = tracing::info_span!(
            "erection",
            turbines = project.turbine_count,
            configurations = inputs.fleet.len()
        );
        let _guard = span.enter();

        let operations = CraneFeasibilityEngine::operations(project.include_offload);
        let feasibility =
            CraneFeasibilityEngine::new(&inputs.components, &inputs.fleet).evaluate(&operations)?;

        let times = OperationTimeEstimator::new(project, &inputs.components, &inputs.fleet)
            .estimate(&feasibility)?;

        let wind = WindDerating::new(&inputs.weather, self.estimator, project.wind_shear_exponent)
            .evaluate(&inputs.components, &inputs.fleet, &feasibility)?;

        let roster = CrewRoster::build(&inputs.crew, &inputs.labor_prices, project)?;
        let costs = CostAggregator::new(project, &inputs.fleet, &inputs.prices, &roster)
            .aggregate(&times, &wind)?;

        let selection = CraneSelector::new(&inputs.fleet, project.allow_same_crane).select(&costs)?;

        for selected in &selection.selected {
            tracing::info!(
                operation = %selected.operation,
                config = %inputs.fleet[selected.configuration],
                cranes = selected.crane_count,
                cost = selected.line_total(),
                "selected crane"
            );
        }

        Ok(ErectionCost { selection })
    }
}

/// Output of the engine: cost table plus wind multiplier
#[derive(Debug, Clone, Serialize)]
pub struct ErectionCost {
    pub selection: SelectionResult,
}

#[derive(Serialize)]
struct ErectionReport {
    costs: Vec<CostLine>,
    wind_multiplier: f64,
    total: f64,
}

impl ErectionCost {
    pub fn breakdown(&self) -> Vec<CostLine> {
        self.selection.breakdown()
    }

    pub fn wind_multiplier(&self) -> f64 {
        self.selection.wind_multiplier()
    }

    pub fn total(&self) -> f64 {
        self.selection.summary.total
    }

    /// Cost table with `Phase of construction, Type of cost, Cost USD` columns
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), ErectionError> {
        let mut csv = csv::Writer::from_writer(writer);
        for line in self.breakdown() {
            csv.serialize(line)?;
        }
        csv.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, ErectionError> {
        let report = ErectionReport {
            costs: self.breakdown(),
            wind_multiplier: self.wind_multiplier(),
            total: self.total(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::capacity::feasibility::tests::component;
    use crate::cost::crew::tests::{member, price};
    use crate::cost::EquipmentPrice;
    use crate::equipment::crane::fleet::tests::spec_row;
    use crate::physics::ExceedanceDelayEstimator;
    use crate::project::tests::PROJECT_TOML;
    use crate::project::ProjectParameters;
    use crate::selection::{CostType, Strategy};
    use crate::types::*;
    use approx::assert_relative_eq;

    /// Base-only project: one erection crane, calm weather, free fuel
    pub(crate) fn base_only_inputs() -> ProjectInputs {
        let mut project = ProjectParameters::from_toml_str(PROJECT_TOML)
            .unwrap()
            .resolve()
            .unwrap();
        project.turbine_count = 10;
        project.rotor_diameter = Length::new::<meter>(100.0);
        project.fuel_price = 0.0;
        project.delivery_rate = 5.0;
        project.include_offload = false;

        let weather = WeatherWindow::new(
            vec![Velocity::new::<meter_per_second>(5.0); 48],
            Length::new::<meter>(100.0),
            Time::new::<hour>(1.0),
        )
        .unwrap();

        ProjectInputs {
            project,
            components: vec![component("Tower 1", 60.0, 30.0, LiftClass::Base)],
            fleet: CraneFleet::from_specs(&[spec_row(
                "Erection crane",
                "LR1600",
                "SL8HS",
                600.0,
                (300.0, 100.0),
            )])
            .unwrap(),
            prices: PriceBook::new(vec![EquipmentPrice {
                equipment_name: "Erection crane".into(),
                crane_capacity: Mass::new::<metric_ton>(600.0),
                hourly: 500.0,
                fuel_per_day: 100.0,
            }])
            .unwrap(),
            crew: vec![member("LR1600-crew", "Base", "Erection", "Operator", 3.0)],
            labor_prices: vec![price("Operator", 50.0, 100.0)],
            weather,
        }
    }

    /// Base, Top and Offload with two erection cranes and gusty weather
    pub(crate) fn full_inputs() -> ProjectInputs {
        let mut inputs = base_only_inputs();
        inputs.project.include_offload = true;
        inputs.project.fuel_price = 3.5;

        inputs.components.push(component("Tower 2", 50.0, 55.0, LiftClass::Base));
        inputs.components.push(component("Nacelle", 80.0, 90.0, LiftClass::Top));

        inputs.fleet = CraneFleet::from_specs(&[
            spec_row("Erection crane", "LR1600", "SL8HS", 600.0, (300.0, 100.0)),
            spec_row("Erection crane", "AC500", "Main", 500.0, (150.0, 70.0)),
            spec_row("Offload crane", "GMK5250", "Main", 250.0, (60.0, 20.0)),
        ])
        .unwrap();
        inputs.prices = PriceBook::new(vec![
            EquipmentPrice {
                equipment_name: "Erection crane".into(),
                crane_capacity: Mass::new::<metric_ton>(600.0),
                hourly: 500.0,
                fuel_per_day: 100.0,
            },
            EquipmentPrice {
                equipment_name: "Erection crane".into(),
                crane_capacity: Mass::new::<metric_ton>(500.0),
                hourly: 350.0,
                fuel_per_day: 80.0,
            },
            EquipmentPrice {
                equipment_name: "Offload crane".into(),
                crane_capacity: Mass::new::<metric_ton>(250.0),
                hourly: 200.0,
                fuel_per_day: 40.0,
            },
        ])
        .unwrap();
        inputs.crew = vec![
            member("LR1600-crew", "Base", "Erection", "Operator", 3.0),
            member("LR1600-crew", "Top", "Erection", "Operator", 4.0),
            member("AC500-crew", "Base", "Erection", "Operator", 2.0),
            member("AC500-crew", "Top", "Erection", "Operator", 2.0),
            member("GMK5250-crew", "Offload", "Offload", "Operator", 2.0),
            member("Site", "Management", "Management - project size", "Manager", 1.0),
        ];
        inputs.labor_prices = vec![price("Operator", 50.0, 100.0), price("Manager", 90.0, 150.0)];

        let speeds = (0..96)
            .map(|i| Velocity::new::<meter_per_second>(if i % 12 < 3 { 16.0 } else { 6.0 }))
            .collect();
        inputs.weather =
            WeatherWindow::new(speeds, Length::new::<meter>(100.0), Time::new::<hour>(1.0))
                .unwrap();
        inputs
    }

    #[test]
    fn test_base_only_zero_delay_without_fuel() {
        crate::logging::init_test();
        let inputs = base_only_inputs();
        let result = ErectionPipeline::new(&inputs, &ExceedanceDelayEstimator).run().unwrap();

        let selected = result.selection.get(Operation::Base).unwrap();
        let record = &selected.record;
        assert_eq!(record.weather_hours, 0.0);
        assert_eq!(record.wind_multiplier, 1.0);
        assert_eq!(record.fuel, 0.0);

        let hours = record.base_hours;
        let days = (hours / 10.0).round_ties_even();
        let labor = hours * 150.0 + days * 300.0;
        assert_relative_eq!(record.labor, labor);
        assert_relative_eq!(result.total(), hours * 500.0 + labor + 2.0 * 50_000.0);
        assert_relative_eq!(result.wind_multiplier(), 1.0);
        assert!(result.selection.get(Operation::Offload).is_none());
        assert!(result.selection.get(Operation::Top).is_none());
    }

    #[test]
    fn test_full_project_invariants() {
        let inputs = full_inputs();
        let result = ErectionPipeline::new(&inputs, &ExceedanceDelayEstimator).run().unwrap();

        assert_eq!(result.selection.strategy, Strategy::SeparateCranes);
        assert_eq!(result.selection.selected.len(), 3);

        for selected in &result.selection.selected {
            let r = &selected.record;
            assert_eq!(r.total, r.labor + r.equipment_rental + r.fuel + 2.0 * r.mobilization);
            assert!(r.wind_multiplier >= 1.0);
        }

        let offload = result.selection.get(Operation::Offload).unwrap();
        assert_eq!(offload.crane_count, 2);
        assert_eq!(offload.line_total(), 2.0 * offload.record.total);

        let top = result.selection.get(Operation::Top).unwrap();
        assert_eq!(inputs.fleet[top.configuration].crane_name, "LR1600");

        let lines = result.breakdown();
        let sum: f64 = lines.iter().map(|l| l.cost).sum();
        assert_relative_eq!(sum, result.total(), max_relative = 1e-12);
        assert_eq!(lines[0].cost_type, CostType::EquipmentRental);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let inputs = full_inputs();
        let first = ErectionPipeline::new(&inputs, &ExceedanceDelayEstimator).run().unwrap();
        let second = ErectionPipeline::new(&inputs, &ExceedanceDelayEstimator).run().unwrap();

        let bits = |cost: &ErectionCost| -> Vec<u64> {
            cost.breakdown().iter().map(|l| l.cost.to_bits()).collect()
        };
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first.wind_multiplier().to_bits(), second.wind_multiplier().to_bits());
    }

    #[test]
    fn test_missing_top_coverage_is_fatal() {
        let mut inputs = base_only_inputs();
        inputs.components.push(component("Nacelle", 80.0, 120.0, LiftClass::Top));

        match ErectionPipeline::new(&inputs, &ExceedanceDelayEstimator).run() {
            Err(ErectionError::Feasibility(FeasibilityError::InfeasibleLift {
                component,
                operation,
                ..
            })) => {
                assert_eq!(component, "Nacelle");
                assert_eq!(operation, Operation::Top);
            }
            other => panic!("expected infeasible lift, got {:?}", other.map(|c| c.total())),
        }
    }

    #[test]
    fn test_missing_equipment_price_is_reported() {
        let mut inputs = base_only_inputs();
        inputs.prices = PriceBook::new(Vec::new()).unwrap();

        assert!(matches!(
            ErectionPipeline::new(&inputs, &ExceedanceDelayEstimator).run(),
            Err(ErectionError::Cost(CostError::MissingPriceData { table: "equip_price", .. }))
        ));
    }

    #[test]
    fn test_output_writers() {
        let inputs = base_only_inputs();
        let result = ErectionPipeline::new(&inputs, &ExceedanceDelayEstimator).run().unwrap();

        let mut buffer = Vec::new();
        result.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Phase of construction,Type of cost,Cost USD"));
        assert!(lines.next().unwrap().starts_with("Erection,Equipment rental,"));
        assert_eq!(text.lines().count(), 7);

        let json: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(json["costs"][2]["Type of cost"], "Labor");
        assert_eq!(json["wind_multiplier"], 1.0);
    }
}
