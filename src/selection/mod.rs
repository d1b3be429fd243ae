//! Minimum-cost crane selection
//!
//! Separate strategy: the cheapest configuration per operation, offload
//! counted twice. Same-crane strategy: the cheapest configuration erecting
//! both Base and Top, plus the doubled offload minimum. Same-crane is only
//! considered when allowed and wins exact ties.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::cost::{CostRecord, CostTables, SameCraneCost};
use crate::equipment::{ConfigId, CraneFleet};
use crate::types::*;
use serde::Serialize;

/// Construction phase reported on every output line
pub const ERECTION_PHASE: &str = "Erection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strategy {
    SeparateCranes,
    SameCrane,
}

/// Configuration chosen for one operation
#[derive(Debug, Clone, Serialize)]
pub struct SelectedOperation {
    pub operation: Operation,
    pub configuration: ConfigId,
    /// Cranes of this configuration on site
    pub crane_count: u32,
    pub record: CostRecord,
}

impl SelectedOperation {
    /// Cost of the operation with every crane on site
    pub fn line_total(&self) -> f64 {
        self.record.total * self.crane_count as f64
    }
}

/// Erection cost totals, USD
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostSummary {
    pub equipment_rental: f64,
    pub fuel: f64,
    pub labor: f64,
    /// Mobilization and demobilization
    pub mobilization: f64,
    pub total: f64,
}

impl CostSummary {
    fn add_record(&mut self, record: &CostRecord, count: f64) {
        self.equipment_rental += record.equipment_rental * count;
        self.fuel += record.fuel * count;
        self.labor += record.labor * count;
        self.mobilization += 2.0 * record.mobilization * count;
        self.total += record.total * count;
    }

    fn add_same_crane(&mut self, cost: &SameCraneCost) {
        self.equipment_rental += cost.equipment_rental;
        self.fuel += cost.fuel;
        self.labor += cost.labor;
        self.mobilization += 2.0 * cost.mobilization;
        self.total += cost.total;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CostType {
    #[serde(rename = "Equipment rental")]
    EquipmentRental,
    Fuel,
    Labor,
    Mobilization,
    Other,
    Materials,
}

impl CostType {
    pub const ALL: [CostType; 6] = [
        CostType::EquipmentRental,
        CostType::Fuel,
        CostType::Labor,
        CostType::Mobilization,
        CostType::Other,
        CostType::Materials,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CostType::EquipmentRental => "Equipment rental",
            CostType::Fuel => "Fuel",
            CostType::Labor => "Labor",
            CostType::Mobilization => "Mobilization",
            CostType::Other => "Other",
            CostType::Materials => "Materials",
        }
    }
}

impl fmt::Display for CostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One row of the erection cost table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostLine {
    #[serde(rename = "Phase of construction")]
    pub phase: &'static str,
    #[serde(rename = "Type of cost")]
    pub cost_type: CostType,
    #[serde(rename = "Cost USD")]
    pub cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionResult {
    pub strategy: Strategy,
    pub selected: Vec<SelectedOperation>,
    pub summary: CostSummary,
}

impl SelectionResult {
    pub fn breakdown(&self) -> Vec<CostLine> {
        CostType::ALL
            .into_iter()
            .map(|cost_type| CostLine {
                phase: ERECTION_PHASE,
                cost_type,
                cost: match cost_type {
                    CostType::EquipmentRental => self.summary.equipment_rental,
                    CostType::Fuel => self.summary.fuel,
                    CostType::Labor => self.summary.labor,
                    CostType::Mobilization => self.summary.mobilization,
                    CostType::Other | CostType::Materials => 0.0,
                },
            })
            .collect()
    }

    /// Weather-inflated over base hours per selected configuration,
    /// averaged across configurations
    pub fn wind_multiplier(&self) -> f64 {
        let mut hours: BTreeMap<ConfigId, (f64, f64)> = BTreeMap::new();
        for selected in &self.selected {
            let entry = hours.entry(selected.configuration).or_default();
            entry.0 += selected.record.inflated_hours;
            entry.1 += selected.record.base_hours;
        }
        if hours.is_empty() {
            return 1.0;
        }

        hours
            .values()
            .map(|&(inflated, base)| if base > 0.0 { inflated / base } else { 1.0 })
            .sum::<f64>()
            / hours.len() as f64
    }

    pub fn get(&self, operation: Operation) -> Option<&SelectedOperation> {
        self.selected.iter().find(|s| s.operation == operation)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("No priced configuration for the {operation} operation")]
    NoCandidates { operation: Operation },

    #[error("No operations to select cranes for")]
    Empty,
}

pub struct CraneSelector<'a> {
    fleet: &'a CraneFleet,
    allow_same_crane: bool,
}

impl<'a> CraneSelector<'a> {
    pub fn new(fleet: &'a CraneFleet, allow_same_crane: bool) -> Self {
        Self {
            fleet,
            allow_same_crane,
        }
    }

    /// Cost first, then configuration identity
    fn cheaper(&self, a: ConfigId, a_total: f64, b: ConfigId, b_total: f64) -> Ordering {
        a_total
            .total_cmp(&b_total)
            .then_with(|| self.fleet[a].identity_cmp(&self.fleet[b]))
    }

    pub fn select(&self, costs: &CostTables) -> Result<SelectionResult, SelectionError> {
        if costs.separate.is_empty() {
            return Err(SelectionError::Empty);
        }

        let mut separate = Vec::with_capacity(costs.separate.len());
        for (&operation, records) in &costs.separate {
            let best = records
                .iter()
                .min_by(|a, b| self.cheaper(a.configuration, a.total, b.configuration, b.total))
                .ok_or(SelectionError::NoCandidates { operation })?;

            tracing::debug!(
                %operation,
                config = %self.fleet[best.configuration],
                total = best.total,
                "cheapest configuration"
            );

            separate.push(SelectedOperation {
                operation,
                configuration: best.configuration,
                crane_count: operation.crane_count(),
                record: best.clone(),
            });
        }

        let mut summary = CostSummary::default();
        for s in &separate {
            summary.add_record(&s.record, s.crane_count as f64);
        }

        if self.allow_same_crane {
            if let Some(same) = self.cheapest_same_crane(&costs.same_crane) {
                let offload: Vec<&SelectedOperation> = separate
                    .iter()
                    .filter(|s| !s.operation.is_erection())
                    .collect();
                let same_total = same.total + offload.iter().map(|s| s.line_total()).sum::<f64>();

                tracing::debug!(
                    separate_total = summary.total,
                    same_total,
                    config = %self.fleet[same.configuration],
                    "comparing erection strategies"
                );

                if same_total <= summary.total {
                    let mut same_summary = CostSummary::default();
                    same_summary.add_same_crane(same);
                    let mut selected: Vec<SelectedOperation> = same
                        .records
                        .iter()
                        .map(|record| SelectedOperation {
                            operation: record.operation,
                            configuration: record.configuration,
                            crane_count: 1,
                            record: record.clone(),
                        })
                        .collect();
                    for s in offload {
                        same_summary.add_record(&s.record, s.crane_count as f64);
                        selected.push(s.clone());
                    }

                    tracing::info!(total = same_summary.total, "same crane selected for erection");
                    return Ok(SelectionResult {
                        strategy: Strategy::SameCrane,
                        selected,
                        summary: same_summary,
                    });
                }
            }
        }

        tracing::info!(total = summary.total, "separate cranes selected for erection");
        Ok(SelectionResult {
            strategy: Strategy::SeparateCranes,
            selected: separate,
            summary,
        })
    }

    fn cheapest_same_crane<'c>(&self, costs: &'c [SameCraneCost]) -> Option<&'c SameCraneCost> {
        costs
            .iter()
            .min_by(|a, b| self.cheaper(a.configuration, a.total, b.configuration, b.total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::crane::fleet::tests::spec_row;
    use approx::assert_relative_eq;

    fn fleet() -> CraneFleet {
        CraneFleet::from_specs(&[
            spec_row("Erection crane", "LR1600", "SL8HS", 600.0, (300.0, 100.0)),
            spec_row("Erection crane", "AC500", "Main", 500.0, (200.0, 80.0)),
            spec_row("Offload crane", "GMK5250", "Main", 250.0, (60.0, 20.0)),
        ])
        .unwrap()
    }

    fn id(fleet: &CraneFleet, name: &str) -> ConfigId {
        fleet
            .configurations()
            .iter()
            .find(|c| c.crane_name == name)
            .unwrap()
            .id
    }

    fn record(
        configuration: ConfigId,
        operation: Operation,
        labor: f64,
        rental: f64,
        multiplier: f64,
    ) -> CostRecord {
        record_with_hours(configuration, operation, labor, rental, multiplier, 100.0)
    }

    fn record_with_hours(
        configuration: ConfigId,
        operation: Operation,
        labor: f64,
        rental: f64,
        multiplier: f64,
        base_hours: f64,
    ) -> CostRecord {
        let mobilization = 50_000.0;
        CostRecord {
            configuration,
            operation,
            base_hours,
            weather_hours: base_hours * (multiplier - 1.0),
            inflated_hours: base_hours * multiplier,
            wind_multiplier: multiplier,
            labor_days: 10.0,
            labor,
            equipment_rental: rental,
            fuel: 0.0,
            mobilization,
            total: labor + rental + 0.0 + 2.0 * mobilization,
        }
    }

    fn same(records: Vec<CostRecord>, mobilization: f64) -> SameCraneCost {
        let labor = records.iter().map(|r| r.labor).sum::<f64>();
        let equipment_rental = records.iter().map(|r| r.equipment_rental).sum::<f64>();
        SameCraneCost {
            configuration: records[0].configuration,
            records,
            labor,
            equipment_rental,
            fuel: 0.0,
            mobilization,
            total: labor + equipment_rental + 2.0 * mobilization,
        }
    }

    fn tables(fleet: &CraneFleet) -> CostTables {
        let lr = id(fleet, "LR1600");
        let ac = id(fleet, "AC500");
        let gmk = id(fleet, "GMK5250");

        let mut tables = CostTables::default();
        tables.separate.insert(
            Operation::Base,
            vec![
                record(lr, Operation::Base, 15_000.0, 25_000.0, 1.1),
                record(ac, Operation::Base, 10_000.0, 20_000.0, 1.2),
            ],
        );
        tables
            .separate
            .insert(Operation::Top, vec![record(lr, Operation::Top, 10_000.0, 20_000.0, 1.3)]);
        tables.separate.insert(
            Operation::Offload,
            vec![record(gmk, Operation::Offload, 2_000.0, 3_000.0, 1.0)],
        );
        tables.same_crane = vec![same(
            vec![
                record(lr, Operation::Base, 15_000.0, 25_000.0, 1.1),
                record(lr, Operation::Top, 10_000.0, 20_000.0, 1.3),
            ],
            50_000.0,
        )];
        tables
    }

    #[test]
    fn test_separate_minimum_per_operation() {
        let fleet = fleet();
        let result = CraneSelector::new(&fleet, false).select(&tables(&fleet)).unwrap();

        assert_eq!(result.strategy, Strategy::SeparateCranes);
        assert_eq!(result.get(Operation::Base).unwrap().configuration, id(&fleet, "AC500"));
        assert_eq!(result.get(Operation::Top).unwrap().configuration, id(&fleet, "LR1600"));

        let offload = result.get(Operation::Offload).unwrap();
        assert_eq!(offload.line_total(), 2.0 * offload.record.total);

        let expected: f64 = result.selected.iter().map(|s| s.line_total()).sum();
        assert_relative_eq!(result.summary.total, expected);
        assert_relative_eq!(result.summary.total, 130_000.0 + 130_000.0 + 2.0 * 105_000.0);
    }

    #[test]
    fn test_breakdown_sums_to_total() {
        let fleet = fleet();
        let result = CraneSelector::new(&fleet, false).select(&tables(&fleet)).unwrap();
        let lines = result.breakdown();

        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|l| l.phase == "Erection"));
        let sum: f64 = lines.iter().map(|l| l.cost).sum();
        assert_relative_eq!(sum, result.summary.total, epsilon = 1e-6);
        assert_eq!(lines[4].cost, 0.0);
        assert_eq!(lines[5].cost, 0.0);
        assert_relative_eq!(lines[3].cost, 2.0 * 50_000.0 * 4.0);
    }

    #[test]
    fn test_same_crane_when_allowed_and_cheaper() {
        let fleet = fleet();
        let costs = tables(&fleet);

        let disallowed = CraneSelector::new(&fleet, false).select(&costs).unwrap();
        assert_eq!(disallowed.strategy, Strategy::SeparateCranes);

        let allowed = CraneSelector::new(&fleet, true).select(&costs).unwrap();
        assert_eq!(allowed.strategy, Strategy::SameCrane);
        // One mobilization for the erection crane, two offload cranes
        assert_relative_eq!(
            allowed.summary.mobilization,
            2.0 * 50_000.0 + 2.0 * 2.0 * 50_000.0
        );
        assert_relative_eq!(allowed.summary.total, 170_000.0 + 2.0 * 105_000.0);
        // LR1600: (110 + 130) / 200; GMK5250: 1.0
        assert_relative_eq!(allowed.wind_multiplier(), (1.2 + 1.0) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_wind_multiplier_weights_hours_per_configuration() {
        let fleet = fleet();
        let lr = id(&fleet, "LR1600");
        let mut costs = tables(&fleet);
        costs.separate.remove(&Operation::Offload);
        costs.same_crane = vec![same(
            vec![
                record_with_hours(lr, Operation::Base, 5_000.0, 5_000.0, 1.1, 100.0),
                record_with_hours(lr, Operation::Top, 5_000.0, 5_000.0, 1.3, 300.0),
            ],
            50_000.0,
        )];

        let result = CraneSelector::new(&fleet, true).select(&costs).unwrap();
        assert_eq!(result.strategy, Strategy::SameCrane);
        // (110 + 390) / (100 + 300), not the plain mean 1.2
        assert_relative_eq!(result.wind_multiplier(), 1.25, epsilon = 1e-12);
    }

    #[test]
    fn test_exact_tie_prefers_same_crane() {
        let fleet = fleet();
        let lr = id(&fleet, "LR1600");
        let mut costs = tables(&fleet);
        costs.separate.remove(&Operation::Offload);
        // Separate: 130k + 130k; same crane rigged to cost the same
        costs.same_crane = vec![same(
            vec![
                record(lr, Operation::Base, 40_000.0, 50_000.0, 1.0),
                record(lr, Operation::Top, 30_000.0, 40_000.0, 1.0),
            ],
            50_000.0,
        )];
        assert_eq!(costs.same_crane[0].total, 260_000.0);

        let result = CraneSelector::new(&fleet, true).select(&costs).unwrap();
        assert_eq!(result.strategy, Strategy::SameCrane);
    }

    #[test]
    fn test_equal_cost_breaks_ties_by_crane_name() {
        let fleet = fleet();
        let lr = id(&fleet, "LR1600");
        let ac = id(&fleet, "AC500");
        let mut costs = CostTables::default();
        costs.separate.insert(
            Operation::Base,
            vec![
                record(lr, Operation::Base, 10_000.0, 20_000.0, 1.0),
                record(ac, Operation::Base, 10_000.0, 20_000.0, 1.0),
            ],
        );

        let result = CraneSelector::new(&fleet, false).select(&costs).unwrap();
        assert_eq!(result.selected[0].configuration, ac);
    }

    #[test]
    fn test_empty_operation_has_no_candidates() {
        let fleet = fleet();
        let mut costs = CostTables::default();
        costs.separate.insert(Operation::Top, Vec::new());
        assert!(matches!(
            CraneSelector::new(&fleet, false).select(&costs),
            Err(SelectionError::NoCandidates { operation: Operation::Top })
        ));
    }
}
