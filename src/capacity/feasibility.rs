//! Crane feasibility for every erection operation
//!
//! Checks each component against each candidate configuration's envelope:
//! - Base / Top: (mass, lift height)
//! - Offload: (mass / 2, offload hook height), two cranes share the load
//!
//! A configuration is usable for an operation only when it can lift every
//! component of that operation.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::equipment::{Component, ConfigId, CraneFleet};
use crate::physics::wind_derating::derated_max_wind_speed;
use crate::types::*;
use serde::Serialize;

/// Outcome of one (component, configuration, operation) check
#[derive(Debug, Clone, Serialize)]
pub struct LiftFeasibility {
    /// Index into the project's component table
    pub component: usize,
    pub configuration: ConfigId,
    pub operation: Operation,

    /// Lift point lies strictly inside the envelope
    pub feasible: bool,

    /// Derated maximum wind speed for this lift
    pub max_wind_speed: Velocity,
}

#[derive(Debug, thiserror::Error)]
pub enum FeasibilityError {
    #[error(
        "Unable to find a crane for the {operation} operation \
         that can lift {component} ({mass} at {height})"
    )]
    InfeasibleLift {
        component: String,
        operation: Operation,
        mass: DisplayMass,
        height: DisplayLength,
    },

    #[error("No single crane configuration can lift every component of the {operation} operation")]
    NoUsableConfiguration { operation: Operation },
}

/// Feasibility of every evaluated lift, plus usable configurations per operation
#[derive(Debug, Clone, Default)]
pub struct FeasibilityTable {
    lifts: Vec<LiftFeasibility>,
    usable: BTreeMap<Operation, Vec<ConfigId>>,
    index: BTreeMap<(ConfigId, Operation), Range<usize>>,
}

impl FeasibilityTable {
    /// Operations that were evaluated (non-empty component sets)
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        self.usable.keys().copied()
    }

    /// Configurations able to lift all components of an operation, in load order
    pub fn usable(&self, operation: Operation) -> &[ConfigId] {
        self.usable
            .get(&operation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_usable(&self, configuration: ConfigId, operation: Operation) -> bool {
        self.usable(operation).contains(&configuration)
    }

    pub fn lifts(&self) -> &[LiftFeasibility] {
        &self.lifts
    }

    /// Feasible lifts of one configuration for one operation
    pub fn lifts_for(
        &self,
        configuration: ConfigId,
        operation: Operation,
    ) -> impl Iterator<Item = &LiftFeasibility> {
        let range = self
            .index
            .get(&(configuration, operation))
            .cloned()
            .unwrap_or(0..0);
        self.lifts[range].iter().filter(|lift| lift.feasible)
    }
}

/// Tests components against the fleet's capacity envelopes
pub struct CraneFeasibilityEngine<'a> {
    components: &'a [Component],
    fleet: &'a CraneFleet,
}

impl<'a> CraneFeasibilityEngine<'a> {
    pub fn new(components: &'a [Component], fleet: &'a CraneFleet) -> Self {
        Self { components, fleet }
    }

    /// Operations priced for a project
    pub fn operations(include_offload: bool) -> Vec<Operation> {
        Operation::ALL
            .into_iter()
            .filter(|op| include_offload || op.is_erection())
            .collect()
    }

    /// Check one component against one configuration
    pub fn check(
        &self,
        component: usize,
        configuration: ConfigId,
        operation: Operation,
    ) -> LiftFeasibility {
        let part = &self.components[component];
        let config = &self.fleet[configuration];
        let load = part.hook_load(operation);

        LiftFeasibility {
            component,
            configuration,
            operation,
            feasible: config.envelope.contains(load, part.hook_height(operation)),
            max_wind_speed: derated_max_wind_speed(
                config.max_wind_speed,
                load,
                part.wind_exposed_area(),
            ),
        }
    }

    pub fn evaluate(&self, operations: &[Operation]) -> Result<FeasibilityTable, FeasibilityError> {
        let mut table = FeasibilityTable::default();

        for &operation in operations {
            let members: Vec<usize> = self
                .components
                .iter()
                .enumerate()
                .filter(|(_, c)| c.belongs_to(operation))
                .map(|(i, _)| i)
                .collect();

            if members.is_empty() {
                tracing::debug!(%operation, "no components, operation skipped");
                continue;
            }

            let mut liftable = vec![false; members.len()];
            let mut usable = Vec::new();

            for config in self.fleet.candidates(operation) {
                let start = table.lifts.len();
                let mut all_feasible = true;

                for (slot, &component) in members.iter().enumerate() {
                    let lift = self.check(component, config.id, operation);
                    liftable[slot] |= lift.feasible;
                    all_feasible &= lift.feasible;
                    table.lifts.push(lift);
                }

                table
                    .index
                    .insert((config.id, operation), start..table.lifts.len());
                if all_feasible {
                    usable.push(config.id);
                }
            }

            if let Some(slot) = liftable.iter().position(|ok| !ok) {
                let part = &self.components[members[slot]];
                return Err(FeasibilityError::InfeasibleLift {
                    component: part.name.clone(),
                    operation,
                    mass: DisplayMass(part.hook_load(operation)),
                    height: DisplayLength(part.hook_height(operation)),
                });
            }

            if usable.is_empty() {
                return Err(FeasibilityError::NoUsableConfiguration { operation });
            }

            tracing::info!(
                %operation,
                components = members.len(),
                usable = usable.len(),
                "crane feasibility evaluated"
            );
            table.usable.insert(operation, usable);
        }

        Ok(table)
    }
}
