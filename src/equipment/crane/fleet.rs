use super::*;
use crate::capacity::envelope::LoadChartPoint;
use std::collections::BTreeMap;
use std::ops::Index;

/// Every crane configuration available to the project
#[derive(Debug, Clone, Default)]
pub struct CraneFleet {
    configurations: Vec<CraneConfiguration>,
}

/// Rows of one configuration, keyed by (equipment, crane, boom, capacity)
///
/// Capacity is keyed by `mass_key`: rated capacities are validated
/// positive and finite first, and for such floats bit order equals numeric
/// order.
type GroupKey = (String, String, String, u64);

impl CraneFleet {
    /// Build configurations from the crane specification table
    ///
    /// Envelopes are validated here so a degenerate chart fails at load time.
    pub fn from_specs(specs: &[CraneSpec]) -> Result<Self, FleetError> {
        if specs.is_empty() {
            return Err(FleetError::Empty);
        }

        validate_crew_types(specs)?;

        let mut mobilization: BTreeMap<CraneKey, f64> = BTreeMap::new();
        let mut groups: BTreeMap<GroupKey, Vec<&CraneSpec>> = BTreeMap::new();

        for spec in specs {
            let capacity = to_chart_mass(spec.rated_capacity);
            if !capacity.is_finite() || capacity <= 0.0 {
                return Err(FleetError::InvalidCapacity {
                    crane: spec.crane_name.clone(),
                    boom: spec.boom_system.clone(),
                    capacity: DisplayMass(spec.rated_capacity),
                });
            }

            let key = CraneKey {
                crane_name: spec.crane_name.clone(),
                boom_system: spec.boom_system.clone(),
            };
            let cost = mobilization.entry(key).or_insert(spec.mobilization_cost);
            *cost = cost.max(spec.mobilization_cost);

            groups
                .entry((
                    spec.equipment_name.clone(),
                    spec.crane_name.clone(),
                    spec.boom_system.clone(),
                    mass_key(spec.rated_capacity),
                ))
                .or_default()
                .push(spec);
        }

        let mut configurations = Vec::with_capacity(groups.len());
        for rows in groups.into_values() {
            let id = ConfigId(configurations.len());
            let config = build_configuration(id, &rows, &mobilization)?;
            tracing::debug!(
                config = %config,
                chart_rows = rows.len(),
                area = config.envelope.area(),
                "built crane configuration"
            );
            configurations.push(config);
        }

        tracing::info!(
            spec_rows = specs.len(),
            configurations = configurations.len(),
            "crane fleet loaded"
        );

        Ok(Self { configurations })
    }

    pub fn configurations(&self) -> &[CraneConfiguration] {
        &self.configurations
    }

    pub fn get(&self, id: ConfigId) -> Option<&CraneConfiguration> {
        self.configurations.get(id.0)
    }

    /// Configurations allowed to perform an operation
    pub fn candidates(&self, operation: Operation) -> impl Iterator<Item = &CraneConfiguration> {
        self.configurations
            .iter()
            .filter(move |c| c.can_perform(operation))
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }
}

impl Index<ConfigId> for CraneFleet {
    type Output = CraneConfiguration;

    fn index(&self, id: ConfigId) -> &CraneConfiguration {
        &self.configurations[id.0]
    }
}

fn build_configuration(
    id: ConfigId,
    rows: &[&CraneSpec],
    mobilization: &BTreeMap<CraneKey, f64>,
) -> Result<CraneConfiguration, FleetError> {
    let first = rows[0];

    let mut max_wind_speed = first.max_wind_speed;
    let mut hoist_speed = first.hoist_speed;
    let mut travel_speed = first.travel_speed;
    let mut setup_time = first.setup_time;

    for row in &rows[1..] {
        if row.max_wind_speed < max_wind_speed {
            max_wind_speed = row.max_wind_speed;
        }
        if row.hoist_speed < hoist_speed {
            hoist_speed = row.hoist_speed;
        }
        if row.travel_speed < travel_speed {
            travel_speed = row.travel_speed;
        }
        if row.setup_time > setup_time {
            setup_time = row.setup_time;
        }
    }

    let chart: Vec<LoadChartPoint> = rows
        .iter()
        .map(|row| LoadChartPoint::new(row.chart_capacity, row.chart_height))
        .collect();

    let envelope = CapacityEnvelope::from_chart(&chart).map_err(|source| FleetError::Envelope {
        crane: first.crane_name.clone(),
        boom: first.boom_system.clone(),
        source,
    })?;

    let key = CraneKey {
        crane_name: first.crane_name.clone(),
        boom_system: first.boom_system.clone(),
    };

    Ok(CraneConfiguration {
        id,
        equipment_name: first.equipment_name.clone(),
        crane_name: first.crane_name.clone(),
        boom_system: first.boom_system.clone(),
        rated_capacity: first.rated_capacity,
        max_wind_speed,
        hoist_speed,
        travel_speed,
        setup_time,
        crew_type: first.crew_type.clone(),
        mobilization_cost: mobilization
            .get(&key)
            .copied()
            .unwrap_or(first.mobilization_cost),
        envelope,
    })
}

/// A crane's crew type must not change with its boom system
fn validate_crew_types(specs: &[CraneSpec]) -> Result<(), FleetError> {
    let mut seen: BTreeMap<&str, &CraneSpec> = BTreeMap::new();

    for spec in specs {
        match seen.get(spec.crane_name.as_str()) {
            Some(first) if first.crew_type != spec.crew_type => {
                return Err(FleetError::InconsistentCrewType {
                    crane: spec.crane_name.clone(),
                    first: first.crew_type.clone(),
                    first_boom: first.boom_system.clone(),
                    second: spec.crew_type.clone(),
                    second_boom: spec.boom_system.clone(),
                });
            }
            Some(_) => {}
            None => {
                seen.insert(spec.crane_name.as_str(), spec);
            }
        }
    }

    Ok(())
}
