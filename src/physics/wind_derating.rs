//! Wind derating of lifts and the resulting schedule delay
//!
//! Permissible wind speed for a suspended load (Liebherr load chart notes):
//!
//! vmax = vmax_tab * sqrt(1.2 * m_h / A_w)
//!
//! Where:
//! - m_h = hook load (t)
//! - A_w = area exposed to wind = surface area * drag coefficient (m²)
//! - 1.2 = constant (m²/t)
//! - vmax_tab = maximum wind speed in the load chart
//!
//! The chart value is never exceeded.

use std::collections::BTreeMap;

use crate::capacity::feasibility::FeasibilityTable;
use crate::equipment::{Component, ConfigId, CraneFleet};
use crate::physics::weather::{WeatherDelayEstimator, WeatherWindow};
use crate::types::*;
use serde::Serialize;

/// Aerodynamic constant of the permissible wind speed relation (m²/t)
pub const WIND_AREA_CONSTANT: f64 = 1.2;

/// Delays longer than this shut the crew down for the rest of the day
pub const SHUTDOWN_THRESHOLD_HOURS: f64 = 4.0;

/// Hours charged for a shutdown day
pub const SHUTDOWN_DAY_HOURS: f64 = 10.0;

/// Maximum wind speed at which a load may still be lifted
pub fn derated_max_wind_speed(
    tabulated: Velocity,
    hook_load: Mass,
    exposed_area: Area,
) -> Velocity {
    let ratio = WIND_AREA_CONSTANT * to_chart_mass(hook_load) / exposed_area.get::<square_meter>();
    let calculated = tabulated * ratio.sqrt();
    // NaN (no mass, no area) falls through to the chart value
    if calculated < tabulated {
        calculated
    } else {
        tabulated
    }
}

/// Sum of per-day delays after escalating long holds to a full shutdown day
pub fn escalated_delay(delays: &[Time]) -> Time {
    let threshold = Time::new::<hour>(SHUTDOWN_THRESHOLD_HOURS);
    let shutdown = Time::new::<hour>(SHUTDOWN_DAY_HOURS);

    delays
        .iter()
        .fold(Time::new::<hour>(0.0), |total, &delay| {
            if delay > threshold {
                total + shutdown
            } else {
                total + delay
            }
        })
}

/// Share of the weather window lost to wind for one configuration and operation
#[derive(Debug, Clone, Serialize)]
pub struct WindDelayRecord {
    pub configuration: ConfigId,
    pub operation: Operation,

    /// Mean delay fraction across the operation's lifts, in [0, 1)
    pub delay_fraction: f64,

    /// Number of lifts averaged
    pub lifts: usize,
}

impl WindDelayRecord {
    /// Ratio of weather-inflated time to baseline time
    pub fn multiplier(&self) -> f64 {
        1.0 / (1.0 - self.delay_fraction)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WindDelayError {
    #[error(
        "Wind delay fraction {fraction} for the {operation} operation with {crane} / {boom} \
         leaves no working time"
    )]
    DelayCollapse {
        crane: String,
        boom: String,
        operation: Operation,
        fraction: f64,
    },
}

/// Wind delay per usable (configuration, operation)
#[derive(Debug, Clone, Default)]
pub struct WindDelayTable {
    records: BTreeMap<(ConfigId, Operation), WindDelayRecord>,
}

impl WindDelayTable {
    pub fn get(&self, configuration: ConfigId, operation: Operation) -> Option<&WindDelayRecord> {
        self.records.get(&(configuration, operation))
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindDelayRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Queries the weather-delay estimator for every feasible lift
pub struct WindDerating<'a, E: WeatherDelayEstimator + ?Sized> {
    window: &'a WeatherWindow,
    estimator: &'a E,
    shear_exponent: f64,
}

impl<'a, E: WeatherDelayEstimator + ?Sized> WindDerating<'a, E> {
    pub fn new(window: &'a WeatherWindow, estimator: &'a E, shear_exponent: f64) -> Self {
        Self {
            window,
            estimator,
            shear_exponent,
        }
    }

    /// Fraction of the window lost for one lift
    ///
    /// The start of the operation is unknown, so the whole window is the
    /// mission.
    pub fn lift_delay_fraction(&self, critical_wind_speed: Velocity, height: Length) -> f64 {
        let delays = self.estimator.delays(
            self.window,
            0,
            self.window.len(),
            critical_wind_speed,
            height,
            self.shear_exponent,
        );
        escalated_delay(&delays).get::<hour>() / self.window.duration().get::<hour>()
    }

    pub fn evaluate(
        &self,
        components: &[Component],
        fleet: &CraneFleet,
        feasibility: &FeasibilityTable,
    ) -> Result<WindDelayTable, WindDelayError> {
        // Many configurations share chart wind limits; the estimator is pure
        let mut cache: BTreeMap<(u64, u64), f64> = BTreeMap::new();
        let mut records = BTreeMap::new();

        for operation in feasibility.operations() {
            for &configuration in feasibility.usable(operation) {
                let mut sum = 0.0;
                let mut lifts = 0usize;

                for lift in feasibility.lifts_for(configuration, operation) {
                    let height = components[lift.component].lift_height;
                    let key = (
                        lift.max_wind_speed.get::<meter_per_second>().to_bits(),
                        height.get::<meter>().to_bits(),
                    );
                    let fraction = *cache
                        .entry(key)
                        .or_insert_with(|| self.lift_delay_fraction(lift.max_wind_speed, height));
                    sum += fraction;
                    lifts += 1;
                }

                let delay_fraction = if lifts == 0 { 0.0 } else { sum / lifts as f64 };
                if !delay_fraction.is_finite() || !(0.0..1.0).contains(&delay_fraction) {
                    let config = &fleet[configuration];
                    return Err(WindDelayError::DelayCollapse {
                        crane: config.crane_name.clone(),
                        boom: config.boom_system.clone(),
                        operation,
                        fraction: delay_fraction,
                    });
                }

                tracing::debug!(
                    config = %fleet[configuration],
                    %operation,
                    delay_fraction,
                    lifts,
                    "wind delay"
                );

                records.insert(
                    (configuration, operation),
                    WindDelayRecord {
                        configuration,
                        operation,
                        delay_fraction,
                        lifts,
                    },
                );
            }
        }

        tracing::info!(
            records = records.len(),
            estimator_calls = cache.len(),
            "wind delays estimated"
        );

        Ok(WindDelayTable { records })
    }
}
