//! Project parameters
//!
//! Read from TOML, resolved into the typed `Project` the cost engine uses.
//!
//! ```toml
//! turbine_count = 100
//! hub_height = { value = 80.0, unit = "m" }
//! rotor_diameter = { value = 77.0, unit = "m" }
//! shift = "normal"
//!
//! [hours_per_day]
//! normal = 10.0
//! long = 12.0
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::types::*;
use serde::{Deserialize, Serialize};

/// Days counted per month of construction duration
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Delivery days per week
pub const WORKING_DAYS_PER_WEEK: f64 = 6.0;

/// Share of the construction duration reserved for erection
pub const ERECTION_SHARE_OF_CONSTRUCTION: f64 = 1.0 / 3.0;

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),

    #[error("No operational hours defined for shift {0}")]
    UnknownShift(String),

    #[error("Invalid value for {field}: {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// Weather data settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherSettings {
    /// Height of the anemometer the wind speeds were recorded at
    #[serde(default = "default_measurement_height")]
    pub measurement_height: LengthValue,

    /// Length of one weather observation
    #[serde(default = "default_period")]
    pub period: TimeValue,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            measurement_height: default_measurement_height(),
            period: default_period(),
        }
    }
}

fn default_measurement_height() -> LengthValue {
    LengthValue::new(100.0, "m")
}

fn default_period() -> TimeValue {
    TimeValue::new(1.0, "h")
}

fn default_overtime_multiplier() -> f64 {
    1.0
}

fn default_wind_shear_exponent() -> f64 {
    0.14
}

fn default_include_offload() -> bool {
    true
}

/// Project parameters as written in `project.toml`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectParameters {
    pub hub_height: LengthValue,

    /// Lifts above `hub_height * breakpoint_fraction` are topping lifts
    pub breakpoint_fraction: f64,

    pub turbine_count: u32,

    /// Turbine spacing in rotor diameters
    pub turbine_spacing: f64,
    pub rotor_diameter: LengthValue,

    /// USD per gallon
    pub fuel_price: f64,

    /// Turbines delivered per week
    pub delivery_rate: f64,

    pub construction_duration_months: f64,

    #[serde(default = "default_overtime_multiplier")]
    pub overtime_multiplier: f64,

    #[serde(default = "default_wind_shear_exponent")]
    pub wind_shear_exponent: f64,

    /// Selected shift, a key of `hours_per_day`
    pub shift: String,
    pub hours_per_day: BTreeMap<String, f64>,

    #[serde(default)]
    pub allow_same_crane: bool,

    #[serde(default = "default_include_offload")]
    pub include_offload: bool,

    #[serde(default)]
    pub weather: WeatherSettings,
}

impl ProjectParameters {
    pub fn from_toml_str(text: &str) -> Result<Self, ProjectError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Convert units, look up the shift and check project-level values
    ///
    /// Hours per day, construction duration and delivery rate are checked by
    /// the scheduler, which reports them as schedule errors.
    pub fn resolve(&self) -> Result<Project, ProjectError> {
        let hours_per_day = *self
            .hours_per_day
            .get(&self.shift)
            .ok_or_else(|| ProjectError::UnknownShift(self.shift.clone()))?;

        let hub_height = self.hub_height.to_length()?;
        let rotor_diameter = self.rotor_diameter.to_length()?;

        positive("hub_height", hub_height.get::<meter>())?;
        positive("rotor_diameter", rotor_diameter.get::<meter>())?;
        positive("breakpoint_fraction", self.breakpoint_fraction)?;
        positive("turbine_count", self.turbine_count as f64)?;
        non_negative("turbine_spacing", self.turbine_spacing)?;
        non_negative("fuel_price", self.fuel_price)?;
        positive("overtime_multiplier", self.overtime_multiplier)?;
        non_negative("wind_shear_exponent", self.wind_shear_exponent)?;

        Ok(Project {
            hub_height,
            breakpoint_fraction: self.breakpoint_fraction,
            turbine_count: self.turbine_count,
            turbine_spacing: self.turbine_spacing,
            rotor_diameter,
            fuel_price: self.fuel_price,
            delivery_rate: self.delivery_rate,
            construction_duration_months: self.construction_duration_months,
            overtime_multiplier: self.overtime_multiplier,
            wind_shear_exponent: self.wind_shear_exponent,
            hours_per_day,
            allow_same_crane: self.allow_same_crane,
            include_offload: self.include_offload,
            weather_measurement_height: self.weather.measurement_height.to_length()?,
            weather_period: self.weather.period.to_time()?,
        })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ProjectError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ProjectError::Invalid { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ProjectError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ProjectError::Invalid { field, value })
    }
}

/// Resolved project parameters
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub hub_height: Length,
    pub breakpoint_fraction: f64,
    pub turbine_count: u32,
    /// In rotor diameters
    pub turbine_spacing: f64,
    pub rotor_diameter: Length,
    /// USD per gallon
    pub fuel_price: f64,
    /// Turbines per week
    pub delivery_rate: f64,
    pub construction_duration_months: f64,
    pub overtime_multiplier: f64,
    pub wind_shear_exponent: f64,
    /// Operational hours per day of the selected shift
    pub hours_per_day: f64,
    pub allow_same_crane: bool,
    pub include_offload: bool,
    pub weather_measurement_height: Length,
    pub weather_period: Time,
}

impl Project {
    pub fn turbines(&self) -> f64 {
        self.turbine_count as f64
    }

    /// Distance between neighbouring turbines
    pub fn turbine_spacing_distance(&self) -> Length {
        self.rotor_diameter * self.turbine_spacing
    }

    /// Nominal erection window in days
    pub fn erection_window_days(&self) -> f64 {
        self.construction_duration_months * ERECTION_SHARE_OF_CONSTRUCTION * DAYS_PER_MONTH
    }

    /// Days needed to receive every turbine at the delivery rate
    pub fn delivery_days(&self) -> f64 {
        self.turbines() / (self.delivery_rate / WORKING_DAYS_PER_WEEK)
    }
}
