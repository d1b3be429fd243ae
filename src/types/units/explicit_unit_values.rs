use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use uom::si::{
    f64::{Length, Mass, Time, Velocity},
    length::{foot, kilometer, meter},
    mass::{kilogram, megagram, pound, ton_short},
    time::{day, hour, minute},
    velocity::{kilometer_per_hour, meter_per_second, mile_per_hour},
};

/// A raw value tagged with the unit it was written in (config files, tables)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WithUnit<T> {
    pub value: f64,
    pub unit: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

pub type LengthValue = WithUnit<Length>;
pub type MassValue = WithUnit<Mass>;
pub type VelocityValue = WithUnit<Velocity>;
pub type TimeValue = WithUnit<Time>;

impl<T> WithUnit<T> {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            _marker: PhantomData,
        }
    }

    /// Unit string folded for matching ("Metres" and "metres" are the same unit)
    fn unit_key(&self) -> String {
        self.unit.trim().to_ascii_lowercase()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown length unit: {0}")]
    UnknownLengthUnit(String),

    #[error("Unknown mass unit: {0}")]
    UnknownMassUnit(String),

    #[error("Unknown velocity unit: {0}")]
    UnknownVelocityUnit(String),

    #[error("Unknown time unit: {0}")]
    UnknownTimeUnit(String),
}

impl WithUnit<Length> {
    pub fn to_length(&self) -> Result<Length, UnitError> {
        match self.unit_key().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Length::new::<meter>(self.value)),
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => {
                Ok(Length::new::<kilometer>(self.value))
            }
            "ft" | "foot" | "feet" => Ok(Length::new::<foot>(self.value)),
            _ => Err(UnitError::UnknownLengthUnit(self.unit.clone())),
        }
    }
}

impl WithUnit<Mass> {
    pub fn to_mass(&self) -> Result<Mass, UnitError> {
        match self.unit_key().as_str() {
            "t" | "tonne" | "tonnes" | "metric ton" | "metric tons" => {
                Ok(Mass::new::<megagram>(self.value))
            }
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(Mass::new::<kilogram>(self.value)),
            "lb" | "lbs" | "pound" | "pounds" => Ok(Mass::new::<pound>(self.value)),
            "short ton" | "short tons" => Ok(Mass::new::<ton_short>(self.value)),
            _ => Err(UnitError::UnknownMassUnit(self.unit.clone())),
        }
    }
}

impl WithUnit<Velocity> {
    pub fn to_velocity(&self) -> Result<Velocity, UnitError> {
        match self.unit_key().as_str() {
            "m/s" | "mps" | "meter per second" | "meters per second" => {
                Ok(Velocity::new::<meter_per_second>(self.value))
            }
            // Hoist speeds are charted per minute; uom has no metre-per-minute unit
            "m/min" | "meters per minute" => {
                Ok(Velocity::new::<meter_per_second>(self.value / 60.0))
            }
            "km/h" | "kph" | "kilometers per hour" => {
                Ok(Velocity::new::<kilometer_per_hour>(self.value))
            }
            "mph" | "mi/h" | "miles per hour" => Ok(Velocity::new::<mile_per_hour>(self.value)),
            _ => Err(UnitError::UnknownVelocityUnit(self.unit.clone())),
        }
    }
}

impl WithUnit<Time> {
    pub fn to_time(&self) -> Result<Time, UnitError> {
        match self.unit_key().as_str() {
            "h" | "hr" | "hrs" | "hour" | "hours" => Ok(Time::new::<hour>(self.value)),
            "min" | "minute" | "minutes" => Ok(Time::new::<minute>(self.value)),
            "d" | "day" | "days" => Ok(Time::new::<day>(self.value)),
            _ => Err(UnitError::UnknownTimeUnit(self.unit.clone())),
        }
    }
}
