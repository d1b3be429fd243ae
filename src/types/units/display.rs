use std::fmt;

use crate::types::units::*;

#[derive(Debug, Clone, Copy)]
pub struct DisplayMass(pub Mass);
#[derive(Debug, Clone, Copy)]
pub struct DisplayLength(pub Length);
#[derive(Debug, Clone, Copy)]
pub struct DisplayVelocity(pub Velocity);
#[derive(Debug, Clone, Copy)]
pub struct DisplayTime(pub Time);

impl fmt::Display for DisplayMass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tonnes = self.0.get::<metric_ton>();
        let lbs = self.0.get::<pound>();
        write!(f, "{:.1} t ({:.0} lbs)", tonnes, lbs)
    }
}

impl fmt::Display for DisplayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meters = self.0.get::<meter>();
        let feet = self.0.get::<foot>();
        write!(f, "{:.2} m ({:.1} ft)", meters, feet)
    }
}

impl fmt::Display for DisplayVelocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mps = self.0.get::<meter_per_second>();
        let mph = self.0.get::<mile_per_hour>();
        write!(f, "{:.1} m/s ({:.1} mph)", mps, mph)
    }
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0.get::<hour>();
        let days = self.0.get::<day>();
        write!(f, "{:.1} h ({:.2} d)", hours, days)
    }
}
