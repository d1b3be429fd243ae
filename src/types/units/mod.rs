mod display;
mod explicit_unit_values;

pub use uom::si::f64::{Area, Length, Mass, Time, Velocity};

pub use uom::si::{
    area::{square_foot, square_meter},
    length::{foot, kilometer, meter},
    mass::{kilogram, megagram as metric_ton, pound},
    time::{day, hour, minute},
    velocity::{kilometer_per_hour, meter_per_second, mile_per_hour},
};

pub use display::{DisplayLength, DisplayMass, DisplayTime, DisplayVelocity};
pub use explicit_unit_values::{
    LengthValue, MassValue, TimeValue, UnitError, VelocityValue, WithUnit,
};
