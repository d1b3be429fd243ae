use nalgebra as na;
use uom::si::{
    f64::{Length, Mass},
    length::meter,
    mass::megagram,
};

/// Convert UOM Mass to the envelope's capacity axis (tonnes)
#[inline]
pub fn to_chart_mass(mass: Mass) -> f64 {
    mass.get::<megagram>()
}

/// Convert UOM Length to the envelope's height axis (metres)
#[inline]
pub fn to_chart_height(height: Length) -> f64 {
    height.get::<meter>()
}

/// Convert a capacity-axis coordinate (tonnes) back to UOM Mass
#[inline]
pub fn from_chart_mass(value: f64) -> Mass {
    Mass::new::<megagram>(value)
}

/// Convert a height-axis coordinate (metres) back to UOM Length
#[inline]
pub fn from_chart_height(value: f64) -> Length {
    Length::new::<meter>(value)
}

/// Create a mass–height chart point from UOM quantities
pub fn chart_point(mass: Mass, height: Length) -> na::Point2<f64> {
    na::Point2::new(to_chart_mass(mass), to_chart_height(height))
}

/// Extract the capacity coordinate as Mass
pub fn point_mass(point: &na::Point2<f64>) -> Mass {
    from_chart_mass(point.x)
}

/// Extract the height coordinate as Length
pub fn point_height(point: &na::Point2<f64>) -> Length {
    from_chart_height(point.y)
}

/// Exact lookup key for a mass (bit pattern of its kilogram value)
///
/// Masses parsed from the same tonne figure share the same key, which lets
/// price tables join on crane capacity without tolerance matching.
#[inline]
pub fn mass_key(mass: Mass) -> u64 {
    mass.get::<uom::si::mass::kilogram>().to_bits()
}
