use crate::types::*;
use serde::Serialize;

/// A turbine component lifted during erection (tower section, nacelle, hub, blade...)
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    pub name: String,

    /// Component mass
    pub mass: Mass,

    /// Hook height needed to set the component in place
    pub lift_height: Length,

    /// Surface area exposed to wind while suspended
    pub surface_area: Area,

    /// Drag coefficient of the exposed surface
    pub drag_coefficient: f64,

    /// Hook height needed to unload the component from its truck
    pub offload_hook_height: Length,

    /// Fixed rigging/installation time per turbine
    pub install_cycle_time: Time,

    /// Fixed offloading time per turbine
    pub offload_cycle_time: Time,

    /// Base or Top, from the hub-height breakpoint
    pub class: LiftClass,
}

impl Component {
    /// Classify a lift: above `hub_height * breakpoint` it belongs to topping
    pub fn classify(lift_height: Length, hub_height: Length, breakpoint: f64) -> LiftClass {
        if lift_height > hub_height * breakpoint {
            LiftClass::Top
        } else {
            LiftClass::Base
        }
    }

    /// Whether this component is part of the operation's lift set
    pub fn belongs_to(&self, operation: Operation) -> bool {
        match operation {
            Operation::Offload => true,
            Operation::Base | Operation::Top => self.class.operation() == operation,
        }
    }

    /// Hook load carried by one crane: offloading shares the load between two cranes
    pub fn hook_load(&self, operation: Operation) -> Mass {
        match operation {
            Operation::Offload => self.mass / 2.0,
            Operation::Base | Operation::Top => self.mass,
        }
    }

    /// Hook height the envelope is checked against
    pub fn hook_height(&self, operation: Operation) -> Length {
        match operation {
            Operation::Offload => self.offload_hook_height,
            Operation::Base | Operation::Top => self.lift_height,
        }
    }

    pub fn cycle_time(&self, operation: Operation) -> Time {
        match operation {
            Operation::Offload => self.offload_cycle_time,
            Operation::Base | Operation::Top => self.install_cycle_time,
        }
    }

    /// Area facing the wind, weighted by drag
    pub fn wind_exposed_area(&self) -> Area {
        self.surface_area * self.drag_coefficient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn nacelle() -> Component {
        Component {
            name: "Nacelle".into(),
            mass: Mass::new::<metric_ton>(82.0),
            lift_height: Length::new::<meter>(80.0),
            surface_area: Area::new::<square_meter>(42.0),
            drag_coefficient: 1.2,
            offload_hook_height: Length::new::<meter>(6.0),
            install_cycle_time: Time::new::<hour>(4.0),
            offload_cycle_time: Time::new::<hour>(1.5),
            class: LiftClass::Top,
        }
    }

    #[test]
    fn test_classification_against_breakpoint() {
        let hub = Length::new::<meter>(80.0);
        assert_eq!(Component::classify(Length::new::<meter>(79.0), hub, 0.7), LiftClass::Top);
        assert_eq!(Component::classify(Length::new::<meter>(50.0), hub, 0.7), LiftClass::Base);
        assert_eq!(Component::classify(Length::new::<meter>(30.0), hub, 0.7), LiftClass::Base);
    }

    #[test]
    fn test_offload_halves_hook_load() {
        let c = nacelle();
        assert_relative_eq!(c.hook_load(Operation::Top).get::<metric_ton>(), 82.0);
        assert_relative_eq!(c.hook_load(Operation::Offload).get::<metric_ton>(), 41.0);
        assert_relative_eq!(c.hook_height(Operation::Offload).get::<meter>(), 6.0);
        assert_relative_eq!(c.cycle_time(Operation::Offload).get::<hour>(), 1.5);
    }

    #[test]
    fn test_operation_membership() {
        let c = nacelle();
        assert!(c.belongs_to(Operation::Top));
        assert!(c.belongs_to(Operation::Offload));
        assert!(!c.belongs_to(Operation::Base));
    }

    #[test]
    fn test_wind_exposed_area() {
        assert_relative_eq!(
            nacelle().wind_exposed_area().get::<square_meter>(),
            50.4,
            epsilon = 1e-9
        );
    }
}
