//! CSV rows, with the column names of the project tables

use crate::cost::{CrewMember, EquipmentPrice, LaborPrice};
use crate::equipment::{Component, CraneSpec};
use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentRow {
    #[serde(rename = "Component")]
    pub component: String,
    #[serde(rename = "Mass tonne")]
    pub mass_tonne: f64,
    #[serde(rename = "Lift height m")]
    pub lift_height_m: f64,
    #[serde(rename = "Surface area sq m")]
    pub surface_area_sq_m: f64,
    #[serde(rename = "Coeff drag")]
    pub coeff_drag: f64,
    #[serde(rename = "Offload hook height m")]
    pub offload_hook_height_m: f64,
    #[serde(rename = "Cycle time installation hrs")]
    pub cycle_time_installation_hrs: f64,
    #[serde(rename = "Offload cycle time hrs")]
    pub offload_cycle_time_hrs: f64,
}

impl ComponentRow {
    /// Classify against the hub-height breakpoint
    pub fn into_component(self, hub_height: Length, breakpoint: f64) -> Component {
        let lift_height = Length::new::<meter>(self.lift_height_m);
        Component {
            name: self.component,
            mass: Mass::new::<metric_ton>(self.mass_tonne),
            lift_height,
            surface_area: Area::new::<square_meter>(self.surface_area_sq_m),
            drag_coefficient: self.coeff_drag,
            offload_hook_height: Length::new::<meter>(self.offload_hook_height_m),
            install_cycle_time: Time::new::<hour>(self.cycle_time_installation_hrs),
            offload_cycle_time: Time::new::<hour>(self.offload_cycle_time_hrs),
            class: Component::classify(lift_height, hub_height, breakpoint),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CraneSpecRow {
    #[serde(rename = "Equipment name")]
    pub equipment_name: String,
    #[serde(rename = "Crane name")]
    pub crane_name: String,
    #[serde(rename = "Boom system")]
    pub boom_system: String,
    #[serde(rename = "Crane capacity tonne")]
    pub crane_capacity_tonne: f64,
    #[serde(rename = "Max capacity tonne")]
    pub max_capacity_tonne: f64,
    #[serde(rename = "Hub height m")]
    pub hub_height_m: f64,
    #[serde(rename = "Max wind speed m per s")]
    pub max_wind_speed_m_per_s: f64,
    #[serde(rename = "Hoist speed m per min")]
    pub hoist_speed_m_per_min: f64,
    #[serde(rename = "Speed of travel km per hr")]
    pub travel_speed_km_per_hr: f64,
    #[serde(rename = "Setup time hr")]
    pub setup_time_hr: f64,
    #[serde(rename = "Crew type ID")]
    pub crew_type_id: String,
    #[serde(rename = "Mobilization cost USD")]
    pub mobilization_cost_usd: f64,
}

impl From<CraneSpecRow> for CraneSpec {
    fn from(row: CraneSpecRow) -> Self {
        CraneSpec {
            equipment_name: row.equipment_name,
            crane_name: row.crane_name,
            boom_system: row.boom_system,
            rated_capacity: Mass::new::<metric_ton>(row.crane_capacity_tonne),
            chart_capacity: Mass::new::<metric_ton>(row.max_capacity_tonne),
            chart_height: Length::new::<meter>(row.hub_height_m),
            max_wind_speed: Velocity::new::<meter_per_second>(row.max_wind_speed_m_per_s),
            hoist_speed: Velocity::new::<meter_per_second>(row.hoist_speed_m_per_min / 60.0),
            travel_speed: Velocity::new::<kilometer_per_hour>(row.travel_speed_km_per_hr),
            setup_time: Time::new::<hour>(row.setup_time_hr),
            crew_type: row.crew_type_id,
            mobilization_cost: row.mobilization_cost_usd,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrewRow {
    #[serde(rename = "Crew type ID")]
    pub crew_type_id: String,
    #[serde(rename = "Operation")]
    pub operation: String,
    #[serde(rename = "Crew name")]
    pub crew_name: String,
    #[serde(rename = "Labor type ID")]
    pub labor_type_id: String,
    #[serde(rename = "Number of workers")]
    pub number_of_workers: f64,
}

impl From<CrewRow> for CrewMember {
    fn from(row: CrewRow) -> Self {
        CrewMember {
            crew_type: row.crew_type_id,
            operation: row.operation,
            crew_name: row.crew_name,
            labor_type: row.labor_type_id,
            workers: row.number_of_workers,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrewPriceRow {
    #[serde(rename = "Labor type ID")]
    pub labor_type_id: String,
    #[serde(rename = "Hourly rate USD per hour")]
    pub hourly_rate_usd_per_hour: f64,
    #[serde(rename = "Per diem USD per day")]
    pub per_diem_usd_per_day: f64,
}

impl From<CrewPriceRow> for LaborPrice {
    fn from(row: CrewPriceRow) -> Self {
        LaborPrice {
            labor_type: row.labor_type_id,
            hourly: row.hourly_rate_usd_per_hour,
            per_diem: row.per_diem_usd_per_day,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EquipmentPriceRow {
    #[serde(rename = "Equipment name")]
    pub equipment_name: String,
    #[serde(rename = "Crane capacity tonne")]
    pub crane_capacity_tonne: f64,
    #[serde(rename = "Equipment price USD per hour")]
    pub price_usd_per_hour: f64,
    #[serde(rename = "Fuel consumption gal per day")]
    pub fuel_gal_per_day: f64,
}

impl From<EquipmentPriceRow> for EquipmentPrice {
    fn from(row: EquipmentPriceRow) -> Self {
        EquipmentPrice {
            equipment_name: row.equipment_name,
            crane_capacity: Mass::new::<metric_ton>(row.crane_capacity_tonne),
            hourly: row.price_usd_per_hour,
            fuel_per_day: row.fuel_gal_per_day,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeatherRow {
    #[serde(rename = "Speed m per s")]
    pub speed_m_per_s: f64,
}
