use std::collections::BTreeMap;

use super::CostError;
use crate::equipment::CraneConfiguration;
use crate::types::*;
use serde::Serialize;

/// Rental terms for one (equipment, crane capacity) class
#[derive(Debug, Clone, Serialize)]
pub struct EquipmentPrice {
    pub equipment_name: String,
    pub crane_capacity: Mass,
    /// USD per hour
    pub hourly: f64,
    /// Gallons per day
    pub fuel_per_day: f64,
}

/// One crew table row: a labor type staffed into a crew
#[derive(Debug, Clone, Serialize)]
pub struct CrewMember {
    pub crew_type: String,
    /// Crew table operation: an erection operation, `Management` or `Mechanical completion`
    pub operation: String,
    pub crew_name: String,
    pub labor_type: String,
    pub workers: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LaborPrice {
    pub labor_type: String,
    /// USD per hour per worker
    pub hourly: f64,
    /// USD per day per worker
    pub per_diem: f64,
}

/// Equipment prices joined on (equipment name, crane capacity)
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    equipment: BTreeMap<(String, u64), EquipmentPrice>,
}

impl PriceBook {
    pub fn new(prices: Vec<EquipmentPrice>) -> Result<Self, CostError> {
        let mut equipment = BTreeMap::new();
        for price in prices {
            let key = (price.equipment_name.clone(), mass_key(price.crane_capacity));
            if equipment.contains_key(&key) {
                return Err(CostError::DuplicateKey {
                    table: "equip_price",
                    key: format!(
                        "{} at {}",
                        price.equipment_name,
                        DisplayMass(price.crane_capacity)
                    ),
                });
            }
            equipment.insert(key, price);
        }
        Ok(Self { equipment })
    }

    pub fn equipment(&self, config: &CraneConfiguration) -> Result<&EquipmentPrice, CostError> {
        self.equipment
            .get(&(config.equipment_name.clone(), mass_key(config.rated_capacity)))
            .ok_or_else(|| CostError::MissingPriceData {
                table: "equip_price",
                key: format!(
                    "{} at {}",
                    config.equipment_name,
                    DisplayMass(config.rated_capacity)
                ),
            })
    }

    pub fn len(&self) -> usize {
        self.equipment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.equipment.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::crane::fleet::tests::spec_row;
    use crate::equipment::CraneFleet;
    use approx::assert_relative_eq;

    #[test]
    fn test_join_on_name_and_capacity() {
        let fleet = CraneFleet::from_specs(&[
            spec_row("Erection crane", "LR1600", "SL8HS", 600.0, (300.0, 100.0)),
            spec_row("Erection crane", "AC500", "Main", 500.0, (200.0, 80.0)),
        ])
        .unwrap();
        let book = PriceBook::new(vec![EquipmentPrice {
            equipment_name: "Erection crane".into(),
            crane_capacity: Mass::new::<metric_ton>(600.0),
            hourly: 750.0,
            fuel_per_day: 120.0,
        }])
        .unwrap();

        let configs = fleet.configurations();
        let large = configs.iter().find(|c| c.crane_name == "LR1600").unwrap();
        let small = configs.iter().find(|c| c.crane_name == "AC500").unwrap();

        assert_relative_eq!(book.equipment(large).unwrap().hourly, 750.0);
        match book.equipment(small) {
            Err(CostError::MissingPriceData { table, key }) => {
                assert_eq!(table, "equip_price");
                assert!(key.starts_with("Erection crane at 500.0 t"));
            }
            other => panic!("expected missing price, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_equipment_price() {
        let row = |hourly| EquipmentPrice {
            equipment_name: "Erection crane".into(),
            crane_capacity: Mass::new::<metric_ton>(600.0),
            hourly,
            fuel_per_day: 120.0,
        };
        match PriceBook::new(vec![row(750.0), row(800.0)]) {
            Err(CostError::DuplicateKey { table, key }) => {
                assert_eq!(table, "equip_price");
                assert!(key.starts_with("Erection crane at 600.0 t"));
            }
            other => panic!("expected duplicate price, got {:?}", other),
        }
    }
}
