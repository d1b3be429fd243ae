//! Project data directory loader
//!
//! ```text
//! project.toml      project parameters
//! components.csv    turbine components
//! crane_specs.csv   load chart rows per crane configuration
//! crew.csv          crews and headcounts
//! crew_price.csv    labor rates
//! equip_price.csv   crane rental rates and fuel use
//! weather.csv       wind speed per observation period
//! ```

pub mod records;

pub use records::*;

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::cost::{CostError, PriceBook};
use crate::equipment::{CraneFleet, CraneSpec, FleetError};
use crate::physics::{WeatherError, WeatherWindow};
use crate::pipeline::ProjectInputs;
use crate::project::{ProjectError, ProjectParameters};
use crate::types::*;
use serde::de::DeserializeOwned;

pub const PROJECT_FILE: &str = "project.toml";
pub const COMPONENTS_FILE: &str = "components.csv";
pub const CRANE_SPECS_FILE: &str = "crane_specs.csv";
pub const CREW_FILE: &str = "crew.csv";
pub const CREW_PRICE_FILE: &str = "crew_price.csv";
pub const EQUIP_PRICE_FILE: &str = "equip_price.csv";
pub const WEATHER_FILE: &str = "weather.csv";

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Project file error: {0}")]
    Project(#[from] ProjectError),

    #[error("Crane specification error: {0}")]
    Fleet(#[from] FleetError),

    #[error("Weather data error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Price table error: {0}")]
    Prices(#[from] CostError),
}

/// A project loaded from disk
#[derive(Debug, Clone)]
pub struct ProjectData {
    pub parameters: ProjectParameters,
    pub inputs: ProjectInputs,
}

impl ProjectData {
    pub fn from_directory(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let dir = path.as_ref();

        let parameters = ProjectParameters::from_toml_file(dir.join(PROJECT_FILE))?;
        let project = parameters.resolve()?;

        let components = read_rows::<ComponentRow>(&dir.join(COMPONENTS_FILE))?
            .into_iter()
            .map(|row| row.into_component(project.hub_height, project.breakpoint_fraction))
            .collect::<Vec<_>>();

        let specs: Vec<CraneSpec> = read_rows::<CraneSpecRow>(&dir.join(CRANE_SPECS_FILE))?
            .into_iter()
            .map(CraneSpec::from)
            .collect();
        let fleet = CraneFleet::from_specs(&specs)?;

        let crew = read_rows::<CrewRow>(&dir.join(CREW_FILE))?
            .into_iter()
            .map(Into::into)
            .collect();
        let labor_prices = read_rows::<CrewPriceRow>(&dir.join(CREW_PRICE_FILE))?
            .into_iter()
            .map(Into::into)
            .collect();
        let prices = PriceBook::new(
            read_rows::<EquipmentPriceRow>(&dir.join(EQUIP_PRICE_FILE))?
                .into_iter()
                .map(Into::into)
                .collect(),
        )?;

        let speeds = read_rows::<WeatherRow>(&dir.join(WEATHER_FILE))?
            .into_iter()
            .map(|row| Velocity::new::<meter_per_second>(row.speed_m_per_s))
            .collect();
        let weather = WeatherWindow::new(
            speeds,
            project.weather_measurement_height,
            project.weather_period,
        )?;

        tracing::info!(
            path = %dir.display(),
            components = components.len(),
            configurations = fleet.len(),
            weather_periods = weather.len(),
            "project data loaded"
        );

        Ok(Self {
            parameters,
            inputs: ProjectInputs {
                project,
                components,
                fleet,
                prices,
                crew,
                labor_prices,
                weather,
            },
        })
    }

    pub fn into_inputs(self) -> ProjectInputs {
        self.inputs
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file)
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| DataError::Csv {
            path: path.to_path_buf(),
            source,
        })
}
