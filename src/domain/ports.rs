use crate::domain::model::{Area, Service};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Everything a fixture source provides, read together so areas and services
/// always come from the same version of the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureDocument {
    #[serde(default)]
    pub areas: Vec<Area>,
    #[serde(default)]
    pub services: Vec<Service>,
}

/// Static sample data standing in for a backend. Read once, when a store mounts.
pub trait FixtureSource {
    fn load(&self) -> Result<FixtureDocument>;

    fn areas(&self) -> Result<Vec<Area>> {
        Ok(self.load()?.areas)
    }

    fn services(&self) -> Result<Vec<Service>> {
        Ok(self.load()?.services)
    }
}
