use crate::domain::model::{Area, Cip, Equipment, NodeId, Sector, Service, Set, SubSet};
use crate::domain::ports::{FixtureDocument, FixtureSource};
use crate::domain::tree::ChildState;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Built-in sample plant. Ids are fixed so repeated reads return identical trees.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFixtures;

impl FixtureSource for StaticFixtures {
    fn load(&self) -> Result<FixtureDocument> {
        Ok(FixtureDocument {
            areas: self.sample_areas()?,
            services: self.sample_services()?,
        })
    }
}

impl StaticFixtures {
    fn sample_areas(&self) -> Result<Vec<Area>> {
        Ok(vec![
            Area {
                name: "Utilities".to_string(),
                id: NodeId::new("6f1c2a40-0b1e-4c53-9d55-3a7c1f0e8a01")?,
                sectors: ChildState::Loaded(vec![
                    Sector {
                        name: "Boiler house".to_string(),
                        id: NodeId::new("0d3e8b71-5f2a-4a0c-8c4d-7e9b2a6c1f02")?,
                        equipments: ChildState::Loaded(vec![Equipment {
                            name: "Steam boiler 01".to_string(),
                            id: NodeId::new("a41f9c33-2d7e-4b8a-b1f0-5c6d7e8f9a03")?,
                            sets: ChildState::Loaded(vec![Set {
                                name: "Burner".to_string(),
                                id: NodeId::new("c7d2e4f1-8a9b-4c0d-9e1f-2a3b4c5d6e04")?,
                                sub_sets: ChildState::Loaded(vec![SubSet {
                                    name: "Gas train".to_string(),
                                    id: NodeId::new("e5f6a7b8-c9d0-4e1f-8a2b-3c4d5e6f7a05")?,
                                    cips: ChildState::Loaded(vec![
                                        Cip {
                                            name: "Pilot valve".to_string(),
                                            id: NodeId::new(
                                                "1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c06",
                                            )?,
                                        },
                                        Cip {
                                            name: "Pressure switch".to_string(),
                                            id: NodeId::new(
                                                "2b3c4d5e-6f7a-4b8c-9d0e-1f2a3b4c5d07",
                                            )?,
                                        },
                                    ]),
                                }]),
                            }]),
                        }]),
                    },
                    Sector {
                        name: "Compressed air".to_string(),
                        id: NodeId::new("3c4d5e6f-7a8b-4c9d-8e0f-1a2b3c4d5e08")?,
                        equipments: ChildState::Unloaded,
                    },
                ]),
            },
            Area {
                name: "Production line A".to_string(),
                id: NodeId::new("4d5e6f7a-8b9c-4d0e-9f1a-2b3c4d5e6f09")?,
                sectors: ChildState::Loaded(vec![]),
            },
        ])
    }

    fn sample_services(&self) -> Result<Vec<Service>> {
        Ok(vec![
            Service {
                period: Some("monthly".to_string()),
                execution_time: Some("00:45".to_string()),
                priority: Some("high".to_string()),
                team: Some("Mechanical".to_string()),
                lubricant: Some("Lithium grease EP2".to_string()),
                lubricant_quantity: Some(0.2),
                lubricant_unit: Some("kg".to_string()),
                estimated_time: Some("01:00".to_string()),
                estimated_stop_time: Some("00:30".to_string()),
                requires_stop: Some(true),
                id: NodeId::new("5e6f7a8b-9c0d-4e1f-8a2b-3c4d5e6f7a10")?,
                ..Service::new("Bearing lubrication", "LUB-01", "Grease burner fan bearings")
            },
            Service {
                period: Some("weekly".to_string()),
                team: Some("Operations".to_string()),
                requires_stop: Some(false),
                id: NodeId::new("6f7a8b9c-0d1e-4f2a-9b3c-4d5e6f7a8b11")?,
                ..Service::new("Visual inspection", "INS-01", "Check for leaks and noise")
            },
        ])
    }
}

/// Fixtures read from a JSON document `{ "areas": [...], "services": [...] }`.
#[derive(Debug, Clone)]
pub struct JsonFixtures {
    path: PathBuf,
}

impl JsonFixtures {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FixtureSource for JsonFixtures {
    fn load(&self) -> Result<FixtureDocument> {
        let content = fs::read_to_string(&self.path)?;
        let document: FixtureDocument = serde_json::from_str(&content)?;
        tracing::debug!(
            path = %self.path.display(),
            areas = document.areas.len(),
            services = document.services.len(),
            "Loaded fixture document"
        );
        Ok(document)
    }
}
