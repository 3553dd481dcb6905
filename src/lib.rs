pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::WizardConfig;

pub use crate::adapters::{JsonFixtures, StaticFixtures};
pub use crate::core::cursor::{CursorPolicy, SectionState, StepCursor};
pub use crate::core::registry::{Domain, DomainSettings, RegistryOptions, WizardRegistry};
pub use crate::core::report::{build_report, render_text, DomainReport};
pub use crate::core::store::{
    CounterStore, DomainStore, EquipmentData, EquipmentStore, LayoutStore, Snapshot,
};
pub use crate::domain::ports::{FixtureDocument, FixtureSource};
pub use crate::domain::tree::{ChildState, LayoutTree, NodeKind};
pub use crate::utils::error::{Result, WizardError};
