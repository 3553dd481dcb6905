//! Registration entities: the plant layout hierarchy and the service catalog.
//!
//! Child lists are [`ChildState`] rather than `Option<Vec<_>>` so that a
//! list that was never loaded cannot be mistaken for a loaded, empty one.

use crate::domain::tree::ChildState;
use crate::utils::error::{Result, WizardError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, UUID-shaped identifier. Assigned once and never reassigned.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeId(String);

impl NodeId {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(WizardError::InvalidId { value });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeId {
    type Error = WizardError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub name: String,
    pub id: NodeId,
    #[serde(default)]
    pub sectors: ChildState<Sector>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub name: String,
    pub id: NodeId,
    #[serde(default)]
    pub equipments: ChildState<Equipment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub id: NodeId,
    #[serde(default)]
    pub sets: ChildState<Set>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Set {
    pub name: String,
    pub id: NodeId,
    #[serde(default, rename = "subsets")]
    pub sub_sets: ChildState<SubSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubSet {
    pub name: String,
    pub id: NodeId,
    #[serde(default)]
    pub cips: ChildState<Cip>,
}

/// Leaf of the layout hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cip {
    pub name: String,
    pub id: NodeId,
}

macro_rules! node_ctor {
    ($ty:ident, $field:ident) => {
        impl $ty {
            /// New node with a fresh id and its children not yet loaded.
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    id: NodeId::generate(),
                    $field: ChildState::Unloaded,
                }
            }

            pub fn with_children(
                name: impl Into<String>,
                children: Vec<<Self as crate::domain::tree::Branch>::Child>,
            ) -> Self {
                Self {
                    name: name.into(),
                    id: NodeId::generate(),
                    $field: ChildState::Loaded(children),
                }
            }
        }
    };
}

node_ctor!(Area, sectors);
node_ctor!(Sector, equipments);
node_ctor!(Equipment, sets);
node_ctor!(Set, sub_sets);
node_ctor!(SubSet, cips);

impl Cip {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: NodeId::generate(),
        }
    }
}

/// Maintenance service attached to equipment. Flat, keyed by `id` and shown by `local_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    pub id: NodeId,
    pub local_id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lubricant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lubricant_quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lubricant_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_stop_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_stop: Option<bool>,
}

impl Service {
    pub fn new(
        name: impl Into<String>,
        local_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: NodeId::generate(),
            local_id: local_id.into(),
            description: description.into(),
            period: None,
            execution_time: None,
            priority: None,
            team: None,
            lubricant: None,
            lubricant_quantity: None,
            lubricant_unit: None,
            estimated_time: None,
            estimated_stop_time: None,
            requires_stop: None,
        }
    }
}

/// Looks a service up by its display code.
pub fn find_service_by_local_id<'a>(services: &'a [Service], local_id: &str) -> Option<&'a Service> {
    services.iter().find(|s| s.local_id == local_id)
}
