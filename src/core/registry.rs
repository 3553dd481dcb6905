//! The provider boundary. A [`WizardRegistry`] is built once at startup and
//! handed to whichever consumer needs a store; reading a store that is not
//! mounted returns [`WizardError::NotMounted`] instead of aborting.

use crate::core::cursor::{CursorPolicy, StepCursor};
use crate::core::store::{CounterStore, EquipmentData, EquipmentStore, LayoutStore};
use crate::domain::ports::FixtureSource;
use crate::domain::tree::{ChildState, LayoutTree};
use crate::utils::error::{Result, WizardError};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Layout,
    Equipment,
    Material,
    Users,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Layout,
        Domain::Equipment,
        Domain::Material,
        Domain::Users,
    ];

    /// Number of accordion sections in this wizard.
    pub fn steps(self) -> u32 {
        match self {
            // one section per hierarchy level, Area through Cip
            Domain::Layout => 6,
            Domain::Equipment => 6,
            Domain::Material => 4,
            Domain::Users => 3,
        }
    }

    pub fn default_initial_step(self) -> i64 {
        match self {
            Domain::Equipment => 6,
            Domain::Layout | Domain::Material | Domain::Users => 1,
        }
    }

    /// Layout population ships disabled; only Equipment fills from fixtures on mount.
    pub fn populates_by_default(self) -> bool {
        matches!(self, Domain::Equipment)
    }

    fn has_tree(self) -> bool {
        matches!(self, Domain::Layout | Domain::Equipment)
    }

    pub fn name(self) -> &'static str {
        match self {
            Domain::Layout => "layout",
            Domain::Equipment => "equipment",
            Domain::Material => "material",
            Domain::Users => "users",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainSettings {
    pub initial_step: i64,
    pub populate_on_mount: bool,
}

impl DomainSettings {
    pub fn defaults_for(domain: Domain) -> Self {
        Self {
            initial_step: domain.default_initial_step(),
            populate_on_mount: domain.populates_by_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryOptions {
    pub policy: CursorPolicy,
    settings: [DomainSettings; 4],
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            policy: CursorPolicy::default(),
            settings: Domain::ALL.map(DomainSettings::defaults_for),
        }
    }
}

impl RegistryOptions {
    pub fn with_policy(mut self, policy: CursorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_settings(mut self, domain: Domain, settings: DomainSettings) -> Self {
        self.settings[domain as usize] = settings;
        self
    }

    pub fn settings(&self, domain: Domain) -> DomainSettings {
        self.settings[domain as usize]
    }
}

#[derive(Debug, Default)]
pub struct WizardRegistry {
    options: RegistryOptions,
    layout: Option<LayoutStore>,
    equipment: Option<EquipmentStore>,
    material: Option<CounterStore>,
    users: Option<CounterStore>,
}

impl WizardRegistry {
    pub fn new(options: RegistryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Creates a fresh store for `domain`, replacing any mounted one. Fixture
    /// data is read at most once here and never refreshed.
    pub fn mount(&mut self, domain: Domain, fixtures: &dyn FixtureSource) -> Result<()> {
        let settings = self.options.settings(domain);
        let policy = self.options.policy;
        let step = settings.initial_step;

        match domain {
            Domain::Layout => {
                let tree = if settings.populate_on_mount {
                    LayoutTree::build(fixtures.load()?.areas)
                } else {
                    LayoutTree::empty()
                };
                self.layout = Some(LayoutStore::new(domain, step, policy, tree));
            }
            Domain::Equipment => {
                let data = if settings.populate_on_mount {
                    let document = fixtures.load()?;
                    EquipmentData {
                        tree: LayoutTree::build(document.areas),
                        services: ChildState::Loaded(document.services),
                    }
                } else {
                    EquipmentData::default()
                };
                self.equipment = Some(EquipmentStore::new(domain, step, policy, data));
            }
            Domain::Material => {
                self.material = Some(CounterStore::new(domain, step, policy, ()));
            }
            Domain::Users => {
                self.users = Some(CounterStore::new(domain, step, policy, ()));
            }
        }

        tracing::info!(
            domain = %domain,
            initial_step = step,
            populated = settings.populate_on_mount && domain.has_tree(),
            "Mounted store"
        );
        Ok(())
    }

    /// Discards the store. Returns whether one was mounted.
    pub fn unmount(&mut self, domain: Domain) -> bool {
        let was_mounted = match domain {
            Domain::Layout => self.layout.take().is_some(),
            Domain::Equipment => self.equipment.take().is_some(),
            Domain::Material => self.material.take().is_some(),
            Domain::Users => self.users.take().is_some(),
        };
        if was_mounted {
            tracing::info!(domain = %domain, "Unmounted store");
        }
        was_mounted
    }

    pub fn is_mounted(&self, domain: Domain) -> bool {
        match domain {
            Domain::Layout => self.layout.is_some(),
            Domain::Equipment => self.equipment.is_some(),
            Domain::Material => self.material.is_some(),
            Domain::Users => self.users.is_some(),
        }
    }

    pub fn mounted(&self) -> Vec<Domain> {
        Domain::ALL
            .into_iter()
            .filter(|domain| self.is_mounted(*domain))
            .collect()
    }

    /// Fails with the misuse error when `domain` has no mounted store.
    pub fn ensure_mounted(&self, domain: Domain) -> Result<()> {
        if self.is_mounted(domain) {
            Ok(())
        } else {
            Err(WizardError::NotMounted { domain })
        }
    }

    pub fn layout(&self) -> Result<&LayoutStore> {
        self.layout.as_ref().ok_or(WizardError::NotMounted {
            domain: Domain::Layout,
        })
    }

    pub fn layout_mut(&mut self) -> Result<&mut LayoutStore> {
        self.layout.as_mut().ok_or(WizardError::NotMounted {
            domain: Domain::Layout,
        })
    }

    pub fn equipment(&self) -> Result<&EquipmentStore> {
        self.equipment.as_ref().ok_or(WizardError::NotMounted {
            domain: Domain::Equipment,
        })
    }

    pub fn equipment_mut(&mut self) -> Result<&mut EquipmentStore> {
        self.equipment.as_mut().ok_or(WizardError::NotMounted {
            domain: Domain::Equipment,
        })
    }

    pub fn material(&self) -> Result<&CounterStore> {
        self.material.as_ref().ok_or(WizardError::NotMounted {
            domain: Domain::Material,
        })
    }

    pub fn material_mut(&mut self) -> Result<&mut CounterStore> {
        self.material.as_mut().ok_or(WizardError::NotMounted {
            domain: Domain::Material,
        })
    }

    pub fn users(&self) -> Result<&CounterStore> {
        self.users.as_ref().ok_or(WizardError::NotMounted {
            domain: Domain::Users,
        })
    }

    pub fn users_mut(&mut self) -> Result<&mut CounterStore> {
        self.users.as_mut().ok_or(WizardError::NotMounted {
            domain: Domain::Users,
        })
    }

    /// Moves the cursor of any mounted domain.
    pub fn set_cursor(&mut self, domain: Domain, step: i64) -> Result<i64> {
        match domain {
            Domain::Layout => self.layout_mut()?.set_cursor(step),
            Domain::Equipment => self.equipment_mut()?.set_cursor(step),
            Domain::Material => self.material_mut()?.set_cursor(step),
            Domain::Users => self.users_mut()?.set_cursor(step),
        }
    }

    pub fn cursor(&self, domain: Domain) -> Result<&StepCursor> {
        match domain {
            Domain::Layout => Ok(self.layout()?.cursor()),
            Domain::Equipment => Ok(self.equipment()?.cursor()),
            Domain::Material => Ok(self.material()?.cursor()),
            Domain::Users => Ok(self.users()?.cursor()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Area, Service};
    use crate::domain::ports::FixtureDocument;
    use std::cell::Cell;

    #[derive(Default)]
    struct OneArea {
        loads: Cell<usize>,
    }

    impl FixtureSource for OneArea {
        fn load(&self) -> Result<FixtureDocument> {
            self.loads.set(self.loads.get() + 1);
            Ok(FixtureDocument {
                areas: vec![Area::new("Utilities")],
                services: vec![Service::new("Inspection", "INS-01", "Visual check")],
            })
        }
    }

    #[test]
    fn test_unmounted_access_is_misuse() {
        let registry = WizardRegistry::default();
        let err = registry.layout().unwrap_err();
        assert!(err.is_misuse());
        assert!(matches!(
            registry.ensure_mounted(Domain::Users),
            Err(WizardError::NotMounted {
                domain: Domain::Users
            })
        ));
    }

    #[test]
    fn test_mount_and_unmount() {
        let mut registry = WizardRegistry::default();
        registry.mount(Domain::Material, &OneArea::default()).unwrap();
        assert_eq!(registry.mounted(), vec![Domain::Material]);
        assert_eq!(registry.material().unwrap().get().cursor, 1);

        assert!(registry.unmount(Domain::Material));
        assert!(!registry.unmount(Domain::Material));
        assert!(registry.material().is_err());
    }

    #[test]
    fn test_layout_population_can_be_enabled() {
        let options = RegistryOptions::default().with_settings(
            Domain::Layout,
            DomainSettings {
                initial_step: 2,
                populate_on_mount: true,
            },
        );
        let mut registry = WizardRegistry::new(options);
        registry.mount(Domain::Layout, &OneArea::default()).unwrap();

        let snapshot = registry.layout().unwrap().get();
        assert_eq!(snapshot.cursor, 2);
        assert_eq!(snapshot.data.areas.as_loaded().map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_fixtures_read_once_per_mount() {
        let fixtures = OneArea::default();
        let options = RegistryOptions::default().with_settings(
            Domain::Layout,
            DomainSettings {
                initial_step: 1,
                populate_on_mount: true,
            },
        );
        let mut registry = WizardRegistry::new(options);

        registry.mount(Domain::Equipment, &fixtures).unwrap();
        assert_eq!(fixtures.loads.get(), 1);
        let snapshot = registry.equipment().unwrap().get();
        assert_eq!(snapshot.data.tree.areas.as_loaded().map(<[_]>::len), Some(1));
        assert_eq!(snapshot.data.services.as_loaded().map(<[_]>::len), Some(1));

        registry.mount(Domain::Layout, &fixtures).unwrap();
        assert_eq!(fixtures.loads.get(), 2);

        registry.mount(Domain::Users, &fixtures).unwrap();
        assert_eq!(fixtures.loads.get(), 2);
    }

    #[test]
    fn test_remount_resets_state() {
        let fixtures = OneArea::default();
        let mut registry = WizardRegistry::default();
        registry.mount(Domain::Users, &fixtures).unwrap();
        registry.set_cursor(Domain::Users, 3).unwrap();
        registry.mount(Domain::Users, &fixtures).unwrap();
        assert_eq!(registry.cursor(Domain::Users).unwrap().current(), 1);
    }

    #[test]
    fn test_policy_reaches_every_store() {
        let options = RegistryOptions::default().with_policy(CursorPolicy::Clamp);
        let mut registry = WizardRegistry::new(options);
        registry.mount(Domain::Equipment, &OneArea::default()).unwrap();
        assert_eq!(registry.set_cursor(Domain::Equipment, 42).unwrap(), 6);
    }
}
