//! Per-domain state container: one step cursor paired with one data value.
//!
//! Every write goes through [`DomainStore::set_cursor`] or
//! [`DomainStore::set_data`]. Both notify all subscribers synchronously, in
//! subscription order, before returning, so consumers never observe a
//! partially applied update. Data is held behind an [`Arc`] and replaced,
//! never mutated, so a [`Snapshot`] taken earlier keeps its value.

use crate::core::cursor::{CursorPolicy, SectionState, StepCursor};
use crate::core::registry::Domain;
use crate::domain::model::Service;
use crate::domain::tree::{ChildState, LayoutTree};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Equipment wizard data: the layout the equipment is placed in and the service catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EquipmentData {
    pub tree: LayoutTree,
    pub services: ChildState<Service>,
}

pub type LayoutStore = DomainStore<LayoutTree>;
pub type EquipmentStore = DomainStore<EquipmentData>;
/// Material and Users wizards only track their step.
pub type CounterStore = DomainStore<()>;

pub struct Snapshot<T> {
    pub cursor: i64,
    pub data: Arc<T>,
    pub revision: u64,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            data: Arc::clone(&self.data),
            revision: self.revision,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("cursor", &self.cursor)
            .field("data", &self.data)
            .field("revision", &self.revision)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<T> = Box<dyn FnMut(&Snapshot<T>)>;

pub struct DomainStore<T> {
    domain: Domain,
    cursor: StepCursor,
    data: Arc<T>,
    revision: u64,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_subscription: u64,
}

impl<T> DomainStore<T> {
    pub fn new(domain: Domain, initial_step: i64, policy: CursorPolicy, data: T) -> Self {
        Self {
            domain,
            cursor: StepCursor::new(domain, initial_step, policy),
            data: Arc::new(data),
            revision: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn get(&self) -> Snapshot<T> {
        Snapshot {
            cursor: self.cursor.current(),
            data: Arc::clone(&self.data),
            revision: self.revision,
        }
    }

    pub fn cursor(&self) -> &StepCursor {
        &self.cursor
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn is_active(&self, section: i64) -> bool {
        self.cursor.is_active(section)
    }

    pub fn sections(&self) -> Vec<(i64, SectionState)> {
        self.cursor.sections().collect()
    }

    /// Moves the cursor. Under [`CursorPolicy::Reject`] an out-of-range step
    /// fails and nothing is broadcast.
    pub fn set_cursor(&mut self, step: i64) -> Result<i64> {
        let stored = self.cursor.advance_to(step)?;
        tracing::debug!(domain = %self.domain, requested = step, stored, "Cursor updated");
        self.commit();
        Ok(stored)
    }

    /// Replaces the data wholesale. Earlier snapshots keep the previous value.
    pub fn set_data(&mut self, data: T) {
        self.data = Arc::new(data);
        tracing::debug!(domain = %self.domain, "Data replaced");
        self.commit();
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot<T>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn commit(&mut self) {
        self.revision += 1;
        let snapshot = self.get();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DomainStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainStore")
            .field("domain", &self.domain)
            .field("cursor", &self.cursor)
            .field("data", &self.data)
            .field("revision", &self.revision)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
