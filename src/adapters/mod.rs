// Adapters layer: concrete fixture sources the stores populate from.

pub mod fixtures;

pub use fixtures::{JsonFixtures, StaticFixtures};
