pub mod cursor;
pub mod registry;
pub mod report;
pub mod store;
