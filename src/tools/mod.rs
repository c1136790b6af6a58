//! Registries and the concrete tools/resources served by this binary.

pub mod database;
pub mod registry;
