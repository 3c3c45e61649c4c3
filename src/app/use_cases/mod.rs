//! Use-Cases der Application-Layer-Orchestrierung.

pub mod persistence;
pub mod placement;
pub mod properties;
