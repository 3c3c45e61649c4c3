//! Geteilte Konfiguration für alle Schichten.

pub mod options;

pub use options::DesignerOptions;
