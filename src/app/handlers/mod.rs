//! Feature-Handler für DesignerCommand-Verarbeitung.
//!
//! Jeder Handler gruppiert die Command-Ausführung eines Feature-Bereichs.
//! Der Controller dispatcht an die passende Handler-Funktion.

pub mod history;
pub mod persistence;
pub mod placement;
pub mod properties;
pub mod selection;
