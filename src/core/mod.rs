//! Core-Datenmodelle für Formular-Inhalte.
//!
//! - CanvasState: geordnete Elemente plus globale Einstellungen
//! - ElementInstance: ein platziertes Feld mit Typ und Attributen
//! - GlobalSettings: seitenweite Darstellung
//! - CalculationStep: ein Term einer Feldberechnung

pub mod calculation;
pub mod canvas;
pub mod element;
pub mod global_settings;

pub use calculation::{formula_summary, CalculationStep, Operator};
pub use canvas::CanvasState;
pub use element::{Attributes, ElementInstance, FieldSize};
pub use global_settings::{
    GlobalSettings, GlobalSettingsPatch, DEFAULT_BACKGROUND_COLOR, DEFAULT_BORDER_RADIUS,
};
