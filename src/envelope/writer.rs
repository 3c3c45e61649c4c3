//! Schreiben von Envelope und Wert-Map.

use crate::core::CanvasState;
use crate::error::EnvelopeError;
use indexmap::IndexMap;

/// Serialisiert einen Canvas als `{elements, globalSettings}`.
pub fn write_envelope(canvas: &CanvasState) -> Result<String, EnvelopeError> {
    Ok(serde_json::to_string(canvas)?)
}

/// Serialisiert die flache Wert-Map einer Submission (`{id: "wert"}`).
pub fn write_values(values: &IndexMap<String, String>) -> Result<String, EnvelopeError> {
    Ok(serde_json::to_string(values)?)
}
