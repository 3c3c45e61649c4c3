//! JSON-Envelope für gespeicherte Formulare und Submission-Werte.
//!
//! Das aktuelle Format ist `{"elements": [...], "globalSettings": {...}}`.
//! Der Parser normalisiert zusätzlich ältere Formen (nacktes Array,
//! verschachteltes `elements`-Objekt, fehlende Einstellungen).

pub mod parser;
pub mod writer;

pub use parser::{parse_envelope, parse_values};
pub use writer::{write_envelope, write_values};
