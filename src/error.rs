//! Fehlertypen der Designer-Engine.
//!
//! Domänenfehler sind `thiserror`-Enums; die Orchestrierung im Controller
//! und im Binary arbeitet mit `anyhow::Result`.

use thiserror::Error;

/// Strukturelle Fehler beim Platzieren, Verschieben oder Ersetzen von Elementen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Ziel- oder Quell-Element existiert nicht (mehr)
    #[error("Element nicht gefunden: {0}")]
    ElementNotFound(String),

    /// ID ist im Canvas bereits vergeben
    #[error("Element-ID bereits vergeben: {0}")]
    DuplicateId(String),

    /// Ersatz-Instanz trägt eine andere ID als das Ziel
    #[error("ID-Konflikt beim Ersetzen: erwartet {expected}, erhalten {found}")]
    IdMismatch { expected: String, found: String },

    /// Palette-Typ ist nicht registriert
    #[error("Unbekannter Feldtyp: {0}")]
    UnknownFieldType(String),

    /// Drop ohne vorherigen Drag-Start
    #[error("Kein aktiver Drag-Vorgang")]
    NotDragging,
}

/// Fehler beim Lesen eines gespeicherten Formular-Envelopes.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// Ungültiges JSON
    #[error("Envelope ist kein gültiges JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON ist gültig, hat aber keine bekannte Form
    #[error("Unbekannte Envelope-Form: {0}")]
    InvalidShape(String),
}

/// Fehler in Berechnungen, Regelprogrammen und Watcher-Callbacks.
///
/// Diese Fehler verlassen nie die Bus-Grenze; sie werden geloggt und als
/// "keine Änderung" behandelt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    /// Syntaxfehler im Regelprogramm
    #[error("Regel-Syntaxfehler in Zeile {line}: {message}")]
    Parse { line: usize, message: String },

    /// Unbekannte Built-in-Funktion
    #[error("Unbekannte Funktion: {0}")]
    UnknownFunction(String),

    /// Falsche Argumentanzahl für eine Built-in-Funktion
    #[error("Funktion {name} erwartet {expected} Argument(e), erhalten {found}")]
    Arity {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Typfehler zur Laufzeit (z.B. Division eines Strings)
    #[error("Typfehler: {0}")]
    Type(String),

    /// Berechnung lieferte keinen endlichen Zahlenwert
    #[error("Berechnung ergibt keinen gültigen Zahlenwert")]
    NonNumeric,

    /// Programm überschreitet das Schrittlimit
    #[error("Regelprogramm überschreitet das Limit von {0} Effekten")]
    TooManyEffects(usize),

    /// Rekursive Benachrichtigung desselben Watchers
    #[error("Rekursiver Watcher-Aufruf für '{0}' verworfen")]
    Reentrant(String),

    /// Fehler in einem registrierten Callback
    #[error("Callback-Fehler: {0}")]
    Callback(String),
}

/// Fehler externer Kollaborateure (Persistenz, Identität, Blob-Speicher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// Datensatz existiert nicht
    #[error("Nicht gefunden: {0}")]
    NotFound(String),

    /// Speicher-Backend meldet einen Fehler
    #[error("Speicherfehler: {0}")]
    Storage(String),

    /// Upload vom Blob-Speicher abgelehnt
    #[error("Upload abgelehnt: {0}")]
    UploadRejected(String),

    /// Upload überschreitet die konfigurierte Maximalgröße
    #[error("Datei zu groß: {size} Bytes (Limit {limit})")]
    TooLarge { size: usize, limit: usize },

    /// Aktion erfordert einen autorisierten Benutzer
    #[error("Nicht autorisiert")]
    Unauthorized,
}

/// Fehler eines Submission-Versuchs.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Es läuft bereits eine Submission
    #[error("Submission läuft bereits")]
    AlreadySubmitting,

    /// Formular wurde bereits abgeschickt
    #[error("Formular wurde bereits abgeschickt")]
    AlreadySubmitted,

    /// Mindestens ein Feld ist ungültig
    #[error("{} Feld(er) ungültig: {}", failed.len(), failed.join(", "))]
    Invalid { failed: Vec<String> },

    /// Persistenz-Kollaborateur schlug fehl
    #[error(transparent)]
    Port(#[from] PortError),

    /// Werte konnten nicht serialisiert/gelesen werden
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}
