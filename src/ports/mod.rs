//! Schnittstellen zu externen Kollaborateuren.
//!
//! Die Engine kennt Persistenz, Identität und Blob-Speicher nur über diese
//! Traits. `memory` liefert In-Memory-Implementierungen für Tests und das Binary.

mod memory;

pub use memory::{MemoryBlobStore, MemoryFormStore, StaticIdentity};

use crate::error::PortError;
use serde::{Deserialize, Serialize};

/// Opaque Kennung einer hochgeladenen Datei.
pub type FileId = String;

/// Kennung einer gespeicherten Submission.
pub type SubmissionId = String;

/// Angemeldeter Benutzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }
}

/// Persistenz von Formularen und Submissions.
///
/// Inhalte sind opake JSON-Strings (Envelope bzw. Wert-Map).
pub trait FormStore {
    /// Speichert den Envelope eines Formulars.
    fn save_form(&mut self, form_id: &str, content: &str) -> Result<(), PortError>;

    /// Lädt den Envelope eines Formulars.
    fn load_form(&self, form_id: &str) -> Result<String, PortError>;

    /// Legt eine Submission für das unter `form_url` veröffentlichte Formular an.
    fn submit(&mut self, form_url: &str, content: &str) -> Result<SubmissionId, PortError>;

    /// Lädt eine gespeicherte Submission.
    fn load_submission(
        &self,
        form_id: &str,
        submission_id: &str,
    ) -> Result<String, PortError>;

    /// Überschreibt eine gespeicherte Submission.
    fn update_submission(
        &mut self,
        form_id: &str,
        submission_id: &str,
        content: &str,
    ) -> Result<(), PortError>;
}

/// Liefert den aktuell angemeldeten Benutzer.
pub trait IdentityProvider {
    fn current_user(&self) -> Option<User>;
}

/// Binärspeicher für hochgeladene Dateien.
pub trait BlobStore {
    /// Lädt Bytes hoch und liefert eine opake Datei-ID.
    fn upload(&mut self, bytes: &[u8], mime: &str) -> Result<FileId, PortError>;
}
