//! Zustandsmaschine eines Submission-Versuchs.
//!
//! `Editing → Validating → (ungültig → Editing) | (gültig → Submitting →
//! Submitted | Fehler → Editing)`. Werte bleiben in jedem Rückfall erhalten;
//! nur die Fehler-Flags werden neu gesetzt.

use super::validation::{failed_ids, validate_all};
use crate::core::ElementInstance;
use crate::envelope::{parse_values, write_values};
use crate::error::{PortError, SubmitError};
use crate::fields::FieldRegistry;
use crate::ports::{FormStore, SubmissionId};
use indexmap::IndexMap;

/// Phase der Submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    /// Werte werden bearbeitet
    #[default]
    Editing,
    /// Prüfung läuft
    Validating,
    /// Warten auf den Speicher
    Submitting,
    /// Erfolgreich abgeschickt (Endzustand)
    Submitted,
}

/// Sammelt Feldwerte und steuert Validierung und Abschicken.
#[derive(Debug, Default)]
pub struct SubmissionCoordinator {
    phase: SubmissionPhase,
    values: IndexMap<String, String>,
    validity: IndexMap<String, bool>,
    last_error: Option<String>,
    submission_id: Option<SubmissionId>,
    editing: Option<(String, SubmissionId)>,
}

impl SubmissionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lädt eine gespeicherte Submission zur Bearbeitung.
    pub fn load_submission(
        store: &dyn FormStore,
        form_id: &str,
        submission_id: &str,
    ) -> Result<Self, SubmitError> {
        let content = store.load_submission(form_id, submission_id)?;
        let values = parse_values(&content)?;
        log::info!(
            "Submission {}/{} geladen ({} Werte)",
            form_id,
            submission_id,
            values.len()
        );
        Ok(Self {
            values,
            editing: Some((form_id.to_string(), submission_id.to_string())),
            ..Self::default()
        })
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Alle bisher gemeldeten Werte.
    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    pub fn value(&self, element_id: &str) -> Option<&str> {
        self.values.get(element_id).map(String::as_str)
    }

    /// Fehlermeldung des letzten gescheiterten Speicherversuchs.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// ID der erfolgreich angelegten Submission.
    pub fn submission_id(&self) -> Option<&str> {
        self.submission_id.as_deref()
    }

    /// Ob das Feld bei der letzten Prüfung ungültig war.
    pub fn is_invalid(&self, element_id: &str) -> bool {
        self.validity.get(element_id) == Some(&false)
    }

    /// Ergebnisse der letzten Prüfung.
    pub fn validity(&self) -> &IndexMap<String, bool> {
        &self.validity
    }

    /// Meldet einen Feldwert. Nach erfolgreichem Abschicken wird nichts mehr angenommen.
    pub fn submit_value(&mut self, element_id: &str, value: &str) -> bool {
        if self.phase == SubmissionPhase::Submitted {
            log::debug!("Wert für {} nach Abschluss ignoriert", element_id);
            return false;
        }
        self.values
            .insert(element_id.to_string(), value.to_string());
        true
    }

    /// Entfernt den Wert eines nicht mehr gemounteten Feldes.
    pub fn forget_value(&mut self, element_id: &str) -> bool {
        if self.phase == SubmissionPhase::Submitted {
            return false;
        }
        self.validity.shift_remove(element_id);
        self.values.shift_remove(element_id).is_some()
    }

    fn validate<'a>(
        &mut self,
        registry: &FieldRegistry,
        elements: impl IntoIterator<Item = &'a ElementInstance>,
    ) -> Result<String, SubmitError> {
        self.phase = SubmissionPhase::Validating;
        self.validity = validate_all(registry, elements, &self.values);
        let failed = failed_ids(&self.validity);
        if !failed.is_empty() {
            self.phase = SubmissionPhase::Editing;
            log::info!("Submission abgelehnt: {} ungültige Feld(er)", failed.len());
            return Err(SubmitError::Invalid { failed });
        }
        match write_values(&self.values) {
            Ok(payload) => Ok(payload),
            Err(e) => {
                self.phase = SubmissionPhase::Editing;
                Err(e.into())
            }
        }
    }

    /// Prüft alle Felder und wechselt bei Erfolg nach `Submitting`.
    ///
    /// Liefert die serialisierte Wert-Map für den Speicher.
    pub fn begin_submit<'a>(
        &mut self,
        registry: &FieldRegistry,
        elements: impl IntoIterator<Item = &'a ElementInstance>,
    ) -> Result<String, SubmitError> {
        match self.phase {
            SubmissionPhase::Submitting | SubmissionPhase::Validating => {
                return Err(SubmitError::AlreadySubmitting)
            }
            SubmissionPhase::Submitted => return Err(SubmitError::AlreadySubmitted),
            SubmissionPhase::Editing => {}
        }
        let payload = self.validate(registry, elements)?;
        self.phase = SubmissionPhase::Submitting;
        self.last_error = None;
        Ok(payload)
    }

    /// Schließt einen mit `begin_submit` begonnenen Versuch ab.
    pub fn complete_submit(
        &mut self,
        result: Result<SubmissionId, PortError>,
    ) -> Result<SubmissionId, SubmitError> {
        match result {
            Ok(id) => {
                self.phase = SubmissionPhase::Submitted;
                self.submission_id = Some(id.clone());
                log::info!("Formular abgeschickt (Submission {})", id);
                Ok(id)
            }
            Err(e) => {
                self.phase = SubmissionPhase::Editing;
                self.last_error = Some(e.to_string());
                log::warn!("Abschicken fehlgeschlagen: {}", e);
                Err(e.into())
            }
        }
    }

    /// Prüfen, speichern und abschließen in einem Schritt.
    pub fn submit<'a>(
        &mut self,
        registry: &FieldRegistry,
        elements: impl IntoIterator<Item = &'a ElementInstance>,
        store: &mut dyn FormStore,
        form_url: &str,
    ) -> Result<SubmissionId, SubmitError> {
        let payload = self.begin_submit(registry, elements)?;
        let result = store.submit(form_url, &payload);
        self.complete_submit(result)
    }

    /// Schreibt eine mit `load_submission` geladene Submission zurück.
    pub fn update_submission<'a>(
        &mut self,
        registry: &FieldRegistry,
        elements: impl IntoIterator<Item = &'a ElementInstance>,
        store: &mut dyn FormStore,
    ) -> Result<(), SubmitError> {
        let Some((form_id, submission_id)) = self.editing.clone() else {
            return Err(PortError::NotFound("keine geladene Submission".into()).into());
        };
        let payload = self.validate(registry, elements)?;
        let result = store.update_submission(&form_id, &submission_id, &payload);
        self.phase = SubmissionPhase::Editing;
        match result {
            Ok(()) => {
                self.last_error = None;
                log::info!("Submission {}/{} aktualisiert", form_id, submission_id);
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                log::warn!("Aktualisieren fehlgeschlagen: {}", e);
                Err(e.into())
            }
        }
    }
}
