//! Designer State — zentrale Datenhaltung einer Bearbeitungssitzung.

use super::history::{EditHistory, Snapshot};
use super::placement::DragState;
use super::CommandLog;
use crate::core::CanvasState;
use crate::shared::DesignerOptions;
use std::path::PathBuf;
use std::sync::Arc;

/// Auswahlbezogener Zustand (nicht Teil des gespeicherten Formulars).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Aktuell selektiertes Element
    pub selected_element_id: Option<String>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ob das Element selektiert ist.
    pub fn is_selected(&self, element_id: &str) -> bool {
        self.selected_element_id.as_deref() == Some(element_id)
    }
}

/// Hauptzustand des Designers
pub struct DesignerState {
    /// Aktueller Canvas (Arc für O(1)-Snapshots)
    pub canvas: Arc<CanvasState>,
    /// Selection-State
    pub selection: SelectionState,
    /// Laufende Drag-Geste
    pub drag: DragState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen
    pub options: DesignerOptions,
    /// Pfad der zuletzt geladenen/gespeicherten Datei
    pub current_file_path: Option<PathBuf>,
    /// Fehler der letzten abgelehnten Property-Änderung
    pub property_errors: Vec<String>,
    /// Statusmeldung für den Host
    pub status_message: Option<String>,
}

impl DesignerState {
    /// Erstellt einen leeren Designer-State mit Standard-Optionen
    pub fn new() -> Self {
        Self::with_options(DesignerOptions::default())
    }

    /// Erstellt einen leeren Designer-State mit den übergebenen Optionen.
    pub fn with_options(options: DesignerOptions) -> Self {
        Self {
            canvas: Arc::new(CanvasState::new(options.default_global_settings())),
            selection: SelectionState::new(),
            drag: DragState::default(),
            command_log: CommandLog::with_capacity(options.command_log_capacity),
            history: EditHistory::new_with_capacity(options.history_depth),
            options,
            current_file_path: None,
            property_errors: Vec::new(),
            status_message: None,
        }
    }

    /// Anzahl der Elemente (für Host-Anzeige)
    pub fn element_count(&self) -> usize {
        self.canvas.len()
    }

    /// Gibt zurück, ob ein Undo-Schritt verfügbar ist.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Erstellt einen Undo-Snapshot des aktuellen Zustands.
    pub fn record_undo_snapshot(&mut self) {
        let snap = Snapshot::from_state(self);
        self.history.record_snapshot(snap);
    }

    /// Mutable Referenz auf den Canvas (klont nur, wenn ein Snapshot ihn teilt).
    pub fn canvas_mut(&mut self) -> &mut CanvasState {
        Arc::make_mut(&mut self.canvas)
    }
}

impl Default for DesignerState {
    fn default() -> Self {
        Self::new()
    }
}
