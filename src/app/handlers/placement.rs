//! Handler für Drag-and-Drop und strukturelle Canvas-Änderungen.
//!
//! Strukturfehler werden geloggt und verworfen; der Canvas bleibt dann unverändert.

use crate::app::placement::{DragSource, DropTarget};
use crate::app::use_cases;
use crate::app::DesignerState;
use crate::fields::FieldRegistry;

/// Beginnt eine Drag-Geste.
pub fn begin_drag(state: &mut DesignerState, source: DragSource) {
    log::debug!("Drag gestartet: {:?}", source);
    state.drag.drag_start(source);
}

/// Aktualisiert das Ablageziel unter dem Zeiger.
pub fn hover(state: &mut DesignerState, target: DropTarget) {
    state.drag.drag_over(target);
}

/// Zeiger hat das Ziel verlassen.
pub fn leave(state: &mut DesignerState) {
    state.drag.drag_leave();
}

/// Bricht die Drag-Geste ab.
pub fn cancel(state: &mut DesignerState) {
    state.drag.cancel();
}

/// Löst den Drop auf und übernimmt ihn.
pub fn commit_drop(state: &mut DesignerState, registry: &FieldRegistry) {
    if let Err(e) = use_cases::placement::commit_drop(state, registry) {
        log::warn!("Drop verworfen: {}", e);
    }
}

/// Entfernt ein Element.
pub fn remove(state: &mut DesignerState, element_id: &str) {
    if let Err(e) = use_cases::placement::remove_element(state, element_id) {
        log::warn!("Entfernen verworfen: {}", e);
    }
}

/// Dupliziert ein Element.
pub fn duplicate(state: &mut DesignerState, element_id: &str) {
    if let Err(e) = use_cases::placement::duplicate_element(state, element_id) {
        log::warn!("Duplizieren verworfen: {}", e);
    }
}
