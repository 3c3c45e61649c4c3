//! Handler für die Selektion.

use crate::app::history::Snapshot;
use crate::app::DesignerState;

/// Setzt die Selektion. Eine tatsächliche Änderung ist ein eigener Undo-Schritt.
fn set_selection(state: &mut DesignerState, next: Option<String>) {
    state.property_errors.clear();
    if state.selection.selected_element_id == next {
        return;
    }
    let before = Snapshot {
        canvas: state.canvas.clone(),
        selection: state.selection.clone(),
    };
    state.selection.selected_element_id = next;
    state.history.record_snapshot(before);
}

/// Selektiert ein Element des Canvas. Unbekannte IDs werden ignoriert.
pub fn select(state: &mut DesignerState, element_id: String) {
    if !state.canvas.contains(&element_id) {
        log::warn!("Selektion ignoriert: Element {} existiert nicht", element_id);
        return;
    }
    set_selection(state, Some(element_id));
}

pub fn clear(state: &mut DesignerState) {
    set_selection(state, None);
}
