//! Use-Case-Funktionen für Laden und Speichern von Formularen.
//! Alle Dateisystem- und Store-Zugriffe des Designers sind hier zentralisiert.

use crate::app::DesignerState;
use crate::core::CanvasState;
use crate::envelope::{parse_envelope, write_envelope};
use crate::fields::FieldRegistry;
use crate::ports::FormStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Verwirft das aktuelle Formular und startet mit einem leeren Canvas.
pub fn new_form(state: &mut DesignerState) {
    state.canvas = Arc::new(CanvasState::new(state.options.default_global_settings()));
    reset_session(state);
    state.current_file_path = None;
    state.status_message = None;
    log::info!("Neues Formular angelegt");
}

/// Lädt einen Envelope aus einer Datei.
///
/// Bei Fehlern bleibt der aktuelle Zustand unverändert.
pub fn load_file(
    state: &mut DesignerState,
    registry: &FieldRegistry,
    path: &Path,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(path)?;
    let canvas = parse_envelope(&content, &state.options.default_global_settings())?;
    install_canvas(state, registry, canvas);
    state.current_file_path = Some(path.to_path_buf());
    log::info!(
        "Formular geladen: {} ({} Elemente)",
        path.display(),
        state.canvas.len()
    );
    Ok(())
}

/// Speichert den Envelope unter `path` oder dem zuletzt verwendeten Pfad.
pub fn save_file(state: &mut DesignerState, path: Option<PathBuf>) -> anyhow::Result<()> {
    let path = path
        .or_else(|| state.current_file_path.clone())
        .ok_or_else(|| anyhow::anyhow!("Kein Speicherpfad bekannt"))?;
    let content = write_envelope(&state.canvas)?;
    std::fs::write(&path, content)?;
    log::info!("Formular gespeichert: {}", path.display());
    state.status_message = Some(format!("Gespeichert: {}", path.display()));
    state.current_file_path = Some(path);
    Ok(())
}

/// Speichert den Envelope über den Persistenz-Kollaborateur.
pub fn save_to_store(
    state: &mut DesignerState,
    store: &mut dyn FormStore,
    form_id: &str,
) -> anyhow::Result<()> {
    let content = write_envelope(&state.canvas)?;
    if let Err(e) = store.save_form(form_id, &content) {
        log::warn!("Speichern von {} fehlgeschlagen: {}", form_id, e);
        state.status_message = Some(e.to_string());
        return Err(e.into());
    }
    log::info!("Formular {} gespeichert ({} Elemente)", form_id, state.canvas.len());
    state.status_message = Some(format!("Formular {form_id} gespeichert"));
    Ok(())
}

/// Lädt einen Envelope über den Persistenz-Kollaborateur.
pub fn load_from_store(
    state: &mut DesignerState,
    registry: &FieldRegistry,
    store: &dyn FormStore,
    form_id: &str,
) -> anyhow::Result<()> {
    let content = store.load_form(form_id)?;
    let canvas = parse_envelope(&content, &state.options.default_global_settings())?;
    install_canvas(state, registry, canvas);
    state.current_file_path = None;
    log::info!(
        "Formular {} geladen ({} Elemente)",
        form_id,
        state.canvas.len()
    );
    Ok(())
}

fn install_canvas(state: &mut DesignerState, registry: &FieldRegistry, canvas: CanvasState) {
    let unknown: Vec<&str> = canvas
        .elements
        .iter()
        .filter(|e| !registry.contains(&e.field_type))
        .map(|e| e.field_type.as_str())
        .collect();
    if !unknown.is_empty() {
        log::warn!(
            "{} Element(e) mit unbekanntem Typ werden übersprungen: {}",
            unknown.len(),
            unknown.join(", ")
        );
    }
    state.canvas = Arc::new(canvas);
    reset_session(state);
    state.status_message = None;
}

fn reset_session(state: &mut DesignerState) {
    state.selection.selected_element_id = None;
    state.drag.cancel();
    state.history.clear();
    state.property_errors.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ElementInstance;
    use crate::ports::MemoryFormStore;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("form-designer-{}.json", uuid::Uuid::new_v4()))
    }

    fn state_with_two() -> DesignerState {
        let mut state = DesignerState::new();
        state
            .canvas_mut()
            .append(ElementInstance::new("a", "TextField"))
            .unwrap();
        state
            .canvas_mut()
            .append(ElementInstance::new("b", "DateField"))
            .unwrap();
        state
    }

    #[test]
    fn save_and_load_file_roundtrip() {
        let registry = FieldRegistry::with_builtins();
        let path = temp_path();
        let mut state = state_with_two();
        save_file(&mut state, Some(path.clone())).unwrap();
        assert_eq!(state.current_file_path.as_deref(), Some(path.as_path()));

        let mut loaded = DesignerState::new();
        loaded.record_undo_snapshot();
        load_file(&mut loaded, &registry, &path).unwrap();
        assert_eq!(loaded.canvas.ids(), vec!["a", "b"]);
        assert!(!loaded.can_undo());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn save_without_path_fails() {
        let mut state = state_with_two();
        assert!(save_file(&mut state, None).is_err());
    }

    #[test]
    fn failed_load_keeps_current_canvas() {
        let registry = FieldRegistry::with_builtins();
        let path = temp_path();
        std::fs::write(&path, "{ kein json").unwrap();

        let mut state = state_with_two();
        assert!(load_file(&mut state, &registry, &path).is_err());
        assert_eq!(state.canvas.len(), 2);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn new_form_clears_everything() {
        let mut state = state_with_two();
        state.selection.selected_element_id = Some("a".into());
        state.record_undo_snapshot();
        new_form(&mut state);
        assert!(state.canvas.is_empty());
        assert!(state.selection.selected_element_id.is_none());
        assert!(!state.can_undo());
    }

    #[test]
    fn store_roundtrip() {
        let registry = FieldRegistry::with_builtins();
        let mut store = MemoryFormStore::new();
        let mut state = state_with_two();
        save_to_store(&mut state, &mut store, "form-1").unwrap();

        let mut loaded = DesignerState::new();
        load_from_store(&mut loaded, &registry, &store, "form-1").unwrap();
        assert_eq!(loaded.canvas.ids(), vec!["a", "b"]);
        assert!(load_from_store(&mut loaded, &registry, &store, "fehlt").is_err());
        assert_eq!(loaded.canvas.len(), 2);
    }
}
