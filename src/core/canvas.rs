//! Canvas: geordnete Folge von Element-Instanzen plus globale Einstellungen.
//!
//! Die Reihenfolge ist gleichzeitig Layout- und Serialisierungsreihenfolge.
//! Strukturelle Mutationen laufen ausschließlich über die drei Primitive
//! `insert_at`, `remove_by_id` und `replace_by_id`; Indizes werden nie gecacht,
//! sondern bei Bedarf über `index_of` neu ermittelt.

use super::{ElementInstance, GlobalSettings, GlobalSettingsPatch};
use crate::error::PlacementError;
use serde::{Deserialize, Serialize};

/// Inhalt eines Formulars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasState {
    /// Elemente in Anzeigereihenfolge
    pub elements: Vec<ElementInstance>,
    /// Seitenweite Einstellungen
    #[serde(default)]
    pub global_settings: GlobalSettings,
}

impl CanvasState {
    /// Erstellt einen leeren Canvas mit den übergebenen Einstellungen.
    pub fn new(global_settings: GlobalSettings) -> Self {
        Self {
            elements: Vec::new(),
            global_settings,
        }
    }

    /// Anzahl der Elemente.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Ob der Canvas leer ist.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Aktueller Index eines Elements (lineare Suche, kein Cache).
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// Gibt das Element mit der ID zurück.
    pub fn get(&self, id: &str) -> Option<&ElementInstance> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Ob ein Element mit dieser ID existiert.
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    /// Fügt ein Element an `index` ein (geklemmt auf `len`).
    ///
    /// Schlägt fehl, wenn die ID bereits vergeben ist; der Canvas bleibt dann unverändert.
    pub fn insert_at(
        &mut self,
        index: usize,
        element: ElementInstance,
    ) -> Result<usize, PlacementError> {
        if self.contains(&element.id) {
            return Err(PlacementError::DuplicateId(element.id));
        }
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        Ok(index)
    }

    /// Hängt ein Element ans Ende an.
    pub fn append(&mut self, element: ElementInstance) -> Result<usize, PlacementError> {
        let len = self.elements.len();
        self.insert_at(len, element)
    }

    /// Entfernt ein Element per ID und gibt es zurück.
    pub fn remove_by_id(&mut self, id: &str) -> Result<ElementInstance, PlacementError> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PlacementError::ElementNotFound(id.to_string()))?;
        Ok(self.elements.remove(index))
    }

    /// Ersetzt ein Element per ID. Die neue Instanz muss dieselbe ID tragen.
    pub fn replace_by_id(
        &mut self,
        id: &str,
        element: ElementInstance,
    ) -> Result<(), PlacementError> {
        if element.id != id {
            return Err(PlacementError::IdMismatch {
                expected: id.to_string(),
                found: element.id,
            });
        }
        let index = self
            .index_of(id)
            .ok_or_else(|| PlacementError::ElementNotFound(id.to_string()))?;
        self.elements[index] = element;
        Ok(())
    }

    /// Übernimmt ein Teil-Update der globalen Einstellungen.
    pub fn update_global_settings(&mut self, patch: GlobalSettingsPatch) {
        self.global_settings.apply(patch);
    }

    /// Prüft die Eindeutigkeit aller IDs.
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.elements.len());
        self.elements.iter().all(|el| seen.insert(el.id.as_str()))
    }

    /// IDs in Anzeigereihenfolge.
    pub fn ids(&self) -> Vec<&str> {
        self.elements.iter().map(|el| el.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas_abc() -> CanvasState {
        let mut canvas = CanvasState::default();
        for id in ["a", "b", "c"] {
            canvas
                .append(ElementInstance::new(id, "TextField"))
                .expect("append");
        }
        canvas
    }

    #[test]
    fn insert_at_clamps_index() {
        let mut canvas = canvas_abc();
        let idx = canvas
            .insert_at(99, ElementInstance::new("d", "TextField"))
            .unwrap();
        assert_eq!(idx, 3);
        assert_eq!(canvas.ids(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn insert_duplicate_id_is_rejected_without_mutation() {
        let mut canvas = canvas_abc();
        let err = canvas
            .insert_at(0, ElementInstance::new("b", "NumberField"))
            .unwrap_err();
        assert!(matches!(err, PlacementError::DuplicateId(_)));
        assert_eq!(canvas.ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn remove_unknown_id_fails() {
        let mut canvas = canvas_abc();
        assert!(canvas.remove_by_id("zz").is_err());
        assert_eq!(canvas.len(), 3);
    }

    #[test]
    fn replace_by_id_swaps_attributes() {
        let mut canvas = canvas_abc();
        let updated = ElementInstance::new("b", "TextField").with_attr("label", "Neu");
        canvas.replace_by_id("b", updated).unwrap();
        assert_eq!(canvas.get("b").unwrap().attr_str("label"), "Neu");
        assert_eq!(canvas.index_of("b"), Some(1));
    }

    #[test]
    fn replace_with_foreign_id_is_rejected() {
        let mut canvas = canvas_abc();
        let err = canvas
            .replace_by_id("b", ElementInstance::new("x", "TextField"))
            .unwrap_err();
        assert!(matches!(err, PlacementError::IdMismatch { .. }));
        assert!(canvas.contains("b"));
        assert!(!canvas.contains("x"));
    }
}
