//! Validierung aller Elemente gegen ihre Feldtypen.

use crate::core::ElementInstance;
use crate::fields::FieldRegistry;
use indexmap::IndexMap;

/// Prüft jedes auflösbare Element mit dem Wert aus `values` (fehlend = `""`).
///
/// Elemente mit unbekanntem Typ fehlen im Ergebnis.
pub fn validate_all<'a>(
    registry: &FieldRegistry,
    elements: impl IntoIterator<Item = &'a ElementInstance>,
    values: &IndexMap<String, String>,
) -> IndexMap<String, bool> {
    let mut results = IndexMap::new();
    for element in elements {
        let Some(field_type) = registry.lookup(&element.field_type) else {
            log::warn!(
                "Validierung: unbekannter Feldtyp '{}' ({}) übersprungen",
                element.field_type,
                element.id
            );
            continue;
        };
        let value = values.get(&element.id).map(String::as_str).unwrap_or("");
        results.insert(element.id.clone(), field_type.validate(element, value));
    }
    results
}

/// Formular ist abschickbar, wenn jedes Ergebnis `true` ist.
pub fn is_submittable(results: &IndexMap<String, bool>) -> bool {
    results.values().all(|ok| *ok)
}

/// IDs aller ungültigen Felder in Canvas-Reihenfolge.
pub fn failed_ids(results: &IndexMap<String, bool>) -> Vec<String> {
    results
        .iter()
        .filter(|(_, ok)| !**ok)
        .map(|(id, _)| id.clone())
        .collect()
}
