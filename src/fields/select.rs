//! Auswahlfeld mit optionaler Mehrfachauswahl und Feld-Spiegelung.
//!
//! Bei Auswahl einer Option schreibt das Feld `value` der Option in das Feld
//! `targetFieldId` und `value2` in `targetFieldId2` (über den Feld-Bus).

use super::properties::{common_input_specs, PropertyKind, PropertySpec};
use super::{
    attrs, FieldOption, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape,
};
use crate::core::{Attributes, ElementInstance};
use serde_json::json;

/// Trennzeichen für Mehrfachauswahl-Werte.
pub const MULTI_SELECT_SEPARATOR: char = ',';

/// Auswahlfeld.
pub struct SelectField;

/// Spiegel-Zuweisung: Ziel-Alias und zu setzender Wert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorWrite {
    /// Alias des Zielfeldes
    pub target: String,
    /// Zu setzender Wert
    pub value: String,
}

impl SelectField {
    /// Options-Liste der Instanz.
    pub fn options(element: &ElementInstance) -> Vec<FieldOption> {
        FieldOption::list_from_attr(element.attributes.get("options"))
    }

    /// Ob Mehrfachauswahl aktiv ist.
    pub fn is_multi(element: &ElementInstance) -> bool {
        element.attr_bool("multiSelect")
    }

    /// Zerlegt einen Mehrfachauswahl-Wert in Einzelwerte.
    pub fn split_values(value: &str) -> Vec<&str> {
        value
            .split(MULTI_SELECT_SEPARATOR)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Setzt Einzelwerte zu einem Mehrfachauswahl-Wert zusammen.
    pub fn join_values<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
        values
            .into_iter()
            .collect::<Vec<_>>()
            .join(&MULTI_SELECT_SEPARATOR.to_string())
    }

    /// Berechnet die Spiegel-Zuweisungen für einen neu gewählten Wert.
    ///
    /// Nur bei Einfachauswahl; bei unbekanntem Wert wird nichts gespiegelt.
    pub fn mirror_writes(element: &ElementInstance, selected: &str) -> Vec<MirrorWrite> {
        if Self::is_multi(element) {
            return Vec::new();
        }
        let options = Self::options(element);
        let Some(option) = options.iter().find(|o| o.value == selected) else {
            return Vec::new();
        };
        let mut writes = Vec::new();
        let target = element.attr_str("targetFieldId");
        if !target.is_empty() {
            writes.push(MirrorWrite {
                target: target.to_string(),
                value: option.value.clone(),
            });
        }
        let target2 = element.attr_str("targetFieldId2");
        if !target2.is_empty() {
            if let Some(value2) = &option.value2 {
                writes.push(MirrorWrite {
                    target: target2.to_string(),
                    value: value2.clone(),
                });
            }
        }
        writes
    }
}

impl FieldType for SelectField {
    fn type_name(&self) -> &'static str {
        "SelectField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Select field",
            icon: "list",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([
            ("label", json!("Select field")),
            ("helperText", json!("Helper text")),
            ("required", json!(false)),
            ("placeHolder", json!("Value here...")),
            ("options", json!([])),
            ("size", json!("medium")),
            ("inputWidth", json!("100%")),
            ("alignment", json!("left")),
            ("color", json!("#000000")),
            ("background", json!("#ffffff")),
            ("borderRadius", json!("5px")),
            ("borderColor", json!("#cccccc")),
            ("borderWidth", json!("1px")),
            ("multiSelect", json!(false)),
            ("customId", json!("")),
            ("targetFieldId", json!("")),
            ("targetFieldId2", json!("")),
        ])
    }

    fn validate(&self, element: &ElementInstance, value: &str) -> bool {
        !element.is_required() || !value.is_empty()
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        let mut input = RuntimeInput::new(
            InputKind::Select {
                multi: Self::is_multi(element),
            },
            element,
        );
        input.options = Self::options(element);
        input
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        let mut schema = common_input_specs(200, 50);
        schema.extend([
            PropertySpec::text("placeHolder", "Platzhalter", Some(50)),
            PropertySpec {
                key: "options",
                label: "Optionen",
                kind: PropertyKind::List,
                required: false,
            },
            PropertySpec::boolean("multiSelect", "Mehrfachauswahl"),
            PropertySpec::text("targetFieldId", "Zielfeld (Wert)", None),
            PropertySpec::text("targetFieldId2", "Zielfeld (Wert 2)", None),
        ]);
        schema
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::Text
    }
}
