//! Felder, deren Verhalten ein Regelprogramm beschreibt.
//!
//! - `ScriptButton`: führt sein Programm beim Klick aus
//! - `DataWatcher`: unsichtbar, reagiert auf Wertänderungen von `watchFieldId`
//! - `DataFiller`: unsichtbar, füllt beim Mounten Felder vor

use super::properties::{PropertyKind, PropertySpec, ALIGNMENTS, SIZES};
use super::{attrs, DesignerPreview, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape};
use crate::core::{Attributes, ElementInstance};
use serde_json::json;

const SCRIPT_SPEC: PropertySpec = PropertySpec {
    key: "script",
    label: "Regel",
    kind: PropertyKind::Rule,
    required: false,
};

/// Regeltext einer Instanz.
pub fn script_of(element: &ElementInstance) -> &str {
    element.attr_str("script")
}

fn hidden_preview(element: &ElementInstance, label: String) -> DesignerPreview {
    DesignerPreview {
        label,
        placeholder: String::new(),
        helper_text: String::new(),
        required: false,
        size: element.size(),
        summary: Some(format!("{} Zeile(n) Regel", script_of(element).lines().count())),
    }
}

/// Button, der ein Regelprogramm ausführt.
pub struct ScriptButton;

impl FieldType for ScriptButton {
    fn type_name(&self) -> &'static str {
        "ScriptButton"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Script Button",
            icon: "code",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([
            ("label", json!("Run Script")),
            ("backgroundColor", json!("#1d4ed8")),
            ("textColor", json!("#ffffff")),
            ("borderRadius", json!("8px")),
            ("borderSize", json!("1px")),
            ("borderColor", json!("#000000")),
            ("padding", json!("8px 16px")),
            ("margin", json!("0px")),
            ("size", json!("medium")),
            ("alignment", json!("left")),
            ("script", json!("")),
        ])
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        RuntimeInput::new(InputKind::Button, element)
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        vec![
            PropertySpec::text("label", "Beschriftung", Some(100)),
            PropertySpec::text("backgroundColor", "Hintergrund", None),
            PropertySpec::text("textColor", "Textfarbe", None),
            PropertySpec::text("borderRadius", "Eckenradius", None),
            PropertySpec::text("borderSize", "Rahmenbreite", None),
            PropertySpec::text("borderColor", "Rahmenfarbe", None),
            PropertySpec::text("padding", "Innenabstand", None),
            PropertySpec::text("margin", "Außenabstand", None),
            PropertySpec::choice("size", "Größe", SIZES),
            PropertySpec::choice("alignment", "Ausrichtung", ALIGNMENTS),
            SCRIPT_SPEC,
        ]
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}

/// Unsichtbarer Beobachter eines anderen Feldes.
pub struct DataWatcher;

impl DataWatcher {
    /// Alias des beobachteten Feldes.
    pub fn watched_alias(element: &ElementInstance) -> &str {
        element.attr_str("watchFieldId")
    }
}

impl FieldType for DataWatcher {
    fn type_name(&self) -> &'static str {
        "DataWatcher"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Data Watcher",
            icon: "eye",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([
            ("watchFieldId", json!("")),
            ("script", json!("")),
            ("size", json!("medium")),
        ])
    }

    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        let target = Self::watched_alias(element);
        let label = if target.is_empty() {
            "Data Watcher (kein Feld gewählt)".to_string()
        } else {
            format!("Data Watcher: {target}")
        };
        hidden_preview(element, label)
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        RuntimeInput::new(InputKind::Hidden, element)
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        vec![
            PropertySpec::text("watchFieldId", "Beobachtetes Feld", None).mandatory(),
            SCRIPT_SPEC,
            PropertySpec::choice("size", "Größe", SIZES),
        ]
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}

/// Unsichtbarer Vorbefüller, läuft einmal beim Mounten.
pub struct DataFiller;

impl FieldType for DataFiller {
    fn type_name(&self) -> &'static str {
        "DataFiller"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Data Filler",
            icon: "database",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([("script", json!(""))])
    }

    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        hidden_preview(element, "Data Filler".to_string())
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        RuntimeInput::new(InputKind::Hidden, element)
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        vec![SCRIPT_SPEC]
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watcher_requires_target_field() {
        let el = DataWatcher.construct("w");
        assert_eq!(
            DataWatcher.validate_properties(&el.attributes),
            vec!["watchFieldId: darf nicht leer sein".to_string()]
        );
        let el = el.with_attr("watchFieldId", "email");
        assert!(DataWatcher.validate_properties(&el.attributes).is_empty());
        assert_eq!(DataWatcher.designer_preview(&el).label, "Data Watcher: email");
    }

    #[test]
    fn script_button_rejects_unparsable_rule() {
        let el = ScriptButton.construct("b").with_attr("script", "set x = (1 +");
        assert_eq!(ScriptButton.validate_properties(&el.attributes).len(), 1);
    }

    #[test]
    fn filler_preview_counts_rule_lines() {
        let el = DataFiller
            .construct("f")
            .with_attr("script", "set a = 1\nset b = 2");
        assert_eq!(
            DataFiller.designer_preview(&el).summary.as_deref(),
            Some("2 Zeile(n) Regel")
        );
    }
}
