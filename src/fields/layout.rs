//! Layout-Felder ohne Eingabewert.

use super::properties::{PropertyKind, PropertySpec, SIZES};
use super::{attrs, DesignerPreview, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape};
use crate::core::{Attributes, ElementInstance};
use serde_json::json;

const FONT_FAMILIES: &[&str] = &["Arial", "Times New Roman", "Courier New", "Verdana"];
const FONT_WEIGHTS: &[&str] = &["normal", "bold", "lighter", "bolder"];

fn text_block_defaults(key: &str, text: &str, font_size: &str) -> Attributes {
    attrs([
        (key, json!(text)),
        ("size", json!("medium")),
        ("marginTop", json!("0px")),
        ("marginBottom", json!("0px")),
        ("marginLeft", json!("0px")),
        ("marginRight", json!("0px")),
        ("showColumn", json!(true)),
        ("fontSize", json!(font_size)),
        ("fontFamily", json!("Arial")),
        ("fontWeight", json!("normal")),
        ("color", json!("#000000")),
    ])
}

fn text_block_schema(key: &'static str, label: &'static str) -> Vec<PropertySpec> {
    vec![
        PropertySpec::text(key, label, Some(500)).mandatory(),
        PropertySpec::choice("size", "Größe", SIZES),
        PropertySpec::text("marginTop", "Abstand oben", None),
        PropertySpec::text("marginBottom", "Abstand unten", None),
        PropertySpec::text("marginLeft", "Abstand links", None),
        PropertySpec::text("marginRight", "Abstand rechts", None),
        PropertySpec::boolean("showColumn", "Spalte anzeigen"),
        PropertySpec::text("fontSize", "Schriftgröße", None),
        PropertySpec::choice("fontFamily", "Schriftart", FONT_FAMILIES),
        PropertySpec::choice("fontWeight", "Schriftstärke", FONT_WEIGHTS),
        PropertySpec::text("color", "Farbe", None),
    ]
}

fn static_preview(element: &ElementInstance, key: &str) -> DesignerPreview {
    DesignerPreview {
        label: element.attr_str(key).to_string(),
        placeholder: String::new(),
        helper_text: String::new(),
        required: false,
        size: element.size(),
        summary: None,
    }
}

fn static_input(element: &ElementInstance, key: &str) -> RuntimeInput {
    let mut input = RuntimeInput::new(InputKind::Static, element);
    input.label = element.attr_str(key).to_string();
    input.read_only = true;
    input
}

/// Überschrift.
pub struct TitleField;

impl FieldType for TitleField {
    fn type_name(&self) -> &'static str {
        "TitleField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Title field",
            icon: "heading-1",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([("title", json!("Title field")), ("size", json!("medium"))])
    }

    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        static_preview(element, "title")
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        static_input(element, "title")
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        vec![
            PropertySpec::text("title", "Titel", Some(100)).mandatory(),
            PropertySpec::choice("size", "Größe", SIZES),
        ]
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}

/// Untertitel.
pub struct SubTitleField;

impl FieldType for SubTitleField {
    fn type_name(&self) -> &'static str {
        "SubTitleField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "SubTitle field",
            icon: "heading-2",
        }
    }

    fn default_attributes(&self) -> Attributes {
        text_block_defaults("title", "SubTitle field", "16px")
    }

    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        static_preview(element, "title")
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        static_input(element, "title")
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        text_block_schema("title", "Untertitel")
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}

/// Absatz.
pub struct ParagraphField;

impl FieldType for ParagraphField {
    fn type_name(&self) -> &'static str {
        "ParagraphField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Paragraph field",
            icon: "text",
        }
    }

    fn default_attributes(&self) -> Attributes {
        text_block_defaults("text", "Paragraph field", "18px")
    }

    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        static_preview(element, "text")
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        static_input(element, "text")
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        text_block_schema("text", "Text")
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}

/// Horizontale Trennlinie.
pub struct SeparatorField;

impl FieldType for SeparatorField {
    fn type_name(&self) -> &'static str {
        "SeparatorField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Separator field",
            icon: "separator-horizontal",
        }
    }

    fn default_attributes(&self) -> Attributes {
        Attributes::new()
    }

    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        let mut preview = static_preview(element, "label");
        preview.label = "Separator field".to_string();
        preview
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        static_input(element, "label")
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        Vec::new()
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}

/// Vertikaler Abstand mit konfigurierbarer Höhe in Pixeln.
pub struct SpacerField;

impl FieldType for SpacerField {
    fn type_name(&self) -> &'static str {
        "SpacerField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Spacer field",
            icon: "separator-vertical",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([("height", json!(20))])
    }

    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        let mut preview = static_preview(element, "label");
        let height = element.attr_f64("height").unwrap_or(20.0);
        preview.label = format!("Spacer field: {height}px");
        preview
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        static_input(element, "label")
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        vec![PropertySpec {
            key: "height",
            label: "Höhe (px)",
            kind: PropertyKind::Integer { min: 5, max: 200 },
            required: false,
        }]
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_fields_are_always_valid_and_carry_no_value() {
        let title = TitleField.construct("t");
        assert!(TitleField.validate(&title, ""));
        assert!(!TitleField.value_shape().carries_value());
        assert_eq!(TitleField.designer_preview(&title).label, "Title field");
    }

    #[test]
    fn spacer_preview_shows_height() {
        let spacer = SpacerField.construct("s").with_attr("height", 40);
        assert_eq!(SpacerField.designer_preview(&spacer).label, "Spacer field: 40px");
    }

    #[test]
    fn empty_title_is_rejected_by_property_check() {
        let title = TitleField.construct("t").with_attr("title", "");
        assert_eq!(TitleField.validate_properties(&title.attributes).len(), 1);
    }
}
