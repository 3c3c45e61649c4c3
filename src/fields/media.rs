//! Statisches Bild.

use super::properties::{PropertySpec, SIZES};
use super::{attrs, DesignerPreview, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape};
use crate::core::{Attributes, ElementInstance};
use serde_json::json;

/// Bild mit fester URL und Abmessungen, ohne Eingabewert.
pub struct ImageConstant;

impl FieldType for ImageConstant {
    fn type_name(&self) -> &'static str {
        "ImageConstant"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Image",
            icon: "image",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([
            ("imageUrl", json!("")),
            ("width", json!("100%")),
            ("height", json!("200px")),
            ("borderRadius", json!("0px")),
            ("size", json!("medium")),
        ])
    }

    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        let url = element.attr_str("imageUrl");
        DesignerPreview {
            label: if url.is_empty() {
                "Kein Bild gewählt".to_string()
            } else {
                url.to_string()
            },
            placeholder: String::new(),
            helper_text: String::new(),
            required: false,
            size: element.size(),
            summary: Some(format!(
                "{} x {}",
                element.attr_str("width"),
                element.attr_str("height")
            )),
        }
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        let mut input = RuntimeInput::new(InputKind::Static, element);
        input.default_value = element.attr_str("imageUrl").to_string();
        input.read_only = true;
        input
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        vec![
            PropertySpec::text("imageUrl", "Bild-URL", None),
            PropertySpec::text("width", "Breite", None),
            PropertySpec::text("height", "Höhe", None),
            PropertySpec::text("borderRadius", "Eckenradius", None),
            PropertySpec::choice("size", "Größe", SIZES),
        ]
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}
