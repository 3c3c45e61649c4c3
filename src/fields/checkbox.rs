//! Checkbox-Feld; der Wert ist `"true"` oder `"false"`.

use super::properties::{common_input_specs, PropertySpec};
use super::{
    attrs, input_style_defaults, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape,
};
use crate::core::{Attributes, ElementInstance};
use serde_json::json;

/// Checkbox. Ein Pflicht-Checkbox-Feld muss angehakt sein.
pub struct CheckboxField;

impl FieldType for CheckboxField {
    fn type_name(&self) -> &'static str {
        "CheckboxField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "CheckBox field",
            icon: "square-check",
        }
    }

    fn default_attributes(&self) -> Attributes {
        let mut attributes = attrs([
            ("label", json!("Checkbox field")),
            ("helperText", json!("Helper text")),
            ("required", json!(false)),
            ("size", json!("medium")),
            ("customId", json!("")),
        ]);
        input_style_defaults(&mut attributes);
        attributes
    }

    fn validate(&self, element: &ElementInstance, value: &str) -> bool {
        !element.is_required() || value == "true"
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        let mut input = RuntimeInput::new(InputKind::Checkbox, element);
        input.default_value = "false".to_string();
        input
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        common_input_specs(200, 50)
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::Boolean
    }
}
