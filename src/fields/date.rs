//! Datumsfeld.

use super::properties::{common_input_specs, PropertySpec};
use super::{
    attrs, input_style_defaults, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape,
};
use crate::core::{Attributes, ElementInstance};
use serde_json::json;

/// Datumsauswahl; der Wert ist ein ISO-Datumsstring.
pub struct DateField;

impl FieldType for DateField {
    fn type_name(&self) -> &'static str {
        "DateField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Date field",
            icon: "calendar-days",
        }
    }

    fn default_attributes(&self) -> Attributes {
        let mut attributes = attrs([
            ("label", json!("Date field")),
            ("helperText", json!("Pick a date")),
            ("required", json!(false)),
            ("size", json!("medium")),
            ("customId", json!("")),
        ]);
        input_style_defaults(&mut attributes);
        attributes
    }

    fn validate(&self, element: &ElementInstance, value: &str) -> bool {
        !element.is_required() || !value.is_empty()
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        RuntimeInput::new(InputKind::Date, element)
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        common_input_specs(50, 200)
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::Text
    }
}
