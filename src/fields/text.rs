//! Textfelder: einzeilig (`TextField`) und mehrzeilig (`TextAreaField`).

use super::properties::{common_input_specs, PropertyKind, PropertySpec};
use super::{
    attrs, input_style_defaults, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape,
};
use crate::core::{Attributes, ElementInstance};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").ok());

/// Prüft die grobe Form einer E-Mail-Adresse (`x@y.z` ohne Leerzeichen).
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

/// Einzeiliges Textfeld (Text, E-Mail oder Passwort).
pub struct TextField;

impl FieldType for TextField {
    fn type_name(&self) -> &'static str {
        "TextField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Text field",
            icon: "text-cursor-input",
        }
    }

    fn default_attributes(&self) -> Attributes {
        let mut attributes = attrs([
            ("label", json!("Text field")),
            ("helperText", json!("Helper text")),
            ("required", json!(false)),
            ("placeHolder", json!("Value here...")),
            ("size", json!("medium")),
            ("customId", json!("")),
            ("inputType", json!("text")),
        ]);
        input_style_defaults(&mut attributes);
        attributes
    }

    fn validate(&self, element: &ElementInstance, value: &str) -> bool {
        if element.is_required() && value.is_empty() {
            return false;
        }
        // Leere optionale E-Mail-Felder sind gültig
        if element.attr_str("inputType") == "email" && !value.is_empty() {
            return is_email(value);
        }
        true
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        let kind = match element.attr_str("inputType") {
            "email" => InputKind::Email,
            "password" => InputKind::Password,
            _ => InputKind::Text,
        };
        RuntimeInput::new(kind, element)
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        let mut schema = common_input_specs(200, 50);
        schema.push(PropertySpec::text("placeHolder", "Platzhalter", Some(50)));
        schema.push(PropertySpec::choice(
            "inputType",
            "Eingabetyp",
            &["text", "email", "password"],
        ));
        schema
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::Text
    }
}

/// Mehrzeiliges Textfeld.
pub struct TextAreaField;

impl FieldType for TextAreaField {
    fn type_name(&self) -> &'static str {
        "TextAreaField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "TextArea Field",
            icon: "text",
        }
    }

    fn default_attributes(&self) -> Attributes {
        let mut attributes = attrs([
            ("label", json!("Text area")),
            ("helperText", json!("Helper text")),
            ("required", json!(false)),
            ("placeHolder", json!("Value here...")),
            ("rows", json!(3)),
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
        let rows = element
            .attr_f64("rows")
            .map(|r| r.clamp(1.0, 10.0) as u8)
            .unwrap_or(3);
        RuntimeInput::new(InputKind::TextArea { rows }, element)
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        let mut schema = common_input_specs(200, 50);
        schema.push(PropertySpec::text("placeHolder", "Platzhalter", Some(50)));
        schema.push(PropertySpec {
            key: "rows",
            label: "Zeilen",
            kind: PropertyKind::Integer { min: 1, max: 10 },
            required: false,
        });
        schema
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_value() {
        let el = TextField.construct("1").with_attr("required", true);
        assert!(!TextField.validate(&el, ""));
        assert!(TextField.validate(&el, "Hallo"));
    }

    #[test]
    fn email_input_type_checks_shape() {
        let el = TextField.construct("1").with_attr("inputType", "email");
        assert!(TextField.validate(&el, "a@b.de"));
        assert!(!TextField.validate(&el, "a@b"));
        assert!(!TextField.validate(&el, "a b@c.de"));
        assert!(TextField.validate(&el, ""));
    }

    #[test]
    fn runtime_input_follows_input_type() {
        let el = TextField.construct("1").with_attr("inputType", "password");
        assert_eq!(TextField.runtime_input(&el).kind, InputKind::Password);
    }

    #[test]
    fn text_area_rows_are_clamped() {
        let el = TextAreaField.construct("1").with_attr("rows", 42);
        assert_eq!(
            TextAreaField.runtime_input(&el).kind,
            InputKind::TextArea { rows: 10 }
        );
        assert_eq!(TextAreaField.validate_properties(&el.attributes).len(), 1);
    }

    #[test]
    fn construct_returns_independent_copies() {
        let mut a = TextField.construct("a");
        let b = TextField.construct("b");
        a.attributes.insert("label".into(), json!("Geändert"));
        assert_eq!(b.attr_str("label"), "Text field");
    }
}
