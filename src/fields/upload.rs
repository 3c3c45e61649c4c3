//! Upload-Felder: Datei (Blob-Speicher) und Bild (Inline-Data-URI).

use super::properties::{PropertySpec, SIZES};
use super::{attrs, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape};
use crate::core::{Attributes, ElementInstance};
use serde_json::json;

fn upload_defaults(label: &str) -> Attributes {
    attrs([
        ("label", json!(label)),
        ("required", json!(false)),
        ("size", json!("medium")),
        ("color", json!("#000000")),
        ("background", json!("white")),
        ("borderRadius", json!("5px")),
        ("borderColor", json!("gray")),
        ("borderWidth", json!("1px")),
    ])
}

fn upload_schema() -> Vec<PropertySpec> {
    vec![
        PropertySpec::text("label", "Beschriftung", Some(100)),
        PropertySpec::boolean("required", "Pflichtfeld"),
        PropertySpec::choice("size", "Größe", SIZES),
        PropertySpec::text("color", "Textfarbe", None),
        PropertySpec::text("background", "Hintergrund", None),
        PropertySpec::text("borderRadius", "Eckenradius", None),
        PropertySpec::text("borderColor", "Rahmenfarbe", None),
        PropertySpec::text("borderWidth", "Rahmenbreite", None),
    ]
}

/// Datei-Upload; der Wert ist die Datei-ID des Blob-Speichers.
pub struct FileUpload;

impl FieldType for FileUpload {
    fn type_name(&self) -> &'static str {
        "FileUpload"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "File Upload",
            icon: "upload",
        }
    }

    fn default_attributes(&self) -> Attributes {
        upload_defaults("Upload File")
    }

    fn validate(&self, element: &ElementInstance, value: &str) -> bool {
        !element.is_required() || !value.is_empty()
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        RuntimeInput::new(InputKind::File, element)
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        upload_schema()
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::FileRef
    }
}

/// Bild-Upload mit Vorschau; der Wert ist eine `data:`-URI.
pub struct ImageUpload;

impl FieldType for ImageUpload {
    fn type_name(&self) -> &'static str {
        "ImageUpload"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Image Upload",
            icon: "image-plus",
        }
    }

    fn default_attributes(&self) -> Attributes {
        upload_defaults("Upload Image")
    }

    fn validate(&self, element: &ElementInstance, value: &str) -> bool {
        !element.is_required() || !value.is_empty()
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        RuntimeInput::new(InputKind::Image, element)
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        upload_schema()
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::DataUri
    }
}
