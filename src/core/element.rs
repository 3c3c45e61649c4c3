//! Element-Instanz: ein platziertes Feld auf dem Canvas.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribut-Sack einer Element-Instanz (Reihenfolge bleibt beim Speichern erhalten).
pub type Attributes = IndexMap<String, Value>;

/// Ein platziertes Feld mit stabiler ID, Typname und Konfiguration.
///
/// Wird im Envelope als `{ "id", "type", "extraAttributes" }` gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementInstance {
    /// Eindeutige, über die Lebensdauer stabile ID
    pub id: String,
    /// Schlüssel in die Feldtyp-Registry
    #[serde(rename = "type")]
    pub field_type: String,
    /// Typ-spezifische Konfiguration
    #[serde(rename = "extraAttributes", default)]
    pub attributes: Attributes,
}

impl ElementInstance {
    /// Erstellt eine neue Instanz ohne Attribute.
    pub fn new(id: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type: field_type.into(),
            attributes: Attributes::new(),
        }
    }

    /// Builder: setzt ein Attribut.
    pub fn with_attr(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Liest ein String-Attribut (fehlend oder kein String → `""`).
    pub fn attr_str(&self, key: &str) -> &str {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Liest ein Bool-Attribut. Akzeptiert auch `"true"`/`"false"` als String.
    pub fn attr_bool(&self, key: &str) -> bool {
        match self.attributes.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }

    /// Liest ein numerisches Attribut (auch aus String).
    pub fn attr_f64(&self, key: &str) -> Option<f64> {
        match self.attributes.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Ob das Feld als Pflichtfeld markiert ist.
    pub fn is_required(&self) -> bool {
        self.attr_bool("required")
    }

    /// Extern adressierbarer Name: `customId` falls gesetzt, sonst die Instanz-ID.
    pub fn alias(&self) -> &str {
        let custom = self.attr_str("customId");
        if custom.is_empty() {
            &self.id
        } else {
            custom
        }
    }

    /// Layout-Größe aus dem `size`-Attribut.
    pub fn size(&self) -> FieldSize {
        FieldSize::parse(self.attr_str("size"))
    }
}

/// Breite eines Feldes im 12-Spalten-Raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSize {
    /// 3 Spalten
    Small,
    /// 6 Spalten
    Medium,
    /// 12 Spalten
    #[default]
    Large,
}

impl FieldSize {
    /// Parst den Attributwert; Unbekanntes fällt auf `Large` zurück.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "small" => FieldSize::Small,
            "medium" => FieldSize::Medium,
            _ => FieldSize::Large,
        }
    }

    /// Spaltenanzahl im Raster.
    pub fn column_span(self) -> u8 {
        match self {
            FieldSize::Small => 3,
            FieldSize::Medium => 6,
            FieldSize::Large => 12,
        }
    }
}
