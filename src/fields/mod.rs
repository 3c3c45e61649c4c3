//! Trait-basiertes Feldtyp-System für erweiterbare Formular-Felder.
//!
//! Jeder Feldtyp implementiert den `FieldType`-Trait und wird bei der
//! `FieldRegistry` registriert. Feldtypen erzeugen reine Daten
//! (`ElementInstance`, `DesignerPreview`, `RuntimeInput`); die Mutation des
//! Canvas erfolgt zentral in den Use-Cases.

/// Zusammengesetzte Karte aus Unterblöcken.
pub mod card;
/// Chat-Widget (nur Konfiguration).
pub mod chat;
/// Checkbox mit "true"/"false"-Wert.
pub mod checkbox;
/// Datumsfeld.
pub mod date;
/// Layout-Felder ohne Wert (Titel, Untertitel, Absatz, Trenner, Abstand).
pub mod layout;
/// Statisches Bild.
pub mod media;
/// Zahlenfeld mit optionaler Berechnung.
pub mod number;
/// UPI-Zahlungs-Widget.
pub mod payment;
/// Property-Schema und Prüfung.
pub mod properties;
/// FieldType-Trait und Registry.
mod registry;
/// Regel-Felder: Script-Button, Data-Watcher, Data-Filler.
pub mod scripted;
/// Auswahlfeld mit Options-Liste und Spiegelung.
pub mod select;
/// Einzeilige und mehrzeilige Textfelder.
pub mod text;
/// Datei- und Bild-Upload.
pub mod upload;

pub use properties::{PropertyKind, PropertySpec};
pub use registry::FieldRegistry;

use crate::core::{Attributes, ElementInstance, FieldSize};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schnittstelle für alle Feldtypen (Text, Zahl, Auswahl, Zahlung, …).
///
/// Feldtypen sind zustandslos und nach der Registrierung unveränderlich.
/// `validate` ist rein und synchron; I/O ist dort nicht erlaubt.
pub trait FieldType: Send + Sync {
    /// Eindeutiger Typname, wie er im Envelope gespeichert wird
    fn type_name(&self) -> &'static str;

    /// Eintrag für die Palette (Label + Icon)
    fn palette_entry(&self) -> PaletteEntry;

    /// Standard-Attribute einer neuen Instanz
    fn default_attributes(&self) -> Attributes;

    /// Erzeugt eine neue Instanz mit frischer Kopie der Standard-Attribute.
    fn construct(&self, id: &str) -> ElementInstance {
        ElementInstance {
            id: id.to_string(),
            field_type: self.type_name().to_string(),
            attributes: self.default_attributes(),
        }
    }

    /// Prüft einen eingegebenen Wert gegen die Instanz-Konfiguration.
    fn validate(&self, _element: &ElementInstance, _value: &str) -> bool {
        true
    }

    /// Vorschau-Daten für den Designer-Canvas.
    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        DesignerPreview::from_common(element)
    }

    /// Beschreibung des Laufzeit-Eingabeelements.
    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput;

    /// Schema des Property-Editors
    fn property_schema(&self) -> Vec<PropertySpec>;

    /// Prüft Attribute gegen das Property-Schema. Leere Liste = gültig.
    fn validate_properties(&self, attributes: &Attributes) -> Vec<String> {
        properties::check_properties(&self.property_schema(), attributes)
    }

    /// Kodierung des abgeschickten Wertes
    fn value_shape(&self) -> ValueShape;
}

/// Palette-Eintrag eines Feldtyps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// Anzeigename
    pub label: &'static str,
    /// Icon-Name
    pub icon: &'static str,
}

/// Daten für die Darstellung einer Instanz im Designer.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignerPreview {
    /// Beschriftung (Label oder Titel)
    pub label: String,
    /// Platzhaltertext
    pub placeholder: String,
    /// Hilfetext unter dem Feld
    pub helper_text: String,
    /// Pflichtfeld-Markierung
    pub required: bool,
    /// Rasterbreite
    pub size: FieldSize,
    /// Zusatzzeile, z.B. Formel einer Berechnung
    pub summary: Option<String>,
}

impl DesignerPreview {
    /// Baut die Vorschau aus den gemeinsamen Attributen `label`, `placeHolder`,
    /// `helperText`, `required` und `size`.
    pub fn from_common(element: &ElementInstance) -> Self {
        Self {
            label: element.attr_str("label").to_string(),
            placeholder: element.attr_str("placeHolder").to_string(),
            helper_text: element.attr_str("helperText").to_string(),
            required: element.is_required(),
            size: element.size(),
            summary: None,
        }
    }
}

/// Art des Laufzeit-Eingabeelements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// Einzeiliger Text
    Text,
    /// E-Mail-Adresse
    Email,
    /// Passwort
    Password,
    /// Mehrzeiliger Text
    TextArea { rows: u8 },
    /// Zahl
    Number,
    /// Datum
    Date,
    /// Auswahl (einfach oder mehrfach)
    Select { multi: bool },
    /// Checkbox
    Checkbox,
    /// Datei-Upload
    File,
    /// Bild-Upload mit Inline-Vorschau
    Image,
    /// Button mit Regelprogramm
    Button,
    /// Zahlungs-Widget
    Payment,
    /// Chat-Widget
    Chat,
    /// Zusammengesetzte Karte
    Card,
    /// Reine Anzeige ohne Eingabe
    Static,
    /// Unsichtbar (Watcher/Filler)
    Hidden,
}

/// Beschreibung des Eingabeelements zur Laufzeit.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeInput {
    /// Eingabeart
    pub kind: InputKind,
    /// Extern adressierbarer Name (HTML-ID, Bus-Schlüssel)
    pub alias: String,
    /// Beschriftung
    pub label: String,
    /// Nur lesbar (z.B. berechnete Felder)
    pub read_only: bool,
    /// Auswahl-Optionen
    pub options: Vec<FieldOption>,
    /// Startwert vor der ersten Eingabe
    pub default_value: String,
}

impl RuntimeInput {
    /// Erstellt eine Eingabe-Beschreibung mit Alias und Label der Instanz.
    pub fn new(kind: InputKind, element: &ElementInstance) -> Self {
        Self {
            kind,
            alias: element.alias().to_string(),
            label: element.attr_str("label").to_string(),
            read_only: false,
            options: Vec::new(),
            default_value: String::new(),
        }
    }
}

/// Eine Auswahl-Option `{label, value, value2?}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldOption {
    /// Anzeigetext
    pub label: String,
    /// Primärwert (wird abgeschickt und nach `targetFieldId` gespiegelt)
    pub value: String,
    /// Sekundärwert (wird nach `targetFieldId2` gespiegelt)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<String>,
}

impl FieldOption {
    /// Erstellt eine Option ohne Sekundärwert.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            value2: None,
        }
    }

    /// Liest eine Options-Liste aus einem Attribut; fehlerhafte Einträge werden übersprungen.
    pub fn list_from_attr(value: Option<&Value>) -> Vec<FieldOption> {
        let Some(Value::Array(items)) = value else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect()
    }
}

/// Kodierung des abgeschickten Wertes eines Feldtyps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    /// Freitext
    Text,
    /// Dezimalzahl als String
    Number,
    /// `"true"`/`"false"`
    Boolean,
    /// JSON-kodierter Verbundwert
    Json,
    /// Datei-ID des Blob-Speichers
    FileRef,
    /// `data:`-URI
    DataUri,
    /// Kein Wert
    None,
}

impl ValueShape {
    /// Ob der Feldtyp überhaupt einen Wert abschickt.
    pub fn carries_value(self) -> bool {
        !matches!(self, ValueShape::None)
    }
}

/// Baut eine Attribut-Map aus Schlüssel/Wert-Paaren.
pub(crate) fn attrs<const N: usize>(pairs: [(&str, Value); N]) -> Attributes {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Gemeinsame Stil-Attribute der Eingabefelder.
pub(crate) fn input_style_defaults(attributes: &mut Attributes) {
    for (key, value) in [
        ("inputWidth", "100%"),
        ("alignment", "left"),
        ("color", "#000000"),
        ("background", "white"),
        ("borderRadius", "5px"),
        ("borderColor", "gray"),
        ("borderWidth", "1px"),
    ] {
        attributes.insert(key.to_string(), Value::from(value));
    }
}
