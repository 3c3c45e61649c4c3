//! Zusammengesetzte Karte aus geordneten Unterblöcken.
//!
//! Blöcke werden wie Canvas-Elemente über stabile IDs adressiert; ein
//! Verschieben ist Entfernen und erneutes Einfügen.

use super::properties::{PropertyKind, PropertySpec, SIZES};
use super::{attrs, DesignerPreview, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape};
use crate::core::{Attributes, ElementInstance};
use crate::error::PlacementError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Art eines Karten-Blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Überschrift
    Heading,
    /// Unterüberschrift
    Subheading,
    /// Fließtext
    Paragraph,
    /// Button mit Regelprogramm (`settings.script`)
    Button,
    /// Bild (`content` = URL)
    Image,
}

impl BlockKind {
    /// Startinhalt eines neuen Blocks.
    fn default_content(self) -> &'static str {
        match self {
            BlockKind::Heading => "Heading",
            BlockKind::Subheading => "Subheading",
            BlockKind::Paragraph => "Paragraph text",
            BlockKind::Button => "Click me",
            BlockKind::Image => "",
        }
    }
}

/// Ein Block innerhalb einer Karte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardBlock {
    /// Stabile Block-ID
    pub id: String,
    /// Blockart
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Text bzw. Bild-URL
    #[serde(default)]
    pub content: String,
    /// Darstellungs-Einstellungen (Schriftgröße, Farben, `script`, `gridWidth`, …)
    #[serde(default)]
    pub settings: IndexMap<String, Value>,
}

impl CardBlock {
    /// Erstellt einen neuen Block mit Standardinhalt.
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
            content: kind.default_content().to_string(),
            settings: IndexMap::new(),
        }
    }

    /// Regelprogramm eines Button-Blocks (leer bei anderen Blöcken).
    pub fn script(&self) -> &str {
        if self.kind != BlockKind::Button {
            return "";
        }
        self.settings
            .get("script")
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// Bearbeitungsschritt an den Blöcken einer Karte.
#[derive(Debug, Clone, PartialEq)]
pub enum CardEdit {
    /// Block am Ende anfügen
    Add(CardBlock),
    /// Block entfernen
    Remove { block_id: String },
    /// Block an neue Position verschieben (Index nach dem Entfernen)
    Move { block_id: String, to_index: usize },
    /// Block ersetzen (gleiche ID)
    Update(CardBlock),
}

/// Wendet einen Bearbeitungsschritt auf eine Blockliste an.
///
/// Schlägt fehl, ohne die Liste zu verändern, wenn die Block-ID fehlt oder
/// beim Anfügen bereits vergeben ist.
pub fn apply_card_edit(blocks: &mut Vec<CardBlock>, edit: CardEdit) -> Result<(), PlacementError> {
    let position = |blocks: &[CardBlock], id: &str| {
        blocks
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| PlacementError::ElementNotFound(id.to_string()))
    };
    match edit {
        CardEdit::Add(block) => {
            if blocks.iter().any(|b| b.id == block.id) {
                return Err(PlacementError::DuplicateId(block.id));
            }
            blocks.push(block);
        }
        CardEdit::Remove { block_id } => {
            let index = position(blocks, &block_id)?;
            blocks.remove(index);
        }
        CardEdit::Move { block_id, to_index } => {
            let index = position(blocks, &block_id)?;
            let block = blocks.remove(index);
            let to_index = to_index.min(blocks.len());
            blocks.insert(to_index, block);
        }
        CardEdit::Update(block) => {
            let index = position(blocks, &block.id)?;
            blocks[index] = block;
        }
    }
    Ok(())
}

/// Karten-Feld.
pub struct CardField;

impl CardField {
    /// Blöcke der Instanz; fehlerhafte Einträge werden übersprungen.
    pub fn blocks(element: &ElementInstance) -> Vec<CardBlock> {
        let Some(Value::Array(items)) = element.attributes.get("blocks") else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect()
    }

    /// Schreibt die Blöcke zurück in die Attribute.
    pub fn set_blocks(element: &mut ElementInstance, blocks: &[CardBlock]) {
        let value = serde_json::to_value(blocks).unwrap_or_else(|_| json!([]));
        element.attributes.insert("blocks".to_string(), value);
    }
}

impl FieldType for CardField {
    fn type_name(&self) -> &'static str {
        "CardField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Card",
            icon: "layout-template",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([
            ("blocks", json!([])),
            ("size", json!("medium")),
            ("backgroundColor", json!("#ffffff")),
            ("borderRadius", json!("8px")),
            ("marginTop", json!("10px")),
            ("marginBottom", json!("10px")),
            ("borderColor", json!("#e5e7eb")),
            ("borderWidth", json!("1px")),
            ("borderStyle", json!("solid")),
            ("boxShadow", json!("0 1px 2px rgba(0, 0, 0, 0.1)")),
        ])
    }

    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        let blocks = Self::blocks(element);
        let label = blocks
            .iter()
            .find(|b| b.kind == BlockKind::Heading)
            .map(|b| b.content.clone())
            .unwrap_or_else(|| "Card".to_string());
        DesignerPreview {
            label,
            placeholder: String::new(),
            helper_text: String::new(),
            required: false,
            size: element.size(),
            summary: Some(format!("{} Block/Blöcke", blocks.len())),
        }
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        let mut input = RuntimeInput::new(InputKind::Card, element);
        input.read_only = true;
        input
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        let mut schema = vec![
            PropertySpec {
                key: "blocks",
                label: "Blöcke",
                kind: PropertyKind::List,
                required: false,
            },
            PropertySpec::choice("size", "Größe", SIZES),
        ];
        for (key, label) in [
            ("backgroundColor", "Hintergrund"),
            ("borderRadius", "Eckenradius"),
            ("marginTop", "Abstand oben"),
            ("marginBottom", "Abstand unten"),
            ("borderColor", "Rahmenfarbe"),
            ("borderWidth", "Rahmenbreite"),
            ("borderStyle", "Rahmenstil"),
            ("boxShadow", "Schatten"),
        ] {
            schema.push(PropertySpec::text(key, label, None));
        }
        schema
    }

    fn validate_properties(&self, attributes: &Attributes) -> Vec<String> {
        let mut problems = super::properties::check_properties(&self.property_schema(), attributes);
        let probe = ElementInstance {
            id: String::new(),
            field_type: self.type_name().to_string(),
            attributes: attributes.clone(),
        };
        for block in Self::blocks(&probe) {
            if let Err(e) = crate::bus::rules::parse_program(block.script()) {
                problems.push(format!("blocks[{}].script: {}", block.id, e));
            }
        }
        problems
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks_abc() -> Vec<CardBlock> {
        vec![
            CardBlock::new("a", BlockKind::Heading),
            CardBlock::new("b", BlockKind::Paragraph),
            CardBlock::new("c", BlockKind::Button),
        ]
    }

    fn ids(blocks: &[CardBlock]) -> Vec<&str> {
        blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn move_is_remove_then_insert() {
        let mut blocks = blocks_abc();
        apply_card_edit(
            &mut blocks,
            CardEdit::Move {
                block_id: "a".into(),
                to_index: 2,
            },
        )
        .unwrap();
        assert_eq!(ids(&blocks), vec!["b", "c", "a"]);
    }

    #[test]
    fn failed_edit_leaves_blocks_untouched() {
        let mut blocks = blocks_abc();
        let err = apply_card_edit(
            &mut blocks,
            CardEdit::Remove {
                block_id: "zz".into(),
            },
        );
        assert!(err.is_err());
        assert!(apply_card_edit(&mut blocks, CardEdit::Add(CardBlock::new("b", BlockKind::Image))).is_err());
        assert_eq!(ids(&blocks), vec!["a", "b", "c"]);
    }

    #[test]
    fn blocks_round_trip_through_attributes() {
        let mut el = CardField.construct("card");
        let mut button = CardBlock::new("btn", BlockKind::Button);
        button
            .settings
            .insert("script".into(), json!("open \"https://example.org\""));
        CardField::set_blocks(&mut el, &[CardBlock::new("h", BlockKind::Heading), button]);

        let blocks = CardField::blocks(&el);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].script(), "open \"https://example.org\"");
        assert_eq!(CardField.designer_preview(&el).label, "Heading");
        assert!(CardField.validate_properties(&el.attributes).is_empty());
    }

    #[test]
    fn broken_button_script_is_reported() {
        let mut el = CardField.construct("card");
        let mut button = CardBlock::new("btn", BlockKind::Button);
        button.settings.insert("script".into(), json!("set ="));
        CardField::set_blocks(&mut el, &[button]);
        assert_eq!(CardField.validate_properties(&el.attributes).len(), 1);
    }
}
