//! Chat-Widget. Das Feld trägt nur Konfiguration und schickt keinen Wert ab.

use super::properties::{PropertySpec, ALIGNMENTS, SIZES};
use super::{attrs, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape};
use crate::core::{Attributes, ElementInstance};
use serde_json::json;

/// Chat-Widget.
pub struct ChatBot;

impl FieldType for ChatBot {
    fn type_name(&self) -> &'static str {
        "ChatBot"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "ChatBot",
            icon: "bot",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([
            ("label", json!("Open ChatBot")),
            ("size", json!("medium")),
            ("openByDefault", json!(false)),
            ("apiKey", json!("")),
            ("borderRadius", json!("12px")),
            ("chatBoxHeight", json!("400px")),
            ("backgroundColor", json!("#f9fafb")),
            ("textColor", json!("#111827")),
            ("userBubbleColor", json!("#dbeafe")),
            ("userTextColor", json!("#1e3a8a")),
            ("botBubbleColor", json!("#e0f2fe")),
            ("botTextColor", json!("#075985")),
            ("heading", json!("ChatBot")),
            ("description", json!("Chat interface")),
            ("buttonBackgroundColor", json!("#2563eb")),
            ("buttonTextColor", json!("#ffffff")),
            ("buttonBorderRadius", json!("8px")),
            ("buttonHeight", json!("48px")),
            ("buttonWidth", json!("fit-content")),
            ("buttonAlign", json!("center")),
        ])
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        let mut input = RuntimeInput::new(InputKind::Chat, element);
        input.default_value = element.attr_bool("openByDefault").to_string();
        input
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        let mut schema = vec![
            PropertySpec::text("label", "Beschriftung", None),
            PropertySpec::choice("size", "Größe", SIZES),
            PropertySpec::boolean("openByDefault", "Beim Laden geöffnet"),
            PropertySpec::text("apiKey", "API-Schlüssel", None),
        ];
        for (key, label) in [
            ("borderRadius", "Eckenradius"),
            ("chatBoxHeight", "Höhe"),
            ("backgroundColor", "Hintergrund"),
            ("textColor", "Textfarbe"),
            ("userBubbleColor", "Blase Benutzer"),
            ("userTextColor", "Text Benutzer"),
            ("botBubbleColor", "Blase Bot"),
            ("botTextColor", "Text Bot"),
            ("heading", "Überschrift"),
            ("description", "Beschreibung"),
            ("buttonBackgroundColor", "Button-Hintergrund"),
            ("buttonTextColor", "Button-Text"),
            ("buttonBorderRadius", "Button-Eckenradius"),
            ("buttonHeight", "Button-Höhe"),
            ("buttonWidth", "Button-Breite"),
        ] {
            schema.push(PropertySpec::text(key, label, None));
        }
        schema.push(PropertySpec::choice(
            "buttonAlign",
            "Button-Ausrichtung",
            ALIGNMENTS,
        ));
        schema
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_bot_sends_no_value() {
        let el = ChatBot.construct("c");
        assert!(!ChatBot.value_shape().carries_value());
        assert_eq!(ChatBot.runtime_input(&el).default_value, "false");
    }
}
