//! Registry aller bekannten Feldtypen, geordnet nach Palette-Reihenfolge.

use super::{
    card, chat, checkbox, date, layout, media, number, payment, scripted, select, text, upload,
    FieldType, PaletteEntry,
};
use indexmap::IndexMap;

/// Verwaltet registrierte Feldtypen (Lookup per Typname in O(1)).
///
/// Nach dem Start nur noch lesend genutzt. Ein unbekannter Typname liefert
/// `None`; Aufrufer überspringen solche Instanzen.
pub struct FieldRegistry {
    types: IndexMap<&'static str, Box<dyn FieldType>>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl FieldRegistry {
    /// Erstellt eine leere Registry.
    pub fn empty() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Erstellt eine Registry mit allen eingebauten Feldtypen in Palette-Reihenfolge.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        // Layout
        registry.register(Box::new(layout::TitleField));
        registry.register(Box::new(layout::SubTitleField));
        registry.register(Box::new(layout::ParagraphField));
        registry.register(Box::new(layout::SeparatorField));
        registry.register(Box::new(layout::SpacerField));
        // Inhalte und Aktionen
        registry.register(Box::new(card::CardField));
        registry.register(Box::new(media::ImageConstant));
        registry.register(Box::new(scripted::ScriptButton));
        registry.register(Box::new(text::TextField));
        registry.register(Box::new(upload::ImageUpload));
        registry.register(Box::new(scripted::DataWatcher));
        registry.register(Box::new(payment::UpiPayment));
        registry.register(Box::new(chat::ChatBot));
        registry.register(Box::new(scripted::DataFiller));
        registry.register(Box::new(upload::FileUpload));
        // Eingabefelder
        registry.register(Box::new(number::NumberField));
        registry.register(Box::new(text::TextAreaField));
        registry.register(Box::new(date::DateField));
        registry.register(Box::new(select::SelectField));
        registry.register(Box::new(checkbox::CheckboxField));
        registry
    }

    /// Registriert einen Feldtyp. Ein bereits vorhandener gleichnamiger Typ wird ersetzt.
    pub fn register(&mut self, field_type: Box<dyn FieldType>) {
        let name = field_type.type_name();
        if self.types.insert(name, field_type).is_some() {
            log::info!("Feldtyp '{}' ersetzt", name);
        }
    }

    /// Sucht einen Feldtyp per Name.
    pub fn lookup(&self, type_name: &str) -> Option<&dyn FieldType> {
        self.types.get(type_name).map(|ft| ft.as_ref())
    }

    /// Ob der Typname registriert ist.
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Alle Feldtypen in Registrierungsreihenfolge.
    pub fn list_all(&self) -> impl Iterator<Item = &dyn FieldType> {
        self.types.values().map(|ft| ft.as_ref())
    }

    /// Typname und Palette-Eintrag aller Feldtypen.
    pub fn palette(&self) -> Vec<(&'static str, PaletteEntry)> {
        self.types
            .iter()
            .map(|(name, ft)| (*name, ft.palette_entry()))
            .collect()
    }

    /// Anzahl registrierter Feldtypen.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Ob keine Feldtypen registriert sind.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
