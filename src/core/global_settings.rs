//! Globale Seiten-Einstellungen eines Formulars.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Standard-Hintergrundfarbe für neue Formulare.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
/// Standard-Eckenradius für neue Formulare.
pub const DEFAULT_BORDER_RADIUS: &str = "12px";

/// Seitenweite Darstellungs-Einstellungen.
///
/// Unbekannte Schlüssel landen in `extra` und werden unverändert zurückgeschrieben.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    /// Hintergrundfarbe der Formularseite
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Eckenradius des Formular-Containers
    #[serde(default = "default_border_radius")]
    pub border_radius: String,
    /// Ob der Standard-Submit-Button angezeigt wird
    #[serde(default = "default_show_submit")]
    pub show_submit: bool,
    /// Weitere, nicht interpretierte Einstellungen
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

fn default_border_radius() -> String {
    DEFAULT_BORDER_RADIUS.to_string()
}

fn default_show_submit() -> bool {
    true
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            border_radius: default_border_radius(),
            show_submit: default_show_submit(),
            extra: IndexMap::new(),
        }
    }
}

/// Teil-Update für `GlobalSettings` (nur gesetzte Felder werden übernommen).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalSettingsPatch {
    /// Neue Hintergrundfarbe
    pub background_color: Option<String>,
    /// Neuer Eckenradius
    pub border_radius: Option<String>,
    /// Submit-Button ein/aus
    pub show_submit: Option<bool>,
}

impl GlobalSettings {
    /// Übernimmt alle gesetzten Felder des Patches.
    pub fn apply(&mut self, patch: GlobalSettingsPatch) {
        if let Some(color) = patch.background_color {
            self.background_color = color;
        }
        if let Some(radius) = patch.border_radius {
            self.border_radius = radius;
        }
        if let Some(show) = patch.show_submit {
            self.show_submit = show;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_merges_only_given_fields() {
        let mut settings = GlobalSettings::default();
        settings.apply(GlobalSettingsPatch {
            background_color: Some("#000000".into()),
            ..Default::default()
        });
        assert_eq!(settings.background_color, "#000000");
        assert_eq!(settings.border_radius, DEFAULT_BORDER_RADIUS);
        assert!(settings.show_submit);
    }

    #[test]
    fn unknown_keys_round_trip() {
        let raw = r##"{"backgroundColor":"#eee","borderRadius":"4px","fontFamily":"Arial"}"##;
        let settings: GlobalSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(settings.extra["fontFamily"], "Arial");
        let back = serde_json::to_value(&settings).unwrap();
        assert_eq!(back["fontFamily"], "Arial");
        assert_eq!(back["showSubmit"], true);
    }
}
