//! Zentrale Konfiguration des Form Designers.
//!
//! `DesignerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{DEFAULT_BACKGROUND_COLOR, DEFAULT_BORDER_RADIUS};
use serde::{Deserialize, Serialize};

// ── Historie ────────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const HISTORY_DEPTH: usize = 200;
/// Maximale Einträge im Command-Log.
pub const COMMAND_LOG_CAPACITY: usize = 1000;

// ── Laufzeit ────────────────────────────────────────────────────────

/// Maximale Upload-Größe in Bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Laufzeit-Optionen des Designers (persistiert als TOML).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignerOptions {
    // ── Designer ────────────────────────────────────────────────
    /// Undo/Redo-Tiefe
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    /// Kapazität des Command-Logs
    #[serde(default = "default_command_log_capacity")]
    pub command_log_capacity: usize,
    /// Neu abgelegte Palette-Elemente automatisch selektieren
    #[serde(default = "default_true")]
    pub select_on_drop: bool,

    // ── Neue Formulare ──────────────────────────────────────────
    /// Hintergrundfarbe neuer Canvases
    #[serde(default = "default_background_color")]
    pub default_background_color: String,
    /// Eckenradius neuer Canvases
    #[serde(default = "default_border_radius")]
    pub default_border_radius: String,
    /// Submit-Button standardmäßig anzeigen
    #[serde(default = "default_true")]
    pub default_show_submit: bool,

    // ── Laufzeit ────────────────────────────────────────────────
    /// Uploads oberhalb dieser Größe werden abgelehnt
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    /// Nachkommastellen berechneter Felder (`None` = kürzeste Darstellung)
    #[serde(default)]
    pub calculation_precision: Option<u8>,
}

impl Default for DesignerOptions {
    fn default() -> Self {
        Self {
            history_depth: HISTORY_DEPTH,
            command_log_capacity: COMMAND_LOG_CAPACITY,
            select_on_drop: true,
            default_background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            default_border_radius: DEFAULT_BORDER_RADIUS.to_string(),
            default_show_submit: true,
            max_upload_bytes: MAX_UPLOAD_BYTES,
            calculation_precision: None,
        }
    }
}

fn default_history_depth() -> usize {
    HISTORY_DEPTH
}

fn default_command_log_capacity() -> usize {
    COMMAND_LOG_CAPACITY
}

fn default_true() -> bool {
    true
}

fn default_background_color() -> String {
    DEFAULT_BACKGROUND_COLOR.to_string()
}

fn default_border_radius() -> String {
    DEFAULT_BORDER_RADIUS.to_string()
}

fn default_max_upload_bytes() -> usize {
    MAX_UPLOAD_BYTES
}

impl DesignerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("form-designer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("form_designer.toml")
    }

    /// Globale Einstellungen für ein neues Formular.
    pub fn default_global_settings(&self) -> crate::core::GlobalSettings {
        crate::core::GlobalSettings {
            background_color: self.default_background_color.clone(),
            border_radius: self.default_border_radius.clone(),
            show_submit: self.default_show_submit,
            extra: Default::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let opts: DesignerOptions =
            toml::from_str("history_depth = 5\ncalculation_precision = 2\n").unwrap();
        assert_eq!(opts.history_depth, 5);
        assert_eq!(opts.calculation_precision, Some(2));
        assert_eq!(opts.max_upload_bytes, MAX_UPLOAD_BYTES);
        assert!(opts.select_on_drop);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join(format!("form-designer-opts-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("form_designer.toml");

        let opts = DesignerOptions {
            default_background_color: "#000000".into(),
            max_upload_bytes: 1024,
            ..DesignerOptions::default()
        };
        opts.save_to_file(&path).unwrap();
        assert_eq!(DesignerOptions::load_from_file(&path), opts);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = std::env::temp_dir().join(format!("form-designer-opts-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("form_designer.toml");
        std::fs::write(&path, "history_depth = \"viele\"").unwrap();
        assert_eq!(DesignerOptions::load_from_file(&path), DesignerOptions::default());
        std::fs::remove_dir_all(&dir).ok();
    }
}
