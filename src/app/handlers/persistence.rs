//! Handler für Datei-Operationen und Optionen.

use crate::app::use_cases;
use crate::app::DesignerState;
use crate::fields::FieldRegistry;
use crate::shared::DesignerOptions;
use std::path::{Path, PathBuf};

/// Startet ein leeres Formular.
pub fn new_form(state: &mut DesignerState) {
    use_cases::persistence::new_form(state);
}

/// Lädt ein Formular aus dem übergebenen Pfad.
pub fn load(state: &mut DesignerState, registry: &FieldRegistry, path: String) -> anyhow::Result<()> {
    use_cases::persistence::load_file(state, registry, Path::new(&path))
}

/// Speichert das Formular.
///
/// `None` speichert unter dem aktuell bekannten Pfad.
/// `Some(p)` speichert explizit unter dem neuen Pfad `p`.
pub fn save(state: &mut DesignerState, path: Option<String>) -> anyhow::Result<()> {
    use_cases::persistence::save_file(state, path.map(PathBuf::from))
}

/// Übernimmt neue Optionen für die laufende Sitzung.
///
/// Das Schreiben der Konfigurationsdatei bleibt Sache des Hosts.
pub fn apply_options(state: &mut DesignerState, options: DesignerOptions) {
    state.history.set_max_depth(options.history_depth);
    state.command_log.set_capacity(options.command_log_capacity);
    state.options = options;
    log::info!("Optionen übernommen");
}
