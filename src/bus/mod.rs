//! Reaktiver Feld-Bus: Watcher, externe Setter, Berechnungen und Regeln.
//!
//! Der Bus ist ein explizites Service-Objekt, das der `FormRuntime` gehört
//! und beim Mounten/Unmounten der Laufzeitfelder befüllt bzw. geleert wird.
//! Alle Schlüssel sind Feld-Aliase (`customId`, sonst Element-ID); pro
//! Alias gilt die letzte Registrierung.

pub mod calculation;
pub mod rules;
pub mod runtime;

pub use calculation::{evaluate_calculation, format_number, try_evaluate_calculation};
pub use rules::{parse_program, Effect, Program, RuleContext, RuleValue, ValueView};
pub use runtime::{FormRuntime, RuntimeEvent};

use crate::error::EvaluationError;
use std::collections::{HashMap, HashSet};

/// Watcher-Callback: erhält den neuen Wert und eine Sicht auf alle Werte,
/// liefert die anzuwendenden Effekte.
pub type Watcher = Box<dyn Fn(&str, &dyn ValueView) -> Result<Vec<Effect>, EvaluationError>>;

struct WatcherEntry {
    owner: String,
    callback: Watcher,
}

/// Registry für Watcher und externe Setter.
///
/// Setter sind Routen `Alias → Element-ID`; der Bus selbst hält keine Werte.
#[derive(Default)]
pub struct FieldBus {
    watchers: HashMap<String, WatcherEntry>,
    value_setters: HashMap<String, String>,
    option_setters: HashMap<String, String>,
    dispatching: HashSet<String>,
}

impl FieldBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen Watcher für `alias`. Ein vorhandener wird ersetzt.
    pub fn register_watcher(&mut self, alias: &str, owner: &str, callback: Watcher) {
        let previous = self.watchers.insert(
            alias.to_string(),
            WatcherEntry {
                owner: owner.to_string(),
                callback,
            },
        );
        if let Some(previous) = previous {
            if previous.owner != owner {
                log::debug!(
                    "Watcher für '{}' von {} auf {} übergegangen",
                    alias,
                    previous.owner,
                    owner
                );
            }
        }
    }

    /// Entfernt den Watcher für `alias`, sofern er noch `owner` gehört.
    pub fn unregister_watcher(&mut self, alias: &str, owner: &str) -> bool {
        if self.watchers.get(alias).is_some_and(|w| w.owner == owner) {
            self.watchers.remove(alias);
            true
        } else {
            false
        }
    }

    /// Ob für `alias` ein Watcher registriert ist.
    pub fn has_watcher(&self, alias: &str) -> bool {
        self.watchers.contains_key(alias)
    }

    /// Markiert `alias` als gerade in Zustellung.
    ///
    /// Liefert `Reentrant`, wenn bereits eine Zustellung für diesen Alias läuft.
    pub fn begin_dispatch(&mut self, alias: &str) -> Result<(), EvaluationError> {
        if self.dispatching.insert(alias.to_string()) {
            Ok(())
        } else {
            Err(EvaluationError::Reentrant(alias.to_string()))
        }
    }

    /// Beendet die Zustellung für `alias`.
    pub fn end_dispatch(&mut self, alias: &str) {
        self.dispatching.remove(alias);
    }

    /// Ruft den Watcher für `alias` einmal auf.
    ///
    /// `None`, wenn kein Watcher registriert ist. Fehler des Callbacks werden
    /// geloggt und als leere Effektliste gemeldet.
    pub fn notify_watcher(
        &self,
        alias: &str,
        value: &str,
        view: &dyn ValueView,
    ) -> Option<Vec<Effect>> {
        let entry = self.watchers.get(alias)?;
        match (entry.callback)(value, view) {
            Ok(effects) => Some(effects),
            Err(e) => {
                log::warn!("Watcher '{}' ({}) fehlgeschlagen: {}", alias, entry.owner, e);
                Some(Vec::new())
            }
        }
    }

    /// Registriert den Wert-Setter eines Feldes.
    pub fn register_value_setter(&mut self, alias: &str, element_id: &str) {
        self.value_setters
            .insert(alias.to_string(), element_id.to_string());
    }

    /// Registriert den Options-Setter eines Feldes.
    pub fn register_option_setter(&mut self, alias: &str, element_id: &str) {
        self.option_setters
            .insert(alias.to_string(), element_id.to_string());
    }

    /// Entfernt beide Setter von `element_id` unter `alias`.
    ///
    /// Ein zwischenzeitlich von einem anderen Feld übernommener Alias bleibt bestehen.
    pub fn unregister_setters(&mut self, alias: &str, element_id: &str) {
        for map in [&mut self.value_setters, &mut self.option_setters] {
            if map.get(alias).is_some_and(|id| id == element_id) {
                map.remove(alias);
            }
        }
    }

    /// Element-ID hinter dem Wert-Setter von `alias`.
    pub fn value_target(&self, alias: &str) -> Option<&str> {
        self.value_setters.get(alias).map(String::as_str)
    }

    /// Element-ID hinter dem Options-Setter von `alias`.
    pub fn option_target(&self, alias: &str) -> Option<&str> {
        self.option_setters.get(alias).map(String::as_str)
    }

    /// Anzahl registrierter Watcher.
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    /// Anzahl registrierter Wert-Setter.
    pub fn setter_count(&self) -> usize {
        self.value_setters.len()
    }
}
