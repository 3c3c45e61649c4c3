//! Laufzeit-Sitzung eines ausgefüllten Formulars.
//!
//! `FormRuntime` mountet alle auflösbaren Elemente, registriert deren Setter
//! und Watcher am `FieldBus`, hält die angezeigten Werte und meldet
//! abschickbare Werte an den `SubmissionCoordinator`. Regel-Effekte werden
//! ausschließlich hier angewendet.

use super::calculation::{evaluate_calculation, format_number};
use super::rules::{parse_program, Effect, RuleContext, ValueView};
use super::FieldBus;
use crate::core::ElementInstance;
use crate::error::{PortError, SubmitError};
use crate::fields::card::CardField;
use crate::fields::number::NumberField;
use crate::fields::payment::{PaymentState, UpiPayment};
use crate::fields::scripted::{script_of, DataWatcher};
use crate::fields::select::SelectField;
use crate::fields::{FieldOption, FieldRegistry, RuntimeInput};
use crate::ports::{BlobStore, FormStore, IdentityProvider, SubmissionId};
use crate::shared::DesignerOptions;
use crate::submit::SubmissionCoordinator;
use base64::Engine as _;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Nach außen gerichtete Ereignisse aus Regelprogrammen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// Link soll geöffnet werden
    OpenLink(String),
    /// Regel fordert das Abschicken an
    SubmitRequested,
}

/// Zustand eines gemounteten Feldes.
#[derive(Debug, Clone)]
struct MountedField {
    alias: String,
    options: Vec<FieldOption>,
    carries_value: bool,
}

/// Sicht auf die Live-Werte per Alias (Fallback: Element-ID).
struct AliasView<'a> {
    bus: &'a FieldBus,
    values: &'a IndexMap<String, String>,
}

impl ValueView for AliasView<'_> {
    fn value_of(&self, alias: &str) -> Option<&str> {
        let id = self.bus.value_target(alias).unwrap_or(alias);
        self.values.get(id).map(String::as_str)
    }
}

/// Gemountete Laufzeitfelder eines Formulars.
pub struct FormRuntime {
    registry: Arc<FieldRegistry>,
    elements: Vec<ElementInstance>,
    fields: HashMap<String, MountedField>,
    values: IndexMap<String, String>,
    bus: FieldBus,
    coordinator: SubmissionCoordinator,
    events: Vec<RuntimeEvent>,
    max_upload_bytes: usize,
    calculation_precision: Option<u8>,
}

impl FormRuntime {
    /// Mountet alle Elemente mit bekanntem Feldtyp.
    ///
    /// Reihenfolge: Setter und Watcher registrieren, Data-Filler ausführen,
    /// berechnete Felder initial berechnen.
    pub fn mount(
        registry: Arc<FieldRegistry>,
        elements: &[ElementInstance],
        options: &DesignerOptions,
    ) -> Self {
        Self::mount_with(registry, elements, options, SubmissionCoordinator::new())
    }

    /// Wie `mount`, aber mit vorhandenem Coordinator (z.B. geladene Submission).
    ///
    /// Bereits im Coordinator vorhandene Werte ersetzen die Standardwerte.
    pub fn mount_with(
        registry: Arc<FieldRegistry>,
        elements: &[ElementInstance],
        options: &DesignerOptions,
        coordinator: SubmissionCoordinator,
    ) -> Self {
        let mut runtime = Self {
            registry,
            elements: Vec::with_capacity(elements.len()),
            fields: HashMap::new(),
            values: IndexMap::new(),
            bus: FieldBus::new(),
            coordinator,
            events: Vec::new(),
            max_upload_bytes: options.max_upload_bytes,
            calculation_precision: options.calculation_precision,
        };

        for element in elements {
            runtime.mount_element(element);
        }

        let fillers: Vec<ElementInstance> = runtime
            .elements
            .iter()
            .filter(|el| el.field_type == "DataFiller")
            .cloned()
            .collect();
        for filler in &fillers {
            runtime.run_program(&filler.id, script_of(filler), None);
        }

        runtime.recalculate();
        log::info!(
            "{} Feld(er) gemountet, {} Watcher aktiv",
            runtime.elements.len(),
            runtime.bus.watcher_count()
        );
        runtime
    }

    fn mount_element(&mut self, element: &ElementInstance) {
        let Some(field_type) = self.registry.lookup(&element.field_type) else {
            log::warn!(
                "Unbekannter Feldtyp '{}' ({}) wird nicht gerendert",
                element.field_type,
                element.id
            );
            return;
        };
        if self.fields.contains_key(&element.id) {
            log::warn!("Element {} ist bereits gemountet", element.id);
            return;
        }

        let input = field_type.runtime_input(element);
        let carries_value = field_type.value_shape().carries_value();
        let alias = input.alias.clone();
        self.bus.register_value_setter(&alias, &element.id);
        self.bus.register_option_setter(&alias, &element.id);

        let initial = match self.coordinator.value(&element.id) {
            Some(stored) => stored.to_string(),
            None => input.default_value.clone(),
        };
        if carries_value && !initial.is_empty() {
            self.coordinator.submit_value(&element.id, &initial);
        }
        self.values.insert(element.id.clone(), initial);

        if element.field_type == "DataWatcher" {
            self.register_data_watcher(element);
        }

        self.fields.insert(
            element.id.clone(),
            MountedField {
                alias,
                options: input.options,
                carries_value,
            },
        );
        self.elements.push(element.clone());
    }

    fn register_data_watcher(&mut self, element: &ElementInstance) {
        let target = DataWatcher::watched_alias(element);
        if target.is_empty() {
            log::debug!("Data-Watcher {} ohne Zielfeld", element.id);
            return;
        }
        let program = match parse_program(script_of(element)) {
            Ok(program) => program,
            Err(e) => {
                log::warn!("Data-Watcher {}: {}", element.id, e);
                return;
            }
        };
        self.bus.register_watcher(
            target,
            &element.id,
            Box::new(move |value: &str, view: &dyn ValueView| {
                program.evaluate(&RuleContext::new(Some(value), view))
            }),
        );
    }

    /// Entfernt ein Element: Setter und eigener Watcher werden abgemeldet.
    pub fn unmount_element(&mut self, element_id: &str) -> bool {
        let Some(field) = self.fields.remove(element_id) else {
            return false;
        };
        self.bus.unregister_setters(&field.alias, element_id);
        if let Some(element) = self.element(element_id) {
            if element.field_type == "DataWatcher" {
                let target = DataWatcher::watched_alias(element).to_string();
                self.bus.unregister_watcher(&target, element_id);
            }
        }
        self.elements.retain(|el| el.id != element_id);
        self.values.shift_remove(element_id);
        self.coordinator.forget_value(element_id);
        log::debug!("Element {} ausgehängt", element_id);
        true
    }

    /// Entfernt alle Elemente.
    pub fn unmount_all(&mut self) {
        let ids: Vec<String> = self.elements.iter().map(|el| el.id.clone()).collect();
        for id in ids {
            self.unmount_element(&id);
        }
    }

    // ── Zugriff ─────────────────────────────────────────────────────

    /// Gemountete Elemente in Canvas-Reihenfolge.
    pub fn elements(&self) -> &[ElementInstance] {
        &self.elements
    }

    fn element(&self, element_id: &str) -> Option<&ElementInstance> {
        self.elements.iter().find(|el| el.id == element_id)
    }

    /// Angezeigter Wert eines Feldes.
    pub fn value(&self, element_id: &str) -> Option<&str> {
        self.values.get(element_id).map(String::as_str)
    }

    /// Angezeigter Wert per Alias.
    pub fn value_by_alias(&self, alias: &str) -> Option<&str> {
        let id = self.bus.value_target(alias).unwrap_or(alias);
        self.values.get(id).map(String::as_str)
    }

    /// Aktuelle Optionsliste eines Feldes.
    pub fn options(&self, element_id: &str) -> Option<&[FieldOption]> {
        self.fields.get(element_id).map(|f| f.options.as_slice())
    }

    /// Eingabe-Beschreibung mit aktuellem Wert und aktuellen Optionen.
    pub fn runtime_input(&self, element_id: &str) -> Option<RuntimeInput> {
        let element = self.element(element_id)?;
        let field = self.fields.get(element_id)?;
        let mut input = self.registry.lookup(&element.field_type)?.runtime_input(element);
        input.options = field.options.clone();
        input.default_value = self.value(element_id).unwrap_or_default().to_string();
        Some(input)
    }

    pub fn bus(&self) -> &FieldBus {
        &self.bus
    }

    pub fn coordinator(&self) -> &SubmissionCoordinator {
        &self.coordinator
    }

    /// Ob das Feld bei der letzten Prüfung als ungültig markiert wurde.
    pub fn is_invalid(&self, element_id: &str) -> bool {
        self.coordinator.is_invalid(element_id)
    }

    /// Entnimmt alle angefallenen Ereignisse.
    pub fn take_events(&mut self) -> Vec<RuntimeEvent> {
        std::mem::take(&mut self.events)
    }

    fn view(&self) -> AliasView<'_> {
        AliasView {
            bus: &self.bus,
            values: &self.values,
        }
    }

    /// Element-ID hinter einem Alias (Fallback: Alias ist selbst eine ID).
    fn resolve(&self, alias: &str) -> Option<String> {
        match self.bus.value_target(alias) {
            Some(id) => Some(id.to_string()),
            None if self.fields.contains_key(alias) => Some(alias.to_string()),
            None => None,
        }
    }

    // ── Eingaben ────────────────────────────────────────────────────

    /// Benutzereingabe in ein Feld.
    ///
    /// Aktualisiert den Wert, ruft den Watcher des Feld-Alias, spiegelt
    /// Auswahlfelder, meldet den Wert und berechnet alle berechneten Felder neu.
    pub fn input(&mut self, element_id: &str, raw: &str) -> bool {
        let Some(element) = self.element(element_id).cloned() else {
            log::warn!("Eingabe für unbekanntes Element {}", element_id);
            return false;
        };
        if !self.accepts_input(&element) {
            log::debug!("Element {} nimmt keine Eingabe an", element_id);
            return false;
        }
        self.apply_value(&element, raw);
        if element.field_type == "SelectField" {
            self.mirror_selection(&element, raw);
        }
        self.recalculate();
        true
    }

    /// Schaltet eine Option eines Mehrfachauswahl-Feldes um.
    pub fn toggle_option(&mut self, element_id: &str, option_value: &str) -> bool {
        let Some(element) = self.element(element_id) else {
            return false;
        };
        if !SelectField::is_multi(element) {
            return self.input(element_id, option_value);
        }
        let current = self.value(element_id).unwrap_or_default();
        let mut selected = SelectField::split_values(current);
        if let Some(pos) = selected.iter().position(|v| *v == option_value) {
            selected.remove(pos);
        } else {
            selected.push(option_value);
        }
        let joined = SelectField::join_values(selected);
        self.input(element_id, &joined)
    }

    fn accepts_input(&self, element: &ElementInstance) -> bool {
        let carries = self
            .fields
            .get(&element.id)
            .is_some_and(|f| f.carries_value);
        let calculated = element.field_type == "NumberField" && NumberField::is_calculated(element);
        carries && !calculated && element.field_type != "UPIPayment"
    }

    /// Schreibt den Wert, ruft den Watcher und meldet danach den Endstand an
    /// den Coordinator. Schreibt der Watcher auf dasselbe Feld zurück, wird
    /// dessen Wert gemeldet.
    fn apply_value(&mut self, element: &ElementInstance, value: &str) {
        self.values.insert(element.id.clone(), value.to_string());
        let Some((alias, carries_value)) = self
            .fields
            .get(&element.id)
            .map(|f| (f.alias.clone(), f.carries_value))
        else {
            return;
        };
        self.dispatch_watcher(&alias, value);
        if carries_value {
            if let Some(current) = self.values.get(&element.id) {
                self.coordinator.submit_value(&element.id, current);
            }
        }
    }

    fn dispatch_watcher(&mut self, alias: &str, value: &str) {
        if !self.bus.has_watcher(alias) {
            return;
        }
        if let Err(e) = self.bus.begin_dispatch(alias) {
            log::warn!("{}", e);
            return;
        }
        let effects = self.bus.notify_watcher(alias, value, &self.view());
        if let Some(effects) = effects {
            self.apply_effects(alias, effects);
        }
        self.bus.end_dispatch(alias);
    }

    fn mirror_selection(&mut self, element: &ElementInstance, selected: &str) {
        for write in SelectField::mirror_writes(element, selected) {
            let Some(target_id) = self.resolve(&write.target) else {
                log::warn!(
                    "Spiegelziel '{}' von {} nicht gefunden",
                    write.target,
                    element.id
                );
                continue;
            };
            self.values.insert(target_id.clone(), write.value.clone());
            if self.fields.get(&target_id).is_some_and(|f| f.carries_value) {
                self.coordinator.submit_value(&target_id, &write.value);
            }
        }
    }

    /// Berechnet alle berechneten Zahlenfelder neu (in Canvas-Reihenfolge).
    pub fn recalculate(&mut self) {
        let calculated: Vec<(String, Vec<crate::core::CalculationStep>)> = self
            .elements
            .iter()
            .filter(|el| el.field_type == "NumberField")
            .map(|el| (el.id.clone(), NumberField::steps(el)))
            .filter(|(_, steps)| !steps.is_empty())
            .collect();

        for (id, steps) in calculated {
            let view = self.view();
            let result = evaluate_calculation(&steps, |field_id| view.value_of(field_id));
            let display = result
                .map(|v| format_number(v, self.calculation_precision))
                .unwrap_or_default();
            if self.value(&id) != Some(display.as_str()) {
                self.values.insert(id.clone(), display.clone());
                self.coordinator.submit_value(&id, &display);
            }
        }
    }

    // ── Externe Setter ──────────────────────────────────────────────

    /// Setzt den Wert des Feldes hinter `alias` (externer Setter).
    ///
    /// Für Zahlungsfelder wird der Betrag gesetzt. Berechnete Felder sind
    /// schreibgeschützt. Liefert `false`, wenn kein Setter registriert ist.
    pub fn set_field_value(&mut self, alias: &str, value: &str) -> bool {
        let Some(target_id) = self.bus.value_target(alias).map(str::to_string) else {
            log::debug!("Kein Wert-Setter für '{}'", alias);
            return false;
        };
        let Some(element) = self.element(&target_id).cloned() else {
            return false;
        };
        match element.field_type.as_str() {
            "UPIPayment" => {
                let state = PaymentState::with_amount(&element, value, false);
                self.apply_value(&element, &state.encode());
            }
            "NumberField" if NumberField::is_calculated(&element) => {
                log::debug!("Berechnetes Feld {} ist schreibgeschützt", target_id);
                return false;
            }
            _ => self.apply_value(&element, value),
        }
        self.recalculate();
        true
    }

    /// Ersetzt die Optionsliste des Feldes hinter `alias` (externer Setter).
    pub fn set_field_options(&mut self, alias: &str, options: Vec<FieldOption>) -> bool {
        let Some(target_id) = self.bus.option_target(alias).map(str::to_string) else {
            log::debug!("Kein Options-Setter für '{}'", alias);
            return false;
        };
        match self.fields.get_mut(&target_id) {
            Some(field) => {
                field.options = options;
                true
            }
            None => false,
        }
    }

    // ── Aktionen ────────────────────────────────────────────────────

    /// Klick auf einen Script-Button.
    pub fn click(&mut self, element_id: &str) -> bool {
        let Some(element) = self.element(element_id) else {
            return false;
        };
        if element.field_type != "ScriptButton" {
            log::debug!("Element {} ist kein Script-Button", element_id);
            return false;
        }
        let script = script_of(element).to_string();
        self.run_program(element_id, &script, None)
    }

    /// Klick auf einen Button-Block einer Karte.
    pub fn click_card_button(&mut self, element_id: &str, block_id: &str) -> bool {
        let Some(element) = self.element(element_id) else {
            return false;
        };
        let Some(block) = CardField::blocks(element)
            .into_iter()
            .find(|b| b.id == block_id)
        else {
            log::warn!("Block {} in Karte {} nicht gefunden", block_id, element_id);
            return false;
        };
        let script = block.script().to_string();
        let source = format!("{element_id}/{block_id}");
        self.run_program(&source, &script, None)
    }

    fn run_program(&mut self, source: &str, script: &str, trigger: Option<&str>) -> bool {
        let result = parse_program(script)
            .and_then(|program| program.evaluate(&RuleContext::new(trigger, &self.view())));
        match result {
            Ok(effects) => {
                self.apply_effects(source, effects);
                true
            }
            Err(e) => {
                log::warn!("Regel von {} fehlgeschlagen: {}", source, e);
                false
            }
        }
    }

    fn apply_effects(&mut self, source: &str, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SetValue { target, value } => {
                    if !self.set_field_value(&target, &value) {
                        log::warn!("Regel von {}: Feld '{}' nicht gefunden", source, target);
                    }
                }
                Effect::SetOptions { target, options } => {
                    if !self.set_field_options(&target, options) {
                        log::warn!("Regel von {}: Feld '{}' nicht gefunden", source, target);
                    }
                }
                Effect::OpenLink(link) => self.events.push(RuntimeEvent::OpenLink(link)),
                Effect::Submit => self.events.push(RuntimeEvent::SubmitRequested),
                Effect::Log(message) => log::info!("Regel {}: {}", source, message),
            }
        }
    }

    /// Markiert eine Zahlung als bezahlt, wenn der angemeldete Benutzer berechtigt ist.
    pub fn mark_paid(
        &mut self,
        element_id: &str,
        identity: &dyn IdentityProvider,
    ) -> Result<(), PortError> {
        let element = self
            .element(element_id)
            .filter(|el| el.field_type == "UPIPayment")
            .cloned()
            .ok_or_else(|| PortError::NotFound(element_id.to_string()))?;
        let user = identity.current_user();
        if !UpiPayment::may_mark_paid(&element, user.as_ref()) {
            log::warn!("Zahlung {}: Benutzer nicht berechtigt", element_id);
            return Err(PortError::Unauthorized);
        }
        let current = self
            .value(element_id)
            .and_then(PaymentState::parse)
            .unwrap_or_else(|| PaymentState::initial(&element));
        let paid = PaymentState::with_amount(&element, &current.amount, true);
        self.apply_value(&element, &paid.encode());
        self.recalculate();
        log::info!("Zahlung {} als bezahlt markiert", element_id);
        Ok(())
    }

    /// Lädt eine Datei in ein Upload-Feld.
    ///
    /// Datei-Uploads gehen an den Blob-Speicher (Wert = Datei-ID),
    /// Bild-Uploads werden als Data-URI gespeichert. Bei Fehlern bleibt der
    /// bisherige Wert erhalten.
    pub fn upload_file(
        &mut self,
        element_id: &str,
        bytes: &[u8],
        mime: &str,
        blobs: &mut dyn BlobStore,
    ) -> Result<String, PortError> {
        let element = self
            .element(element_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(element_id.to_string()))?;
        if bytes.len() > self.max_upload_bytes {
            return Err(PortError::TooLarge {
                size: bytes.len(),
                limit: self.max_upload_bytes,
            });
        }
        let value = match element.field_type.as_str() {
            "FileUpload" => blobs.upload(bytes, mime)?,
            "ImageUpload" => format!(
                "data:{};base64,{}",
                mime,
                base64::engine::general_purpose::STANDARD.encode(bytes)
            ),
            other => {
                return Err(PortError::UploadRejected(format!(
                    "{other} nimmt keine Dateien an"
                )))
            }
        };
        self.apply_value(&element, &value);
        self.recalculate();
        Ok(value)
    }

    /// Schickt das Formular über den Speicher ab.
    pub fn submit(
        &mut self,
        store: &mut dyn FormStore,
        form_url: &str,
    ) -> Result<SubmissionId, SubmitError> {
        self.coordinator
            .submit(&self.registry, &self.elements, store, form_url)
    }

    /// Schreibt eine geladene Submission mit den aktuellen Werten zurück.
    pub fn update_submission(&mut self, store: &mut dyn FormStore) -> Result<(), SubmitError> {
        self.coordinator
            .update_submission(&self.registry, &self.elements, store)
    }
}
