use form_designer::ports::{FormStore, MemoryFormStore};
use form_designer::{
    parse_envelope, parse_values, write_envelope, DesignerOptions, ElementInstance, FieldRegistry,
    FormRuntime, GlobalSettings, SubmissionCoordinator, SubmissionPhase, SubmitError,
};
use serde_json::json;
use std::sync::Arc;

fn registry() -> Arc<FieldRegistry> {
    Arc::new(FieldRegistry::with_builtins())
}

fn construct(registry: &FieldRegistry, type_name: &str, id: &str) -> ElementInstance {
    registry
        .lookup(type_name)
        .unwrap_or_else(|| panic!("Feldtyp {type_name} sollte registriert sein"))
        .construct(id)
}

/// Formular mit Pflicht-E-Mail, Menge, Preis und berechneter Summe.
fn order_form(registry: &FieldRegistry) -> Vec<ElementInstance> {
    vec![
        construct(registry, "TitleField", "title").with_attr("label", "Bestellung"),
        construct(registry, "TextField", "mail")
            .with_attr("inputType", "email")
            .with_attr("required", true),
        construct(registry, "NumberField", "qty").with_attr("customId", "menge"),
        construct(registry, "NumberField", "price"),
        construct(registry, "NumberField", "sum").with_attr(
            "calculationSteps",
            json!([
                {"fieldId": "menge"},
                {"fieldId": "price", "operator": "*"}
            ]),
        ),
    ]
}

#[test]
fn test_design_publish_fill_and_submit() {
    let reg = registry();
    let options = DesignerOptions::default();
    let mut store = MemoryFormStore::new();

    let mut canvas = form_designer::CanvasState::new(options.default_global_settings());
    for element in order_form(&reg) {
        canvas
            .append(element)
            .expect("Elemente sollten eindeutige IDs haben");
    }
    let envelope = write_envelope(&canvas).expect("Envelope sollte serialisierbar sein");
    store
        .save_form("order", &envelope)
        .expect("Speichern sollte funktionieren");
    let form_url = store
        .publish("order")
        .expect("Veröffentlichen sollte funktionieren");

    let loaded = parse_envelope(
        &store.load_form("order").expect("Formular sollte existieren"),
        &GlobalSettings::default(),
    )
    .expect("Envelope sollte lesbar sein");
    let mut runtime = FormRuntime::mount(reg, &loaded.elements, &options);

    runtime.input("qty", "3");
    runtime.input("price", "2.5");
    assert_eq!(runtime.value("sum"), Some("7.5"));

    match runtime.submit(&mut store, &form_url) {
        Err(SubmitError::Invalid { failed }) => assert_eq!(failed, vec!["mail".to_string()]),
        other => panic!("Unerwartetes Ergebnis: {other:?}"),
    }
    assert!(runtime.is_invalid("mail"));
    assert_eq!(runtime.coordinator().phase(), SubmissionPhase::Editing);
    assert_eq!(runtime.value("qty"), Some("3"));

    runtime.input("mail", "kein-mail");
    assert!(runtime.submit(&mut store, &form_url).is_err());

    runtime.input("mail", "ada@example.com");
    let submission_id = runtime
        .submit(&mut store, &form_url)
        .expect("Gültiges Formular sollte abgeschickt werden");
    assert_eq!(runtime.coordinator().phase(), SubmissionPhase::Submitted);
    assert!(!runtime.is_invalid("mail"));

    let stored = store.submissions_of("order");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].0, submission_id);
    let values = parse_values(stored[0].1).expect("Submission sollte lesbar sein");
    assert_eq!(values.get("mail").map(String::as_str), Some("ada@example.com"));
    assert_eq!(values.get("sum").map(String::as_str), Some("7.5"));
    assert!(!values.contains_key("title"));

    assert!(matches!(
        runtime.submit(&mut store, &form_url),
        Err(SubmitError::AlreadySubmitted)
    ));
}

#[test]
fn test_submit_to_unknown_url_keeps_values_for_retry() {
    let reg = registry();
    let elements = order_form(&reg);
    let mut store = MemoryFormStore::new();
    let mut runtime = FormRuntime::mount(reg, &elements, &DesignerOptions::default());
    runtime.input("mail", "ada@example.com");

    assert!(matches!(
        runtime.submit(&mut store, "nicht-veröffentlicht"),
        Err(SubmitError::Port(_))
    ));
    assert_eq!(runtime.coordinator().phase(), SubmissionPhase::Editing);
    assert!(runtime.coordinator().last_error().is_some());
    assert_eq!(runtime.value("mail"), Some("ada@example.com"));
}

#[test]
fn test_stored_submission_can_be_edited_and_written_back() {
    let reg = registry();
    let elements = order_form(&reg);
    let mut store = MemoryFormStore::new();
    store
        .save_form("order", "{\"elements\":[]}")
        .expect("Speichern sollte funktionieren");
    let form_url = store
        .publish("order")
        .expect("Veröffentlichen sollte funktionieren");

    let mut first = FormRuntime::mount(reg.clone(), &elements, &DesignerOptions::default());
    first.input("mail", "ada@example.com");
    first.input("qty", "2");
    let submission_id = first
        .submit(&mut store, &form_url)
        .expect("Abschicken sollte funktionieren");

    let coordinator = SubmissionCoordinator::load_submission(&store, "order", &submission_id)
        .expect("Submission sollte ladbar sein");
    let mut editor = FormRuntime::mount_with(
        reg,
        &elements,
        &DesignerOptions::default(),
        coordinator,
    );
    assert_eq!(editor.value("mail"), Some("ada@example.com"));
    assert_eq!(editor.value("qty"), Some("2"));

    editor.input("price", "4");
    assert_eq!(editor.value("sum"), Some("8"));
    editor
        .update_submission(&mut store)
        .expect("Aktualisieren sollte funktionieren");

    let content = store
        .load_submission("order", &submission_id)
        .expect("Submission sollte existieren");
    let values = parse_values(&content).expect("Submission sollte lesbar sein");
    assert_eq!(values.get("sum").map(String::as_str), Some("8"));
}

#[test]
fn test_select_watcher_and_rule_chain() {
    let reg = registry();
    let elements = vec![
        construct(&reg, "SelectField", "country")
            .with_attr("customId", "land")
            .with_attr(
                "options",
                json!([
                    {"label": "Deutschland", "value": "DE"},
                    {"label": "Indien", "value": "IN"}
                ]),
            ),
        construct(&reg, "SelectField", "currency").with_attr("customId", "waehrung"),
        construct(&reg, "DataWatcher", "w")
            .with_attr("watchFieldId", "land")
            .with_attr(
                "script",
                "if value == \"IN\" then options waehrung = [\"Rupie\" => \"INR\"]\n\
                 if value == \"DE\" then options waehrung = [\"Euro\" => \"EUR\"]\n\
                 set waehrung = \"\"",
            ),
    ];
    let mut runtime = FormRuntime::mount(reg, &elements, &DesignerOptions::default());

    runtime.input("country", "IN");
    let options = runtime
        .options("currency")
        .expect("Währungsfeld sollte gemountet sein");
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].value, "INR");

    runtime.input("country", "DE");
    let input = runtime
        .runtime_input("currency")
        .expect("Währungsfeld sollte gemountet sein");
    assert_eq!(input.options[0].label, "Euro");
    assert_eq!(runtime.value("currency"), Some(""));
}
