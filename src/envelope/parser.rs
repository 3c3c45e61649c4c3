//! Parser für Envelope und Wert-Map inklusive Altformaten.

use crate::core::{CanvasState, ElementInstance, GlobalSettings};
use crate::error::EnvelopeError;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Parsed einen gespeicherten Envelope und normalisiert ihn auf `CanvasState`.
///
/// Akzeptierte Formen:
/// 1. `{elements: [...], globalSettings}`
/// 2. `[...]` (Altformat ohne Einstellungen)
/// 3. `{elements: {elements: [...], globalSettings}, globalSettings}`
/// 4. `{elements: [...]}`
///
/// Fehlende Einstellungs-Schlüssel kommen aus `defaults`. Elemente ohne
/// gültige Form werden übersprungen; bei doppelten IDs gewinnt das erste.
pub fn parse_envelope(content: &str, defaults: &GlobalSettings) -> Result<CanvasState, EnvelopeError> {
    let root: Value = serde_json::from_str(content)?;

    let (items, settings) = match &root {
        Value::Array(items) => (items, None),
        Value::Object(outer) => match outer.get("elements") {
            Some(Value::Array(items)) => (items, outer.get("globalSettings")),
            Some(Value::Object(inner)) => {
                let Some(Value::Array(items)) = inner.get("elements") else {
                    return Err(EnvelopeError::InvalidShape(
                        "verschachteltes 'elements' ohne Liste".into(),
                    ));
                };
                let settings = inner
                    .get("globalSettings")
                    .filter(|v| v.is_object())
                    .or_else(|| outer.get("globalSettings"));
                (items, settings)
            }
            Some(_) => {
                return Err(EnvelopeError::InvalidShape(
                    "'elements' ist weder Liste noch Objekt".into(),
                ))
            }
            None => return Err(EnvelopeError::InvalidShape("'elements' fehlt".into())),
        },
        _ => {
            return Err(EnvelopeError::InvalidShape(
                "Wurzel ist weder Liste noch Objekt".into(),
            ))
        }
    };

    let global_settings = merge_settings(defaults, settings)?;
    let elements = collect_elements(items);
    Ok(CanvasState {
        elements,
        global_settings,
    })
}

fn merge_settings(
    defaults: &GlobalSettings,
    stored: Option<&Value>,
) -> Result<GlobalSettings, EnvelopeError> {
    let Some(Value::Object(stored)) = stored else {
        return Ok(defaults.clone());
    };
    let mut merged = match serde_json::to_value(defaults)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    for (key, value) in stored {
        merged.insert(key.clone(), value.clone());
    }
    Ok(serde_json::from_value(Value::Object(merged))?)
}

fn collect_elements(items: &[Value]) -> Vec<ElementInstance> {
    let mut seen = HashSet::new();
    let mut elements = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<ElementInstance>(item.clone()) {
            Ok(element) => {
                if seen.insert(element.id.clone()) {
                    elements.push(element);
                } else {
                    log::warn!("Doppelte Element-ID '{}' beim Laden verworfen", element.id);
                }
            }
            Err(e) => log::warn!("Element {} übersprungen: {}", index, e),
        }
    }
    elements
}

/// Parsed die flache Wert-Map einer Submission.
///
/// Nicht-String-Werte werden in ihre Textform überführt (`true` → `"true"`,
/// `null` → `""`, Objekte als JSON).
pub fn parse_values(content: &str) -> Result<IndexMap<String, String>, EnvelopeError> {
    let root: Value = serde_json::from_str(content)?;
    let Value::Object(map) = root else {
        return Err(EnvelopeError::InvalidShape("Werte müssen ein Objekt sein".into()));
    };
    Ok(map
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::write_envelope;

    const ELEMENTS: &str = r#"[
        {"id":"a","type":"TextField","extraAttributes":{"label":"Name"}},
        {"id":"b","type":"NumberField","extraAttributes":{}}
    ]"#;

    #[test]
    fn legacy_array_and_current_shape_normalize_identically() {
        let defaults = GlobalSettings::default();
        let legacy = parse_envelope(ELEMENTS, &defaults).unwrap();
        let current = parse_envelope(
            &format!(r##"{{"elements":{ELEMENTS},"globalSettings":{{"backgroundColor":"#ffffff","borderRadius":"12px"}}}}"##),
            &defaults,
        )
        .unwrap();
        assert_eq!(legacy, current);
        assert_eq!(legacy.elements.len(), 2);
    }

    #[test]
    fn nested_shape_prefers_inner_settings() {
        let content = format!(
            r##"{{"elements":{{"elements":{ELEMENTS},"globalSettings":{{"backgroundColor":"#111111"}}}},"globalSettings":{{"backgroundColor":"#222222"}}}}"##
        );
        let canvas = parse_envelope(&content, &GlobalSettings::default()).unwrap();
        assert_eq!(canvas.global_settings.background_color, "#111111");
        assert_eq!(canvas.global_settings.border_radius, "12px");
        assert_eq!(canvas.elements[0].id, "a");
    }

    #[test]
    fn missing_settings_use_given_defaults() {
        let defaults = GlobalSettings {
            background_color: "#abcdef".into(),
            ..GlobalSettings::default()
        };
        let canvas = parse_envelope(&format!(r#"{{"elements":{ELEMENTS}}}"#), &defaults).unwrap();
        assert_eq!(canvas.global_settings, defaults);
    }

    #[test]
    fn duplicate_ids_keep_first_and_broken_elements_are_skipped() {
        let content = r#"[
            {"id":"a","type":"TextField","extraAttributes":{"label":"erstes"}},
            {"id":"a","type":"TextField","extraAttributes":{"label":"zweites"}},
            {"type":"TextField"}
        ]"#;
        let canvas = parse_envelope(content, &GlobalSettings::default()).unwrap();
        assert_eq!(canvas.elements.len(), 1);
        assert_eq!(canvas.elements[0].attr_str("label"), "erstes");
    }

    #[test]
    fn roundtrip_preserves_unknown_settings() {
        let content = r##"{"elements":[{"id":"a","type":"TitleField","extraAttributes":{"title":"Hallo"}}],"globalSettings":{"backgroundColor":"#000000","borderRadius":"0px","showSubmit":false,"font":"serif"}}"##;
        let canvas = parse_envelope(content, &GlobalSettings::default()).unwrap();
        assert_eq!(canvas.global_settings.extra.get("font"), Some(&Value::from("serif")));
        let written = write_envelope(&canvas).unwrap();
        assert_eq!(parse_envelope(&written, &GlobalSettings::default()).unwrap(), canvas);
    }

    #[test]
    fn invalid_shapes_are_rejected() {
        let defaults = GlobalSettings::default();
        assert!(matches!(
            parse_envelope("42", &defaults),
            Err(EnvelopeError::InvalidShape(_))
        ));
        assert!(matches!(
            parse_envelope(r#"{"foo":[]}"#, &defaults),
            Err(EnvelopeError::InvalidShape(_))
        ));
        assert!(matches!(
            parse_envelope("{kaputt", &defaults),
            Err(EnvelopeError::Json(_))
        ));
    }

    #[test]
    fn values_are_stringified() {
        let values =
            parse_values(r#"{"a":"x","b":true,"c":5,"d":null,"e":{"paid":true}}"#).unwrap();
        assert_eq!(values["a"], "x");
        assert_eq!(values["b"], "true");
        assert_eq!(values["c"], "5");
        assert_eq!(values["d"], "");
        assert_eq!(values["e"], r#"{"paid":true}"#);
        assert!(parse_values("[]").is_err());
    }
}
