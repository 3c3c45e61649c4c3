//! Property-Editor-Schema und die zugehörige Prüfung der Attribute.

use crate::core::Attributes;
use regex::Regex;
use serde_json::Value;

/// Eine editierbare Eigenschaft eines Feldtyps.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    /// Attribut-Schlüssel
    pub key: &'static str,
    /// Beschriftung im Property-Editor
    pub label: &'static str,
    /// Art und Einschränkungen
    pub kind: PropertyKind,
    /// Muss gesetzt und nicht leer sein
    pub required: bool,
}

/// Art einer Eigenschaft mit ihren Einschränkungen.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// Text mit optionaler Maximallänge
    Text { max_len: Option<usize> },
    /// Text, der einem Muster entsprechen muss (leer erlaubt, wenn nicht `required`)
    Pattern {
        pattern: &'static str,
        hint: &'static str,
    },
    /// Wahrheitswert
    Bool,
    /// Ganzzahl im Bereich
    Integer { min: i64, max: i64 },
    /// Eine von mehreren festen Auswahlen
    Choice(&'static [&'static str]),
    /// JSON-Liste (Optionen, Blöcke, Berechnungsschritte)
    List,
    /// Regelprogramm (wird beim Prüfen geparst)
    Rule,
}

impl PropertySpec {
    /// Text-Eigenschaft.
    pub const fn text(key: &'static str, label: &'static str, max_len: Option<usize>) -> Self {
        Self {
            key,
            label,
            kind: PropertyKind::Text { max_len },
            required: false,
        }
    }

    /// Bool-Eigenschaft.
    pub const fn boolean(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            kind: PropertyKind::Bool,
            required: false,
        }
    }

    /// Auswahl-Eigenschaft.
    pub const fn choice(
        key: &'static str,
        label: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            label,
            kind: PropertyKind::Choice(choices),
            required: false,
        }
    }

    /// Builder: markiert die Eigenschaft als Pflicht.
    pub fn mandatory(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Rasterbreiten-Auswahl.
pub const SIZES: &[&str] = &["small", "medium", "large"];
/// Ausrichtungs-Auswahl.
pub const ALIGNMENTS: &[&str] = &["left", "center", "right"];

/// Gemeinsame Eigenschaften der Eingabefelder (Label, Hilfe, Pflicht, Größe, Alias).
pub fn common_input_specs(label_max: usize, helper_max: usize) -> Vec<PropertySpec> {
    vec![
        PropertySpec::text("customId", "Eigene ID", Some(100)),
        PropertySpec::text("label", "Beschriftung", Some(label_max)),
        PropertySpec::text("helperText", "Hilfetext", Some(helper_max)),
        PropertySpec::boolean("required", "Pflichtfeld"),
        PropertySpec::choice("size", "Größe", SIZES),
        PropertySpec::text("inputWidth", "Eingabebreite", None),
        PropertySpec::choice("alignment", "Ausrichtung", ALIGNMENTS),
        PropertySpec::text("color", "Textfarbe", None),
        PropertySpec::text("background", "Hintergrund", None),
        PropertySpec::text("borderRadius", "Eckenradius", None),
        PropertySpec::text("borderColor", "Rahmenfarbe", None),
        PropertySpec::text("borderWidth", "Rahmenbreite", None),
    ]
}

/// Prüft Attribute gegen ein Schema und liefert lesbare Fehlermeldungen.
///
/// Fehlende, nicht verpflichtende Eigenschaften sind erlaubt; unbekannte
/// Attribute werden ignoriert.
pub fn check_properties(schema: &[PropertySpec], attributes: &Attributes) -> Vec<String> {
    let mut problems = Vec::new();
    for spec in schema {
        match attributes.get(spec.key) {
            None | Some(Value::Null) => {
                if spec.required {
                    problems.push(format!("{}: Pflichtangabe fehlt", spec.key));
                }
            }
            Some(value) => {
                if let Err(msg) = check_value(spec, value) {
                    problems.push(format!("{}: {}", spec.key, msg));
                }
            }
        }
    }
    problems
}

fn check_value(spec: &PropertySpec, value: &Value) -> Result<(), String> {
    match &spec.kind {
        PropertyKind::Text { max_len } => {
            let text = value.as_str().ok_or("Text erwartet")?;
            if spec.required && text.trim().is_empty() {
                return Err("darf nicht leer sein".into());
            }
            match max_len {
                Some(max) if text.chars().count() > *max => {
                    Err(format!("höchstens {max} Zeichen erlaubt"))
                }
                _ => Ok(()),
            }
        }
        PropertyKind::Pattern { pattern, hint } => {
            let text = value.as_str().ok_or("Text erwartet")?;
            if text.is_empty() && !spec.required {
                return Ok(());
            }
            let re = Regex::new(pattern).map_err(|e| format!("ungültiges Muster: {e}"))?;
            if re.is_match(text) {
                Ok(())
            } else {
                Err(format!("Format ungültig (z.B. {hint})"))
            }
        }
        PropertyKind::Bool => match value {
            Value::Bool(_) => Ok(()),
            _ => Err("Wahrheitswert erwartet".into()),
        },
        PropertyKind::Integer { min, max } => {
            let n = value
                .as_i64()
                .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
                .ok_or("Ganzzahl erwartet")?;
            if n < *min || n > *max {
                Err(format!("muss zwischen {min} und {max} liegen"))
            } else {
                Ok(())
            }
        }
        PropertyKind::Choice(choices) => {
            let text = value.as_str().ok_or("Text erwartet")?;
            if choices.contains(&text) {
                Ok(())
            } else {
                Err(format!("erlaubt sind: {}", choices.join(", ")))
            }
        }
        PropertyKind::List => match value {
            Value::Array(_) => Ok(()),
            _ => Err("Liste erwartet".into()),
        },
        PropertyKind::Rule => {
            let source = value.as_str().ok_or("Regeltext erwartet")?;
            crate::bus::rules::parse_program(source)
                .map(|_| ())
                .map_err(|e| e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::attrs;
    use serde_json::json;

    #[test]
    fn max_length_is_enforced() {
        let schema = vec![PropertySpec::text("label", "Beschriftung", Some(5))];
        let ok = attrs([("label", json!("kurz"))]);
        let too_long = attrs([("label", json!("viel zu lang"))]);
        assert!(check_properties(&schema, &ok).is_empty());
        assert_eq!(check_properties(&schema, &too_long).len(), 1);
    }

    #[test]
    fn choice_rejects_unknown_value() {
        let schema = vec![PropertySpec::choice("size", "Größe", SIZES)];
        let problems = check_properties(&schema, &attrs([("size", json!("huge"))]));
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("size:"));
    }

    #[test]
    fn missing_mandatory_property_is_reported() {
        let schema = vec![PropertySpec::text("watchFieldId", "Feld", None).mandatory()];
        let problems = check_properties(&schema, &Attributes::new());
        assert_eq!(problems, vec!["watchFieldId: Pflichtangabe fehlt".to_string()]);
    }

    #[test]
    fn integer_range_accepts_numeric_strings() {
        let schema = vec![PropertySpec {
            key: "rows",
            label: "Zeilen",
            kind: PropertyKind::Integer { min: 1, max: 10 },
            required: false,
        }];
        assert!(check_properties(&schema, &attrs([("rows", json!("4"))])).is_empty());
        assert_eq!(check_properties(&schema, &attrs([("rows", json!(11))])).len(), 1);
    }

    #[test]
    fn rule_property_is_parsed() {
        let schema = vec![PropertySpec {
            key: "script",
            label: "Regel",
            kind: PropertyKind::Rule,
            required: false,
        }];
        assert!(check_properties(&schema, &attrs([("script", json!("set a = 1"))])).is_empty());
        assert_eq!(
            check_properties(&schema, &attrs([("script", json!("set = ("))])).len(),
            1
        );
    }
}
