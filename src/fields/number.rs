//! Zahlenfeld mit optionaler Berechnung aus anderen Feldern.

use super::properties::{PropertyKind, PropertySpec};
use super::{attrs, DesignerPreview, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape};
use crate::core::{formula_summary, Attributes, CalculationStep, ElementInstance};
use serde_json::json;

/// Zahlenfeld. Mit nicht-leeren `calculationSteps` wird es schreibgeschützt
/// und vom Feld-Bus berechnet.
pub struct NumberField;

impl NumberField {
    /// Berechnungsschritte der Instanz (leer = normales Eingabefeld).
    pub fn steps(element: &ElementInstance) -> Vec<CalculationStep> {
        CalculationStep::list_from_attr(element.attributes.get("calculationSteps"))
    }

    /// Ob die Instanz ein berechnetes Feld ist.
    pub fn is_calculated(element: &ElementInstance) -> bool {
        !Self::steps(element).is_empty()
    }
}

impl FieldType for NumberField {
    fn type_name(&self) -> &'static str {
        "NumberField"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "Number field",
            icon: "binary",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([
            ("label", json!("Number field")),
            ("helperText", json!("Helper text")),
            ("required", json!(false)),
            ("placeHolder", json!("0")),
            ("calculationSteps", json!([])),
        ])
    }

    fn validate(&self, element: &ElementInstance, value: &str) -> bool {
        !element.is_required() || !value.is_empty()
    }

    fn designer_preview(&self, element: &ElementInstance) -> DesignerPreview {
        let mut preview = DesignerPreview::from_common(element);
        let steps = Self::steps(element);
        if !steps.is_empty() {
            preview.summary = Some(format!("= {}", formula_summary(&steps)));
        }
        preview
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        let mut input = RuntimeInput::new(InputKind::Number, element);
        input.read_only = Self::is_calculated(element);
        input
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        vec![
            PropertySpec::text("customId", "Eigene ID", Some(100)),
            PropertySpec::text("label", "Beschriftung", Some(200)),
            PropertySpec::text("helperText", "Hilfetext", Some(50)),
            PropertySpec::boolean("required", "Pflichtfeld"),
            PropertySpec::text("placeHolder", "Platzhalter", Some(50)),
            PropertySpec {
                key: "calculationSteps",
                label: "Berechnung",
                kind: PropertyKind::List,
                required: false,
            },
        ]
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::Number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operator;

    #[test]
    fn calculated_field_is_read_only_with_formula_summary() {
        let steps = vec![
            CalculationStep::new("a", None),
            CalculationStep::new("b", Some(Operator::Mul)),
        ];
        let el = NumberField
            .construct("n")
            .with_attr("calculationSteps", serde_json::to_value(&steps).unwrap());
        assert!(NumberField.runtime_input(&el).read_only);
        assert_eq!(
            NumberField.designer_preview(&el).summary.as_deref(),
            Some("= a *b")
        );
    }

    #[test]
    fn plain_number_field_is_editable() {
        let el = NumberField.construct("n");
        assert!(!NumberField.runtime_input(&el).read_only);
        assert!(NumberField.designer_preview(&el).summary.is_none());
    }
}
