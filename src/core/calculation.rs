//! Berechnungsschritte für berechnete Zahlenfelder.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Operator eines Berechnungsschritts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    /// Addition
    #[default]
    Add,
    /// Subtraktion
    Sub,
    /// Multiplikation
    Mul,
    /// Division
    Div,
    /// Prozent: Operand / 100, dann multiplizieren
    Percent,
}

impl Operator {
    /// Parst das Operator-Symbol.
    pub fn parse(symbol: &str) -> Option<Self> {
        match symbol.trim() {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            "%" => Some(Operator::Percent),
            _ => None,
        }
    }

    /// Symbol für Anzeige und Serialisierung.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Percent => "%",
        }
    }
}

/// Ein Term einer Berechnung: Feld-Referenz plus Operator.
///
/// Der Operator des ersten Schritts wird ignoriert (er initialisiert den Akkumulator).
/// Ein fehlender Operator in späteren Schritten gilt als `+`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationStep {
    /// ID oder Alias des Quellfeldes
    pub field_id: String,
    /// Operator-Symbol (`+ - * / %`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
}

impl CalculationStep {
    /// Erstellt einen Schritt.
    pub fn new(field_id: impl Into<String>, operator: Option<Operator>) -> Self {
        Self {
            field_id: field_id.into(),
            operator: operator.map(|op| op.symbol().to_string()),
        }
    }

    /// Wirksamer Operator (fehlend/unbekannt → `+`).
    pub fn effective_operator(&self) -> Operator {
        self.operator
            .as_deref()
            .and_then(Operator::parse)
            .unwrap_or_default()
    }

    /// Liest die Schritte aus dem `calculationSteps`-Attribut.
    ///
    /// Fehlerhafte Einträge werden übersprungen, damit ein einzelner kaputter
    /// Schritt nicht das ganze Feld unbrauchbar macht.
    pub fn list_from_attr(value: Option<&Value>) -> Vec<CalculationStep> {
        let Some(Value::Array(items)) = value else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect()
    }
}

/// Formel-Zusammenfassung wie im Designer angezeigt (z.B. `a +b %c`).
pub fn formula_summary(steps: &[CalculationStep]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            if i == 0 {
                step.field_id.clone()
            } else {
                format!("{}{}", step.effective_operator().symbol(), step.field_id)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
