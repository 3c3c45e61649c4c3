//! Auswertung der Berechnungsschritte berechneter Zahlenfelder.
//!
//! Die Schritte werden strikt von links nach rechts ausgewertet; jeder
//! Schritt liest nur den aktuellen Live-Wert seines Quellfeldes.

use crate::core::{CalculationStep, Operator};
use crate::error::EvaluationError;

/// Liest einen Operanden: fehlend, leer oder nicht numerisch zählt als 0.
fn operand(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Wertet eine Berechnung aus.
///
/// - Der Operator des ersten Schritts wird ignoriert (Startwert).
/// - `%` addiert den angegebenen Prozentsatz des vorherigen Terms
///   (`10 + 5 %50` = `10 + 5 + 2.5`).
/// - Division durch 0 oder ein nicht endliches Ergebnis liefert einen Fehler.
pub fn try_evaluate_calculation<'a>(
    steps: &[CalculationStep],
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> Result<f64, EvaluationError> {
    let Some((first, rest)) = steps.split_first() else {
        return Err(EvaluationError::NonNumeric);
    };
    let mut acc = operand(lookup(&first.field_id));
    let mut last_term = acc;

    for step in rest {
        let value = operand(lookup(&step.field_id));
        match step.effective_operator() {
            Operator::Add => {
                acc += value;
                last_term = value;
            }
            Operator::Sub => {
                acc -= value;
                last_term = -value;
            }
            Operator::Mul => {
                acc *= value;
                last_term = acc;
            }
            Operator::Div => {
                if value == 0.0 {
                    return Err(EvaluationError::NonNumeric);
                }
                acc /= value;
                last_term = acc;
            }
            Operator::Percent => {
                let share = last_term * value / 100.0;
                acc += share;
                last_term = share;
            }
        }
    }

    if acc.is_finite() {
        Ok(acc)
    } else {
        Err(EvaluationError::NonNumeric)
    }
}

/// Wie `try_evaluate_calculation`, aber Fehler werden geloggt und als `None` gemeldet.
pub fn evaluate_calculation<'a>(
    steps: &[CalculationStep],
    lookup: impl Fn(&str) -> Option<&'a str>,
) -> Option<f64> {
    match try_evaluate_calculation(steps, lookup) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Berechnung fehlgeschlagen: {}", e);
            None
        }
    }
}

/// Formatiert ein Berechnungsergebnis für die Anzeige.
///
/// Ohne `precision` wird die kürzeste Darstellung gewählt (`17.5`, `3`);
/// mit `precision` wird auf die Nachkommastellen gerundet.
pub fn format_number(value: f64, precision: Option<u8>) -> String {
    match precision {
        Some(digits) => format!("{:.*}", digits as usize, value),
        None => {
            if value.fract() == 0.0 && value.abs() < 1e15 {
                format!("{}", value as i64)
            } else {
                format!("{value}")
            }
        }
    }
}
