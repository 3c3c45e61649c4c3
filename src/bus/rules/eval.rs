//! Auswertung von Regelprogrammen gegen eine nur lesende Wertsicht.

use super::{BinaryOp, Builtin, Effect, Expr, Stmt, UnaryOp, MAX_EFFECTS};
use crate::error::EvaluationError;
use crate::fields::FieldOption;
use std::cmp::Ordering;
use std::fmt;

/// Nur lesender Zugriff auf Live-Feldwerte per Alias.
pub trait ValueView {
    /// Aktueller Wert des Feldes mit diesem Alias.
    fn value_of(&self, alias: &str) -> Option<&str>;
}

impl<S: std::hash::BuildHasher> ValueView for std::collections::HashMap<String, String, S> {
    fn value_of(&self, alias: &str) -> Option<&str> {
        self.get(alias).map(String::as_str)
    }
}

impl ValueView for indexmap::IndexMap<String, String> {
    fn value_of(&self, alias: &str) -> Option<&str> {
        self.get(alias).map(String::as_str)
    }
}

/// Eingaben einer Auswertung.
pub struct RuleContext<'a> {
    /// Auslösender Wert (`value` im Programm), z.B. der neue Wert beim Watcher
    pub trigger: Option<&'a str>,
    /// Live-Werte aller Felder
    pub values: &'a dyn ValueView,
}

impl<'a> RuleContext<'a> {
    pub fn new(trigger: Option<&'a str>, values: &'a dyn ValueView) -> Self {
        Self { trigger, values }
    }
}

/// Laufzeitwert eines Ausdrucks.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleValue {
    Num(f64),
    Str(String),
    Bool(bool),
}

impl RuleValue {
    /// Wahrheitswert: Zahl ungleich 0, nicht leerer String.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Num(n) => *n != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
        }
    }

    /// Numerische Sicht; Strings werden geparst.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            Self::Str(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        }
    }

    fn require_number(&self) -> Result<f64, EvaluationError> {
        self.as_number()
            .ok_or_else(|| EvaluationError::Type(format!("Zahl erwartet, erhalten '{self}'")))
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

fn finite(n: f64) -> Result<RuleValue, EvaluationError> {
    if n.is_finite() {
        Ok(RuleValue::Num(n))
    } else {
        Err(EvaluationError::NonNumeric)
    }
}

fn push_effect(effects: &mut Vec<Effect>, effect: Effect) -> Result<(), EvaluationError> {
    if effects.len() >= MAX_EFFECTS {
        return Err(EvaluationError::TooManyEffects(MAX_EFFECTS));
    }
    effects.push(effect);
    Ok(())
}

/// Erlaubte Schemata für `open`.
const LINK_SCHEMES: &[&str] = &["http", "https", "mailto"];

fn check_link(target: &str) -> Result<(), EvaluationError> {
    let url = url::Url::parse(target)
        .map_err(|e| EvaluationError::Type(format!("ungültiger Link '{target}': {e}")))?;
    if LINK_SCHEMES.contains(&url.scheme()) {
        Ok(())
    } else {
        Err(EvaluationError::Type(format!(
            "Link-Schema '{}' nicht erlaubt",
            url.scheme()
        )))
    }
}

pub(super) fn execute(
    stmt: &Stmt,
    ctx: &RuleContext<'_>,
    effects: &mut Vec<Effect>,
) -> Result<(), EvaluationError> {
    match stmt {
        Stmt::Set { target, value } => {
            let value = evaluate(value, ctx)?.to_string();
            push_effect(
                effects,
                Effect::SetValue {
                    target: target.clone(),
                    value,
                },
            )
        }
        Stmt::Options { target, items } => {
            let options = items
                .iter()
                .map(|(label, value)| {
                    Ok(FieldOption::new(
                        evaluate(label, ctx)?.to_string(),
                        evaluate(value, ctx)?.to_string(),
                    ))
                })
                .collect::<Result<Vec<_>, EvaluationError>>()?;
            push_effect(
                effects,
                Effect::SetOptions {
                    target: target.clone(),
                    options,
                },
            )
        }
        Stmt::Open(expr) => {
            let link = evaluate(expr, ctx)?.to_string();
            check_link(&link)?;
            push_effect(effects, Effect::OpenLink(link))
        }
        Stmt::Submit => push_effect(effects, Effect::Submit),
        Stmt::Log(expr) => {
            let message = evaluate(expr, ctx)?.to_string();
            push_effect(effects, Effect::Log(message))
        }
        Stmt::If { condition, then } => {
            if evaluate(condition, ctx)?.truthy() {
                execute(then, ctx, effects)
            } else {
                Ok(())
            }
        }
    }
}

pub(super) fn evaluate(expr: &Expr, ctx: &RuleContext<'_>) -> Result<RuleValue, EvaluationError> {
    match expr {
        Expr::Number(n) => Ok(RuleValue::Num(*n)),
        Expr::Str(s) => Ok(RuleValue::Str(s.clone())),
        Expr::Bool(b) => Ok(RuleValue::Bool(*b)),
        Expr::Trigger => Ok(RuleValue::Str(ctx.trigger.unwrap_or_default().to_string())),
        Expr::Field(alias) => Ok(RuleValue::Str(
            ctx.values.value_of(alias).unwrap_or_default().to_string(),
        )),
        Expr::Call { function, args } => {
            let args = args
                .iter()
                .map(|a| evaluate(a, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            call(*function, &args)
        }
        Expr::Unary { op, operand } => {
            let value = evaluate(operand, ctx)?;
            match op {
                UnaryOp::Neg => finite(-value.require_number()?),
                UnaryOp::Not => Ok(RuleValue::Bool(!value.truthy())),
            }
        }
        Expr::Binary { op, lhs, rhs } => match op {
            BinaryOp::And => {
                let left = evaluate(lhs, ctx)?.truthy();
                Ok(RuleValue::Bool(left && evaluate(rhs, ctx)?.truthy()))
            }
            BinaryOp::Or => {
                let left = evaluate(lhs, ctx)?.truthy();
                Ok(RuleValue::Bool(left || evaluate(rhs, ctx)?.truthy()))
            }
            _ => {
                let left = evaluate(lhs, ctx)?;
                let right = evaluate(rhs, ctx)?;
                binary(*op, &left, &right)
            }
        },
    }
}

fn compare(left: &RuleValue, right: &RuleValue) -> Ordering {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => left.to_string().cmp(&right.to_string()),
    }
}

fn binary(op: BinaryOp, left: &RuleValue, right: &RuleValue) -> Result<RuleValue, EvaluationError> {
    match op {
        // Feldwerte sind Strings: numerisch addiert wird, sobald beide Seiten Zahlen sind.
        BinaryOp::Add => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => finite(a + b),
            _ => Ok(RuleValue::Str(format!("{left}{right}"))),
        },
        BinaryOp::Sub => finite(left.require_number()? - right.require_number()?),
        BinaryOp::Mul => finite(left.require_number()? * right.require_number()?),
        BinaryOp::Div | BinaryOp::Rem => {
            let divisor = right.require_number()?;
            if divisor == 0.0 {
                return Err(EvaluationError::NonNumeric);
            }
            let dividend = left.require_number()?;
            if op == BinaryOp::Div {
                finite(dividend / divisor)
            } else {
                finite(dividend % divisor)
            }
        }
        BinaryOp::Eq => Ok(RuleValue::Bool(compare(left, right) == Ordering::Equal)),
        BinaryOp::NotEq => Ok(RuleValue::Bool(compare(left, right) != Ordering::Equal)),
        BinaryOp::Less => Ok(RuleValue::Bool(compare(left, right) == Ordering::Less)),
        BinaryOp::LessEq => Ok(RuleValue::Bool(compare(left, right) != Ordering::Greater)),
        BinaryOp::Greater => Ok(RuleValue::Bool(compare(left, right) == Ordering::Greater)),
        BinaryOp::GreaterEq => Ok(RuleValue::Bool(compare(left, right) != Ordering::Less)),
        // Kurzschluss-Operatoren werden in `evaluate` behandelt
        BinaryOp::And | BinaryOp::Or => Ok(RuleValue::Bool(false)),
    }
}

fn call(function: Builtin, args: &[RuleValue]) -> Result<RuleValue, EvaluationError> {
    let first = || args.first().map(ToString::to_string).unwrap_or_default();
    Ok(match function {
        Builtin::Len => RuleValue::Num(first().chars().count() as f64),
        Builtin::Num => RuleValue::Num(args.first().and_then(RuleValue::as_number).unwrap_or(0.0)),
        Builtin::Upper => RuleValue::Str(first().to_uppercase()),
        Builtin::Lower => RuleValue::Str(first().to_lowercase()),
        Builtin::Trim => RuleValue::Str(first().trim().to_string()),
        Builtin::Concat => RuleValue::Str(args.iter().map(ToString::to_string).collect()),
    })
}
