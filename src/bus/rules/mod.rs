//! Sandboxed Regelsprache für Script-Buttons, Data-Watcher und Data-Filler.
//!
//! Ein Programm besteht aus Anweisungen, getrennt durch Zeilenumbruch oder `;`:
//!
//! ```text
//! # Kommentar
//! set total = num($net) * 1.19
//! options $city = ["Berlin" => "BER", "Hamburg" => "HAM"]
//! if value == "" then log "leer"
//! open "https://example.com"
//! submit
//! ```
//!
//! Programme haben keinen Zugriff auf Umgebung, Dateisystem oder Netzwerk.
//! Die Auswertung liefert reine Daten (`Effect`), die der Aufrufer zentral
//! anwendet. Feldwerte werden über eine nur lesende Sicht (`ValueView`) gelesen.

mod eval;
mod lexer;
mod parser;


pub use eval::{RuleContext, RuleValue, ValueView};

use crate::error::EvaluationError;
use crate::fields::FieldOption;

/// Obergrenze für Effekte pro Auswertung.
pub const MAX_EFFECTS: usize = 256;

/// Ein geparstes Regelprogramm.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    statements: Vec<Stmt>,
}

/// Ergebnis einer Regel-Auswertung, vom Aufrufer anzuwenden.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Wert eines Feldes (per Alias) setzen
    SetValue { target: String, value: String },
    /// Optionsliste eines Feldes ersetzen
    SetOptions {
        target: String,
        options: Vec<FieldOption>,
    },
    /// Link öffnen (nur http, https, mailto)
    OpenLink(String),
    /// Formular abschicken
    Submit,
    /// Meldung ins Log schreiben
    Log(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Stmt {
    Set { target: String, value: Expr },
    Options { target: String, items: Vec<(Expr, Expr)> },
    Open(Expr),
    Submit,
    Log(Expr),
    If { condition: Expr, then: Box<Stmt> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Len,
    Num,
    Upper,
    Lower,
    Trim,
    Concat,
}

impl Builtin {
    /// Sucht eine eingebaute Funktion; `None` für unbekannte Namen.
    pub(crate) fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "len" => Self::Len,
            "num" => Self::Num,
            "upper" => Self::Upper,
            "lower" => Self::Lower,
            "trim" => Self::Trim,
            "concat" => Self::Concat,
            _ => return None,
        })
    }

    /// Feste Anzahl Argumente, `None` für variadisch.
    pub(crate) fn arity(self) -> Option<usize> {
        match self {
            Self::Concat => None,
            _ => Some(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Number(f64),
    Str(String),
    Bool(bool),
    /// Auslösender Wert (`value`)
    Trigger,
    /// Live-Wert eines Feldes (`$alias`)
    Field(String),
    Call { function: Builtin, args: Vec<Expr> },
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// Parst ein Regelprogramm. Ein leeres Programm ist gültig.
pub fn parse_program(source: &str) -> Result<Program, EvaluationError> {
    let tokens = lexer::tokenize(source)?;
    let statements = parser::Parser::new(tokens).parse_statements()?;
    Ok(Program { statements })
}

impl Program {
    /// Anzahl Anweisungen (ohne Leerzeilen und Kommentare).
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Ob das Programm keine Anweisungen enthält.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Wertet das Programm aus und sammelt die Effekte in Reihenfolge.
    ///
    /// Alle Anweisungen lesen dieselbe Sicht; ein `set` ist für spätere
    /// Anweisungen desselben Durchlaufs noch nicht sichtbar.
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> Result<Vec<Effect>, EvaluationError> {
        let mut effects = Vec::new();
        for stmt in &self.statements {
            eval::execute(stmt, ctx, &mut effects)?;
        }
        Ok(effects)
    }
}

/// Parst und wertet in einem Schritt aus.
pub fn run_rule(source: &str, ctx: &RuleContext<'_>) -> Result<Vec<Effect>, EvaluationError> {
    parse_program(source)?.evaluate(ctx)
}
