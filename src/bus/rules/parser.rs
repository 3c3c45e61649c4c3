//! Rekursiver Abstieg über die Token-Liste.

use super::lexer::{Token, TokenKind};
use super::{BinaryOp, Builtin, Expr, Stmt, UnaryOp};
use crate::error::EvaluationError;

/// Maximale Schachtelungstiefe von Ausdrücken und `if`-Ketten.
const MAX_DEPTH: usize = 64;

fn error_at(line: usize, message: impl Into<String>) -> EvaluationError {
    EvaluationError::Parse {
        line,
        message: message.into(),
    }
}

pub(super) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub(super) fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> &TokenKind {
        self.tokens
            .get(self.pos)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    fn line(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        kind
    }

    fn error(&self, message: impl Into<String>) -> EvaluationError {
        error_at(self.line(), message)
    }

    fn expect(&mut self, expected: TokenKind, what: &str) -> Result<(), EvaluationError> {
        if *self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("{what} erwartet")))
        }
    }

    fn skip_separators(&mut self) {
        while *self.peek() == TokenKind::Separator {
            self.advance();
        }
    }

    pub(super) fn parse_statements(&mut self) -> Result<Vec<Stmt>, EvaluationError> {
        let mut statements = Vec::new();
        self.skip_separators();
        while *self.peek() != TokenKind::Eof {
            statements.push(self.statement()?);
            match self.peek() {
                TokenKind::Separator => self.skip_separators(),
                TokenKind::Eof => {}
                _ => return Err(self.error("Zeilenende erwartet")),
            }
        }
        Ok(statements)
    }

    fn statement(&mut self) -> Result<Stmt, EvaluationError> {
        let line = self.line();
        let keyword = match self.advance() {
            TokenKind::Ident(name) => name,
            _ => return Err(error_at(line, "Anweisung erwartet")),
        };
        match keyword.as_str() {
            "set" => {
                let target = self.target()?;
                self.expect(TokenKind::Assign, "'='")?;
                let value = self.expression()?;
                Ok(Stmt::Set { target, value })
            }
            "options" => {
                let target = self.target()?;
                self.expect(TokenKind::Assign, "'='")?;
                self.expect(TokenKind::LBracket, "'['")?;
                let mut items = Vec::new();
                if *self.peek() != TokenKind::RBracket {
                    loop {
                        let label = self.expression()?;
                        self.expect(TokenKind::Arrow, "'=>'")?;
                        let value = self.expression()?;
                        items.push((label, value));
                        if *self.peek() == TokenKind::Comma {
                            self.advance();
                        } else {
                            break;
                        }
                    }
                }
                self.expect(TokenKind::RBracket, "']'")?;
                Ok(Stmt::Options { target, items })
            }
            "open" => Ok(Stmt::Open(self.expression()?)),
            "submit" => Ok(Stmt::Submit),
            "log" => Ok(Stmt::Log(self.expression()?)),
            "if" => {
                let condition = self.expression()?;
                match self.advance() {
                    TokenKind::Ident(word) if word == "then" => {}
                    _ => return Err(error_at(line, "'then' erwartet")),
                }
                self.depth += 1;
                if self.depth > MAX_DEPTH {
                    return Err(error_at(line, "'if' zu tief verschachtelt"));
                }
                let then = self.statement();
                self.depth -= 1;
                Ok(Stmt::If {
                    condition,
                    then: Box::new(then?),
                })
            }
            other => Err(error_at(line, format!("unbekannte Anweisung '{other}'"))),
        }
    }

    fn target(&mut self) -> Result<String, EvaluationError> {
        let line = self.line();
        match self.advance() {
            TokenKind::Ident(name) | TokenKind::Alias(name) => Ok(name),
            _ => Err(error_at(line, "Zielfeld erwartet")),
        }
    }

    fn expression(&mut self) -> Result<Expr, EvaluationError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("Ausdruck zu tief verschachtelt"));
        }
        let result = self.binary(0);
        self.depth -= 1;
        result
    }

    /// Bindungsstärke je Ebene, schwächste zuerst.
    fn operator_at(&self, level: usize) -> Option<BinaryOp> {
        let op = match (level, self.peek()) {
            (0, TokenKind::OrOr) => BinaryOp::Or,
            (1, TokenKind::AndAnd) => BinaryOp::And,
            (2, TokenKind::Eq) => BinaryOp::Eq,
            (2, TokenKind::NotEq) => BinaryOp::NotEq,
            (3, TokenKind::Less) => BinaryOp::Less,
            (3, TokenKind::LessEq) => BinaryOp::LessEq,
            (3, TokenKind::Greater) => BinaryOp::Greater,
            (3, TokenKind::GreaterEq) => BinaryOp::GreaterEq,
            (4, TokenKind::Plus) => BinaryOp::Add,
            (4, TokenKind::Minus) => BinaryOp::Sub,
            (5, TokenKind::Star) => BinaryOp::Mul,
            (5, TokenKind::Slash) => BinaryOp::Div,
            (5, TokenKind::Percent) => BinaryOp::Rem,
            _ => return None,
        };
        Some(op)
    }

    fn binary(&mut self, level: usize) -> Result<Expr, EvaluationError> {
        if level > 5 {
            return self.unary();
        }
        let mut lhs = self.binary(level + 1)?;
        while let Some(op) = self.operator_at(level) {
            self.advance();
            let rhs = self.binary(level + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, EvaluationError> {
        let op = match self.peek() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.primary(),
        };
        self.advance();
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("Ausdruck zu tief verschachtelt"));
        }
        let operand = self.unary();
        self.depth -= 1;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand?),
        })
    }

    fn primary(&mut self) -> Result<Expr, EvaluationError> {
        let line = self.line();
        match self.advance() {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::Str(s) => Ok(Expr::Str(s)),
            TokenKind::Alias(name) => Ok(Expr::Field(name)),
            TokenKind::LParen => {
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Ident(name) => match name.as_str() {
                "true" => Ok(Expr::Bool(true)),
                "false" => Ok(Expr::Bool(false)),
                "value" => Ok(Expr::Trigger),
                _ if *self.peek() == TokenKind::LParen => self.call(name),
                _ => Err(error_at(
                    line,
                    format!("unbekannter Name '{name}' (Feldwerte werden mit '$' gelesen)"),
                )),
            },
            TokenKind::Eof | TokenKind::Separator => Err(error_at(line, "Ausdruck erwartet")),
            other => Err(error_at(line, format!("unerwartetes Token {other:?}"))),
        }
    }

    fn call(&mut self, name: String) -> Result<Expr, EvaluationError> {
        let function = Builtin::lookup(&name).ok_or(EvaluationError::UnknownFunction(name.clone()))?;
        self.expect(TokenKind::LParen, "'('")?;
        let mut args = Vec::new();
        if *self.peek() != TokenKind::RParen {
            loop {
                args.push(self.expression()?);
                if *self.peek() == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        if let Some(expected) = function.arity() {
            if args.len() != expected {
                return Err(EvaluationError::Arity {
                    name,
                    expected,
                    found: args.len(),
                });
            }
        }
        Ok(Expr::Call { function, args })
    }
}
