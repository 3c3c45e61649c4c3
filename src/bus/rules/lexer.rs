//! Tokenizer der Regelsprache.

use crate::error::EvaluationError;

/// Ein Token mit Zeilennummer (1-basiert).
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum TokenKind {
    Ident(String),
    Alias(String),
    Number(f64),
    Str(String),
    Assign,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    AndAnd,
    OrOr,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Arrow,
    /// Zeilenende oder `;`
    Separator,
    Eof,
}

fn is_alias_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

fn parse_error(line: usize, message: impl Into<String>) -> EvaluationError {
    EvaluationError::Parse {
        line,
        message: message.into(),
    }
}

/// Zerlegt den Quelltext in Tokens. `#` leitet einen Zeilenkommentar ein.
pub(super) fn tokenize(source: &str) -> Result<Vec<Token>, EvaluationError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;

    while let Some(&c) = chars.peek() {
        let kind = match c {
            '\n' => {
                chars.next();
                let token = Token {
                    kind: TokenKind::Separator,
                    line,
                };
                line += 1;
                tokens.push(token);
                continue;
            }
            ';' => {
                chars.next();
                TokenKind::Separator
            }
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '#' => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
                continue;
            }
            '"' | '\'' => {
                let quote = c;
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some(ch) if ch == quote => break,
                        Some('\\') => match chars.next() {
                            Some('n') => text.push('\n'),
                            Some('t') => text.push('\t'),
                            Some(other) => text.push(other),
                            None => return Err(parse_error(line, "unvollständige Escape-Sequenz")),
                        },
                        Some('\n') | None => {
                            return Err(parse_error(line, "String nicht abgeschlossen"))
                        }
                        Some(ch) => text.push(ch),
                    }
                }
                TokenKind::Str(text)
            }
            '$' => {
                chars.next();
                let mut name = String::new();
                while let Some(&ch) = chars.peek() {
                    if !is_alias_char(ch) {
                        break;
                    }
                    name.push(ch);
                    chars.next();
                }
                if name.is_empty() {
                    return Err(parse_error(line, "Feldname nach '$' erwartet"));
                }
                TokenKind::Alias(name)
            }
            c if c.is_ascii_digit() => {
                let mut text = String::new();
                while let Some(&ch) = chars.peek() {
                    if !(ch.is_ascii_digit() || ch == '.') {
                        break;
                    }
                    text.push(ch);
                    chars.next();
                }
                let number = text
                    .parse::<f64>()
                    .map_err(|_| parse_error(line, format!("ungültige Zahl '{text}'")))?;
                TokenKind::Number(number)
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&ch) = chars.peek() {
                    if !(ch.is_alphanumeric() || ch == '_') {
                        break;
                    }
                    name.push(ch);
                    chars.next();
                }
                TokenKind::Ident(name)
            }
            _ => {
                chars.next();
                let next = chars.peek().copied();
                let mut two = |kind: TokenKind| {
                    chars.next();
                    kind
                };
                match (c, next) {
                    ('=', Some('=')) => two(TokenKind::Eq),
                    ('=', Some('>')) => two(TokenKind::Arrow),
                    ('!', Some('=')) => two(TokenKind::NotEq),
                    ('<', Some('=')) => two(TokenKind::LessEq),
                    ('>', Some('=')) => two(TokenKind::GreaterEq),
                    ('&', Some('&')) => two(TokenKind::AndAnd),
                    ('|', Some('|')) => two(TokenKind::OrOr),
                    ('=', _) => TokenKind::Assign,
                    ('!', _) => TokenKind::Bang,
                    ('<', _) => TokenKind::Less,
                    ('>', _) => TokenKind::Greater,
                    ('+', _) => TokenKind::Plus,
                    ('-', _) => TokenKind::Minus,
                    ('*', _) => TokenKind::Star,
                    ('/', _) => TokenKind::Slash,
                    ('%', _) => TokenKind::Percent,
                    ('(', _) => TokenKind::LParen,
                    (')', _) => TokenKind::RParen,
                    ('[', _) => TokenKind::LBracket,
                    (']', _) => TokenKind::RBracket,
                    (',', _) => TokenKind::Comma,
                    (other, _) => {
                        return Err(parse_error(line, format!("unerwartetes Zeichen '{other}'")))
                    }
                }
            }
        };
        tokens.push(Token { kind, line });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        line,
    });
    Ok(tokens)
}
