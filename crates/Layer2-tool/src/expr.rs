//! Arithmetic expression evaluator
//!
//! Recursive descent over:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '//') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('**' unary)?
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! `**` is right-associative and binds tighter than a unary minus on its
//! left, so `-2**2` is `-4`. `//` is floor division. All arithmetic is `f64`.

use std::fmt;
use thiserror::Error;

/// Nesting limit for parentheses and chained unary operators
const MAX_DEPTH: usize = 200;

/// Why an expression could not be evaluated
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid syntax: {message} (at position {position})")]
    Syntax { message: String, position: usize },

    #[error("result is not a real number")]
    NotReal,

    #[error("result is not a finite number")]
    NonFinite,
}

fn syntax(message: impl Into<String>, position: usize) -> ExprError {
    ExprError::Syntax {
        message: message.into(),
        position,
    }
}

// ============================================================================
// Lexer
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleStar,
    DoubleSlash,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::DoubleStar => f.write_str("**"),
            Token::DoubleSlash => f.write_str("//"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            '0'..='9' | '.' => {
                let mut end = pos;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[pos..end];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| syntax(format!("malformed number '{}'", literal), pos))?;
                tokens.push((Token::Number(value), pos));
                continue;
            }
            '*' | '/' => {
                chars.next();
                let doubled = matches!(chars.peek(), Some(&(_, next)) if next == c);
                if doubled {
                    chars.next();
                }
                let token = match (c, doubled) {
                    ('*', false) => Token::Star,
                    ('*', true) => Token::DoubleStar,
                    ('/', false) => Token::Slash,
                    _ => Token::DoubleSlash,
                };
                tokens.push((token, pos));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(syntax(format!("unexpected character '{}'", other), pos)),
        };

        chars.next();
        tokens.push((token, pos));
    }

    Ok(tokens)
}

// ============================================================================
// Parser / evaluator
// ============================================================================

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    end: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let next = self.tokens.get(self.pos).copied();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map(|(_, p)| *p).unwrap_or(self.end)
    }

    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(syntax("expression nested too deeply", self.position()));
        }
        Ok(())
    }

    fn parse_expr(&mut self) -> Result<f64, ExprError> {
        let mut value = self.parse_term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.parse_term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.parse_term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn parse_term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.parse_unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let rhs = self.parse_unary()?;
                    if rhs == 0.0 {
                        return Err(ExprError::DivisionByZero);
                    }
                    value /= rhs;
                }
                Some(Token::DoubleSlash) => {
                    self.pos += 1;
                    let rhs = self.parse_unary()?;
                    if rhs == 0.0 {
                        return Err(ExprError::DivisionByZero);
                    }
                    value = (value / rhs).floor();
                }
                _ => return Ok(value),
            }
        }
    }

    fn parse_unary(&mut self) -> Result<f64, ExprError> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                self.enter()?;
                let value = self.parse_unary()?;
                self.depth -= 1;
                Ok(value)
            }
            Some(Token::Minus) => {
                self.pos += 1;
                self.enter()?;
                let value = self.parse_unary()?;
                self.depth -= 1;
                Ok(-value)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> Result<f64, ExprError> {
        let base = self.parse_primary()?;
        if self.peek() == Some(Token::DoubleStar) {
            self.pos += 1;
            self.enter()?;
            let exponent = self.parse_unary()?;
            self.depth -= 1;
            return power(base, exponent);
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<f64, ExprError> {
        match self.advance() {
            Some((Token::Number(n), _)) => Ok(n),
            Some((Token::LParen, _)) => {
                self.enter()?;
                let value = self.parse_expr()?;
                match self.advance() {
                    Some((Token::RParen, _)) => {
                        self.depth -= 1;
                        Ok(value)
                    }
                    Some((token, pos)) => Err(syntax(format!("expected ')', found '{}'", token), pos)),
                    None => Err(syntax("expected ')'", self.end)),
                }
            }
            Some((token, pos)) => Err(syntax(format!("unexpected token '{}'", token), pos)),
            None => Err(syntax("unexpected end of expression", self.end)),
        }
    }
}

fn power(base: f64, exponent: f64) -> Result<f64, ExprError> {
    if base == 0.0 && exponent < 0.0 {
        return Err(ExprError::DivisionByZero);
    }
    if base < 0.0 && exponent.fract() != 0.0 {
        return Err(ExprError::NotReal);
    }
    Ok(base.powf(exponent))
}

/// Evaluate an arithmetic expression
pub fn evaluate(input: &str) -> Result<f64, ExprError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(syntax("empty expression", 0));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        end: input.len(),
        depth: 0,
    };
    let value = parser.parse_expr()?;

    if let Some((token, pos)) = parser.advance() {
        return Err(syntax(format!("unexpected token '{}'", token), pos));
    }
    if !value.is_finite() {
        return Err(ExprError::NonFinite);
    }
    Ok(value)
}

/// Render a result: integral values without a fractional part, everything
/// else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    let whole = value.trunc();
    if (value - whole).abs() < 1e-12 {
        if whole == 0.0 {
            "0".to_string()
        } else {
            format!("{:.0}", whole)
        }
    } else {
        format!("{}", value)
    }
}
