//! Tokenizer and recursive-descent parser for substituted expressions.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') (unary | primary) | power
//! power   := primary ('**' unary)?
//! primary := number | '(' sum ')'
//! ```
//!
//! A sign directly before `**` is rejected, as is `++`/`--` written without a
//! space between the signs.

use super::Expr;

/// Why an expression could not be parsed.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FormulaError {
    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),

    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),

    #[error("unexpected token at position {0}")]
    UnexpectedToken(usize),

    #[error("expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("a signed operand cannot be raised to a power")]
    SignedPowerBase,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    Open,
    Close,
}

fn tokenize(input: &str) -> Result<Vec<Token>, FormulaError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < chars.len() {
        let ch = chars[index];
        let next = chars.get(index + 1).copied();
        match ch {
            c if c.is_whitespace() => {
                index += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = index;
                while index < chars.len() && (chars[index].is_ascii_digit() || chars[index] == '.')
                {
                    index += 1;
                }
                let literal: String = chars[start..index].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| FormulaError::InvalidNumber(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            '+' | '-' if next == Some(ch) => return Err(FormulaError::UnexpectedChar(ch)),
            '+' => {
                tokens.push(Token::Plus);
                index += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                index += 1;
            }
            '*' if next == Some('*') => {
                tokens.push(Token::Power);
                index += 2;
            }
            '*' => {
                tokens.push(Token::Star);
                index += 1;
            }
            '/' => {
                tokens.push(Token::Slash);
                index += 1;
            }
            '(' => {
                tokens.push(Token::Open);
                index += 1;
            }
            ')' => {
                tokens.push(Token::Close);
                index += 1;
            }
            other => return Err(FormulaError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        self.position += 1;
        token
    }

    fn sum(&mut self) -> Result<Expr, FormulaError> {
        let mut left = self.product()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    left = Expr::Add(Box::new(left), Box::new(self.product()?));
                }
                Some(Token::Minus) => {
                    self.advance();
                    left = Expr::Sub(Box::new(left), Box::new(self.product()?));
                }
                _ => return Ok(left),
            }
        }
    }

    fn product(&mut self) -> Result<Expr, FormulaError> {
        let mut left = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    left = Expr::Mul(Box::new(left), Box::new(self.unary()?));
                }
                Some(Token::Slash) => {
                    self.advance();
                    left = Expr::Div(Box::new(left), Box::new(self.unary()?));
                }
                _ => return Ok(left),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        let negate = match self.peek() {
            Some(Token::Plus) => false,
            Some(Token::Minus) => true,
            _ => return self.power(),
        };
        self.advance();

        let operand = match self.peek() {
            Some(Token::Plus | Token::Minus) => self.unary()?,
            _ => self.primary()?,
        };
        if self.peek() == Some(Token::Power) {
            return Err(FormulaError::SignedPowerBase);
        }
        Ok(if negate {
            Expr::Neg(Box::new(operand))
        } else {
            operand
        })
    }

    fn power(&mut self) -> Result<Expr, FormulaError> {
        let base = self.primary()?;
        if self.peek() != Some(Token::Power) {
            return Ok(base);
        }
        self.advance();
        let exponent = self.unary()?;
        Ok(Expr::Pow(Box::new(base), Box::new(exponent)))
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        let position = self.position;
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Open) => {
                let inner = self.sum()?;
                match self.advance() {
                    Some(Token::Close) => Ok(inner),
                    Some(_) => Err(FormulaError::UnexpectedToken(self.position - 1)),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }
            Some(_) => Err(FormulaError::UnexpectedToken(position)),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

/// Parses a variable-free arithmetic expression.
pub fn parse(input: &str) -> Result<Expr, FormulaError> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        position: 0,
    };
    let expr = parser.sum()?;
    if parser.position < parser.tokens.len() {
        return Err(FormulaError::UnexpectedToken(parser.position));
    }
    Ok(expr)
}
