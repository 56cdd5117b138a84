// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use crate::symbolic::symbolic_engine::{Expr, Statement};
use std::f64::consts::{E, PI};
use thiserror::Error;
/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use RustedExprCalc::symbolic::symbolic_engine::Expr;
/// let statement = Expr::parse_statement("2x + y = 4").unwrap();
/// assert!(statement.is_equation());
/// assert_eq!(statement.variables(), vec!["x".to_string(), "y".to_string()]);
/// ```
//                  precedence ladder
//     statement := expr ( '=' expr )?
//     expr      := term  ( ('+' | '-') term )*
//     term      := unary ( ('*' | '/') unary | <juxtaposition> power )*
//     unary     := ('+' | '-') unary | power
//     power     := primary ( '^' unary )?
//     primary   := number | constant | variable | function '(' expr ')' | '(' expr ')'
//
// Juxtaposition ("2x", "a b", "3(x+1)") is multiplication with the precedence of '*'.

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("malformed number '{text}' at position {pos}")]
    InvalidNumber { text: String, pos: usize },
    #[error("unexpected '{found}' at position {pos}")]
    UnexpectedToken { found: String, pos: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unmatched bracket at position {pos}")]
    UnmatchedBracket { pos: usize },
    #[error("function '{name}' needs a bracketed argument")]
    MissingArgument { name: String },
    #[error("more than one '=' (second one at position {pos})")]
    MultipleEquals { pos: usize },
    #[error("one side of the equation is empty")]
    EmptySide,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Equals,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Caret => "^".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Equals => "=".to_string(),
        }
    }

    /// tokens that may open a factor glued to the previous one
    fn starts_factor(&self) -> bool {
        matches!(self, Token::Number(_) | Token::Ident(_) | Token::LParen)
    }
}

/// names recognised as function calls; both notations of the trigonometric family
const FUNCTIONS: [&str; 19] = [
    "exp", "ln", "log", "sqrt", "sin", "cos", "tg", "tan", "ctg", "cot", "arcsin", "asin",
    "arccos", "acos", "arctg", "atan", "arctan", "arcctg", "acot",
];

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let token = match c {
            _ if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '=' => Token::Equals,
            _ if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ParseError::InvalidNumber {
                        text: text.clone(),
                        pos: start,
                    })?;
                tokens.push((Token::Number(value), start));
                continue;
            }
            _ if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                tokens.push((Token::Ident(name), start));
                continue;
            }
            _ => return Err(ParseError::UnexpectedChar { ch: c, pos: i }),
        };
        tokens.push((token, i));
        i += 1;
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    index: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|(token, _)| token)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let item = self.tokens.get(self.index).cloned();
        if item.is_some() {
            self.index += 1;
        }
        item
    }

    fn unexpected(&self) -> ParseError {
        match self.tokens.get(self.index) {
            Some((token, pos)) => ParseError::UnexpectedToken {
                found: token.describe(),
                pos: *pos,
            },
            None => ParseError::UnexpectedEnd,
        }
    }

    fn statement(&mut self) -> Result<Statement, ParseError> {
        if self.peek() == Some(&Token::Equals) {
            return Err(ParseError::EmptySide);
        }
        let lhs = self.expr()?;
        match self.next() {
            None => Ok(Statement::expression(lhs)),
            Some((Token::Equals, _)) => {
                if self.peek().is_none() {
                    return Err(ParseError::EmptySide);
                }
                let rhs = self.expr()?;
                match self.next() {
                    None => Ok(Statement::equation(lhs, rhs)),
                    Some((Token::Equals, pos)) => Err(ParseError::MultipleEquals { pos }),
                    Some((Token::RParen, pos)) => Err(ParseError::UnmatchedBracket { pos }),
                    Some((token, pos)) => Err(ParseError::UnexpectedToken {
                        found: token.describe(),
                        pos,
                    }),
                }
            }
            Some((Token::RParen, pos)) => Err(ParseError::UnmatchedBracket { pos }),
            Some((token, pos)) => Err(ParseError::UnexpectedToken {
                found: token.describe(),
                pos,
            }),
        }
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.index += 1;
                    let rhs = self.term()?;
                    lhs = Expr::Add(lhs.boxed(), rhs.boxed());
                }
                Some(Token::Minus) => {
                    self.index += 1;
                    let rhs = self.term()?;
                    lhs = Expr::Sub(lhs.boxed(), rhs.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.index += 1;
                    let rhs = self.unary()?;
                    lhs = Expr::Mul(lhs.boxed(), rhs.boxed());
                }
                Some(Token::Slash) => {
                    self.index += 1;
                    let rhs = self.unary()?;
                    lhs = Expr::Div(lhs.boxed(), rhs.boxed());
                }
                Some(token) if token.starts_factor() => {
                    let rhs = self.power()?;
                    lhs = Expr::Mul(lhs.boxed(), rhs.boxed());
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.index += 1;
                match self.unary()? {
                    Expr::Const(value) => Ok(Expr::Const(-value)),
                    inner => Ok(-inner),
                }
            }
            Some(Token::Plus) => {
                self.index += 1;
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, ParseError> {
        let base = self.primary()?;
        if self.peek() == Some(&Token::Caret) {
            self.index += 1;
            let exponent = self.unary()?;
            return Ok(Expr::Pow(base.boxed(), exponent.boxed()));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let Some((token, pos)) = self.next() else {
            return Err(ParseError::UnexpectedEnd);
        };
        match token {
            Token::Number(value) => Ok(Expr::Const(value)),
            Token::LParen => {
                let inner = self.expr()?;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(inner),
                    Some(_) => {
                        self.index -= 1;
                        Err(self.unexpected())
                    }
                    None => Err(ParseError::UnmatchedBracket { pos }),
                }
            }
            Token::Ident(name) if FUNCTIONS.contains(&name.as_str()) => {
                if self.peek() != Some(&Token::LParen) {
                    return Err(ParseError::MissingArgument { name });
                }
                let open = self.tokens[self.index].1;
                self.index += 1;
                let arg = self.expr()?;
                match self.next() {
                    Some((Token::RParen, _)) => Ok(apply_function(&name, arg)),
                    Some(_) => {
                        self.index -= 1;
                        Err(self.unexpected())
                    }
                    None => Err(ParseError::UnmatchedBracket { pos: open }),
                }
            }
            Token::Ident(name) => Ok(match name.as_str() {
                "pi" => Expr::Const(PI),
                "e" => Expr::Const(E),
                _ => Expr::Var(name),
            }),
            Token::RParen => Err(ParseError::UnmatchedBracket { pos }),
            other => Err(ParseError::UnexpectedToken {
                found: other.describe(),
                pos,
            }),
        }
    }
}

fn apply_function(name: &str, arg: Expr) -> Expr {
    let arg = arg.boxed();
    match name {
        "exp" => Expr::Exp(arg),
        "ln" | "log" => Expr::Ln(arg),
        "sqrt" => Expr::Pow(arg, Box::new(Expr::Const(0.5))),
        "sin" => Expr::sin(arg),
        "cos" => Expr::cos(arg),
        "tg" | "tan" => Expr::tg(arg),
        "ctg" | "cot" => Expr::ctg(arg),
        "arcsin" | "asin" => Expr::arcsin(arg),
        "arccos" | "acos" => Expr::arccos(arg),
        "arctg" | "atan" | "arctan" => Expr::arctg(arg),
        _ => Expr::arcctg(arg),
    }
}

/// Parses one calculator line: an expression or an equation with a single '='.
pub fn parse_statement_func(input: &str) -> Result<Statement, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parser = Parser { tokens, index: 0 };
    parser.statement()
}

/// Parses an expression; an '=' is rejected.
pub fn parse_expression_func(input: &str) -> Result<Expr, ParseError> {
    let statement = parse_statement_func(input)?;
    match statement.rhs {
        None => Ok(statement.lhs),
        Some(_) => {
            let pos = input.find('=').unwrap_or(0);
            Err(ParseError::UnexpectedToken {
                found: "=".to_string(),
                pos,
            })
        }
    }
}
