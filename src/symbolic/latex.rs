// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! # LaTeX typesetting
//!
//! Renders parsed expressions and equations as LaTeX markup for the preview column of
//! the calculator. Only the parenthesis the reader needs are emitted: operator
//! precedence decides, not the shape of the tree.
//!
//! - `a / b` → `\frac{a}{b}`
//! - `a * b` → `a \cdot b`
//! - `x ^ 0.5` → `\sqrt{x}`
//! - `pi` → `\pi`
//!
//! Text that does not parse is replaced by [`INVALID_EXPRESSION`].

use crate::symbolic::symbolic_engine::{Expr, Statement};
use std::f64::consts::{E, PI};

/// Markup shown instead of an expression that failed to parse.
pub const INVALID_EXPRESSION: &str = "Invalid Expression";

const PREC_ADD: u8 = 1;
const PREC_MUL: u8 = 2;
const PREC_POW: u8 = 3;
const PREC_ATOM: u8 = 4;

/// Typesets one line of user input. Blank input gives an empty string.
pub fn typeset(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    match Expr::parse_statement(text) {
        Ok(statement) => statement_to_latex(&statement),
        Err(err) => {
            log::debug!("typesetting '{}' failed: {}", text, err);
            INVALID_EXPRESSION.to_string()
        }
    }
}

pub fn statement_to_latex(statement: &Statement) -> String {
    match &statement.rhs {
        Some(rhs) => format!("{} = {}", to_latex(&statement.lhs), to_latex(rhs)),
        None => to_latex(&statement.lhs),
    }
}

pub fn to_latex(expr: &Expr) -> String {
    clean_latex_negatives(&render(expr))
}

/// "+ -" becomes "- " and "- -" becomes "+ "
fn clean_latex_negatives(latex: &str) -> String {
    latex.replace("+ -", "- ").replace("- -", "+ ")
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Add(_, _) | Expr::Sub(_, _) => PREC_ADD,
        Expr::Mul(_, _) | Expr::Div(_, _) => PREC_MUL,
        Expr::Const(c) if *c < 0.0 => PREC_MUL,
        Expr::Pow(_, exp) if **exp == Expr::Const(0.5) => PREC_ATOM,
        Expr::Pow(_, _) => PREC_POW,
        _ => PREC_ATOM,
    }
}

/// renders `expr`, parenthesised when it binds looser than `min_prec`
fn render_with(expr: &Expr, min_prec: u8) -> String {
    let inner = render(expr);
    if precedence(expr) < min_prec {
        format!("\\left({}\\right)", inner)
    } else {
        inner
    }
}

fn render_number(value: f64) -> String {
    if value == PI {
        "\\pi".to_string()
    } else if value == E {
        "e".to_string()
    } else {
        format!("{}", value)
    }
}

fn render_function(name: &str, arg: &Expr) -> String {
    format!("\\{}\\left({}\\right)", name, render(arg))
}

fn render(expr: &Expr) -> String {
    match expr {
        Expr::Var(name) => name.clone(),
        Expr::Const(value) => render_number(*value),
        Expr::Add(lhs, rhs) => {
            format!("{} + {}", render_with(lhs, PREC_ADD), render_with(rhs, PREC_ADD))
        }
        Expr::Sub(lhs, rhs) => {
            // a - (b + c) keeps its brackets
            format!("{} - {}", render_with(lhs, PREC_ADD), render_with(rhs, PREC_MUL))
        }
        Expr::Mul(lhs, rhs) => match lhs.as_ref() {
            Expr::Const(c) if *c == -1.0 => format!("-{}", render_with(rhs, PREC_MUL)),
            _ => format!(
                "{} \\cdot {}",
                render_with(lhs, PREC_MUL),
                render_with(rhs, PREC_POW)
            ),
        },
        Expr::Div(lhs, rhs) => format!("\\frac{{{}}}{{{}}}", render(lhs), render(rhs)),
        Expr::Pow(base, exp) => {
            if **exp == Expr::Const(0.5) {
                return format!("\\sqrt{{{}}}", render(base));
            }
            format!("{}^{{{}}}", render_with(base, PREC_ATOM), render(exp))
        }
        Expr::Exp(arg) => format!("e^{{{}}}", render(arg)),
        Expr::Ln(arg) => render_function("ln", arg),
        Expr::sin(arg) => render_function("sin", arg),
        Expr::cos(arg) => render_function("cos", arg),
        Expr::tg(arg) => render_function("tan", arg),
        Expr::ctg(arg) => render_function("cot", arg),
        Expr::arcsin(arg) => render_function("arcsin", arg),
        Expr::arccos(arg) => render_function("arccos", arg),
        Expr::arctg(arg) => render_function("arctan", arg),
        Expr::arcctg(arg) => format!("\\operatorname{{arccot}}\\left({}\\right)", render(arg)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typeset_equation() {
        assert_eq!(typeset("x+y=2"), "x + y = 2");
        assert_eq!(typeset("2x - 3y = 4"), "2 \\cdot x - 3 \\cdot y = 4");
    }

    #[test]
    fn test_typeset_fraction_and_powers() {
        assert_eq!(typeset("(x+1)/y"), "\\frac{x + 1}{y}");
        assert_eq!(typeset("(x+1)^2"), "\\left(x + 1\\right)^{2}");
        assert_eq!(typeset("sqrt(x)"), "\\sqrt{x}");
        assert_eq!(typeset("x^2^3"), "x^{2^{3}}");
    }

    #[test]
    fn test_typeset_keeps_needed_brackets_only() {
        assert_eq!(typeset("(a + b) * c"), "\\left(a + b\\right) \\cdot c");
        assert_eq!(typeset("a - (b - c)"), "a - \\left(b - c\\right)");
        assert_eq!(typeset("(a - b) - c"), "a - b - c");
    }

    #[test]
    fn test_typeset_negatives() {
        assert_eq!(typeset("-x"), "-x");
        assert_eq!(typeset("x + -3"), "x - 3");
        assert_eq!(typeset("x - -y"), "x + y");
    }

    #[test]
    fn test_typeset_functions_and_constants() {
        assert_eq!(typeset("sin(x)"), "\\sin\\left(x\\right)");
        assert_eq!(typeset("2pi"), "2 \\cdot \\pi");
        assert_eq!(typeset("exp(x)"), "e^{x}");
    }

    #[test]
    fn test_typeset_invalid_and_blank() {
        assert_eq!(typeset("(x +"), INVALID_EXPRESSION);
        assert_eq!(typeset("x = = 2"), INVALID_EXPRESSION);
        assert_eq!(typeset("   "), "");
    }
}
