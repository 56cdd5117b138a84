// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! # Lambdification
//!
//! Turns a symbolic `Expr` into something that can be evaluated many times: a compiled
//! `Lambda` tree where variable names are resolved to argument positions once, or a boxed
//! closure over it. Newton iterations evaluate the residuals and the Jacobian on every
//! step, so name lookups are paid only at compile time.

use crate::symbolic::symbolic_engine::Expr;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LambdifyError {
    #[error("variable '{0}' is not among the arguments of the compiled function")]
    UnboundVariable(String),
}

#[derive(Clone, Debug)]
pub enum Lambda {
    Var(usize),
    Const(f64),
    Add(Box<Lambda>, Box<Lambda>),
    Sub(Box<Lambda>, Box<Lambda>),
    Mul(Box<Lambda>, Box<Lambda>),
    Div(Box<Lambda>, Box<Lambda>),
    Pow(Box<Lambda>, Box<Lambda>),
    Exp(Box<Lambda>),
    Ln(Box<Lambda>),
    Sin(Box<Lambda>),
    Cos(Box<Lambda>),
    Tg(Box<Lambda>),
    Ctg(Box<Lambda>),
    ArcSin(Box<Lambda>),
    ArcCos(Box<Lambda>),
    ArcTg(Box<Lambda>),
    ArcCtg(Box<Lambda>),
}

impl Expr {
    /// Compiles the expression; `vars[i]` becomes argument `i` of `Lambda::eval`.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse_expression("x^2 + y")?.compile(&["x", "y"])?;
    /// assert_eq!(f.eval(&[3.0, 1.0]), 10.0);
    /// ```
    pub fn compile(&self, vars: &[&str]) -> Result<Lambda, LambdifyError> {
        let compiled = match self {
            Expr::Var(name) => {
                let idx = vars
                    .iter()
                    .position(|&v| v == name)
                    .ok_or_else(|| LambdifyError::UnboundVariable(name.clone()))?;
                Lambda::Var(idx)
            }
            Expr::Const(v) => Lambda::Const(*v),
            Expr::Add(a, b) => Lambda::Add(Box::new(a.compile(vars)?), Box::new(b.compile(vars)?)),
            Expr::Sub(a, b) => Lambda::Sub(Box::new(a.compile(vars)?), Box::new(b.compile(vars)?)),
            Expr::Mul(a, b) => Lambda::Mul(Box::new(a.compile(vars)?), Box::new(b.compile(vars)?)),
            Expr::Div(a, b) => Lambda::Div(Box::new(a.compile(vars)?), Box::new(b.compile(vars)?)),
            Expr::Pow(a, b) => Lambda::Pow(Box::new(a.compile(vars)?), Box::new(b.compile(vars)?)),
            Expr::Exp(e) => Lambda::Exp(Box::new(e.compile(vars)?)),
            Expr::Ln(e) => Lambda::Ln(Box::new(e.compile(vars)?)),
            Expr::sin(e) => Lambda::Sin(Box::new(e.compile(vars)?)),
            Expr::cos(e) => Lambda::Cos(Box::new(e.compile(vars)?)),
            Expr::tg(e) => Lambda::Tg(Box::new(e.compile(vars)?)),
            Expr::ctg(e) => Lambda::Ctg(Box::new(e.compile(vars)?)),
            Expr::arcsin(e) => Lambda::ArcSin(Box::new(e.compile(vars)?)),
            Expr::arccos(e) => Lambda::ArcCos(Box::new(e.compile(vars)?)),
            Expr::arctg(e) => Lambda::ArcTg(Box::new(e.compile(vars)?)),
            Expr::arcctg(e) => Lambda::ArcCtg(Box::new(e.compile(vars)?)),
        };
        Ok(compiled)
    }

    /// Boxed closure over the compiled tree, thread safe so it can be stored in solvers.
    pub fn lambdify_borrowed_thread_safe(
        &self,
        vars: &[&str],
    ) -> Result<Box<dyn Fn(&[f64]) -> f64 + Send + Sync>, LambdifyError> {
        let compiled = self.compile(vars)?;
        Ok(Box::new(compiled.as_closure()))
    }

    /// Convenience method that automatically detects variables and creates a closure.
    ///
    /// Input vector positions correspond to alphabetically sorted variable names.
    pub fn lambdify_wrapped(&self) -> Box<dyn Fn(Vec<f64>) -> f64> {
        let vars_ = self.all_arguments_are_variables();
        let vars = vars_.iter().map(|x| x.as_str()).collect::<Vec<&str>>();
        match self.compile(vars.as_slice()) {
            Ok(compiled) => Box::new(move |x: Vec<f64>| compiled.eval(x.as_slice())),
            // unreachable: every variable of the tree is in `vars`
            Err(_) => Box::new(|_| f64::NAN),
        }
    }
}

impl Lambda {
    #[inline(always)]
    pub fn eval(&self, args: &[f64]) -> f64 {
        match self {
            Lambda::Var(i) => args[*i],
            Lambda::Const(v) => *v,
            Lambda::Add(a, b) => a.eval(args) + b.eval(args),
            Lambda::Sub(a, b) => a.eval(args) - b.eval(args),
            Lambda::Mul(a, b) => a.eval(args) * b.eval(args),
            Lambda::Div(a, b) => a.eval(args) / b.eval(args),
            Lambda::Pow(a, b) => a.eval(args).powf(b.eval(args)),
            Lambda::Exp(e) => e.eval(args).exp(),
            Lambda::Ln(e) => e.eval(args).ln(),
            Lambda::Sin(e) => e.eval(args).sin(),
            Lambda::Cos(e) => e.eval(args).cos(),
            Lambda::Tg(e) => e.eval(args).tan(),
            Lambda::Ctg(e) => 1.0 / e.eval(args).tan(),
            Lambda::ArcSin(e) => e.eval(args).asin(),
            Lambda::ArcCos(e) => e.eval(args).acos(),
            Lambda::ArcTg(e) => e.eval(args).atan(),
            Lambda::ArcCtg(e) => (PI / 2.0) - e.eval(args).atan(),
        }
    }

    pub fn as_closure(self) -> impl Fn(&[f64]) -> f64 + Send + Sync {
        move |args| self.eval(args)
    }
}
