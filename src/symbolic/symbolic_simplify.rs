// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! # Symbolic Expression Simplification Module
//!
//! Constant folding and algebraic identities for `Expr`. Derivatives produced by
//! `diff` are full of `0 * x` and `1 * y` terms; simplification removes them so the
//! Jacobian of a linear system reduces to plain constants.
//!
//! ## Simplification Strategy
//!
//! 1. **Constant Folding**: Evaluates arithmetic operations on numerical constants
//! 2. **Algebraic Identities**: x + 0 = x, x * 1 = x, x * 0 = 0, x^1 = x, x^0 = 1
//! 3. **Function Values**: exp(0) = 1, ln(1) = 0, sin(0) = 0, cos(0) = 1, ...

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Evaluates every operation whose operands are all constants.
    ///
    /// - `Const(2) + Const(3)` → `Const(5)`
    /// - `x + Const(2) + Const(3)` → unchanged (no reassociation)
    pub fn simplify_numbers(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => match (lhs.simplify_numbers(), rhs.simplify_numbers()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                (lhs, rhs) => Expr::Add(Box::new(lhs), Box::new(rhs)),
            },
            Expr::Sub(lhs, rhs) => match (lhs.simplify_numbers(), rhs.simplify_numbers()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                (lhs, rhs) => Expr::Sub(Box::new(lhs), Box::new(rhs)),
            },
            Expr::Mul(lhs, rhs) => match (lhs.simplify_numbers(), rhs.simplify_numbers()) {
                (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                (lhs, rhs) => Expr::Mul(Box::new(lhs), Box::new(rhs)),
            },
            Expr::Div(lhs, rhs) => match (lhs.simplify_numbers(), rhs.simplify_numbers()) {
                (Expr::Const(a), Expr::Const(b)) if b != 0.0 => Expr::Const(a / b),
                (lhs, rhs) => Expr::Div(Box::new(lhs), Box::new(rhs)),
            },
            Expr::Pow(base, exp) => match (base.simplify_numbers(), exp.simplify_numbers()) {
                (Expr::Const(a), Expr::Const(b)) if a.powf(b).is_finite() => {
                    Expr::Const(a.powf(b))
                }
                (base, exp) => Expr::Pow(Box::new(base), Box::new(exp)),
            },
            _ => self.fold_function(|inner| inner.simplify_numbers()),
        }
    }

    /// Algebraic simplification using constant folding plus the identities listed in
    /// the module docs. Runs bottom-up in a single pass.
    pub fn simplify_(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b), // (a) + (b) = (a + b)
                    (Expr::Const(0.0), _) => rhs,                           // 0 + x = x
                    (_, Expr::Const(0.0)) => lhs,                           // x + 0 = x
                    _ => Expr::Add(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (_, Expr::Const(0.0)) => lhs, // x - 0 = x
                    (Expr::Const(0.0), _) => (-rhs).simplify_(),
                    _ if lhs == rhs => Expr::Const(0.0),
                    _ => Expr::Sub(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    (Expr::Const(0.0), _) | (_, Expr::Const(0.0)) => Expr::Const(0.0),
                    (Expr::Const(1.0), _) => rhs,
                    (_, Expr::Const(1.0)) => lhs,
                    // (a * x) * b = (a*b) * x
                    (Expr::Mul(inner_l, inner_r), Expr::Const(b)) => match inner_l.as_ref() {
                        Expr::Const(a) => {
                            Expr::Mul(Box::new(Expr::Const(a * b)), inner_r.clone())
                        }
                        _ => Expr::Mul(Box::new(lhs.clone()), Box::new(rhs.clone())),
                    },
                    (Expr::Const(a), Expr::Mul(inner_l, inner_r)) => match inner_l.as_ref() {
                        Expr::Const(b) => {
                            Expr::Mul(Box::new(Expr::Const(a * b)), inner_r.clone())
                        }
                        _ => Expr::Mul(Box::new(lhs.clone()), Box::new(rhs.clone())),
                    },
                    _ => Expr::Mul(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_();
                let rhs = rhs.simplify_();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    (Expr::Const(0.0), _) if !rhs.is_zero() => Expr::Const(0.0), // 0 / x = 0
                    (_, Expr::Const(1.0)) => lhs,                                 // x / 1 = x
                    _ if lhs == rhs && !lhs.is_zero() => Expr::Const(1.0),
                    _ => Expr::Div(Box::new(lhs), Box::new(rhs)),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_();
                let exp = exp.simplify_();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) if a.powf(*b).is_finite() => {
                        Expr::Const(a.powf(*b))
                    }
                    (_, Expr::Const(0.0)) => Expr::Const(1.0), // x^0 = 1
                    (_, Expr::Const(1.0)) => base,             // x^1 = x
                    (Expr::Const(1.0), _) => Expr::Const(1.0), // 1^x = 1
                    _ => Expr::Pow(Box::new(base), Box::new(exp)),
                }
            }
            _ => {
                let folded = self.fold_function(|inner| inner.simplify_());
                match &folded {
                    Expr::Exp(inner) if inner.is_zero() => Expr::Const(1.0),
                    Expr::Ln(inner) if **inner == Expr::Const(1.0) => Expr::Const(0.0),
                    Expr::sin(inner) | Expr::tg(inner) | Expr::arcsin(inner) | Expr::arctg(inner)
                        if inner.is_zero() =>
                    {
                        Expr::Const(0.0)
                    }
                    Expr::cos(inner) if inner.is_zero() => Expr::Const(1.0),
                    Expr::arccos(inner) if **inner == Expr::Const(1.0) => Expr::Const(0.0),
                    _ => folded,
                }
            }
        }
    }

    /// Repeats `simplify_` until the tree stops changing.
    pub fn simplify(&self) -> Expr {
        let mut current = self.clone();
        loop {
            let next = current.simplify_();
            if next == current {
                return next;
            }
            current = next;
        }
    }

    /// applies `f` to the argument of a one-argument function node
    fn fold_function(&self, f: impl Fn(&Expr) -> Expr) -> Expr {
        match self {
            Expr::Exp(expr) => Expr::Exp(Box::new(f(expr))),
            Expr::Ln(expr) => Expr::Ln(Box::new(f(expr))),
            Expr::sin(expr) => Expr::sin(Box::new(f(expr))),
            Expr::cos(expr) => Expr::cos(Box::new(f(expr))),
            Expr::tg(expr) => Expr::tg(Box::new(f(expr))),
            Expr::ctg(expr) => Expr::ctg(Box::new(f(expr))),
            Expr::arcsin(expr) => Expr::arcsin(Box::new(f(expr))),
            Expr::arccos(expr) => Expr::arccos(Box::new(f(expr))),
            Expr::arctg(expr) => Expr::arctg(Box::new(f(expr))),
            Expr::arcctg(expr) => Expr::arcctg(Box::new(f(expr))),
            _ => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::Var("x".to_string())
    }

    #[test]
    fn test_simplify_numbers_folds_constants_only() {
        let expr = Expr::Const(2.0) + Expr::Const(3.0);
        assert_eq!(expr.simplify_numbers(), Expr::Const(5.0));
        let expr = x() + Expr::Const(2.0);
        assert_eq!(expr.simplify_numbers(), expr);
    }

    #[test]
    fn test_simplify_identities() {
        assert_eq!((x() + Expr::Const(0.0)).simplify_(), x());
        assert_eq!((Expr::Const(1.0) * x()).simplify_(), x());
        assert_eq!((x() * Expr::Const(0.0)).simplify_(), Expr::Const(0.0));
        assert_eq!((x() - x()).simplify_(), Expr::Const(0.0));
        assert_eq!(x().pow(Expr::Const(1.0)).simplify_(), x());
        assert_eq!(x().pow(Expr::Const(0.0)).simplify_(), Expr::Const(1.0));
        assert_eq!((x() / Expr::Const(1.0)).simplify_(), x());
    }

    #[test]
    fn test_simplify_derivative_of_linear_term_is_constant() {
        // d/dx (3*x - 2*y + 5)
        let expr = Expr::parse_expression("3*x - 2*y + 5").unwrap();
        assert_eq!(expr.diff("x").simplify(), Expr::Const(3.0));
        assert_eq!(expr.diff("y").simplify(), Expr::Const(-2.0));
    }

    #[test]
    fn test_simplify_derivative_of_product_keeps_variable() {
        let expr = Expr::parse_expression("x*y").unwrap();
        assert_eq!(expr.diff("x").simplify(), Expr::Var("y".to_string()));
    }

    #[test]
    fn test_simplify_functions_at_zero() {
        assert_eq!(Expr::Const(0.0).exp().simplify_(), Expr::Const(1.0));
        assert_eq!(Expr::Const(1.0).ln().simplify_(), Expr::Const(0.0));
        assert_eq!(
            Expr::cos(Box::new(Expr::Const(0.0))).simplify_(),
            Expr::Const(1.0)
        );
    }
}
