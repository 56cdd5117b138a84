// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use crate::symbolic::symbolic_engine::{Expr, Statement};
use crate::symbols;
use approx::assert_relative_eq;
use std::collections::HashMap;
//___________________________________TESTS____________________________________

#[test]
fn test_operator_overloading() {
    let (x, y) = symbols!(x, y);
    let expr = (x.clone() + Expr::Const(2.0)) * y.clone() - x.clone() / y.clone();
    let expected = Expr::Sub(
        Box::new(Expr::Mul(
            Box::new(Expr::Add(
                Box::new(Expr::Var("x".to_string())),
                Box::new(Expr::Const(2.0)),
            )),
            Box::new(Expr::Var("y".to_string())),
        )),
        Box::new(Expr::Div(
            Box::new(Expr::Var("x".to_string())),
            Box::new(Expr::Var("y".to_string())),
        )),
    );
    assert_eq!(expr, expected);
}

#[test]
fn test_neg() {
    let expr = Expr::Var("x".to_string());
    let neg_expr = -expr;
    let expected = Expr::Mul(
        Box::new(Expr::Const(-1.0)),
        Box::new(Expr::Var("x".to_string())),
    );
    assert_eq!(neg_expr, expected);
}

#[test]
fn test_symbols() {
    let vars = Expr::Symbols("x, y, a1");
    assert_eq!(
        vars,
        vec![
            Expr::Var("x".to_string()),
            Expr::Var("y".to_string()),
            Expr::Var("a1".to_string())
        ]
    );
    assert!(Expr::Symbols(" , ").is_empty());
}

#[test]
fn test_display_reparses_to_same_tree() {
    let expr = Expr::parse_expression("2x^2 - sin(y)/3 + exp(-x)").unwrap();
    let printed = expr.to_string();
    assert_eq!(Expr::parse_expression(&printed).unwrap(), expr);
}

#[test]
fn test_set_variable() {
    let expr = Expr::parse_expression("x*y + x").unwrap();
    let substituted = expr.set_variable("x", 2.0);
    assert_eq!(substituted.all_arguments_are_variables(), vec!["y"]);
    assert_eq!(
        substituted.eval_expression(&["y"], &[3.0]).unwrap(),
        8.0
    );
}

#[test]
fn test_set_variable_from_map() {
    let expr = Expr::parse_expression("a*x + b").unwrap();
    let mut values = HashMap::new();
    values.insert("a".to_string(), 2.0);
    values.insert("b".to_string(), 5.0);
    let substituted = expr.set_variable_from_map(&values);
    assert_eq!(substituted.all_arguments_are_variables(), vec!["x"]);
    assert_eq!(substituted.eval_expression(&["x"], &[1.0]).unwrap(), 7.0);
}

#[test]
fn test_substitute_variable() {
    let expr = Expr::parse_expression("x^2").unwrap();
    let substituted = expr.substitute_variable("x", &Expr::parse_expression("y + 1").unwrap());
    assert_eq!(substituted.eval_expression(&["y"], &[2.0]).unwrap(), 9.0);
}

#[test]
fn test_contains_variable_and_is_constant() {
    let expr = Expr::parse_expression("sin(x) + 2").unwrap();
    assert!(expr.contains_variable("x"));
    assert!(!expr.contains_variable("y"));
    assert!(!expr.is_constant());
    assert!(Expr::parse_expression("2pi + e").unwrap().is_constant());
}

#[test]
fn test_all_arguments_are_variables_sorted_and_unique() {
    let expr = Expr::parse_expression("z*x + y^x + a").unwrap();
    assert_eq!(expr.all_arguments_are_variables(), vec!["a", "x", "y", "z"]);
}

#[test]
fn test_statement_variables_cover_both_sides() {
    let statement = Expr::parse_statement("a + x = b*y").unwrap();
    assert_eq!(statement.variables(), vec!["a", "b", "x", "y"]);
    assert!(statement.is_equation());
    assert_eq!(statement.to_string(), "(a + x) = (b * y)");
}

#[test]
fn test_residual() {
    let statement = Expr::parse_statement("x + y = 2").unwrap();
    assert_eq!(
        statement.residual().eval_expression(&["x", "y"], &[1.0, 1.0]).unwrap(),
        0.0
    );
    let expression = Statement::expression(Expr::Var("x".to_string()));
    assert_eq!(expression.residual(), Expr::Var("x".to_string()));
}

#[test]
fn test_diff_power_and_chain_rules() {
    let expr = Expr::parse_expression("sin(x^2)").unwrap();
    let df = expr.diff("x");
    // 2x*cos(x^2) at x = 1.5
    let expected = 2.0 * 1.5 * (1.5f64 * 1.5).cos();
    assert_relative_eq!(df.eval_expression(&["x"], &[1.5]).unwrap(), expected, epsilon = 1e-12);
}

#[test]
fn test_diff_quotient_rule() {
    let expr = Expr::parse_expression("x / (x + 1)").unwrap();
    let df = expr.diff("x");
    // 1/(x+1)^2
    assert_relative_eq!(df.eval_expression(&["x"], &[1.0]).unwrap(), 0.25, epsilon = 1e-12);
}

#[test]
fn test_diff_variable_exponent() {
    let expr = Expr::parse_expression("x^x").unwrap();
    let df = expr.diff("x");
    // x^x * (ln(x) + 1) at x = 2
    let expected = 4.0 * (2f64.ln() + 1.0);
    assert_relative_eq!(df.eval_expression(&["x"], &[2.0]).unwrap(), expected, epsilon = 1e-12);
}

#[test]
fn test_diff_inverse_trigonometry() {
    let x = 0.3;
    let arcctg = Expr::parse_expression("arcctg(x)").unwrap().diff("x");
    assert_relative_eq!(
        arcctg.eval_expression(&["x"], &[x]).unwrap(),
        -1.0 / (1.0 + x * x),
        epsilon = 1e-12
    );
    let arcsin = Expr::parse_expression("arcsin(x)").unwrap().diff("x");
    assert_relative_eq!(
        arcsin.eval_expression(&["x"], &[x]).unwrap(),
        1.0 / (1.0 - x * x).sqrt(),
        epsilon = 1e-12
    );
}

#[test]
fn test_diff_multi_args() {
    let expr = Expr::parse_expression("3x + 4y").unwrap();
    assert_eq!(
        expr.diff_multi_args(&["x", "y"]),
        vec![Expr::Const(3.0), Expr::Const(4.0)]
    );
}

#[test]
fn test_eval_expression_unbound_variable() {
    let expr = Expr::parse_expression("x + q").unwrap();
    assert!(expr.eval_expression(&["x"], &[1.0]).is_err());
}

#[test]
fn test_parse_vector_statement_stops_at_first_error() {
    assert_eq!(
        Expr::parse_vector_statement(&["x = 1", "y = 2"]).unwrap().len(),
        2
    );
    assert!(Expr::parse_vector_statement(&["x = 1", "y = (2"]).is_err());
}
