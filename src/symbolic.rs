// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedExprCalc::symbolic::symbolic_engine::Expr;
/// let input = "x^2 + 3y";
/// let parsed_expression = Expr::parse_expression(input).unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// assert_eq!(parsed_expression.all_arguments_are_variables(), vec!["x", "y"]);
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) holds the expression tree and the parsed calculator line (`Statement`)
/// 2) substitutes, differentiates and simplifies expressions
/// 3) prints a symbolic expression back as a string for control of results
///# Example#
/// ```
/// use RustedExprCalc::symbolic::symbolic_engine::Expr;
/// let statement = Expr::parse_statement("x^2 + y = 3").unwrap();
/// let residual = statement.residual();
/// // differentiate with respect to x and y
/// let df_dx = residual.diff("x").simplify();
/// let df_dy = residual.diff("y").simplify();
/// println!("df_dx = {}, df_dy = {}", df_dx, df_dy);
/// assert_eq!(df_dy, Expr::Const(1.0));
/// // evaluate directly
/// let value = residual.eval_expression(&["x", "y"], &[1.0, 2.0]).unwrap();
/// assert_eq!(value, 0.0);
/// ```
pub mod symbolic_engine;
/// differentiation, direct evaluation and string entry points
pub mod symbolic_engine_derivatives;
/// algebraic simplification of expression trees
pub mod symbolic_simplify;
/// compiling expressions into reusable evaluators
pub mod symbolic_lambdify;
///______________________________________________________________________________________________________________________________
/// # Jacobian
/// symbolic jacobian of a system of functions and its compiled, evaluable form
/// used by the Newton-Raphson solver
pub mod symbolic_functions;
/// LaTeX markup of expressions and equations
pub mod latex;
pub mod utils;
#[cfg(test)]
mod symbolic_engine_tests;
