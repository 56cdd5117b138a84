// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_lambdify::{Lambda, LambdifyError};
use nalgebra::{DMatrix, DVector};
///
/// calculate symbolic jacobian and evaluate it
/// Example#
/// ```
/// use RustedExprCalc::symbolic::symbolic_functions::Jacobian;
/// let mut Jacobian_instance = Jacobian::new();
/// // residuals of "x + y = 2" and "x*y = 1"
/// let vec_of_expressions = vec!["x + y - 2".to_string(), "x*y - 1".to_string()];
/// // set vector of functions
/// Jacobian_instance.set_funcvecor_from_str(vec_of_expressions).unwrap();
/// // set vector of variables
/// Jacobian_instance.set_varvecor_from_str("x, y");
/// // calculate symbolic jacobian
/// Jacobian_instance.calc_jacobian();
/// // transform into human readable form
/// Jacobian_instance.readable_jacobian();
/// assert_eq!(Jacobian_instance.readable_jacobian[1], vec!["y".to_string(), "x".to_string()]);
/// // compile functions and jacobian
/// Jacobian_instance.jacobian_generate(vec!["x", "y"]).unwrap();
/// Jacobian_instance.lambdify_funcvector(vec!["x", "y"]).unwrap();
/// // evaluate jacobian to nalgebra matrix format
/// Jacobian_instance.evaluate_func_jacobian_DMatrix(&[3.0, 2.0]);
/// assert_eq!(Jacobian_instance.evaluated_jacobian_DMatrix[(1, 0)], 2.0);
/// Jacobian_instance.evaluate_funvector_lambdified_DVector(&[3.0, 2.0]);
/// assert_eq!(Jacobian_instance.evaluated_functions_DVector[1], 5.0);
/// ```
pub struct Jacobian {
    pub vector_of_functions: Vec<Expr>, // vector of symbolic functions/expressions
    pub lambdified_functions: Vec<Lambda>, // compiled functions
    pub evaluated_functions_DVector: DVector<f64>, // numerical results of evaluated functions
    pub vector_of_variables: Vec<Expr>, // vector of symbolic variables
    pub variable_string: Vec<String>, // vector of string representation of variables
    pub symbolic_jacobian: Vec<Vec<Expr>>, // vector of symbolic jacobian
    pub readable_jacobian: Vec<Vec<String>>, // human readable jacobian
    pub function_jacobian: Vec<Vec<Lambda>>, // compiled partial derivatives
    pub evaluated_jacobian_DMatrix: DMatrix<f64>, // numerical results of evaluated jacobian
}

impl Default for Jacobian {
    fn default() -> Self {
        Self::new()
    }
}

impl Jacobian {
    pub fn new() -> Self {
        Self {
            vector_of_functions: Vec::new(),
            lambdified_functions: Vec::new(),
            evaluated_functions_DVector: DVector::zeros(0),
            vector_of_variables: Vec::new(),
            variable_string: Vec::new(),
            symbolic_jacobian: Vec::new(),
            readable_jacobian: Vec::new(),
            function_jacobian: Vec::new(),
            evaluated_jacobian_DMatrix: DMatrix::zeros(0, 0),
        }
    }

    pub fn from_vectors(vector_of_functions: Vec<Expr>, vector_of_variables: Vec<Expr>) -> Self {
        let variable_string = vector_of_variables
            .iter()
            .map(|v| v.to_string())
            .collect();
        Self {
            vector_of_functions,
            vector_of_variables,
            variable_string,
            ..Self::new()
        }
    }

    pub fn set_vector_of_functions(&mut self, value: Vec<Expr>) {
        self.vector_of_functions = value;
    }

    pub fn set_funcvecor_from_str(&mut self, value: Vec<String>) -> Result<(), ParseError> {
        let vec_of_exprs = value
            .iter()
            .map(|s| Expr::parse_expression(s))
            .collect::<Result<Vec<Expr>, ParseError>>()?;
        self.vector_of_functions = vec_of_exprs;
        Ok(())
    }

    pub fn set_varvecor_from_str(&mut self, symbols: &str) {
        let vec_of_vars = Expr::Symbols(symbols);
        self.variable_string = vec_of_vars.iter().map(|v| v.to_string()).collect();
        self.vector_of_variables = vec_of_vars;
    }

    pub fn set_variables(&mut self, varvec: Vec<&str>) {
        self.variable_string = varvec.iter().map(|s| s.to_string()).collect();
        self.vector_of_variables = varvec.iter().map(|s| Expr::Var(s.to_string())).collect();
    }

    /// turn jacobian into readable format
    pub fn readable_jacobian(&mut self) {
        self.readable_jacobian = self
            .symbolic_jacobian
            .iter()
            .map(|row| row.iter().map(|elem| elem.to_string()).collect())
            .collect();
    }

    /// calculate the symbolic jacobian: row i holds the simplified partials of function i
    pub fn calc_jacobian(&mut self) {
        let variables: Vec<&str> = self.variable_string.iter().map(|s| s.as_str()).collect();
        self.symbolic_jacobian = self
            .vector_of_functions
            .iter()
            .map(|func| {
                variables
                    .iter()
                    .map(|var| func.diff(var).simplify())
                    .collect()
            })
            .collect();
    }

    /// A system is linear when no partial derivative depends on a variable.
    pub fn is_linear(&self) -> bool {
        !self.symbolic_jacobian.is_empty()
            && self
                .symbolic_jacobian
                .iter()
                .all(|row| row.iter().all(|elem| elem.is_constant()))
    }

    //////////////////////////////JACOBIAN AND RESIDUAL VECTOR IN VECTOR FORM FOR
    ///////                               NONLINEAR SOLVERS           ///////////////////////////
    /// creating function jacobian a matrix of functions with partial derivatives
    pub fn jacobian_generate(&mut self, variable_str: Vec<&str>) -> Result<(), LambdifyError> {
        self.function_jacobian = self
            .symbolic_jacobian
            .iter()
            .map(|row| {
                row.iter()
                    .map(|elem| elem.compile(variable_str.as_slice()))
                    .collect::<Result<Vec<Lambda>, LambdifyError>>()
            })
            .collect::<Result<Vec<Vec<Lambda>>, LambdifyError>>()?;
        Ok(())
    }

    pub fn lambdify_funcvector(&mut self, variable_str: Vec<&str>) -> Result<(), LambdifyError> {
        self.lambdified_functions = self
            .vector_of_functions
            .iter()
            .map(|func| func.compile(variable_str.as_slice()))
            .collect::<Result<Vec<Lambda>, LambdifyError>>()?;
        Ok(())
    }

    // evaluate jacobian to nalgebra DMatrix
    pub fn evaluate_func_jacobian_DMatrix(&mut self, x: &[f64]) {
        self.evaluated_jacobian_DMatrix = self.evaluate_func_jacobian_DMatrix_unmut(x);
    }

    pub fn evaluate_func_jacobian_DMatrix_unmut(&self, x: &[f64]) -> DMatrix<f64> {
        let rows = self.function_jacobian.len();
        let cols = self.variable_string.len();
        DMatrix::from_fn(rows, cols, |i, j| self.function_jacobian[i][j].eval(x))
    }

    pub fn evaluate_funvector_lambdified_DVector(&mut self, arg_values: &[f64]) {
        self.evaluated_functions_DVector = self.evaluate_funvector_lambdified_DVector_unmut(arg_values);
    }

    pub fn evaluate_funvector_lambdified_DVector_unmut(&self, arg_values: &[f64]) -> DVector<f64> {
        DVector::from_iterator(
            self.lambdified_functions.len(),
            self.lambdified_functions.iter().map(|f| f.eval(arg_values)),
        )
    }
}
