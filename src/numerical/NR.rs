// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
///  Example#1
/// ```
/// use RustedExprCalc::numerical::NR::NR;
/// use RustedExprCalc::symbolic::symbolic_engine::Expr;
/// use approx::assert_relative_eq;
/// // residuals of x^2 + y^2 = 10 and x - y = 4
/// let vec_of_expr = vec![
///     Expr::parse_expression("x^2+y^2-10").unwrap(),
///     Expr::parse_expression("x-y-4").unwrap(),
/// ];
/// let initial_guess = vec![1.0, 1.0];
/// let mut NR_instanse = NR::new();
/// let values = vec!["x".to_string(), "y".to_string()];
/// NR_instanse
///     .set_equation_system(vec_of_expr, Some(values), initial_guess, 1e-10, 100)
///     .unwrap();
/// let solution = NR_instanse.solve().unwrap();
/// assert_relative_eq!(solution[0], 3.0, epsilon = 1e-8);
/// assert_relative_eq!(solution[1], -1.0, epsilon = 1e-8);
///  ```
use crate::numerical::equation_system::{LinearSysMethod, SolveError};
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_functions::Jacobian;
use log::{debug, error, info, warn};
use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;
use std::time::Instant;
use tabled::{builder::Builder, settings::Style};

pub struct NR {
    pub jacobian: Jacobian, // instance of Jacobian struct, contains jacobian matrix function and equation functions
    pub eq_system: Vec<Expr>, // vector of equations (residuals)
    pub values: Vec<String>, // vector of variables
    pub initial_guess: Vec<f64>, // initial guess
    pub tolerance: f64,     // tolerance
    pub max_iterations: usize, // max number of iterations

    max_error: f64, // max error
    pub dumping_factor: f64,
    pub i: usize,                     // iteration counter
    pub jac: DMatrix<f64>,            // jacobian matrix
    pub fun_vector: DVector<f64>,     // vector of functions
    pub result: Option<DVector<f64>>, // result of the iteration

    pub linear_sys_method: LinearSysMethod, // method for solving linear system
    calc_statistics: HashMap<String, usize>,
}

impl Default for NR {
    fn default() -> Self {
        Self::new()
    }
}

impl NR {
    pub fn new() -> NR {
        NR {
            jacobian: Jacobian::new(),
            eq_system: Vec::new(),
            values: Vec::new(),
            initial_guess: Vec::new(),
            tolerance: 1e-10,
            max_iterations: 100,
            max_error: 0.0,
            dumping_factor: 1.0,
            i: 0,
            jac: DMatrix::zeros(0, 0),
            fun_vector: DVector::zeros(0),
            result: None,
            linear_sys_method: LinearSysMethod::Lu,
            calc_statistics: HashMap::new(),
        }
    }
    ////////////////////////////SETTERS///////////////////////////////////////////////////////////////////
    /// Basic methods to set the equation system
    pub fn set_equation_system(
        &mut self,
        eq_system: Vec<Expr>,
        unknowns: Option<Vec<String>>,
        initial_guess: Vec<f64>,
        tolerance: f64,
        max_iterations: usize,
    ) -> Result<(), SolveError> {
        if eq_system.is_empty() {
            return Err(SolveError::EmptySystem);
        }
        let values = match unknowns {
            Some(values) => values,
            None => {
                let mut args: Vec<String> = eq_system
                    .iter()
                    .flat_map(|x| x.all_arguments_are_variables())
                    .collect();
                args.sort();
                args.dedup();
                args
            }
        };
        if values.len() != eq_system.len() {
            return Err(SolveError::UnknownCount {
                equations: eq_system.len(),
                unknowns: values,
            });
        }
        if initial_guess.len() != values.len() {
            return Err(SolveError::InvalidConfig(format!(
                "initial guess has {} components for {} unknowns",
                initial_guess.len(),
                values.len()
            )));
        }
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(SolveError::InvalidConfig(
                "tolerance should be a non-negative number".to_string(),
            ));
        }
        if max_iterations == 0 {
            return Err(SolveError::InvalidConfig(
                "max iterations should be a positive number".to_string(),
            ));
        }
        self.eq_system = eq_system;
        self.values = values;
        self.initial_guess = initial_guess;
        self.tolerance = tolerance;
        self.max_iterations = max_iterations;
        Ok(())
    }

    pub fn set_solver_params(
        &mut self,
        linear_sys_method: Option<LinearSysMethod>,
        damping_factor: Option<f64>,
    ) -> Result<(), SolveError> {
        if let Some(method) = linear_sys_method {
            self.linear_sys_method = method;
        }
        if let Some(dumping_factor) = damping_factor {
            if !(dumping_factor > 0.0 && dumping_factor <= 1.0) {
                return Err(SolveError::InvalidConfig(format!(
                    "damping factor should be in (0.0, 1.0], got {}",
                    dumping_factor
                )));
            }
            self.dumping_factor = dumping_factor;
        }
        Ok(())
    }

    ///Set system of equations with vector of symbolic expressions
    pub fn eq_generate(&mut self) -> Result<(), SolveError> {
        let mut Jacobian_instance = Jacobian::new();
        let args: Vec<&str> = self.values.iter().map(|x| x.as_str()).collect();
        Jacobian_instance.set_vector_of_functions(self.eq_system.clone());
        Jacobian_instance.set_variables(args.clone());
        Jacobian_instance.calc_jacobian();
        Jacobian_instance.jacobian_generate(args.clone())?;
        Jacobian_instance.lambdify_funcvector(args)?;
        self.jacobian = Jacobian_instance;
        Ok(())
    }
    /////////////////////////////////////////////////////////////////////////////////////////////
    //                ITERATIONS
    /////////////////////////////////////////////////////////////////////////////////////////////
    /// realize iteration of Newton-Raphson - calculate new iteration vector by using Jacobian matrix
    pub fn iteration(&mut self, x: &DVector<f64>) -> Result<DVector<f64>, SolveError> {
        let Jacobian_instance = &mut self.jacobian;
        // evaluate jacobian and functions
        Jacobian_instance.evaluate_func_jacobian_DMatrix(x.as_slice());
        Jacobian_instance.evaluate_funvector_lambdified_DVector(x.as_slice());
        let new_j = &Jacobian_instance.evaluated_jacobian_DMatrix;
        let new_f = &Jacobian_instance.evaluated_functions_DVector;
        if new_j.iter().chain(new_f.iter()).any(|v| !v.is_finite()) {
            return Err(SolveError::NonFinite);
        }
        self.jac = new_j.clone();
        self.fun_vector = new_f.clone();
        let delta = Self::solve_linear_system(self.linear_sys_method, new_j, new_f)?;

        let lambda = self.dumping_factor;
        let new_x: DVector<f64> = x - lambda * delta;
        Ok(new_x)
    }
    /// main function to solve the system of equations
    pub fn main_loop(&mut self) -> Result<DVector<f64>, SolveError> {
        let mut x = DVector::from_vec(self.initial_guess.clone());
        self.i = 0;
        self.result = Some(x.clone()); // save into result in case the very first iteration
        while self.i < self.max_iterations {
            let new_x = self.iteration(&x)?;

            let dx: DVector<f64> = &new_x - &x;
            let error = dx.norm();
            if (error > self.max_error) && (self.i > 0) {
                warn!("Error is increasing");
            }
            self.max_error = error;
            if error < self.tolerance {
                self.result = Some(new_x.clone());
                return Ok(new_x);
            }
            x = new_x;
            self.i += 1;
            debug!("iteration = {}, error = {}", self.i, error)
        }
        error!("Maximum number of iterations reached. No solution found.");
        Err(SolveError::NoConvergence {
            iterations: self.max_iterations,
        })
    }
    ////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
    //                     main functions to start the solver and caclulate statistics
    ////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
    pub fn solve(&mut self) -> Result<DVector<f64>, SolveError> {
        let begin = Instant::now();
        self.eq_generate()?;
        let res = self.main_loop();
        let end = begin.elapsed();
        self.calc_statistics
            .insert("time elapsed, us".to_string(), end.as_micros() as usize);
        self.calc_statistics();
        let res = res?;
        info!("Newton-Raphson converged in {} iterations", self.i);
        self.result = Some(res.clone());
        Ok(res)
    }

    pub fn get_result(&self) -> Option<DVector<f64>> {
        self.result.clone()
    }

    fn calc_statistics(&self) {
        let mut stats = self.calc_statistics.clone();
        let jac_shape = self.jac.shape();
        stats.insert(
            "number of jacobian elements".to_string(),
            jac_shape.0 * jac_shape.1,
        );
        stats.insert("length of y vector".to_string(), self.values.len());
        stats.insert("number of iterations".to_string(), self.i);
        let mut table = Builder::from(stats).build();
        table.with(Style::modern_rounded());
        debug!("\n \n CALC STATISTICS \n \n {}", table);
    }
    //////////////////////////////////////////////////////////////////////////////////////////////
    //                  LINEAR SYSTEM SOLVERS
    //////////////////////////////////////////////////////////////////////////////////////////////
    /// Solves `A x = b`; a matrix without a unique solution is `SolveError::Singular`.
    pub fn solve_linear_system(
        solver: LinearSysMethod,
        A: &DMatrix<f64>,
        b: &DVector<f64>,
    ) -> Result<DVector<f64>, SolveError> {
        let x = match solver {
            LinearSysMethod::Lu => {
                let lu = A.clone().lu();
                if !lu.is_invertible() {
                    return Err(SolveError::Singular);
                }
                lu.solve(b).ok_or(SolveError::Singular)?
            }
            LinearSysMethod::Inv => {
                let A_inv = A.clone().try_inverse().ok_or(SolveError::Singular)?;
                A_inv * b
            }
        };
        if x.iter().any(|v| !v.is_finite()) {
            return Err(SolveError::Singular);
        }
        Ok(x)
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////
//                                     TESTS
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse_all(exprs: &[&str]) -> Vec<Expr> {
        exprs
            .iter()
            .map(|s| Expr::parse_expression(s).unwrap())
            .collect()
    }

    #[test]
    fn test_NR_set_equation_system() {
        let vec_of_expr = parse_all(&["x^2+y^2-10", "x-y-4"]);
        let mut NR_instanse = NR::new();
        let values = vec!["x".to_string(), "y".to_string()];
        NR_instanse
            .set_equation_system(vec_of_expr, Some(values), vec![1.0, 1.0], 1e-10, 100)
            .unwrap();
        NR_instanse.eq_generate().unwrap();
        let solution = NR_instanse.main_loop().unwrap();
        assert_relative_eq!(solution[0], 3.0, epsilon = 1e-8);
        assert_relative_eq!(solution[1], -1.0, epsilon = 1e-8);
        assert_eq!(NR_instanse.get_result(), Some(solution));
    }

    #[test]
    fn test_NR_unknowns_found_automatically() {
        let vec_of_expr = parse_all(&["x*y - 2", "x + y - 3"]);
        let mut NR_instanse = NR::new();
        NR_instanse
            .set_equation_system(vec_of_expr, None, vec![0.5, 3.0], 1e-10, 100)
            .unwrap();
        assert_eq!(NR_instanse.values, vec!["x", "y"]);
        let solution = NR_instanse.solve().unwrap();
        assert_relative_eq!(solution[0] * solution[1], 2.0, epsilon = 1e-8);
        assert_relative_eq!(solution[0] + solution[1], 3.0, epsilon = 1e-8);
    }

    #[test]
    fn test_NR_with_damping_and_inverse() {
        let vec_of_expr = parse_all(&["x^2+y^2-10", "x-y-4"]);
        let mut NR_instanse = NR::new();
        NR_instanse
            .set_equation_system(vec_of_expr, None, vec![1.0, 1.0], 1e-10, 500)
            .unwrap();
        NR_instanse
            .set_solver_params(Some(LinearSysMethod::Inv), Some(0.8))
            .unwrap();
        let solution = NR_instanse.solve().unwrap();
        assert_relative_eq!(solution[0] - solution[1], 4.0, epsilon = 1e-8);
    }

    #[test]
    fn test_NR_rejects_bad_setup() {
        let mut NR_instanse = NR::new();
        let err = NR_instanse
            .set_equation_system(parse_all(&["x + y + z"]), None, vec![1.0], 1e-10, 100)
            .unwrap_err();
        assert!(matches!(err, SolveError::UnknownCount { equations: 1, .. }));
        assert!(NR_instanse.set_solver_params(None, Some(1.5)).is_err());
        assert!(NR_instanse.set_solver_params(None, Some(0.0)).is_err());
    }

    #[test]
    fn test_NR_no_real_root() {
        // x^2 + 1 = 0 has no real solution
        let mut NR_instanse = NR::new();
        NR_instanse
            .set_equation_system(
                parse_all(&["x^2 + 1", "y - 1"]),
                None,
                vec![0.5, 0.0],
                1e-10,
                50,
            )
            .unwrap();
        assert!(NR_instanse.solve().is_err());
    }

    #[test]
    fn test_solve_linear_system_singular() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 2.0, 2.0]);
        let b = DVector::from_vec(vec![2.0, 4.0]);
        assert_eq!(
            NR::solve_linear_system(LinearSysMethod::Lu, &a, &b),
            Err(SolveError::Singular)
        );
        assert_eq!(
            NR::solve_linear_system(LinearSysMethod::Inv, &a, &b),
            Err(SolveError::Singular)
        );
    }
}
