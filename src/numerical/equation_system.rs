// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! # Equation systems
//!
//! Solves a system of equations given as strings: every line is parsed, turned into its
//! residual `lhs - rhs` and the unknowns are collected in alphabetical order.
//! A system whose Jacobian is constant is linear and is solved directly with one linear
//! solve; anything else goes to Newton-Raphson started from `SolverConfig::initial_guess`.
//! When that uniform start fails, the k-th unknown restarts from `initial_guess + 0.1 k`.
//! Extra equations beyond the number of unknowns must agree with the solution.
//!
//! # Example
//! ```
//! use RustedExprCalc::numerical::equation_system::{SolverConfig, solve_equations};
//! let solution = solve_equations(&["x+y=2", "x-y=0"], &SolverConfig::default()).unwrap();
//! assert_eq!(solution.get("x"), Some(1.0));
//! assert_eq!(solution.get("y"), Some(1.0));
//! ```

use crate::numerical::NR::NR;
use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_engine::{Expr, Statement};
use crate::symbolic::symbolic_functions::Jacobian;
use crate::symbolic::symbolic_lambdify::LambdifyError;
use itertools::Itertools;
use log::{debug, info, warn};
use nalgebra::DVector;
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("cannot parse equation: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Lambdify(#[from] LambdifyError),
    #[error("the system is empty")]
    EmptySystem,
    #[error("{equations} equations need {equations} unknowns, found {unknowns:?}")]
    UnknownCount {
        equations: usize,
        unknowns: Vec<String>,
    },
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
    #[error("the system has no unique solution (singular matrix)")]
    Singular,
    #[error("no convergence after {iterations} iterations")]
    NoConvergence { iterations: usize },
    #[error("the equations cannot be evaluated at the current point")]
    NonFinite,
    #[error("the equations contradict each other")]
    Inconsistent,
}

/// How the linear step `J dx = F` is solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LinearSysMethod {
    #[default]
    Lu,
    Inv,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub damping_factor: f64,
    /// starting value of every unknown
    pub initial_guess: f64,
    pub linear_sys_method: LinearSysMethod,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            tolerance: 1e-10,
            max_iterations: 100,
            damping_factor: 1.0,
            initial_guess: 1.0,
            linear_sys_method: LinearSysMethod::Lu,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), SolveError> {
        if !(self.tolerance >= 0.0) {
            return Err(SolveError::InvalidConfig(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolveError::InvalidConfig(
                "max_iterations must be positive".to_string(),
            ));
        }
        if !(self.damping_factor > 0.0 && self.damping_factor <= 1.0) {
            return Err(SolveError::InvalidConfig(format!(
                "damping_factor must be in (0, 1], got {}",
                self.damping_factor
            )));
        }
        if !self.initial_guess.is_finite() {
            return Err(SolveError::InvalidConfig(
                "initial_guess must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Unknown → value assignments, ordered by unknown name.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    assignments: Vec<(String, f64)>,
}

impl Solution {
    pub fn new(mut assignments: Vec<(String, f64)>) -> Self {
        assignments.sort_by(|a, b| a.0.cmp(&b.0));
        Solution { assignments }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.assignments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.assignments.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Unknowns of the system: every variable of every statement, sorted and deduplicated.
pub fn collect_unknowns(statements: &[Statement]) -> Vec<String> {
    let mut unknowns: Vec<String> = statements.iter().flat_map(|s| s.variables()).collect();
    unknowns.sort();
    unknowns.dedup();
    unknowns
}

/// Solves the equations as one system. With more equations than unknowns, every square
/// subset is tried in order and the first solution satisfying all equations is returned.
pub fn solve_equations(equations: &[&str], config: &SolverConfig) -> Result<Solution, SolveError> {
    config.validate()?;
    if equations.is_empty() {
        return Err(SolveError::EmptySystem);
    }
    let statements = Expr::parse_vector_statement(equations)?;
    let unknowns = collect_unknowns(&statements);
    if unknowns.is_empty() || unknowns.len() > statements.len() {
        return Err(SolveError::UnknownCount {
            equations: statements.len(),
            unknowns,
        });
    }
    let residuals: Vec<Expr> = statements.iter().map(|s| s.residual()).collect();
    let values = if unknowns.len() == residuals.len() {
        solve_square(&residuals, &unknowns, config)?
    } else {
        debug!("system {:?} has more equations than unknowns", equations);
        solve_overdetermined(&residuals, &unknowns, config)?
    };

    if values.iter().any(|v| !v.is_finite()) {
        return Err(SolveError::NonFinite);
    }
    let solution = Solution::new(unknowns.into_iter().zip(values.iter().copied()).collect());
    info!("solved {:?}: {:?}", equations, solution.assignments);
    Ok(solution)
}

fn solve_square(
    residuals: &[Expr],
    unknowns: &[String],
    config: &SolverConfig,
) -> Result<DVector<f64>, SolveError> {
    let args: Vec<&str> = unknowns.iter().map(|s| s.as_str()).collect();
    let mut jacobian = Jacobian::new();
    jacobian.set_vector_of_functions(residuals.to_vec());
    jacobian.set_variables(args.clone());
    jacobian.calc_jacobian();

    if jacobian.is_linear() {
        debug!("system is linear, solving directly");
        return solve_linear(&mut jacobian, &args, config);
    }
    debug!("system is nonlinear, using Newton-Raphson");
    let uniform = vec![config.initial_guess; unknowns.len()];
    match newton_raphson(residuals, unknowns, uniform, config) {
        Err(SolveError::Singular | SolveError::NoConvergence { .. } | SolveError::NonFinite)
            if unknowns.len() > 1 =>
        {
            let staggered = staggered_guess(config.initial_guess, unknowns.len());
            warn!("uniform start failed, restarting from {:?}", staggered);
            newton_raphson(residuals, unknowns, staggered, config)
        }
        other => other,
    }
}

/// `initial_guess + 0.1 k` for the k-th unknown
fn staggered_guess(initial_guess: f64, n: usize) -> Vec<f64> {
    (0..n).map(|k| initial_guess + 0.1 * k as f64).collect()
}

fn newton_raphson(
    residuals: &[Expr],
    unknowns: &[String],
    initial_guess: Vec<f64>,
    config: &SolverConfig,
) -> Result<DVector<f64>, SolveError> {
    let mut solver = NR::new();
    solver.set_equation_system(
        residuals.to_vec(),
        Some(unknowns.to_vec()),
        initial_guess,
        config.tolerance,
        config.max_iterations,
    )?;
    solver.set_solver_params(Some(config.linear_sys_method), Some(config.damping_factor))?;
    solver.solve()
}

/// residuals below this (relative to the solution size) count as satisfied
const CONSISTENCY_TOLERANCE: f64 = 1e-9;

fn solve_overdetermined(
    residuals: &[Expr],
    unknowns: &[String],
    config: &SolverConfig,
) -> Result<DVector<f64>, SolveError> {
    let args: Vec<&str> = unknowns.iter().map(|s| s.as_str()).collect();
    let mut last_error = SolveError::Inconsistent;
    for subset in (0..residuals.len()).combinations(unknowns.len()) {
        let chosen: Vec<Expr> = subset.iter().map(|&i| residuals[i].clone()).collect();
        let values = match solve_square(&chosen, unknowns, config) {
            Ok(values) => values,
            Err(err) => {
                debug!("equations {:?} give no solution: {}", subset, err);
                last_error = err;
                continue;
            }
        };
        let threshold = CONSISTENCY_TOLERANCE.max(config.tolerance) * (1.0 + values.amax());
        let consistent = residuals.iter().all(|r| {
            matches!(r.eval_expression(&args, values.as_slice()), Ok(v) if v.abs() <= threshold)
        });
        if consistent {
            return Ok(values);
        }
        last_error = SolveError::Inconsistent;
    }
    Err(last_error)
}

/// F(x) = J x + F(0) for a linear system, so x = J \ (-F(0)).
fn solve_linear(
    jacobian: &mut Jacobian,
    args: &[&str],
    config: &SolverConfig,
) -> Result<DVector<f64>, SolveError> {
    jacobian.jacobian_generate(args.to_vec())?;
    jacobian.lambdify_funcvector(args.to_vec())?;
    let origin = vec![0.0; args.len()];
    let a = jacobian.evaluate_func_jacobian_DMatrix_unmut(&origin);
    let f0 = jacobian.evaluate_funvector_lambdified_DVector_unmut(&origin);
    if a.iter().chain(f0.iter()).any(|v| !v.is_finite()) {
        return Err(SolveError::NonFinite);
    }
    NR::solve_linear_system(config.linear_sys_method, &a, &(-f0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::str::FromStr;

    #[test]
    fn test_linear_pair() {
        let solution = solve_equations(&["x+y=2", "x-y=0"], &SolverConfig::default()).unwrap();
        assert_eq!(solution.get("x"), Some(1.0));
        assert_eq!(solution.get("y"), Some(1.0));
        let names: Vec<&str> = solution.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_linear_pair_with_fractions() {
        let solution = solve_equations(&["2x + 3y = 7", "x - 4y = -2"], &SolverConfig::default())
            .unwrap();
        assert_relative_eq!(solution.get("x").unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(solution.get("y").unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_nonlinear_pair() {
        let solution = solve_equations(&["x^2 + y^2 = 10", "x - y = 4"], &SolverConfig::default())
            .unwrap();
        assert_relative_eq!(solution.get("x").unwrap(), 3.0, epsilon = 1e-8);
        assert_relative_eq!(solution.get("y").unwrap(), -1.0, epsilon = 1e-8);
    }

    #[test]
    fn test_singular_and_inconsistent_systems() {
        let config = SolverConfig::default();
        assert_eq!(
            solve_equations(&["x+y=2", "2x+2y=4"], &config),
            Err(SolveError::Singular)
        );
        assert_eq!(
            solve_equations(&["x+y=2", "x+y=3"], &config),
            Err(SolveError::Singular)
        );
    }

    #[test]
    fn test_unknown_count_mismatch() {
        let config = SolverConfig::default();
        assert!(matches!(
            solve_equations(&["x+z=1", "y=2"], &config),
            Err(SolveError::UnknownCount { equations: 2, .. })
        ));
        assert!(matches!(
            solve_equations(&["1 = 1", "2 = 2"], &config),
            Err(SolveError::UnknownCount { .. })
        ));
    }

    #[test]
    fn test_more_equations_than_unknowns() {
        let config = SolverConfig::default();
        let solution = solve_equations(&["x = 2", "2x = 4"], &config).unwrap();
        assert_eq!(solution.len(), 1);
        assert_relative_eq!(solution.get("x").unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(
            solve_equations(&["x = 1", "x = 2"], &config),
            Err(SolveError::Inconsistent)
        );
    }

    #[test]
    fn test_symmetric_nonlinear_pair_restarts() {
        // the Jacobian is [[1, 1], [1, 1]] at the uniform start (1, 1)
        let solution = solve_equations(&["x*y = 6", "x + y = 5"], &SolverConfig::default())
            .unwrap();
        let x = solution.get("x").unwrap();
        let y = solution.get("y").unwrap();
        assert_relative_eq!(x * y, 6.0, epsilon = 1e-8);
        assert_relative_eq!(x + y, 5.0, epsilon = 1e-8);
        assert!((x - 3.0).abs() < 1e-8 || (x - 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_staggered_guess() {
        assert_eq!(staggered_guess(1.0, 1), vec![1.0]);
        let guess = staggered_guess(1.0, 3);
        assert_relative_eq!(guess[1], 1.1, epsilon = 1e-15);
        assert_relative_eq!(guess[2], 1.2, epsilon = 1e-15);
    }

    #[test]
    fn test_parse_error_is_propagated() {
        assert!(matches!(
            solve_equations(&["x+=2", "y=1"], &SolverConfig::default()),
            Err(SolveError::Parse(_))
        ));
    }

    #[test]
    fn test_config_validation() {
        let config = SolverConfig {
            damping_factor: 0.0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            solve_equations(&["x+y=2", "x-y=0"], &config),
            Err(SolveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_linear_sys_method_from_str() {
        assert_eq!(LinearSysMethod::from_str("lu").unwrap(), LinearSysMethod::Lu);
        assert_eq!(LinearSysMethod::from_str("INV").unwrap(), LinearSysMethod::Inv);
        assert!(LinearSysMethod::from_str("qr").is_err());
        assert_eq!(LinearSysMethod::Inv.to_string(), "inv");
    }
}
