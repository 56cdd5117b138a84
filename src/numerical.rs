// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
///  Example#1
/// ```
/// use RustedExprCalc::numerical::equation_system::{LinearSysMethod, SolverConfig, solve_equations};
/// // the shortest way to solve a system of equations
/// let config = SolverConfig {
///     linear_sys_method: LinearSysMethod::Inv,
///     ..SolverConfig::default()
/// };
/// let solution = solve_equations(&["x^2 + y^2 = 10", "x - y = 4"], &config).unwrap();
/// for (name, value) in solution.iter() {
///     println!("{} = {}", name, value);
/// }
///  ```
/// Example#2
/// ```
/// // or more verbose way, with the Jacobian at the initial guess
/// use RustedExprCalc::symbolic::symbolic_functions::Jacobian;
/// let vec_of_expressions = vec!["x^2+y^2-10".to_string(), "x-y-4".to_string()];
/// let mut Jacobian_instance = Jacobian::new();
/// Jacobian_instance.set_funcvecor_from_str(vec_of_expressions).unwrap();
/// Jacobian_instance.set_variables(vec!["x", "y"]);
/// Jacobian_instance.calc_jacobian();
/// Jacobian_instance.jacobian_generate(vec!["x", "y"]).unwrap();
/// Jacobian_instance.lambdify_funcvector(vec!["x", "y"]).unwrap();
/// Jacobian_instance.readable_jacobian();
/// println!("Jacobian readable {:?}", Jacobian_instance.readable_jacobian);
/// let initial_guess = vec![1.0, 1.0];
/// Jacobian_instance.evaluate_func_jacobian_DMatrix(&initial_guess);
/// let guess_jacobian = Jacobian_instance.evaluated_jacobian_DMatrix.clone();
/// assert_eq!(guess_jacobian[(0, 0)], 2.0);
/// ```
#[allow(non_snake_case)]
pub mod NR;
/// string equations → residuals → linear or Newton-Raphson solve
pub mod equation_system;
