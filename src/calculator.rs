// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
/// one predicate telling whether a value holds anything of interest
pub mod emptiness;
/// insertion-ordered expressions keyed by generated ids
pub mod store;
/// parse check and missing-variable extraction
pub mod validator;
/// solvable candidates and their unordered pairs
pub mod pairs;
///____________________________________________________________________________________________________________________________
/// # Solver adapter
/// substitutes the typed values, strips leftover letters and solves a pair of expressions
///# Example
/// ```
/// use RustedExprCalc::calculator::solver_adapter::{MissingValues, PairOutcome, solve_pair};
/// use RustedExprCalc::numerical::equation_system::SolverConfig;
/// let mut values = MissingValues::new();
/// values.set("a", "4");
/// let outcome = solve_pair("x + y = a", "x - y = 2", &values, &SolverConfig::default());
/// assert_eq!(outcome, PairOutcome::Solved("x = 3,y = 1".to_string()));
/// ```
pub mod solver_adapter;
/// the state snapshot and the events that advance it
pub mod session;
/// text form of a snapshot
pub mod render;
