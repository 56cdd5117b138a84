// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Turns two entry texts into a solved 2x2 system: textual substitution of the values the
//! user typed, removal of leftover letters, solving and formatting.
//!
//! Both text steps work on raw characters. A value for `a` also rewrites the `a` inside
//! `tan`, and the letter strip keeps `x`, `y`, `z` and every capital but `Z`.

use crate::calculator::emptiness::Blank;
use crate::numerical::equation_system::{Solution, SolveError, SolverConfig, solve_equations};
use regex::{Captures, Regex};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    #[error("cannot build substitution pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Values typed for missing variables, name → numeric text, in the order first entered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MissingValues {
    values: Vec<(String, String)>,
}

impl MissingValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the value of a known name in place, appends otherwise.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.values.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Blank for MissingValues {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    Solved(String),
    Unsolved(AdapterError),
}

/// Replaces every occurrence of any known name with its value. Earlier names win where
/// several match at the same position.
pub fn substitute_missing_values(text: &str, values: &MissingValues) -> Result<String, AdapterError> {
    if values.is_blank() {
        return Ok(text.to_string());
    }
    let pattern = values.names().map(regex::escape).collect::<Vec<_>>().join("|");
    let re = Regex::new(&pattern)?;
    let replaced = re.replace_all(text, |caps: &Captures| {
        values.get(&caps[0]).unwrap_or(&caps[0]).to_string()
    });
    Ok(replaced.into_owned())
}

/// Drops every character in `a..=w` and `Z`.
pub fn strip_stray_letters(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, 'a'..='w' | 'Z'))
        .collect()
}

fn format_value(value: f64) -> String {
    let scaled = value * 1e10;
    // the scaling overflows beyond about 1e298
    let rounded = if scaled.is_finite() {
        scaled.round() / 1e10
    } else {
        value
    };
    if rounded == 0.0 {
        // no "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// `name = value` pairs joined by ",", ordered by name.
pub fn format_solution(solution: &Solution) -> String {
    solution
        .iter()
        .map(|(name, value)| format!("{} = {}", name, format_value(value)))
        .collect::<Vec<_>>()
        .join(",")
}

fn try_solve_pair(
    first: &str,
    second: &str,
    values: &MissingValues,
    config: &SolverConfig,
) -> Result<String, AdapterError> {
    let first = strip_stray_letters(&substitute_missing_values(first, values)?);
    let second = strip_stray_letters(&substitute_missing_values(second, values)?);
    let solution = solve_equations(&[first.as_str(), second.as_str()], config)?;
    Ok(format_solution(&solution))
}

/// Solves two entry texts together.
pub fn solve_pair(
    first: &str,
    second: &str,
    values: &MissingValues,
    config: &SolverConfig,
) -> PairOutcome {
    match try_solve_pair(first, second, values, config) {
        Ok(formatted) => PairOutcome::Solved(formatted),
        Err(err) => PairOutcome::Unsolved(err),
    }
}
