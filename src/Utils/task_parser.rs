// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! parse a session document: titled sections, each followed by `key: value` lines.
//!
//! ```text
//! # two lines solved together
//! expressions
//!   first: x + y = 2
//!   second: x - y = 0
//! values
//!   a: 3
//! solver
//!   tolerance: 1e-10
//!   max_iterations: 100
//!   damping_factor: 1.0
//!   initial_guess: 1.0
//!   linear_sys_method: lu
//! logging
//!   loglevel: info
//!   log_file: calc.log
//! ```
//! A value runs to the end of its line, so expressions keep their spaces and commas.
//! Lines starting with `#` or `//` are comments.

use crate::Utils::logger::LogLevel;
use crate::numerical::equation_system::{LinearSysMethod, SolveError, SolverConfig};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, line_ending, not_line_ending, space0},
    combinator::{eof, map, recognize},
    multi::{many0, many1},
    sequence::{pair, preceded, terminated},
};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("cannot read session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("syntax error at line {line}: '{text}'")]
    Syntax { line: usize, text: String },
    #[error("unknown section '{0}'")]
    UnknownSection(String),
    #[error("section '{0}' appears twice")]
    DuplicateSection(String),
    #[error("unknown key '{key}' in section '{section}'")]
    UnknownKey { section: String, key: String },
    #[error("'{key}' expects a number, got '{value}'")]
    InvalidNumber { key: String, value: String },
    #[error("'{key}' does not accept '{value}'")]
    InvalidValue { key: String, value: String },
    #[error(transparent)]
    Solver(#[from] SolveError),
}

/// One titled block of the document, entries in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub entries: Vec<(String, String)>,
}

/// Everything a session file can set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionTask {
    /// label → expression text, in file order
    pub expressions: Vec<(String, String)>,
    /// missing variable → numeric text, in file order
    pub values: Vec<(String, String)>,
    pub solver: SolverConfig,
    pub loglevel: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
}

/// Parses an identifier (letters, digits and underscores, not starting with a digit)
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

fn end_of_line(input: &str) -> IResult<&str, &str> {
    alt((line_ending, eof)).parse(input)
}

/// Parses a title: an identifier alone on its line
fn parse_title(input: &str) -> IResult<&str, String> {
    let mut parser = terminated(preceded(space0, parse_identifier), pair(space0, end_of_line));
    parser.parse(input)
}

/// Parses `key: value`, the value being the trimmed rest of the line (possibly empty)
fn parse_entry(input: &str) -> IResult<&str, (String, String)> {
    let (input, _) = space0(input)?;
    let (input, key) = parse_identifier(input)?;
    let (input, _) = (space0, tag(":"), space0).parse(input)?;
    let (input, value) = terminated(not_line_ending, end_of_line).parse(input)?;
    Ok((input, (key, value.trim().to_string())))
}

fn parse_section(input: &str) -> IResult<&str, Section> {
    let (input, title) = parse_title(input)?;
    let (input, entries) = many0(parse_entry).parse(input)?;
    Ok((input, Section { title, entries }))
}

/// Drops comment lines and blank lines
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with('#') && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the entire document into its sections
pub fn parse_document(input: &str) -> Result<Vec<Section>, TaskError> {
    let filtered = filter_comments(input);
    let result: IResult<&str, Vec<Section>> = many1(parse_section).parse(filtered.as_str());
    let (remaining, sections) = match result {
        Ok(parsed) => parsed,
        Err(_) => (filtered.as_str(), Vec::new()),
    };
    if !remaining.trim().is_empty() {
        let consumed = filtered.len() - remaining.len();
        let line = filtered[..consumed].matches('\n').count() + 1;
        let text = remaining.lines().next().unwrap_or_default().trim().to_string();
        return Err(TaskError::Syntax { line, text });
    }
    Ok(sections)
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, TaskError> {
    value.parse::<T>().map_err(|_| TaskError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn apply_solver_entry(config: &mut SolverConfig, key: &str, value: &str) -> Result<(), TaskError> {
    match key {
        "tolerance" => config.tolerance = parse_number(key, value)?,
        "max_iterations" => config.max_iterations = parse_number(key, value)?,
        "damping_factor" => config.damping_factor = parse_number(key, value)?,
        "initial_guess" => config.initial_guess = parse_number(key, value)?,
        "linear_sys_method" => {
            config.linear_sys_method =
                LinearSysMethod::from_str(value).map_err(|_| TaskError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?
        }
        _ => {
            return Err(TaskError::UnknownKey {
                section: "solver".to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

/// Parses a session document and checks every section and key.
pub fn parse_session(input: &str) -> Result<SessionTask, TaskError> {
    let sections = parse_document(input)?;
    let mut task = SessionTask::default();
    let mut seen: Vec<String> = Vec::new();
    for section in sections {
        if seen.contains(&section.title) {
            return Err(TaskError::DuplicateSection(section.title));
        }
        seen.push(section.title.clone());
        match section.title.as_str() {
            "expressions" => task.expressions = section.entries,
            "values" => {
                for (name, value) in section.entries {
                    parse_number::<f64>(&name, &value)?;
                    task.values.push((name, value));
                }
            }
            "solver" => {
                for (key, value) in &section.entries {
                    apply_solver_entry(&mut task.solver, key, value)?;
                }
            }
            "logging" => {
                for (key, value) in section.entries {
                    match key.as_str() {
                        "loglevel" => {
                            let level = LogLevel::from_str(&value).map_err(|_| {
                                TaskError::InvalidValue {
                                    key: key.clone(),
                                    value: value.clone(),
                                }
                            })?;
                            task.loglevel = Some(level);
                        }
                        "log_file" => task.log_file = Some(PathBuf::from(value)),
                        _ => {
                            return Err(TaskError::UnknownKey {
                                section: "logging".to_string(),
                                key,
                            });
                        }
                    }
                }
            }
            _ => return Err(TaskError::UnknownSection(section.title)),
        }
    }
    task.solver.validate()?;
    log::debug!(
        "session parsed: {} expressions, {} values",
        task.expressions.len(),
        task.values.len()
    );
    Ok(task)
}

/// Reads and parses a session file
pub fn load_session(path: &Path) -> Result<SessionTask, TaskError> {
    let content = fs::read_to_string(path)?;
    log::info!("loading session from {}", path.display());
    parse_session(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifier() {
        let (remaining, key) = parse_identifier("key_1: value").unwrap();
        assert_eq!(key, "key_1");
        assert_eq!(remaining, ": value");
        assert!(parse_identifier("1key").is_err());
    }

    #[test]
    fn test_parse_title() {
        let (remaining, title) = parse_title("expressions  \n  a: x").unwrap();
        assert_eq!(title, "expressions");
        assert_eq!(remaining, "  a: x");
        // a key line is not a title
        assert!(parse_title("a: x").is_err());
    }

    #[test]
    fn test_parse_entry_keeps_rest_of_line() {
        let (remaining, (key, value)) = parse_entry("  first: x + y = 2, z  \nnext").unwrap();
        assert_eq!(key, "first");
        assert_eq!(value, "x + y = 2, z");
        assert_eq!(remaining, "next");
        let (_, (key, value)) = parse_entry("blank:").unwrap();
        assert_eq!((key.as_str(), value.as_str()), ("blank", ""));
    }

    #[test]
    fn test_parse_document_sections_in_order() {
        let doc = "expressions\n a: x\n b: y\nvalues\n c: 1";
        let sections = parse_document(doc).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "expressions");
        assert_eq!(
            sections[0].entries,
            vec![
                ("a".to_string(), "x".to_string()),
                ("b".to_string(), "y".to_string())
            ]
        );
        assert_eq!(sections[1].title, "values");
    }

    #[test]
    fn test_filter_comments() {
        let doc = "# comment\nexpressions\n\n// another\n a: x\n";
        assert_eq!(filter_comments(doc), "expressions\n a: x");
    }
}
