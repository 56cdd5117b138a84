// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#[cfg(test)]
mod tests {
    use crate::Utils::logger::LogLevel;
    use crate::Utils::task_parser::{TaskError, load_session, parse_session};
    use crate::numerical::equation_system::{LinearSysMethod, SolveError, SolverConfig};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const FULL_SESSION: &str = "
# solve two lines
expressions
  first: x + y = 2
  second: x - y = 0
  third:
values
  a: 3
  b: -0.5
solver
  tolerance: 1e-8
  max_iterations: 50
  damping_factor: 0.9
  initial_guess: 2
  linear_sys_method: inv
logging
  loglevel: debug
  log_file: calc.log
";

    #[test]
    fn test_full_session() {
        let task = parse_session(FULL_SESSION).unwrap();
        assert_eq!(
            task.expressions,
            vec![
                ("first".to_string(), "x + y = 2".to_string()),
                ("second".to_string(), "x - y = 0".to_string()),
                ("third".to_string(), "".to_string()),
            ]
        );
        assert_eq!(
            task.values,
            vec![
                ("a".to_string(), "3".to_string()),
                ("b".to_string(), "-0.5".to_string())
            ]
        );
        assert_eq!(
            task.solver,
            SolverConfig {
                tolerance: 1e-8,
                max_iterations: 50,
                damping_factor: 0.9,
                initial_guess: 2.0,
                linear_sys_method: LinearSysMethod::Inv,
            }
        );
        assert_eq!(task.loglevel, Some(LogLevel::Debug));
        assert_eq!(task.log_file, Some(PathBuf::from("calc.log")));
    }

    #[test]
    fn test_defaults_when_sections_are_missing() {
        let task = parse_session("expressions\n  a: x = 1\n").unwrap();
        assert_eq!(task.solver, SolverConfig::default());
        assert!(task.values.is_empty());
        assert_eq!(task.loglevel, None);
        assert_eq!(task.log_file, None);
    }

    #[test]
    fn test_empty_document() {
        let task = parse_session("# nothing here\n\n").unwrap();
        assert!(task.expressions.is_empty());
    }

    #[test]
    fn test_unknown_section_and_key() {
        assert!(matches!(
            parse_session("plots\n  width: 3"),
            Err(TaskError::UnknownSection(title)) if title == "plots"
        ));
        assert!(matches!(
            parse_session("solver\n  method: lu"),
            Err(TaskError::UnknownKey { section, key }) if section == "solver" && key == "method"
        ));
        assert!(matches!(
            parse_session("logging\n  colour: red"),
            Err(TaskError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_duplicate_section() {
        assert!(matches!(
            parse_session("values\n  a: 1\nvalues\n  b: 2"),
            Err(TaskError::DuplicateSection(_))
        ));
    }

    #[test]
    fn test_malformed_values() {
        assert!(matches!(
            parse_session("values\n  a: three"),
            Err(TaskError::InvalidNumber { key, .. }) if key == "a"
        ));
        assert!(matches!(
            parse_session("solver\n  max_iterations: 1.5"),
            Err(TaskError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_session("solver\n  linear_sys_method: qr"),
            Err(TaskError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_session("logging\n  loglevel: loud"),
            Err(TaskError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_invalid_solver_config() {
        assert!(matches!(
            parse_session("solver\n  damping_factor: 2.0"),
            Err(TaskError::Solver(SolveError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = parse_session("expressions\n  a: x\n  not a pair\n").unwrap_err();
        match err {
            TaskError::Syntax { line, text } => {
                assert_eq!(line, 3);
                assert_eq!(text, "not a pair");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_load_session_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", FULL_SESSION).unwrap();
        let task = load_session(file.path()).unwrap();
        assert_eq!(task.expressions.len(), 3);
        assert_eq!(task.solver.linear_sys_method, LinearSysMethod::Inv);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.session");
        assert!(matches!(load_session(&path), Err(TaskError::Io(_))));
    }
}
