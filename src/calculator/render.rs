// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Text rendering of a session snapshot: one block per expression, the button states and
//! the results panel.

use crate::calculator::session::Session;
use crate::calculator::solver_adapter::MissingValues;
use crate::calculator::store::EntryId;
use crate::symbolic::latex::typeset;
use tabled::{builder::Builder, settings::Style};

pub const MORE_THAN_TWO_MESSAGE: &str =
    "More than two equations detected showing all possible solutions";
/// shown in a missing-variable input that has not been filled in
pub const DEFAULT_MISSING_VALUE: &str = "1";

/// What one expression row shows.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// 1-based label number
    pub number: usize,
    pub id: EntryId,
    pub text: String,
    pub preview: String,
    pub invalid: bool,
    /// name and the value shown in its input
    pub inputs: Vec<(String, String)>,
}

/// The value displayed for a missing variable. The default is display only and never
/// reaches the solver.
pub fn missing_input_value(values: &MissingValues, name: &str) -> String {
    values.get(name).unwrap_or(DEFAULT_MISSING_VALUE).to_string()
}

pub fn expression_rows(session: &Session) -> Vec<RowView> {
    session
        .store()
        .iter()
        .enumerate()
        .map(|(index, entry)| RowView {
            number: index + 1,
            id: entry.id.clone(),
            text: entry.text.clone(),
            preview: typeset(&entry.text),
            invalid: session.is_invalid(&entry.id),
            inputs: session
                .missing_variables(&entry.id)
                .iter()
                .map(|name| (name.clone(), missing_input_value(session.missing_values(), name)))
                .collect(),
        })
        .collect()
}

/// Results panel as a table, `None` while nothing is solved.
pub fn results_table(session: &Session) -> Option<String> {
    if session.results().is_empty() {
        return None;
    }
    let mut builder = Builder::default();
    builder.push_record(["equations", "solution"]);
    for result in session.results().iter() {
        let first = session.store().get(&result.first).unwrap_or_default();
        let second = session.store().get(&result.second).unwrap_or_default();
        builder.push_record([
            format!("`{}` and `{}`", first, second),
            result.solution.clone(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    Some(table.to_string())
}

fn render_row(row: &RowView) -> String {
    let mut out = format!("Expression {}\n", row.number);
    out.push_str(&format!("  > {}\n", row.text));
    if !row.preview.is_empty() {
        out.push_str(&format!("    {}\n", row.preview));
    }
    for (name, value) in &row.inputs {
        out.push_str(&format!("    {} = [{}]\n", name, value));
    }
    out
}

/// The whole form.
pub fn render_form(session: &Session) -> String {
    let mut out = String::new();
    for row in expression_rows(session) {
        out.push_str(&render_row(&row));
    }
    let reset = if session.can_reset() {
        "[Reset]"
    } else {
        "[Reset (disabled)]"
    };
    out.push_str(&format!("\n[Add Expression] {}\n", reset));
    if let Some(table) = results_table(session) {
        out.push_str("\nResults\n");
        if session.is_more_than_two() {
            out.push_str(MORE_THAN_TWO_MESSAGE);
            out.push('\n');
        }
        out.push_str(&table);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::session::Event;
    use crate::symbolic::latex::INVALID_EXPRESSION;

    fn session_with(texts: &[&str]) -> Session {
        let mut session = Session::new();
        for (index, text) in texts.iter().enumerate() {
            if index > 0 {
                session = session.apply(Event::Add);
            }
            let id = session.store().id_at(index).unwrap().clone();
            session = session.apply(Event::Edit(id, text.to_string()));
        }
        session
    }

    #[test]
    fn test_default_missing_value_is_shown() {
        let session = session_with(&["a x + y = 2"]);
        let rows = expression_rows(&session);
        assert_eq!(rows[0].inputs, vec![("a".to_string(), "1".to_string())]);
        let session = session.apply(Event::SetValue("a".to_string(), "4".to_string()));
        let rows = expression_rows(&session);
        assert_eq!(rows[0].inputs, vec![("a".to_string(), "4".to_string())]);
    }

    #[test]
    fn test_rows_show_preview_and_validity() {
        let session = session_with(&["x + y = 2", "x +"]);
        let rows = expression_rows(&session);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].preview, "x + y = 2");
        assert!(!rows[0].invalid);
        assert_eq!(rows[1].preview, INVALID_EXPRESSION);
        assert!(rows[1].invalid);
    }

    #[test]
    fn test_empty_form() {
        let out = render_form(&Session::new());
        assert!(out.starts_with("Expression 1\n"));
        assert!(out.contains("[Reset (disabled)]"));
        assert!(!out.contains("Results"));
        assert!(results_table(&Session::new()).is_none());
    }

    #[test]
    fn test_results_panel() {
        let session = session_with(&["x+y=2", "x-y=0"]);
        let out = render_form(&session);
        assert!(out.contains("[Reset]"));
        assert!(out.contains("`x+y=2` and `x-y=0`"));
        assert!(out.contains("x = 1,y = 1"));
        assert!(!out.contains(MORE_THAN_TWO_MESSAGE));

        let session = session_with(&["x+y=2", "x-y=0", "x+2y=3"]);
        assert!(render_form(&session).contains(MORE_THAN_TWO_MESSAGE));
    }
}
