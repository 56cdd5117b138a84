// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! The calculator state as one owned snapshot. Every user action is an [`Event`];
//! [`Session::apply`] returns the next snapshot and leaves the current one untouched.
//!
//! ```
//! use RustedExprCalc::calculator::session::{Event, Session};
//! let session = Session::new();
//! let first = session.store().id_at(0).unwrap().clone();
//! let session = session.apply(Event::Edit(first, "x + y = 2".to_string()));
//! let session = session.apply(Event::Add);
//! let second = session.store().id_at(1).unwrap().clone();
//! let session = session.apply(Event::Edit(second, "x - y = 0".to_string()));
//! assert_eq!(session.results().iter().next().unwrap().solution, "x = 1,y = 1");
//! ```

use crate::Utils::task_parser::SessionTask;
use crate::calculator::emptiness::Blank;
use crate::calculator::pairs::{is_more_than_two, pair_combinations, solvable_candidates};
use crate::calculator::solver_adapter::{MissingValues, PairOutcome, solve_pair};
use crate::calculator::store::{EntryId, ExpressionStore, StoreError};
use crate::calculator::validator::{Validity, claim_missing_variables, missing_variables, validate};
use crate::numerical::equation_system::SolverConfig;
use log::{debug, info, warn};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// the "Add Expression" button
    Add,
    /// Enter pressed inside an entry; appends a new entry like `Add`
    Enter(EntryId),
    Edit(EntryId, String),
    Delete(EntryId),
    /// a value typed for a missing variable
    SetValue(String, String),
    Reset,
}

/// One solved pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairResult {
    pub first: EntryId,
    pub second: EntryId,
    pub solution: String,
}

impl PairResult {
    /// both ids joined by ","
    pub fn key(&self) -> String {
        format!("{},{}", self.first, self.second)
    }
}

/// csv columns of [`Session::result_rows`]
pub const RESULT_HEADERS: [&str; 4] = ["pair", "first", "second", "solution"];

/// Solved pairs in pair order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    results: Vec<PairResult>,
}

impl ResultSet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.key() == key)
            .map(|r| r.solution.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PairResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl Blank for ResultSet {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

/// Solves every pair of solvable candidates. Pairs that fail are logged and left out.
pub fn derive_results(
    store: &ExpressionStore,
    values: &MissingValues,
    config: &SolverConfig,
) -> ResultSet {
    let candidates = solvable_candidates(store);
    let mut results = Vec::new();
    if candidates.len() < 2 {
        return ResultSet { results };
    }
    for (first, second) in pair_combinations(&candidates) {
        match solve_pair(&first.text, &second.text, values, config) {
            PairOutcome::Solved(solution) => {
                debug!("pair {},{} solved: {}", first.id, second.id, solution);
                results.push(PairResult {
                    first: first.id.clone(),
                    second: second.id.clone(),
                    solution,
                });
            }
            PairOutcome::Unsolved(reason) => {
                warn!(
                    "skipping pair '{}' and '{}': {}",
                    first.text, second.text, reason
                );
            }
        }
    }
    ResultSet { results }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    store: ExpressionStore,
    validity: HashMap<EntryId, Validity>,
    missing_variables: HashMap<EntryId, Vec<String>>,
    missing_values: MissingValues,
    results: ResultSet,
    more_than_two: bool,
    config: SolverConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Session {
            store: ExpressionStore::new(),
            validity: HashMap::new(),
            missing_variables: HashMap::new(),
            missing_values: MissingValues::new(),
            results: ResultSet::default(),
            more_than_two: false,
            config,
        }
    }

    /// Replays a session file: its expressions fill the entries in order, then its values
    /// are set.
    pub fn from_task(task: &SessionTask) -> Self {
        let mut session = Session::with_config(task.solver.clone());
        for (index, (label, text)) in task.expressions.iter().enumerate() {
            if index > 0 {
                session = session.apply(Event::Add);
            }
            let id = session.store.ids()[index].clone();
            debug!("expression '{}' -> entry {}", label, id);
            session = session.apply(Event::Edit(id, text.clone()));
        }
        for (name, value) in &task.values {
            session = session.apply(Event::SetValue(name.clone(), value.clone()));
        }
        session
    }

    /// Next snapshot. Events naming an unknown entry are logged and change nothing.
    pub fn apply(&self, event: Event) -> Session {
        match self.try_apply(event) {
            Ok(next) => next,
            Err(err) => {
                warn!("event ignored: {}", err);
                self.clone()
            }
        }
    }

    pub fn try_apply(&self, event: Event) -> Result<Session, StoreError> {
        let mut next = self.clone();
        match event {
            Event::Add => {
                let id = next.store.add();
                info!("entry {} added", id);
            }
            Event::Enter(id) => {
                if !next.store.contains(&id) {
                    return Err(StoreError::NotFound(id));
                }
                let new_id = next.store.add();
                info!("entry {} added after {}", new_id, id);
            }
            Event::Edit(id, text) => {
                next.store.update(&id, &text)?;
                next.edit_entry(id, &text);
                next.recompute_missing_variables();
            }
            Event::Delete(id) => {
                if let Some(fresh) = next.store.delete(&id)? {
                    debug!("store emptied, fresh entry {}", fresh);
                }
                next.validity.remove(&id);
                next.recompute_missing_variables();
                info!("entry {} deleted", id);
            }
            Event::SetValue(name, value) => {
                info!("missing variable {} = '{}'", name, value);
                next.missing_values.set(&name, &value);
            }
            Event::Reset => {
                info!("session reset");
                return Ok(Session::with_config(self.config.clone()));
            }
        }
        next.refresh_results();
        Ok(next)
    }

    fn edit_entry(&mut self, id: EntryId, text: &str) {
        let validity = validate(text);
        if let Validity::Invalid(err) = &validity {
            debug!("entry {} does not parse: {}", id, err);
        }
        self.validity.insert(id, validity);
    }

    /// Rebuilds every missing-variable list in store order; the first entry using a name
    /// claims it.
    fn recompute_missing_variables(&mut self) {
        let mut lists: HashMap<EntryId, Vec<String>> = HashMap::new();
        for entry in self.store.iter() {
            let found = missing_variables(&entry.text).unwrap_or_else(|err| {
                warn!("cannot read variables of '{}': {}", entry.text, err);
                Vec::new()
            });
            let claimed = claim_missing_variables(&entry.id, found, &lists);
            lists.insert(entry.id.clone(), claimed);
        }
        self.missing_variables = lists;
    }

    fn refresh_results(&mut self) {
        let candidates = solvable_candidates(&self.store).len();
        self.more_than_two = is_more_than_two(candidates);
        self.results = derive_results(&self.store, &self.missing_values, &self.config);
        info!(
            "{} candidates, {} pairs solved",
            candidates,
            self.results.len()
        );
    }

    pub fn store(&self) -> &ExpressionStore {
        &self.store
    }

    pub fn validity(&self, id: &EntryId) -> Option<&Validity> {
        self.validity.get(id)
    }

    pub fn is_invalid(&self, id: &EntryId) -> bool {
        self.validity.get(id).is_some_and(Validity::is_invalid)
    }

    pub fn validity_count(&self) -> usize {
        self.validity.len()
    }

    /// Missing variables claimed by one entry.
    pub fn missing_variables(&self, id: &EntryId) -> &[String] {
        self.missing_variables
            .get(id)
            .map(|names| names.as_slice())
            .unwrap_or(&[])
    }

    /// Whether some entry lists `name` as missing.
    pub fn is_missing_variable(&self, name: &str) -> bool {
        self.missing_variables
            .values()
            .any(|names| names.iter().any(|n| n == name))
    }

    pub fn has_missing_variables(&self) -> bool {
        self.missing_variables.values().any(|names| !names.is_empty())
    }

    pub fn missing_values(&self) -> &MissingValues {
        &self.missing_values
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn is_more_than_two(&self) -> bool {
        self.more_than_two
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Reset is offered only once there is something to clear in the results.
    pub fn can_reset(&self) -> bool {
        !self.results.is_blank()
    }

    /// Rows for csv export: pair key, both texts and the solution.
    pub fn result_rows(&self) -> Vec<Vec<String>> {
        self.results
            .iter()
            .map(|r| {
                vec![
                    r.key(),
                    self.store.get(&r.first).unwrap_or_default().to_string(),
                    self.store.get(&r.second).unwrap_or_default().to_string(),
                    r.solution.clone(),
                ]
            })
            .collect()
    }
}
