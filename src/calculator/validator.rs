// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Parse check of one expression and extraction of the variables the user has to supply.

use crate::calculator::emptiness::is_blank;
use crate::calculator::store::EntryId;
use crate::symbolic::parse_expr::ParseError;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::interleave_spaces;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Validity {
    Valid,
    Invalid(ParseError),
}

impl Validity {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Validity::Invalid(_))
    }
}

/// Blank text counts as valid.
pub fn validate(text: &str) -> Validity {
    if is_blank(text) {
        return Validity::Valid;
    }
    match Expr::parse_statement(text) {
        Ok(_) => Validity::Valid,
        Err(err) => Validity::Invalid(err),
    }
}

pub fn is_valid(text: &str) -> bool {
    !validate(text).is_invalid()
}

fn is_axis_name(name: &str) -> bool {
    name.contains('x') || name.contains('y')
}

/// Variables of `text` other than the solving axes. Every character is read as its own
/// token, so "ab" yields both `a` and `b`. Invalid or blank text has none; a failure of the
/// per-character reading is returned to the caller.
pub fn missing_variables(text: &str) -> Result<Vec<String>, ParseError> {
    if is_blank(text) || !is_valid(text) {
        return Ok(Vec::new());
    }
    let spaced = interleave_spaces(text);
    let statement = Expr::parse_statement(&spaced)?;
    Ok(statement
        .variables()
        .into_iter()
        .filter(|name| !is_axis_name(name))
        .collect())
}

/// Keeps the names of `found` that no other entry has claimed yet. The previous list of
/// `id` itself does not count as a claim.
pub fn claim_missing_variables(
    id: &EntryId,
    found: Vec<String>,
    claimed: &HashMap<EntryId, Vec<String>>,
) -> Vec<String> {
    found
        .into_iter()
        .filter(|name| {
            !claimed
                .iter()
                .any(|(owner, names)| owner != id && names.contains(name))
        })
        .collect()
}
