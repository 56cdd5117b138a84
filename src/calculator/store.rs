// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Insertion-ordered expressions keyed by generated ids. The store always holds at least
//! one entry.

use rand::Rng;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(String);

impl EntryId {
    /// base-36 epoch milliseconds followed by a base-36 random suffix
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let suffix: u64 = rand::rng().random();
        EntryId(format!("{}{}", to_base36(millis), to_base36(suffix)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        EntryId(id.to_string())
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: EntryId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no expression with id {0}")]
    NotFound(EntryId),
    #[error("no expression number {0}")]
    NoSuchPosition(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStore {
    entries: Vec<Entry>,
}

impl Default for ExpressionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionStore {
    /// A store with one empty entry.
    pub fn new() -> Self {
        let mut store = ExpressionStore {
            entries: Vec::new(),
        };
        store.add();
        store
    }

    fn fresh_id(&self) -> EntryId {
        loop {
            let id = EntryId::generate();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    /// Appends an empty entry and returns its id.
    pub fn add(&mut self) -> EntryId {
        let id = self.fresh_id();
        self.entries.push(Entry {
            id: id.clone(),
            text: String::new(),
        });
        id
    }

    pub fn update(&mut self, id: &EntryId, text: &str) -> Result<(), StoreError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        entry.text = text.to_string();
        Ok(())
    }

    /// Removes the entry. When it was the last one, a fresh empty entry takes its place
    /// and its id is returned.
    pub fn delete(&mut self, id: &EntryId) -> Result<Option<EntryId>, StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.entries.remove(index);
        if self.entries.is_empty() {
            return Ok(Some(self.add()));
        }
        Ok(None)
    }

    pub fn get(&self, id: &EntryId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.id == id)
            .map(|e| e.text.as_str())
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<EntryId> {
        self.entries.iter().map(|e| e.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Id of the entry at a zero-based position.
    pub fn id_at(&self, index: usize) -> Result<&EntryId, StoreError> {
        self.entries
            .get(index)
            .map(|e| &e.id)
            .ok_or(StoreError::NoSuchPosition(index))
    }

    pub fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_295), "zz");
    }

    #[test]
    fn test_new_store_has_one_empty_entry() {
        let store = ExpressionStore::new();
        assert_eq!(store.len(), 1);
        let entry = store.iter().next().unwrap();
        assert_eq!(entry.text, "");
        assert!(!entry.id.as_str().is_empty());
    }

    #[test]
    fn test_add_update_keeps_order() {
        let mut store = ExpressionStore::new();
        let first = store.id_at(0).unwrap().clone();
        let second = store.add();
        let third = store.add();
        assert_ne!(second, third);
        store.update(&second, "x + y = 2").unwrap();
        assert_eq!(store.ids(), vec![first, second.clone(), third.clone()]);
        assert_eq!(store.get(&second), Some("x + y = 2"));
        assert_eq!(store.position(&third), Some(2));
    }

    #[test]
    fn test_delete_last_entry_reinserts_fresh_one() {
        let mut store = ExpressionStore::new();
        let only = store.id_at(0).unwrap().clone();
        store.update(&only, "x = 1").unwrap();
        let fresh = store.delete(&only).unwrap().unwrap();
        assert_eq!(store.len(), 1);
        assert_ne!(fresh, only);
        assert_eq!(store.get(&fresh), Some(""));
    }

    #[test]
    fn test_delete_middle_entry() {
        let mut store = ExpressionStore::new();
        let second = store.add();
        let third = store.add();
        assert_eq!(store.delete(&second).unwrap(), None);
        assert_eq!(store.len(), 2);
        assert_eq!(store.id_at(1).unwrap(), &third);
    }

    #[test]
    fn test_unknown_ids() {
        let mut store = ExpressionStore::new();
        let ghost = EntryId::from("ghost");
        assert_eq!(
            store.update(&ghost, "x"),
            Err(StoreError::NotFound(ghost.clone()))
        );
        assert_eq!(store.delete(&ghost), Err(StoreError::NotFound(ghost.clone())));
        assert_eq!(store.get(&ghost), None);
        assert_eq!(store.id_at(5), Err(StoreError::NoSuchPosition(5)));
    }
}
