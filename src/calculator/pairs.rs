// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
use crate::calculator::store::{Entry, ExpressionStore};
use itertools::Itertools;

/// Non-empty text mentioning `x` or `y` anywhere.
pub fn is_solvable_candidate(text: &str) -> bool {
    !text.is_empty() && (text.contains('x') || text.contains('y'))
}

pub fn solvable_candidates(store: &ExpressionStore) -> Vec<&Entry> {
    store
        .iter()
        .filter(|entry| is_solvable_candidate(&entry.text))
        .collect()
}

/// Every unordered pair `(items[i], items[j])` with `i < j`.
pub fn pair_combinations<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    items.iter().cloned().tuple_combinations().collect()
}

pub fn is_more_than_two(candidates: usize) -> bool {
    candidates > 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates() {
        assert!(is_solvable_candidate("x + 1"));
        assert!(is_solvable_candidate("y"));
        // substring match, no word boundaries
        assert!(is_solvable_candidate("exp(2) = 1"));
        assert!(!is_solvable_candidate(""));
        assert!(!is_solvable_candidate("a + b = 2"));
    }

    #[test]
    fn test_solvable_candidates_keep_store_order() {
        let mut store = ExpressionStore::new();
        let first = store.id_at(0).unwrap().clone();
        let second = store.add();
        let third = store.add();
        store.update(&first, "x = 1").unwrap();
        store.update(&second, "a = 2").unwrap();
        store.update(&third, "y = 3").unwrap();
        let ids: Vec<_> = solvable_candidates(&store)
            .iter()
            .map(|e| e.id.clone())
            .collect();
        assert_eq!(ids, vec![first, third]);
    }

    #[test]
    fn test_pair_combinations() {
        assert_eq!(
            pair_combinations(&["a", "b", "c"]),
            vec![("a", "b"), ("a", "c"), ("b", "c")]
        );
        assert!(pair_combinations(&["a"]).is_empty());
        assert!(pair_combinations::<u8>(&[]).is_empty());
        for n in 0..7usize {
            let items: Vec<usize> = (0..n).collect();
            assert_eq!(pair_combinations(&items).len(), n * n.saturating_sub(1) / 2);
        }
    }

    #[test]
    fn test_more_than_two() {
        assert!(!is_more_than_two(2));
        assert!(is_more_than_two(3));
    }
}
