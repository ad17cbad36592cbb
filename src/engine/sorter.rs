//! Stable multi-key sorting
//!
//! Sorts matched records by the query's sort keys, in key order: later keys
//! only break ties left by earlier ones. The sort is stable, so records
//! with no distinguishing key preserve input order.
//!
//! Absent values (missing path or JSON null) sort after all present values
//! under both directions; only present-vs-present comparisons are reversed
//! for descending keys.

use std::cmp::Ordering;

use serde_json::Value;

use crate::matcher::Comparator;
use crate::path::PathResolver;
use crate::query::{SortDirection, SortKey};

/// Sorts record references by sort-key lists
pub struct Sorter;

impl Sorter {
    /// Stable multi-key sort in place. Empty key lists leave the input
    /// order untouched.
    pub fn sort(records: &mut [&Value], keys: &[SortKey]) {
        if keys.is_empty() {
            return;
        }
        records.sort_by(|a, b| Self::compare(a, b, keys));
    }

    fn compare(a: &Value, b: &Value, keys: &[SortKey]) -> Ordering {
        for key in keys {
            let av = present(PathResolver::resolve(a, &key.path));
            let bv = present(PathResolver::resolve(b, &key.path));
            let ordering = match (av, bv) {
                (None, None) => Ordering::Equal,
                // Absent sorts last regardless of direction
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(av), Some(bv)) => {
                    let ordering = Comparator::total(av, bv);
                    match key.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                }
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

/// Null values are treated as absent for sorting purposes
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorted<'a>(records: &'a [Value], keys: &[SortKey]) -> Vec<&'a Value> {
        let mut refs: Vec<&Value> = records.iter().collect();
        Sorter::sort(&mut refs, keys);
        refs
    }

    #[test]
    fn test_sort_ascending() {
        let records = vec![json!({ "age": 30 }), json!({ "age": 20 }), json!({ "age": 25 })];
        let result = sorted(&records, &[SortKey::asc("age")]);
        assert_eq!(result, vec![&records[1], &records[2], &records[0]]);
    }

    #[test]
    fn test_sort_descending() {
        let records = vec![json!({ "age": 30 }), json!({ "age": 20 }), json!({ "age": 25 })];
        let result = sorted(&records, &[SortKey::desc("age")]);
        assert_eq!(result, vec![&records[0], &records[2], &records[1]]);
    }

    #[test]
    fn test_sort_stable_on_ties() {
        let records = vec![
            json!({ "age": 25, "id": "a" }),
            json!({ "age": 25, "id": "b" }),
            json!({ "age": 25, "id": "c" }),
        ];
        let result = sorted(&records, &[SortKey::asc("age")]);
        assert_eq!(result, vec![&records[0], &records[1], &records[2]]);
    }

    #[test]
    fn test_multi_key_tie_break() {
        let records = vec![
            json!({ "dept": "eng", "age": 30 }),
            json!({ "dept": "ops", "age": 20 }),
            json!({ "dept": "eng", "age": 20 }),
        ];
        let keys = [SortKey::asc("dept"), SortKey::desc("age")];
        let result = sorted(&records, &keys);
        assert_eq!(result, vec![&records[0], &records[2], &records[1]]);
    }

    #[test]
    fn test_nulls_last_both_directions() {
        let records = vec![json!({ "n": 2 }), json!({ "n": null }), json!({ "n": 1 })];

        let desc = sorted(&records, &[SortKey::desc("n")]);
        assert_eq!(desc, vec![&records[0], &records[2], &records[1]]);

        let asc = sorted(&records, &[SortKey::asc("n")]);
        assert_eq!(asc, vec![&records[2], &records[0], &records[1]]);
    }

    #[test]
    fn test_missing_key_sorts_like_null() {
        let records = vec![json!({}), json!({ "n": 1 })];
        let result = sorted(&records, &[SortKey::asc("n")]);
        assert_eq!(result, vec![&records[1], &records[0]]);
    }

    #[test]
    fn test_sort_by_nested_path() {
        let records = vec![
            json!({ "user": { "name": "bob" } }),
            json!({ "user": { "name": "alice" } }),
        ];
        let result = sorted(&records, &[SortKey::asc("user.name")]);
        assert_eq!(result, vec![&records[1], &records[0]]);
    }

    #[test]
    fn test_datetime_sort_by_instant() {
        let records = vec![
            json!({ "at": "2024-06-01T14:00:00+02:00" }), // 12:00Z
            json!({ "at": "2024-06-01T11:00:00Z" }),
        ];
        let result = sorted(&records, &[SortKey::asc("at")]);
        assert_eq!(result, vec![&records[1], &records[0]]);
    }
}
