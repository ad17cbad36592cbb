//! Operator evaluation core
//!
//! Evaluates one resolved field value against a [`Condition`]. The value is
//! an `Option`: `None` means the path was not traversable in the record.
//!
//! Evaluation is total and pure. Operand-type mismatches are "no match",
//! never an error, and the operator set is a closed enum so every variant
//! is handled here exhaustively.

use serde_json::Value;

use crate::filter::FilterEvaluator;
use crate::query::{Condition, Operator};

use super::compare::Comparator;
use super::equality::deep_eq;
use super::regex_cache::RegexCache;

/// Evaluates conditions against resolved field values
pub struct OperatorMatcher;

impl OperatorMatcher {
    /// Checks whether a resolved value satisfies a condition.
    ///
    /// An operator map holds when every operator holds (implicit AND,
    /// short-circuiting on the first failure).
    pub fn matches(value: Option<&Value>, condition: &Condition) -> bool {
        match condition {
            Condition::Equals(expected) => Self::eq_match(value, expected),
            Condition::Ops(ops) => ops.iter().all(|op| Self::matches_op(value, op)),
        }
    }

    /// Checks a single operator against a resolved value.
    pub fn matches_op(value: Option<&Value>, op: &Operator) -> bool {
        match op {
            Operator::Eq(expected) => Self::eq_match(value, expected),
            Operator::Ne(expected) => !Self::eq_match(value, expected),
            Operator::Gt(bound) => Self::order_match(value, bound, |o| o.is_gt()),
            Operator::Gte(bound) => Self::order_match(value, bound, |o| o.is_ge()),
            Operator::Lt(bound) => Self::order_match(value, bound, |o| o.is_lt()),
            Operator::Lte(bound) => Self::order_match(value, bound, |o| o.is_le()),
            Operator::In(candidates) => Self::in_match(value, candidates),
            Operator::Nin(candidates) => !Self::in_match(value, candidates),
            Operator::Contains(needle) => Self::contains_match(value, needle),
            Operator::All(required) => Self::all_match(value, required),
            Operator::Size(expected) => Self::size_match(value, *expected),
            Operator::Exists(required) => value.is_some() == *required,
            Operator::StartsWith(prefix) => value
                .and_then(Value::as_str)
                .map(|s| s.to_lowercase().starts_with(&prefix.to_lowercase()))
                .unwrap_or(false),
            Operator::EndsWith(suffix) => value
                .and_then(Value::as_str)
                .map(|s| s.to_lowercase().ends_with(&suffix.to_lowercase()))
                .unwrap_or(false),
            Operator::Regex(pattern) => value
                .and_then(Value::as_str)
                .map(|text| RegexCache::is_match(pattern, text))
                .unwrap_or(false),
            Operator::Between(min, max) => Self::between_match(value, min, max),
            Operator::ElemMatch(filter) => value
                .and_then(Value::as_array)
                .map(|items| items.iter().any(|item| FilterEvaluator::matches(item, filter)))
                .unwrap_or(false),
            Operator::Field(key, condition) => {
                let nested = value.and_then(Value::as_object).and_then(|obj| obj.get(key));
                Self::matches(nested, condition)
            }
        }
    }

    /// Equality against an absent value only holds for an explicit null
    /// condition: `{ field: null }` matches records without the field.
    fn eq_match(value: Option<&Value>, expected: &Value) -> bool {
        value
            .map(|v| deep_eq(v, expected))
            .unwrap_or(expected.is_null())
    }

    /// Range operators demand a type-homogeneous pair; anything else is
    /// "no match".
    fn order_match(
        value: Option<&Value>,
        bound: &Value,
        accept: fn(std::cmp::Ordering) -> bool,
    ) -> bool {
        value
            .and_then(|v| Comparator::homogeneous(v, bound))
            .map(accept)
            .unwrap_or(false)
    }

    /// `$in`: the value deep-equals at least one candidate. Empty candidate
    /// lists match nothing (and so `$nin []` matches everything).
    fn in_match(value: Option<&Value>, candidates: &[Value]) -> bool {
        value
            .map(|v| candidates.iter().any(|candidate| deep_eq(v, candidate)))
            .unwrap_or(false)
    }

    /// `$contains`: case-insensitive substring for string values; for array
    /// values, any element matching the needle (substring when both are
    /// strings, deep equality otherwise).
    fn contains_match(value: Option<&Value>, needle: &Value) -> bool {
        match value {
            Some(Value::String(haystack)) => needle
                .as_str()
                .map(|n| contains_ci(haystack, n))
                .unwrap_or(false),
            Some(Value::Array(items)) => items.iter().any(|item| match (item, needle) {
                (Value::String(hay), Value::String(n)) => contains_ci(hay, n),
                _ => deep_eq(item, needle),
            }),
            _ => false,
        }
    }

    /// `$all`: every required element is deep-equality-present in the array
    /// value. An empty requirement list holds vacuously.
    fn all_match(value: Option<&Value>, required: &[Value]) -> bool {
        value
            .and_then(Value::as_array)
            .map(|items| {
                required
                    .iter()
                    .all(|req| items.iter().any(|item| deep_eq(item, req)))
            })
            .unwrap_or(false)
    }

    /// `$size`: element count for arrays, character count for strings.
    fn size_match(value: Option<&Value>, expected: u64) -> bool {
        match value {
            Some(Value::Array(items)) => items.len() as u64 == expected,
            Some(Value::String(s)) => s.chars().count() as u64 == expected,
            _ => false,
        }
    }

    /// `$between`: inclusive, type-homogeneous on both bounds.
    fn between_match(value: Option<&Value>, min: &Value, max: &Value) -> bool {
        let value = match value {
            Some(v) => v,
            None => return false,
        };
        let above_min = Comparator::homogeneous(value, min)
            .map(|o| o.is_ge())
            .unwrap_or(false);
        let below_max = Comparator::homogeneous(value, max)
            .map(|o| o.is_le())
            .unwrap_or(false);
        above_min && below_max
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
