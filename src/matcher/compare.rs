//! Value ordering
//!
//! Two orderings are provided over JSON values:
//!
//! - [`Comparator::total`] — a total order across heterogeneous values,
//!   used by the sort pass. Values of different types order by a fixed
//!   type rank (null < bool < number < string < array < object).
//! - [`Comparator::homogeneous`] — the ordering used by range operators,
//!   defined only for type-homogeneous pairs (numbers with numbers,
//!   strings with strings). A mismatched pair yields `None`, which the
//!   matcher treats as "no match".
//!
//! Strings that both parse as RFC 3339 datetimes compare by instant, so
//! timestamps with different UTC offsets still order chronologically.
//! Floats compare by total order: NaN equals only itself and sorts after
//! every other number.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use serde_json::Value;

/// Orders JSON values for range operators and sorting
pub struct Comparator;

impl Comparator {
    /// Total order across heterogeneous values, for sorting.
    ///
    /// Arrays and objects are not given an internal order; same-type pairs
    /// of either compare equal, which keeps the sort stable for them.
    pub fn total(a: &Value, b: &Value) -> Ordering {
        let rank_a = type_rank(a);
        let rank_b = type_rank(b);
        if rank_a != rank_b {
            return rank_a.cmp(&rank_b);
        }
        match (a, b) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
            (Value::String(x), Value::String(y)) => compare_strings(x, y),
            _ => Ordering::Equal,
        }
    }

    /// Ordering for range operators.
    ///
    /// Defined for number/number and string/string pairs only (strings
    /// include datetimes); every other pairing is `None`.
    pub fn homogeneous(a: &Value, b: &Value) -> Option<Ordering> {
        match (a, b) {
            (Value::Number(x), Value::Number(y)) => Some(compare_numbers(x, y)),
            (Value::String(x), Value::String(y)) => Some(compare_strings(x, y)),
            _ => None,
        }
    }
}

/// Parses an RFC 3339 datetime string
pub fn parse_datetime(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_numbers(x: &serde_json::Number, y: &serde_json::Number) -> Ordering {
    if let (Some(xi), Some(yi)) = (x.as_i64(), y.as_i64()) {
        return xi.cmp(&yi);
    }
    let xf = x.as_f64().unwrap_or(f64::NAN);
    let yf = y.as_f64().unwrap_or(f64::NAN);
    // total_cmp: NaN orders after every other value and equals itself
    xf.total_cmp(&yf)
}

fn compare_strings(x: &str, y: &str) -> Ordering {
    match (parse_datetime(x), parse_datetime(y)) {
        (Some(dx), Some(dy)) => dx.cmp(&dy),
        _ => x.cmp(y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers() {
        assert_eq!(Comparator::total(&json!(1), &json!(2)), Ordering::Less);
        assert_eq!(Comparator::total(&json!(2.5), &json!(2)), Ordering::Greater);
        assert_eq!(Comparator::total(&json!(3), &json!(3.0)), Ordering::Equal);
        assert_eq!(Comparator::total(&json!(-1), &json!(1)), Ordering::Less);
    }

    #[test]
    fn test_strings_lexicographic() {
        assert_eq!(Comparator::total(&json!("apple"), &json!("banana")), Ordering::Less);
        assert_eq!(Comparator::total(&json!("b"), &json!("a")), Ordering::Greater);
        assert_eq!(Comparator::total(&json!("x"), &json!("x")), Ordering::Equal);
    }

    #[test]
    fn test_datetimes_by_instant() {
        // Same instant, different offsets: lexicographic order would be
        // wrong, instant order is equal.
        let utc = json!("2024-06-01T12:00:00Z");
        let offset = json!("2024-06-01T14:00:00+02:00");
        assert_eq!(Comparator::total(&utc, &offset), Ordering::Equal);

        let earlier = json!("2024-06-01T11:59:00Z");
        assert_eq!(Comparator::total(&earlier, &utc), Ordering::Less);
        assert_eq!(
            Comparator::homogeneous(&utc, &earlier),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_type_rank_order() {
        assert_eq!(Comparator::total(&json!(null), &json!(false)), Ordering::Less);
        assert_eq!(Comparator::total(&json!(true), &json!(0)), Ordering::Less);
        assert_eq!(Comparator::total(&json!(9), &json!("a")), Ordering::Less);
        assert_eq!(Comparator::total(&json!("z"), &json!([1])), Ordering::Less);
        assert_eq!(Comparator::total(&json!([1]), &json!({"a": 1})), Ordering::Less);
    }

    #[test]
    fn test_homogeneous_rejects_mixed_types() {
        assert_eq!(Comparator::homogeneous(&json!(1), &json!("1")), None);
        assert_eq!(Comparator::homogeneous(&json!(true), &json!(false)), None);
        assert_eq!(Comparator::homogeneous(&json!([1]), &json!([1])), None);
        assert_eq!(Comparator::homogeneous(&json!(null), &json!(null)), None);
    }

    #[test]
    fn test_booleans() {
        assert_eq!(Comparator::total(&json!(false), &json!(true)), Ordering::Less);
        assert_eq!(Comparator::total(&json!(true), &json!(true)), Ordering::Equal);
    }

    #[test]
    fn test_large_integers_keep_precision() {
        let a = json!(i64::MAX);
        let b = json!(i64::MAX - 1);
        assert_eq!(Comparator::total(&a, &b), Ordering::Greater);
    }
}
