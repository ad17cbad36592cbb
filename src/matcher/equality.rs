//! Deep equality over JSON values
//!
//! Strict, coercion-free structural equality: arrays are element-wise and
//! order-sensitive, objects must have the same key set with recursively
//! equal values. The one softening is numeric: 1 and 1.0 are equal, because
//! records and filters routinely mix integer and float representations of
//! the same quantity.
//!
//! Recursion is depth-bounded. `serde_json` trees are acyclic, but query
//! conditions arrive from callers; past the bound values compare not-equal
//! rather than overflowing the stack.

use serde_json::Value;

/// Maximum nesting depth compared before giving up (treated as not equal)
pub(crate) const MAX_DEPTH: usize = 64;

/// Deep equality between two JSON values
pub fn deep_eq(a: &Value, b: &Value) -> bool {
    deep_eq_at(a, b, 0)
}

fn deep_eq_at(a: &Value, b: &Value, depth: usize) -> bool {
    if depth >= MAX_DEPTH {
        return false;
    }
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_eq(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len()
                && x.iter()
                    .zip(y.iter())
                    .all(|(xe, ye)| deep_eq_at(xe, ye, depth + 1))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, xv)| {
                    y.get(key)
                        .map(|yv| deep_eq_at(xv, yv, depth + 1))
                        .unwrap_or(false)
                })
        }
        _ => a == b,
    }
}

/// Numeric equality across integer and float representations
fn numbers_eq(x: &serde_json::Number, y: &serde_json::Number) -> bool {
    if let (Some(xi), Some(yi)) = (x.as_i64(), y.as_i64()) {
        return xi == yi;
    }
    if let (Some(xu), Some(yu)) = (x.as_u64(), y.as_u64()) {
        return xu == yu;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(xf), Some(yf)) => xf == yf,
        _ => x == y,
    }
}
