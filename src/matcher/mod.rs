//! Operator matching subsystem
//!
//! The evaluation core: deep equality, value ordering, compiled-pattern
//! caching, and the per-operator match logic.
//!
//! # Invariants
//!
//! - Evaluation is total: no value/condition pair errors or panics
//! - Evaluation is pure: values and conditions are never mutated
//! - Type mismatches are "no match", never coerced

mod compare;
mod equality;
mod operators;
mod regex_cache;

pub use compare::{parse_datetime, Comparator};
pub use equality::deep_eq;
pub use operators::OperatorMatcher;
pub use regex_cache::RegexCache;
