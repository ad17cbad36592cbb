//! Filter evaluation subsystem
//!
//! Evaluates predicate trees against records: field conditions plus the
//! `$and`/`$or`/`$not`/`$nor` logical combinators.

mod evaluator;

pub use evaluator::FilterEvaluator;
