//! Query engine subsystem
//!
//! Runs queries over in-memory collections, producing deterministic
//! results.
//!
//! # Execution flow (strict order)
//!
//! 1. Filter records through the filter evaluator
//! 2. Apply the stable multi-key sort (if sort keys are given)
//! 3. Partition into groups (`group_by` only)
//!
//! # Invariants
//!
//! - Deterministic: same records + same query = same result order
//! - Zero-copy: results reference the input records
//! - Pure: neither records nor queries are mutated

mod engine;
mod group;
mod sorter;

pub use engine::QueryEngine;
pub use group::Group;
pub use sorter::Sorter;
