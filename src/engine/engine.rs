//! Query engine
//!
//! Orchestrates filter evaluation, sorting, and grouping over a full
//! collection.
//!
//! Execution flow (strict order):
//!
//! 1. Filter records (single-field equality queries take a fast path that
//!    skips the general evaluator)
//! 2. Apply the stable multi-key sort (if sort keys are given)
//! 3. Partition into groups (`group_by` only)
//!
//! Results hold references into the input slice: records are never copied
//! or mutated, and same inputs always produce the same output order.

use serde_json::Value;

use crate::filter::FilterEvaluator;
use crate::matcher::deep_eq;
use crate::path::PathResolver;
use crate::query::{Condition, Query};

use super::group::{partition, Group};
use super::sorter::Sorter;

/// Evaluates queries over in-memory collections
pub struct QueryEngine;

impl QueryEngine {
    /// Returns every record matching the query, sorted by its sort keys.
    ///
    /// Without sort keys, matching records keep their input order.
    pub fn find_many<'a>(records: &'a [Value], query: &Query) -> Vec<&'a Value> {
        let mut matched: Vec<&Value> = match equality_fast_path(query) {
            Some((path, expected)) => records
                .iter()
                .filter(|record| {
                    PathResolver::resolve(record, path)
                        .map(|value| deep_eq(value, expected))
                        .unwrap_or(expected.is_null())
                })
                .collect(),
            None => records
                .iter()
                .filter(|record| Self::matches(record, query))
                .collect(),
        };

        Sorter::sort(&mut matched, &query.order_by);
        tracing::debug!(
            scanned = records.len(),
            matched = matched.len(),
            sorted = !query.order_by.is_empty(),
            "find_many evaluated"
        );
        matched
    }

    /// Returns the first record matching the query, in input order.
    ///
    /// `order_by` is intentionally ignored: this entry point never sorts,
    /// so callers must not expect the smallest/largest record, only the
    /// earliest match. Matching stops at the first hit.
    pub fn find_first<'a>(records: &'a [Value], query: &Query) -> Option<&'a Value> {
        records.iter().find(|record| Self::matches(record, query))
    }

    /// Filters and sorts via [`find_many`](Self::find_many), then
    /// partitions by the string form of the value at `path`.
    ///
    /// Groups appear in first-seen order; records with no value at `path`
    /// are bucketed under the literal key `"undefined"`.
    pub fn group_by<'a>(records: &'a [Value], path: &str, query: &Query) -> Vec<Group<'a>> {
        partition(Self::find_many(records, query), path)
    }

    fn matches(record: &Value, query: &Query) -> bool {
        query
            .filter
            .as_ref()
            .map(|filter| FilterEvaluator::matches(record, filter))
            .unwrap_or(true)
    }
}

/// A filter consisting of exactly one shorthand-equality field condition on
/// a primitive can skip the general evaluator.
fn equality_fast_path(query: &Query) -> Option<(&str, &Value)> {
    let filter = query.filter.as_ref()?;
    if !filter.logical.is_empty() || filter.fields.len() != 1 {
        return None;
    }
    let field = &filter.fields[0];
    match &field.condition {
        Condition::Equals(value) if !value.is_object() && !value.is_array() => {
            Some((&field.path, value))
        }
        _ => None,
    }
}
