//! Filter-tree evaluation
//!
//! Evaluates a full [`Filter`] against one record: field conditions are
//! resolved through the path resolver and tested by the operator matcher,
//! logical branches recurse, and everything in one filter node is ANDed.

use serde_json::Value;

use crate::matcher::OperatorMatcher;
use crate::path::PathResolver;
use crate::query::{Condition, FieldCondition, Filter, LogicalOp, Operator};

/// Evaluates filters against records
pub struct FilterEvaluator;

impl FilterEvaluator {
    /// Checks whether a record satisfies a filter.
    ///
    /// An empty filter matches every record.
    pub fn matches(record: &Value, filter: &Filter) -> bool {
        filter
            .fields
            .iter()
            .all(|field| Self::matches_field(record, field))
            && filter
                .logical
                .iter()
                .all(|op| Self::matches_logical(record, op))
    }

    fn matches_field(record: &Value, field: &FieldCondition) -> bool {
        // `$exists` asks about the path, not the resolved value: a leaf
        // holding null exists, a path through a null intermediate does not,
        // and both resolve to an absent value. When `$exists` shares the
        // condition with other operators, it is checked structurally first
        // and the rest run against the resolved value.
        if let Condition::Ops(ops) = &field.condition {
            if let Some(required) = exists_requirement(ops) {
                if PathResolver::exists(record, &field.path) != required {
                    return false;
                }
                let value = PathResolver::resolve(record, &field.path);
                return ops
                    .iter()
                    .filter(|op| !matches!(op, Operator::Exists(_)))
                    .all(|op| OperatorMatcher::matches_op(value, op));
            }
        }

        let value = PathResolver::resolve(record, &field.path);
        OperatorMatcher::matches(value, &field.condition)
    }

    fn matches_logical(record: &Value, op: &LogicalOp) -> bool {
        match op {
            LogicalOp::And(filters) => filters.iter().all(|f| Self::matches(record, f)),
            LogicalOp::Or(filters) => filters.iter().any(|f| Self::matches(record, f)),
            LogicalOp::Nor(filters) => !filters.iter().any(|f| Self::matches(record, f)),
            LogicalOp::Not(filter) => !Self::matches(record, filter),
        }
    }
}

/// Extracts the `$exists` requirement from an operator list, if present
fn exists_requirement(ops: &[Operator]) -> Option<bool> {
    ops.iter().find_map(|op| match op {
        Operator::Exists(required) => Some(*required),
        _ => None,
    })
}
