//! JSON query parser
//!
//! Parses the JSON query syntax into the typed AST. The parser is strict:
//! unknown `$`-operators and malformed operator arguments are rejected with
//! typed errors instead of being silently ignored, so a typo in a query is
//! surfaced at parse time rather than matching nothing at runtime.

use serde_json::Value;

use super::ast::{
    Condition, FieldCondition, Filter, LogicalOp, Operator, Query, SortDirection, SortKey,
};
use super::errors::{QueryError, QueryResult};

impl Filter {
    /// Parses a filter from its JSON form.
    ///
    /// Accepts an object (field conditions and logical keys, implicitly
    /// ANDed), an array of filters (implicitly ANDed), or null (match-all).
    pub fn from_json(value: &Value) -> QueryResult<Filter> {
        match value {
            Value::Null => Ok(Filter::new()),
            Value::Array(items) => {
                let filters = items
                    .iter()
                    .map(Filter::from_json)
                    .collect::<QueryResult<Vec<_>>>()?;
                Ok(Filter::new().with_logical(LogicalOp::And(filters)))
            }
            Value::Object(map) => {
                let mut filter = Filter::new();
                for (key, val) in map {
                    if key.starts_with('$') {
                        filter.logical.push(parse_logical(key, val)?);
                    } else {
                        filter
                            .fields
                            .push(FieldCondition::new(key.clone(), Condition::from_json(val)?));
                    }
                }
                Ok(filter)
            }
            _ => Err(QueryError::InvalidFilter),
        }
    }
}

impl Condition {
    /// Parses a condition from its JSON form.
    ///
    /// Objects are operator maps: `$`-keys are operators, every other key
    /// is a nested-field check. Anything else is shorthand equality.
    pub fn from_json(value: &Value) -> QueryResult<Condition> {
        match value {
            Value::Object(map) => {
                let mut ops = Vec::with_capacity(map.len());
                for (key, val) in map {
                    if key.starts_with('$') {
                        ops.push(parse_operator(key, val)?);
                    } else {
                        ops.push(Operator::Field(
                            key.clone(),
                            Box::new(Condition::from_json(val)?),
                        ));
                    }
                }
                Ok(Condition::Ops(ops))
            }
            other => Ok(Condition::Equals(other.clone())),
        }
    }
}

impl Query {
    /// Parses a full query envelope: `{ "where": ..., "orderBy": ... }`.
    ///
    /// Both keys are optional; null parses as the match-all query.
    pub fn from_json(value: &Value) -> QueryResult<Query> {
        let obj = match value {
            Value::Null => return Ok(Query::new()),
            Value::Object(obj) => obj,
            _ => return Err(QueryError::InvalidQuery),
        };

        let mut query = Query::new();
        if let Some(where_clause) = obj.get("where") {
            let filter = Filter::from_json(where_clause)?;
            if !filter.is_match_all() {
                query.filter = Some(filter);
            }
        }
        if let Some(order_by) = obj.get("orderBy") {
            query.order_by = parse_order_by(order_by)?;
        }

        tracing::debug!(
            fields = query.filter.as_ref().map(|f| f.fields.len()).unwrap_or(0),
            sort_keys = query.order_by.len(),
            "parsed query"
        );
        Ok(query)
    }
}

/// Parses a logical key (`$and`, `$or`, `$not`, `$nor`)
fn parse_logical(key: &str, value: &Value) -> QueryResult<LogicalOp> {
    match key {
        "$and" => Ok(LogicalOp::And(parse_filter_list("$and", value)?)),
        "$or" => Ok(LogicalOp::Or(parse_filter_list("$or", value)?)),
        "$nor" => Ok(LogicalOp::Nor(parse_filter_list("$nor", value)?)),
        "$not" => {
            // $not takes a single filter, never an array
            if value.is_array() {
                return Err(QueryError::invalid_operand("$not", "a single filter object"));
            }
            Ok(LogicalOp::Not(Box::new(Filter::from_json(value)?)))
        }
        other => Err(QueryError::UnknownOperator(other.to_string())),
    }
}

/// `$and`/`$or`/`$nor` accept either one filter or an array of filters
fn parse_filter_list(op: &'static str, value: &Value) -> QueryResult<Vec<Filter>> {
    match value {
        Value::Array(items) => items.iter().map(Filter::from_json).collect(),
        Value::Object(_) => Ok(vec![Filter::from_json(value)?]),
        _ => Err(QueryError::invalid_operand(op, "a filter or an array of filters")),
    }
}

/// Parses one `$`-operator entry from a condition map
fn parse_operator(key: &str, value: &Value) -> QueryResult<Operator> {
    match key {
        "$eq" => Ok(Operator::Eq(value.clone())),
        "$ne" => Ok(Operator::Ne(value.clone())),
        "$gt" => Ok(Operator::Gt(value.clone())),
        "$gte" => Ok(Operator::Gte(value.clone())),
        "$lt" => Ok(Operator::Lt(value.clone())),
        "$lte" => Ok(Operator::Lte(value.clone())),
        "$in" => Ok(Operator::In(require_array("$in", value)?)),
        "$nin" => Ok(Operator::Nin(require_array("$nin", value)?)),
        "$contains" => Ok(Operator::Contains(value.clone())),
        "$all" => Ok(Operator::All(require_array("$all", value)?)),
        "$size" => value
            .as_u64()
            .map(Operator::Size)
            .ok_or_else(|| QueryError::invalid_operand("$size", "a non-negative integer")),
        "$exists" => value
            .as_bool()
            .map(Operator::Exists)
            .ok_or_else(|| QueryError::invalid_operand("$exists", "a boolean")),
        "$startsWith" => value
            .as_str()
            .map(|s| Operator::StartsWith(s.to_string()))
            .ok_or_else(|| QueryError::invalid_operand("$startsWith", "a string")),
        "$endsWith" => value
            .as_str()
            .map(|s| Operator::EndsWith(s.to_string()))
            .ok_or_else(|| QueryError::invalid_operand("$endsWith", "a string")),
        "$regex" => value
            .as_str()
            .map(|s| Operator::Regex(s.to_string()))
            .ok_or_else(|| QueryError::invalid_operand("$regex", "a string pattern")),
        "$between" => parse_between(value),
        "$elemMatch" => Ok(Operator::ElemMatch(Box::new(Filter::from_json(value)?))),
        other => Err(QueryError::UnknownOperator(other.to_string())),
    }
}

/// `$between` accepts `[min, max]` or `{ "min": ..., "max": ... }`
fn parse_between(value: &Value) -> QueryResult<Operator> {
    match value {
        Value::Array(items) if items.len() == 2 => {
            Ok(Operator::Between(items[0].clone(), items[1].clone()))
        }
        Value::Object(map) => {
            let min = map
                .get("min")
                .ok_or_else(|| QueryError::invalid_operand("$between", "min and max bounds"))?;
            let max = map
                .get("max")
                .ok_or_else(|| QueryError::invalid_operand("$between", "min and max bounds"))?;
            Ok(Operator::Between(min.clone(), max.clone()))
        }
        _ => Err(QueryError::invalid_operand(
            "$between",
            "[min, max] or {min, max}",
        )),
    }
}

fn require_array(op: &'static str, value: &Value) -> QueryResult<Vec<Value>> {
    value
        .as_array()
        .cloned()
        .ok_or_else(|| QueryError::invalid_operand(op, "an array"))
}

/// Parses `orderBy`: an ordered mapping of path to "asc"/"desc"
fn parse_order_by(value: &Value) -> QueryResult<Vec<SortKey>> {
    let obj = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(obj) => obj,
        _ => return Err(QueryError::InvalidQuery),
    };

    let mut keys = Vec::with_capacity(obj.len());
    for (path, direction) in obj {
        let direction = match direction.as_str() {
            Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            _ => {
                return Err(QueryError::InvalidSortDirection {
                    path: path.clone(),
                    value: direction.to_string(),
                })
            }
        };
        keys.push(SortKey {
            path: path.clone(),
            direction,
        });
    }
    Ok(keys)
}
