//! Query AST structures
//!
//! Defines the typed query representation evaluated by the engine.
//! Operators form a closed enum: dispatch is an exhaustive match, so a new
//! operator cannot be added without the compiler pointing at every site
//! that must handle it.

use serde::Serialize;
use serde_json::Value;

/// A single query operator applied to one field value
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Deep equality: field == value
    Eq(Value),
    /// Deep inequality: field != value
    Ne(Value),
    /// Greater than (numbers, strings, datetimes)
    Gt(Value),
    /// Greater than or equal
    Gte(Value),
    /// Less than
    Lt(Value),
    /// Less than or equal
    Lte(Value),
    /// Value deep-equals at least one element
    In(Vec<Value>),
    /// Value deep-equals no element
    Nin(Vec<Value>),
    /// Case-insensitive substring (strings) or element membership (arrays)
    Contains(Value),
    /// Every condition element is present in the array value
    All(Vec<Value>),
    /// Array element count or string character count
    Size(u64),
    /// Field presence check (structural, not value-based)
    Exists(bool),
    /// Case-insensitive prefix
    StartsWith(String),
    /// Case-insensitive suffix
    EndsWith(String),
    /// Case-insensitive pattern match
    Regex(String),
    /// Inclusive range over numbers or datetimes
    Between(Value, Value),
    /// At least one array element satisfies the sub-filter
    ElemMatch(Box<Filter>),
    /// Nested-field check: descend into `value[key]` and apply the condition
    Field(String, Box<Condition>),
}

impl Operator {
    /// Returns the operator name as written in queries
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Eq(_) => "$eq",
            Operator::Ne(_) => "$ne",
            Operator::Gt(_) => "$gt",
            Operator::Gte(_) => "$gte",
            Operator::Lt(_) => "$lt",
            Operator::Lte(_) => "$lte",
            Operator::In(_) => "$in",
            Operator::Nin(_) => "$nin",
            Operator::Contains(_) => "$contains",
            Operator::All(_) => "$all",
            Operator::Size(_) => "$size",
            Operator::Exists(_) => "$exists",
            Operator::StartsWith(_) => "$startsWith",
            Operator::EndsWith(_) => "$endsWith",
            Operator::Regex(_) => "$regex",
            Operator::Between(_, _) => "$between",
            Operator::ElemMatch(_) => "$elemMatch",
            Operator::Field(_, _) => "<nested field>",
        }
    }

    /// Returns true if this is an ordering operator
    pub fn is_range(&self) -> bool {
        matches!(
            self,
            Operator::Gt(_)
                | Operator::Gte(_)
                | Operator::Lt(_)
                | Operator::Lte(_)
                | Operator::Between(_, _)
        )
    }
}

/// The condition attached to one field path within a filter
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Shorthand literal: deep equality against the value
    Equals(Value),
    /// Operator map: every operator must hold
    Ops(Vec<Operator>),
}

impl Condition {
    /// Shorthand equality condition
    pub fn equals(value: Value) -> Self {
        Condition::Equals(value)
    }

    /// Condition from a single operator
    pub fn op(operator: Operator) -> Self {
        Condition::Ops(vec![operator])
    }

    /// Condition from several operators, all of which must hold
    pub fn ops(operators: Vec<Operator>) -> Self {
        Condition::Ops(operators)
    }
}

/// One field path paired with its condition
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCondition {
    /// Dot-separated field path
    pub path: String,
    /// Condition the resolved value must satisfy
    pub condition: Condition,
}

impl FieldCondition {
    /// Creates a field condition
    pub fn new(path: impl Into<String>, condition: Condition) -> Self {
        Self {
            path: path.into(),
            condition,
        }
    }
}

/// A logical combinator over sub-filters
#[derive(Debug, Clone, PartialEq)]
pub enum LogicalOp {
    /// All sub-filters must match
    And(Vec<Filter>),
    /// At least one sub-filter must match
    Or(Vec<Filter>),
    /// The sub-filter must not match
    Not(Box<Filter>),
    /// No sub-filter may match
    Nor(Vec<Filter>),
}

/// A recursive predicate tree evaluated against one record
///
/// Field conditions and logical branches from the same mapping are
/// implicitly ANDed. An empty filter matches everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    /// Field conditions (all must hold)
    pub fields: Vec<FieldCondition>,
    /// Logical branches (all must hold)
    pub logical: Vec<LogicalOp>,
}

impl Filter {
    /// Creates an empty filter (matches everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this filter matches every record
    pub fn is_match_all(&self) -> bool {
        self.fields.is_empty() && self.logical.is_empty()
    }

    /// Adds a field condition
    pub fn with_field(mut self, path: impl Into<String>, condition: Condition) -> Self {
        self.fields.push(FieldCondition::new(path, condition));
        self
    }

    /// Adds an equality field condition
    pub fn field_eq(self, path: impl Into<String>, value: Value) -> Self {
        self.with_field(path, Condition::Equals(value))
    }

    /// Adds a logical branch
    pub fn with_logical(mut self, op: LogicalOp) -> Self {
        self.logical.push(op);
        self
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One sort key: a field path and a direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Dot-separated field path
    pub path: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A full query: an optional filter plus ordered sort keys
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    /// Filter to apply; `None` matches every record
    pub filter: Option<Filter>,
    /// Sort keys in tie-break order; empty preserves input order
    pub order_by: Vec<SortKey>,
}

impl Query {
    /// Creates an empty query (matches all, input order)
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Adds an equality filter on one field
    pub fn filter_eq(self, path: impl Into<String>, value: Value) -> Self {
        let filter = self.filter.clone().unwrap_or_default().field_eq(path, value);
        self.with_filter(filter)
    }

    /// Appends a sort key
    pub fn order_by(mut self, key: SortKey) -> Self {
        self.order_by.push(key);
        self
    }

    /// Returns true if the query matches every record unconditionally
    pub fn is_match_all(&self) -> bool {
        self.filter.as_ref().map(Filter::is_match_all).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_builder() {
        let query = Query::new()
            .filter_eq("status", json!("active"))
            .order_by(SortKey::desc("age"));

        let filter = query.filter.as_ref().unwrap();
        assert_eq!(filter.fields.len(), 1);
        assert_eq!(filter.fields[0].path, "status");
        assert_eq!(query.order_by, vec![SortKey::desc("age")]);
        assert!(!query.is_match_all());
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(Filter::new().is_match_all());
        assert!(Query::new().is_match_all());
        assert!(!Filter::new().field_eq("a", json!(1)).is_match_all());
    }

    #[test]
    fn test_operator_names() {
        assert_eq!(Operator::Eq(json!(1)).name(), "$eq");
        assert_eq!(Operator::ElemMatch(Box::new(Filter::new())).name(), "$elemMatch");
        assert_eq!(Operator::Between(json!(1), json!(2)).name(), "$between");
    }

    #[test]
    fn test_range_classification() {
        assert!(Operator::Gte(json!(1)).is_range());
        assert!(Operator::Between(json!(1), json!(2)).is_range());
        assert!(!Operator::Eq(json!(1)).is_range());
    }

    #[test]
    fn test_sort_key() {
        let key = SortKey::asc("created_at");
        assert_eq!(key.direction, SortDirection::Asc);
        assert_eq!(key.direction.as_str(), "asc");
        assert_eq!(key.path, "created_at");
    }
}
