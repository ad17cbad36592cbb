//! sift - a strict, deterministic, in-memory query engine
//!
//! Filters, sorts, and groups collections of JSON records through
//! declarative predicate trees instead of chained imperative loops.
//!
//! ```
//! use serde_json::json;
//! use sift::{Query, QueryEngine};
//!
//! let records = vec![
//!     json!({ "name": "Alice", "age": 30 }),
//!     json!({ "name": "Bob", "age": 20 }),
//! ];
//! let query = Query::from_json(&json!({
//!     "where": { "age": { "$gte": 25 } },
//!     "orderBy": { "name": "asc" }
//! }))
//! .unwrap();
//!
//! let adults = QueryEngine::find_many(&records, &query);
//! assert_eq!(adults, vec![&records[0]]);
//! ```

pub mod engine;
pub mod filter;
pub mod matcher;
pub mod path;
pub mod query;

pub use engine::{Group, QueryEngine};
pub use query::{
    Condition, Filter, Operator, Query, QueryError, QueryResult, SortDirection, SortKey,
};
