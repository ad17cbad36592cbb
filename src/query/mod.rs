//! Query AST subsystem
//!
//! The typed query representation and its JSON parser.
//!
//! # Design principles
//!
//! - Closed operator set: dispatch is an exhaustive enum match
//! - Strict parsing: unknown operators and malformed arguments are typed
//!   errors, never silently ignored
//! - Immutable AST: evaluation never mutates a parsed query

mod ast;
mod errors;
mod parser;

pub use ast::{
    Condition, FieldCondition, Filter, LogicalOp, Operator, Query, SortDirection, SortKey,
};
pub use errors::{QueryError, QueryResult};
