//! Path resolution subsystem
//!
//! Cached dot-path resolution and structural existence checks over records.

mod resolver;

pub use resolver::PathResolver;
