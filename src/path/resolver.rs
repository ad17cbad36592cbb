//! Dot-path resolution over JSON records
//!
//! Resolves a dot-separated path string into a value reference, walking one
//! object level per segment. Arrays are opaque leaves: a path never indexes
//! into an array, array contents are consumed only by array operators.
//!
//! Parsed paths are cached process-wide. The dominant shapes in practice
//! are one to three segments, so those are stored as fixed variants; longer
//! paths fall back to a general segment walk.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use serde_json::Value;

/// Maximum number of distinct paths held by the process-wide cache.
/// At capacity, new paths are parsed per call without being inserted.
const PATH_CACHE_CAPACITY: usize = 1024;

static PATH_CACHE: OnceLock<Mutex<HashMap<String, Arc<ParsedPath>>>> = OnceLock::new();

/// A pre-split path, specialized for the short shapes
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParsedPath {
    /// Direct field lookup, no dots
    Single(String),
    /// Two segments: `a.b`
    Pair(String, String),
    /// Three segments: `a.b.c`
    Triple(String, String, String),
    /// Four or more segments
    Deep(Vec<String>),
}

impl ParsedPath {
    fn parse(path: &str) -> Self {
        if !path.contains('.') {
            return ParsedPath::Single(path.to_string());
        }
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        match segments.len() {
            2 => {
                let mut it = segments.into_iter();
                let a = it.next().unwrap_or_default();
                let b = it.next().unwrap_or_default();
                ParsedPath::Pair(a, b)
            }
            3 => {
                let mut it = segments.into_iter();
                let a = it.next().unwrap_or_default();
                let b = it.next().unwrap_or_default();
                let c = it.next().unwrap_or_default();
                ParsedPath::Triple(a, b, c)
            }
            _ => ParsedPath::Deep(segments),
        }
    }

    /// Resolves the path against a record.
    ///
    /// Returns `None` the moment an intermediate is missing or not an
    /// object. A present-but-null leaf resolves to `Some(Null)`.
    fn resolve<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        match self {
            ParsedPath::Single(a) => record.as_object()?.get(a),
            ParsedPath::Pair(a, b) => record.as_object()?.get(a)?.as_object()?.get(b),
            ParsedPath::Triple(a, b, c) => record
                .as_object()?
                .get(a)?
                .as_object()?
                .get(b)?
                .as_object()?
                .get(c),
            ParsedPath::Deep(segments) => {
                let mut current = record;
                for segment in segments {
                    current = current.as_object()?.get(segment)?;
                }
                Some(current)
            }
        }
    }

    /// Structural existence: every intermediate must be an object holding
    /// the next segment, and the final object must hold the last key.
    /// A null leaf exists; a path through a null intermediate does not.
    fn exists(&self, record: &Value) -> bool {
        match self {
            ParsedPath::Single(a) => record
                .as_object()
                .map(|obj| obj.contains_key(a))
                .unwrap_or(false),
            ParsedPath::Pair(a, b) => record
                .as_object()
                .and_then(|obj| obj.get(a))
                .and_then(Value::as_object)
                .map(|obj| obj.contains_key(b))
                .unwrap_or(false),
            ParsedPath::Triple(a, b, c) => record
                .as_object()
                .and_then(|obj| obj.get(a))
                .and_then(Value::as_object)
                .and_then(|obj| obj.get(b))
                .and_then(Value::as_object)
                .map(|obj| obj.contains_key(c))
                .unwrap_or(false),
            ParsedPath::Deep(segments) => {
                let mut current = record;
                let last = segments.len() - 1;
                for (i, segment) in segments.iter().enumerate() {
                    let obj = match current.as_object() {
                        Some(obj) => obj,
                        None => return false,
                    };
                    match obj.get(segment) {
                        Some(next) if i < last => current = next,
                        Some(_) => return true,
                        None => return false,
                    }
                }
                true
            }
        }
    }
}

/// Resolves dot-separated paths against records, caching parsed paths
pub struct PathResolver;

impl PathResolver {
    /// Resolves `path` within `record`.
    ///
    /// `None` means the path is not traversable (missing field or non-object
    /// intermediate). A field holding JSON null resolves to `Some(Null)`.
    pub fn resolve<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
        Self::parsed(path).resolve(record)
    }

    /// Structural existence check for `path` within `record`.
    ///
    /// Kept separate from [`resolve`](Self::resolve): a leaf holding null
    /// exists, while a path through a null intermediate does not, and both
    /// resolve to an absent value.
    pub fn exists(record: &Value, path: &str) -> bool {
        Self::parsed(path).exists(record)
    }

    fn parsed(path: &str) -> Arc<ParsedPath> {
        let cache = PATH_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
        let mut map = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(parsed) = map.get(path) {
            return Arc::clone(parsed);
        }
        let parsed = Arc::new(ParsedPath::parse(path));
        if map.len() < PATH_CACHE_CAPACITY {
            map.insert(path.to_string(), Arc::clone(&parsed));
        } else {
            tracing::debug!(path, "path cache at capacity, parsing without caching");
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_segment() {
        let record = json!({ "name": "Alice", "age": 30 });
        assert_eq!(PathResolver::resolve(&record, "name"), Some(&json!("Alice")));
        assert_eq!(PathResolver::resolve(&record, "missing"), None);
    }

    #[test]
    fn test_nested_segments() {
        let record = json!({
            "a": { "b": { "c": { "d": 4 } } }
        });
        assert_eq!(PathResolver::resolve(&record, "a.b"), Some(&json!({ "c": { "d": 4 } })));
        assert_eq!(PathResolver::resolve(&record, "a.b.c"), Some(&json!({ "d": 4 })));
        assert_eq!(PathResolver::resolve(&record, "a.b.c.d"), Some(&json!(4)));
    }

    #[test]
    fn test_missing_intermediate_is_absent() {
        let record = json!({ "a": { "b": 1 } });
        assert_eq!(PathResolver::resolve(&record, "a.x.c"), None);
        assert_eq!(PathResolver::resolve(&record, "x.b"), None);
    }

    #[test]
    fn test_non_object_intermediate_is_absent() {
        let record = json!({ "a": [1, 2, 3], "b": "text", "c": null });
        // Arrays are opaque leaves for path resolution
        assert_eq!(PathResolver::resolve(&record, "a.0"), None);
        assert_eq!(PathResolver::resolve(&record, "b.len"), None);
        assert_eq!(PathResolver::resolve(&record, "c.x"), None);
    }

    #[test]
    fn test_null_leaf_resolves_to_null() {
        let record = json!({ "a": { "b": null } });
        assert_eq!(PathResolver::resolve(&record, "a.b"), Some(&Value::Null));
    }

    #[test]
    fn test_exists_distinguishes_null_leaf_from_missing() {
        let record = json!({ "a": { "b": null }, "c": null });
        assert!(PathResolver::exists(&record, "a.b"));
        assert!(PathResolver::exists(&record, "c"));
        assert!(!PathResolver::exists(&record, "a.x"));
        // Path through a null intermediate does not exist
        assert!(!PathResolver::exists(&record, "c.d"));
    }

    #[test]
    fn test_exists_deep() {
        let record = json!({ "a": { "b": { "c": { "d": null } } } });
        assert!(PathResolver::exists(&record, "a.b.c.d"));
        assert!(!PathResolver::exists(&record, "a.b.c.e"));
        assert!(!PathResolver::exists(&record, "a.b.x.d"));
    }

    #[test]
    fn test_non_object_record() {
        assert_eq!(PathResolver::resolve(&json!([1, 2]), "a"), None);
        assert!(!PathResolver::exists(&json!("scalar"), "a"));
    }

    #[test]
    fn test_resolution_is_pure() {
        let record = json!({ "a": { "b": 1 } });
        let before = record.clone();
        for _ in 0..10 {
            let _ = PathResolver::resolve(&record, "a.b");
            let _ = PathResolver::exists(&record, "a.b");
        }
        assert_eq!(record, before);
    }

    #[test]
    fn test_parsed_shapes() {
        assert_eq!(ParsedPath::parse("a"), ParsedPath::Single("a".into()));
        assert_eq!(ParsedPath::parse("a.b"), ParsedPath::Pair("a".into(), "b".into()));
        assert_eq!(
            ParsedPath::parse("a.b.c"),
            ParsedPath::Triple("a".into(), "b".into(), "c".into())
        );
        assert_eq!(
            ParsedPath::parse("a.b.c.d"),
            ParsedPath::Deep(vec!["a".into(), "b".into(), "c".into(), "d".into()])
        );
    }
}
