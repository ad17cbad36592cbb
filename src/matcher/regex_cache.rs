//! Compiled-pattern cache for `$regex`
//!
//! Patterns are compiled once per distinct pattern string and memoized
//! process-wide. All `$regex` matching is case-insensitive.
//!
//! Invalid patterns never match. The failed compilation is cached too, so a
//! bad pattern costs one compile attempt and one warning per process, not
//! one per record.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use regex::{Regex, RegexBuilder};

/// Maximum number of distinct patterns held by the process-wide cache.
/// At capacity, new patterns are compiled per call without being inserted.
const REGEX_CACHE_CAPACITY: usize = 1024;

static REGEX_CACHE: OnceLock<Mutex<HashMap<String, Option<Arc<Regex>>>>> = OnceLock::new();

/// Process-wide memo of compiled case-insensitive patterns
pub struct RegexCache;

impl RegexCache {
    /// Returns the compiled pattern, or `None` for an invalid pattern
    /// (never-match policy).
    pub fn get(pattern: &str) -> Option<Arc<Regex>> {
        let cache = REGEX_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
        let mut map = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(entry) = map.get(pattern) {
            return entry.clone();
        }
        let compiled = compile(pattern);
        if map.len() < REGEX_CACHE_CAPACITY {
            map.insert(pattern.to_string(), compiled.clone());
        }
        compiled
    }

    /// Tests `text` against `pattern`. Invalid patterns match nothing.
    pub fn is_match(pattern: &str, text: &str) -> bool {
        Self::get(pattern)
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    }
}

fn compile(pattern: &str) -> Option<Arc<Regex>> {
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(Arc::new(re)),
        Err(err) => {
            tracing::warn!(pattern, error = %err, "invalid regex pattern, treating as never-matching");
            None
        }
    }
}
