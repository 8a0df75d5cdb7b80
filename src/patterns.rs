//! Compiled regular expressions for `/.../` literals.
//!
//! Thread-safe via `parking_lot::RwLock`. Patterns are keyed by their source
//! text and never evicted.

use std::collections::HashMap;

use parking_lot::RwLock;
use regex::Regex;

use crate::types::EvalError;

/// Append-only cache of compiled patterns, owned by one evaluator.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: RwLock<HashMap<String, Regex>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tests `haystack` for a match anywhere against `pattern`, compiling and
    /// caching the pattern on first use.
    pub fn is_match(&self, pattern: &str, haystack: &str) -> Result<bool, EvalError> {
        if let Some(regex) = self.patterns.read().get(pattern) {
            return Ok(regex.is_match(haystack));
        }

        let regex = Regex::new(pattern).map_err(|err| EvalError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;
        tracing::trace!(pattern, "compiled pattern");
        let matched = regex.is_match(haystack);
        // Two callers may race to compile the same pattern; the first insert wins.
        self.patterns
            .write()
            .entry(pattern.to_string())
            .or_insert(regex);
        Ok(matched)
    }

    /// Whether `pattern` has been compiled already.
    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.read().contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiles_once() {
        let cache = PatternCache::new();
        assert!(cache.is_match("c12", "abc123").unwrap());
        assert!(!cache.is_match("c12", "abc").unwrap());
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("c12"));
    }

    #[test]
    fn test_invalid_pattern_is_not_cached() {
        let cache = PatternCache::new();
        let err = cache.is_match("(unclosed", "x").unwrap_err();
        assert!(err.is_directive_error());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = PatternCache::new();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| assert!(cache.is_match("^a+$", "aaa").unwrap()));
            }
        });
        assert_eq!(cache.len(), 1);
    }
}
