use crate::filter::{filter, root_snapshot};
use crate::patterns::PatternCache;
use crate::transform::transform;
use crate::types::{Directive, DirectiveError, EvalError, OutputDirective};
use crate::value::Value;

/// What a directive chain produced for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Emit {
    /// The value after every filter and transform.
    pub value: Value,
    /// Set when the chain ended in an output directive.
    pub output: Option<OutputDirective>,
}

/// Evaluates filter and transform directives.
///
/// Owns the cache of compiled `/.../` patterns, so independent evaluators do
/// not share state.
#[derive(Debug, Default)]
pub struct Evaluator {
    patterns: PatternCache,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    /// Filters `value`, using `value` itself as the root for lookups.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use dft::{EvalError, Evaluator, Value};
    /// use serde_json::json;
    ///
    /// let evaluator = Evaluator::new();
    ///
    /// let kept = evaluator.filter(Value::from(json!([1, 2, 3, 2])), "[]=2").unwrap();
    /// assert_eq!(kept, Value::from(json!([2, 2])));
    ///
    /// let err = evaluator.filter(Value::from(json!({"x": "y"})), ".x=z").unwrap_err();
    /// assert_eq!(err, EvalError::NoMatch);
    /// ```
    pub fn filter(&self, mut value: Value, directive: &str) -> Result<Value, EvalError> {
        let root = root_snapshot(&value, directive);
        filter(&self.patterns, &mut value, &root, directive)?;
        Ok(value)
    }

    /// Filters `value`, resolving `=.path` and `=[N]` lookups against `root`.
    pub fn filter_with_root(
        &self,
        mut value: Value,
        root: &Value,
        directive: &str,
    ) -> Result<Value, EvalError> {
        filter(&self.patterns, &mut value, root, directive)?;
        Ok(value)
    }

    /// Transforms `value` with copy-assignments.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use dft::{Evaluator, Value};
    /// use serde_json::json;
    ///
    /// let evaluator = Evaluator::new();
    /// let value = Value::from(json!({"x": {"z": [1, 2, 3]}}));
    ///
    /// let copied = evaluator.transform(value, "{.y.z=.x.z[1]}").unwrap();
    /// assert_eq!(copied, Value::from(json!({"x": {"z": [1, 2, 3]}, "y": {"z": 2}})));
    /// ```
    pub fn transform(&self, mut value: Value, directive: &str) -> Result<Value, EvalError> {
        transform(&mut value, directive)?;
        Ok(value)
    }

    /// Runs one record through a chain of directives.
    ///
    /// Returns `Ok(None)` when a directive rejects the record. Errors in the
    /// directives themselves are returned, naming the directive at fault; the
    /// caller should stop processing records.
    pub fn run(
        &self,
        mut value: Value,
        directives: &[Directive],
    ) -> Result<Option<Emit>, DirectiveError> {
        for (position, directive) in directives.iter().enumerate() {
            let result = match directive {
                Directive::Filter(text) => self.filter(value, text),
                Directive::Transform(text) => self.transform(value, text),
                Directive::Output(output) => {
                    let unused = &directives[position + 1..];
                    if !unused.is_empty() {
                        tracing::warn!(?unused, "directives after output are ignored");
                    }
                    return Ok(Some(Emit {
                        value,
                        output: Some(output.clone()),
                    }));
                }
            };

            value = match result {
                Ok(value) => value,
                Err(err) if err.is_directive_error() => {
                    return Err(DirectiveError {
                        directive: directive.to_string(),
                        source: err,
                    });
                }
                Err(err) => {
                    tracing::debug!(%directive, reason = %err, "record dropped");
                    return Ok(None);
                }
            };
        }

        Ok(Some(Emit {
            value,
            output: None,
        }))
    }
}
