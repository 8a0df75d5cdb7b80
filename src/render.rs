//! Rendering for `o:template=` and `o:templatefile=`.
//!
//! A template is plain text with `{{path}}` placeholders. Each placeholder is
//! replaced by the value at that explicit path: strings as-is, anything else
//! as compact JSON, and nothing at all when the path does not resolve.
//! `{{.}}` and `{{}}` stand for the whole value.

use crate::types::{EvalError, Path};
use crate::value::Value;

/// Renders `value` through `template`.
///
/// ## Example
///
/// ```rust
/// use dft::{render, Value};
/// use serde_json::json;
///
/// let value = Value::from(json!({"x": 3, "y": "three"}));
/// let text = render(&value, "{{.x}} is {{.y}}{{.missing}}").unwrap();
/// assert_eq!(text, "3 is three");
/// ```
pub fn render(value: &Value, template: &str) -> Result<String, EvalError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| {
            EvalError::IllegalOperation(format!("unclosed placeholder in {template:?}"))
        })?;

        let expr = after[..end].trim();
        let path: Path = if expr == "." {
            Path::default()
        } else {
            expr.parse()?
        };
        match path.get(value) {
            Ok(Value::String(s)) => out.push_str(s),
            Ok(found) => out.push_str(&found.to_string()),
            Err(err) => tracing::trace!(%path, reason = %err, "placeholder left empty"),
        }

        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}
