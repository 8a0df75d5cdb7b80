use std::collections::HashMap;

use crate::parse::{cut, exact_field, exact_index, group};
use crate::patterns::PatternCache;
use crate::types::{absorb_mismatch, EvalError, Path};
use crate::value::Value;

/// Copy of `value` to serve as the root for lookups in `directive`.
///
/// Only `=.` and `=[` read the root; anything else gets a null placeholder.
pub(crate) fn root_snapshot(value: &Value, directive: &str) -> Value {
    if directive.contains("=.") || directive.contains("=[") {
        value.clone()
    } else {
        Value::Null
    }
}

/// Applies a filter directive to `value` in place.
///
/// `Ok(())` means the value passed, possibly pruned. A rejected value may be
/// left partially pruned; callers discard it.
pub(crate) fn filter(
    patterns: &PatternCache,
    value: &mut Value,
    root: &Value,
    directive: &str,
) -> Result<(), EvalError> {
    if directive.is_empty() {
        return Err(EvalError::UnrecognizedOperator(String::new()));
    }

    if let Some(literal) = directive.strip_prefix('=') {
        return compare(patterns, value, root, literal);
    }

    if let Some(rest) = directive.strip_prefix("[]") {
        return list_exclude(patterns, value, root, rest);
    }
    if let Some(rest) = directive.strip_prefix("[E]") {
        return list_exists(patterns, value, root, rest);
    }

    if let Some(rest) = directive.strip_prefix(".()") {
        return fields_exclude(patterns, value, root, rest);
    }
    if let Some(rest) = directive.strip_prefix(".(E)") {
        return fields_exist(patterns, value, root, rest);
    }

    if let Ok((rest, index)) = exact_index(directive) {
        return explicit_index(patterns, value, root, index, rest);
    }
    if let Ok((rest, field)) = exact_field(directive) {
        return explicit_field(patterns, value, root, field, rest);
    }

    if let Some(filters) = group(directive) {
        return multi(patterns, value, &filters);
    }

    if let Some(includes) = cut(directive) {
        return cut_value(value, &includes);
    }

    Err(EvalError::UnrecognizedOperator(directive.to_string()))
}

fn compare(
    patterns: &PatternCache,
    value: &Value,
    root: &Value,
    literal: &str,
) -> Result<(), EvalError> {
    let matched = if literal.starts_with('.') || literal.starts_with('[') {
        let path: Path = literal.parse()?;
        path.get(root)? == value
    } else {
        match value {
            Value::Int(i) => literal.parse::<i64>().is_ok_and(|l| l == *i),
            Value::Float(f) => literal.parse::<f64>().is_ok_and(|l| l == *f),
            Value::String(s) => compare_string(patterns, s, literal)?,
            Value::Null | Value::Bool(_) | Value::List(_) | Value::Map(_) => false,
        }
    };

    if matched {
        Ok(())
    } else {
        Err(EvalError::NoMatch)
    }
}

fn compare_string(patterns: &PatternCache, s: &str, literal: &str) -> Result<bool, EvalError> {
    if let Some(quoted) = literal.strip_prefix('"').and_then(|l| l.strip_suffix('"')) {
        return Ok(s == quoted);
    }
    if let Some(pattern) = literal.strip_prefix('/').and_then(|l| l.strip_suffix('/')) {
        return patterns.is_match(pattern, s);
    }
    Ok(s == literal)
}

fn list_exclude(
    patterns: &PatternCache,
    value: &mut Value,
    root: &Value,
    rest: &str,
) -> Result<(), EvalError> {
    let Value::List(items) = value else {
        return Err(EvalError::NotAList);
    };

    let mut kept = Vec::with_capacity(items.len());
    for mut item in std::mem::take(items) {
        if absorb_mismatch(filter(patterns, &mut item, root, rest))? {
            kept.push(item);
        }
    }
    *items = kept;
    Ok(())
}

fn list_exists(
    patterns: &PatternCache,
    value: &Value,
    root: &Value,
    rest: &str,
) -> Result<(), EvalError> {
    let Value::List(items) = value else {
        return Err(EvalError::NotAList);
    };

    for item in items {
        // probe a copy, existence never prunes
        let mut probe = item.clone();
        if absorb_mismatch(filter(patterns, &mut probe, root, rest))? {
            return Ok(());
        }
    }
    Err(EvalError::NoMatch)
}

fn fields_exclude(
    patterns: &PatternCache,
    value: &mut Value,
    root: &Value,
    rest: &str,
) -> Result<(), EvalError> {
    let Value::Map(map) = value else {
        return Err(EvalError::NotAStructure);
    };

    let mut kept = HashMap::with_capacity(map.len());
    for (key, mut item) in std::mem::take(map) {
        if absorb_mismatch(filter(patterns, &mut item, root, rest))? {
            kept.insert(key, item);
        }
    }
    *map = kept;
    Ok(())
}

fn fields_exist(
    patterns: &PatternCache,
    value: &Value,
    root: &Value,
    rest: &str,
) -> Result<(), EvalError> {
    let Value::Map(map) = value else {
        return Err(EvalError::NotAStructure);
    };

    for item in map.values() {
        let mut probe = item.clone();
        if absorb_mismatch(filter(patterns, &mut probe, root, rest))? {
            return Ok(());
        }
    }
    Err(EvalError::NoMatch)
}

fn explicit_index(
    patterns: &PatternCache,
    value: &mut Value,
    root: &Value,
    index: usize,
    rest: &str,
) -> Result<(), EvalError> {
    let Value::List(items) = value else {
        return Err(EvalError::NotAList);
    };
    let Some(item) = items.get_mut(index) else {
        return Err(EvalError::NotFound);
    };

    if rest.is_empty() {
        return Ok(());
    }
    filter(patterns, item, root, rest)
}

fn explicit_field(
    patterns: &PatternCache,
    value: &mut Value,
    root: &Value,
    field: &str,
    rest: &str,
) -> Result<(), EvalError> {
    // non-maps pass through
    if !value.is_map() {
        return Ok(());
    }

    if field.is_empty() {
        if rest.is_empty() {
            return Ok(());
        }
        return filter(patterns, value, root, rest);
    }

    let Value::Map(map) = value else {
        return Ok(());
    };
    match map.get_mut(field) {
        None => Err(EvalError::NotFound),
        Some(_) if rest.is_empty() => Ok(()),
        Some(item) => filter(patterns, item, root, rest),
    }
}

fn multi(patterns: &PatternCache, value: &mut Value, filters: &[&str]) -> Result<(), EvalError> {
    for f in filters {
        // each member sees the group's value as its root
        let root = root_snapshot(value, f);
        filter(patterns, value, &root, f)?;
    }
    Ok(())
}

fn cut_value(value: &mut Value, includes: &[&str]) -> Result<(), EvalError> {
    let selected = match value {
        Value::List(items) => {
            let mut selected = Vec::with_capacity(includes.len());
            for include in includes {
                let index: usize = include.parse().map_err(|_| {
                    EvalError::IllegalOperation(format!("cannot cut a list by {include:?}"))
                })?;
                if let Some(item) = items.get(index) {
                    selected.push(item.clone());
                }
            }
            Value::List(selected)
        }
        Value::Map(map) => {
            let mut map = std::mem::take(map);
            Value::Map(
                includes
                    .iter()
                    .filter_map(|include| map.remove_entry(*include))
                    .collect(),
            )
        }
        other => {
            return Err(EvalError::IllegalOperation(format!(
                "cannot cut a {}",
                other.kind()
            )));
        }
    };
    *value = selected;
    Ok(())
}
