use crate::parse::{assignment, exact_field, exact_index};
use crate::types::{absorb_mismatch, EvalError, Path};
use crate::value::Value;

/// Applies a transform directive to `value` in place.
///
/// Below the top level, a part that does not fit the directive is left as it
/// was. Directive errors always propagate.
pub(crate) fn transform(value: &mut Value, directive: &str) -> Result<(), EvalError> {
    if directive.is_empty() {
        return Err(EvalError::UnrecognizedOperator(String::new()));
    }

    if let Some(rest) = directive.strip_prefix("[]") {
        return all_indices(value, rest);
    }
    if let Some(rest) = directive.strip_prefix(".()") {
        return all_fields(value, rest);
    }

    if let Ok((rest, index)) = exact_index(directive) {
        return explicit_index(value, index, rest);
    }
    if let Ok((rest, field)) = exact_field(directive) {
        return explicit_field(value, field, rest);
    }

    if let Some((dest, src)) = assignment(directive) {
        return replace(value, dest, src);
    }

    Err(EvalError::UnrecognizedOperator(directive.to_string()))
}

fn all_indices(value: &mut Value, rest: &str) -> Result<(), EvalError> {
    let Value::List(items) = value else {
        return Err(EvalError::NotAList);
    };
    for item in items.iter_mut() {
        absorb_mismatch(transform(item, rest))?;
    }
    Ok(())
}

fn all_fields(value: &mut Value, rest: &str) -> Result<(), EvalError> {
    let Value::Map(map) = value else {
        return Err(EvalError::NotAStructure);
    };
    for item in map.values_mut() {
        absorb_mismatch(transform(item, rest))?;
    }
    Ok(())
}

fn explicit_index(value: &mut Value, index: usize, rest: &str) -> Result<(), EvalError> {
    let Value::List(items) = value else {
        return Err(EvalError::NotAList);
    };
    if let Some(item) = items.get_mut(index) {
        absorb_mismatch(transform(item, rest))?;
    }
    Ok(())
}

fn explicit_field(value: &mut Value, field: &str, rest: &str) -> Result<(), EvalError> {
    if !value.is_map() {
        return Err(EvalError::NotAStructure);
    }
    if field.is_empty() {
        absorb_mismatch(transform(value, rest))?;
        return Ok(());
    }

    let Value::Map(map) = value else {
        return Err(EvalError::NotAStructure);
    };
    if let Some(item) = map.get_mut(field) {
        absorb_mismatch(transform(item, rest))?;
    }
    Ok(())
}

/// Copies the value at `src` to `dest`, both relative to `value`.
fn replace(value: &mut Value, dest: &str, src: &str) -> Result<(), EvalError> {
    let dest: Path = dest.parse()?;
    let src: Path = src.parse()?;

    let copied = src.get(value)?.clone();
    dest.set(value, copied)
}
