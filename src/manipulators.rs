use std::collections::HashMap;

use crate::types::{EvalError, PathToken};
use crate::value::Value;

/// Reads the value at the path tokens.
///
/// # Arguments
///
/// * `value` - The value to read from.
/// * `tokens` - The path tokens; empty means `value` itself.
pub fn get_value<'a>(value: &'a Value, tokens: &[PathToken]) -> Result<&'a Value, EvalError> {
    let Some((head, rest)) = tokens.split_first() else {
        return Ok(value);
    };

    let next = match (head, value) {
        (PathToken::Key(key), Value::Map(_)) if key.is_empty() => value,
        (PathToken::Key(key), Value::Map(map)) => map.get(key).ok_or(EvalError::NotFound)?,
        (PathToken::Key(_), _) => return Err(EvalError::NotAStructure),
        (PathToken::Index(index), Value::List(items)) => {
            items.get(*index).ok_or(EvalError::NotFound)?
        }
        (PathToken::Index(_), _) => return Err(EvalError::NotAList),
    };
    get_value(next, rest)
}

/// Sets a value into `target` at the path tokens, growing containers on the way.
///
/// Existing slots are walked, never overwritten by a container of another
/// kind. The subtree for the first absent slot is built before it is attached,
/// so an error always leaves `target` as it was.
///
/// # Arguments
///
/// * `target` - The value to set into.
/// * `tokens` - The path tokens representing where to set.
/// * `value` - The value to set.
pub fn set_value(target: &mut Value, tokens: &[PathToken], value: Value) -> Result<(), EvalError> {
    let Some((head, rest)) = tokens.split_first() else {
        *target = value;
        return Ok(());
    };

    match head {
        PathToken::Key(key) if key.is_empty() => {
            if !target.is_map() {
                return Err(EvalError::NotAStructure);
            }
            set_value(target, rest, value)
        }
        PathToken::Key(key) => {
            let Value::Map(map) = target else {
                return Err(EvalError::NotAStructure);
            };
            if let Some(slot) = map.get_mut(key) {
                return set_value(slot, rest, value);
            }
            map.insert(key.clone(), grow(rest, value)?);
            Ok(())
        }
        PathToken::Index(index) => {
            let Value::List(items) = target else {
                return Err(EvalError::NotAList);
            };
            if let Some(slot) = items.get_mut(*index) {
                return set_value(slot, rest, value);
            }
            let slot = grow(rest, value)?;
            index
                .checked_add(1)
                .and_then(|len| items.try_reserve(len - items.len()).ok())
                .ok_or_else(|| {
                    EvalError::IllegalOperation(format!("cannot grow a list to index {index}"))
                })?;
            items.resize(*index, Value::Null);
            items.push(slot);
            Ok(())
        }
    }
}

/// Builds the subtree for a slot that did not exist yet.
fn grow(tokens: &[PathToken], value: Value) -> Result<Value, EvalError> {
    let mut fresh = match tokens.first() {
        None => return Ok(value),
        Some(PathToken::Key(_)) => Value::Map(HashMap::new()),
        Some(PathToken::Index(_)) => Value::List(Vec::new()),
    };
    set_value(&mut fresh, tokens, value)?;
    Ok(fresh)
}
