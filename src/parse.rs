use crate::types::{EvalError, PathToken};
use nom::{
    branch::alt,
    bytes::complete::{take_till, take_while},
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res},
    multi::many0,
    sequence::{delimited, preceded, separated_pair},
    IResult, Parser,
};
use nom_language::error::VerboseError;

type Res<T, U> = IResult<T, U, VerboseError<T>>;

/// Matches an exact index such as `[12]` at the start of `input`.
///
/// Returns the remaining input and the index. Only decimal digits are
/// accepted, so `[-1]`, `[]` and `[E]` do not match.
pub fn exact_index(input: &str) -> Res<&str, usize> {
    delimited(
        char('['),
        map_res(digit1, |digits: &str| digits.parse::<usize>()),
        char(']'),
    )
    .parse(input)
}

/// Matches an exact field such as `.name` at the start of `input`.
///
/// The name is the greedy run of letters and digits after the dot and may be
/// empty: a bare `.` yields `""`.
pub fn exact_field(input: &str) -> Res<&str, &str> {
    preceded(char('.'), take_while(|c: char| c.is_alphanumeric())).parse(input)
}

/// Splits a brace group `{a,b{c,d},e}` on its top-level commas.
///
/// The group must span the whole input; unbalanced braces or trailing text
/// after the closing brace fail the match.
pub fn group(input: &str) -> Option<Vec<&str>> {
    let body = input.strip_prefix('{')?;
    let mut parts = Vec::new();
    let mut depth = 1usize;
    let mut start = 0;

    for (offset, c) in body.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    if offset + 1 != body.len() {
                        return None;
                    }
                    parts.push(&body[start..offset]);
                    return Some(parts);
                }
            }
            ',' if depth == 1 => {
                parts.push(&body[start..offset]);
                start = offset + 1;
            }
            _ => {}
        }
    }
    None
}

/// Splits a cut list `@a,b,0` on every comma. Tokens are untyped here.
pub fn cut(input: &str) -> Option<Vec<&str>> {
    input.strip_prefix('@').map(|list| list.split(',').collect())
}

/// Matches a whole assignment `{dest=src}` and returns `(dest, src)`.
pub fn assignment(input: &str) -> Option<(&str, &str)> {
    let parsed: Res<&str, (&str, &str)> = all_consuming(delimited(
        char('{'),
        separated_pair(assignment_side, char('='), assignment_side),
        char('}'),
    ))
    .parse(input);
    parsed.ok().map(|(_, pair)| pair)
}

fn assignment_side(input: &str) -> Res<&str, &str> {
    take_till(|c: char| c == '=' || c == '}').parse(input)
}

fn path_tokens(input: &str) -> Res<&str, Vec<PathToken>> {
    many0(alt((
        map(exact_index, PathToken::Index),
        map(exact_field, |field: &str| PathToken::Key(field.to_string())),
    )))
    .parse(input)
}

/// Parses an explicit path made of exact indices and fields only.
pub fn parse_path(input: &str) -> Result<Vec<PathToken>, EvalError> {
    let (rest, tokens) =
        path_tokens(input).map_err(|err| EvalError::IllegalOperation(format!("{err}")))?;
    if !rest.is_empty() {
        return Err(EvalError::IllegalOperation(format!(
            "cannot use {rest:?} in an explicit path"
        )));
    }
    Ok(tokens)
}
