use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::manipulators::{get_value, set_value};
use crate::parse::parse_path;
use crate::value::Value;

/// One step of an explicit path.
///
/// An empty `Key` is written as a bare `.` and addresses the map itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathToken::Key(key) => write!(f, ".{key}"),
            PathToken::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A fully explicit address into a [`Value`], e.g. `.a[2].b`.
///
/// The empty path addresses the value itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    tokens: Vec<PathToken>,
}

impl FromStr for Path {
    type Err = EvalError;

    /// Parses an explicit path. Anything other than exact indices and fields,
    /// such as `[]` or `.()`, is an [`EvalError::IllegalOperation`].
    ///
    /// ## Example
    ///
    /// ```rust
    /// use dft::{Path, PathToken};
    ///
    /// let path: Path = ".x.z[1]".parse().unwrap();
    /// assert_eq!(
    ///     path.tokens(),
    ///     &[
    ///         PathToken::Key("x".to_string()),
    ///         PathToken::Key("z".to_string()),
    ///         PathToken::Index(1),
    ///     ]
    /// );
    /// ```
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_path(input).map(|tokens| Path { tokens })
    }
}

impl Path {
    pub fn tokens(&self) -> &[PathToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Reads the value at this path.
    pub fn get<'a>(&self, value: &'a Value) -> Result<&'a Value, EvalError> {
        get_value(value, &self.tokens)
    }

    /// **Sets** `new` at this path, growing lists and maps as needed.
    ///
    /// Lists are padded with nulls up to the target index and absent
    /// intermediate slots become fresh containers of the kind the next token
    /// asks for. An existing slot of the wrong kind is an error, and a failed
    /// set leaves `value` untouched.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use dft::{Path, Value};
    /// use serde_json::json;
    ///
    /// let mut value = Value::from(json!([1, 2, 3, 4]));
    /// let path: Path = "[6]".parse().unwrap();
    /// path.set(&mut value, Value::Int(3)).unwrap();
    ///
    /// assert_eq!(value, Value::from(json!([1, 2, 3, 4, null, null, 3])));
    /// ```
    pub fn set(&self, value: &mut Value, new: Value) -> Result<(), EvalError> {
        set_value(value, &self.tokens, new)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tokens.iter().try_for_each(|token| write!(f, "{token}"))
    }
}

/// Where a chain hands its final value for display instead of JSON output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDirective {
    /// `o:template=<text>`
    Template(String),
    /// `o:templatefile=<path>`
    TemplateFile(PathBuf),
}

/// A classified directive, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `f:<filter>`
    Filter(String),
    /// `t:<transform>`
    Transform(String),
    /// `o:template=...` or `o:templatefile=...`
    Output(OutputDirective),
}

impl FromStr for Directive {
    type Err = EvalError;

    /// Classifies a directive by its prefix. The operator text itself is only
    /// checked when the directive is evaluated.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use dft::Directive;
    ///
    /// let directive: Directive = "f:[]=2".parse().unwrap();
    /// assert_eq!(directive, Directive::Filter("[]=2".to_string()));
    /// assert!("x:[]=2".parse::<Directive>().is_err());
    /// ```
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if let Some(filter) = input.strip_prefix("f:") {
            return Ok(Directive::Filter(filter.to_string()));
        }
        if let Some(transform) = input.strip_prefix("t:") {
            return Ok(Directive::Transform(transform.to_string()));
        }
        if let Some(output) = input.strip_prefix("o:") {
            if let Some(path) = output.strip_prefix("templatefile=") {
                return Ok(Directive::Output(OutputDirective::TemplateFile(
                    PathBuf::from(path),
                )));
            }
            if let Some(template) = output.strip_prefix("template=") {
                return Ok(Directive::Output(OutputDirective::Template(
                    template.to_string(),
                )));
            }
        }
        Err(EvalError::UnrecognizedOperator(input.to_string()))
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Filter(text) => write!(f, "f:{text}"),
            Directive::Transform(text) => write!(f, "t:{text}"),
            Directive::Output(OutputDirective::Template(text)) => write!(f, "o:template={text}"),
            Directive::Output(OutputDirective::TemplateFile(path)) => {
                write!(f, "o:templatefile={}", path.display())
            }
        }
    }
}

/// Outcome of evaluating a directive against a value.
///
/// The first four variants are data outcomes: the value simply does not fit
/// the directive. The rest mean the directive text itself is unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("not a list")]
    NotAList,
    #[error("not a structure")]
    NotAStructure,
    #[error("not found")]
    NotFound,
    #[error("values do not match")]
    NoMatch,
    #[error("illegal operation: {0}")]
    IllegalOperation(String),
    #[error("unrecognized operation: {0:?}")]
    UnrecognizedOperator(String),
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl EvalError {
    /// True when retrying with a different value would fail the same way.
    pub fn is_directive_error(&self) -> bool {
        matches!(
            self,
            EvalError::IllegalOperation(_)
                | EvalError::UnrecognizedOperator(_)
                | EvalError::InvalidPattern { .. }
        )
    }
}

/// A directive error raised while running a chain, naming the directive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("error with {directive:?}: {source}")]
pub struct DirectiveError {
    pub directive: String,
    #[source]
    pub source: EvalError,
}

/// Turns a data rejection into `Ok(false)` while letting directive errors through.
pub(crate) fn absorb_mismatch(result: Result<(), EvalError>) -> Result<bool, EvalError> {
    match result {
        Ok(()) => Ok(true),
        Err(err) if err.is_directive_error() => Err(err),
        Err(_) => Ok(false),
    }
}
