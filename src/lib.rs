//! # dft
//!
//! Filter and transform JSON values with short path-based directives.
//!
//! A directive is a string such as `f:[].x=y1` (keep the list elements whose `x` is `y1`)
//! or `t:{.y=.x}` (copy `x` to `y`). Directives are applied one after another to each
//! input value; a filter that rejects drops the value from the output.
//!
//! ## Filters
//!
//! - **Comparison:** `=literal` compares numbers numerically and strings exactly.
//!   `=/regex/` matches a string anywhere, `="..."` quotes a literal that would otherwise
//!   look like an operator, and `=.path` or `=[N]...` compares against another part of the
//!   root value.
//! - **Exact index and field:** `[N]` and `.name` descend, or test presence when nothing follows.
//! - **Exclusion:** `[]` keeps the list elements that pass the rest of the directive, `.()`
//!   does the same for map entries.
//! - **Existence:** `[E]` and `.(E)` pass the whole value if any element or entry passes.
//! - **Groups:** `{f1,f2}` applies every filter in turn, with the group's value as the new root.
//! - **Cut:** `@a,b` keeps only the named fields, or the listed indices in the listed order.
//!
//! ## Transforms
//!
//! `[]`, `[N]`, `.()` and `.name` descend as for filters, and `{dest=src}` copies the value
//! at `src` to `dest`. Destinations grow as needed: maps gain keys, lists are padded with null.
//!
//! ## Examples
//!
//! ### Filtering
//!
//! ```rust
//! use dft::{Evaluator, Value};
//! use serde_json::json;
//!
//! let evaluator = Evaluator::new();
//! let input = Value::from(json!([
//!     {"meta": [{"key": "name", "value": "john"}], "useful": "information"},
//!     {"meta": [{"key": "name", "value": "stephanie"}], "useful": "other information"}
//! ]));
//!
//! let matched = evaluator
//!     .filter(input, "[].meta[E]{.key=name,.value=john}")
//!     .unwrap();
//! let trimmed = evaluator.filter(matched, "[]@useful").unwrap();
//!
//! assert_eq!(trimmed, Value::from(json!([{"useful": "information"}])));
//! ```
//!
//! ### Transforming
//!
//! ```rust
//! use dft::{Evaluator, Value};
//! use serde_json::json;
//!
//! let evaluator = Evaluator::new();
//! let input = Value::from(json!([{"x": 2}, {"x": 4}]));
//!
//! let output = evaluator.transform(input, "[]{.y=.x}").unwrap();
//! assert_eq!(output, Value::from(json!([{"x": 2, "y": 2}, {"x": 4, "y": 4}])));
//! ```
//!
//! ### Running a chain
//!
//! ```rust
//! use dft::{Directive, Evaluator, Value};
//! use serde_json::json;
//!
//! let evaluator = Evaluator::new();
//! let directives: Vec<Directive> = ["f:.x=3", "t:{.w=.y}"]
//!     .iter()
//!     .map(|d| d.parse().unwrap())
//!     .collect();
//!
//! let kept = evaluator
//!     .run(Value::from(json!({"x": 3, "y": 2})), &directives)
//!     .unwrap();
//! assert_eq!(kept.unwrap().value, Value::from(json!({"x": 3, "y": 2, "w": 2})));
//!
//! // A rejected record produces nothing.
//! let dropped = evaluator
//!     .run(Value::from(json!({"x": 1, "y": 2})), &directives)
//!     .unwrap();
//! assert!(dropped.is_none());
//! ```

mod evaluator;
mod filter;
mod manipulators;
mod parse;
mod patterns;
mod render;
mod transform;
mod types;
mod value;

pub use evaluator::{Emit, Evaluator};
pub use manipulators::{get_value, set_value};
pub use parse::{assignment, cut, exact_field, exact_index, group, parse_path};
pub use patterns::PatternCache;
pub use render::render;
pub use types::{Directive, DirectiveError, EvalError, OutputDirective, Path, PathToken};
pub use value::Value;
