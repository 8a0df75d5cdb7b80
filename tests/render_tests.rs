use dft::{render, EvalError, Value};
use serde_json::json;
use yare::parameterized;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[parameterized(
    plain_text = { json!({"x": 1}), "no placeholders", "no placeholders" },
    string_is_raw = { json!({"name": "john"}), "hello {{.name}}", "hello john" },
    number = { json!({"x": 2, "y": 3}), "{{.x}} {{.y}}\n", "2 3\n" },
    float = { json!({"x": 1.5}), "{{.x}}", "1.5" },
    nested = { json!({"a": [{"b": true}]}), "{{.a[0].b}}", "true" },
    container_is_compact_json = { json!({"a": {"c": [1, 2], "b": null}}), "{{.a}}", r#"{"b":null,"c":[1,2]}"# },
    whole_value_dot = { json!({"b": 1, "a": 2}), "{{.}}", r#"{"a":2,"b":1}"# },
    whole_value_empty = { json!([1, "x"]), "{{}}", r#"[1,"x"]"# },
    whitespace_trimmed = { json!({"x": 1}), "{{ .x }}", "1" },
    missing_is_empty = { json!({"x": 1}), "[{{.y}}]", "[]" },
    wrong_shape_is_empty = { json!([1]), "[{{.x}}]", "[]" },
    adjacent = { json!({"x": "a", "y": "b"}), "{{.x}}{{.y}}", "ab" },
    single_braces_are_text = { json!({"x": 1}), "{.x} {{.x}}", "{.x} 1" },
)]
fn test_render_ok(input: serde_json::Value, template: &str, expected: &str) {
    assert_eq!(render(&v(input), template).unwrap(), expected);
}

#[parameterized(
    unclosed = { "{{.x" },
    unclosed_after_placeholder = { "{{.x}} {{.y" },
    non_explicit_path = { "{{.x[]}}" },
    not_a_path = { "{{x}}" },
)]
fn test_render_err(template: &str) {
    let err = render(&v(json!({"x": [1]})), template).unwrap_err();
    assert!(
        matches!(err, EvalError::IllegalOperation(_)),
        "unexpected error for {template:?}: {err:?}"
    );
}
