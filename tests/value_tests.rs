use dft::Value;
use serde_json::json;
use std::collections::HashMap;
use yare::parameterized;

#[parameterized(
    integer = { "1", Value::Int(1) },
    negative = { "-7", Value::Int(-7) },
    float = { "1.0", Value::Float(1.0) },
    exponent = { "1e3", Value::Float(1000.0) },
    beyond_i64 = { "18446744073709551615", Value::Float(18446744073709551615.0) },
    string = { r#""x""#, Value::String("x".to_string()) },
    null = { "null", Value::Null },
    boolean = { "false", Value::Bool(false) },
)]
fn test_deserialize(input: &str, expected: Value) {
    let value: Value = serde_json::from_str(input).expect("Failed to deserialize");
    assert_eq!(value, expected);
}

#[test]
fn test_int_is_not_float() {
    assert_ne!(Value::Int(1), Value::Float(1.0));
    assert_ne!(Value::from(json!(1)), Value::from(json!(1.0)));
}

#[test]
fn test_serialize_sorts_keys() {
    let map: HashMap<String, Value> = ["zeta", "alpha", "mid"]
        .into_iter()
        .enumerate()
        .map(|(i, key)| (key.to_string(), Value::Int(i as i64)))
        .collect();
    let value = Value::Map(map);

    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"alpha":1,"mid":2,"zeta":0}"#
    );
    assert_eq!(value.to_string(), r#"{"alpha":1,"mid":2,"zeta":0}"#);
}

#[test]
fn test_pretty_output_is_sorted() {
    let value = Value::from(json!({"b": [1, 2.5], "a": {"d": null, "c": "x"}}));
    let expected = "{\n  \"a\": {\n    \"c\": \"x\",\n    \"d\": null\n  },\n  \"b\": [\n    1,\n    2.5\n  ]\n}";

    assert_eq!(serde_json::to_string_pretty(&value).unwrap(), expected);
}

#[test]
fn test_convert_back_to_json() {
    let original = json!({"a": [1, 2.5, "x", null, true], "b": {"c": -3}});
    let back = serde_json::Value::from(Value::from(original.clone()));

    assert_eq!(back, original);
}

#[parameterized(
    null = { json!(null), "null" },
    boolean = { json!(true), "bool" },
    int = { json!(1), "int" },
    float = { json!(1.5), "float" },
    string = { json!("s"), "string" },
    list = { json!([]), "list" },
    map = { json!({}), "map" },
)]
fn test_kind(input: serde_json::Value, expected: &str) {
    assert_eq!(Value::from(input).kind(), expected);
}

#[test]
fn test_default_is_null() {
    assert_eq!(Value::default(), Value::Null);
}
