use dft::{Evaluator, Path, Value};
use proptest::prelude::*;
use std::collections::HashMap;

fn ints(max_len: usize) -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(0i64..5, 0..max_len)
}

fn list(items: &[i64]) -> Value {
    Value::List(items.iter().copied().map(Value::Int).collect())
}

proptest! {
    #[test]
    fn set_replaces_only_the_target_index(items in ints(12), index in 0usize..12, new in 100i64..200) {
        prop_assume!(index < items.len());
        let mut value = list(&items);
        let path: Path = format!("[{index}]").parse().unwrap();
        path.set(&mut value, Value::Int(new)).unwrap();

        let mut expected = items.clone();
        expected[index] = new;
        prop_assert_eq!(value, list(&expected));
    }

    #[test]
    fn set_past_the_end_pads_with_null(items in ints(6), index in 0usize..12) {
        prop_assume!(index >= items.len());
        let mut value = list(&items);
        let path: Path = format!("[{index}]").parse().unwrap();
        path.set(&mut value, Value::Int(-1)).unwrap();

        let Value::List(grown) = value else { panic!("expected a list") };
        prop_assert_eq!(grown.len(), index + 1);
        prop_assert_eq!(Value::List(grown[..items.len()].to_vec()), list(&items));
        prop_assert!(grown[items.len()..index].iter().all(|v| *v == Value::Null));
        prop_assert_eq!(&grown[index], &Value::Int(-1));
    }

    #[test]
    fn list_exclusion_keeps_matches_in_order(items in ints(16), target in 0i64..5) {
        let evaluator = Evaluator::new();
        let output = evaluator.filter(list(&items), &format!("[]={target}")).unwrap();

        let expected: Vec<i64> = items.iter().copied().filter(|i| *i == target).collect();
        prop_assert_eq!(output, list(&expected));
    }

    #[test]
    fn list_existence_passes_whole_value(items in ints(16), target in 0i64..5) {
        let evaluator = Evaluator::new();
        let result = evaluator.filter(list(&items), &format!("[E]={target}"));

        if items.contains(&target) {
            prop_assert_eq!(result.unwrap(), list(&items));
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn cut_selects_by_token_order(items in ints(8), picks in prop::collection::vec(0usize..10, 1..6)) {
        let evaluator = Evaluator::new();
        let tokens: Vec<String> = picks.iter().map(usize::to_string).collect();
        let output = evaluator.filter(list(&items), &format!("@{}", tokens.join(","))).unwrap();

        let expected: Vec<i64> = picks.iter().filter_map(|i| items.get(*i).copied()).collect();
        prop_assert_eq!(output, list(&expected));
    }

    #[test]
    fn field_exclusion_keeps_matching_entries(entries in prop::collection::hash_map("[a-z]{1,6}", 0i64..4, 0..10), target in 0i64..4) {
        let evaluator = Evaluator::new();
        let map: HashMap<String, Value> = entries.iter().map(|(k, v)| (k.clone(), Value::Int(*v))).collect();
        let output = evaluator.filter(Value::Map(map), &format!(".()={target}")).unwrap();

        let expected: HashMap<String, Value> = entries
            .into_iter()
            .filter(|(_, v)| *v == target)
            .map(|(k, v)| (k, Value::Int(v)))
            .collect();
        prop_assert_eq!(output, Value::Map(expected));
    }

    #[test]
    fn copy_then_read_back(items in ints(8), from in 0usize..8, to in 0usize..16) {
        prop_assume!(from < items.len());
        let evaluator = Evaluator::new();
        let output = evaluator.transform(list(&items), &format!("{{[{to}]=[{from}]}}")).unwrap();

        let path: Path = format!("[{to}]").parse().unwrap();
        prop_assert_eq!(path.get(&output).unwrap(), &Value::Int(items[from]));
    }
}
