use netbox_env::infrastructure::env::{is_truthy, EnvReader, TRUTHY_TOKENS};
use netbox_env::MapEnv;
use proptest::prelude::*;
use serde_json::Value;

/// Random casings of the truthy tokens.
fn truthy_token() -> impl Strategy<Value = String> {
    (0..TRUTHY_TOKENS.len(), any::<u64>()).prop_map(|(index, mask)| {
        TRUTHY_TOKENS[index]
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if (mask >> (i % 64)) & 1 == 1 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    })
}

/// Arbitrary JSON values with object keys and strings kept printable.
fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 _.-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    /// Property: any casing of a truthy token reads as true
    #[test]
    fn prop_truthy_tokens_any_case(token in truthy_token()) {
        let reader = EnvReader::new(MapEnv::new().with("FLAG", token.clone()));
        prop_assert!(reader.get_bool("FLAG", false), "{} should be true", token);
    }

    /// Property: a present value outside the truthy set is false, never the default
    #[test]
    fn prop_other_values_are_false(value in "\\PC{0,10}") {
        prop_assume!(!is_truthy(&value));
        let reader = EnvReader::new(MapEnv::new().with("FLAG", value));
        prop_assert!(!reader.get_bool("FLAG", true));
    }

    /// Property: splitting then joining a list restores the raw value, in order
    #[test]
    fn prop_list_split_preserves_order(items in prop::collection::vec("[a-z0-9.*-]{0,8}", 1..8)) {
        let raw = items.join(",");
        let reader = EnvReader::new(MapEnv::new().with("LIST", raw));
        prop_assert_eq!(reader.get_list("LIST", vec![], ","), items);
    }

    /// Property: integers round-trip through their decimal form
    #[test]
    fn prop_integers_round_trip(n in any::<i64>()) {
        let reader = EnvReader::new(MapEnv::new().with("N", n.to_string()));
        prop_assert_eq!(reader.get_int("N", 0).unwrap(), n);
    }

    /// Property: well-formed JSON parses to an equal value
    #[test]
    fn prop_json_round_trips(value in json_value()) {
        let raw = serde_json::to_string(&value).unwrap();
        let reader = EnvReader::new(MapEnv::new().with("JSON", raw));
        prop_assert_eq!(reader.get_json("JSON", Value::Null).unwrap(), value);
    }
}
