// type_utils_tests.rs
use dautils::type_utils::{
    check_list_element_types, check_list_element_types_soft, check_map_value_types,
    check_map_value_types_soft, convert_list_element_types, ValueKind,
};
use dautils::UtilsError;
use serde_json::{json, Map, Value};

fn params() -> Map<String, Value> {
    json!({
        "host": "db01.internal",
        "port": 1521,
        "user": "scott",
        "service": "orclpdb1"
    })
    .as_object()
    .unwrap()
    .clone()
}

#[test]
fn map_check_passes_when_all_values_match() {
    let map = params();
    assert!(check_map_value_types(&map, ValueKind::String, Some(&["host", "user"])).is_ok());
}

#[test]
fn map_check_defaults_to_all_keys() {
    let map = params();
    // "port" is a number, so checking all keys against String must fail
    let err = check_map_value_types(&map, ValueKind::String, None).unwrap_err();
    match err {
        UtilsError::InvalidType { subject, .. } => assert!(subject.contains("port")),
        other => panic!("expected InvalidType, got {:?}", other),
    }
}

#[test]
fn map_check_reports_missing_key_as_shape_error() {
    let map = params();
    let err = check_map_value_types(&map, ValueKind::String, Some(&["password"])).unwrap_err();
    assert!(matches!(err, UtilsError::InvalidShape(_)));
}

#[test]
fn map_check_never_mutates_input() {
    let map = params();
    let before = map.clone();
    let _ = check_map_value_types(&map, ValueKind::Number, None);
    assert_eq!(map, before);
}

#[test]
fn soft_map_check_returns_bool_instead_of_error() {
    let map = params();
    assert!(check_map_value_types_soft(&map, ValueKind::String, Some(&["host"])));
    assert!(!check_map_value_types_soft(&map, ValueKind::String, None));
    assert!(!check_map_value_types_soft(&map, ValueKind::String, Some(&["password"])));
}

#[test]
fn list_check_honors_index_subset() {
    let list = vec![json!(1), json!(2), json!("three")];
    assert!(check_list_element_types(&list, ValueKind::Number, Some(&[0, 1])).is_ok());
    assert!(check_list_element_types(&list, ValueKind::Number, None).is_err());
}

#[test]
fn list_check_bounds_indices_against_sequence_length() {
    let list = vec![json!(1), json!(2), json!(3), json!(4)];

    // an index list shorter than its largest member is fine as long as the
    // sequence is long enough
    assert!(check_list_element_types(&list, ValueKind::Number, Some(&[3])).is_ok());

    let err = check_list_element_types(&list, ValueKind::Number, Some(&[1, 9])).unwrap_err();
    match err {
        UtilsError::IndexOutOfRange(msg) => assert!(msg.contains('9')),
        other => panic!("expected IndexOutOfRange, got {:?}", other),
    }
}

#[test]
fn soft_list_check_mirrors_strict_results() {
    let list = vec![json!("a"), json!("b")];
    assert!(check_list_element_types_soft(&list, ValueKind::String, None));
    assert!(!check_list_element_types_soft(&list, ValueKind::Number, None));
    assert!(!check_list_element_types_soft(&list, ValueKind::String, Some(&[5])));
}

#[test]
fn convert_to_number_handles_strings_and_bools() {
    let list = vec![json!("3"), json!("4.5"), json!(true), json!(7)];
    let converted = convert_list_element_types(&list, ValueKind::Number).unwrap();
    assert_eq!(converted[0], json!(3));
    assert_eq!(converted[1], json!(4.5));
    assert_eq!(converted[2], json!(1));
    assert_eq!(converted[3], json!(7));
}

#[test]
fn convert_to_string_renders_numbers() {
    let list = vec![json!(12), json!("kept"), json!(false)];
    let converted = convert_list_element_types(&list, ValueKind::String).unwrap();
    assert_eq!(converted[0], json!("12"));
    assert_eq!(converted[1], json!("kept"));
    assert_eq!(converted[2], json!("false"));
}

#[test]
fn convert_leaves_input_untouched_and_fails_on_impossible_elements() {
    let list = vec![json!("not a number")];
    let before = list.clone();
    let err = convert_list_element_types(&list, ValueKind::Number).unwrap_err();
    assert!(matches!(err, UtilsError::InvalidType { .. }));
    assert_eq!(list, before);
}

#[test]
fn convert_rejects_unsupported_targets() {
    let list = vec![json!(1)];
    let err = convert_list_element_types(&list, ValueKind::Array).unwrap_err();
    assert!(matches!(err, UtilsError::InvalidShape(_)));
}
