// text_utils_tests.rs
use chrono::Duration;
use dautils::text_utils::{
    count_elements, count_value_elements, filter_duplicate_words, split_indices,
    string_to_duration,
};
use dautils::UtilsError;
use serde_json::json;
use std::collections::HashSet;

#[test]
fn duration_with_day_count() {
    let d = string_to_duration("1.02:03:04").unwrap();
    assert_eq!(d, Duration::days(1) + Duration::seconds(7384));
    assert_eq!(d.num_seconds(), 86400 + 7384);
}

#[test]
fn duration_without_day_count() {
    let d = string_to_duration("02:03:04").unwrap();
    assert_eq!(d, Duration::seconds(7384));
}

#[test]
fn duration_allows_fields_beyond_clock_range() {
    // hour/minute/second fields are plain integers, not clock positions
    let d = string_to_duration("25:00:61").unwrap();
    assert_eq!(d, Duration::seconds(25 * 3600 + 61));
}

#[test]
fn duration_rejects_malformed_strings() {
    for bad in ["bad", "1:02", "1.2.3:04:05", "01:02:03:04", "aa:bb:cc", ""] {
        let err = string_to_duration(bad).unwrap_err();
        assert!(
            matches!(err, UtilsError::InvalidFormat { .. }),
            "expected InvalidFormat for {:?}",
            bad
        );
    }
}

#[test]
fn split_indices_partitions_evenly() {
    assert_eq!(split_indices(10, 3).unwrap(), vec![3, 6]);
    assert_eq!(split_indices(9, 3).unwrap(), vec![3, 6]);
    assert_eq!(split_indices(7, 2).unwrap(), vec![3]);
    assert_eq!(split_indices(5, 1).unwrap(), Vec::<usize>::new());
    assert_eq!(split_indices(0, 4).unwrap(), vec![0, 0, 0]);
}

#[test]
fn split_indices_sizes_differ_by_at_most_one() {
    for len in 0..40usize {
        for n in 1..8usize {
            let cuts = split_indices(len, n).unwrap();
            assert_eq!(cuts.len(), n - 1);

            let mut bounds = vec![0usize];
            bounds.extend(&cuts);
            bounds.push(len);

            let sizes: Vec<usize> = bounds.windows(2).map(|w| w[1] - w[0]).collect();
            let min = sizes.iter().min().unwrap();
            let max = sizes.iter().max().unwrap();
            assert!(max - min <= 1, "len={} n={} sizes={:?}", len, n, sizes);

            for w in cuts.windows(2) {
                assert!(w[0] <= w[1]);
            }
        }
    }
}

#[test]
fn split_indices_rejects_zero_split_count() {
    assert!(matches!(
        split_indices(10, 0).unwrap_err(),
        UtilsError::InvalidShape(_)
    ));
}

#[test]
fn keep_last_preserves_last_occurrences_in_order() {
    assert_eq!(filter_duplicate_words("a b a c b", " ", true), "a c b");
    assert_eq!(filter_duplicate_words("x,y,x", ",", true), "y,x");
    assert_eq!(filter_duplicate_words("solo", " ", true), "solo");
}

#[test]
fn forward_filter_keeps_unique_words_in_no_defined_order() {
    let result = filter_duplicate_words("a b a c b", " ", false);
    let words: HashSet<&str> = result.split(' ').collect();
    assert_eq!(words, HashSet::from(["a", "b", "c"]));
}

#[test]
fn count_elements_tallies_occurrences() {
    let counts = count_elements(vec!["x", "y", "x", "x"]);
    assert_eq!(counts["x"], 3);
    assert_eq!(counts["y"], 1);
    assert_eq!(counts.len(), 2);
}

#[test]
fn count_value_elements_over_arrays_strings_and_objects() {
    let counts = count_value_elements(&json!(["a", "b", "a", 1, 1])).unwrap();
    assert_eq!(counts["a"], 2);
    assert_eq!(counts["b"], 1);
    assert_eq!(counts["1"], 2);

    let counts = count_value_elements(&json!("abca")).unwrap();
    assert_eq!(counts["a"], 2);
    assert_eq!(counts["c"], 1);

    let counts = count_value_elements(&json!({"k1": 1, "k2": 2})).unwrap();
    assert_eq!(counts["k1"], 1);
    assert_eq!(counts.len(), 2);
}

#[test]
fn count_value_elements_rejects_scalars() {
    for scalar in [json!(42), json!(true), json!(null)] {
        assert!(matches!(
            count_value_elements(&scalar).unwrap_err(),
            UtilsError::NotIterable(_)
        ));
    }
}
