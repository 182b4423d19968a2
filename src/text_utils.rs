// text_utils.rs
use crate::error::{Result, UtilsError};
use chrono::Duration;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

lazy_static! {
    // [days.]HH:MM:SS, with an optional signed day count.
    static ref DURATION_RE: Regex = Regex::new(r"^(?:(-?\d+)\.)?(\d+):(\d+):(\d+)$").unwrap();
}

fn invalid_duration(text: &str) -> UtilsError {
    UtilsError::InvalidFormat {
        value: text.to_string(),
        expected: "duration".to_string(),
    }
}

/// Parses a `"[days.]HH:MM:SS"` string into a `chrono::Duration`.
///
/// An absent day count means zero days; the time part must be exactly three
/// colon-separated integer fields. Any other shape is an `InvalidFormat`
/// error.
///
/// ```
/// use dautils::text_utils::string_to_duration;
/// use chrono::Duration;
///
/// let d = string_to_duration("1.02:03:04").unwrap();
/// assert_eq!(d, Duration::days(1) + Duration::seconds(7384));
///
/// let d = string_to_duration("02:03:04").unwrap();
/// assert_eq!(d, Duration::seconds(7384));
///
/// assert!(string_to_duration("bad").is_err());
/// ```
pub fn string_to_duration(text: &str) -> Result<Duration> {
    let caps = DURATION_RE.captures(text).ok_or_else(|| invalid_duration(text))?;

    let days: i64 = match caps.get(1) {
        Some(m) => m.as_str().parse().map_err(|_| invalid_duration(text))?,
        None => 0,
    };
    let hours: i64 = caps[2].parse().map_err(|_| invalid_duration(text))?;
    let minutes: i64 = caps[3].parse().map_err(|_| invalid_duration(text))?;
    let seconds: i64 = caps[4].parse().map_err(|_| invalid_duration(text))?;

    let total_sec = seconds + minutes * 60 + hours * 3600;
    Ok(Duration::days(days) + Duration::seconds(total_sec))
}

/// Returns `split_n - 1` ascending cut points dividing a collection of
/// length `len` into `split_n` roughly equal contiguous parts, computed as
/// `floor(len * (i + 1) / split_n)`.
///
/// Mapping callers pass their key count as `len`. `split_n == 0` is an
/// `InvalidShape` error.
///
/// ```
/// use dautils::text_utils::split_indices;
///
/// assert_eq!(split_indices(10, 3).unwrap(), vec![3, 6]);
/// assert_eq!(split_indices(10, 1).unwrap(), Vec::<usize>::new());
/// assert!(split_indices(10, 0).is_err());
/// ```
pub fn split_indices(len: usize, split_n: usize) -> Result<Vec<usize>> {
    if split_n == 0 {
        return Err(UtilsError::InvalidShape(
            "split count must be at least 1".to_string(),
        ));
    }

    Ok((0..split_n - 1).map(|i| len * (i + 1) / split_n).collect())
}

/// Removes duplicated words from `text`, split on `sep`.
///
/// With `keep_last = true`, each word's last occurrence survives and the
/// survivors keep their relative order. With `keep_last = false`, the unique
/// words are joined in no defined order (set semantics).
///
/// ```
/// use dautils::text_utils::filter_duplicate_words;
///
/// assert_eq!(filter_duplicate_words("a b a c b", " ", true), "a c b");
/// ```
pub fn filter_duplicate_words(text: &str, sep: &str, keep_last: bool) -> String {
    let words: Vec<&str> = text.split(sep).collect();

    if keep_last {
        let mut last_index: HashMap<&str, usize> = HashMap::new();
        for (i, word) in words.iter().enumerate() {
            last_index.insert(*word, i);
        }
        let survivors: Vec<&str> = words
            .iter()
            .enumerate()
            .filter(|&(i, word)| last_index[word] == i)
            .map(|(_, word)| *word)
            .collect();
        survivors.join(sep)
    } else {
        let unique: HashSet<&str> = words.into_iter().collect();
        unique.into_iter().collect::<Vec<&str>>().join(sep)
    }
}

/// Counts the occurrences of each distinct element of `data`.
///
/// ```
/// use dautils::text_utils::count_elements;
///
/// let counts = count_elements("abracadabra".chars());
/// assert_eq!(counts[&'a'], 5);
/// assert_eq!(counts[&'b'], 2);
/// ```
pub fn count_elements<I>(data: I) -> HashMap<I::Item, usize>
where
    I: IntoIterator,
    I::Item: Eq + Hash,
{
    let mut counts = HashMap::new();
    for element in data {
        *counts.entry(element).or_insert(0) += 1;
    }
    counts
}

/// Counts the elements of a dynamically-typed value: array elements, string
/// characters, or object keys. A scalar is a `NotIterable` error.
///
/// Non-string array elements are counted by their JSON rendering.
///
/// ```
/// use dautils::text_utils::count_value_elements;
/// use serde_json::json;
///
/// let counts = count_value_elements(&json!(["x", "y", "x"])).unwrap();
/// assert_eq!(counts["x"], 2);
/// assert_eq!(counts["y"], 1);
///
/// assert!(count_value_elements(&json!(42)).is_err());
/// ```
pub fn count_value_elements(data: &Value) -> Result<HashMap<String, usize>> {
    let elements: Vec<String> = match data {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) => s.chars().map(|c| c.to_string()).collect(),
        Value::Object(map) => map.keys().cloned().collect(),
        other => {
            return Err(UtilsError::NotIterable(
                crate::type_utils::ValueKind::of(other).to_string(),
            ))
        }
    };

    Ok(count_elements(elements))
}
