// type_utils.rs
use crate::error::{Result, UtilsError};
use serde_json::{Map, Number, Value};
use std::fmt;

/// The dynamic type of a `serde_json::Value`, used to state type expectations
/// over connection-parameter mappings and other dynamically-typed data before
/// it is handed to an external client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Returns the kind of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// Checks that every targeted value in `map` has the `expected` kind.
///
/// With `keys = None` all keys are checked; otherwise only the named ones.
/// A key that is not present in the mapping is an `InvalidShape` error; a
/// value of the wrong kind is an `InvalidType` error naming the key.
///
/// ```
/// use dautils::type_utils::{check_map_value_types, ValueKind};
/// use serde_json::json;
///
/// let params = json!({"host": "db01", "port": "1521", "user": "scott"});
/// let map = params.as_object().unwrap();
///
/// assert!(check_map_value_types(map, ValueKind::String, None).is_ok());
/// assert!(check_map_value_types(map, ValueKind::Number, Some(&["port"])).is_err());
/// ```
pub fn check_map_value_types(
    map: &Map<String, Value>,
    expected: ValueKind,
    keys: Option<&[&str]>,
) -> Result<()> {
    let target_keys: Vec<&str> = match keys {
        Some(keys) => keys.to_vec(),
        None => map.keys().map(String::as_str).collect(),
    };

    for key in target_keys {
        let value = map
            .get(key)
            .ok_or_else(|| UtilsError::InvalidShape(format!("key '{}' not found in mapping", key)))?;
        let found = ValueKind::of(value);
        if found != expected {
            return Err(UtilsError::InvalidType {
                subject: format!("value at key '{}'", key),
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

/// Non-throwing variant of [`check_map_value_types`]: logs a diagnostic and
/// returns `false` on the first offending key, so callers can branch to a
/// `None` result without exception handling.
pub fn check_map_value_types_soft(
    map: &Map<String, Value>,
    expected: ValueKind,
    keys: Option<&[&str]>,
) -> bool {
    let target_keys: Vec<&str> = match keys {
        Some(keys) => keys.to_vec(),
        None => map.keys().map(String::as_str).collect(),
    };

    for key in target_keys {
        match map.get(key) {
            Some(value) => {
                let found = ValueKind::of(value);
                if found != expected {
                    tracing::warn!(
                        "type of target values must be {}, but key '{}' has {}",
                        expected,
                        key,
                        found
                    );
                    return false;
                }
            }
            None => {
                tracing::warn!("key '{}' not found in mapping", key);
                return false;
            }
        }
    }

    true
}

// Indices are bounded by the sequence length, and every invalid one is
// reported before any element is inspected.
fn validate_indices(list_len: usize, indices: &[usize]) -> Result<()> {
    let invalid: Vec<usize> = indices.iter().copied().filter(|&i| i >= list_len).collect();
    if !invalid.is_empty() {
        return Err(UtilsError::IndexOutOfRange(format!(
            "invalid index found in index list: {:?}",
            invalid
        )));
    }
    Ok(())
}

/// Checks that every targeted element of `list` has the `expected` kind.
///
/// With `indices = None` all positions are checked. All out-of-range indices
/// are collected and reported in one `IndexOutOfRange` error before any type
/// checking happens; a wrong-kind element is an `InvalidType` error naming
/// its position.
///
/// ```
/// use dautils::type_utils::{check_list_element_types, ValueKind};
/// use serde_json::json;
///
/// let list = vec![json!(1), json!(2), json!("three")];
///
/// assert!(check_list_element_types(&list, ValueKind::Number, Some(&[0, 1])).is_ok());
/// assert!(check_list_element_types(&list, ValueKind::Number, None).is_err());
/// assert!(check_list_element_types(&list, ValueKind::Number, Some(&[7])).is_err());
/// ```
pub fn check_list_element_types(
    list: &[Value],
    expected: ValueKind,
    indices: Option<&[usize]>,
) -> Result<()> {
    let target_indices: Vec<usize> = match indices {
        Some(indices) => {
            validate_indices(list.len(), indices)?;
            indices.to_vec()
        }
        None => (0..list.len()).collect(),
    };

    for idx in target_indices {
        let found = ValueKind::of(&list[idx]);
        if found != expected {
            return Err(UtilsError::InvalidType {
                subject: format!("element at index {}", idx),
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

/// Non-throwing variant of [`check_list_element_types`]. Out-of-range
/// indices still log and fail; the first wrong-kind element logs a
/// diagnostic and stops checking.
pub fn check_list_element_types_soft(
    list: &[Value],
    expected: ValueKind,
    indices: Option<&[usize]>,
) -> bool {
    let target_indices: Vec<usize> = match indices {
        Some(indices) => {
            if let Err(e) = validate_indices(list.len(), indices) {
                tracing::warn!("{}", e);
                return false;
            }
            indices.to_vec()
        }
        None => (0..list.len()).collect(),
    };

    for idx in target_indices {
        let found = ValueKind::of(&list[idx]);
        if found != expected {
            tracing::warn!(
                "type of target list elements must be {}, but index {} has {}",
                expected,
                idx,
                found
            );
            return false;
        }
    }

    true
}

/// Returns a new vector with every element of `list` converted to the
/// `target` kind. The input is never mutated.
///
/// Supported targets are `String`, `Number` and `Bool`; anything else is an
/// `InvalidShape` error. An element that cannot be converted (an object to a
/// number, a non-numeric string to a number, and so on) is an `InvalidType`
/// error naming its position.
///
/// ```
/// use dautils::type_utils::{convert_list_element_types, ValueKind};
/// use serde_json::json;
///
/// let list = vec![json!("3"), json!(4.5), json!(true)];
/// let converted = convert_list_element_types(&list, ValueKind::Number).unwrap();
/// assert_eq!(converted, vec![json!(3), json!(4.5), json!(1)]);
/// ```
pub fn convert_list_element_types(list: &[Value], target: ValueKind) -> Result<Vec<Value>> {
    match target {
        ValueKind::String | ValueKind::Number | ValueKind::Bool => {}
        other => {
            return Err(UtilsError::InvalidShape(format!(
                "unsupported conversion target: {}",
                other
            )))
        }
    }

    let mut converted = Vec::with_capacity(list.len());
    for (idx, element) in list.iter().enumerate() {
        if ValueKind::of(element) == target {
            converted.push(element.clone());
            continue;
        }
        converted.push(convert_element(element, target).ok_or_else(|| UtilsError::InvalidType {
            subject: format!("element at index {}", idx),
            expected: target.to_string(),
            found: ValueKind::of(element).to_string(),
        })?);
    }

    Ok(converted)
}

fn convert_element(element: &Value, target: ValueKind) -> Option<Value> {
    match target {
        ValueKind::String => match element {
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        ValueKind::Number => match element {
            Value::String(s) => {
                if let Ok(i) = s.trim().parse::<i64>() {
                    Some(Value::Number(Number::from(i)))
                } else if let Ok(f) = s.trim().parse::<f64>() {
                    Number::from_f64(f).map(Value::Number)
                } else {
                    None
                }
            }
            Value::Bool(b) => Some(Value::Number(Number::from(if *b { 1 } else { 0 }))),
            _ => None,
        },
        ValueKind::Bool => match element {
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            Value::Number(n) => n.as_f64().map(|f| Value::Bool(f != 0.0)),
            _ => None,
        },
        _ => None,
    }
}
