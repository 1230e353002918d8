//! Copying recognized fields out of loosely-shaped JSON records.
//!
//! Each result type owns a table of [`FieldMapping`]s. A mapping lists the
//! source keys it accepts (older API spellings included) and how to store the
//! value. Keys not in the table are ignored; a mapped field the record does
//! not carry keeps its default.

use serde_json::{Map, Value};

pub struct FieldMapping<T> {
    pub sources: &'static [&'static str],
    pub apply: fn(&mut T, &Value),
}

pub fn project<T: Default>(record: &Map<String, Value>, table: &[FieldMapping<T>]) -> T {
    let mut out = T::default();
    for mapping in table {
        let found = mapping
            .sources
            .iter()
            .filter_map(|key| record.get(*key))
            .find(|value| !value.is_null());
        if let Some(value) = found {
            (mapping.apply)(&mut out, value);
        }
    }
    out
}

/// Strings as-is, numbers in their JSON form.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Non-negative integers, from numbers or numeric strings.
pub fn count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Finite decimals, from numbers or numeric strings (`"NaN"` and `"inf"` are rejected).
pub fn amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.filter(|it| it.is_finite())
}

/// Booleans, plus the `0`/`1` and `"true"`/`"false"` encodings older responses use.
pub fn flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(text) => match text.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        name: Option<String>,
        size: Option<u64>,
    }

    const SAMPLE_FIELDS: &[FieldMapping<Sample>] = &[
        FieldMapping {
            sources: &["name", "title"],
            apply: |out, value| out.name = text(value),
        },
        FieldMapping {
            sources: &["size"],
            apply: |out, value| out.size = count(value),
        },
    ];

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn project_copies_known_fields_and_ignores_others() {
        let record = object(json!({ "name": "a", "size": 3, "extra": true }));
        assert_eq!(
            project(&record, SAMPLE_FIELDS),
            Sample {
                name: Some("a".to_owned()),
                size: Some(3),
            }
        );
    }

    #[test]
    fn project_uses_first_non_null_alias() {
        let record = object(json!({ "name": null, "title": "b" }));
        assert_eq!(project(&record, SAMPLE_FIELDS).name.as_deref(), Some("b"));

        let record = object(json!({ "name": "a", "title": "b" }));
        assert_eq!(project(&record, SAMPLE_FIELDS).name.as_deref(), Some("a"));
    }

    #[test]
    fn project_leaves_missing_or_mistyped_fields_unset() {
        let record = object(json!({ "size": "many" }));
        assert_eq!(project(&record, SAMPLE_FIELDS), Sample::default());
    }

    #[test]
    fn coercions_accept_loose_encodings() {
        assert_eq!(text(&json!(12)).as_deref(), Some("12"));
        assert_eq!(text(&json!([1])), None);
        assert_eq!(count(&json!(" 7 ")), Some(7));
        assert_eq!(count(&json!(-1)), None);
        assert_eq!(amount(&json!("12.5")), Some(12.5));
        assert_eq!(amount(&json!(3)), Some(3.0));
        assert_eq!(amount(&json!("NaN")), None);
        assert_eq!(amount(&json!("inf")), None);
        assert_eq!(amount(&json!("-Infinity")), None);
        assert_eq!(flag(&json!(1)), Some(true));
        assert_eq!(flag(&json!("false")), Some(false));
        assert_eq!(flag(&json!(2)), None);
    }
}
