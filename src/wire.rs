use serde_json::{Map, Value};

/// Field names whose values the backend transports as JSON-encoded strings
/// rather than arrays. Hard-coded for wire compatibility; the camelCase name
/// is the post-conversion key, the snake_case name the pre-conversion one.
const STRING_ENCODED_LIST_FIELDS: [&str; 2] = ["recurrenceTimes", "recurrenceDays"];

/// Recursively rewrites every object key from snake_case to camelCase,
/// leaving the value shape untouched except for the string-encoded list
/// fields, which are parsed back into real arrays.
pub fn to_camel_case(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut converted = Map::with_capacity(map.len());
            for (key, value) in map {
                let key = snake_to_camel(&key);
                let value = if STRING_ENCODED_LIST_FIELDS.contains(&key.as_str()) {
                    decode_list_field(value)
                } else {
                    to_camel_case(value)
                };
                converted.insert(key, value);
            }
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(to_camel_case).collect()),
        scalar => scalar,
    }
}

/// Recursively rewrites every object key from camelCase to snake_case. The
/// string-encoded list fields are serialized into JSON strings on the way
/// out, which is what the backend expects to receive.
pub fn to_snake_case(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut converted = Map::with_capacity(map.len());
            for (key, value) in map {
                let value = if STRING_ENCODED_LIST_FIELDS.contains(&key.as_str()) {
                    encode_list_field(value)
                } else {
                    to_snake_case(value)
                };
                converted.insert(camel_to_snake(&key), value);
            }
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(to_snake_case).collect()),
        scalar => scalar,
    }
}

fn decode_list_field(value: Value) -> Value {
    match value {
        Value::String(raw) => {
            if raw.trim().is_empty() {
                return Value::Null;
            }
            match serde_json::from_str::<Value>(&raw) {
                Ok(Value::Array(items)) => Value::Array(items),
                // Anything that is not a JSON array maps to null, matching
                // the backend's tolerance for malformed stored values.
                Ok(_) | Err(_) => Value::Null,
            }
        }
        Value::Array(items) => Value::Array(items),
        other => other,
    }
}

fn encode_list_field(value: Value) -> Value {
    match value {
        Value::Array(items) => match serde_json::to_string(&Value::Array(items)) {
            Ok(encoded) => Value::String(encoded),
            Err(_) => Value::Null,
        },
        other => other,
    }
}

fn snake_to_camel(key: &str) -> String {
    let mut converted = String::with_capacity(key.len());
    let mut capitalize_next = false;

    for ch in key.chars() {
        if ch == '_' {
            capitalize_next = true;
            continue;
        }
        if capitalize_next {
            converted.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            converted.push(ch);
        }
    }

    converted
}

fn camel_to_snake(key: &str) -> String {
    let mut converted = String::with_capacity(key.len() + 4);

    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            converted.push('_');
            converted.push(ch.to_ascii_lowercase());
        } else {
            converted.push(ch);
        }
    }

    converted
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{to_camel_case, to_snake_case};

    #[test]
    fn camel_conversion_renames_nested_keys() {
        let converted = to_camel_case(json!({
            "project_id": 3,
            "assigned_to": {"avatar_url": null, "nickname": "ana"},
            "task_comments": [{"parent_comment_id": 7}],
        }));

        assert_eq!(
            converted,
            json!({
                "projectId": 3,
                "assignedTo": {"avatarUrl": null, "nickname": "ana"},
                "taskComments": [{"parentCommentId": 7}],
            })
        );
    }

    #[test]
    fn snake_conversion_renames_nested_keys() {
        let converted = to_snake_case(json!({
            "projectId": 3,
            "assignedTo": {"avatarUrl": null},
            "taskComments": [{"parentCommentId": 7}],
        }));

        assert_eq!(
            converted,
            json!({
                "project_id": 3,
                "assigned_to": {"avatar_url": null},
                "task_comments": [{"parent_comment_id": 7}],
            })
        );
    }

    #[test]
    fn round_trip_is_identity_without_special_fields() {
        let original = json!({
            "statusId": 2,
            "isCompleted": false,
            "deadline": "2026-08-07T12:00:00Z",
            "history": [{"fieldName": "title", "oldValue": "a"}],
        });

        assert_eq!(to_camel_case(to_snake_case(original.clone())), original);
    }

    #[test]
    fn scalars_and_arrays_pass_through_unchanged() {
        assert_eq!(to_camel_case(json!(42)), json!(42));
        assert_eq!(to_snake_case(json!("plain")), json!("plain"));
        assert_eq!(to_camel_case(json!([1, "two", null])), json!([1, "two", null]));
    }

    #[test]
    fn recurrence_lists_are_encoded_as_strings_outbound() {
        let converted = to_snake_case(json!({
            "recurrenceTimes": ["08:00", "18:30"],
            "recurrenceDays": [1, 3, 5],
        }));

        assert_eq!(
            converted,
            json!({
                "recurrence_times": "[\"08:00\",\"18:30\"]",
                "recurrence_days": "[1,3,5]",
            })
        );
    }

    #[test]
    fn string_encoded_recurrence_lists_are_decoded_inbound() {
        let converted = to_camel_case(json!({
            "recurrence_times": "[\"08:00\",\"18:30\"]",
            "recurrence_days": "[1,3,5]",
        }));

        assert_eq!(
            converted,
            json!({
                "recurrenceTimes": ["08:00", "18:30"],
                "recurrenceDays": [1, 3, 5],
            })
        );
    }

    #[test]
    fn recurrence_round_trip_reproduces_the_list() {
        let original = json!({"recurrenceTimes": ["07:15"], "recurrenceDays": [0, 6]});
        assert_eq!(to_camel_case(to_snake_case(original.clone())), original);
    }

    #[test]
    fn malformed_recurrence_strings_decode_to_null() {
        let converted = to_camel_case(json!({
            "recurrence_times": "not json",
            "recurrence_days": "",
        }));

        assert_eq!(
            converted,
            json!({"recurrenceTimes": null, "recurrenceDays": null})
        );
    }

    #[test]
    fn non_array_recurrence_json_decodes_to_null() {
        let converted = to_camel_case(json!({"recurrence_times": "{\"nope\":1}"}));
        assert_eq!(converted, json!({"recurrenceTimes": null}));
    }

    #[test]
    fn empty_bracket_string_decodes_to_empty_list() {
        let converted = to_camel_case(json!({"recurrence_days": "[]"}));
        assert_eq!(converted, json!({"recurrenceDays": []}));
    }

    #[test]
    fn recurrence_fields_already_in_final_shape_pass_through() {
        let inbound = to_camel_case(json!({"recurrence_times": ["09:00"]}));
        assert_eq!(inbound, json!({"recurrenceTimes": ["09:00"]}));

        let outbound = to_snake_case(json!({"recurrenceDays": null}));
        assert_eq!(outbound, json!({"recurrence_days": null}));
    }
}
