//! Coercion between wire tokens and typed values.
//!
//! [`decode`] and [`encode`] are exact inverses for every field shape: this
//! is what makes `parse(serialize(parse(text)))` stable under model
//! equality. [`check`] validates programmatic values on `set`, applying the
//! same rules to values that never touched the wire.

use crate::model::{Limit, Value};

use super::errors::{ValidationError, ValidationResult};
use super::types::{BoolStyle, FieldDef, FieldKind, FieldShape, MapFormat};

/// Decode one wire token's value into a typed [`Value`].
///
/// Surrounding double quotes are stripped before coercion. For
/// [`FieldShape::Repeated`] fields this decodes a single occurrence; the
/// record layer accumulates occurrences into a list. Nested-model shapes are
/// parsed as blocks by the parser and never reach this function.
pub fn decode(field: &FieldDef, raw: &str) -> ValidationResult<Value> {
    let raw = strip_quotes(raw);
    match &field.shape {
        FieldShape::Scalar(kind) | FieldShape::Repeated(kind) => {
            decode_scalar(field.name, kind, raw)
        }
        FieldShape::List { kind, sep } => {
            let mut items = Vec::new();
            for part in raw.split(*sep) {
                items.push(decode_scalar(field.name, kind, part)?);
            }
            Ok(Value::List(items))
        }
        FieldShape::Map(format) => decode_map(raw, format),
        FieldShape::ModelList(_) | FieldShape::ModelMap(_) => Err(ValidationError::new(
            field.name,
            raw,
            "a nested block, not a scalar value",
        )),
    }
}

/// Encode a typed value back into its wire token (without the key).
///
/// For [`FieldShape::Repeated`] fields this encodes a single list element;
/// the serializer emits one directive per element.
pub fn encode(field: &FieldDef, value: &Value) -> String {
    let text = match (&field.shape, value) {
        (FieldShape::Scalar(FieldKind::Bool(style)), Value::Bool(b))
        | (FieldShape::Repeated(FieldKind::Bool(style)), Value::Bool(b)) => {
            encode_bool(style, *b).to_string()
        }
        (FieldShape::List { sep, .. }, Value::List(items)) => items
            .iter()
            .map(encode_scalar)
            .collect::<Vec<_>>()
            .join(&sep.to_string()),
        (FieldShape::Map(format), Value::Map(entries)) => encode_map(entries, format),
        _ => encode_scalar(value),
    };

    if field.quote || text.chars().any(char::is_whitespace) {
        format!("\"{text}\"")
    } else {
        text
    }
}

/// Validate a programmatic value against a field's declared shape.
///
/// Mild coercions that lose nothing are applied (`Int` widens to `Float`,
/// `Int` becomes `Limit::Number`); anything else that does not match the
/// declared shape is rejected.
pub fn check(field: &FieldDef, value: Value) -> ValidationResult<Value> {
    let mismatch = |value: &Value| {
        ValidationError::new(field.name, describe_value(value), field.shape.describe())
    };

    match &field.shape {
        FieldShape::Scalar(kind) => check_scalar(kind, value).map_err(|v| mismatch(&v)),
        FieldShape::List { kind, .. } | FieldShape::Repeated(kind) => match value {
            Value::List(items) => {
                let mut checked = Vec::with_capacity(items.len());
                for item in items {
                    checked.push(check_scalar(kind, item).map_err(|v| mismatch(&v))?);
                }
                Ok(Value::List(checked))
            }
            other => Err(mismatch(&other)),
        },
        FieldShape::Map(_) => match value {
            Value::Map(entries) => Ok(Value::Map(entries)),
            other => Err(mismatch(&other)),
        },
        FieldShape::ModelList(schema) => match value {
            Value::Records(list) if std::ptr::eq(list.schema(), schema()) => {
                Ok(Value::Records(list))
            }
            other => Err(mismatch(&other)),
        },
        FieldShape::ModelMap(schema) => match value {
            Value::RecordMap(map) if std::ptr::eq(map.schema(), schema()) => {
                Ok(Value::RecordMap(map))
            }
            other => Err(mismatch(&other)),
        },
    }
}

/// Build a typed value from a JSON value, for the JSON interchange surface.
pub fn from_json(field: &FieldDef, json: &serde_json::Value) -> ValidationResult<Value> {
    let scalar = |kind: &FieldKind, json: &serde_json::Value| -> ValidationResult<Value> {
        match (kind, json) {
            (FieldKind::Str, serde_json::Value::String(s)) => Ok(Value::Str(s.clone())),
            (FieldKind::Int, serde_json::Value::Number(n)) if n.is_i64() => {
                Ok(Value::Int(n.as_i64().unwrap_or_default()))
            }
            (FieldKind::Float, serde_json::Value::Number(n)) => {
                Ok(Value::Float(n.as_f64().unwrap_or_default()))
            }
            (FieldKind::Bool(_), serde_json::Value::Bool(b)) => Ok(Value::Bool(*b)),
            (FieldKind::Limit, serde_json::Value::Number(n)) if n.is_i64() => {
                Ok(Value::Limit(Limit::Number(n.as_i64().unwrap_or_default())))
            }
            (FieldKind::Limit, serde_json::Value::String(s)) => {
                decode_scalar(field.name, &FieldKind::Limit, s)
            }
            _ => Err(ValidationError::new(
                field.name,
                json.to_string(),
                kind.describe(),
            )),
        }
    };

    match &field.shape {
        FieldShape::Scalar(kind) => scalar(kind, json),
        FieldShape::List { kind, .. } | FieldShape::Repeated(kind) => match json {
            serde_json::Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(scalar(kind, item)?);
                }
                Ok(Value::List(out))
            }
            _ => Err(ValidationError::new(
                field.name,
                json.to_string(),
                field.shape.describe(),
            )),
        },
        FieldShape::Map(_) => match json {
            serde_json::Value::Object(entries) => {
                let mut out = Vec::with_capacity(entries.len());
                for (key, val) in entries {
                    out.push((key.clone(), json_map_value(field, val)?));
                }
                Ok(Value::Map(out))
            }
            _ => Err(ValidationError::new(
                field.name,
                json.to_string(),
                field.shape.describe(),
            )),
        },
        FieldShape::ModelList(_) | FieldShape::ModelMap(_) => Err(ValidationError::new(
            field.name,
            json.to_string(),
            "a nested block built through the record API",
        )),
    }
}

fn json_map_value(field: &FieldDef, json: &serde_json::Value) -> ValidationResult<Value> {
    match json {
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::String(s) => Ok(Value::Str(s.clone())),
        serde_json::Value::Number(n) if n.is_i64() => {
            Ok(Value::Int(n.as_i64().unwrap_or_default()))
        }
        serde_json::Value::Number(n) => Ok(Value::Float(n.as_f64().unwrap_or_default())),
        serde_json::Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(json_map_value(field, item)?);
            }
            Ok(Value::List(out))
        }
        _ => Err(ValidationError::new(
            field.name,
            json.to_string(),
            "a scalar or array parameter value",
        )),
    }
}

fn decode_scalar(field: &str, kind: &FieldKind, raw: &str) -> ValidationResult<Value> {
    let raw = strip_quotes(raw);
    match kind {
        FieldKind::Str => Ok(Value::Str(raw.to_string())),
        FieldKind::Int => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ValidationError::new(field, raw, kind.describe())),
        FieldKind::Float => raw
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ValidationError::new(field, raw, kind.describe())),
        FieldKind::Bool(style) => {
            let (truthy, falsy) = bool_tokens(style);
            let lowered = raw.to_ascii_lowercase();
            if lowered == truthy {
                Ok(Value::Bool(true))
            } else if lowered == falsy {
                Ok(Value::Bool(false))
            } else {
                Err(ValidationError::new(field, raw, kind.describe()))
            }
        }
        FieldKind::Limit => {
            if let Ok(n) = raw.parse::<i64>() {
                return Ok(Value::Limit(Limit::Number(n)));
            }
            match raw.to_ascii_uppercase().as_str() {
                "UNLIMITED" => Ok(Value::Limit(Limit::Unlimited)),
                "INFINITE" => Ok(Value::Limit(Limit::Infinite)),
                _ => Err(ValidationError::new(field, raw, kind.describe())),
            }
        }
    }
}

fn encode_scalar(value: &Value) -> String {
    match value {
        Value::Str(s) => s.clone(),
        Value::Int(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        // Bare booleans only occur for declared bool fields; style-specific
        // tokens are substituted by `encode_bool` through the field def.
        Value::Bool(b) => b.to_string(),
        Value::Limit(Limit::Number(n)) => n.to_string(),
        Value::Limit(Limit::Unlimited) => "UNLIMITED".to_string(),
        Value::Limit(Limit::Infinite) => "INFINITE".to_string(),
        Value::List(items) => items
            .iter()
            .map(encode_scalar)
            .collect::<Vec<_>>()
            .join(","),
        Value::Map(entries) => encode_map(entries, &MapFormat::COMMA),
        Value::Records(_) | Value::RecordMap(_) => String::new(),
    }
}

fn decode_map(raw: &str, format: &MapFormat) -> ValidationResult<Value> {
    let mut entries = Vec::new();
    for item in raw.split(format.item_sep) {
        match item.split_once(format.pair_sep) {
            None => entries.push((item.to_string(), Value::Bool(true))),
            Some((key, val)) => {
                let value = match format.array_sep {
                    Some(sep) if val.contains(sep) => {
                        Value::List(val.split(sep).map(autocast).collect())
                    }
                    _ => autocast(val),
                };
                entries.push((key.to_string(), value));
            }
        }
    }
    Ok(Value::Map(entries))
}

fn encode_map(entries: &[(String, Value)], format: &MapFormat) -> String {
    let mut parts = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match value {
            // A set flag renders bare; an unset flag is omitted entirely.
            Value::Bool(true) => parts.push(key.clone()),
            Value::Bool(false) => {}
            Value::List(items) => {
                let sep = format.array_sep.unwrap_or(',').to_string();
                let joined = items.iter().map(encode_scalar).collect::<Vec<_>>().join(&sep);
                parts.push(format!("{key}{}{joined}", format.pair_sep));
            }
            other => parts.push(format!("{key}{}{}", format.pair_sep, encode_scalar(other))),
        }
    }
    parts.join(&format.item_sep.to_string())
}

/// Best-fit typing for embedded map values, which carry no declared kind.
fn autocast(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Value::Float(f);
    }
    Value::Str(raw.to_string())
}

fn check_scalar(kind: &FieldKind, value: Value) -> Result<Value, Value> {
    match (kind, value) {
        (FieldKind::Str, Value::Str(s)) => Ok(Value::Str(s)),
        (FieldKind::Int, Value::Int(n)) => Ok(Value::Int(n)),
        (FieldKind::Float, Value::Float(f)) => Ok(Value::Float(f)),
        (FieldKind::Float, Value::Int(n)) => Ok(Value::Float(n as f64)),
        (FieldKind::Bool(_), Value::Bool(b)) => Ok(Value::Bool(b)),
        (FieldKind::Limit, Value::Limit(l)) => Ok(Value::Limit(l)),
        (FieldKind::Limit, Value::Int(n)) => Ok(Value::Limit(Limit::Number(n))),
        (_, other) => Err(other),
    }
}

/// Render a bool with the vocabulary its field declares.
pub(crate) fn encode_bool(style: &BoolStyle, value: bool) -> &'static str {
    let (truthy, falsy) = bool_tokens(style);
    if value {
        truthy
    } else {
        falsy
    }
}

fn bool_tokens(style: &BoolStyle) -> (&'static str, &'static str) {
    match style {
        BoolStyle::TrueFalse => ("true", "false"),
        BoolStyle::YesNo => ("yes", "no"),
        BoolStyle::OneZero => ("1", "0"),
    }
}

fn describe_value(value: &Value) -> String {
    match value {
        Value::Str(s) => format!("string `{s}`"),
        Value::Int(n) => format!("integer `{n}`"),
        Value::Float(f) => format!("float `{f}`"),
        Value::Bool(b) => format!("bool `{b}`"),
        Value::Limit(_) => "limit".to_string(),
        Value::List(_) => "list".to_string(),
        Value::Map(_) => "map".to_string(),
        Value::Records(list) => format!("`{}` list", list.schema().name()),
        Value::RecordMap(map) => format!("`{}` mapping", map.schema().name()),
    }
}

fn strip_quotes(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;

    #[test]
    fn test_decode_int_and_reject_garbage() {
        let field = FieldDef::int("kill_wait", "KillWait");
        assert_eq!(decode(&field, "30").unwrap(), Value::Int(30));
        let err = decode(&field, "soon").unwrap_err();
        assert_eq!(err.field, "kill_wait");
        assert_eq!(err.raw, "soon");
    }

    #[test]
    fn test_decode_limit_accepts_number_and_sentinels() {
        let field = FieldDef::limit("max_nodes", "MaxNodes");
        assert_eq!(
            decode(&field, "5").unwrap(),
            Value::Limit(Limit::Number(5))
        );
        assert_eq!(
            decode(&field, "unlimited").unwrap(),
            Value::Limit(Limit::Unlimited)
        );
        assert_eq!(
            decode(&field, "INFINITE").unwrap(),
            Value::Limit(Limit::Infinite)
        );
        assert!(decode(&field, "abc").is_err());
    }

    #[test]
    fn test_decode_yes_no_bool() {
        let field = FieldDef::yes_no("constrain_cores", "ConstrainCores");
        assert_eq!(decode(&field, "YES").unwrap(), Value::Bool(true));
        assert_eq!(decode(&field, "no").unwrap(), Value::Bool(false));
        assert!(decode(&field, "true").is_err());
    }

    #[test]
    fn test_list_round_trip() {
        let field = FieldDef::list("features", "Features");
        let value = decode(&field, "gpu,nvme,ib").unwrap();
        assert_eq!(
            value,
            Value::List(vec![
                Value::Str("gpu".into()),
                Value::Str("nvme".into()),
                Value::Str("ib".into()),
            ])
        );
        assert_eq!(encode(&field, &value), "gpu,nvme,ib");
    }

    #[test]
    fn test_map_bare_flag_and_pairs() {
        let field = FieldDef::map("auth_alt_parameters", "AuthAltParameters", MapFormat::COMMA);
        let value = decode(&field, "disable_token_creation,jwt_key=/keys/jwt.key").unwrap();
        assert_eq!(
            value.as_map().unwrap(),
            &[
                ("disable_token_creation".to_string(), Value::Bool(true)),
                ("jwt_key".to_string(), Value::Str("/keys/jwt.key".into())),
            ]
        );
        assert_eq!(
            encode(&field, &value),
            "disable_token_creation,jwt_key=/keys/jwt.key"
        );
    }

    #[test]
    fn test_quoted_value_strips_and_requotes() {
        let field = FieldDef::str("reason", "Reason").quoted();
        let value = decode(&field, "\"Maintenance Mode\"").unwrap();
        assert_eq!(value, Value::Str("Maintenance Mode".into()));
        assert_eq!(encode(&field, &value), "\"Maintenance Mode\"");
    }

    #[test]
    fn test_check_rejects_string_for_list() {
        let field = FieldDef::list("features", "Features");
        assert!(check(&field, Value::Str("gpu".into())).is_err());
        assert!(check(&field, Value::List(vec![Value::Str("gpu".into())])).is_ok());
    }

    #[test]
    fn test_check_widens_int_to_limit() {
        let field = FieldDef::limit("max_job_count", "MaxJobCount");
        assert_eq!(
            check(&field, Value::Int(500)).unwrap(),
            Value::Limit(Limit::Number(500))
        );
    }
}
