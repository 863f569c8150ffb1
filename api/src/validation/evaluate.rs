//! Generic schema interpreter
//!
//! Walks a [`Schema`] over a JSON payload in a single pass: coerces declared
//! types, sanitizes strings, drops undeclared keys, fills defaults, then runs
//! cross-field rules. Every violation is collected; nothing aborts early.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Number, Value};

use super::extractors::{FieldError, ValidationBuilder};
use super::sanitizers;
use super::schema::{Constraint, CrossFieldRule, FieldKind, FieldRule, Location, Schema};
use super::validators;

/// Sanitized payload, or every field error found
pub type ValidationResult = Result<Map<String, Value>, Vec<FieldError>>;

pub fn validate(schema: &Schema, input: &Value, location: Location) -> ValidationResult {
    let Some(object) = input.as_object() else {
        return Err(vec![FieldError::new(location.as_str(), "must be an object")]);
    };

    let mut builder = ValidationBuilder::new();
    let sanitized = validate_fields(&schema.fields, object, "", &mut builder);

    for rule in &schema.cross_rules {
        check_cross_field(rule, &sanitized, &mut builder);
    }

    builder.build().map(|()| sanitized)
}

fn validate_fields(
    rules: &[FieldRule],
    input: &Map<String, Value>,
    prefix: &str,
    builder: &mut ValidationBuilder,
) -> Map<String, Value> {
    let mut out = Map::new();

    for rule in rules {
        let path = if prefix.is_empty() {
            rule.name.to_string()
        } else {
            format!("{}.{}", prefix, rule.name)
        };

        match present(input.get(rule.name)) {
            None if rule.required => {
                builder.add_error(&path, "is required");
            }
            None => {
                if let Some(default) = &rule.default {
                    out.insert(rule.name.to_string(), default.clone());
                }
            }
            Some(raw) => {
                if let Some(value) = check_value(rule, raw, &path, builder) {
                    out.insert(rule.name.to_string(), value);
                }
            }
        }
    }

    out
}

/// `null` and blank strings count as absent
fn present(value: Option<&Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    }
}

fn check_value(
    rule: &FieldRule,
    raw: &Value,
    path: &str,
    builder: &mut ValidationBuilder,
) -> Option<Value> {
    let value = match &rule.kind {
        FieldKind::Object(fields) => {
            let Some(object) = raw.as_object() else {
                builder.add_error(path, "must be an object");
                return None;
            };
            let before = builder.error_count();
            let nested = validate_fields(fields, object, path, builder);
            if builder.error_count() > before {
                return None;
            }
            Value::Object(nested)
        }
        FieldKind::Array(item) => {
            let Some(elements) = raw.as_array() else {
                builder.add_error(path, "must be an array");
                return None;
            };
            let before = builder.error_count();
            let mut out = Vec::with_capacity(elements.len());
            for (i, element) in elements.iter().enumerate() {
                let element_path = format!("{}[{}]", path, i);
                match present(Some(element)) {
                    None => {
                        builder.add_error(&element_path, "must not be empty");
                    }
                    Some(element) => {
                        if let Some(value) = check_value(item, element, &element_path, builder) {
                            out.push(value);
                        }
                    }
                }
            }
            if builder.error_count() > before {
                return None;
            }
            Value::Array(out)
        }
        _ => match coerce_scalar(rule, raw) {
            Ok(value) => value,
            Err(message) => {
                builder.add_error(path, message);
                return None;
            }
        },
    };

    for constraint in &rule.constraints {
        if let Err(message) = check_constraint(constraint, &value) {
            builder.add_error(path, message);
            return None;
        }
    }

    Some(value)
}

fn coerce_scalar(rule: &FieldRule, raw: &Value) -> Result<Value, String> {
    match rule.kind {
        FieldKind::String => {
            let Value::String(s) = raw else {
                return Err("must be a string".to_string());
            };
            let cleaned = sanitizers::apply_all(s, &rule.sanitizers);
            if cleaned.trim().is_empty() {
                return Err("must not be empty".to_string());
            }
            Ok(Value::String(cleaned))
        }
        FieldKind::Number => match raw {
            Value::Number(n) => Ok(Value::Number(n.clone())),
            Value::String(s) => parse_number(s.trim()).ok_or_else(|| "must be a number".to_string()),
            _ => Err("must be a number".to_string()),
        },
        FieldKind::Integer => {
            let number = match raw {
                Value::Number(n) => Some(n.clone()),
                Value::String(s) => match parse_number(s.trim()) {
                    Some(Value::Number(n)) => Some(n),
                    _ => None,
                },
                _ => None,
            };
            number
                .and_then(|n| as_integer(&n))
                .ok_or_else(|| "must be an integer".to_string())
        }
        FieldKind::Boolean => match raw {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err("must be a boolean".to_string()),
            },
            _ => Err("must be a boolean".to_string()),
        },
        FieldKind::Date => raw
            .as_str()
            .and_then(|s| parse_date(s.trim()))
            .map(|dt| Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true)))
            .ok_or_else(|| "must be a valid date".to_string()),
        FieldKind::Object(_) | FieldKind::Array(_) => Ok(raw.clone()),
    }
}

fn parse_number(s: &str) -> Option<Value> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    s.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}

fn as_integer(n: &Number) -> Option<Value> {
    if n.is_i64() || n.is_u64() {
        return Some(Value::Number(n.clone()));
    }
    let f = n.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, which does not fit
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(Value::from(f as i64))
    } else {
        None
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC)
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

fn check_constraint(constraint: &Constraint, value: &Value) -> Result<(), String> {
    match (constraint, value) {
        (Constraint::MinLength(n), Value::String(s)) => validators::validate_length(s, *n, usize::MAX),
        (Constraint::MaxLength(n), Value::String(s)) => validators::validate_length(s, 0, *n),
        (Constraint::Min(n), Value::Number(v)) => {
            validators::validate_range(v.as_f64().unwrap_or(f64::NAN), Some(*n), None)
        }
        (Constraint::Max(n), Value::Number(v)) => {
            validators::validate_range(v.as_f64().unwrap_or(f64::NAN), None, Some(*n))
        }
        (Constraint::MinItems(n), Value::Array(items)) => {
            validators::validate_item_count(items.len(), *n, usize::MAX)
        }
        (Constraint::MaxItems(n), Value::Array(items)) => {
            validators::validate_item_count(items.len(), 0, *n)
        }
        (Constraint::OneOf(allowed), Value::String(s)) => validators::validate_one_of(s, allowed),
        (Constraint::Pattern { regex, message }, Value::String(s)) => {
            validators::validate_pattern(s, regex, message)
        }
        (Constraint::Email, Value::String(s)) => validators::validate_email(s),
        (Constraint::NoXss, Value::String(s)) => validators::validate_no_xss(s),
        // Constraint does not apply to this value type
        _ => Ok(()),
    }
}

fn check_cross_field(
    rule: &CrossFieldRule,
    payload: &Map<String, Value>,
    builder: &mut ValidationBuilder,
) {
    match *rule {
        CrossFieldRule::GreaterOrEqual { field, other } => {
            let (Some(a), Some(b)) = (number_at(payload, field), number_at(payload, other)) else {
                return;
            };
            builder.check_condition(
                a < b,
                field,
                format!("must be greater than or equal to {}", other),
            );
        }
        CrossFieldRule::After { field, other } => {
            let (Some(a), Some(b)) = (date_at(payload, field), date_at(payload, other)) else {
                return;
            };
            builder.check_condition(a <= b, field, format!("must be after {}", other));
        }
        CrossFieldRule::RequiredWhen { field, when, equals } => {
            let triggered = payload.get(when).and_then(Value::as_str) == Some(equals);
            let missing = !payload.contains_key(field) && !builder.has_error_for(field);
            builder.check_condition(
                triggered && missing,
                field,
                format!("is required when {} is '{}'", when, equals),
            );
        }
        CrossFieldRule::Matches { field, other } => {
            let (Some(a), Some(b)) = (payload.get(field), payload.get(other)) else {
                return;
            };
            builder.check_condition(a != b, field, format!("must match {}", other));
        }
    }
}

fn number_at(payload: &Map<String, Value>, field: &str) -> Option<f64> {
    payload.get(field).and_then(Value::as_f64)
}

fn date_at(payload: &Map<String, Value>, field: &str) -> Option<DateTime<Utc>> {
    payload.get(field).and_then(Value::as_str).and_then(parse_date)
}
