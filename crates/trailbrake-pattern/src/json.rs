//! JSON import and export.
//!
//! Import runs in two stages so each failure gets the right error kind:
//! 1. text to [`serde_json::Value`]: syntax failures are
//!    [`PatternError::MalformedJson`]
//! 2. a walk over the value in document order: `name`, then `duration`, then
//!    each segment in turn, shape first and ranges second. The first failure
//!    is [`PatternError::InvalidPattern`] naming that field or segment index.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{PatternError, PatternResult};
use crate::pattern::{Pattern, Segment, check_duration, check_name};

const SEGMENT_PAIRS: [&str; 3] = ["timeRange", "throttle", "brake"];

/// Parse and validate a pattern from JSON text.
///
/// # Errors
///
/// - [`PatternError::MalformedJson`] when `text` is not well-formed JSON
/// - [`PatternError::InvalidPattern`] when the JSON is not a usable pattern
///
/// # Example
///
/// ```
/// use trailbrake_pattern::parse_pattern;
///
/// let pattern = parse_pattern(
///     r#"{"name":"Lift","duration":1,"segments":[
///         {"timeRange":[0,1],"throttle":[100,0],"brake":[0,0]}]}"#,
/// )?;
/// assert_eq!(pattern.segments.len(), 1);
///
/// assert!(parse_pattern("{\"name\":").is_err_and(|err| err.is_syntax_error()));
/// # Ok::<(), trailbrake_pattern::PatternError>(())
/// ```
pub fn parse_pattern(text: &str) -> PatternResult<Pattern> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| PatternError::malformed(err.to_string()))?;
    pattern_from_value(value)
}

/// Validate and convert an already parsed JSON value into a pattern.
///
/// # Errors
///
/// Returns [`PatternError::InvalidPattern`] naming the first missing or
/// mistyped field, or the first failing range check.
pub fn pattern_from_value(value: Value) -> PatternResult<Pattern> {
    check_shape(&value)?;
    let pattern: Pattern =
        serde_json::from_value(value).map_err(|err| PatternError::invalid(err.to_string()))?;
    pattern.validate()?;
    Ok(pattern)
}

/// Compact JSON export.
///
/// # Errors
///
/// Fails only if serialization itself fails, which does not happen for
/// finite patterns.
pub fn to_json(pattern: &Pattern) -> Result<String, serde_json::Error> {
    serde_json::to_string(pattern)
}

/// Pretty JSON export, as written by pattern export tooling.
///
/// # Errors
///
/// Same as [`to_json`].
pub fn to_json_pretty(pattern: &Pattern) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(pattern)
}

fn check_shape(value: &Value) -> PatternResult<()> {
    let Value::Object(root) = value else {
        return Err(PatternError::invalid(format!(
            "pattern must be a JSON object, got {}",
            kind(value)
        )));
    };

    let name = required(root, "name", None)?;
    let Value::String(name) = name else {
        return Err(PatternError::invalid(format!(
            "'name' must be a string, got {}",
            kind(name)
        )));
    };
    check_name(name)?;

    let duration = required(root, "duration", None)?;
    let Some(duration) = duration.as_f64() else {
        return Err(PatternError::invalid(format!(
            "'duration' must be a number, got {}",
            kind(duration)
        )));
    };
    check_duration(duration)?;

    if let Some(description) = root.get("description")
        && !description.is_string()
        && !description.is_null()
    {
        return Err(PatternError::invalid(format!(
            "'description' must be a string, got {}",
            kind(description)
        )));
    }

    let segments = required(root, "segments", None)?;
    let Value::Array(segments) = segments else {
        return Err(PatternError::invalid(format!(
            "'segments' must be an array, got {}",
            kind(segments)
        )));
    };
    if segments.is_empty() {
        return Err(PatternError::invalid(
            "'segments' must contain at least one segment",
        ));
    }

    for (index, segment) in segments.iter().enumerate() {
        check_segment(index, segment, duration)?;
    }

    Ok(())
}

fn check_segment(index: usize, segment: &Value, duration: f64) -> PatternResult<()> {
    let Value::Object(fields) = segment else {
        return Err(PatternError::invalid(format!(
            "segments[{index}] must be an object, got {}",
            kind(segment)
        )));
    };

    for field in SEGMENT_PAIRS {
        let pair = required(fields, field, Some(index))?;
        let is_pair = pair
            .as_array()
            .is_some_and(|items| items.len() == 2 && items.iter().all(Value::is_number));
        if !is_pair {
            return Err(PatternError::invalid(format!(
                "segments[{index}].{field} must be an array of two numbers"
            )));
        }
    }

    if let Some(label) = fields.get("label")
        && !label.is_string()
        && !label.is_null()
    {
        return Err(PatternError::invalid(format!(
            "segments[{index}].label must be a string, got {}",
            kind(label)
        )));
    }

    Segment::deserialize(segment)
        .map_err(|err| PatternError::invalid(format!("segments[{index}]: {err}")))?
        .validate(index, duration)
}

fn required<'a>(
    fields: &'a Map<String, Value>,
    field: &str,
    segment: Option<usize>,
) -> PatternResult<&'a Value> {
    match fields.get(field) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(match segment {
            Some(index) => PatternError::invalid(format!(
                "segments[{index}] is missing required field '{field}'"
            )),
            None => PatternError::invalid(format!("missing required field '{field}'")),
        }),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
