//! Field rules shared by the category and product payloads.
//!
//! Payload fields arrive as raw JSON values so a wrong type is reported with
//! the field's own message instead of a generic deserialization error.

use serde_json::Value;

use crate::error::{AppError, AppResult};

pub const NAME_MESSAGE: &str = "Name is required and must be a non-empty string";
pub const IMAGE_MESSAGE: &str = "Image must be a string (URL)";
pub const PRICE_MESSAGE: &str = "Price is required and must be a positive number";
pub const CATEGORY_ID_MESSAGE: &str = "Category ID is required and must be a number";

fn invalid(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}

/// A string with non-whitespace content. Returned as submitted.
pub fn required_name(value: Option<Value>) -> AppResult<String> {
    match value {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name),
        _ => Err(invalid(NAME_MESSAGE)),
    }
}

/// Absent, `null` or a string. An empty string is treated as no image.
pub fn optional_image(value: Option<Value>) -> AppResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(image)) if image.is_empty() => Ok(None),
        Some(Value::String(image)) => Ok(Some(image)),
        Some(_) => Err(invalid(IMAGE_MESSAGE)),
    }
}

/// A finite number strictly greater than zero, given as a JSON number or a
/// numeric string.
pub fn positive_price(value: Option<Value>) -> AppResult<f64> {
    let price = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match price {
        Some(p) if p.is_finite() && p > 0.0 => Ok(p),
        _ => Err(invalid(PRICE_MESSAGE)),
    }
}

/// A positive integer id, given as a JSON number or numeric string with no
/// fractional part (`7`, `7.0` and `"7"` are all accepted).
pub fn required_category_id(value: Option<Value>) -> AppResult<i64> {
    let id = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Some(Value::String(s)) => match parse_id_param(&s) {
            Some(IdParam::Id(id)) => Some(id),
            _ => None,
        },
        _ => None,
    };

    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(invalid(CATEGORY_ID_MESSAGE)),
    }
}

/// A path segment or query value that parsed as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdParam {
    Id(i64),
    /// Numeric, but fractional or outside the id range, so no row can match.
    Unmatchable,
}

/// Parses an id from a path segment or query value. Any finite number is
/// accepted; `None` means the value is not numeric at all.
pub fn parse_id_param(raw: &str) -> Option<IdParam> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<i64>() {
        return Some(IdParam::Id(id));
    }

    let number = raw.parse::<f64>().ok().filter(|n| n.is_finite())?;
    Some(integral(number).map_or(IdParam::Unmatchable, IdParam::Id))
}

fn integral(n: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    let in_range = n >= i64::MIN as f64 && n < i64::MAX as f64;
    (n.fract() == 0.0 && in_range).then_some(n as i64)
}
